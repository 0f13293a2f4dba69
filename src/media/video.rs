// SPDX-License-Identifier: MPL-2.0
//! Video sources and container probing.
//!
//! Video files are never decoded here. Loading a video only records where it
//! lives; the backend reports its duration and frame size later, once it has
//! opened the file.

use crate::error::{Result, VideoError};
use std::path::{Path, PathBuf};

/// A video file handed to the playback backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSource {
    pub path: PathBuf,
}

impl VideoSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[cfg(feature = "ffmpeg")]
static FFMPEG_INIT: std::sync::Once = std::sync::Once::new();

/// Initialize FFmpeg once, with its own logging restricted to errors.
#[cfg(feature = "ffmpeg")]
pub fn init_ffmpeg() -> Result<()> {
    let mut init_result: Result<()> = Ok(());

    FFMPEG_INIT.call_once(|| {
        if let Err(e) = ffmpeg_next::init() {
            init_result = Err(VideoError::Other(format!("FFmpeg initialization failed: {e}")).into());
            return;
        }

        // SAFETY: av_log_set_level is thread-safe and only affects logging
        unsafe {
            ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
        }
    });

    init_result
}

/// Facts read from a video container when it is opened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoMetadata {
    pub duration_secs: f64,
    /// Natural frame size; zero when the stream does not declare one.
    pub width: u32,
    pub height: u32,
}

/// Reads the duration and natural frame size of a video file.
///
/// # Errors
///
/// Returns a [`VideoError`] categorized from the FFmpeg message when the file
/// cannot be opened or holds no video stream.
#[cfg(feature = "ffmpeg")]
pub fn read_metadata<P: AsRef<Path>>(path: P) -> Result<VideoMetadata> {
    init_ffmpeg()?;

    let ictx = ffmpeg_next::format::input(&path.as_ref())
        .map_err(|e| VideoError::from_message(&e.to_string()))?;

    let stream = ictx
        .streams()
        .best(ffmpeg_next::media::Type::Video)
        .ok_or(VideoError::NoVideoStream)?;

    let decoder = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())
        .and_then(|context| context.decoder().video())
        .map_err(|e| VideoError::Other(format!("Failed to create video decoder: {e}")))?;

    let duration = ictx.duration();
    let duration_secs = if duration <= 0 {
        0.0
    } else {
        duration as f64 / f64::from(ffmpeg_next::ffi::AV_TIME_BASE)
    };

    Ok(VideoMetadata {
        duration_secs,
        width: decoder.width(),
        height: decoder.height(),
    })
}

/// Without FFmpeg support compiled in, no metadata can be read.
///
/// # Errors
///
/// Always returns [`VideoError::Other`].
#[cfg(not(feature = "ffmpeg"))]
pub fn read_metadata<P: AsRef<Path>>(path: P) -> Result<VideoMetadata> {
    Err(VideoError::Other(format!(
        "cannot open {}: built without the `ffmpeg` feature",
        path.as_ref().display()
    ))
    .into())
}
