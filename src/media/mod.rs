// SPDX-License-Identifier: MPL-2.0
//! Media classification and loading for still images, animated images and videos.
//!
//! Classification is by file extension only; no content sniffing takes place.

pub mod image;
pub mod info;
pub mod loader;
pub mod video;

use std::path::Path;

pub use image::{AnimationData, ImageData};
pub use info::MediaInfo;
pub use loader::{FsMediaLoader, LoadedMedia, MediaLoader};
pub use video::{VideoMetadata, VideoSource};

/// The three kinds of media the viewer can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    StillImage,
    AnimatedImage,
    Video,
}

/// Supported media extensions
pub mod extensions {
    /// Still image file extensions
    pub const STILL_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tiff", "bmp", "ico"];

    /// Animated image file extensions
    pub const ANIMATED_IMAGE_EXTENSIONS: &[&str] = &["gif"];

    /// Video file extensions
    pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "wmv", "mkv"];

    /// All supported extensions (images + videos)
    #[must_use]
    pub fn all_supported_extensions() -> Vec<&'static str> {
        STILL_IMAGE_EXTENSIONS
            .iter()
            .chain(ANIMATED_IMAGE_EXTENSIONS.iter())
            .chain(VIDEO_EXTENSIONS.iter())
            .copied()
            .collect()
    }
}

/// Classifies a path by its extension, case-insensitively.
///
/// Returns `None` for unrecognized or missing extensions.
#[must_use]
pub fn detect_media_kind<P: AsRef<Path>>(path: P) -> Option<MediaKind> {
    let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
    let ext = ext.as_str();

    if extensions::STILL_IMAGE_EXTENSIONS.contains(&ext) {
        Some(MediaKind::StillImage)
    } else if extensions::ANIMATED_IMAGE_EXTENSIONS.contains(&ext) {
        Some(MediaKind::AnimatedImage)
    } else if extensions::VIDEO_EXTENSIONS.contains(&ext) {
        Some(MediaKind::Video)
    } else {
        None
    }
}

/// Returns true if the path carries a recognized media extension.
#[must_use]
pub fn is_supported_media<P: AsRef<Path>>(path: P) -> bool {
    detect_media_kind(path).is_some()
}
