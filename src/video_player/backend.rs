// SPDX-License-Identifier: MPL-2.0
//! Video backend port.
//!
//! The backend owns decoding and presentation. The session only tells it what
//! to do and listens for [`BackendEvent`]s, which arrive later on the same
//! event loop as every other input.
//!
//! # Stale signals
//!
//! Every `open` is tagged with a fresh [`SourceId`]. Events carry the id they
//! were produced for, so a signal from a superseded load can be recognized and
//! dropped.

use crate::error::{Result, VideoError};
use std::path::Path;

/// Identity of one `open` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(u64);

impl SourceId {
    #[must_use]
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }

    /// The id following this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Asynchronous signals from the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendEvent {
    /// The file is open. Its duration and natural frame size are known; a
    /// zero width or height means the stream did not declare one.
    MediaOpened {
        source: SourceId,
        duration_secs: f64,
        width: u32,
        height: u32,
    },
    /// Playback reached the end of the stream.
    MediaEnded { source: SourceId },
    /// The file could not be opened.
    OpenFailed { source: SourceId, error: VideoError },
}

impl BackendEvent {
    #[must_use]
    pub fn source(&self) -> SourceId {
        match self {
            Self::MediaOpened { source, .. }
            | Self::MediaEnded { source }
            | Self::OpenFailed { source, .. } => *source,
        }
    }
}

/// Port for video playback.
///
/// # Lifecycle
///
/// 1. `open()` starts loading asynchronously; the duration and frame size
///    arrive later as [`BackendEvent::MediaOpened`]
/// 2. `play()`, `pause()`, `set_position()` and `set_rate()` may be issued
///    at any time after `open()`, including before the file is ready
/// 3. `close()` releases the file; events for its id may still arrive and
///    must be ignored by the caller
pub trait VideoBackend {
    /// Begins opening `path`.
    ///
    /// # Errors
    ///
    /// Returns an error only for failures detected synchronously. Most open
    /// failures are reported later as [`BackendEvent::OpenFailed`].
    fn open(&mut self, source: SourceId, path: &Path) -> Result<()>;

    fn play(&mut self);

    fn pause(&mut self);

    /// Moves the playback head, in seconds.
    fn set_position(&mut self, secs: f64);

    /// Live playback head, in seconds.
    fn position(&self) -> f64;

    /// Applies a playback rate multiplier.
    fn set_rate(&mut self, rate: f64);

    /// Releases the current file.
    fn close(&mut self);
}
