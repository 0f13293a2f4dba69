// SPDX-License-Identifier: MPL-2.0
//! Render state reported by the session after every event.

use crate::chrome::{ChromePhase, ChromeVisibility};
use crate::error::Error;
use crate::media::{ImageData, MediaKind, VideoSource};
use crate::video_player::time_units::format_timestamp;
use crate::video_player::{PlaybackState, SourceId};
use std::fmt;
use std::path::PathBuf;

/// What the renderer should draw.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayHandle {
    /// A still image, or the current frame of an animation.
    Image(ImageData),
    /// A video being presented by the backend under `source`.
    Video { video: VideoSource, source: SourceId },
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackSnapshot {
    Animation {
        is_playing: bool,
        /// Current frame index.
        position: usize,
        frame_count: usize,
        frame_interval_ms: u32,
    },
    Video {
        state: PlaybackState,
        is_playing: bool,
        position_secs: f64,
        duration_secs: f64,
        speed: f64,
        is_looping: bool,
        is_scrubbing: bool,
    },
}

impl PlaybackSnapshot {
    #[must_use]
    pub fn is_playing(&self) -> bool {
        match self {
            Self::Animation { is_playing, .. } | Self::Video { is_playing, .. } => *is_playing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopmostSnapshot {
    pub intent: bool,
    pub actual: bool,
}

impl TopmostSnapshot {
    /// Intent and OS flag disagree. Diagnostic only.
    #[must_use]
    pub fn has_drift(&self) -> bool {
        self.intent != self.actual
    }
}

/// The most recent load that did not produce displayable media.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub reason: Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub path: Option<PathBuf>,
    pub kind: Option<MediaKind>,
    pub display: Option<DisplayHandle>,
    /// Absent for still images and when nothing is loaded.
    pub playback: Option<PlaybackSnapshot>,
    pub chrome: ChromeVisibility,
    pub chrome_phase: ChromePhase,
    pub cursor: Option<usize>,
    pub media_count: usize,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    pub topmost: TopmostSnapshot,
    pub last_error: Option<LoadFailure>,
}

impl fmt::Display for SessionSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.path, self.kind) {
            (Some(path), Some(kind)) => write!(f, "[{kind:?}] {}", path.display())?,
            _ => write!(f, "[empty]")?,
        }

        match self.cursor {
            Some(idx) => write!(f, "  {}/{}", idx + 1, self.media_count)?,
            None => write!(f, "  -/{}", self.media_count)?,
        }
        write!(
            f,
            "  prev:{} next:{}",
            if self.can_go_previous { "yes" } else { "no" },
            if self.can_go_next { "yes" } else { "no" }
        )?;

        match &self.playback {
            Some(PlaybackSnapshot::Animation {
                position,
                frame_count,
                frame_interval_ms,
                ..
            }) => write!(
                f,
                "  frame {}/{} @{}ms",
                position + 1,
                frame_count,
                frame_interval_ms
            )?,
            Some(PlaybackSnapshot::Video {
                state,
                position_secs,
                duration_secs,
                speed,
                is_looping,
                is_scrubbing,
                ..
            }) => {
                write!(
                    f,
                    "  {:?} {} / {}  x{}",
                    state,
                    format_timestamp(*position_secs),
                    format_timestamp(*duration_secs),
                    speed
                )?;
                if *is_looping {
                    write!(f, " loop")?;
                }
                if *is_scrubbing {
                    write!(f, " scrubbing")?;
                }
            }
            None => {}
        }

        write!(f, "  chrome:{:?}", self.chrome_phase)?;
        write!(f, "  topmost:{}", if self.topmost.intent { "on" } else { "off" })?;
        if self.topmost.has_drift() {
            write!(f, " (drift)")?;
        }
        if let Some(failure) = &self.last_error {
            write!(f, "\n  failed to load {}: {}", failure.path.display(), failure.reason)?;
        }
        Ok(())
    }
}
