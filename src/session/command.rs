// SPDX-License-Identifier: MPL-2.0
//! Inputs accepted by the media session.

use std::path::PathBuf;

/// Every user or window event the session reacts to.
///
/// Commands are dispatched synchronously, one at a time, on the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Session bootstrap with the file given on the command line.
    OpenWithArgument(PathBuf),
    NavigatePrevious,
    NavigateNext,
    TogglePlayPause,
    /// Jump to a position in seconds.
    SeekTo(f64),
    BeginScrub,
    /// Live position while dragging, in seconds.
    ScrubTo(f64),
    EndScrub,
    /// Playback speed multiplier; snapped to the nearest preset.
    SetSpeed(f64),
    SetLoop(bool),
    /// Animation frame interval in milliseconds; snapped to the nearest preset.
    SetFrameInterval(u32),
    /// Pointer movement or equivalent.
    ActivityPing,
    BeginResize,
    EndResize,
    SetTopmostIntent(bool),
    WindowActivated,
    WindowDeactivated,
}

impl Command {
    /// Commands that only mean something while a video is displayed.
    #[must_use]
    pub fn is_video_control(&self) -> bool {
        matches!(
            self,
            Self::TogglePlayPause
                | Self::SeekTo(_)
                | Self::BeginScrub
                | Self::ScrubTo(_)
                | Self::EndScrub
        )
    }
}
