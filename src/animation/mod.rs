// SPDX-License-Identifier: MPL-2.0
//! Frame advance for animated images.
//!
//! The whole frame sequence is decoded before playback starts, so the player
//! only tracks an index. The periodic tick that drives [`AnimationPlayer::tick`]
//! is owned by the session, which restarts it when the interval changes.
//!
//! A player only exists while its animation is displayed and always runs.
//! Stopping is done by the session, which cancels the tick and drops the player.

mod frame_interval;

pub use frame_interval::FrameInterval;

/// Playback state of one animated image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationPlayer {
    position: usize,
    frame_count: usize,
    interval: FrameInterval,
}

impl AnimationPlayer {
    /// A freshly loaded animation: running at frame 0.
    #[must_use]
    pub fn new(frame_count: usize, interval: FrameInterval) -> Self {
        Self {
            position: 0,
            frame_count,
            interval,
        }
    }

    /// Index of the frame on screen.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Total number of frames.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    #[must_use]
    pub fn interval(&self) -> FrameInterval {
        self.interval
    }

    /// Advances one frame, wrapping at the end.
    ///
    /// Returns `true` if the position changed. A player with no frames
    /// never moves.
    pub fn tick(&mut self) -> bool {
        if self.frame_count == 0 {
            return false;
        }
        self.position = (self.position + 1) % self.frame_count;
        true
    }

    /// Changes the frame rate. The position is kept.
    pub fn set_interval(&mut self, interval: FrameInterval) {
        self.interval = interval;
    }
}
