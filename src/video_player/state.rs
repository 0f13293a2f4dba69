// SPDX-License-Identifier: MPL-2.0
//! Playback state machine for video player.
//!
//! Manages the lifecycle of video playback with clear state transitions:
//! - Stopped: loaded, not started yet
//! - Playing: the backend is advancing
//! - Paused: held at the current position
//! - Ended: reached the end with looping disabled
//!
//! A scrub (user dragging the position indicator) is tracked beside the state.
//! While it lasts, the state is `Paused` and the periodic position readout is
//! suppressed.

use super::backend::{SourceId, VideoBackend};
use super::playback_speed::PlaybackSpeed;
use crate::config::LOOP_RESTART_OFFSET_SECS;
use std::path::{Path, PathBuf};

/// Playback state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
    Ended,
}

/// State of one loaded video, mirrored from and driving a [`VideoBackend`].
///
/// Every method that changes playback takes the backend explicitly; the
/// player never holds on to it.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoPlayer {
    source: SourceId,
    path: PathBuf,
    state: PlaybackState,
    /// Readout position in seconds, refreshed by the sync tick.
    position_secs: f64,
    /// Zero until the backend reports the opened media.
    duration_secs: f64,
    /// Natural frame size, once reported.
    dimensions: Option<(u32, u32)>,
    speed: PlaybackSpeed,
    loop_enabled: bool,
    scrubbing: bool,
}

impl VideoPlayer {
    /// Creates a stopped player for a video that has been handed to the backend.
    #[must_use]
    pub fn new(source: SourceId, path: &Path, speed: PlaybackSpeed, loop_enabled: bool) -> Self {
        Self {
            source,
            path: path.to_path_buf(),
            state: PlaybackState::Stopped,
            position_secs: 0.0,
            duration_secs: 0.0,
            dimensions: None,
            speed,
            loop_enabled,
            scrubbing: false,
        }
    }

    #[must_use]
    pub fn source(&self) -> SourceId {
        self.source
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    #[must_use]
    pub fn position_secs(&self) -> f64 {
        self.position_secs
    }

    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Natural frame size reported by the backend, if any.
    #[must_use]
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }

    #[must_use]
    pub fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    #[must_use]
    pub fn loop_enabled(&self) -> bool {
        self.loop_enabled
    }

    #[must_use]
    pub fn is_scrubbing(&self) -> bool {
        self.scrubbing
    }

    /// Autoplay after a successful load.
    pub fn start<B: VideoBackend + ?Sized>(&mut self, backend: &mut B) {
        backend.set_rate(self.speed.value());
        backend.play();
        self.state = PlaybackState::Playing;
    }

    /// Records what the backend learned while opening the file.
    pub fn media_opened(&mut self, duration_secs: f64, width: u32, height: u32) {
        self.duration_secs = if duration_secs.is_finite() {
            duration_secs.max(0.0)
        } else {
            0.0
        };
        self.dimensions = (width > 0 && height > 0).then_some((width, height));
        self.position_secs = self.clamp_position(self.position_secs);
    }

    pub fn play<B: VideoBackend + ?Sized>(&mut self, backend: &mut B) {
        match self.state {
            PlaybackState::Playing => {}
            PlaybackState::Ended => {
                self.position_secs = 0.0;
                backend.set_position(0.0);
                backend.play();
                self.state = PlaybackState::Playing;
            }
            PlaybackState::Stopped | PlaybackState::Paused => {
                backend.play();
                self.state = PlaybackState::Playing;
            }
        }
    }

    pub fn pause<B: VideoBackend + ?Sized>(&mut self, backend: &mut B) {
        if self.state == PlaybackState::Playing {
            self.position_secs = self.clamp_position(backend.position());
            backend.pause();
            self.state = PlaybackState::Paused;
        }
    }

    /// Play when not playing, pause otherwise. Never seeks, except for the
    /// restart from zero after the end.
    pub fn toggle_play_pause<B: VideoBackend + ?Sized>(&mut self, backend: &mut B) {
        if self.is_playing() {
            self.pause(backend);
        } else {
            self.play(backend);
        }
    }

    /// Jumps to `secs`, clamped to the known duration.
    ///
    /// A seek after the end leaves the video paused at the new position.
    pub fn seek_to<B: VideoBackend + ?Sized>(&mut self, backend: &mut B, secs: f64) {
        let target = self.clamp_position(secs);
        backend.set_position(target);
        self.position_secs = target;
        if self.state == PlaybackState::Ended && target < self.duration_secs {
            self.state = PlaybackState::Paused;
        }
    }

    /// Starts a scrub. Always pauses.
    pub fn begin_scrub<B: VideoBackend + ?Sized>(&mut self, backend: &mut B) {
        if self.state == PlaybackState::Playing {
            self.position_secs = self.clamp_position(backend.position());
            backend.pause();
        }
        self.state = PlaybackState::Paused;
        self.scrubbing = true;
    }

    /// Live position update while dragging. Ignored outside a scrub.
    pub fn scrub_to<B: VideoBackend + ?Sized>(&mut self, backend: &mut B, secs: f64) {
        if !self.scrubbing {
            return;
        }
        let target = self.clamp_position(secs);
        backend.set_position(target);
        self.position_secs = target;
    }

    /// Ends a scrub and resumes playback, whatever the state before the scrub.
    pub fn end_scrub<B: VideoBackend + ?Sized>(&mut self, backend: &mut B) {
        if !self.scrubbing {
            return;
        }
        self.scrubbing = false;
        backend.play();
        self.state = PlaybackState::Playing;
    }

    /// Applies a new rate immediately, without a state change.
    pub fn set_speed<B: VideoBackend + ?Sized>(&mut self, backend: &mut B, speed: PlaybackSpeed) {
        self.speed = speed;
        backend.set_rate(speed.value());
    }

    pub fn set_loop(&mut self, enabled: bool) {
        self.loop_enabled = enabled;
    }

    /// Periodic readout refresh.
    ///
    /// Suppressed during a scrub. Reaching the known duration while playing
    /// is handled as the end of the media.
    pub fn sync_tick<B: VideoBackend + ?Sized>(&mut self, backend: &mut B) {
        if self.scrubbing || self.state != PlaybackState::Playing {
            return;
        }
        let live = backend.position();
        if self.duration_secs > 0.0 && live >= self.duration_secs {
            self.position_secs = self.duration_secs;
            self.reached_end(backend);
        } else {
            self.position_secs = self.clamp_position(live);
        }
    }

    /// End of stream: loop back near the start, or stop in `Ended`.
    pub fn reached_end<B: VideoBackend + ?Sized>(&mut self, backend: &mut B) {
        if self.state != PlaybackState::Playing {
            return;
        }
        if self.loop_enabled {
            let restart = LOOP_RESTART_OFFSET_SECS.min(self.duration_secs);
            backend.set_position(restart);
            backend.play();
            self.position_secs = restart;
            self.state = PlaybackState::Playing;
        } else {
            backend.pause();
            self.position_secs = self.duration_secs;
            self.state = PlaybackState::Ended;
        }
    }

    fn clamp_position(&self, secs: f64) -> f64 {
        if !secs.is_finite() {
            return 0.0;
        }
        secs.clamp(0.0, self.duration_secs)
    }
}
