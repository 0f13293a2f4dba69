// SPDX-License-Identifier: MPL-2.0
//! Playback speed domain type for video playback.
//!
//! Speeds are restricted to the preset table in [`crate::config`]; any other
//! value snaps to the nearest preset.

use crate::config::{DEFAULT_PLAYBACK_SPEED, PLAYBACK_SPEED_PRESETS};

/// Playback speed multiplier, always one of the presets.
///
/// # Example
///
/// ```
/// use pinview::video_player::PlaybackSpeed;
///
/// let speed = PlaybackSpeed::new(1.5);
/// assert_eq!(speed.value(), 1.5);
///
/// // Values between presets snap to the nearest one
/// assert_eq!(PlaybackSpeed::new(1.1).value(), 1.0);
/// assert_eq!(PlaybackSpeed::new(100.0).value(), 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSpeed(f64);

impl PlaybackSpeed {
    /// Creates a new playback speed, snapping to the nearest preset.
    ///
    /// Non-finite input falls back to normal speed.
    #[must_use]
    pub fn new(speed: f64) -> Self {
        if !speed.is_finite() {
            return Self::default();
        }
        let snapped = PLAYBACK_SPEED_PRESETS
            .iter()
            .copied()
            .min_by(|a, b| (a - speed).abs().total_cmp(&(b - speed).abs()))
            .unwrap_or(DEFAULT_PLAYBACK_SPEED);
        Self(snapped)
    }

    /// Returns the speed value as f64.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns the next higher preset speed, or self if at maximum.
    #[must_use]
    pub fn increase(self) -> Self {
        let next = PLAYBACK_SPEED_PRESETS
            .iter()
            .find(|&&s| s > self.0 + 0.001)
            .copied()
            .unwrap_or(self.0);
        Self(next)
    }

    /// Returns the next lower preset speed, or self if at minimum.
    #[must_use]
    pub fn decrease(self) -> Self {
        let prev = PLAYBACK_SPEED_PRESETS
            .iter()
            .rev()
            .find(|&&s| s < self.0 - 0.001)
            .copied()
            .unwrap_or(self.0);
        Self(prev)
    }
}

impl Default for PlaybackSpeed {
    fn default() -> Self {
        Self(DEFAULT_PLAYBACK_SPEED)
    }
}
