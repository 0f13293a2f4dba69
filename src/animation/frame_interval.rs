// SPDX-License-Identifier: MPL-2.0
//! Frame interval domain type for animated images.

use crate::config::{DEFAULT_FRAME_INTERVAL_MS, FRAME_INTERVAL_PRESETS_MS};
use std::time::Duration;

/// Time between two animation frames, always one of the preset values.
///
/// # Example
///
/// ```
/// use pinview::animation::FrameInterval;
///
/// assert_eq!(FrameInterval::new(60).millis(), 60);
///
/// // Off-preset values snap to the nearest preset
/// assert_eq!(FrameInterval::new(84).millis(), 80);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameInterval(u32);

impl FrameInterval {
    /// Creates a frame interval, snapping to the nearest preset.
    ///
    /// Ties go to the preset listed first (the slower one).
    #[must_use]
    pub fn new(millis: u32) -> Self {
        let snapped = FRAME_INTERVAL_PRESETS_MS
            .iter()
            .copied()
            .min_by_key(|preset| preset.abs_diff(millis))
            .unwrap_or(DEFAULT_FRAME_INTERVAL_MS);
        Self(snapped)
    }

    #[must_use]
    pub fn millis(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(u64::from(self.0))
    }

    /// All selectable intervals, slowest first.
    pub fn presets() -> impl Iterator<Item = Self> {
        FRAME_INTERVAL_PRESETS_MS.iter().map(|&ms| Self(ms))
    }
}

impl Default for FrameInterval {
    fn default() -> Self {
        Self(DEFAULT_FRAME_INTERVAL_MS)
    }
}
