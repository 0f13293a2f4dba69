// SPDX-License-Identifier: MPL-2.0
//! Window sizing for the borderless viewer.

use crate::config::{MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};

/// A window size in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSize {
    pub width: f64,
    pub height: f64,
}

impl WindowSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Reshapes the window to the media aspect ratio, keeping its height.
///
/// When the resulting width does not fit on screen, the width is capped to
/// the screen and the height follows the aspect ratio instead. Returns `None`
/// for media with a zero dimension.
#[must_use]
pub fn fit_to_aspect(
    current_height: f64,
    media_width: u32,
    media_height: u32,
    screen_width: f64,
) -> Option<WindowSize> {
    if media_width == 0 || media_height == 0 {
        return None;
    }
    let aspect = f64::from(media_width) / f64::from(media_height);

    let mut width = current_height * aspect;
    let mut height = current_height;
    if width > screen_width {
        width = screen_width;
        height = width / aspect;
    }
    Some(WindowSize::new(width, height))
}

/// Enforces the minimum window size.
#[must_use]
pub fn clamp_to_min(size: WindowSize) -> WindowSize {
    WindowSize::new(
        size.width.max(MIN_WINDOW_WIDTH),
        size.height.max(MIN_WINDOW_HEIGHT),
    )
}
