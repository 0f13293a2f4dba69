// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Animation**: frame interval presets for animated images
//! - **Video**: playback speed presets, loop restart offset, readout period
//! - **Chrome**: auto-hide countdowns for transient UI affordances
//! - **Topmost**: reconciliation period
//! - **Window**: minimum window size

// ==========================================================================
// Animation Defaults
// ==========================================================================

/// Frame interval presets (in milliseconds) offered for animated images.
pub const FRAME_INTERVAL_PRESETS_MS: &[u32] = &[125, 100, 90, 80, 70, 60, 50];

/// Default frame interval for animated images (in milliseconds).
pub const DEFAULT_FRAME_INTERVAL_MS: u32 = 100;

// ==========================================================================
// Video Defaults
// ==========================================================================

/// Playback speed presets, slowest first.
pub const PLAYBACK_SPEED_PRESETS: &[f64] = &[0.5, 0.75, 1.0, 1.25, 1.5, 1.75, 2.0];

/// Default playback speed multiplier.
pub const DEFAULT_PLAYBACK_SPEED: f64 = 1.0;

/// Whether videos loop by default.
pub const DEFAULT_LOOP_VIDEO: bool = true;

/// Position used when a looping video restarts (in seconds).
///
/// Restarting at exactly zero does not make every backend re-render the first frame.
pub const LOOP_RESTART_OFFSET_SECS: f64 = 0.01;

/// Period of the position readout refresh (in milliseconds).
pub const POSITION_SYNC_PERIOD_MS: u64 = 1_000;

// ==========================================================================
// Chrome Defaults
// ==========================================================================

/// Delay after the last activity before chrome hides (in milliseconds).
pub const DEFAULT_CHROME_HIDE_DELAY_MS: u64 = 2_000;

/// One-shot delay before chrome hides after session start (in milliseconds).
pub const DEFAULT_CHROME_INITIAL_DELAY_MS: u64 = 1_500;

/// Minimum configurable chrome delay (in milliseconds).
pub const MIN_CHROME_DELAY_MS: u64 = 100;

/// Maximum configurable chrome delay (in milliseconds).
pub const MAX_CHROME_DELAY_MS: u64 = 30_000;

// ==========================================================================
// Topmost Defaults
// ==========================================================================

/// Whether the window starts pinned above all others.
pub const DEFAULT_TOPMOST: bool = false;

/// Period of the topmost drift repair loop (in milliseconds).
pub const TOPMOST_RECONCILE_PERIOD_MS: u64 = 1_000;

// ==========================================================================
// Window Defaults
// ==========================================================================

/// Minimum window width in logical pixels.
pub const MIN_WINDOW_WIDTH: f64 = 200.0;

/// Minimum window height in logical pixels.
pub const MIN_WINDOW_HEIGHT: f64 = 150.0;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(!FRAME_INTERVAL_PRESETS_MS.is_empty());
    assert!(DEFAULT_FRAME_INTERVAL_MS > 0);

    assert!(!PLAYBACK_SPEED_PRESETS.is_empty());
    assert!(DEFAULT_PLAYBACK_SPEED > 0.0);
    assert!(LOOP_RESTART_OFFSET_SECS > 0.0);
    assert!(POSITION_SYNC_PERIOD_MS > 0);

    assert!(MIN_CHROME_DELAY_MS > 0);
    assert!(MAX_CHROME_DELAY_MS >= MIN_CHROME_DELAY_MS);
    assert!(DEFAULT_CHROME_HIDE_DELAY_MS >= MIN_CHROME_DELAY_MS);
    assert!(DEFAULT_CHROME_HIDE_DELAY_MS <= MAX_CHROME_DELAY_MS);
    assert!(DEFAULT_CHROME_INITIAL_DELAY_MS >= MIN_CHROME_DELAY_MS);
    assert!(DEFAULT_CHROME_INITIAL_DELAY_MS <= MAX_CHROME_DELAY_MS);

    assert!(TOPMOST_RECONCILE_PERIOD_MS > 0);

    assert!(MIN_WINDOW_WIDTH > 0.0);
    assert!(MIN_WINDOW_HEIGHT > 0.0);
};
