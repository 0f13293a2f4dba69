// SPDX-License-Identifier: MPL-2.0
//! Video half of the playback engine.
//!
//! [`VideoPlayer`] holds the state machine; decoding and presentation are
//! delegated to a [`VideoBackend`]. [`ClockBackend`] is the backend used by
//! the headless shell.

pub mod backend;
mod clock_backend;
mod playback_speed;
mod state;
pub mod time_units;

pub use backend::{BackendEvent, SourceId, VideoBackend};
pub use clock_backend::ClockBackend;
pub use playback_speed::PlaybackSpeed;
pub use state::{PlaybackState, VideoPlayer};
