// SPDX-License-Identifier: MPL-2.0
//! `pinview` is the session core of a borderless, optionally always-on-top
//! media viewer.
//!
//! It displays one still image, animated image or video at a time, steps
//! through the sibling files of a directory, and reconciles window-level state
//! (topmost enforcement, auto-hiding chrome) against a timer-driven
//! environment. Rendering and decoding are left to the shell and to a
//! [`video_player::VideoBackend`].

pub mod animation;
pub mod chrome;
pub mod config;
pub mod directory_scanner;
pub mod error;
pub mod input;
pub mod media;
pub mod navigation;
pub mod session;
pub mod timer;
pub mod topmost;
pub mod video_player;
pub mod window_fit;

#[cfg(test)]
pub(crate) mod test_utils;
