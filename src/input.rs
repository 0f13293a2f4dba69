// SPDX-License-Identifier: MPL-2.0
//! Keyboard bindings.
//!
//! | Key            | Action                               |
//! |----------------|--------------------------------------|
//! | `Left`, `A`    | previous file                        |
//! | `Right`, `D`   | next file                            |
//! | `Space`        | play / pause (videos only)           |

use crate::media::MediaKind;
use crate::session::Command;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    A,
    D,
    Space,
}

/// Unrecognized key name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKey(pub String);

impl std::fmt::Display for UnknownKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown key: {}", self.0)
    }
}

impl std::error::Error for UnknownKey {}

impl FromStr for Key {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" | "arrowleft" => Ok(Self::Left),
            "right" | "arrowright" => Ok(Self::Right),
            "a" => Ok(Self::A),
            "d" => Ok(Self::D),
            "space" | " " => Ok(Self::Space),
            _ => Err(UnknownKey(s.to_string())),
        }
    }
}

/// Maps a key press to a command, given what is displayed.
///
/// Video controls are swallowed unless a video is on screen.
#[must_use]
pub fn command_for_key(key: Key, displayed: Option<MediaKind>) -> Option<Command> {
    let command = match key {
        Key::Left | Key::A => Command::NavigatePrevious,
        Key::Right | Key::D => Command::NavigateNext,
        Key::Space => Command::TogglePlayPause,
    };
    if command.is_video_control() && displayed != Some(MediaKind::Video) {
        return None;
    }
    Some(command)
}
