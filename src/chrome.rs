// SPDX-License-Identifier: MPL-2.0
//! Auto-hide state machine for transient UI affordances (buttons, bars).
//!
//! ```text
//!            activity                      no activity since the ping
//!   ───────────────────► VisibleActive ─────────────────────► VisiblePendingHide
//!                          ▲      ▲                                   │
//!                 activity │      └───────────── activity ────────────┤
//!                          │                                          │ countdown expired
//!                        Hidden ◄─────────────────────────────────────┘
//! ```
//!
//! The controller never reads a clock; every call receives `now`.

use std::time::{Duration, Instant};

/// What the renderer needs to know.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeVisibility {
    Visible,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromePhase {
    /// Activity was just seen, or a resize drag is in progress.
    VisibleActive,
    /// Still shown; the countdown to hiding is running.
    VisiblePendingHide,
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromeController {
    phase: ChromePhase,
    last_activity: Instant,
    hide_at: Option<Instant>,
    hide_delay: Duration,
    resizing: bool,
}

impl ChromeController {
    /// Session start: shown, with a one-shot countdown of `initial_delay`.
    #[must_use]
    pub fn new(now: Instant, initial_delay: Duration, hide_delay: Duration) -> Self {
        Self {
            phase: ChromePhase::VisibleActive,
            last_activity: now,
            hide_at: Some(now + initial_delay),
            hide_delay,
            resizing: false,
        }
    }

    #[must_use]
    pub fn phase(&self) -> ChromePhase {
        self.phase
    }

    #[must_use]
    pub fn visibility(&self) -> ChromeVisibility {
        match self.phase {
            ChromePhase::Hidden => ChromeVisibility::Hidden,
            ChromePhase::VisibleActive | ChromePhase::VisiblePendingHide => {
                ChromeVisibility::Visible
            }
        }
    }

    /// When the chrome will hide, if a countdown is armed.
    #[must_use]
    pub fn hide_deadline(&self) -> Option<Instant> {
        self.hide_at
    }

    /// Pointer movement or equivalent. Shows the chrome and restarts the
    /// countdown from zero.
    pub fn activity(&mut self, now: Instant) {
        self.phase = ChromePhase::VisibleActive;
        self.last_activity = now;
        self.hide_at = if self.resizing {
            None
        } else {
            Some(now + self.hide_delay)
        };
    }

    /// A manual resize drag started. No countdown runs until it ends.
    pub fn begin_resize(&mut self, now: Instant) {
        self.resizing = true;
        self.activity(now);
    }

    /// The resize drag ended; counts as fresh activity.
    pub fn end_resize(&mut self, now: Instant) {
        self.resizing = false;
        self.activity(now);
    }

    /// Applies the passage of time. Returns `true` if the phase changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let before = self.phase;
        if self.resizing {
            return false;
        }

        if let Some(deadline) = self.hide_at {
            if now >= deadline {
                self.phase = ChromePhase::Hidden;
                self.hide_at = None;
                return before != self.phase;
            }
        }

        if self.phase == ChromePhase::VisibleActive && now > self.last_activity {
            self.phase = ChromePhase::VisiblePendingHide;
        }
        before != self.phase
    }
}
