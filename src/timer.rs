// SPDX-License-Identifier: MPL-2.0
//! Scheduled tasks owned by the session.
//!
//! Timers are plain data: the session asks for the next deadline, the event
//! loop sleeps until then, and [`Timers::pop_due`] reports what fired. At most
//! one timer per [`TimerKind`] exists; scheduling a kind again replaces it.

use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Animated image frame advance.
    FrameAdvance,
    /// Video position readout refresh.
    PositionSync,
    /// Chrome auto-hide countdown (one-shot).
    ChromeHide,
    /// Topmost drift repair.
    TopmostReconcile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Timer {
    deadline: Instant,
    /// `None` for one-shot timers.
    period: Option<Duration>,
}

#[derive(Debug, Clone, Default)]
pub struct Timers {
    active: HashMap<TimerKind, Timer>,
}

impl Timers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires every `period`, first at `now + period`.
    ///
    /// A zero period is treated as one millisecond.
    pub fn schedule_repeating(&mut self, kind: TimerKind, period: Duration, now: Instant) {
        let period = period.max(Duration::from_millis(1));
        self.active.insert(
            kind,
            Timer {
                deadline: now + period,
                period: Some(period),
            },
        );
    }

    /// Fires once at `deadline`.
    pub fn schedule_at(&mut self, kind: TimerKind, deadline: Instant) {
        self.active.insert(
            kind,
            Timer {
                deadline,
                period: None,
            },
        );
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        self.active.remove(&kind);
    }

    #[must_use]
    pub fn is_scheduled(&self, kind: TimerKind) -> bool {
        self.active.contains_key(&kind)
    }

    #[must_use]
    pub fn deadline(&self, kind: TimerKind) -> Option<Instant> {
        self.active.get(&kind).map(|timer| timer.deadline)
    }

    /// The earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.active.values().map(|timer| timer.deadline).min()
    }

    /// Removes and returns every firing due at `now`, oldest first.
    ///
    /// A repeating timer that missed several periods fires once per missed
    /// period, so the caller sees exactly the ticks that elapsed.
    pub fn pop_due(&mut self, now: Instant) -> Vec<TimerKind> {
        let mut fired = Vec::new();
        loop {
            let due = self
                .active
                .iter()
                .filter(|(_, timer)| timer.deadline <= now)
                .min_by_key(|(_, timer)| timer.deadline)
                .map(|(kind, timer)| (*kind, *timer));

            let Some((kind, timer)) = due else {
                break;
            };

            fired.push(kind);
            match timer.period {
                Some(period) => {
                    if let Some(entry) = self.active.get_mut(&kind) {
                        entry.deadline = timer.deadline + period;
                    }
                }
                None => {
                    self.active.remove(&kind);
                }
            }
        }
        fired
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}
