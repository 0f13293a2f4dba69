// SPDX-License-Identifier: MPL-2.0
//! Keeps the window above all others when the user asked for it.
//!
//! The OS may drop the topmost flag at any time, and the window drops it
//! itself on deactivation so other focused windows are not hidden. The
//! enforcer remembers the user's intent and repairs drift on a periodic
//! reconcile.

/// Narrow capability over the OS window property.
pub trait TopmostWindow {
    /// Requests the flag and returns the flag actually in effect afterwards.
    fn set_topmost(&mut self, topmost: bool) -> bool;

    /// The flag currently reported by the OS.
    fn is_topmost(&self) -> bool;
}

/// A window with no OS behind it; the flag simply sticks.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HeadlessWindow {
    topmost: bool,
}

impl HeadlessWindow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates the OS clearing the flag behind the application's back.
    pub fn drop_topmost(&mut self) {
        self.topmost = false;
    }
}

impl TopmostWindow for HeadlessWindow {
    fn set_topmost(&mut self, topmost: bool) -> bool {
        self.topmost = topmost;
        self.topmost
    }

    fn is_topmost(&self) -> bool {
        self.topmost
    }
}

/// Intent plus the repair loop's bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TopmostEnforcer {
    intent: bool,
    repairs: u64,
}

impl TopmostEnforcer {
    #[must_use]
    pub fn new(intent: bool) -> Self {
        Self { intent, repairs: 0 }
    }

    #[must_use]
    pub fn intent(&self) -> bool {
        self.intent
    }

    /// Number of times drift has been repaired.
    #[must_use]
    pub fn repairs(&self) -> u64 {
        self.repairs
    }

    /// Applies the startup intent to the window.
    pub fn apply<W: TopmostWindow + ?Sized>(&self, window: &mut W) -> bool {
        window.set_topmost(self.intent)
    }

    /// Records a new intent and issues the OS call once.
    pub fn set_intent<W: TopmostWindow + ?Sized>(&mut self, window: &mut W, intent: bool) -> bool {
        self.intent = intent;
        window.set_topmost(intent)
    }

    /// Periodic repair. Returns `true` if the flag had to be re-asserted.
    pub fn reconcile<W: TopmostWindow + ?Sized>(&mut self, window: &mut W) -> bool {
        if self.intent && !window.is_topmost() {
            let actual = window.set_topmost(true);
            self.repairs += 1;
            tracing::debug!(actual, "topmost drift repaired");
            true
        } else {
            false
        }
    }

    /// The window lost focus: drop the flag, keep the intent.
    pub fn window_deactivated<W: TopmostWindow + ?Sized>(&self, window: &mut W) {
        if window.is_topmost() {
            window.set_topmost(false);
        }
    }

    /// The window regained focus: restore the flag if wanted.
    pub fn window_activated<W: TopmostWindow + ?Sized>(&self, window: &mut W) {
        if self.intent && !window.is_topmost() {
            window.set_topmost(true);
        }
    }

    /// True while the OS flag disagrees with the intent.
    #[must_use]
    pub fn has_drift<W: TopmostWindow + ?Sized>(&self, window: &W) -> bool {
        self.intent != window.is_topmost()
    }
}
