//! Gesture de-duplication for row actions
//!
//! A single intent can reach the terminal as several events: a hotkey
//! followed by a click on the same action, or a click that some terminal
//! emulators report twice. [`GestureGuard`] collapses repeats of the same
//! target inside a short window into one invocation.

use std::time::{Duration, Instant};

/// Window inside which a repeat on the same target counts as the same gesture
pub const GESTURE_WINDOW_MS: u64 = 300;

/// What a gesture was aimed at: (action index, record id)
pub type GestureTarget = (usize, u64);

#[derive(Debug, Clone)]
pub struct GestureGuard {
    window: Duration,
    last: Option<(GestureTarget, Instant)>,
}

impl GestureGuard {
    pub fn new() -> Self {
        Self::with_window(Duration::from_millis(GESTURE_WINDOW_MS))
    }

    pub fn with_window(window: Duration) -> Self {
        Self { window, last: None }
    }

    /// Returns true if this event starts a new gesture and should fire
    ///
    /// A repeat on the same target within the window is swallowed; the window
    /// is measured from the event that fired, so a held-down sequence cannot
    /// extend it indefinitely.
    pub fn admit(&mut self, target: GestureTarget, now: Instant) -> bool {
        if let Some((last_target, fired_at)) = self.last {
            if last_target == target && now.saturating_duration_since(fired_at) < self.window {
                return false;
            }
        }
        self.last = Some((target, now));
        true
    }

    /// Forget the last gesture (e.g. after the page changes)
    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl Default for GestureGuard {
    fn default() -> Self {
        Self::new()
    }
}
