//! # Countdown Timer
//!
//! Millisecond countdown timer used by the session state machines. Timers
//! are advanced cooperatively by the host's periodic clock tick; nothing
//! fires asynchronously. Expiry is a condition the owning state machine
//! checks, not a callback.

/// Cooperative countdown timer
///
/// A timer with a zero timeout is disabled: `start` leaves it stopped, so
/// `is_running() && has_expired()` gates never trigger.
#[derive(Debug, Clone)]
pub struct Timer {
    timeout_ms: u32,
    elapsed_ms: u32,
    running: bool,
}

impl Timer {
    /// Create a stopped timer with the given timeout
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            timeout_ms,
            elapsed_ms: 0,
            running: false,
        }
    }

    /// Start (or restart) the timer from zero
    pub fn start(&mut self) {
        if self.timeout_ms > 0 {
            self.elapsed_ms = 0;
            self.running = true;
        }
    }

    /// Stop the timer and discard its elapsed time
    pub fn stop(&mut self) {
        self.elapsed_ms = 0;
        self.running = false;
    }

    /// Advance the timer by the elapsed tick interval
    pub fn clock(&mut self, ms: u32) {
        if self.running {
            self.elapsed_ms = self.elapsed_ms.saturating_add(ms);
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the running timer has reached its timeout
    pub fn has_expired(&self) -> bool {
        self.running && self.timeout_ms > 0 && self.elapsed_ms >= self.timeout_ms
    }
}
