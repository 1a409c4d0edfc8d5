//! Tick timer - the board's single pending step
//!
//! The board never reads a clock. The host feeds elapsed time in and the timer
//! reports when the pending step is due. Scheduling always restarts the full
//! interval, and a fired timer stays disarmed until the step re-arms it.

/// One-shot countdown to the next board step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickTimer {
    interval_ms: u32,
    remaining_ms: Option<u32>,
}

impl TickTimer {
    /// Create a disarmed timer
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            remaining_ms: None,
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Schedule the next step one full interval from now, replacing any pending one
    pub fn arm(&mut self) {
        self.remaining_ms = Some(self.interval_ms);
    }

    /// Drop the pending step
    pub fn cancel(&mut self) {
        self.remaining_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.remaining_ms.is_some()
    }

    /// Time left until the pending step, if any
    pub fn remaining_ms(&self) -> Option<u32> {
        self.remaining_ms
    }

    /// Count `elapsed_ms` down; returns true (and disarms) when the step is due
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        let Some(remaining) = self.remaining_ms else {
            return false;
        };
        let remaining = remaining.saturating_sub(elapsed_ms);
        if remaining == 0 {
            self.remaining_ms = None;
            true
        } else {
            self.remaining_ms = Some(remaining);
            false
        }
    }
}
