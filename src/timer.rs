//! Owned timers driven by host-supplied timestamps.
//!
//! The core never reads a clock itself. Hosts pass milliseconds (from `js_sys::Date::now()` in
//! the browser, or a fake clock in tests) so that every timer is deterministic and dies with the
//! struct that owns it.

#[cfg(test)]
#[path = "timer_test.rs"]
mod timer_test;

/// A cancellable one-shot deadline. Arming an armed timer replaces its deadline.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OneShot {
    deadline_ms: Option<f64>,
}

impl OneShot {
    /// Arm the timer to fire `duration_ms` after `now_ms`, cancelling any pending deadline.
    pub fn arm(&mut self, now_ms: f64, duration_ms: f64) {
        self.deadline_ms = Some(now_ms + duration_ms);
    }

    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    /// Whether the timer is armed and has not fired as of `now_ms`.
    ///
    /// Observing an elapsed deadline disarms the timer.
    pub fn is_pending(&mut self, now_ms: f64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms < deadline => true,
            Some(_) => {
                self.deadline_ms = None;
                false
            }
            None => false,
        }
    }

    #[must_use]
    pub fn deadline(&self) -> Option<f64> {
        self.deadline_ms
    }
}

/// Fixed-period tick accumulator for hosts that advance time in arbitrary steps.
#[derive(Debug, Clone, Copy)]
pub struct Ticker {
    period_ms: f64,
    carry_ms: f64,
}

impl Ticker {
    /// `period_ms` must be positive; configuration validation guarantees it.
    #[must_use]
    pub fn new(period_ms: f64) -> Self {
        Self { period_ms, carry_ms: 0.0 }
    }

    #[must_use]
    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    /// Advance by `elapsed_ms` and return how many whole periods completed.
    ///
    /// Non-finite or non-positive steps are ignored. A single step reports at most `u32::MAX`
    /// ticks.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        if !(self.period_ms > 0.0 && elapsed_ms.is_finite() && elapsed_ms > 0.0) {
            return 0;
        }
        let total = self.carry_ms + elapsed_ms;
        let whole = (total / self.period_ms).floor();
        self.carry_ms = total - whole * self.period_ms;
        whole.min(f64::from(u32::MAX)) as u32
    }
}
