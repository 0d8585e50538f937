//! Time-slice budgets for scheduling ticks.
//!
//! A tick keeps performing units of work while its [`Deadline`] reports
//! budget above the engine's yield floor. The deadline is supplied by the
//! caller, so the same engine runs against wall-clock slices in production,
//! an unbounded budget for run-to-completion flushes, and a deterministic
//! countdown in tests.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Budget source for one scheduling tick.
pub trait Deadline {
    /// Time remaining in the current slice.
    fn time_remaining(&self) -> Duration;
}

/// Wall-clock slice that expires a fixed duration after creation.
#[derive(Debug, Clone, Copy)]
pub struct TimeSlice {
    /// `None` when the requested budget overflows the clock; such a slice
    /// never expires.
    end: Option<Instant>,
}

impl TimeSlice {
    /// Start a slice with the given budget, measured from now.
    pub fn new(budget: Duration) -> Self {
        Self {
            end: Instant::now().checked_add(budget),
        }
    }
}

impl Deadline for TimeSlice {
    fn time_remaining(&self) -> Duration {
        match self.end {
            Some(end) => end.saturating_duration_since(Instant::now()),
            None => Duration::MAX,
        }
    }
}

/// A slice that never expires; ticks run to completion.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unbounded;

impl Deadline for Unbounded {
    fn time_remaining(&self) -> Duration {
        Duration::MAX
    }
}

/// Deterministic budget that pays out a fixed number of checks.
///
/// Each budget check spends one unit; once they run out the deadline reports
/// an exhausted slice. This makes "interrupt after exactly N units of work"
/// reproducible in tests, with no wall clock involved.
#[derive(Debug)]
pub struct Countdown {
    remaining: Cell<usize>,
}

impl Countdown {
    /// A budget worth `checks` deadline checks.
    pub const fn new(checks: usize) -> Self {
        Self {
            remaining: Cell::new(checks),
        }
    }
}

impl Deadline for Countdown {
    fn time_remaining(&self) -> Duration {
        let remaining = self.remaining.get();
        if remaining == 0 {
            return Duration::ZERO;
        }
        self.remaining.set(remaining - 1);
        Duration::MAX
    }
}
