//! Deadline timers driven by the caller's clock.
//!
//! Nothing here sleeps or spawns: the owner passes `now` in and asks which
//! timers are due.  That keeps every handle explicitly owned (and trivially
//! cancellable on teardown) and makes timing deterministic in tests.

use std::time::{Duration, Instant};

/// One-shot timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Timer {
    deadline: Option<Instant>,
}

impl Timer {
    /// (Re)arm so the timer fires `delay` after `now`.
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// `true` exactly once when the deadline has passed; disarms itself.
    pub fn fire_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(at) if now >= at => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Trailing-edge debounce: every `touch` pushes the deadline out again.
#[derive(Debug, Clone, Copy)]
pub struct Debounce {
    delay: Duration,
    timer: Timer,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            timer: Timer::default(),
        }
    }

    pub fn touch(&mut self, now: Instant) {
        self.timer.arm(now, self.delay);
    }

    pub fn cancel(&mut self) {
        self.timer.cancel();
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    pub fn fire_due(&mut self, now: Instant) -> bool {
        self.timer.fire_due(now)
    }
}

/// Earliest of a set of optional deadlines.
pub fn earliest(deadlines: impl IntoIterator<Item = Option<Instant>>) -> Option<Instant> {
    deadlines.into_iter().flatten().min()
}
