//! Change watcher: debounced content mutations and container resizes.

use std::time::{Duration, Instant};

use crate::core::timer::{earliest, Debounce};

pub const MUTATION_DEBOUNCE: Duration = Duration::from_millis(500);
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(300);

/// What settled during a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WatchEvents {
    pub content_changed: bool,
    pub resized: bool,
}

#[derive(Debug)]
pub struct ChangeWatcher {
    connected: bool,
    mutation: Debounce,
    resize: Debounce,
    observed_size: Option<(u16, u16)>,
    pending_size: Option<(u16, u16)>,
}

impl ChangeWatcher {
    pub fn new(mutation_delay: Duration, resize_delay: Duration) -> Self {
        Self {
            connected: false,
            mutation: Debounce::new(mutation_delay),
            resize: Debounce::new(resize_delay),
            observed_size: None,
            pending_size: None,
        }
    }

    /// Start observing mutations.  Called once the first capture is in, so
    /// the watcher never sees the capture's own side effects.
    pub fn connect(&mut self) {
        self.connected = true;
    }

    pub fn disconnect(&mut self) {
        self.connected = false;
        self.mutation.cancel();
        self.resize.cancel();
        self.pending_size = None;
    }

    /// Remember the size at mount; later resizes are compared against it.
    pub fn observe_initial_size(&mut self, size: (u16, u16)) {
        self.observed_size = Some(size);
    }

    pub fn content_mutated(&mut self, now: Instant) {
        if self.connected {
            self.mutation.touch(now);
        }
    }

    pub fn container_resized(&mut self, size: (u16, u16), now: Instant) {
        self.pending_size = Some(size);
        self.resize.touch(now);
    }

    pub fn poll(&mut self, now: Instant) -> WatchEvents {
        let mut events = WatchEvents::default();
        if self.mutation.fire_due(now) {
            events.content_changed = true;
        }
        if self.resize.fire_due(now) {
            if let Some(size) = self.pending_size.take() {
                if self.observed_size != Some(size) {
                    self.observed_size = Some(size);
                    events.resized = true;
                }
            }
        }
        events
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        earliest([self.mutation.deadline(), self.resize.deadline()])
    }
}
