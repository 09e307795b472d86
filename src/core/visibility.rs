//! Auto-hide for the track.
//!
//! The track is revealed while the pointer is over it or over the external
//! hover button, and hidden again a short while after the pointer leaves
//! both.  Each region has its own hide timer.

use std::time::{Duration, Instant};

use super::timer::{earliest, Timer};

pub const DEFAULT_HIDE_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Shown,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverRegion {
    Track,
    Trigger,
}

#[derive(Debug, Clone)]
pub struct VisibilityController {
    auto_hide: bool,
    hide_delay: Duration,
    state: Visibility,
    track_timer: Timer,
    trigger_timer: Timer,
}

impl VisibilityController {
    /// With `auto_hide` off the track is permanently shown.
    pub fn new(auto_hide: bool, hide_delay: Duration) -> Self {
        Self {
            auto_hide,
            hide_delay,
            state: if auto_hide {
                Visibility::Hidden
            } else {
                Visibility::Shown
            },
            track_timer: Timer::default(),
            trigger_timer: Timer::default(),
        }
    }

    pub fn state(&self) -> Visibility {
        self.state
    }

    pub fn is_shown(&self) -> bool {
        self.state == Visibility::Shown
    }

    pub fn enter(&mut self, _region: HoverRegion) {
        if !self.auto_hide {
            return;
        }
        self.track_timer.cancel();
        self.trigger_timer.cancel();
        self.state = Visibility::Shown;
    }

    pub fn leave(&mut self, region: HoverRegion, now: Instant) {
        if !self.auto_hide {
            return;
        }
        let delay = self.hide_delay;
        self.timer_mut(region).arm(now, delay);
    }

    /// Apply due hide timers.  Returns `true` when the state changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let fired_track = self.track_timer.fire_due(now);
        let fired_trigger = self.trigger_timer.fire_due(now);
        if (fired_track || fired_trigger) && self.state == Visibility::Shown {
            self.state = Visibility::Hidden;
            return true;
        }
        false
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        earliest([self.track_timer.deadline(), self.trigger_timer.deadline()])
    }

    pub fn teardown(&mut self) {
        self.track_timer.cancel();
        self.trigger_timer.cancel();
    }

    fn timer_mut(&mut self, region: HoverRegion) -> &mut Timer {
        match region {
            HoverRegion::Track => &mut self.track_timer,
            HoverRegion::Trigger => &mut self.trigger_timer,
        }
    }
}
