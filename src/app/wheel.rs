//! Wheel input over the track.
//!
//! Deltas are added to a running target offset as soon as they arrive; only
//! the write to the viewport is rate-limited to one per frame.  A burst of
//! events inside one frame therefore lands as a single write of the summed
//! offset, and nothing is lost across frames.
//!
//! The target is `base + delta`: `base` is the last offset known to be live
//! and `delta` the wheel input since then.  Reseeding moves the base but
//! keeps the delta, so a scroll from elsewhere in the same frame is built
//! upon rather than overwritten.

#[derive(Debug, Default)]
pub struct WheelAccumulator {
    base: f64,
    delta: f64,
    frame_pending: bool,
}

impl WheelAccumulator {
    pub fn push(&mut self, delta: f64) {
        if delta.is_finite() {
            self.delta += delta;
        }
        // A pending frame is replaced, never queued behind another one.
        self.frame_pending = true;
    }

    /// Offset to write on this frame, if any wheel input is pending.
    pub fn take_write(&mut self) -> Option<f64> {
        std::mem::take(&mut self.frame_pending).then_some(self.base + self.delta)
    }

    /// Record what the viewport actually accepted after clamping.
    pub fn settle(&mut self, applied: f64) {
        self.base = applied;
        self.delta = 0.0;
    }

    /// Follow the live scroll position after non-wheel scrolls.  Wheel input
    /// not yet written stays on top of the new position.
    pub fn reseed(&mut self, scroll_top: f64) {
        self.base = scroll_top;
    }

    pub fn cancel(&mut self) {
        self.frame_pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.frame_pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn burst_collapses_to_single_write() {
        let mut w = WheelAccumulator::default();
        w.reseed(10.0);
        w.push(3.0);
        w.push(3.0);
        w.push(-1.0);
        assert_eq!(w.take_write(), Some(15.0));
        assert_eq!(w.take_write(), None);
    }

    #[test]
    fn reseed_keeps_unwritten_deltas() {
        let mut w = WheelAccumulator::default();
        w.push(3.0);
        w.reseed(600.0);
        w.push(2.0);
        assert_eq!(w.take_write(), Some(605.0));
        w.settle(605.0);
        w.reseed(40.0);
        w.push(1.0);
        assert_eq!(w.take_write(), Some(41.0));
    }

    #[test]
    fn cancel_keeps_the_sum() {
        let mut w = WheelAccumulator::default();
        w.push(4.0);
        w.cancel();
        assert_eq!(w.take_write(), None);
        w.push(1.0);
        assert_eq!(w.take_write(), Some(5.0));
    }

    proptest! {
        #[test]
        fn sum_over_frames_matches_sum_of_deltas(
            frames in proptest::collection::vec(
                proptest::collection::vec(-20.0f64..20.0, 0..8),
                1..30,
            ),
        ) {
            // Unbounded viewport: no clamping, so the final offset is the plain sum.
            let mut w = WheelAccumulator::default();
            let mut scroll_top = 0.0;
            let mut total = 0.0;
            for frame in &frames {
                for &d in frame {
                    w.push(d);
                    total += d;
                }
                if let Some(target) = w.take_write() {
                    scroll_top = target;
                    w.settle(scroll_top);
                }
            }
            prop_assert!((scroll_top - total).abs() < 1e-9);
        }
    }
}
