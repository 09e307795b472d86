//! Scroll → visuals synchronisation, coalesced to one update per frame.

use crate::core::geometry::{ThumbGeometry, ViewportMetrics};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPhase {
    #[default]
    Idle,
    FramePending,
}

/// Two-state frame scheduler for scroll syncs.
#[derive(Debug, Default)]
pub struct ScrollSync {
    phase: SyncPhase,
}

impl ScrollSync {
    /// A scroll happened.  Returns `true` if this scheduled a new frame,
    /// `false` if it coalesced into the already pending one.
    pub fn request(&mut self) -> bool {
        match self.phase {
            SyncPhase::FramePending => false,
            SyncPhase::Idle => {
                self.phase = SyncPhase::FramePending;
                true
            }
        }
    }

    /// Frame callback: `true` when a sync should run now.
    pub fn take_frame(&mut self) -> bool {
        std::mem::take(&mut self.phase) == SyncPhase::FramePending
    }

    pub fn cancel(&mut self) {
        self.phase = SyncPhase::Idle;
    }
}

/// Payload of the update callback, one per applied frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollUpdate {
    /// Scroll position as a fraction in `0..=1`.
    pub top: f64,
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl From<ViewportMetrics> for ScrollUpdate {
    fn from(m: ViewportMetrics) -> Self {
        Self {
            top: m.scroll_fraction(),
            scroll_top: m.scroll_top,
            scroll_height: m.scroll_height,
            client_height: m.client_height,
        }
    }
}

/// Visual state produced by the last applied frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transforms {
    pub thumb: ThumbGeometry,
    /// Upward translation of the thumbnail inside the track.
    pub image_offset: f64,
}
