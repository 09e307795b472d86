//! Thumb dragging.
//!
//! While a drag is alive the host's text selection is suppressed through a
//! [`SelectionGuard`]; dropping the session (pointer-up, teardown, or the
//! engine itself going away) always restores it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::core::geometry;

/// Host-wide "text selection suppressed" switch.
#[derive(Debug, Clone, Default)]
pub struct SelectionLock {
    suppressed: Arc<AtomicBool>,
}

impl SelectionLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self) -> SelectionGuard {
        self.suppressed.store(true, Ordering::Relaxed);
        SelectionGuard {
            suppressed: Arc::clone(&self.suppressed),
        }
    }

    /// `true` while some interaction holds the lock.
    pub fn is_suppressed(&self) -> bool {
        self.suppressed.load(Ordering::Relaxed)
    }
}

/// Releases the selection lock on drop.
#[derive(Debug)]
pub struct SelectionGuard {
    suppressed: Arc<AtomicBool>,
}

impl Drop for SelectionGuard {
    fn drop(&mut self) {
        self.suppressed.store(false, Ordering::Relaxed);
    }
}

/// Transient state between pointer-down on the thumb and pointer-up.
#[derive(Debug)]
pub struct DragSession {
    /// Pointer distance from the thumb's top edge at grab time.
    pub grab_offset: f64,
    /// Top of the track's content box at grab time.
    pub track_top: f64,
    _guard: SelectionGuard,
}

#[derive(Debug)]
pub struct DragController {
    lock: SelectionLock,
    session: Option<DragSession>,
}

impl DragController {
    pub fn new(lock: SelectionLock) -> Self {
        Self {
            lock,
            session: None,
        }
    }

    /// Released → Grabbed.  A session still open (the release was never
    /// seen) is closed first so its guard cannot undo the new one.
    pub fn begin(&mut self, pointer_y: f64, thumb_top: f64, track_top: f64) {
        self.end();
        self.session = Some(DragSession {
            grab_offset: pointer_y - thumb_top,
            track_top,
            _guard: self.lock.acquire(),
        });
    }

    /// Raw track offset for the pointer, while grabbed.
    pub fn target(&self, pointer_y: f64) -> Option<f64> {
        self.session
            .as_ref()
            .map(|s| geometry::drag_offset(pointer_y, s.track_top, s.grab_offset))
    }

    /// Grabbed → Released.  Returns whether a drag was active.
    pub fn end(&mut self) -> bool {
        self.session.take().is_some()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }
}
