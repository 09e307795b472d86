//! Most recent thumbnail plus the bookkeeping for in-flight captures.
//!
//! Captures can overlap (a resize and a content change in quick
//! succession).  Each capture gets a monotonically increasing epoch and only
//! the result of the newest one is applied; older results are dropped so a
//! slow stale capture can't overwrite a newer thumbnail or flip `loading`
//! off while the newest capture is still running.

use crate::core::thumbnail::{CaptureError, Raster, ThumbnailState};

#[derive(Debug)]
pub struct ThumbnailCache {
    state: ThumbnailState,
    epoch: u64,
    completed: u64,
}

impl ThumbnailCache {
    pub fn new(initial: ThumbnailState) -> Self {
        Self {
            state: initial,
            epoch: 0,
            completed: 0,
        }
    }

    pub fn state(&self) -> &ThumbnailState {
        &self.state
    }

    /// Mark a capture as started and return its epoch.
    pub fn begin(&mut self) -> u64 {
        self.epoch = self.epoch.wrapping_add(1);
        self.state.loading = true;
        self.epoch
    }

    /// Apply a capture result.  `None` when the result was stale and
    /// ignored, otherwise whether a thumbnail is now available.
    pub fn finish(
        &mut self,
        epoch: u64,
        result: Result<Raster, CaptureError>,
        track_width: f64,
    ) -> Option<bool> {
        if epoch != self.epoch {
            tracing::debug!(
                "thumbnail: dropping stale capture epoch={epoch} current={}",
                self.epoch
            );
            return None;
        }
        self.completed += 1;
        self.state = match result {
            Ok(raster) => {
                let image_height = raster.scaled_height(track_width);
                tracing::debug!(
                    "thumbnail: captured {}x{} → height {image_height:.1}",
                    raster.pixel_width,
                    raster.pixel_height
                );
                ThumbnailState {
                    loading: false,
                    image: Some(raster.into_image()),
                    image_height,
                }
            }
            Err(e) => {
                tracing::debug!("thumbnail: capture failed: {e}");
                ThumbnailState::idle()
            }
        };
        Some(self.state.has_image())
    }

    /// At least one capture has been applied.
    pub fn has_completed_once(&self) -> bool {
        self.completed > 0
    }
}
