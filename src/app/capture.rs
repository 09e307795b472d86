//! Background thumbnail captures so rasterizing never stalls the UI thread.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;

use crate::core::document::DocumentSnapshot;
use crate::core::thumbnail::{CaptureError, Raster, Rasterizer};

pub struct CaptureUpdate {
    pub epoch: u64,
    pub result: Result<Raster, CaptureError>,
}

/// Rasterize `content` off-thread and report back tagged with `epoch`.
/// A `None` snapshot reports [`CaptureError::NoContent`] right away.
pub fn spawn_capture<R>(
    tx: mpsc::UnboundedSender<CaptureUpdate>,
    epoch: u64,
    content: Option<DocumentSnapshot>,
    rasterizer: Arc<R>,
) where
    R: Rasterizer<DocumentSnapshot> + 'static,
{
    let Some(content) = content else {
        let _ = tx.send(CaptureUpdate {
            epoch,
            result: Err(CaptureError::NoContent),
        });
        return;
    };
    std::thread::spawn(move || {
        let start = Instant::now();
        let result = rasterizer.rasterize(&content);
        tracing::debug!(
            "capture epoch={epoch}: {} lines in {:.2?}",
            content.len(),
            start.elapsed()
        );
        let _ = tx.send(CaptureUpdate { epoch, result });
    });
}
