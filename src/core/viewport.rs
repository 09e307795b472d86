//! The native scroll container.
//!
//! The scrollbar never owns the scroll position: it reads it through
//! [`ScrollViewport::metrics`] and writes it through
//! [`ScrollViewport::set_scroll_top`], which clamps silently like a real
//! scroll container does.

use super::geometry::ViewportMetrics;

pub trait ScrollViewport {
    fn metrics(&self) -> ViewportMetrics;
    fn set_scroll_top(&mut self, top: f64);
}

/// Row-based viewport over a document.
#[derive(Debug, Clone, Default)]
pub struct DocumentViewport {
    scroll_top: f64,
    content_rows: usize,
    visible_rows: usize,
}

impl DocumentViewport {
    pub fn new(content_rows: usize, visible_rows: usize) -> Self {
        Self {
            scroll_top: 0.0,
            content_rows,
            visible_rows,
        }
    }

    /// First visible row.
    pub fn first_row(&self) -> usize {
        self.scroll_top.round() as usize
    }

    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    pub fn content_rows(&self) -> usize {
        self.content_rows
    }

    pub fn max_scroll(&self) -> f64 {
        self.content_rows.saturating_sub(self.visible_rows) as f64
    }

    /// Content or window size changed; keeps the offset valid.
    pub fn resize(&mut self, content_rows: usize, visible_rows: usize) {
        self.content_rows = content_rows;
        self.visible_rows = visible_rows;
        self.scroll_top = self.scroll_top.clamp(0.0, self.max_scroll());
    }

    pub fn scroll_by(&mut self, rows: f64) {
        self.set_scroll_top(self.scroll_top + rows);
    }
}

impl ScrollViewport for DocumentViewport {
    fn metrics(&self) -> ViewportMetrics {
        // A short document still fills the viewport.
        let client = self.visible_rows as f64;
        let content = (self.content_rows as f64).max(client);
        ViewportMetrics::new(self.scroll_top, content, client)
    }

    fn set_scroll_top(&mut self, top: f64) {
        let top = if top.is_finite() { top } else { 0.0 };
        self.scroll_top = top.clamp(0.0, self.max_scroll());
    }
}
