//! The terminal's "native" scrollbar: ratatui's built-in `Scrollbar`, and
//! the gutter probe that measures how wide it is.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget},
};

use crate::core::probe::GutterEnvironment;
use crate::ui::theme::Theme;

const PROBE_SIZE: u16 = 100;

pub fn native_scrollbar() -> Scrollbar<'static> {
    Scrollbar::new(ScrollbarOrientation::VerticalRight).style(Theme::gutter_style())
}

/// Draw the native scrollbar for a document scrolled to `first_row`.
pub fn render_native_scrollbar(
    area: Rect,
    buf: &mut Buffer,
    content_rows: usize,
    visible_rows: usize,
    first_row: usize,
) {
    if area.width == 0 || area.height == 0 || content_rows <= visible_rows {
        return;
    }
    let mut state = ScrollbarState::new(content_rows.saturating_sub(visible_rows))
        .position(first_row)
        .viewport_content_length(visible_rows);
    native_scrollbar().render(area, buf, &mut state);
}

/// Render into an off-screen buffer with overflowing content and count the
/// columns the scrollbar drew into.
pub fn measure_scrollbar_width() -> u16 {
    let area = Rect::new(0, 0, PROBE_SIZE, PROBE_SIZE);
    let mut buf = Buffer::empty(area);
    render_native_scrollbar(
        area,
        &mut buf,
        usize::from(PROBE_SIZE) * 2,
        usize::from(PROBE_SIZE),
        0,
    );
    (0..area.width)
        .filter(|&x| (0..area.height).any(|y| buf[(x, y)].symbol() != " "))
        .count() as u16
}

/// Gutter environment backed by the real terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalGutter;

impl GutterEnvironment for TerminalGutter {
    /// Horizontal pixels per column; 1.0 when the terminal doesn't say.
    fn pixel_ratio(&self) -> f64 {
        match crossterm::terminal::window_size() {
            Ok(ws) if ws.columns > 0 && ws.width > 0 => f64::from(ws.width) / f64::from(ws.columns),
            _ => 1.0,
        }
    }

    fn measure_gutter_width(&self) -> u16 {
        measure_scrollbar_width()
    }
}
