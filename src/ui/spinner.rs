//! Capture indicator: a small spinner + label rendered at the right end
//! of the status bar while a thumbnail capture is in flight.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Braille-dot spinner frames.  Cycles through these on each tick.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct LoadingIndicator<'a> {
    pub visible: bool,
    /// Frame counter (drives the spinner frame).
    pub tick: u64,
    pub label: &'a str,
}

impl Widget for LoadingIndicator<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.visible || area.height == 0 {
            return;
        }

        let frame = SPINNER_FRAMES[(self.tick as usize) % SPINNER_FRAMES.len()];
        let label = format!(" {frame} {} ", self.label);
        let label_width = label.chars().count() as u16;
        if area.width < label_width {
            return;
        }
        let x = area.x + area.width - label_width;

        let line = Line::from(Span::styled(
            label,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
        buf.set_line(x, area.y, &line, label_width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_aligned_and_animated() {
        let area = Rect::new(0, 0, 20, 1);
        let mut buf = Buffer::empty(area);
        LoadingIndicator {
            visible: true,
            tick: 1,
            label: "capturing",
        }
        .render(area, &mut buf);
        let text: String = (0..20).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert_eq!(text, format!("{}⠙ capturing ", " ".repeat(8)));
    }

    #[test]
    fn hidden_draws_nothing() {
        let area = Rect::new(0, 0, 20, 1);
        let mut buf = Buffer::empty(area);
        LoadingIndicator {
            visible: false,
            tick: 0,
            label: "capturing",
        }
        .render(area, &mut buf);
        assert_eq!(buf, Buffer::empty(area));
    }
}
