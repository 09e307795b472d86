//! The scrollable document pane.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::ui::theme::Theme;

/// Renders the rows of the document starting at `first_row`, highlighting
/// the selected line range.
pub struct DocumentView<'a> {
    pub lines: &'a [String],
    pub first_row: usize,
    /// Inclusive range of selected document rows.
    pub selection: Option<(usize, usize)>,
}

impl Widget for DocumentView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let rows: Vec<Line> = self
            .lines
            .iter()
            .enumerate()
            .skip(self.first_row)
            .take(usize::from(area.height))
            .map(|(idx, text)| {
                let selected = self
                    .selection
                    .is_some_and(|(a, b)| (a.min(b)..=a.max(b)).contains(&idx));
                let style = if selected {
                    Theme::selection_style()
                } else {
                    Theme::text_style()
                };
                Line::from(Span::styled(text.as_str(), style))
            })
            .collect();
        Paragraph::new(rows).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_from_first_row() {
        let lines: Vec<String> = (0..10).map(|i| format!("line {i}")).collect();
        let area = Rect::new(0, 0, 10, 3);
        let mut buf = Buffer::empty(area);
        DocumentView {
            lines: &lines,
            first_row: 4,
            selection: Some((5, 5)),
        }
        .render(area, &mut buf);

        let row = |y: u16| -> String {
            (0..10).map(|x| buf[(x, y)].symbol().to_string()).collect()
        };
        assert_eq!(row(0).trim_end(), "line 4");
        assert_eq!(row(2).trim_end(), "line 6");
        assert_eq!(buf[(0, 1)].bg, Theme::selection_style().bg.unwrap_or_default());
    }
}
