//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

use crate::app::engine::TrackLayout;
use crate::config::HoverPlacement;
use crate::core::geometry::BoxMetrics;

/// Track pixels per terminal row (`▀` half-blocks).
pub const PIXELS_PER_ROW: f64 = 2.0;

/// Width of the hover-reveal button in columns.
const HOVER_BUTTON_WIDTH: u16 = 3;

/// Document pane on the left, scrollbar track on the right, status bar at
/// the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub document_area: Rect,
    /// Where the native scrollbar lives; tucked under the track.
    pub gutter_area: Rect,
    pub track_area: Rect,
    pub status_area: Rect,
    pub hover_button: Option<Rect>,
}

#[derive(Debug, Clone, Copy)]
pub struct LayoutOptions {
    /// Track content width in columns.
    pub track_width: u16,
    pub track_border: bool,
    pub gutter_width: u16,
    pub hover_button: Option<HoverPlacement>,
    /// Fixed pane height in rows (auto-height mode); `None` fills the area.
    pub pane_rows: Option<u16>,
}

impl AppLayout {
    pub fn from_area(area: Rect, opts: LayoutOptions) -> Self {
        let constraints = match opts.pane_rows {
            // The trailing filler soaks up the rows the pane does not need.
            Some(rows) => vec![
                Constraint::Length(rows.clamp(1, area.height.saturating_sub(1).max(1))),
                Constraint::Length(1),
                Constraint::Min(0),
            ],
            None => vec![
                Constraint::Min(1),    // document + track
                Constraint::Length(1), // status bar
            ],
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let border = if opts.track_border { 2 } else { 0 };
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(opts.track_width.saturating_add(border)),
            ])
            .split(chunks[0]);
        let (document_area, track_area) = (columns[0], columns[1]);

        let gutter_area = Rect {
            width: opts.gutter_width.min(track_area.width),
            ..track_area
        };

        let hover_button = opts.hover_button.and_then(|placement| {
            if document_area.width < HOVER_BUTTON_WIDTH || document_area.height == 0 {
                return None;
            }
            let y = match placement {
                HoverPlacement::Top => document_area.y,
                HoverPlacement::Bottom => document_area.bottom() - 1,
            };
            Some(Rect::new(
                document_area.right() - HOVER_BUTTON_WIDTH,
                y,
                HOVER_BUTTON_WIDTH,
                1,
            ))
        });

        Self {
            document_area,
            gutter_area,
            track_area,
            status_area: chunks[1],
            hover_button,
        }
    }

    /// The track in track pixels, as the scrollbar engine sees it.
    pub fn track_layout(&self, track_border: bool) -> TrackLayout {
        let border = if track_border { PIXELS_PER_ROW } else { 0.0 };
        TrackLayout {
            track_top: f64::from(self.track_area.y) * PIXELS_PER_ROW,
            track: BoxMetrics {
                height: f64::from(self.track_area.height) * PIXELS_PER_ROW,
                border_top: border,
                border_bottom: border,
                ..BoxMetrics::default()
            },
        }
    }

    pub fn in_track(&self, column: u16, row: u16) -> bool {
        self.track_area.contains(Position::new(column, row))
    }

    pub fn in_document(&self, column: u16, row: u16) -> bool {
        self.document_area.contains(Position::new(column, row))
    }

    pub fn in_hover_button(&self, column: u16, row: u16) -> bool {
        self.hover_button
            .is_some_and(|r| r.contains(Position::new(column, row)))
    }
}

/// Centre of a terminal row in track pixels.
pub fn row_to_pixel(row: u16) -> f64 {
    f64::from(row) * PIXELS_PER_ROW + PIXELS_PER_ROW / 2.0
}
