//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme: change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── document ───────────────────────────────────────────────
    pub fn text_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn selection_style() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    /// Native scrollbar in the (normally covered) gutter.
    pub fn gutter_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    // ── track ──────────────────────────────────────────────────
    pub fn loading_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn hover_button_style() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    /// Opacity of the thumb overlay; stronger while it is held.
    pub fn thumb_alpha(dragging: bool) -> f32 {
        if dragging {
            0.55
        } else {
            0.35
        }
    }

    // ── minimap raster ─────────────────────────────────────────
    pub const RASTER_WORD: [u8; 3] = [0xb4, 0xbe, 0xd2];
    pub const RASTER_PUNCT: [u8; 3] = [0xe0, 0xaf, 0x68];
    pub const RASTER_DIGIT: [u8; 3] = [0x9e, 0xce, 0x6a];

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
