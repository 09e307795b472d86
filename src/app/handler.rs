//! Input handling: maps key/mouse events to document, viewport and
//! scrollbar engine calls.

use std::time::Instant;

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::config::Action;
use crate::core::document::Document;
use crate::core::viewport::ScrollViewport;
use crate::core::visibility::HoverRegion;
use crate::ui::layout::{row_to_pixel, AppLayout};

use super::state::AppState;

/// Recompute the layout for the terminal `area` and push the new geometry
/// into the viewport and the engine.
pub fn relayout(state: &mut AppState, area: Rect) {
    let layout = AppLayout::from_area(area, state.layout_options());
    state.layout = layout;

    let before = (state.viewport.content_rows(), state.viewport.visible_rows());
    let after = (state.document.len(), usize::from(layout.document_area.height));
    if before != after {
        state.viewport.resize(after.0, after.1);
        state.engine.handle_scroll();
    }
    state
        .engine
        .set_track_layout(layout.track_layout(state.config.track_border));
}

pub fn handle_resize(state: &mut AppState, width: u16, height: u16, now: Instant) {
    state.engine.container_resized((width, height), now);
}

// ── keys ────────────────────────────────────────────────────────

pub fn handle_key(state: &mut AppState, key: KeyEvent, now: Instant) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };
    let page = state.viewport.visible_rows().max(1) as f64;
    let revision = state.document.revision();
    match action {
        Action::ScrollUp => scroll_by(state, -1.0),
        Action::ScrollDown => scroll_by(state, 1.0),
        Action::PageUp => scroll_by(state, -page),
        Action::PageDown => scroll_by(state, page),
        Action::Top => scroll_to(state, 0.0),
        Action::Bottom => {
            let end = state.viewport.max_scroll();
            scroll_to(state, end);
        }
        Action::ToggleFlag => {
            state.trigger_flag = !state.trigger_flag;
            state.engine.set_trigger_flag(state.trigger_flag, now);
        }
        Action::AppendLine => {
            let n = state.document.len() + 1;
            state
                .document
                .push_line(format!("{n:>5} │ appended at runtime ({})", "·".repeat(n % 40)));
        }
        Action::PopLine => {
            state.document.pop_line();
        }
        Action::Reload => reload(state),
        Action::Quit => state.should_quit = true,
    }
    if state.document.revision() != revision {
        content_mutated(state, now);
    }
}

fn scroll_by(state: &mut AppState, rows: f64) {
    state.viewport.scroll_by(rows);
    state.engine.handle_scroll();
}

fn scroll_to(state: &mut AppState, top: f64) {
    state.viewport.set_scroll_top(top);
    state.engine.handle_scroll();
}

fn reload(state: &mut AppState) {
    let Some(path) = state.path.clone() else {
        state.status_message = Some("nothing to reload".into());
        return;
    };
    match Document::load(&path) {
        Ok(doc) => {
            state.document.replace(doc);
            state.status_message = Some(format!("reloaded {}", path.display()));
        }
        Err(e) => {
            tracing::warn!("reload {}: {e}", path.display());
            state.status_message = Some(format!("reload failed: {e}"));
        }
    }
}

fn content_mutated(state: &mut AppState, now: Instant) {
    let len = state.document.len();
    state.viewport.resize(len, state.viewport.visible_rows());
    if let Some((a, b)) = state.selection {
        if a.max(b) >= len {
            state.selection = None;
        }
    }
    state.engine.content_changed(now);
    state.engine.handle_scroll();
}

// ── mouse ───────────────────────────────────────────────────────

pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent, now: Instant) {
    let (col, row) = (mouse.column, mouse.row);
    update_hover(state, col, row, now);
    let layout = state.layout;
    let pointer_y = row_to_pixel(row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if layout.in_track(col, row)
                && state
                    .engine
                    .pointer_down(pointer_y, &mut state.viewport)
                    .is_consumed()
            {
                return;
            }
            if layout.in_document(col, row) && !state.selection_lock.is_suppressed() {
                let doc_row = document_row(state, row);
                state.selection = (doc_row < state.document.len()).then_some((doc_row, doc_row));
                state.selecting = state.selection.is_some();
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            // The thumb keeps following the pointer even outside the track.
            if state
                .engine
                .pointer_move(pointer_y, &mut state.viewport)
                .is_consumed()
            {
                return;
            }
            if state.selecting && !state.selection_lock.is_suppressed() {
                let last = state.document.len().saturating_sub(1);
                let doc_row = document_row(state, row).min(last);
                if let Some((anchor, _)) = state.selection {
                    state.selection = Some((anchor, doc_row));
                }
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            state.engine.pointer_up();
            state.selecting = false;
        }
        MouseEventKind::ScrollUp => wheel(state, col, row, -state.config.wheel_step),
        MouseEventKind::ScrollDown => wheel(state, col, row, state.config.wheel_step),
        _ => {}
    }
}

/// Wheel over the track goes to the engine; anywhere else (or when the
/// engine declines it) the document scrolls natively.
fn wheel(state: &mut AppState, col: u16, row: u16, delta: f64) {
    if state.layout.in_track(col, row) && state.engine.wheel(delta).is_consumed() {
        return;
    }
    scroll_by(state, delta);
}

fn update_hover(state: &mut AppState, col: u16, row: u16, now: Instant) {
    let region = if state.layout.in_track(col, row) {
        Some(HoverRegion::Track)
    } else if state.layout.in_hover_button(col, row) {
        Some(HoverRegion::Trigger)
    } else {
        None
    };
    if region == state.hover {
        return;
    }
    if let Some(old) = state.hover {
        state.engine.pointer_leave(old, now);
    }
    if let Some(new) = region {
        state.engine.pointer_enter(new);
    }
    state.hover = region;
}

fn document_row(state: &AppState, row: u16) -> usize {
    state.viewport.first_row() + usize::from(row.saturating_sub(state.layout.document_area.y))
}
