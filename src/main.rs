//! A terminal document viewer with a minimap scrollbar.
//!
//! The track on the right shows a thumbnail of the whole document with a
//! draggable thumb over the visible part.  Run with a file path to view it,
//! or without one for a generated demo document.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    widgets::{Clear, Paragraph},
    Frame, Terminal,
};

use crate::app::{
    capture::{spawn_capture, CaptureUpdate},
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};
use crate::config::AppConfig;
use crate::core::document::Document;
use crate::core::probe::ScrollbarWidthProbe;
use crate::core::thumbnail::{image_height, Rasterizer};
use crate::core::trigger::RefreshTrigger;
use crate::core::visibility::Visibility;
use crate::ui::{
    document_view::DocumentView,
    native::{render_native_scrollbar, TerminalGutter},
    raster::TextRasterizer,
    spinner::LoadingIndicator,
    theme::Theme,
    track::{HoverButton, TrackWidget},
};

/// Frame interval: scroll syncs and wheel writes land at most this often.
const FRAME: Duration = Duration::from_millis(16);

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Document viewer with a minimap scrollbar")]
struct Cli {
    /// File to view (a demo document when omitted).
    path: Option<PathBuf>,

    /// Track width in columns.
    #[arg(long)]
    track_width: Option<u16>,

    /// When to capture the thumbnail: `always`, `flag` or `delay:<ms>`.
    #[arg(long)]
    trigger: Option<RefreshTrigger>,

    /// Hide the track until hovered.
    #[arg(long)]
    auto_hide: bool,

    /// Size the document pane to its content (capped by `auto_height_max`).
    #[arg(long)]
    auto_height: bool,

    /// Label of a hover button that reveals the hidden track.
    #[arg(long)]
    hover_button: Option<String>,

    /// Render the thumbnail to a PNG and exit.
    #[arg(long, value_name = "PNG")]
    dump_thumbnail: Option<PathBuf>,

    /// Write the effective configuration to the config file and exit.
    #[arg(long)]
    save_config: bool,
}

impl Cli {
    fn apply(&self, cfg: &mut AppConfig) {
        if let Some(w) = self.track_width {
            cfg.track_width = w.max(1);
        }
        if let Some(t) = self.trigger {
            cfg.trigger = t;
        }
        if self.auto_hide {
            cfg.auto_hide = true;
        }
        if self.auto_height {
            cfg.auto_height = true;
        }
        if let Some(label) = &self.hover_button {
            cfg.hover_button = Some(label.clone());
        }
    }
}

fn demo_document() -> Document {
    let mut text = String::new();
    for section in 1..=12 {
        text.push_str(&format!("// ── section {section} ──────────────────────────\n\n"));
        for item in 0..(8 + section * 3) {
            let indent = "    ".repeat(item % 3);
            text.push_str(&format!(
                "{indent}let value_{section}_{item} = compute({item}, \"{}\");\n",
                "#".repeat((section * 7 + item * 5) % 48)
            ));
        }
        text.push('\n');
    }
    Document::from_text(&text)
}

/// Rasterize the document, scale it to the track width and save it.
fn dump_thumbnail(document: &Document, config: &AppConfig, out: &Path) -> Result<()> {
    let snapshot = document.snapshot().context("document is empty")?;
    let raster = TextRasterizer::with_max_columns(config.thumbnail_columns).rasterize(&snapshot)?;
    let track_width = config.track_width;
    let height = image_height(raster.pixel_width, raster.pixel_height, f64::from(track_width));
    let img = raster.into_image();
    let scaled = image::imageops::resize(
        img.as_ref(),
        u32::from(track_width),
        height.round().max(1.0) as u32,
        image::imageops::FilterType::Triangle,
    );
    scaled
        .save(out)
        .with_context(|| format!("writing {}", out.display()))?;
    println!("{}x{} → {}", scaled.width(), scaled.height(), out.display());
    Ok(())
}

// ───────────────────────────────────────── draw ──────────────

fn draw(frame: &mut Frame, state: &mut AppState) {
    handler::relayout(state, frame.area());
    let layout = state.layout;

    frame.render_widget(
        DocumentView {
            lines: state.document.lines(),
            first_row: state.viewport.first_row(),
            selection: state.selection,
        },
        layout.document_area,
    );
    render_native_scrollbar(
        layout.gutter_area,
        frame.buffer_mut(),
        state.viewport.content_rows(),
        state.viewport.visible_rows(),
        state.viewport.first_row(),
    );

    frame.render_widget(Clear, layout.track_area);
    if state.engine.visibility() == Visibility::Shown {
        let thumbnail = state
            .scaled_thumbnail
            .update(state.engine.thumbnail(), u32::from(state.config.track_width));
        frame.render_widget(
            TrackWidget {
                thumbnail,
                loading: state.engine.thumbnail().loading,
                loading_text: &state.config.loading_text,
                transforms: state.engine.transforms(),
                track_color: state.config.track_color.0,
                thumb_color: state.config.thumb_color.0,
                border: state.config.track_border,
                dragging: state.engine.is_dragging(),
            },
            layout.track_area,
        );
    }
    if let (Some(area), Some(label)) = (layout.hover_button, state.config.hover_button.as_deref()) {
        frame.render_widget(HoverButton { label }, area);
    }

    let position = state
        .last_update
        .get()
        .map(|u| format!(" {:>3.0}% ", u.top * 100.0))
        .unwrap_or_default();
    let status = match &state.status_message {
        Some(msg) => format!("{position}{msg}"),
        None => format!("{position}{}", state.config.status_bar_hint()),
    };
    frame.render_widget(
        Paragraph::new(status).style(Theme::status_bar_style()),
        layout.status_area,
    );
    frame.render_widget(
        LoadingIndicator {
            visible: state.is_capturing(),
            tick: state.tick,
            label: "capturing",
        },
        layout.status_area,
    );
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    let (mut user_config, errors) = AppConfig::load();
    for e in &errors {
        tracing::warn!("config: {e}");
    }
    cli.apply(&mut user_config);

    if cli.save_config {
        user_config.save()?;
        return Ok(());
    }

    let document = match &cli.path {
        Some(path) => {
            Document::load(path).with_context(|| format!("reading {}", path.display()))?
        }
        None => demo_document(),
    };

    if let Some(out) = &cli.dump_thumbnail {
        return dump_thumbnail(&document, &user_config, out);
    }

    let mut state = AppState::new(cli.path.clone(), document, user_config);
    let mut probe = ScrollbarWidthProbe::new(TerminalGutter);
    state.gutter_width = probe.width();

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    // ── async channels ────────────────────────────────────────
    let mut events = spawn_event_reader(FRAME);
    let (capture_tx, mut capture_rx) = tokio::sync::mpsc::unbounded_channel::<CaptureUpdate>();
    let rasterizer = Arc::new(TextRasterizer::with_max_columns(state.config.thumbnail_columns));

    let size = terminal.size()?;
    state.engine.mount((size.width, size.height), Instant::now());

    // ── event loop ────────────────────────────────────────────
    loop {
        terminal.draw(|frame| draw(frame, &mut state))?;

        if let Some(epoch) = state.engine.take_capture_request() {
            spawn_capture(
                capture_tx.clone(),
                epoch,
                state.document.snapshot(),
                Arc::clone(&rasterizer),
            );
        }

        let deadline = state.engine.next_deadline();
        let wake = deadline
            .map(tokio::time::Instant::from_std)
            .unwrap_or_else(tokio::time::Instant::now);

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                let now = Instant::now();
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k, now),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m, now),
                    AppEvent::Resize(w, h) => {
                        if let Some(width) = probe.refresh() {
                            state.gutter_width = width;
                        }
                        handler::handle_resize(&mut state, w, h, now);
                    }
                    AppEvent::Tick => {
                        state.tick = state.tick.wrapping_add(1);
                        state.engine.on_frame(&mut state.viewport);
                    }
                }
            }

            Some(update) = capture_rx.recv() => {
                state.engine.finish_capture(update.epoch, update.result);
            }

            _ = tokio::time::sleep_until(wake), if deadline.is_some() => {}
        }

        state.engine.poll_timers(Instant::now());

        if state.should_quit {
            break;
        }
    }

    state.engine.teardown();

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
