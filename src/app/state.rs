//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be plain
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use ratatui::layout::Rect;

use crate::app::drag::SelectionLock;
use crate::app::engine::ScrollbarEngine;
use crate::app::sync::ScrollUpdate;
use crate::config::AppConfig;
use crate::core::document::Document;
use crate::core::viewport::DocumentViewport;
use crate::core::visibility::HoverRegion;
use crate::ui::layout::{AppLayout, LayoutOptions};
use crate::ui::track::ScaledThumbnail;

pub struct AppState {
    /// File the document was loaded from, if any.
    pub path: Option<PathBuf>,
    pub document: Document,
    /// The native scroll container over `document`.
    pub viewport: DocumentViewport,
    pub engine: ScrollbarEngine,
    pub config: AppConfig,
    /// Layout from the most recent draw; mouse hit-testing uses it.
    pub layout: AppLayout,
    /// Width of the native scrollbar, as measured by the gutter probe.
    pub gutter_width: u16,
    pub selection_lock: SelectionLock,
    /// Inclusive range of selected document rows.
    pub selection: Option<(usize, usize)>,
    /// A document selection drag is in progress.
    pub selecting: bool,
    pub hover: Option<HoverRegion>,
    /// Host-side flag driving `RefreshTrigger::OnFlag`.
    pub trigger_flag: bool,
    /// Latest `on_loading` report.
    pub loading: Rc<Cell<bool>>,
    /// Latest `on_update` payload.
    pub last_update: Rc<Cell<Option<ScrollUpdate>>>,
    pub scaled_thumbnail: ScaledThumbnail,
    pub status_message: Option<String>,
    pub should_quit: bool,
    /// Frame counter (drives the spinner).
    pub tick: u64,
}

impl AppState {
    pub fn new(path: Option<PathBuf>, document: Document, config: AppConfig) -> Self {
        let selection_lock = SelectionLock::new();
        let loading = Rc::new(Cell::new(false));
        let last_update = Rc::new(Cell::new(None));

        let on_loading = Rc::clone(&loading);
        let on_update = Rc::clone(&last_update);
        let engine = ScrollbarEngine::new(config.engine_config(), selection_lock.clone())
            .on_loading(move |l| on_loading.set(l))
            .on_update(move |u| on_update.set(Some(u)));

        let viewport = DocumentViewport::new(document.len(), 0);
        let layout = AppLayout::from_area(
            Rect::default(),
            LayoutOptions {
                track_width: config.track_width,
                track_border: config.track_border,
                gutter_width: 0,
                hover_button: None,
                pane_rows: None,
            },
        );
        Self {
            path,
            document,
            viewport,
            engine,
            config,
            layout,
            gutter_width: 0,
            selection_lock,
            selection: None,
            selecting: false,
            hover: None,
            trigger_flag: false,
            loading,
            last_update,
            scaled_thumbnail: ScaledThumbnail::default(),
            status_message: None,
            should_quit: false,
            tick: 0,
        }
    }

    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            track_width: self.config.track_width,
            track_border: self.config.track_border,
            gutter_width: self.gutter_width,
            hover_button: self
                .config
                .hover_button
                .as_ref()
                .map(|_| self.config.hover_button_placement),
            pane_rows: self.config.auto_height.then(|| {
                let rows = u16::try_from(self.document.len()).unwrap_or(u16::MAX);
                rows.min(self.config.auto_height_max)
            }),
        }
    }

    /// Whether a capture is running, from whichever source reports it.
    pub fn is_capturing(&self) -> bool {
        self.loading.get() || self.engine.thumbnail().loading
    }
}
