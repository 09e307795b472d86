//! The scrollbar engine: one instance per scrollable view.
//!
//! Data flow:
//!
//! * native scroll → [`ScrollbarEngine::handle_scroll`] → (next frame)
//!   [`ScrollbarEngine::on_frame`] → forward geometry → [`Transforms`] +
//!   update callback;
//! * pointer / wheel input → inverse geometry → write to the viewport →
//!   `handle_scroll` closes the loop;
//! * content / size / flag changes → trigger resolver → capture request →
//!   host rasterizes → [`ScrollbarEngine::finish_capture`] → new thumbnail →
//!   `handle_scroll` recomputes the thumb.
//!
//! The engine owns all of its state.  The viewport is passed into each call
//! instead of being held, and the host reads visuals back through read-only
//! accessors.  Nothing here blocks or sleeps; timers are deadlines polled
//! with the host's clock.

use std::time::{Duration, Instant};

use crate::core::geometry::{self, BoxMetrics, TrackGeometry, MIN_THUMB_LENGTH};
use crate::core::thumbnail::{CaptureError, Raster, ThumbnailState};
use crate::core::timer::{earliest, Timer};
use crate::core::trigger::{RefreshTrigger, TriggerAction, TriggerEvent, TriggerResolver};
use crate::core::viewport::ScrollViewport;
use crate::core::visibility::{HoverRegion, Visibility, VisibilityController, DEFAULT_HIDE_DELAY};

use super::drag::{DragController, SelectionLock};
use super::sync::{ScrollSync, ScrollUpdate, Transforms};
use super::thumbnail_cache::ThumbnailCache;
use super::watcher::{ChangeWatcher, MUTATION_DEBOUNCE, RESIZE_DEBOUNCE};
use super::wheel::WheelAccumulator;

pub const DEFAULT_TRACK_WIDTH: f64 = 160.0;

// ───────────────────────────────────────── config ────────────

/// Engine options.  Feature flags are orthogonal: any trigger mode can be
/// combined with auto-hide and resize refreshes.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Width the thumbnail is scaled to, in track pixels.
    pub track_width: f64,
    pub min_thumb: f64,
    pub trigger: RefreshTrigger,
    pub refresh_on_resize: bool,
    pub auto_hide: bool,
    pub hide_delay: Duration,
    pub mutation_debounce: Duration,
    pub resize_debounce: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            track_width: DEFAULT_TRACK_WIDTH,
            min_thumb: MIN_THUMB_LENGTH,
            trigger: RefreshTrigger::default(),
            refresh_on_resize: true,
            auto_hide: false,
            hide_delay: DEFAULT_HIDE_DELAY,
            mutation_debounce: MUTATION_DEBOUNCE,
            resize_debounce: RESIZE_DEBOUNCE,
        }
    }
}

/// Where the track currently sits, in track pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackLayout {
    /// Outer top edge of the track.
    pub track_top: f64,
    pub track: BoxMetrics,
}

impl TrackLayout {
    /// Top of the area the thumb travels in.
    pub fn content_top(&self) -> f64 {
        self.track_top + self.track.inner_top()
    }
}

/// Whether an input event was handled by the scrollbar.  `Consumed` means
/// the host must not also apply its default action (e.g. scroll the page).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    Consumed,
    Ignored,
}

impl EventDisposition {
    pub fn is_consumed(self) -> bool {
        self == Self::Consumed
    }
}

type UpdateCallback = Box<dyn FnMut(ScrollUpdate)>;
type LoadingCallback = Box<dyn FnMut(bool)>;

// ───────────────────────────────────────── engine ────────────

pub struct ScrollbarEngine {
    config: EngineConfig,
    sync: ScrollSync,
    wheel: WheelAccumulator,
    drag: DragController,
    visibility: VisibilityController,
    watcher: ChangeWatcher,
    cache: ThumbnailCache,
    resolver: TriggerResolver,
    delay: Timer,
    layout: Option<TrackLayout>,
    transforms: Transforms,
    capture_request: Option<u64>,
    on_update: Option<UpdateCallback>,
    on_loading: Option<LoadingCallback>,
    mounted: bool,
    torn_down: bool,
}

impl ScrollbarEngine {
    pub fn new(config: EngineConfig, selection: SelectionLock) -> Self {
        let resolver = TriggerResolver::new(config.trigger, config.refresh_on_resize);
        Self {
            sync: ScrollSync::default(),
            wheel: WheelAccumulator::default(),
            drag: DragController::new(selection),
            visibility: VisibilityController::new(config.auto_hide, config.hide_delay),
            watcher: ChangeWatcher::new(config.mutation_debounce, config.resize_debounce),
            cache: ThumbnailCache::new(resolver.initial_state()),
            resolver,
            delay: Timer::default(),
            layout: None,
            transforms: Transforms::default(),
            capture_request: None,
            on_update: None,
            on_loading: None,
            mounted: false,
            torn_down: false,
            config,
        }
    }

    pub fn on_update(mut self, f: impl FnMut(ScrollUpdate) + 'static) -> Self {
        self.on_update = Some(Box::new(f));
        self
    }

    pub fn on_loading(mut self, f: impl FnMut(bool) + 'static) -> Self {
        self.on_loading = Some(Box::new(f));
        self
    }

    // ── lifecycle ──────────────────────────────────────────────

    /// Start the engine for a container of `size`.
    pub fn mount(&mut self, size: (u16, u16), now: Instant) {
        if self.torn_down || self.mounted {
            return;
        }
        self.mounted = true;
        self.watcher.observe_initial_size(size);
        let action = self.resolver.resolve(TriggerEvent::Mounted);
        self.apply(action, now);
        self.handle_scroll();
    }

    /// Cancel every pending frame and timer, release any drag and drop the
    /// callbacks.  Later calls are no-ops.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.sync.cancel();
        self.wheel.cancel();
        self.drag.end();
        self.visibility.teardown();
        self.delay.cancel();
        self.watcher.disconnect();
        self.capture_request = None;
        self.on_update = None;
        self.on_loading = None;
        tracing::debug!("scrollbar engine torn down");
    }

    /// New track position/size from the host's layout pass.
    pub fn set_track_layout(&mut self, layout: TrackLayout) {
        if self.layout != Some(layout) {
            self.layout = Some(layout);
            self.handle_scroll();
        }
    }

    // ── scroll sync ────────────────────────────────────────────

    /// The native scroll position changed.  Safe to call any number of
    /// times; bursts collapse into one sync on the next frame.
    pub fn handle_scroll(&mut self) {
        if self.torn_down {
            return;
        }
        self.sync.request();
    }

    /// Animation-frame callback.  Returns `true` if visuals changed.
    pub fn on_frame(&mut self, viewport: &mut impl ScrollViewport) -> bool {
        if self.torn_down {
            return false;
        }

        if self.wheel.is_pending() {
            // Build on whatever moved the viewport since the last write.
            self.wheel.reseed(viewport.metrics().scroll_top);
        }
        if let Some(target) = self.wheel.take_write() {
            viewport.set_scroll_top(target);
            self.wheel.settle(viewport.metrics().scroll_top);
            self.handle_scroll();
        }

        if !self.sync.take_frame() {
            return false;
        }

        // Always the live metrics, never values captured at request time.
        let metrics = viewport.metrics();
        if self.layout.is_some() {
            let geom = self.track_geometry();
            self.transforms = Transforms {
                thumb: geometry::forward(&metrics, &geom, self.config.min_thumb),
                image_offset: geometry::image_offset(&metrics, &geom),
            };
        }
        self.wheel.reseed(metrics.scroll_top);
        if let Some(cb) = self.on_update.as_mut() {
            cb(ScrollUpdate::from(metrics));
        }
        true
    }

    // ── pointer / wheel ────────────────────────────────────────

    /// Pointer pressed inside the track at `pointer_y`.  On the thumb this
    /// starts a drag; anywhere else it jumps so the thumb centres on the
    /// pointer.
    pub fn pointer_down(
        &mut self,
        pointer_y: f64,
        viewport: &mut impl ScrollViewport,
    ) -> EventDisposition {
        let Some(layout) = self.interactive_layout() else {
            return EventDisposition::Ignored;
        };
        let content_top = layout.content_top();
        let thumb = self.transforms.thumb;
        let thumb_top = content_top + thumb.offset;

        if thumb.length > 0.0 && (thumb_top..thumb_top + thumb.length).contains(&pointer_y) {
            self.drag.begin(pointer_y, thumb_top, content_top);
            tracing::debug!("drag start: pointer={pointer_y:.1} thumb_top={thumb_top:.1}");
            return EventDisposition::Consumed;
        }

        let metrics = viewport.metrics();
        let geom = self.track_geometry();
        let effective = geometry::effective_track_length(&geom);
        let length = geometry::thumb_length(&metrics, effective, self.config.min_thumb);
        let raw = geometry::click_offset(content_top, pointer_y, length);
        viewport.set_scroll_top(geometry::scroll_top_for_offset(raw, &metrics, effective, length));
        self.handle_scroll();
        EventDisposition::Consumed
    }

    /// Pointer moved anywhere.  While dragging, the viewport is written
    /// immediately; the thumb follows on the next frame.
    pub fn pointer_move(
        &mut self,
        pointer_y: f64,
        viewport: &mut impl ScrollViewport,
    ) -> EventDisposition {
        if self.torn_down || self.layout.is_none() {
            return EventDisposition::Ignored;
        }
        let Some(raw) = self.drag.target(pointer_y) else {
            return EventDisposition::Ignored;
        };
        let metrics = viewport.metrics();
        let geom = self.track_geometry();
        let effective = geometry::effective_track_length(&geom);
        let length = geometry::thumb_length(&metrics, effective, self.config.min_thumb);
        viewport.set_scroll_top(geometry::scroll_top_for_offset(raw, &metrics, effective, length));
        self.handle_scroll();
        EventDisposition::Consumed
    }

    /// Pointer released anywhere.
    pub fn pointer_up(&mut self) -> EventDisposition {
        if self.drag.end() {
            tracing::debug!("drag end");
            EventDisposition::Consumed
        } else {
            EventDisposition::Ignored
        }
    }

    /// Wheel over the track.  The delta is summed right away and written on
    /// the next frame.
    pub fn wheel(&mut self, delta_y: f64) -> EventDisposition {
        if self.interactive_layout().is_none() {
            return EventDisposition::Ignored;
        }
        self.wheel.push(delta_y);
        EventDisposition::Consumed
    }

    pub fn pointer_enter(&mut self, region: HoverRegion) {
        if !self.torn_down {
            self.visibility.enter(region);
        }
    }

    pub fn pointer_leave(&mut self, region: HoverRegion, now: Instant) {
        if !self.torn_down {
            self.visibility.leave(region, now);
        }
    }

    // ── thumbnail refresh ──────────────────────────────────────

    /// The content was mutated (debounced before it triggers anything).
    pub fn content_changed(&mut self, now: Instant) {
        if self.torn_down || !self.resolver.watches_content() {
            return;
        }
        self.watcher.content_mutated(now);
    }

    /// The container was resized (debounced before it triggers anything).
    pub fn container_resized(&mut self, size: (u16, u16), now: Instant) {
        if self.torn_down {
            return;
        }
        self.watcher.container_resized(size, now);
        self.handle_scroll();
    }

    /// The host's capture flag (only meaningful with [`RefreshTrigger::OnFlag`]).
    pub fn set_trigger_flag(&mut self, flag: bool, now: Instant) {
        if self.torn_down {
            return;
        }
        let action = self.resolver.resolve(TriggerEvent::FlagChanged(flag));
        self.apply(action, now);
    }

    /// Fire whatever timers are due.  Returns `true` if visuals changed.
    pub fn poll_timers(&mut self, now: Instant) -> bool {
        if self.torn_down {
            return false;
        }
        let changed = self.visibility.poll(now);

        if self.delay.fire_due(now) {
            let action = self.resolver.resolve(TriggerEvent::DelayElapsed);
            self.apply(action, now);
        }

        let events = self.watcher.poll(now);
        if events.content_changed {
            let action = self.resolver.resolve(TriggerEvent::ContentChanged);
            self.apply(action, now);
        }
        if events.resized {
            let action = self.resolver.resolve(TriggerEvent::Resized);
            self.apply(action, now);
        }
        changed
    }

    /// Epoch of a capture the host should start now, if any.
    pub fn take_capture_request(&mut self) -> Option<u64> {
        self.capture_request.take()
    }

    /// Result of the capture started for `epoch`.
    pub fn finish_capture(&mut self, epoch: u64, result: Result<Raster, CaptureError>) {
        if self.torn_down {
            return;
        }
        if self.cache.finish(epoch, result, self.config.track_width).is_none() {
            return;
        }
        if self.resolver.reports_loading() {
            if let Some(cb) = self.on_loading.as_mut() {
                cb(false);
            }
        }
        if self.resolver.watches_content() && self.cache.has_completed_once() {
            self.watcher.connect();
        }
        self.handle_scroll();
    }

    /// Earliest timer deadline, so the host knows when to poll again.
    pub fn next_deadline(&self) -> Option<Instant> {
        if self.torn_down {
            return None;
        }
        earliest([
            self.delay.deadline(),
            self.watcher.next_deadline(),
            self.visibility.next_deadline(),
        ])
    }

    // ── read-only views ────────────────────────────────────────

    pub fn transforms(&self) -> Transforms {
        self.transforms
    }

    pub fn thumbnail(&self) -> &ThumbnailState {
        self.cache.state()
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility.state()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }


    // ── internals ──────────────────────────────────────────────

    fn apply(&mut self, action: TriggerAction, now: Instant) {
        match action {
            TriggerAction::Nothing => {}
            TriggerAction::ArmDelay(d) => self.delay.arm(now, d),
            TriggerAction::Refresh => self.request_capture(),
        }
    }

    fn request_capture(&mut self) {
        if self.capture_request.is_some() {
            // Not picked up yet; one capture covers both reasons.
            return;
        }
        let epoch = self.cache.begin();
        tracing::debug!("thumbnail: refresh requested epoch={epoch}");
        self.capture_request = Some(epoch);
        if self.resolver.reports_loading() {
            if let Some(cb) = self.on_loading.as_mut() {
                cb(true);
            }
        }
        self.handle_scroll();
    }

    fn track_geometry(&self) -> TrackGeometry {
        let track = self.layout.map(|l| l.track).unwrap_or_default();
        let thumb = self.cache.state();
        // The placeholder replaces the image while a capture runs.
        let image = (!thumb.loading && thumb.has_image() && thumb.image_height > 0.0)
            .then(|| BoxMetrics::plain(thumb.image_height));
        TrackGeometry { track, image }
    }

    /// Layout for handlers that need the track on screen.
    fn interactive_layout(&self) -> Option<TrackLayout> {
        if self.torn_down || !self.visibility.is_shown() {
            return None;
        }
        self.layout
    }
}

impl Drop for ScrollbarEngine {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::ViewportMetrics;
    use image::RgbaImage;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    const MS: Duration = Duration::from_millis(1);

    /// Viewport with float rows and clamped writes; counts writes.
    struct FakeViewport {
        top: f64,
        height: f64,
        client: f64,
        writes: Vec<f64>,
    }

    impl FakeViewport {
        fn new(height: f64, client: f64) -> Self {
            Self {
                top: 0.0,
                height,
                client,
                writes: Vec::new(),
            }
        }
    }

    impl ScrollViewport for FakeViewport {
        fn metrics(&self) -> ViewportMetrics {
            ViewportMetrics::new(self.top, self.height, self.client)
        }
        fn set_scroll_top(&mut self, top: f64) {
            self.top = top.clamp(0.0, (self.height - self.client).max(0.0));
            self.writes.push(self.top);
        }
    }

    fn layout(height: f64) -> TrackLayout {
        TrackLayout {
            track_top: 0.0,
            track: BoxMetrics::plain(height),
        }
    }

    fn engine(config: EngineConfig) -> ScrollbarEngine {
        ScrollbarEngine::new(config, SelectionLock::new())
    }

    fn raster(w: u32, h: u32) -> Raster {
        Raster::new(RgbaImage::new(w, h)).unwrap()
    }

    fn on_flag() -> EngineConfig {
        EngineConfig {
            trigger: RefreshTrigger::OnFlag,
            ..EngineConfig::default()
        }
    }

    #[test]
    fn scroll_bursts_produce_one_update_per_frame() {
        let updates = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&updates);
        let mut e = engine(on_flag()).on_update(move |u| sink.borrow_mut().push(u));
        let mut vp = FakeViewport::new(1000.0, 100.0);
        e.set_track_layout(layout(200.0));
        e.on_frame(&mut vp);
        updates.borrow_mut().clear();

        for top in [10.0, 20.0, 450.0] {
            vp.top = top;
            e.handle_scroll();
        }
        assert!(e.on_frame(&mut vp));
        assert!(!e.on_frame(&mut vp));

        let updates = updates.borrow();
        assert_eq!(updates.len(), 1);
        assert_eq!(
            updates[0],
            ScrollUpdate {
                top: 0.5,
                scroll_top: 450.0,
                scroll_height: 1000.0,
                client_height: 100.0,
            }
        );
    }

    #[test]
    fn frame_positions_thumb_from_live_metrics() {
        let mut e = engine(on_flag());
        let mut vp = FakeViewport::new(1000.0, 100.0);
        e.set_track_layout(layout(200.0));
        vp.top = 900.0;
        e.on_frame(&mut vp);
        let t = e.transforms().thumb;
        // 100 / 1000 * 200 = 20 → min 30; at the end of travel.
        assert_eq!(t.length, 30.0);
        assert_eq!(t.offset, 170.0);
        assert_eq!(e.transforms().image_offset, 0.0);
    }

    #[test]
    fn tall_thumbnail_is_translated() {
        let mut e = engine(on_flag());
        let mut vp = FakeViewport::new(1000.0, 100.0);
        e.set_track_layout(layout(200.0));
        e.set_trigger_flag(true, Instant::now());
        let epoch = e.take_capture_request().unwrap();
        // 10 wide × 40 tall scaled to 160 → 640 tall.
        e.finish_capture(epoch, Ok(raster(10, 40)));
        assert_eq!(e.thumbnail().image_height, 640.0);

        vp.top = 450.0;
        e.handle_scroll();
        e.on_frame(&mut vp);
        assert_eq!(e.transforms().image_offset, 220.0);
    }

    #[test]
    fn no_overflow_means_no_thumb() {
        let mut e = engine(on_flag());
        let mut vp = FakeViewport::new(100.0, 100.0);
        e.set_track_layout(layout(200.0));
        e.on_frame(&mut vp);
        assert_eq!(e.transforms().thumb.length, 0.0);
        assert_eq!(e.transforms().thumb.offset, 0.0);
    }

    #[test]
    fn wheel_burst_is_one_clamped_write() {
        let mut e = engine(on_flag());
        let mut vp = FakeViewport::new(1000.0, 100.0);
        e.set_track_layout(layout(200.0));
        vp.top = 100.0;
        e.on_frame(&mut vp);

        for _ in 0..5 {
            assert!(e.wheel(30.0).is_consumed());
        }
        e.on_frame(&mut vp);
        assert_eq!(vp.writes, vec![250.0]);

        // Past the end: clamped per write, and the accumulator follows.
        for _ in 0..10 {
            e.wheel(100.0);
        }
        e.on_frame(&mut vp);
        assert_eq!(vp.top, 900.0);
        e.wheel(-50.0);
        e.on_frame(&mut vp);
        assert_eq!(vp.top, 850.0);
    }

    #[test]
    fn wheel_continues_from_programmatic_scroll() {
        let mut e = engine(on_flag());
        let mut vp = FakeViewport::new(1000.0, 100.0);
        e.set_track_layout(layout(200.0));
        e.on_frame(&mut vp);

        vp.top = 600.0;
        e.handle_scroll();
        e.on_frame(&mut vp);
        e.wheel(10.0);
        e.on_frame(&mut vp);
        assert_eq!(vp.top, 610.0);
    }

    #[test]
    fn wheel_builds_on_scroll_from_the_same_frame() {
        let mut e = engine(on_flag());
        let mut vp = FakeViewport::new(1000.0, 100.0);
        e.set_track_layout(layout(200.0));
        e.on_frame(&mut vp);

        vp.set_scroll_top(600.0);
        e.handle_scroll();
        e.wheel(10.0);
        e.on_frame(&mut vp);
        assert_eq!(vp.top, 610.0);

        // A jump that lands between two wheel notches is kept as well.
        e.wheel(5.0);
        vp.set_scroll_top(0.0);
        e.handle_scroll();
        e.wheel(5.0);
        e.on_frame(&mut vp);
        assert_eq!(vp.top, 10.0);
    }

    #[test]
    fn dragging_thumb_writes_synchronously() {
        let lock = SelectionLock::new();
        let mut e = ScrollbarEngine::new(on_flag(), lock.clone());
        let mut vp = FakeViewport::new(1000.0, 100.0);
        e.set_track_layout(TrackLayout {
            track_top: 10.0,
            track: BoxMetrics::plain(200.0),
        });
        e.on_frame(&mut vp);

        // Thumb is 30 long at the top of the track (10..40); grab at 20.
        assert!(e.pointer_down(20.0, &mut vp).is_consumed());
        assert!(e.is_dragging());
        assert!(lock.is_suppressed());
        assert!(vp.writes.is_empty());

        // Move the thumb top to 85 → half of the 170px travel.
        assert!(e.pointer_move(105.0, &mut vp).is_consumed());
        assert_eq!(vp.top, 450.0);
        // Beyond the end: the viewport clamps.
        e.pointer_move(1000.0, &mut vp);
        assert_eq!(vp.top, 900.0);

        assert!(e.pointer_up().is_consumed());
        assert!(!e.is_dragging());
        assert!(!lock.is_suppressed());
        assert_eq!(e.pointer_move(50.0, &mut vp), EventDisposition::Ignored);
    }

    #[test]
    fn track_click_centres_thumb() {
        let mut e = engine(on_flag());
        let mut vp = FakeViewport::new(1000.0, 100.0);
        e.set_track_layout(layout(200.0));
        e.on_frame(&mut vp);

        // Click at 100 → thumb top at 85 → 85/170 of 900.
        assert!(e.pointer_down(100.0, &mut vp).is_consumed());
        assert!(!e.is_dragging());
        assert_eq!(vp.top, 450.0);
    }

    #[test]
    fn flag_refresh_reports_loading_in_order() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let mut e = engine(EngineConfig {
            track_width: 20.0,
            ..on_flag()
        })
        .on_loading(move |l| sink.borrow_mut().push(l));
        e.mount((80, 24), Instant::now());
        assert!(!e.thumbnail().loading);
        assert_eq!(e.take_capture_request(), None);

        e.set_trigger_flag(true, Instant::now());
        assert!(e.thumbnail().loading);
        let epoch = e.take_capture_request().unwrap();
        e.finish_capture(epoch, Ok(raster(40, 100)));

        assert_eq!(*events.borrow(), vec![true, false]);
        let t = e.thumbnail();
        assert!(t.has_image());
        assert_eq!(t.image_height, 50.0);
    }

    #[test]
    fn capture_failure_resets_thumbnail() {
        let mut e = engine(on_flag());
        e.set_trigger_flag(true, Instant::now());
        let epoch = e.take_capture_request().unwrap();
        e.finish_capture(epoch, Err(CaptureError::Render("boom".into())));
        let t = e.thumbnail();
        assert!(!t.loading);
        assert!(!t.has_image());
        assert_eq!(t.image_height, 0.0);
    }

    #[test]
    fn always_mode_watches_content_after_first_capture() {
        let t0 = Instant::now();
        let mut e = engine(EngineConfig::default());
        assert!(e.thumbnail().loading);
        e.mount((80, 24), t0);
        let first = e.take_capture_request().unwrap();

        // Not watching yet.
        e.content_changed(t0);
        e.poll_timers(t0 + 600 * MS);
        assert_eq!(e.take_capture_request(), None);

        e.finish_capture(first, Ok(raster(10, 10)));
        e.content_changed(t0 + 600 * MS);
        e.content_changed(t0 + 800 * MS);
        e.poll_timers(t0 + 1200 * MS);
        assert_eq!(e.take_capture_request(), None);
        e.poll_timers(t0 + 1300 * MS);
        assert_eq!(e.take_capture_request(), Some(first + 1));
    }

    #[test]
    fn delay_mode_captures_once_after_delay() {
        let t0 = Instant::now();
        let mut e = engine(EngineConfig {
            trigger: RefreshTrigger::AfterDelay(Duration::from_millis(1000)),
            ..EngineConfig::default()
        });
        e.mount((80, 24), t0);
        assert_eq!(e.take_capture_request(), None);
        assert_eq!(e.next_deadline(), Some(t0 + 1000 * MS));
        e.poll_timers(t0 + 999 * MS);
        assert_eq!(e.take_capture_request(), None);
        e.poll_timers(t0 + 1000 * MS);
        assert!(e.take_capture_request().is_some());
        e.poll_timers(t0 + 5000 * MS);
        assert_eq!(e.take_capture_request(), None);
    }

    #[test]
    fn resize_burst_triggers_exactly_one_refresh() {
        let t0 = Instant::now();
        let mut e = engine(EngineConfig::default());
        e.mount((400, 300), t0);
        let first = e.take_capture_request().unwrap();
        e.finish_capture(first, Ok(raster(10, 10)));

        let mut requests = 0;
        let mut now = t0;
        for h in (300..=600).step_by(30) {
            now += 20 * MS;
            e.container_resized((400, h as u16), now);
            e.poll_timers(now);
            requests += e.take_capture_request().iter().count();
        }
        for _ in 0..40 {
            now += 20 * MS;
            e.poll_timers(now);
            requests += e.take_capture_request().iter().count();
        }
        assert_eq!(requests, 1);
    }

    #[test]
    fn stale_capture_does_not_end_loading() {
        let loading = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&loading);
        let mut e = engine(on_flag()).on_loading(move |l| sink.borrow_mut().push(l));
        let now = Instant::now();
        e.set_trigger_flag(true, now);
        let first = e.take_capture_request().unwrap();
        e.set_trigger_flag(false, now);
        let second = e.take_capture_request().unwrap();

        e.finish_capture(first, Ok(raster(10, 10)));
        assert!(e.thumbnail().loading);
        e.finish_capture(second, Err(CaptureError::NoContent));
        assert!(!e.thumbnail().loading);
        assert_eq!(*loading.borrow(), vec![true, true, false]);
    }

    #[test]
    fn hidden_track_ignores_input() {
        let t0 = Instant::now();
        let mut e = engine(EngineConfig {
            auto_hide: true,
            ..on_flag()
        });
        let mut vp = FakeViewport::new(1000.0, 100.0);
        e.set_track_layout(layout(200.0));
        assert_eq!(e.visibility(), Visibility::Hidden);
        assert_eq!(e.wheel(10.0), EventDisposition::Ignored);
        assert_eq!(e.pointer_down(100.0, &mut vp), EventDisposition::Ignored);

        e.pointer_enter(HoverRegion::Trigger);
        assert_eq!(e.visibility(), Visibility::Shown);
        assert!(e.wheel(10.0).is_consumed());

        e.pointer_leave(HoverRegion::Trigger, t0);
        assert!(e.poll_timers(t0 + 300 * MS));
        assert_eq!(e.visibility(), Visibility::Hidden);
    }

    #[test]
    fn teardown_silences_everything() {
        let t0 = Instant::now();
        let calls = Rc::new(RefCell::new(0));
        let (a, b) = (Rc::clone(&calls), Rc::clone(&calls));
        let lock = SelectionLock::new();
        let mut e = ScrollbarEngine::new(
            EngineConfig {
                auto_hide: true,
                ..EngineConfig::default()
            },
            lock.clone(),
        )
        .on_update(move |_| *a.borrow_mut() += 1)
        .on_loading(move |_| *b.borrow_mut() += 1);
        let mut vp = FakeViewport::new(1000.0, 100.0);
        e.mount((80, 24), t0);
        e.set_track_layout(layout(200.0));
        e.pointer_enter(HoverRegion::Track);
        e.on_frame(&mut vp);
        e.pointer_down(10.0, &mut vp);
        assert!(lock.is_suppressed());
        e.wheel(50.0);
        e.handle_scroll();
        e.pointer_leave(HoverRegion::Track, t0);
        let pending = e.take_capture_request();
        let before = *calls.borrow();

        e.teardown();
        assert!(!lock.is_suppressed());
        assert_eq!(e.next_deadline(), None);

        e.handle_scroll();
        assert!(!e.on_frame(&mut vp));
        assert_eq!(e.wheel(10.0), EventDisposition::Ignored);
        assert_eq!(e.pointer_down(50.0, &mut vp), EventDisposition::Ignored);
        assert_eq!(e.pointer_move(80.0, &mut vp), EventDisposition::Ignored);
        e.content_changed(t0);
        e.container_resized((1, 1), t0);
        e.set_trigger_flag(true, t0);
        assert!(!e.poll_timers(t0 + 10_000 * MS));
        if let Some(epoch) = pending {
            e.finish_capture(epoch, Ok(raster(1, 1)));
        }
        assert_eq!(e.take_capture_request(), None);
        assert!(vp.writes.is_empty());
        assert_eq!(*calls.borrow(), before);
        assert_eq!(e.visibility(), Visibility::Shown);
    }
}
