//! Track / thumb geometry: pure mapping between the viewport's scroll
//! metrics and pixel positions inside the track.
//!
//! Two coordinate spaces meet here: the *viewport* space (scroll offsets of
//! the native scroll container) and the *track* space (pixels of the track
//! and of the rendered thumbnail).  They are only ever related through
//! ratios, so the units of either side don't matter.

/// Default lower bound for a non-zero thumb, in track pixels.
pub const MIN_THUMB_LENGTH: f64 = 30.0;

// ───────────────────────────────────────── viewport ──────────

/// Scroll state of the native viewport, read fresh on every sync.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ViewportMetrics {
    pub fn new(scroll_top: f64, scroll_height: f64, client_height: f64) -> Self {
        Self {
            scroll_top,
            scroll_height,
            client_height,
        }
    }

    /// Largest valid `scroll_top`.
    pub fn max_scroll(&self) -> f64 {
        (self.scroll_height - self.client_height).max(0.0)
    }

    /// `scroll_top` as a fraction of the scrollable range.  A viewport
    /// without overflow reports 0 instead of NaN.
    pub fn scroll_fraction(&self) -> f64 {
        ratio(self.scroll_top, self.scroll_height - self.client_height)
    }
}

// ───────────────────────────────────────── boxes ─────────────

/// Outer height of a box plus the decorations that don't count toward
/// travel distance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxMetrics {
    pub height: f64,
    pub border_top: f64,
    pub border_bottom: f64,
    pub padding_top: f64,
    pub padding_bottom: f64,
}

impl BoxMetrics {
    /// A bare box with no border or padding.
    pub fn plain(height: f64) -> Self {
        Self {
            height,
            ..Self::default()
        }
    }

    /// Content-box height: outer height minus borders and padding.
    pub fn inner_height(&self) -> f64 {
        (self.height
            - self.border_top
            - self.border_bottom
            - self.padding_top
            - self.padding_bottom)
            .max(0.0)
    }

    /// Height inside the borders (padding included).
    pub fn client_height(&self) -> f64 {
        (self.height - self.border_top - self.border_bottom).max(0.0)
    }

    /// Offset from the outer top edge to the content box.
    pub fn inner_top(&self) -> f64 {
        self.border_top + self.padding_top
    }
}

/// The track box and, once a thumbnail is rendered, the image box inside it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackGeometry {
    pub track: BoxMetrics,
    pub image: Option<BoxMetrics>,
}

impl TrackGeometry {
    /// `true` when the thumbnail overflows the visible track and has to be
    /// translated along with the scroll position.
    pub fn image_overflows(&self) -> bool {
        self.image
            .is_some_and(|img| img.client_height() > self.track.client_height())
    }
}

/// Derived thumb placement, recomputed every sync.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ThumbGeometry {
    pub length: f64,
    pub offset: f64,
}

// ───────────────────────────────────────── forward ───────────

/// Distance the thumb can travel: the track when the thumbnail is taller
/// than it (or absent), otherwise the thumbnail itself.
pub fn effective_track_length(geom: &TrackGeometry) -> f64 {
    match geom.image {
        Some(img) if !geom.image_overflows() => img.inner_height(),
        _ => geom.track.inner_height(),
    }
}

/// Thumb length proportional to the visible fraction of the content.
///
/// Returns 0 when the content doesn't overflow (the proportional length
/// already covers the whole track) or the inputs are degenerate.
pub fn thumb_length(metrics: &ViewportMetrics, effective: f64, min_thumb: f64) -> f64 {
    if metrics.scroll_height <= 0.0 || effective <= 0.0 {
        return 0.0;
    }
    let raw = (metrics.client_height / metrics.scroll_height * effective).ceil();
    if raw >= effective {
        return 0.0;
    }
    raw.max(min_thumb).min(effective)
}

/// Thumb offset from the top of the effective track.
pub fn thumb_offset(metrics: &ViewportMetrics, effective: f64, thumb_length: f64) -> f64 {
    metrics.scroll_fraction() * travel(effective, thumb_length)
}

/// Scroll state → thumb geometry.
pub fn forward(metrics: &ViewportMetrics, geom: &TrackGeometry, min_thumb: f64) -> ThumbGeometry {
    let effective = effective_track_length(geom);
    let length = thumb_length(metrics, effective, min_thumb);
    ThumbGeometry {
        length,
        offset: thumb_offset(metrics, effective, length),
    }
}

/// Upward translation of the thumbnail wrapper so the part of the preview
/// matching the viewport stays inside the track.
pub fn image_offset(metrics: &ViewportMetrics, geom: &TrackGeometry) -> f64 {
    match geom.image {
        Some(img) if geom.image_overflows() => {
            metrics.scroll_fraction() * (img.client_height() - geom.track.client_height())
        }
        _ => 0.0,
    }
}

// ───────────────────────────────────────── inverse ───────────

/// Raw pixel offset along the track → target `scroll_top`.
///
/// Not clamped: the native viewport clamps on write.
pub fn scroll_top_for_offset(
    raw_offset: f64,
    metrics: &ViewportMetrics,
    effective: f64,
    thumb_length: f64,
) -> f64 {
    ratio(raw_offset, travel(effective, thumb_length)) * metrics.max_scroll()
}

/// Raw offset while dragging: pointer position relative to the track,
/// minus where inside the thumb it was grabbed.
pub fn drag_offset(pointer_y: f64, track_top: f64, grab_offset: f64) -> f64 {
    pointer_y - track_top - grab_offset
}

/// Raw offset for a click on the track: centres the thumb under the click.
pub fn click_offset(target_top: f64, click_y: f64, thumb_length: f64) -> f64 {
    (target_top - click_y).abs() - thumb_length / 2.0
}

fn travel(effective: f64, thumb_length: f64) -> f64 {
    effective - thumb_length
}

/// `num / den`, or 0 when the denominator leaves nothing to scroll.
fn ratio(num: f64, den: f64) -> f64 {
    if den <= 0.0 || !den.is_finite() {
        return 0.0;
    }
    let r = num / den;
    if r.is_finite() {
        r
    } else {
        0.0
    }
}
