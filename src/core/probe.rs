//! Native scrollbar gutter probe.
//!
//! The custom track covers the native scrollbar, so the host needs to know
//! how wide the native gutter is.  Measuring is comparatively expensive, so
//! the result is memoized and only re-measured when the display's pixel
//! ratio changes (zoom, moving to another screen, font resize).

/// Environment capability: measure the native gutter and report the
/// current pixel density.
pub trait GutterEnvironment {
    fn pixel_ratio(&self) -> f64;
    fn measure_gutter_width(&self) -> u16;
}

/// Memoized gutter width, invalidated on pixel-ratio change.
#[derive(Debug)]
pub struct ScrollbarWidthProbe<E> {
    env: E,
    cached: Option<u16>,
    ratio: f64,
}

impl<E: GutterEnvironment> ScrollbarWidthProbe<E> {
    pub fn new(env: E) -> Self {
        let ratio = env.pixel_ratio();
        Self {
            env,
            cached: None,
            ratio,
        }
    }

    /// Current gutter width, re-measured only when needed.
    pub fn width(&mut self) -> u16 {
        let ratio = self.env.pixel_ratio();
        if ratio != self.ratio {
            self.ratio = ratio;
            self.cached = None;
        }
        match self.cached {
            Some(w) => w,
            None => {
                let w = self.env.measure_gutter_width();
                tracing::debug!("gutter probe: width={w} ratio={ratio}");
                self.cached = Some(w);
                w
            }
        }
    }

    /// Re-check the environment; `Some(width)` when the width changed.
    pub fn refresh(&mut self) -> Option<u16> {
        let before = self.cached;
        let now = self.width();
        (before != Some(now)).then_some(now)
    }
}
