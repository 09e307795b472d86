//! Thumbnail raster model.
//!
//! A thumbnail is a point-in-time picture of the scrollable content, shown
//! scaled to the track width behind the thumb.  Producing it is delegated to
//! a [`Rasterizer`]; this module only defines the data that flows back.

use std::sync::Arc;

use image::RgbaImage;

/// Why a capture produced no thumbnail.  Every variant is handled the same
/// way (the cached thumbnail is cleared); the distinction is for logs.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("no content to capture")]
    NoContent,
    #[error("raster has no area ({width}x{height})")]
    EmptyRaster { width: u32, height: u32 },
    #[error("render failed: {0}")]
    Render(String),
}

/// A rendered raster of the content.
#[derive(Debug, Clone)]
pub struct Raster {
    pub pixel_width: u32,
    pub pixel_height: u32,
    image: RgbaImage,
}

impl Raster {
    pub fn new(image: RgbaImage) -> Result<Self, CaptureError> {
        let (w, h) = image.dimensions();
        if w == 0 || h == 0 {
            return Err(CaptureError::EmptyRaster {
                width: w,
                height: h,
            });
        }
        Ok(Self {
            pixel_width: w,
            pixel_height: h,
            image,
        })
    }

    /// Height of the raster once scaled to `track_width`.
    pub fn scaled_height(&self, track_width: f64) -> f64 {
        image_height(self.pixel_width, self.pixel_height, track_width)
    }

    /// Hand the pixels over as a shareable image reference.
    pub fn into_image(self) -> Arc<RgbaImage> {
        Arc::new(self.image)
    }
}

/// Capability that turns content into a [`Raster`].  Runs off the UI
/// thread, hence `Send + Sync`.
pub trait Rasterizer<C>: Send + Sync {
    fn rasterize(&self, content: &C) -> Result<Raster, CaptureError>;
}

/// Scaled height preserving aspect ratio: `pixel_height * track_width / pixel_width`.
pub fn image_height(pixel_width: u32, pixel_height: u32, track_width: f64) -> f64 {
    if pixel_width == 0 {
        return 0.0;
    }
    pixel_height as f64 * track_width / pixel_width as f64
}

/// Cached thumbnail as seen by the renderer.
#[derive(Debug, Clone, Default)]
pub struct ThumbnailState {
    pub loading: bool,
    pub image: Option<Arc<RgbaImage>>,
    pub image_height: f64,
}

impl ThumbnailState {
    /// Not loading, nothing captured.
    pub fn idle() -> Self {
        Self::default()
    }

    /// A capture is expected right away.
    pub fn pending() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_preserves_aspect_ratio() {
        assert_eq!(image_height(80, 400, 160.0), 800.0);
        assert_eq!(image_height(320, 100, 160.0), 50.0);
        assert_eq!(image_height(0, 100, 160.0), 0.0);
    }

    #[test]
    fn empty_raster_is_rejected() {
        let err = Raster::new(RgbaImage::new(0, 10)).unwrap_err();
        assert!(matches!(err, CaptureError::EmptyRaster { width: 0, height: 10 }));
    }

    #[test]
    fn raster_scales_to_track_width() {
        let r = Raster::new(RgbaImage::new(40, 100)).unwrap();
        assert_eq!(r.scaled_height(20.0), 50.0);
        let img = r.into_image();
        assert_eq!(img.dimensions(), (40, 100));
    }

    #[test]
    fn initial_states() {
        assert!(!ThumbnailState::idle().loading);
        assert!(ThumbnailState::pending().loading);
        assert!(!ThumbnailState::pending().has_image());
    }
}
