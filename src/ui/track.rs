//! The custom scrollbar track: thumbnail preview with a translucent thumb
//! drawn over it.
//!
//! Everything is drawn with `▀` half-blocks, so each cell carries two track
//! pixels (top = foreground, bottom = background).  The thumbnail is shifted
//! up by the engine's image offset and the thumb is blended on top of
//! whatever is underneath at pixel precision.

use std::sync::Arc;

use image::imageops::FilterType;
use image::RgbaImage;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Position, Rect},
    style::Color,
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::app::sync::Transforms;
use crate::core::thumbnail::ThumbnailState;
use crate::ui::theme::Theme;

// ─── scaled thumbnail cache ─────────────────────────────────────

/// The current thumbnail resized to the track width.  Re-scaled only when
/// the source raster or the width changes.
#[derive(Default)]
pub struct ScaledThumbnail {
    source: Option<Arc<RgbaImage>>,
    scaled: Option<RgbaImage>,
}

impl ScaledThumbnail {
    pub fn update(&mut self, state: &ThumbnailState, width: u32) -> Option<&RgbaImage> {
        let Some(src) = state.image.as_ref() else {
            self.source = None;
            self.scaled = None;
            return None;
        };
        let same_source = self.source.as_ref().is_some_and(|s| Arc::ptr_eq(s, src));
        let same_width = self.scaled.as_ref().is_some_and(|s| s.width() == width);
        if !same_source || !same_width {
            let height = state.image_height.round().max(1.0) as u32;
            self.scaled = Some(image::imageops::resize(
                src.as_ref(),
                width.max(1),
                height,
                FilterType::Triangle,
            ));
            self.source = Some(Arc::clone(src));
        }
        self.scaled.as_ref()
    }
}

// ─── track ──────────────────────────────────────────────────────

pub struct TrackWidget<'a> {
    pub thumbnail: Option<&'a RgbaImage>,
    pub loading: bool,
    pub loading_text: &'a str,
    pub transforms: Transforms,
    pub track_color: [u8; 3],
    pub thumb_color: [u8; 3],
    pub border: bool,
    pub dragging: bool,
}

impl Widget for TrackWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let inner = if self.border {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border_style());
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        let image = if self.loading { None } else { self.thumbnail };
        let image_offset = self.transforms.image_offset.round() as i64;
        let thumb = self.transforms.thumb;
        let alpha = Theme::thumb_alpha(self.dragging);

        let pixel_at = |x: u32, py: i64| -> [u8; 3] {
            let mut px = self.track_color;
            if let Some(img) = image {
                let iy = py + image_offset;
                if iy >= 0 && (iy as u32) < img.height() && x < img.width() {
                    let p = img.get_pixel(x, iy as u32).0;
                    px = blend(px, [p[0], p[1], p[2]], f32::from(p[3]) / 255.0);
                }
            }
            let y = py as f64;
            if thumb.length > 0.0 && y >= thumb.offset && y < thumb.offset + thumb.length {
                px = blend(px, self.thumb_color, alpha);
            }
            px
        };

        for row in 0..inner.height {
            let top = i64::from(row) * 2;
            for col in 0..inner.width {
                let [tr, tg, tb] = pixel_at(u32::from(col), top);
                let [br, bg, bb] = pixel_at(u32::from(col), top + 1);
                if let Some(cell) = buf.cell_mut(Position::new(inner.x + col, inner.y + row)) {
                    cell.set_char('▀')
                        .set_fg(Color::Rgb(tr, tg, tb))
                        .set_bg(Color::Rgb(br, bg, bb));
                }
            }
        }

        if self.loading && inner.height > 0 {
            let [r, g, b] = self.track_color;
            let text_area = Rect {
                y: inner.y + inner.height / 2,
                height: 1,
                ..inner
            };
            Paragraph::new(Line::from(self.loading_text))
                .alignment(Alignment::Center)
                .style(Theme::loading_style().bg(Color::Rgb(r, g, b)))
                .render(text_area, buf);
        }
    }
}

/// Linear blend of `over` onto `base`.
fn blend(base: [u8; 3], over: [u8; 3], alpha: f32) -> [u8; 3] {
    let a = alpha.clamp(0.0, 1.0);
    let mix = |b: u8, o: u8| (f32::from(b) * (1.0 - a) + f32::from(o) * a).round() as u8;
    [
        mix(base[0], over[0]),
        mix(base[1], over[1]),
        mix(base[2], over[2]),
    ]
}

// ─── hover button ───────────────────────────────────────────────

/// Small label that reveals an auto-hidden track while hovered.
pub struct HoverButton<'a> {
    pub label: &'a str,
}

impl Widget for HoverButton<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        Paragraph::new(Line::from(self.label))
            .alignment(Alignment::Center)
            .style(Theme::hover_button_style())
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::ThumbGeometry;
    use image::Rgba;

    const TRACK: [u8; 3] = [0, 0, 0];
    const THUMB: [u8; 3] = [200, 200, 200];

    fn widget<'a>(thumbnail: Option<&'a RgbaImage>, transforms: Transforms) -> TrackWidget<'a> {
        TrackWidget {
            thumbnail,
            loading: false,
            loading_text: "loading",
            transforms,
            track_color: TRACK,
            thumb_color: THUMB,
            border: false,
            dragging: false,
        }
    }

    fn colours(buf: &Buffer, x: u16, y: u16) -> (Color, Color) {
        let cell = &buf[(x, y)];
        (cell.fg, cell.bg)
    }

    #[test]
    fn thumb_is_drawn_at_half_row_precision() {
        let area = Rect::new(0, 0, 2, 4);
        let mut buf = Buffer::empty(area);
        let transforms = Transforms {
            thumb: ThumbGeometry {
                length: 3.0,
                offset: 1.0,
            },
            image_offset: 0.0,
        };
        widget(None, transforms).render(area, &mut buf);

        let shaded = blend(TRACK, THUMB, Theme::thumb_alpha(false));
        let shaded = Color::Rgb(shaded[0], shaded[1], shaded[2]);
        let bare = Color::Rgb(0, 0, 0);
        // Pixels 1..4 are thumb: row 0 bottom, row 1 both.
        assert_eq!(colours(&buf, 0, 0), (bare, shaded));
        assert_eq!(colours(&buf, 1, 1), (shaded, shaded));
        assert_eq!(colours(&buf, 0, 2), (bare, bare));
    }

    #[test]
    fn thumbnail_is_shifted_by_image_offset() {
        let mut img = RgbaImage::new(1, 10);
        img.put_pixel(0, 6, Rgba([255, 0, 0, 255]));
        let area = Rect::new(0, 0, 1, 2);
        let mut buf = Buffer::empty(area);
        let transforms = Transforms {
            image_offset: 4.0,
            ..Transforms::default()
        };
        widget(Some(&img), transforms).render(area, &mut buf);
        // Image row 6 lands on track pixel 2 → row 1, top half.
        assert_eq!(colours(&buf, 0, 1).0, Color::Rgb(255, 0, 0));
        assert_eq!(colours(&buf, 0, 0).0, Color::Rgb(0, 0, 0));
    }

    #[test]
    fn loading_replaces_the_image() {
        let mut img = RgbaImage::new(8, 8);
        for p in img.pixels_mut() {
            *p = Rgba([255, 255, 255, 255]);
        }
        let area = Rect::new(0, 0, 8, 3);
        let mut buf = Buffer::empty(area);
        let mut w = widget(Some(&img), Transforms::default());
        w.loading = true;
        w.render(area, &mut buf);
        assert_eq!(colours(&buf, 0, 0).0, Color::Rgb(0, 0, 0));
        let text: String = (0..8).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(text.contains("loading"), "{text:?}");
    }

    #[test]
    fn scaled_thumbnail_is_cached_per_source() {
        let src = Arc::new(RgbaImage::new(10, 20));
        let state = ThumbnailState {
            loading: false,
            image: Some(Arc::clone(&src)),
            image_height: 8.0,
        };
        let mut cache = ScaledThumbnail::default();
        let dims = cache.update(&state, 4).map(|i| i.dimensions());
        assert_eq!(dims, Some((4, 8)));
        assert!(cache.source.as_ref().is_some_and(|s| Arc::ptr_eq(s, &src)));
        assert!(cache.update(&ThumbnailState::idle(), 4).is_none());
    }
}
