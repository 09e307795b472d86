//! Minimap rasterizer: turns document lines into a small RGBA image.
//!
//! One pixel per character cell, coloured by character class.  Whitespace
//! is left transparent so the track colour shows through.

use image::{Rgba, RgbaImage};

use crate::core::document::DocumentSnapshot;
use crate::core::thumbnail::{CaptureError, Raster, Rasterizer};
use crate::ui::theme::Theme;

/// Lines wider than this are cut off in the minimap.
const DEFAULT_MAX_COLUMNS: u32 = 120;

#[derive(Debug, Clone)]
pub struct TextRasterizer {
    max_columns: u32,
}

impl Default for TextRasterizer {
    fn default() -> Self {
        Self {
            max_columns: DEFAULT_MAX_COLUMNS,
        }
    }
}

impl TextRasterizer {
    pub fn with_max_columns(max_columns: u32) -> Self {
        Self {
            max_columns: max_columns.max(1),
        }
    }
}

impl Rasterizer<DocumentSnapshot> for TextRasterizer {
    fn rasterize(&self, content: &DocumentSnapshot) -> Result<Raster, CaptureError> {
        let widest = content
            .iter()
            .map(|l| l.chars().count() as u32)
            .max()
            .unwrap_or(0);
        let width = widest.clamp(1, self.max_columns);
        let height = u32::try_from(content.len())
            .map_err(|_| CaptureError::Render(format!("{} lines is too many", content.len())))?;

        let mut img = RgbaImage::new(width, height);
        for (y, line) in content.iter().enumerate() {
            for (x, ch) in line.chars().take(width as usize).enumerate() {
                if let Some(px) = pixel_for(ch) {
                    img.put_pixel(x as u32, y as u32, px);
                }
            }
        }
        Raster::new(img)
    }
}

fn pixel_for(ch: char) -> Option<Rgba<u8>> {
    let [r, g, b] = if ch.is_whitespace() || ch.is_control() {
        return None;
    } else if ch.is_ascii_digit() {
        Theme::RASTER_DIGIT
    } else if ch.is_alphanumeric() || ch == '_' {
        Theme::RASTER_WORD
    } else {
        Theme::RASTER_PUNCT
    };
    Some(Rgba([r, g, b, 255]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(lines: &[&str]) -> DocumentSnapshot {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn one_pixel_per_character() {
        let raster = TextRasterizer::default()
            .rasterize(&snapshot(&["fn main() {", "", "    x = 1;", "}"]))
            .unwrap();
        assert_eq!((raster.pixel_width, raster.pixel_height), (11, 4));

        let img = raster.into_image();
        assert_eq!(img.get_pixel(0, 0).0[3], 255, "`f` is ink");
        assert_eq!(img.get_pixel(2, 0).0[3], 0, "space is transparent");
        assert_eq!(img.get_pixel(0, 1).0[3], 0, "empty line");
        assert_eq!(&img.get_pixel(8, 2).0[..3], &Theme::RASTER_DIGIT);
        assert_eq!(&img.get_pixel(0, 3).0[..3], &Theme::RASTER_PUNCT);
    }

    #[test]
    fn long_lines_are_cut() {
        let long = "x".repeat(500);
        let raster = TextRasterizer::with_max_columns(40)
            .rasterize(&snapshot(&[&long]))
            .unwrap();
        assert_eq!(raster.pixel_width, 40);
    }

    #[test]
    fn blank_document_still_has_a_column() {
        let raster = TextRasterizer::default().rasterize(&snapshot(&["", ""])).unwrap();
        assert_eq!((raster.pixel_width, raster.pixel_height), (1, 2));
    }

    #[test]
    fn no_lines_is_an_error() {
        assert!(TextRasterizer::default().rasterize(&snapshot(&[])).is_err());
    }
}
