//! The fixed label face.
//!
//! Labels use the public-domain 8x8 `font8x8` bitmaps, emboldened by one
//! column and scaled up so one bitmap cell covers `size / 8` pixels. At the
//! nominal 128px size a digit is roughly 100px wide and every line is 128px
//! tall.
//!
//! The face is loaded once per process through [`shared`] and never mutated
//! afterwards, so every worker thread measures and renders with the same
//! metrics.

use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::{Rgba, RgbaImage};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Pixel size of the shared face.
pub const NOMINAL_SIZE: u32 = 128;

/// Bitmap cells per glyph edge in `font8x8`.
const CELLS: u32 = 8;
/// Advance of a blank glyph (space), in cells.
const BLANK_ADVANCE: u32 = 4;
/// Gap after the last inked column of a glyph, in cells.
const TRACKING: u32 = 1;

/// Ink color of rendered text, before tinting.
const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

static SHARED: LazyLock<FontAsset> = LazyLock::new(|| {
    let font = FontAsset::load(NOMINAL_SIZE);
    log::debug!(
        "loaded label font: {} glyphs, {}px line height",
        font.glyphs.len(),
        font.line_height
    );
    font
});

/// The process-wide label font. First call loads it; every call returns the
/// same instance.
pub fn shared() -> &'static FontAsset {
    &SHARED
}

/// One emboldened glyph: eight rows of up to nine inked columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Glyph {
    rows: [u16; 8],
    /// Inked width in cells, 0 for blank glyphs.
    width: u32,
}

impl Glyph {
    const BLANK: Glyph = Glyph {
        rows: [0; 8],
        width: 0,
    };

    /// Bit `n` of each source row is column `n`, leftmost first. Bolding
    /// smears every inked cell one column to the right.
    fn bold(bitmap: [u8; 8]) -> Self {
        let mut rows = [0u16; 8];
        for (row, bits) in rows.iter_mut().zip(bitmap) {
            *row = u16::from(bits) | (u16::from(bits) << 1);
        }
        let width = rows
            .iter()
            .map(|r| u16::BITS - r.leading_zeros())
            .max()
            .unwrap_or(0);
        Self { rows, width }
    }

    fn advance_cells(&self) -> u32 {
        if self.width == 0 {
            BLANK_ADVANCE
        } else {
            self.width + TRACKING
        }
    }
}

/// A loaded bitmap face at a fixed pixel size.
#[derive(Debug)]
pub struct FontAsset {
    /// Pixels per bitmap cell.
    unit: u32,
    line_height: u32,
    glyphs: HashMap<char, Glyph>,
    fallback: Glyph,
}

impl FontAsset {
    /// Build the face at `size` pixels. Covers printable ASCII; other
    /// characters render as `?`.
    pub fn load(size: u32) -> Self {
        let unit = (size / CELLS).max(1);
        let glyphs: HashMap<char, Glyph> = (0x20u8..0x7f)
            .map(char::from)
            .filter_map(|ch| BASIC_FONTS.get(ch).map(|bitmap| (ch, Glyph::bold(bitmap))))
            .collect();
        let fallback = glyphs.get(&'?').copied().unwrap_or(Glyph::BLANK);
        Self {
            unit,
            line_height: unit * CELLS,
            glyphs,
            fallback,
        }
    }

    pub fn line_height(&self) -> u32 {
        self.line_height
    }

    fn glyph(&self, ch: char) -> &Glyph {
        self.glyphs.get(&ch).unwrap_or(&self.fallback)
    }

    /// Width in pixels of `text` laid out on a single line: the sum of its
    /// character advances.
    pub fn measure_text(&self, text: &str) -> u32 {
        text.chars()
            .map(|ch| self.glyph(ch).advance_cells() * self.unit)
            .sum()
    }

    /// Height in pixels of `text` word-wrapped to `max_width`.
    ///
    /// Words are split on spaces and a word that alone exceeds `max_width`
    /// still occupies its own line, so the result is always at least one
    /// line tall.
    pub fn measure_text_height(&self, text: &str, max_width: u32) -> u32 {
        self.wrap_line_count(text, max_width) * self.line_height
    }

    fn wrap_line_count(&self, text: &str, max_width: u32) -> u32 {
        let space = self.measure_text(" ");
        let mut lines = 1;
        let mut line_width: Option<u32> = None;
        for word in text.split(' ') {
            let word_width = self.measure_text(word);
            line_width = match line_width {
                None => Some(word_width),
                Some(current) if current + space + word_width > max_width => {
                    lines += 1;
                    Some(word_width)
                }
                Some(current) => Some(current + space + word_width),
            };
        }
        lines
    }

    /// Render `text` in black onto a transparent `width` x `height` raster,
    /// starting at the top-left corner. Ink falling outside is clipped.
    pub fn render(&self, text: &str, width: u32, height: u32) -> RgbaImage {
        let mut raster = RgbaImage::new(width, height);
        let mut pen_x = 0;
        for ch in text.chars() {
            let glyph = self.glyph(ch);
            self.draw_glyph(&mut raster, glyph, pen_x);
            pen_x += glyph.advance_cells() * self.unit;
        }
        raster
    }

    fn draw_glyph(&self, raster: &mut RgbaImage, glyph: &Glyph, pen_x: u32) {
        let (width, height) = raster.dimensions();
        for (row, bits) in (0u32..).zip(glyph.rows) {
            for col in 0..glyph.width {
                if (bits >> col) & 1 == 0 {
                    continue;
                }
                let x0 = pen_x + col * self.unit;
                let y0 = row * self.unit;
                for y in y0..(y0 + self.unit).min(height) {
                    for x in x0..(x0 + self.unit).min(width) {
                        raster.put_pixel(x, y, INK);
                    }
                }
            }
        }
    }
}
