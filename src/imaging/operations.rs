//! Pixel operations that turn a decoded raster into a stub.
//!
//! These combine the layout [`calculations`](super::calculations) with the
//! shared [`FontAsset`]. Nothing here can fail: the canvas always keeps its
//! dimensions and the label is clipped to it.

use super::calculations::{
    calculate_centered_offset, calculate_scale_factor, calculate_scaled_size, dimension_label,
    fits_label,
};
use super::font::FontAsset;
use super::params::{Color, StubStyle};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

/// Resampling filter for shrinking the label.
const LABEL_FILTER: FilterType = FilterType::Triangle;

/// Overwrite every pixel with `color`. No blending.
pub fn fill_solid(raster: &mut RgbaImage, color: Color) {
    let pixel = Rgba(color.to_rgba());
    for p in raster.pixels_mut() {
        *p = pixel;
    }
}

/// Set the red, green and blue channels of every pixel to `gray`, keeping
/// alpha so glyph coverage survives.
pub fn tint_gray(raster: &mut RgbaImage, gray: u8) {
    for p in raster.pixels_mut() {
        p[0] = gray;
        p[1] = gray;
        p[2] = gray;
    }
}

/// Measure `text` in `font`: single-line width, and the wrapped height at
/// that width plus 10px of slack.
pub fn measure_label(font: &FontAsset, text: &str) -> (u32, u32) {
    let width = font.measure_text(text);
    let height = font.measure_text_height(text, width + 10);
    (width, height)
}

/// Render `text` tinted to `gray` on a transparent raster of its natural size.
pub fn render_label(font: &FontAsset, text: &str, gray: u8) -> RgbaImage {
    let (width, height) = measure_label(font, text);
    let mut label = font.render(text, width.max(1), height.max(1));
    tint_gray(&mut label, gray);
    label
}

/// Turn `canvas` into a stub in place.
///
/// The canvas is flooded with the background color. If it is at least
/// `min_width` x `min_height`, a `"{w}x{h}"` label is drawn in gray, shrunk
/// to fit within `max_text_ratio` of the canvas and alpha-blended at the
/// center.
pub fn compose_stub(canvas: &mut RgbaImage, font: &FontAsset, style: &StubStyle) {
    let (w, h) = canvas.dimensions();
    fill_solid(canvas, style.background);

    if !fits_label((w, h), (style.min_width, style.min_height)) {
        log::trace!("{w}x{h} too small for a label");
        return;
    }

    let text = dimension_label(w, h);
    let label = render_label(font, &text, style.text_gray);
    let natural = label.dimensions();
    let scale = calculate_scale_factor((w, h), natural, style.max_text_ratio);
    let (label_w, label_h) = calculate_scaled_size(natural, scale);
    let label = if (label_w, label_h) == natural {
        label
    } else {
        imageops::resize(&label, label_w, label_h, LABEL_FILTER)
    };

    let (x, y) = calculate_centered_offset((w, h), (label_w, label_h));
    log::trace!("label {text:?} at ({x}, {y}), {label_w}x{label_h}, scale {scale:.3}");
    imageops::overlay(canvas, &label, x, y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::font;

    fn noisy(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([x * 7, y * 13, x ^ y, x + y].map(|c| c as u8))
        })
    }

    fn is_background(p: &Rgba<u8>) -> bool {
        p.0 == [0xE5, 0xE5, 0xE5, 0xFF]
    }

    fn is_gray(p: &Rgba<u8>, level: u8) -> bool {
        p[0] == level && p[1] == level && p[2] == level
    }

    #[test]
    fn fill_overwrites_every_pixel() {
        let mut raster = noisy(10, 7);
        fill_solid(&mut raster, Color(0x11223344));
        assert_eq!(raster.dimensions(), (10, 7));
        assert!(raster.pixels().all(|p| p.0 == [0x11, 0x22, 0x33, 0x44]));
    }

    #[test]
    fn fill_does_not_blend_transparent_color() {
        let mut raster = noisy(4, 4);
        fill_solid(&mut raster, Color(0xFF000000));
        assert!(raster.pixels().all(|p| p.0 == [0xFF, 0, 0, 0]));
    }

    #[test]
    fn tint_keeps_alpha() {
        let mut raster = noisy(5, 5);
        let alphas: Vec<u8> = raster.pixels().map(|p| p[3]).collect();
        tint_gray(&mut raster, 128);
        assert!(raster.pixels().all(|p| is_gray(p, 128)));
        assert_eq!(raster.pixels().map(|p| p[3]).collect::<Vec<_>>(), alphas);
    }

    #[test]
    fn measure_label_is_one_line_tall() {
        let font = font::shared();
        let (w, h) = measure_label(font, "640x480");
        assert_eq!(w, font.measure_text("640x480"));
        assert_eq!(h, font.line_height());
    }

    #[test]
    fn render_label_is_gray_with_coverage() {
        let label = render_label(font::shared(), "12x34", 128);
        assert!(label.pixels().all(|p| is_gray(p, 128)));
        assert!(label.pixels().any(|p| p[3] == 255));
        assert!(label.pixels().any(|p| p[3] == 0));
    }

    #[test]
    fn tiny_canvas_is_flat_fill() {
        for (w, h) in [(31, 100), (100, 15), (1, 1), (31, 15)] {
            let mut canvas = noisy(w, h);
            compose_stub(&mut canvas, font::shared(), &StubStyle::default());
            assert_eq!(canvas.dimensions(), (w, h));
            assert!(canvas.pixels().all(is_background), "{w}x{h} not flat");
        }
    }

    #[test]
    fn threshold_canvas_gets_label() {
        let mut canvas = noisy(32, 16);
        compose_stub(&mut canvas, font::shared(), &StubStyle::default());
        assert!(canvas.pixels().any(|p| !is_background(p)));
    }

    #[test]
    fn label_is_centered_gray_on_background() {
        let mut canvas = noisy(640, 480);
        compose_stub(&mut canvas, font::shared(), &StubStyle::default());

        // Corners and edges are untouched background
        for (x, y) in [(0, 0), (639, 0), (0, 479), (639, 479), (320, 5), (5, 240)] {
            assert!(is_background(canvas.get_pixel(x, y)), "({x}, {y})");
        }

        // Every pixel is background or a blend toward 128 gray
        assert!(canvas.pixels().all(|p| {
            p[0] == p[1] && p[1] == p[2] && (127..=0xE5).contains(&p[0]) && p[3] >= 254
        }));

        // Solid gray ink exists in the middle band
        let inked: Vec<(u32, u32)> = canvas
            .enumerate_pixels()
            .filter(|(_, _, p)| p[0] <= 130)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert!(!inked.is_empty());
        let (min_x, max_x) = (
            inked.iter().map(|p| p.0).min().unwrap(),
            inked.iter().map(|p| p.0).max().unwrap(),
        );
        let (min_y, max_y) = (
            inked.iter().map(|p| p.1).min().unwrap(),
            inked.iter().map(|p| p.1).max().unwrap(),
        );
        assert!(min_x >= 64 && max_x < 576, "x span {min_x}..{max_x}");
        assert!(min_y >= 48 && max_y < 432, "y span {min_y}..{max_y}");
    }

    #[test]
    fn label_never_exceeds_natural_size() {
        let font = font::shared();
        let (text_w, text_h) = measure_label(font, "2000x2000");
        let mut canvas = RgbaImage::new(2000, 2000);
        compose_stub(&mut canvas, font, &StubStyle::default());

        let gray: Vec<(u32, u32)> = canvas
            .enumerate_pixels()
            .filter(|(_, _, p)| !is_background(p))
            .map(|(x, y, _)| (x, y))
            .collect();
        let span = |axis: fn(&(u32, u32)) -> u32| {
            gray.iter().map(axis).max().unwrap() - gray.iter().map(axis).min().unwrap() + 1
        };
        let (span_x, span_y) = (span(|p| p.0), span(|p| p.1));
        assert!(span_x <= text_w);
        assert!(span_y <= text_h);
    }

    #[test]
    fn custom_style_is_applied() {
        let style = StubStyle {
            background: Color(0x000000FF),
            text_gray: 255,
            ..StubStyle::default()
        };
        // Large enough that the label keeps its natural size
        let mut canvas = RgbaImage::new(2000, 1000);
        compose_stub(&mut canvas, font::shared(), &style);
        assert_eq!(canvas.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert!(canvas.pixels().any(|p| p.0 == [255, 255, 255, 255]));
    }
}
