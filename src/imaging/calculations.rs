//! Pure calculation functions for label layout.
//!
//! All functions here are pure and testable without any I/O or images.

/// Label text for a canvas: `"{width}x{height}"`.
pub fn dimension_label(width: u32, height: u32) -> String {
    format!("{width}x{height}")
}

/// Whether a canvas is large enough to carry a label.
pub fn fits_label(canvas: (u32, u32), min: (u32, u32)) -> bool {
    canvas.0 >= min.0 && canvas.1 >= min.1
}

/// Uniform scale applied to the rendered label.
///
/// The label never grows past its natural size and never covers more than
/// `max_ratio` of the canvas on either axis; the tighter axis wins.
///
/// # Examples
/// ```
/// # use stub_image::imaging::calculate_scale_factor;
/// // Small label on a big canvas stays at natural size
/// assert_eq!(calculate_scale_factor((4000, 3000), (500, 128), 0.8), 1.0);
///
/// // Width-bound: 0.8 * 100 / 400
/// assert_eq!(calculate_scale_factor((100, 1000), (400, 128), 0.8), 0.2);
/// ```
pub fn calculate_scale_factor(canvas: (u32, u32), text: (u32, u32), max_ratio: f64) -> f64 {
    let (w, h) = (f64::from(canvas.0), f64::from(canvas.1));
    let (text_w, text_h) = (f64::from(text.0.max(1)), f64::from(text.1.max(1)));
    1f64.min(max_ratio * w / text_w).min(max_ratio * h / text_h)
}

/// Label size after scaling, rounded to whole pixels and at least 1x1.
pub fn calculate_scaled_size(text: (u32, u32), scale: f64) -> (u32, u32) {
    let w = (f64::from(text.0) * scale).round() as u32;
    let h = (f64::from(text.1) * scale).round() as u32;
    (w.max(1), h.max(1))
}

/// Top-left offset that centers `overlay` on `canvas`.
///
/// A fitted label is never larger than its canvas, so both offsets are
/// non-negative and a half pixel rounds up: an odd leftover pixel goes to the
/// left/top side.
pub fn calculate_centered_offset(canvas: (u32, u32), overlay: (u32, u32)) -> (i64, i64) {
    let center = |outer: u32, inner: u32| {
        let leftover = f64::from(outer) - f64::from(inner);
        (leftover / 2.0).round() as i64
    };
    (center(canvas.0, overlay.0), center(canvas.1, overlay.1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_format() {
        assert_eq!(dimension_label(640, 480), "640x480");
        assert_eq!(dimension_label(32, 16), "32x16");
        assert_eq!(dimension_label(7, 1000), "7x1000");
    }

    #[test]
    fn label_threshold() {
        let min = (32, 16);
        assert!(fits_label((32, 16), min));
        assert!(fits_label((640, 480), min));
        assert!(!fits_label((31, 480), min));
        assert!(!fits_label((640, 15), min));
        assert!(!fits_label((1, 1), min));
    }

    #[test]
    fn scale_never_exceeds_one() {
        let s = calculate_scale_factor((10_000, 10_000), (300, 128), 0.8);
        assert_eq!(s, 1.0);
    }

    #[test]
    fn scale_width_bound() {
        let s = calculate_scale_factor((640, 480), (1000, 128), 0.8);
        assert!((s - 0.512).abs() < 1e-12);
    }

    #[test]
    fn scale_height_bound() {
        let s = calculate_scale_factor((10_000, 64), (1000, 128), 0.8);
        assert!((s - 0.4).abs() < 1e-12);
    }

    #[test]
    fn scaled_label_stays_within_ratio() {
        for canvas in [(32, 16), (33, 100), (640, 480), (100, 5000), (5000, 100)] {
            let text = (896, 128);
            let s = calculate_scale_factor(canvas, text, 0.8);
            assert!(s <= 1.0);
            assert!(f64::from(text.0) * s <= 0.8 * f64::from(canvas.0) + 1e-9);
            assert!(f64::from(text.1) * s <= 0.8 * f64::from(canvas.1) + 1e-9);
        }
    }

    #[test]
    fn scale_handles_empty_text() {
        assert_eq!(calculate_scale_factor((640, 480), (0, 0), 0.8), 1.0);
    }

    #[test]
    fn scaled_size_rounds() {
        assert_eq!(calculate_scaled_size((1000, 128), 0.512), (512, 66));
        assert_eq!(calculate_scaled_size((1000, 128), 1.0), (1000, 128));
    }

    #[test]
    fn scaled_size_is_never_empty() {
        assert_eq!(calculate_scaled_size((1000, 128), 0.001), (1, 1));
    }

    #[test]
    fn centered_offset_even() {
        assert_eq!(calculate_centered_offset((640, 480), (512, 66)), (64, 207));
    }

    #[test]
    fn centered_offset_odd_rounds_half_up() {
        // 101/2 - 50/2 = 25.5 -> 26
        assert_eq!(calculate_centered_offset((101, 101), (50, 50)), (26, 26));
    }

    #[test]
    fn fitted_label_offset_stays_inside_canvas() {
        let text = (1008, 128);
        for canvas in [(32, 16), (33, 17), (640, 480), (4000, 20), (41, 999)] {
            let scale = calculate_scale_factor(canvas, text, 0.8);
            let (w, h) = calculate_scaled_size(text, scale);
            let (x, y) = calculate_centered_offset(canvas, (w, h));
            assert!(x >= 0 && y >= 0, "{canvas:?}: offset ({x}, {y})");
            assert!(x + i64::from(w) <= i64::from(canvas.0), "{canvas:?}");
            assert!(y + i64::from(h) <= i64::from(canvas.1), "{canvas:?}");
        }
    }
}
