//! Shared test utilities for the stub-image test suite.
//!
//! Builds encoded fixture images in memory and small source trees on disk,
//! so no binary fixtures need to be checked in.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_source_tree();
//! let stub = decode(&std::fs::read(tmp.path().join("photos/001-dawn.png")).unwrap());
//! assert!(has_gray_ink_near_center(&stub));
//! ```

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::Path;
use tempfile::TempDir;

// =========================================================================
// Encoded fixtures
// =========================================================================

/// A colorful gradient, so stubs are visibly different from their source.
pub fn gradient(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([x as u8, y as u8, (x + y) as u8, 255])
    })
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = DynamicImage::ImageRgba8(gradient(width, height));
    encode(image, ImageFormat::Png)
}

pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let rgb = DynamicImage::ImageRgba8(gradient(width, height)).into_rgb8();
    encode(DynamicImage::ImageRgb8(rgb), ImageFormat::Jpeg)
}

fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buffer = Vec::new();
    image.write_to(&mut Cursor::new(&mut buffer), format).unwrap();
    buffer
}

pub fn decode(bytes: &[u8]) -> RgbaImage {
    image::load_from_memory(bytes).unwrap().into_rgba8()
}

// =========================================================================
// Pixel assertions
// =========================================================================

/// Every channel within `tolerance` of `expected` (for lossy re-encodes).
pub fn is_near(actual: [u8; 4], expected: [u8; 4], tolerance: u8) -> bool {
    actual
        .iter()
        .zip(expected)
        .all(|(a, e)| a.abs_diff(e) <= tolerance)
}

/// Whether the middle half of the image holds dark-gray label ink.
pub fn has_gray_ink_near_center(stub: &RgbaImage) -> bool {
    let (w, h) = stub.dimensions();
    stub.enumerate_pixels().any(|(x, y, p)| {
        (w / 4..3 * w / 4).contains(&x)
            && (h / 4..3 * h / 4).contains(&y)
            && is_near(p.0, [128, 128, 128, 255], 24)
    })
}

// =========================================================================
// Source trees
// =========================================================================

/// A small source tree:
///
/// ```text
/// photos/
/// ├── 001-dawn.png        640x480
/// ├── 002-dusk.JPG        300x200
/// └── nested/
///     └── icon.jpeg       24x24 (too small for a label)
/// empty/
/// anim.gif                (not supported)
/// .hidden.png             (ignored)
/// ```
pub fn setup_source_tree() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(root, "photos/001-dawn.png", &png_bytes(640, 480));
    write(root, "photos/002-dusk.JPG", &jpeg_bytes(300, 200));
    write(root, "photos/nested/icon.jpeg", &jpeg_bytes(24, 24));
    std::fs::create_dir_all(root.join("empty")).unwrap();
    write(root, "anim.gif", b"GIF89a");
    write(root, ".hidden.png", &png_bytes(64, 64));
    tmp
}

pub fn write(root: &Path, relative: &str, bytes: &[u8]) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, bytes).unwrap();
}
