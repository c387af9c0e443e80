//! Pure Rust codec built on the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG) | `image::ImageReader` with content sniffing |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` (RGB, alpha dropped) |
//! | Encode → PNG | `image::codecs::png::PngEncoder` (RGBA) |

use super::backend::{CodecError, ImageCodec};
use super::format::OutputFormat;
use super::params::Quality;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ImageReader, RgbaImage};
use std::io::Cursor;

/// Codec backed by the `image` crate's JPEG and PNG support.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCodec;

impl RustCodec {
    pub fn new() -> Self {
        Self
    }
}

impl ImageCodec for RustCodec {
    fn decode(&self, bytes: &[u8]) -> Result<RgbaImage, CodecError> {
        let image = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()?
            .decode()?;
        Ok(image.into_rgba8())
    }

    fn encode(
        &self,
        raster: &RgbaImage,
        format: OutputFormat,
        quality: Quality,
    ) -> Result<Vec<u8>, CodecError> {
        let mut buffer = Vec::new();
        match format {
            OutputFormat::Jpeg => {
                // JPEG has no alpha channel
                let rgb = DynamicImage::ImageRgba8(raster.clone()).into_rgb8();
                let encoder = JpegEncoder::new_with_quality(&mut buffer, quality.value());
                rgb.write_with_encoder(encoder)?;
            }
            OutputFormat::Png => {
                let encoder = PngEncoder::new(&mut buffer);
                raster.write_with_encoder(encoder)?;
            }
        }
        Ok(buffer)
    }
}
