//! Image codec trait and shared error type.
//!
//! The [`ImageCodec`] trait covers the two operations that touch encoded
//! bytes: decode into an RGBA raster and encode a raster into a target
//! format. Everything between those two steps is pure pixel work in
//! [`operations`](super::operations).
//!
//! The production implementation is
//! [`RustCodec`](super::rust_backend::RustCodec), built on the `image`
//! crate. Tests swap in a mock to exercise failure paths.

use super::format::OutputFormat;
use super::params::Quality;
use image::RgbaImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Trait for image codecs.
///
/// Implementations must be `Sync`: one codec is shared by every worker in
/// the pipeline.
pub trait ImageCodec: Sync {
    /// Decode encoded bytes, sniffing the container from the content.
    fn decode(&self, bytes: &[u8]) -> Result<RgbaImage, CodecError>;

    /// Encode a raster as `format`. `quality` applies to lossy formats only.
    fn encode(
        &self,
        raster: &RgbaImage,
        format: OutputFormat,
        quality: Quality,
    ) -> Result<Vec<u8>, CodecError>;
}
