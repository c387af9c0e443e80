//! Image handling in pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Format resolution** | extension lookup ([`OutputFormat`]) |
//! | **Decode / encode** | `image` crate JPEG + PNG codecs ([`RustCodec`]) |
//! | **Label face** | `font8x8` bitmaps, emboldened and scaled ([`FontAsset`]) |
//! | **Compose** | solid fill, gray tint, `imageops::resize` + `imageops::overlay` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for label layout math (unit testable)
//! - **Parameters**: Style and quality types
//! - **Backend**: [`ImageCodec`] trait + [`RustCodec`]
//! - **Operations**: Pixel work combining calculations, font and style

pub mod backend;
mod calculations;
pub mod font;
pub mod format;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{CodecError, ImageCodec};
pub use calculations::{
    calculate_centered_offset, calculate_scale_factor, calculate_scaled_size, dimension_label,
};
pub use font::FontAsset;
pub use format::OutputFormat;
pub use operations::compose_stub;
pub use params::{Color, Quality, StubStyle};
pub use rust_backend::RustCodec;
