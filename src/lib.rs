//! # Stub Image
//!
//! Replaces JPEG and PNG images with placeholder stubs of the same size and
//! format. Each stub is a flat light-gray canvas with its own dimensions
//! (`"640x480"`) written across the middle in dark gray, so layouts can be
//! built and reviewed without shipping the real pictures.
//!
//! # Architecture
//!
//! ```text
//! images/**/*  →  scan  →  stub (per entry, in parallel)  →  result/**/*
//! ```
//!
//! The transform itself lives in [`stub::StubRenderer`], which works on one
//! [`stub::ImageItem`] at a time and knows nothing about the filesystem.
//! [`pipeline`] wraps it in the `clean` / `stub` / `build` tasks over a source
//! tree.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`stub`] | The per-item transform: format check, decode, compose, encode |
//! | [`imaging`] | Codec trait, bitmap font, label layout math, compositing |
//! | [`scan`] | Walks the source directory into relative entries |
//! | [`pipeline`] | `clean`, `stub` and `build` tasks with per-entry events |
//! | [`config`] | `stub-image.toml` loading and validation |
//! | [`output`] | CLI output formatting for events and summaries |
//!
//! # Design Decisions
//!
//! ## Stubs Keep Format and Size
//!
//! A stub is written with the same extension, container format and pixel
//! dimensions as its source. Anything laid out around the real image lays out
//! identically around the stub.
//!
//! ## Bitmap Label Face
//!
//! The label is drawn from an embedded 8x8 bitmap face, emboldened and scaled
//! up to a 128px line. There is no font file to locate at runtime, and the face
//! is built once per process on first use.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding, compositing and encoding use the `image` crate only. The binary
//! has no system dependencies.

pub mod config;
pub mod imaging;
pub mod output;
pub mod pipeline;
pub mod scan;
pub mod stub;

#[cfg(test)]
pub(crate) mod test_helpers;
