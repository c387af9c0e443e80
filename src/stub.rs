//! The stub transform: one encoded image in, one placeholder out.
//!
//! [`StubRenderer::process`] takes an [`ImageItem`] through a fixed sequence:
//!
//! ```text
//! classify contents ──null──→ pass through untouched
//!        │ stream ──────────→ UnsupportedInputKind
//!        ▼ buffer
//! resolve format (extension) ──→ UnsupportedFormat
//!        ▼
//! decode ───────────────────→ Decode
//!        ▼
//! fill + label (operations::compose_stub)
//!        ▼
//! encode as resolved format ─→ Encode
//!        ▼
//! replace item contents
//! ```
//!
//! Every item is independent. The only shared state is the label font,
//! loaded on first use and read-only afterwards, so a renderer can be shared
//! by any number of worker threads.

use crate::imaging::{
    CodecError, ImageCodec, OutputFormat, Quality, RustCodec, StubStyle, compose_stub, font,
};
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Tag attached to every error this transform reports.
pub const PLUGIN_NAME: &str = "StubImage";

#[derive(Error, Debug)]
pub enum StubError {
    #[error("Streams not supported!")]
    UnsupportedInputKind,
    #[error("File type not supported")]
    UnsupportedFormat,
    #[error(transparent)]
    Decode(CodecError),
    #[error(transparent)]
    Encode(CodecError),
}

impl StubError {
    /// Name of the component that raised the error.
    pub fn plugin(&self) -> &'static str {
        PLUGIN_NAME
    }
}

/// What an item holds when it reaches the renderer.
pub enum Contents {
    /// No data, e.g. a directory entry.
    Null,
    /// A reader that has not been drained into memory.
    Stream(Box<dyn Read + Send>),
    /// Fully buffered encoded bytes.
    Buffer(Vec<u8>),
}

impl fmt::Debug for Contents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Stream(_) => f.write_str("Stream(..)"),
            Self::Buffer(bytes) => write!(f, "Buffer({} bytes)", bytes.len()),
        }
    }
}

/// An entry flowing through the pipeline. `path` is only consulted for its
/// extension.
#[derive(Debug)]
pub struct ImageItem {
    pub path: PathBuf,
    pub contents: Contents,
}

impl ImageItem {
    pub fn new(path: impl Into<PathBuf>, contents: Contents) -> Self {
        Self {
            path: path.into(),
            contents,
        }
    }

    pub fn buffer(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        Self::new(path, Contents::Buffer(bytes))
    }

    pub fn null(path: impl Into<PathBuf>) -> Self {
        Self::new(path, Contents::Null)
    }

    pub fn stream(path: impl Into<PathBuf>, reader: impl Read + Send + 'static) -> Self {
        Self::new(path, Contents::Stream(Box::new(reader)))
    }

    pub fn is_null(&self) -> bool {
        matches!(self.contents, Contents::Null)
    }

    /// Buffered bytes, if any.
    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.contents {
            Contents::Buffer(bytes) => Some(bytes),
            _ => None,
        }
    }
}

/// Result of a successful [`StubRenderer::process`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Null contents, left as they were.
    PassedThrough,
    /// Contents replaced by a stub of the given size and format.
    Stubbed {
        width: u32,
        height: u32,
        format: OutputFormat,
    },
}

/// Renders stubs with a given codec and style.
pub struct StubRenderer<C = RustCodec> {
    codec: C,
    style: StubStyle,
    quality: Quality,
}

impl StubRenderer<RustCodec> {
    pub fn new() -> Self {
        Self::with_codec(RustCodec::new())
    }
}

impl Default for StubRenderer<RustCodec> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ImageCodec> StubRenderer<C> {
    pub fn with_codec(codec: C) -> Self {
        Self {
            codec,
            style: StubStyle::default(),
            quality: Quality::default(),
        }
    }

    pub fn with_style(mut self, style: StubStyle) -> Self {
        self.style = style;
        self
    }

    /// JPEG quality for re-encoded stubs.
    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    /// Stub raw bytes whose file carried `extension` (`"png"`, `".jpg"`, ...).
    pub fn render(&self, bytes: &[u8], extension: &str) -> Result<Vec<u8>, StubError> {
        let format = OutputFormat::from_extension(extension).ok_or(StubError::UnsupportedFormat)?;
        self.render_as(bytes, format).map(|(out, _)| out)
    }

    /// Replace `item`'s contents with its stub.
    ///
    /// On error the item is left exactly as it was.
    pub fn process(&self, item: &mut ImageItem) -> Result<Outcome, StubError> {
        let bytes = match &item.contents {
            Contents::Null => return Ok(Outcome::PassedThrough),
            Contents::Stream(_) => return Err(StubError::UnsupportedInputKind),
            Contents::Buffer(bytes) => bytes,
        };
        let format = OutputFormat::from_path(&item.path).ok_or(StubError::UnsupportedFormat)?;
        let (out, (width, height)) = self.render_as(bytes, format)?;
        log_stubbed(&item.path, width, height, format, out.len());
        item.contents = Contents::Buffer(out);
        Ok(Outcome::Stubbed {
            width,
            height,
            format,
        })
    }

    fn render_as(
        &self,
        bytes: &[u8],
        format: OutputFormat,
    ) -> Result<(Vec<u8>, (u32, u32)), StubError> {
        let mut canvas = self.codec.decode(bytes).map_err(StubError::Decode)?;
        compose_stub(&mut canvas, font::shared(), &self.style);
        let out = self
            .codec
            .encode(&canvas, format, self.quality)
            .map_err(StubError::Encode)?;
        Ok((out, canvas.dimensions()))
    }
}

fn log_stubbed(path: &Path, width: u32, height: u32, format: OutputFormat, len: usize) {
    log::debug!(
        "stubbed {} as {width}x{height} {} ({len} bytes)",
        path.display(),
        format.mime_type()
    );
}
