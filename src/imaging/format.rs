//! Output format resolution from file extensions.
//!
//! A stub is always written back in the container its source file claims to
//! be, judged by extension alone. Content sniffing happens later, at decode
//! time, so a `.png` that actually holds JPEG data still comes out as PNG.

use std::fmt;
use std::path::Path;

/// The two encodings a stub can be written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Jpeg,
    Png,
}

impl OutputFormat {
    /// Resolve an extension such as `"png"`, `".JPG"` or `"jpeg"`.
    ///
    /// Matching is case-insensitive and ignores one leading `.`. Anything
    /// else, including an empty string, yields `None`.
    pub fn from_extension(extension: &str) -> Option<Self> {
        let ext = extension.strip_prefix('.').unwrap_or(extension);
        if ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg") {
            Some(Self::Jpeg)
        } else if ext.eq_ignore_ascii_case("png") {
            Some(Self::Png)
        } else {
            None
        }
    }

    /// Resolve from the extension of the final path component.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jpeg => f.write_str("JPEG"),
            Self::Png => f.write_str("PNG"),
        }
    }
}
