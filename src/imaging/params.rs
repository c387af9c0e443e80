//! Parameter types for stub rendering.
//!
//! These describe *what* a stub looks like, not how it is drawn. The
//! [`operations`](super::operations) module consumes them; the
//! [`config`](crate::config) module builds them from `stub-image.toml`.
//!
//! - [`Quality`]: JPEG encoding quality (1-100, default 100). Clamped on construction.
//! - [`Color`]: packed `0xRRGGBBAA` value with hex parsing.
//! - [`StubStyle`]: how the background and label are drawn.

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u8);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(100)
    }
}

/// A 32-bit RGBA color, red in the most significant byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u32);

impl Color {
    /// The light gray every stub is filled with.
    pub const BACKGROUND: Color = Color(0xE5E5E5FF);

    /// Channel bytes in `[r, g, b, a]` order.
    pub fn to_rgba(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Parse `#rrggbb` (opaque) or `#rrggbbaa`. The `#` is optional.
    pub fn parse_hex(input: &str) -> Option<Self> {
        let hex = input.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(hex, 16).ok()?;
        match hex.len() {
            6 => Some(Self((value << 8) | 0xFF)),
            8 => Some(Self(value)),
            _ => None,
        }
    }
}

/// How a stub is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StubStyle {
    pub background: Color,
    /// Value written to the red, green and blue channels of the label.
    pub text_gray: u8,
    /// Largest share of the canvas the label may cover on either axis.
    pub max_text_ratio: f64,
    /// Canvases narrower than this get no label.
    pub min_width: u32,
    /// Canvases shorter than this get no label.
    pub min_height: u32,
}

impl Default for StubStyle {
    fn default() -> Self {
        Self {
            background: Color::BACKGROUND,
            text_gray: 128,
            max_text_ratio: 0.8,
            min_width: 32,
            min_height: 16,
        }
    }
}
