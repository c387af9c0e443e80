//! Configuration module.
//!
//! Handles loading and validating `stub-image.toml`. The file is optional;
//! every key has a default, and the defaults produce the standard stub
//! (light gray canvas, mid-gray label).
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [stub]
//! background = "#e5e5e5"    # Canvas fill, #rrggbb or #rrggbbaa
//! text_gray = 128           # Label gray level (0-255)
//! max_text_ratio = 0.8      # Label covers at most this share of each axis
//! min_width = 32            # Narrower images get no label
//! min_height = 16           # Shorter images get no label
//!
//! [output]
//! jpeg_quality = 100        # JPEG re-encode quality (1-100)
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! fail_fast = false         # Stop starting new images after the first failure
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{Color, Quality, StubStyle};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `stub-image.toml`.
///
/// All fields have defaults. Config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StubConfig {
    /// How stubs are drawn.
    pub stub: StyleConfig,
    /// Encoder settings.
    pub output: OutputConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl StubConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.stub.to_style()?;
        if !(1..=100).contains(&self.output.jpeg_quality) {
            return Err(ConfigError::Validation(
                "output.jpeg_quality must be 1-100".into(),
            ));
        }
        Ok(())
    }

    /// JPEG quality for re-encoded stubs.
    pub fn quality(&self) -> Quality {
        Quality::new(self.output.jpeg_quality)
    }
}

/// Stub drawing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    /// Canvas fill color as `#rrggbb` (opaque) or `#rrggbbaa`.
    pub background: String,
    /// Gray level written to the label's color channels.
    pub text_gray: u8,
    /// Largest share of the canvas the label may cover on either axis.
    pub max_text_ratio: f64,
    pub min_width: u32,
    pub min_height: u32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        let style = StubStyle::default();
        Self {
            background: "#e5e5e5".to_string(),
            text_gray: style.text_gray,
            max_text_ratio: style.max_text_ratio,
            min_width: style.min_width,
            min_height: style.min_height,
        }
    }
}

impl StyleConfig {
    /// Convert to the renderer's style, checking the color and ratio.
    pub fn to_style(&self) -> Result<StubStyle, ConfigError> {
        let background = Color::parse_hex(&self.background).ok_or_else(|| {
            ConfigError::Validation(format!(
                "stub.background must be #rrggbb or #rrggbbaa, got {:?}",
                self.background
            ))
        })?;
        if !(self.max_text_ratio > 0.0 && self.max_text_ratio <= 1.0) {
            return Err(ConfigError::Validation(
                "stub.max_text_ratio must be in (0, 1]".into(),
            ));
        }
        Ok(StubStyle {
            background,
            text_gray: self.text_gray,
            max_text_ratio: self.max_text_ratio,
            min_width: self.min_width,
            min_height: self.min_height,
        })
    }
}

/// Encoder settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// JPEG quality (1-100). PNG output is lossless and ignores it.
    pub jpeg_quality: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: u32::from(Quality::default().value()),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
    /// Stop starting new images once one has failed.
    pub fail_fast: bool,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

/// Load config from the TOML file at `path`.
///
/// A missing file yields the defaults. A present file is parsed (unknown
/// keys rejected) and validated.
pub fn load_config(path: &Path) -> Result<StubConfig, ConfigError> {
    if !path.exists() {
        log::debug!("no config at {}, using defaults", path.display());
        return Ok(StubConfig::default());
    }
    let content = fs::read_to_string(path)?;
    let config: StubConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `stub-image.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# stub-image configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Stub appearance
# ---------------------------------------------------------------------------
[stub]
# Canvas fill color, #rrggbb (opaque) or #rrggbbaa.
background = "#e5e5e5"

# Gray level (0-255) of the "WIDTHxHEIGHT" label.
text_gray = 128

# The label is shrunk (never enlarged) to cover at most this share of the
# image width and height.
max_text_ratio = 0.8

# Images smaller than this on either axis are filled without a label.
min_width = 32
min_height = 16

# ---------------------------------------------------------------------------
# Encoding
# ---------------------------------------------------------------------------
[output]
# JPEG quality (1 = worst, 100 = best). PNG is always lossless.
jpeg_quality = 100

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4

# Stop starting new images once one has failed. Images already in flight
# still finish.
fail_fast = false
"##
}
