//! Build tasks: clean the output directory, stub a source tree into it.
//!
//! ```text
//! build = clean → stub
//!
//! clean   output/        removed (if present)
//! stub    images/**/*  →  output/**/*   (same relative paths)
//! ```
//!
//! ## Per-entry handling
//!
//! | Entry | Result |
//! |---|---|
//! | Directory | created in the output tree |
//! | `.jpg` / `.jpeg` / `.png` | stub written at the same relative path |
//! | Anything else, unreadable or undecodable | recorded as a failure, nothing written |
//!
//! ## Parallel Processing
//!
//! Entries are processed in parallel using [rayon](https://docs.rs/rayon).
//! Each entry is loaded, stubbed and written independently; one failure
//! never touches another entry. With `fail_fast`, entries that have not
//! started yet when a failure is seen are skipped instead.

use crate::config::{ConfigError, StubConfig};
use crate::imaging::{ImageCodec, OutputFormat};
use crate::scan::{self, EntryKind, ReadMode, ScanError, SourceEntry};
use crate::stub::{Contents, ImageItem, Outcome, StubError, StubRenderer};
use rayon::prelude::*;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Scan failed: {0}")]
    Scan(#[from] ScanError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Refusing to write into the source tree: {0}")]
    OutputInsideSource(PathBuf),
    #[error("Refusing to clean an output tree that holds the source: {0}")]
    SourceInsideOutput(PathBuf),
}

/// Why a single entry failed.
#[derive(Error, Debug)]
pub enum ItemError {
    #[error("{0}")]
    Stub(#[from] StubError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Options for [`stub`] and [`build`].
#[derive(Debug, Clone, Default)]
pub struct StubOptions {
    pub config: StubConfig,
    pub read_mode: ReadMode,
}

/// Progress events emitted while stubbing, one per entry.
#[derive(Debug, Clone, PartialEq)]
pub enum StubEvent {
    Stubbed {
        relative: PathBuf,
        width: u32,
        height: u32,
        format: OutputFormat,
    },
    Directory {
        relative: PathBuf,
    },
    Failed {
        relative: PathBuf,
        message: String,
    },
    Skipped {
        relative: PathBuf,
    },
}

/// An entry that could not be stubbed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    pub relative: PathBuf,
    pub message: String,
}

/// Totals for one `stub` run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StubReport {
    pub stubbed: usize,
    pub directories: usize,
    pub skipped: usize,
    pub failures: Vec<ItemFailure>,
}

impl StubReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, event: &StubEvent) {
        match event {
            StubEvent::Stubbed { .. } => self.stubbed += 1,
            StubEvent::Directory { .. } => self.directories += 1,
            StubEvent::Skipped { .. } => self.skipped += 1,
            StubEvent::Failed { relative, message } => self.failures.push(ItemFailure {
                relative: relative.clone(),
                message: message.clone(),
            }),
        }
    }
}

/// Remove the output directory. Returns whether there was anything to remove.
pub fn clean(output: &Path) -> Result<bool, PipelineError> {
    if !output.exists() {
        return Ok(false);
    }
    log::info!("removing {}", output.display());
    std::fs::remove_dir_all(output)?;
    Ok(true)
}

/// Stub every entry under `source` into `output`.
pub fn stub(
    source: &Path,
    output: &Path,
    options: &StubOptions,
    events: Option<Sender<StubEvent>>,
) -> Result<StubReport, PipelineError> {
    let style = options.config.stub.to_style()?;
    let renderer = StubRenderer::new()
        .with_style(style)
        .with_quality(options.config.quality());
    stub_with_renderer(&renderer, source, output, options, events)
}

/// Stub using a specific renderer (allows testing with a mock codec).
pub fn stub_with_renderer<C: ImageCodec>(
    renderer: &StubRenderer<C>,
    source: &Path,
    output: &Path,
    options: &StubOptions,
    events: Option<Sender<StubEvent>>,
) -> Result<StubReport, PipelineError> {
    check_output_location(source, output)?;
    let entries = scan::scan(source)?;
    std::fs::create_dir_all(output)?;
    log::info!(
        "stubbing {} entries from {} into {}",
        entries.len(),
        source.display(),
        output.display()
    );

    let fail_fast = options.config.processing.fail_fast;
    let halted = AtomicBool::new(false);

    let outcomes: Vec<StubEvent> = entries
        .par_iter()
        .map_with(events, |events, entry| {
            let event = if fail_fast && halted.load(Ordering::Relaxed) {
                StubEvent::Skipped {
                    relative: entry.relative.clone(),
                }
            } else {
                let event = stub_entry(renderer, entry, source, output, options.read_mode);
                if matches!(event, StubEvent::Failed { .. }) {
                    halted.store(true, Ordering::Relaxed);
                }
                event
            };
            if let Some(tx) = events.as_ref() {
                // The receiver may have hung up; progress is best-effort.
                let _ = tx.send(event.clone());
            }
            event
        })
        .collect();

    let mut report = StubReport::default();
    for event in &outcomes {
        report.record(event);
    }
    Ok(report)
}

/// `clean` then `stub`.
pub fn build(
    source: &Path,
    output: &Path,
    options: &StubOptions,
    events: Option<Sender<StubEvent>>,
) -> Result<StubReport, PipelineError> {
    check_output_location(source, output)?;
    clean(output)?;
    stub(source, output, options, events)
}

/// Source and output trees must be disjoint. An output inside the source
/// would be scanned as input on the next run, and a source inside the output
/// would be deleted by `clean`.
fn check_output_location(source: &Path, output: &Path) -> Result<(), PipelineError> {
    let source = resolve_path(source)?;
    let output = resolve_path(output)?;
    if output.starts_with(&source) {
        return Err(PipelineError::OutputInsideSource(output));
    }
    if source.starts_with(&output) {
        return Err(PipelineError::SourceInsideOutput(source));
    }
    Ok(())
}

/// Canonicalize the longest existing prefix of `path` and append the rest
/// with `.` and `..` folded lexically.
fn resolve_path(path: &Path) -> std::io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    let existing = absolute
        .ancestors()
        .find(|ancestor| ancestor.exists())
        .unwrap_or(Path::new("/"));
    let mut resolved = existing.canonicalize()?;
    let rest = absolute.strip_prefix(existing).unwrap_or(Path::new(""));
    for component in rest.components() {
        match component {
            Component::ParentDir => {
                resolved.pop();
            }
            Component::CurDir => {}
            other => resolved.push(other),
        }
    }
    Ok(resolved)
}

fn stub_entry<C: ImageCodec>(
    renderer: &StubRenderer<C>,
    entry: &SourceEntry,
    source: &Path,
    output: &Path,
    read_mode: ReadMode,
) -> StubEvent {
    let relative = entry.relative.clone();
    match process_entry(renderer, entry, source, output, read_mode) {
        Ok(Outcome::PassedThrough) => StubEvent::Directory { relative },
        Ok(Outcome::Stubbed {
            width,
            height,
            format,
        }) => StubEvent::Stubbed {
            relative,
            width,
            height,
            format,
        },
        Err(err) => {
            log::warn!("{}: {}", relative.display(), err);
            StubEvent::Failed {
                relative,
                message: err.to_string(),
            }
        }
    }
}

fn process_entry<C: ImageCodec>(
    renderer: &StubRenderer<C>,
    entry: &SourceEntry,
    source: &Path,
    output: &Path,
    read_mode: ReadMode,
) -> Result<Outcome, ItemError> {
    let mut item = entry.load(source, read_mode)?;
    let outcome = renderer.process(&mut item)?;
    write_item(&item, &output.join(&entry.relative), entry.kind)?;
    Ok(outcome)
}

fn write_item(item: &ImageItem, destination: &Path, kind: EntryKind) -> std::io::Result<()> {
    match (&item.contents, kind) {
        (Contents::Buffer(bytes), _) => {
            if let Some(parent) = destination.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(destination, bytes)
        }
        (Contents::Null, EntryKind::Directory) => std::fs::create_dir_all(destination),
        // Null files and unread streams have nothing to write.
        _ => Ok(()),
    }
}
