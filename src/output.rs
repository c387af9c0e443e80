//! CLI output formatting for the stub tasks.
//!
//! One line per source entry, tagged by what happened to it, followed by a
//! summary once the task finishes:
//!
//! ```text
//! dir   photos
//! stub  photos/001-dawn.png (640x480 PNG)
//! stub  photos/002-dusk.JPG (300x200 JPEG)
//! FAIL  anim.gif: StubImage: File type not supported
//!
//! Stubbed 2 images, 1 directory, 1 failed
//! ```
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::pipeline::{StubEvent, StubReport};
use crate::stub::PLUGIN_NAME;
use std::path::Path;

/// Display a relative path with forward slashes on every platform.
fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

// ============================================================================
// Per-entry events
// ============================================================================

/// Format a single stub progress event as display lines.
pub fn format_stub_event(event: &StubEvent) -> Vec<String> {
    let line = match event {
        StubEvent::Stubbed {
            relative,
            width,
            height,
            format,
        } => format!(
            "stub  {} ({}x{} {})",
            display_path(relative),
            width,
            height,
            format
        ),
        StubEvent::Directory { relative } => format!("dir   {}", display_path(relative)),
        StubEvent::Failed { relative, message } => format!(
            "FAIL  {}: {}: {}",
            display_path(relative),
            PLUGIN_NAME,
            message
        ),
        StubEvent::Skipped { relative } => format!("skip  {}", display_path(relative)),
    };
    vec![line]
}

// ============================================================================
// Summary
// ============================================================================

/// Format the closing summary of a stub run.
///
/// Failures are repeated under the summary so they are not lost in a long
/// event stream.
pub fn format_report(report: &StubReport) -> Vec<String> {
    let mut parts = vec![
        plural(report.stubbed, "image", "images"),
        plural(report.directories, "directory", "directories"),
    ];
    if !report.failures.is_empty() {
        parts.push(format!("{} failed", report.failures.len()));
    }
    if report.skipped > 0 {
        parts.push(format!("{} skipped", report.skipped));
    }

    let mut lines = vec![format!("Stubbed {}", parts.join(", "))];
    if !report.failures.is_empty() {
        lines.push("Failures:".to_string());
        for failure in &report.failures {
            lines.push(format!(
                "    {}: {}",
                display_path(&failure.relative),
                failure.message
            ));
        }
    }
    lines
}

pub fn print_report(report: &StubReport) {
    for line in format_report(report) {
        println!("{}", line);
    }
}

/// Format the result of a `clean` task.
pub fn format_clean(output: &Path, removed: bool) -> String {
    if removed {
        format!("Removed {}", output.display())
    } else {
        format!("Nothing to clean at {}", output.display())
    }
}
