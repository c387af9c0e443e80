//! Source tree discovery.
//!
//! Walks the source directory the way a `source/**/*` glob would: every file
//! and directory below the root, depth-first in file-name order, skipping
//! anything whose name starts with a dot (and everything beneath it).
//!
//! ```text
//! images/                 # source root (not itself an entry)
//! ├── 010-Landscapes/     → Directory
//! │   ├── 001-dawn.jpg    → File
//! │   └── 002-dusk.png    → File
//! ├── logo.svg            → File (fails later: not JPEG/PNG)
//! └── .DS_Store           (skipped)
//! ```
//!
//! Scanning only lists entries. File contents are read by
//! [`SourceEntry::load`] when an entry is about to be processed, so large
//! trees never sit in memory all at once.

use crate::stub::ImageItem;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Source directory not found: {0}")]
    SourceNotFound(PathBuf),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// How file contents are handed to the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadMode {
    /// Read the whole file into memory.
    #[default]
    Buffer,
    /// Hand over an open file handle.
    Stream,
}

/// One discovered entry, relative to the source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub relative: PathBuf,
    pub kind: EntryKind,
}

impl SourceEntry {
    /// Open this entry under `root` as an item for the renderer.
    ///
    /// Directories carry no contents.
    pub fn load(&self, root: &Path, mode: ReadMode) -> std::io::Result<ImageItem> {
        let path = root.join(&self.relative);
        let item = match (self.kind, mode) {
            (EntryKind::Directory, _) => ImageItem::null(path),
            (EntryKind::File, ReadMode::Buffer) => {
                let bytes = std::fs::read(&path)?;
                ImageItem::buffer(path, bytes)
            }
            (EntryKind::File, ReadMode::Stream) => {
                let reader = BufReader::new(File::open(&path)?);
                ImageItem::stream(path, reader)
            }
        };
        Ok(item)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

/// List every non-hidden entry below `source`.
pub fn scan(source: &Path) -> Result<Vec<SourceEntry>, ScanError> {
    if !source.is_dir() {
        return Err(ScanError::SourceNotFound(source.to_path_buf()));
    }

    let mut entries = Vec::new();
    let walker = WalkDir::new(source)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e));

    for entry in walker {
        let entry = entry?;
        let kind = if entry.file_type().is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        let relative = entry
            .path()
            .strip_prefix(source)
            .unwrap_or(entry.path())
            .to_path_buf();
        entries.push(SourceEntry { relative, kind });
    }

    log::debug!("scanned {}: {} entries", source.display(), entries.len());
    Ok(entries)
}
