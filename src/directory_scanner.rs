// SPDX-License-Identifier: MPL-2.0
//! Directory scanner module for finding the sibling media files of an opened file.
//!
//! The parent directory is read once, non-recursively. Entries keep the order
//! in which the filesystem yields them; no sort is applied.

use crate::error::{Error, Result};
use crate::media;
use std::path::{Path, PathBuf};

/// The media files of one directory plus the position of the opened file.
///
/// The file list never changes after the scan. Only the cursor moves.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MediaList {
    media_files: Vec<PathBuf>,
    current_index: Option<usize>,
}

impl MediaList {
    /// Creates a new empty MediaList.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from already known paths, in the given order.
    ///
    /// Unsupported paths and repeated paths are dropped.
    #[must_use]
    pub fn from_paths(paths: Vec<PathBuf>, current: Option<&Path>) -> Self {
        let mut media_files: Vec<PathBuf> = Vec::with_capacity(paths.len());
        for path in paths {
            if media::is_supported_media(&path) && !media_files.contains(&path) {
                media_files.push(path);
            }
        }
        let current_index = current.and_then(|c| media_files.iter().position(|p| p == c));
        Self {
            media_files,
            current_index,
        }
    }

    /// Scans the parent directory of `current_file` for supported media.
    ///
    /// If the current file no longer exists, the scan still succeeds but the
    /// cursor is unset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DirectoryUnreadable`] if the directory cannot be listed.
    pub fn scan_directory(current_file: &Path) -> Result<Self> {
        let parent = match current_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let entries = std::fs::read_dir(parent).map_err(|e| {
            Error::DirectoryUnreadable(format!("{}: {}", parent.display(), e))
        })?;

        let media_files = collect_media(entries.map(|entry| entry.map(|e| e.path())));

        // Entries are siblings, so the file name identifies the opened file
        // whether it was given as a relative or an absolute path.
        let current_index = current_file
            .file_name()
            .and_then(|name| media_files.iter().position(|p| p.file_name() == Some(name)));

        Ok(Self {
            media_files,
            current_index,
        })
    }

    /// Returns the current media path.
    #[must_use]
    pub fn current(&self) -> Option<&Path> {
        self.current_index
            .and_then(|idx| self.media_files.get(idx))
            .map(PathBuf::as_path)
    }

    /// Returns the current index if set.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Moves the cursor. Out-of-range indices are ignored.
    pub fn set_current_index(&mut self, index: usize) {
        if index < self.media_files.len() {
            self.current_index = Some(index);
        }
    }

    /// Returns the path at the specified index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Path> {
        self.media_files.get(index).map(PathBuf::as_path)
    }

    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.media_files
    }

    /// Returns the total number of media files in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.media_files.len()
    }

    /// Checks if the media list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.media_files.is_empty()
    }
}

/// Keeps the supported media files among listed entries, in listing order.
///
/// An entry that cannot be read is skipped; the rest of the listing is kept.
fn collect_media<I>(entries: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = std::io::Result<PathBuf>>,
{
    entries
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(err) => {
                tracing::debug!("skipping unreadable directory entry: {}", err);
                None
            }
        })
        .filter(|path| path.is_file() && media::is_supported_media(path))
        .collect()
}

/// Builds the navigation index for a file opened from the command line.
///
/// An unreadable directory is not fatal: the result is an empty list and the
/// session simply has nothing to navigate to.
#[must_use]
pub fn build_index(starting_file: &Path) -> MediaList {
    match MediaList::scan_directory(starting_file) {
        Ok(list) => {
            tracing::debug!(
                count = list.len(),
                cursor = ?list.current_index(),
                "scanned {}",
                starting_file.display()
            );
            list
        }
        Err(err) => {
            tracing::warn!("Navigation disabled: {}", err);
            MediaList::new()
        }
    }
}
