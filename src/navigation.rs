// SPDX-License-Identifier: MPL-2.0
//! Navigation through the media files of one directory.
//!
//! Navigation is clamped: stepping past either end of the list does nothing.
//! The navigator only moves the cursor and reports the new path; loading that
//! path is the session's job.

use crate::directory_scanner::{build_index, MediaList};
use std::path::{Path, PathBuf};

/// Owns the media list and its cursor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MediaNavigator {
    media_list: MediaList,
}

impl MediaNavigator {
    /// Creates a navigator with nothing to navigate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_list(media_list: MediaList) -> Self {
        Self { media_list }
    }

    /// Replaces the list with the siblings of `current_file`.
    ///
    /// An unreadable directory leaves the navigator empty.
    pub fn scan_directory(&mut self, current_file: &Path) {
        self.media_list = build_index(current_file);
    }

    /// Returns the path under the cursor, if set.
    #[must_use]
    pub fn current_media_path(&self) -> Option<&Path> {
        self.media_list.current()
    }

    /// Moves to the next file and returns its path.
    ///
    /// Returns `None` without moving when the list is empty, the cursor is
    /// unset or already on the last file.
    pub fn navigate_next(&mut self) -> Option<PathBuf> {
        let index = self.media_list.current_index()?;
        let next_path = self.media_list.get(index + 1)?.to_path_buf();
        self.media_list.set_current_index(index + 1);
        Some(next_path)
    }

    /// Moves to the previous file and returns its path.
    ///
    /// Returns `None` without moving when the list is empty, the cursor is
    /// unset or already on the first file.
    pub fn navigate_previous(&mut self) -> Option<PathBuf> {
        let index = self.media_list.current_index()?.checked_sub(1)?;
        let prev_path = self.media_list.get(index)?.to_path_buf();
        self.media_list.set_current_index(index);
        Some(prev_path)
    }

    /// Checks if there is a next file available.
    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.media_list
            .current_index()
            .is_some_and(|idx| idx + 1 < self.media_list.len())
    }

    /// Checks if there is a previous file available.
    #[must_use]
    pub fn can_go_previous(&self) -> bool {
        self.media_list.current_index().is_some_and(|idx| idx > 0)
    }

    /// Returns the total number of files in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.media_list.len()
    }

    /// Checks if the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.media_list.is_empty()
    }

    /// Returns the cursor, if set.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.media_list.current_index()
    }
}
