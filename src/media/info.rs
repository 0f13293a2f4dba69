// SPDX-License-Identifier: MPL-2.0
//! File information summary for the "information" affordance.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

const NOT_AVAILABLE: &str = "not available";

/// Basic facts about the displayed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaInfo {
    pub file_name: String,
    pub path: PathBuf,
    pub size_bytes: Option<u64>,
    pub dimensions: Option<(u32, u32)>,
}

impl MediaInfo {
    /// Gathers file facts. Filesystem errors leave the size unknown.
    #[must_use]
    pub fn collect(path: &Path, dimensions: Option<(u32, u32)>) -> Self {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let size_bytes = fs::metadata(path).ok().map(|meta| meta.len());

        Self {
            file_name,
            path: path.to_path_buf(),
            size_bytes,
            dimensions,
        }
    }
}

impl fmt::Display for MediaInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Filename: {}", self.file_name)?;
        writeln!(f, "Path: {}", self.path.display())?;
        match self.dimensions {
            Some((w, h)) => writeln!(f, "Resolution: {} x {}", w, h)?,
            None => writeln!(f, "Resolution: {}", NOT_AVAILABLE)?,
        }
        match self.size_bytes {
            Some(bytes) => write!(f, "File Size: {} bytes", group_thousands(bytes)),
            None => write!(f, "File Size: {}", NOT_AVAILABLE),
        }
    }
}

/// Formats an integer with comma thousands separators.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
