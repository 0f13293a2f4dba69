// SPDX-License-Identifier: MPL-2.0
//! Shared test helpers: float assertions and on-disk media fixtures.

pub use approx::assert_abs_diff_eq;

use std::fs;
use std::path::{Path, PathBuf};

/// Tolerance for positions and durations expressed in seconds.
pub const SECS_EPSILON: f64 = 1e-9;

/// Writes empty placeholder files named `names` into `dir`, in order.
///
/// The contents are irrelevant to the scanner, which only looks at names.
pub fn touch_all(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let path = dir.join(name);
            fs::write(&path, b"").expect("failed to create fixture file");
            path
        })
        .collect()
}
