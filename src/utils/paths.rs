//! Path utilities for gomk

use std::path::{Path, PathBuf};

/// Find `file_name` in `start` or the nearest parent directory containing it
pub fn find_file_upwards(start: &Path, file_name: &str) -> Option<PathBuf> {
    let mut dir = start;
    loop {
        let candidate = dir.join(file_name);
        if candidate.is_file() {
            return Some(candidate);
        }

        match dir.parent() {
            Some(parent) => dir = parent,
            None => return None,
        }
    }
}
