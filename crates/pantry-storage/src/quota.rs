// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-side quota advisor.
//!
//! Reports an approximate footprint without ever failing: files that cannot
//! be statted count as zero, and an in-memory database reports `None`.

use std::fs;
use std::path::{Path, PathBuf};

use pantry_core::StorageEstimate;

/// Approximate on-disk footprint of the store: the main database file, its
/// WAL/SHM sidecars, and the media handle scratch directory.
///
/// `None` when the database has no backing file.
pub fn estimate(
    db_path: Option<&Path>,
    scratch_root: &Path,
    quota_bytes: u64,
) -> Option<StorageEstimate> {
    let db_path = db_path?;
    let usage_bytes = file_size(db_path)
        + file_size(&with_suffix(db_path, "-wal"))
        + file_size(&with_suffix(db_path, "-shm"))
        + dir_size(scratch_root);
    Some(StorageEstimate {
        usage_bytes,
        quota_bytes,
    })
}

fn file_size(path: &Path) -> u64 {
    fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

// Recurses into the per-item handle subdirectories.
fn dir_size(path: &Path) -> u64 {
    let Ok(entries) = fs::read_dir(path) else {
        return 0;
    };
    entries
        .flatten()
        .map(|entry| match entry.metadata() {
            Ok(meta) if meta.is_file() => meta.len(),
            Ok(meta) if meta.is_dir() => dir_size(&entry.path()),
            _ => 0,
        })
        .sum()
}

/// `"pantry.db"` with `"-wal"` becomes `"pantry.db-wal"`, matching SQLite's
/// sidecar naming.
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push(suffix);
    PathBuf::from(os)
}
