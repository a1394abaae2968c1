//! Plugin discovery: lists candidate files under the plugin directory.

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

/// Returns every regular file below `dir`, recursively, in file-name order.
///
/// No extension filtering happens here; the loader decides what is a
/// module. An unreadable root yields an empty list, unreadable entries
/// below it are skipped. Both are logged.
pub fn find_files(dir: impl AsRef<Path>) -> Vec<PathBuf> {
    let dir = dir.as_ref();

    if let Err(e) = std::fs::read_dir(dir) {
        warn!(path = %dir.display(), error = %e, "Cannot open plugin directory");
        return Vec::new();
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        match entry {
            Ok(entry) if entry.file_type().is_file() => files.push(entry.into_path()),
            Ok(_) => {}
            Err(e) => {
                let path = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                warn!(path = %path, error = %e, "Skipping unreadable entry");
            }
        }
    }
    files
}
