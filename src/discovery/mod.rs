//! Python source discovery.
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::error::IoError;

pub const FILE_EXTENSION: &str = "py";

pub const EXCLUDED_DIRS: &[&str] = &[
    ".git",
    "__pycache__",
    ".pytest_cache",
    ".tox",
    ".venv",
    "venv",
    "node_modules",
];

/// Expands the given paths into the Python files to analyze.
///
/// Files are taken as given, whatever their extension. Directories are
/// walked for `*.py`, skipping excluded and hidden directories. The result
/// is sorted and free of duplicates.
pub fn collect_python_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, IoError> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            files.extend(walk_source_files(path, FILE_EXTENSION, EXCLUDED_DIRS, true)?);
        } else {
            return Err(IoError::file_not_found(path));
        }
    }

    files.sort();
    files.dedup();
    debug!(count = files.len(), "collected python files");
    Ok(files)
}

pub fn walk_source_files(
    root: &Path,
    extension: &str,
    excluded_dirs: &[&str],
    exclude_hidden: bool,
) -> Result<Vec<PathBuf>, IoError> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root).into_iter().filter_entry(|e| {
        // the root itself is always walked, even when named like an excluded dir
        if e.depth() == 0 || !e.file_type().is_dir() {
            return true;
        }
        let name = e.file_name().to_string_lossy();
        if exclude_hidden && name.starts_with('.') {
            return false;
        }
        !excluded_dirs.contains(&name.as_ref())
    });

    for entry in walker {
        let entry = entry.map_err(|e| IoError::directory_scan_error(root, e))?;

        if !entry.file_type().is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy();
        if exclude_hidden && file_name.starts_with('.') {
            continue;
        }
        if entry.path().extension().is_some_and(|ext| ext == extension) {
            trace!(path = %entry.path().display(), "found source file");
            files.push(entry.path().to_path_buf());
        }
    }

    Ok(files)
}
