//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};

use glob::{glob, Pattern};

use crate::errors::{ExtractError, Result};

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| ExtractError::fs("create directory", path, e))?;
    }
    Ok(())
}

/// Read a file into memory.
pub fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| ExtractError::fs("read file", path, e))
}

/// Read a file to string.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| ExtractError::fs("read file", path, e))
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    tracing::debug!("writing {}", path.display());
    fs::write(path, contents).map_err(|e| ExtractError::fs("write file", path, e))
}

/// Find files in `dir` whose names match `pattern` (e.g. `index-*.json`).
///
/// Only `pattern` is glob syntax; `dir` is matched literally. Results are
/// sorted. A missing directory yields no matches.
pub fn glob_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full_pattern = Path::new(&Pattern::escape(&dir.to_string_lossy())).join(pattern);
    let pattern_str = full_pattern.to_string_lossy();

    let entries = glob(&pattern_str).map_err(|e| {
        ExtractError::fs(
            "search",
            &full_pattern,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, e.msg),
        )
    })?;

    let mut results = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => {
                if path.is_file() {
                    results.push(path);
                }
            }
            Err(e) => {
                tracing::warn!("glob error: {}", e);
            }
        }
    }

    results.sort();
    Ok(results)
}
