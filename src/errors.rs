use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for corpus walks, evidence reads and name normalization.
///
/// `PathNotFound` and `NotADirectory` abort the operation that raised them.
/// `Read` and `UnparsableName` are per-item: callers log them and move on.
#[derive(Debug, Error)]
pub enum SiftError {
    #[error("path not found: {}", .0.display())]
    PathNotFound(PathBuf),
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot parse folder name '{0}': expected <base>_YYYYMMDD_HHMMSS")]
    UnparsableName(String),
    #[error("invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// Check that `path` exists and is a directory.
pub fn require_dir(path: &std::path::Path) -> Result<(), SiftError> {
    if !path.exists() {
        return Err(SiftError::PathNotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(SiftError::NotADirectory(path.to_path_buf()));
    }
    Ok(())
}
