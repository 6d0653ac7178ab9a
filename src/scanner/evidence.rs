//! Lenient evidence file loading
//!
//! Evidence files are produced by test harnesses and devices, so their bytes
//! are not guaranteed to be valid UTF-8. Invalid sequences are replaced with
//! U+FFFD rather than failing the read.

use crate::errors::SiftError;
use std::fs;
use std::io;
use std::path::Path;

/// Outcome of a successful evidence lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evidence {
    /// The file exists and was read in full
    Found(String),
    /// Nothing exists at the requested path
    NotFound,
}

/// Read a text file leniently.
///
/// Returns `Evidence::NotFound` when the path does not exist and
/// `SiftError::Read` for every other I/O failure (permission denied, a
/// directory in place of the file, ...). Never panics.
pub fn read_evidence(path: &Path) -> Result<Evidence, SiftError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Evidence::Found(String::from_utf8_lossy(&bytes).into_owned())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Evidence::NotFound),
        Err(source) => Err(SiftError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}
