//! File-level sweep planning
//!
//! Produces the list of files a cleanup step may delete. Nothing here
//! modifies the filesystem.

use super::evidence::{Evidence, read_evidence};
use super::predicates::Predicate;
use crate::errors::{SiftError, require_dir};
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Files selected for deletion by a sweep
#[derive(Debug, Default, Serialize)]
pub struct SweepPlan {
    pub root: PathBuf,
    /// Candidate files inspected
    pub checked: usize,
    /// Files to delete, sorted
    pub files: Vec<PathBuf>,
    /// Candidates that could not be read
    pub unreadable: Vec<PathBuf>,
}

/// Every file under `root` whose extension equals `extension` (no dot)
pub fn plan_extension_sweep(root: &Path, extension: &str) -> Result<SweepPlan, SiftError> {
    require_dir(root)?;

    let extension = extension.trim_start_matches('.');
    let files: Vec<PathBuf> = files_under(root)
        .filter(|path| has_extension(path, extension))
        .collect();

    tracing::info!("Found {} .{} file(s) under {}", files.len(), extension, root.display());
    Ok(SweepPlan {
        root: root.to_path_buf(),
        checked: files.len(),
        files,
        unreadable: Vec::new(),
    })
}

/// Every `*.<extension>` file under `root` whose content is blank
///
/// Zero-length files are selected without being read.
pub fn plan_blank_sweep(root: &Path, extension: &str) -> Result<SweepPlan, SiftError> {
    require_dir(root)?;

    let extension = extension.trim_start_matches('.');
    let mut plan = SweepPlan {
        root: root.to_path_buf(),
        ..Default::default()
    };

    for path in files_under(root).filter(|path| has_extension(path, extension)) {
        plan.checked += 1;

        let empty = path.metadata().map(|m| m.len() == 0).unwrap_or(false);
        if empty {
            tracing::debug!("Empty file: {}", path.display());
            plan.files.push(path);
            continue;
        }

        match read_evidence(&path) {
            Ok(Evidence::Found(content)) if Predicate::Blank.evaluate(&content) => {
                tracing::debug!("Whitespace-only file: {}", path.display());
                plan.files.push(path);
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("{}", e);
                plan.unreadable.push(path);
            }
        }
    }

    tracing::info!(
        "Checked {} .{} file(s), {} blank",
        plan.checked,
        extension,
        plan.files.len()
    );
    Ok(plan)
}

fn files_under(root: &Path) -> impl Iterator<Item = PathBuf> + '_ {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Walk error under {}: {}", root.display(), e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(path: &Path, content: &[u8]) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_extension_sweep() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(&root.join("a/capture.pcapng"), b"\x0a\x0d\x0d\x0a");
        write(&root.join("b/c/other.pcapng"), b"");
        write(&root.join("b/notes.txt"), b"keep");
        write(&root.join("b/pcapng"), b"no extension");

        let plan = plan_extension_sweep(root, ".pcapng").unwrap();
        assert_eq!(
            plan.files,
            vec![root.join("a/capture.pcapng"), root.join("b/c/other.pcapng")]
        );
        assert_eq!(plan.checked, 2);
    }

    #[test]
    fn test_blank_sweep() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(&root.join("empty.txt"), b"");
        write(&root.join("spaces.txt"), b"  \n\t \r\n");
        write(&root.join("deep/data.txt"), b"events");
        write(&root.join("deep/blank.log"), b"");

        let plan = plan_blank_sweep(root, "txt").unwrap();
        assert_eq!(plan.checked, 3);
        assert_eq!(plan.files, vec![root.join("empty.txt"), root.join("spaces.txt")]);
        assert!(plan.unreadable.is_empty());
    }

    #[test]
    fn test_sweeps_require_directory() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");
        assert!(matches!(plan_extension_sweep(&missing, "pcapng"), Err(SiftError::PathNotFound(_))));

        let file = temp_dir.path().join("f.txt");
        fs::write(&file, "").unwrap();
        assert!(matches!(plan_blank_sweep(&file, "txt"), Err(SiftError::NotADirectory(_))));
    }
}
