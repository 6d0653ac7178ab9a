//! Applying cleanup plans
//!
//! The only module that deletes anything. Each path is attempted once; a
//! failure is recorded and the rest of the plan still runs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct CleanupOutcome {
    pub deleted: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, io::Error)>,
}

impl CleanupOutcome {
    pub fn deleted_count(&self) -> usize {
        self.deleted.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }
}

/// Remove each file in `paths`
pub fn delete_files<P: AsRef<Path>>(paths: &[P]) -> CleanupOutcome {
    apply(paths, |path| fs::remove_file(path))
}

/// Remove each directory tree in `paths`
pub fn delete_trees<P: AsRef<Path>>(paths: &[P]) -> CleanupOutcome {
    apply(paths, |path| fs::remove_dir_all(path))
}

fn apply<P, F>(paths: &[P], remove: F) -> CleanupOutcome
where
    P: AsRef<Path>,
    F: Fn(&Path) -> io::Result<()>,
{
    let mut outcome = CleanupOutcome::default();

    for path in paths {
        let path = path.as_ref();
        match remove(path) {
            Ok(()) => {
                tracing::debug!("Deleted: {}", path.display());
                outcome.deleted.push(path.to_path_buf());
            }
            Err(e) => {
                tracing::warn!("Failed to delete {}: {}", path.display(), e);
                outcome.failed.push((path.to_path_buf(), e));
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_delete_files_continues_after_failure() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.pcapng");
        let b = temp_dir.path().join("b.pcapng");
        fs::write(&a, "x").unwrap();
        fs::write(&b, "y").unwrap();
        let missing = temp_dir.path().join("missing.pcapng");

        let outcome = delete_files(&[a.clone(), missing.clone(), b.clone()]);
        assert_eq!(outcome.deleted, vec![a.clone(), b.clone()]);
        assert_eq!(outcome.failed_count(), 1);
        assert_eq!(outcome.failed[0].0, missing);
        assert!(!a.exists() && !b.exists());
    }

    #[test]
    fn test_delete_trees() {
        let temp_dir = TempDir::new().unwrap();
        let tree = temp_dir.path().join("bar");
        fs::create_dir_all(tree.join("docker_logs")).unwrap();
        fs::write(tree.join("docker_logs/events.1.txt"), "no").unwrap();

        let outcome = delete_trees(&[&tree]);
        assert_eq!(outcome.deleted_count(), 1);
        assert!(!tree.exists());
        assert!(temp_dir.path().exists());
    }
}
