//! Corpus traversal
//!
//! Enumerates run folders under a root in lexicographic path order, runs a
//! [`FolderPolicy`] on each, and buckets the verdicts. A failure in one folder
//! is recorded and the walk continues.

use super::classifier::FolderPolicy;
use super::types::{CancelFlag, FolderFailure, WalkReport};
use crate::errors::{SiftError, require_dir};
use std::path::PathBuf;
use std::time::Instant;
use walkdir::WalkDir;

/// Which directory names a walk selects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderFilter {
    /// Every directory
    All,
    /// Directories whose name starts with the prefix
    NamePrefix(String),
}

impl FolderFilter {
    pub fn matches(&self, name: &str) -> bool {
        match self {
            FolderFilter::All => true,
            FolderFilter::NamePrefix(prefix) => name.starts_with(prefix.as_str()),
        }
    }
}

/// How deep below the root folders are looked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkDepth {
    /// Immediate children of the root only
    Shallow,
    /// Every directory below the root, including ones nested in matches
    Recursive,
}

pub struct CorpusWalker {
    root: PathBuf,
    filter: FolderFilter,
    depth: WalkDepth,
    cancel: CancelFlag,
}

impl CorpusWalker {
    pub fn new(root: impl Into<PathBuf>, filter: FolderFilter, depth: WalkDepth) -> Self {
        Self {
            root: root.into(),
            filter,
            depth,
            cancel: CancelFlag::default(),
        }
    }

    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Matching folders in stable order
    pub fn folders(&self) -> Result<Vec<PathBuf>, SiftError> {
        require_dir(&self.root)?;

        let mut walker = WalkDir::new(&self.root)
            .min_depth(1)
            .sort_by_file_name();
        if self.depth == WalkDepth::Shallow {
            walker = walker.max_depth(1);
        }

        let mut folders = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Walk error under {}: {}", self.root.display(), e);
                    continue;
                }
            };
            if !entry.file_type().is_dir() {
                continue;
            }
            if self.filter.matches(&entry.file_name().to_string_lossy()) {
                folders.push(entry.into_path());
            }
        }
        folders.sort();
        Ok(folders)
    }

    /// Classify every matching folder with `policy`
    ///
    /// Fails only when the root is missing or not a directory; nothing is
    /// classified in that case.
    pub fn walk(&self, policy: &dyn FolderPolicy) -> Result<WalkReport, SiftError> {
        let start_time = Instant::now();
        let folders = self.folders()?;
        let mut report = WalkReport::new(&self.root, policy.name());

        tracing::info!(
            "Walking {} folder(s) under {} with {}",
            folders.len(),
            self.root.display(),
            policy.name()
        );

        for folder in folders {
            if self.cancel.is_cancelled() {
                tracing::warn!("Walk interrupted after {} folder(s)", report.folders_scanned);
                report.interrupted = true;
                break;
            }

            report.folders_scanned += 1;
            match policy.classify(&folder) {
                Ok(verdict) => {
                    tracing::debug!("{} -> {}", verdict.folder_name, verdict.kind.label());
                    report.record(verdict);
                }
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", folder.display(), e);
                    report.failures.push(FolderFailure {
                        folder_path: folder,
                        message: e.to_string(),
                    });
                }
            }
        }

        report.scan_duration_ms = start_time.elapsed().as_millis() as u64;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::classifier::{CrashPolicy, CrashPolicyConfig, MarkerPolicy};
    use crate::scanner::types::{Verdict, VerdictKind, VerdictReason};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn crash_corpus() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(&root.join("batch1/mac_sch_001/run.log"), "...beginning of crash...");
        write(&root.join("batch1/mac_sch_002/run.log"), "fatal signal 11");
        write(
            &root.join("batch1/mac_sch_002/docker_logs/events.1.txt"),
            "1/2 UE connected to eNB/gNB",
        );
        write(&root.join("batch2/mac_sch_003/run.log"), "clean");
        fs::create_dir_all(root.join("batch2/mac_sch_004")).unwrap();
        write(&root.join("batch2/other_005/run.log"), "FATAL ERROR");
        temp_dir
    }

    fn crash_walker(root: &Path) -> CorpusWalker {
        CorpusWalker::new(root, FolderFilter::NamePrefix("mac_sch".into()), WalkDepth::Recursive)
    }

    #[test]
    fn test_prefix_filter() {
        assert!(FolderFilter::NamePrefix("mac_sch".into()).matches("mac_sch_multi_1"));
        assert!(!FolderFilter::NamePrefix("mac_sch".into()).matches("xmac_sch"));
        assert!(FolderFilter::All.matches("anything"));
    }

    #[test]
    fn test_crash_walk_buckets() {
        let corpus = crash_corpus();
        let policy = CrashPolicy::new(CrashPolicyConfig::default()).unwrap();
        let report = crash_walker(corpus.path()).walk(&policy).unwrap();

        assert_eq!(report.folders_scanned, 4);
        assert_eq!(report.policy, "crash-without-recovery");
        let reported: Vec<_> = report
            .bucket(VerdictKind::FlagForReport)
            .iter()
            .map(|v| v.folder_name.as_str())
            .collect();
        assert_eq!(reported, vec!["mac_sch_001"]);
        assert_eq!(report.count(VerdictKind::Keep), 2);
        assert_eq!(report.count(VerdictKind::SkipNoEvidence), 1);
        assert_eq!(report.fired_count("crash-keyword"), 2);
        assert!(!report.interrupted);
    }

    #[test]
    fn test_marker_walk_is_shallow() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(&root.join("foo/sub/events.1.txt"), "[M] TX --> RRC Setup");
        write(&root.join("bar/events.1.txt"), "no setup");
        fs::create_dir_all(root.join("baz/empty")).unwrap();
        write(&root.join("loose.txt"), "not a folder");

        let walker = CorpusWalker::new(root, FolderFilter::All, WalkDepth::Shallow);
        let report = walker.walk(&MarkerPolicy::default()).unwrap();

        assert_eq!(report.folders_scanned, 3);
        assert_eq!(report.paths(VerdictKind::Keep), vec![root.join("foo")]);
        assert_eq!(report.paths(VerdictKind::FlagForDelete), vec![root.join("bar")]);
        assert_eq!(report.paths(VerdictKind::SkipNoEvidence), vec![root.join("baz")]);
    }

    #[test]
    fn test_walk_is_idempotent() {
        let corpus = crash_corpus();
        let policy = CrashPolicy::new(CrashPolicyConfig::default()).unwrap();
        let first = crash_walker(corpus.path()).walk(&policy).unwrap();
        let second = crash_walker(corpus.path()).walk(&policy).unwrap();
        assert_eq!(first.buckets, second.buckets);

        let marker_first = CorpusWalker::new(corpus.path(), FolderFilter::All, WalkDepth::Shallow)
            .walk(&MarkerPolicy::default())
            .unwrap();
        let marker_second = CorpusWalker::new(corpus.path(), FolderFilter::All, WalkDepth::Shallow)
            .walk(&MarkerPolicy::default())
            .unwrap();
        assert_eq!(marker_first.buckets, marker_second.buckets);
    }

    #[test]
    fn test_zero_matches_is_empty_report() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("unrelated")).unwrap();

        let report = crash_walker(temp_dir.path())
            .walk(&CrashPolicy::new(CrashPolicyConfig::default()).unwrap())
            .unwrap();
        assert_eq!(report.folders_scanned, 0);
        assert!(report.buckets.is_empty());
    }

    #[test]
    fn test_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");
        let result = crash_walker(&missing).walk(&MarkerPolicy::default());
        assert!(matches!(result, Err(SiftError::PathNotFound(_))));

        let file = temp_dir.path().join("file");
        fs::write(&file, "").unwrap();
        let result = crash_walker(&file).walk(&MarkerPolicy::default());
        assert!(matches!(result, Err(SiftError::NotADirectory(_))));
    }

    struct FailingPolicy;

    impl FolderPolicy for FailingPolicy {
        fn classify(&self, folder: &Path) -> Result<Verdict, SiftError> {
            if folder.ends_with("bad") {
                return Err(SiftError::Read {
                    path: folder.to_path_buf(),
                    source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
                });
            }
            Ok(Verdict::new(folder, VerdictKind::Keep, VerdictReason::TargetFound))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    #[test]
    fn test_per_folder_errors_do_not_abort() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["a", "bad", "c"] {
            fs::create_dir_all(temp_dir.path().join(name)).unwrap();
        }

        let report = CorpusWalker::new(temp_dir.path(), FolderFilter::All, WalkDepth::Shallow)
            .walk(&FailingPolicy)
            .unwrap();
        assert_eq!(report.folders_scanned, 3);
        assert_eq!(report.count(VerdictKind::Keep), 2);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].message.contains("denied"));
    }

    #[test]
    fn test_cancelled_walk_stops() {
        let corpus = crash_corpus();
        let cancel = CancelFlag::new();
        cancel.cancel();

        let report = crash_walker(corpus.path())
            .with_cancel(cancel)
            .walk(&CrashPolicy::new(CrashPolicyConfig::default()).unwrap())
            .unwrap();
        assert!(report.interrupted);
        assert_eq!(report.folders_scanned, 0);
    }

    #[test]
    fn test_unreadable_events_is_recorded_as_failure() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(&root.join("mac_sch_ok/run.log"), "fatal error");
        write(&root.join("mac_sch_broken/run.log"), "fatal error");
        // Reading a directory fails regardless of who runs the test
        fs::create_dir_all(root.join("mac_sch_broken/docker_logs/events.1.txt")).unwrap();

        let report = crash_walker(root)
            .walk(&CrashPolicy::new(CrashPolicyConfig::default()).unwrap())
            .unwrap();
        assert_eq!(report.folders_scanned, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].folder_path, root.join("mac_sch_broken"));
        assert_eq!(report.paths(VerdictKind::FlagForReport), vec![root.join("mac_sch_ok")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_is_never_planned_for_delete() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(&root.join("foo/events.1.txt"), "no setup here");
        write(&root.join("foo/locked/events.1.txt"), "[M] TX --> RRC Setup");
        write(&root.join("bar/events.1.txt"), "no setup here");
        let locked = root.join("foo/locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let readable = fs::read_dir(&locked).is_ok();
        let report = CorpusWalker::new(root, FolderFilter::All, WalkDepth::Shallow)
            .walk(&MarkerPolicy::default())
            .unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        // Permission bits do not apply to root
        if readable {
            return;
        }
        assert_eq!(report.paths(VerdictKind::FlagForDelete), vec![root.join("bar")]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].folder_path, root.join("foo"));
    }
}
