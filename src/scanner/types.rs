use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Classification outcome bucket for one folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerdictKind {
    SkipNoEvidence,
    Keep,
    FlagForReport,
    FlagForDelete,
}

impl VerdictKind {
    pub fn label(&self) -> &'static str {
        match self {
            VerdictKind::SkipNoEvidence => "skip-no-evidence",
            VerdictKind::Keep => "keep",
            VerdictKind::FlagForReport => "flag-for-report",
            VerdictKind::FlagForDelete => "flag-for-delete",
        }
    }
}

/// Why a policy reached its verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "kebab-case")]
pub enum VerdictReason {
    /// No `*.log` at the folder top level
    NoLog,
    /// More than one `*.log` at the folder top level; none was picked
    AmbiguousLog { candidates: Vec<PathBuf> },
    /// The run log shows no crash
    NoCrash,
    /// Crash in the run log, but the UE connected anyway
    ConnectionRecovered,
    /// Crash in the run log and no connection marker
    CrashWithoutRecovery,
    /// No `events.1.txt` anywhere under the folder
    NoEventsFile,
    /// An events file contains the target string
    TargetFound,
    /// No events file contains the target string
    TargetMissing,
}

/// Verdict for one folder. Built once by a policy and never changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub folder_name: String,
    pub folder_path: PathBuf,
    pub kind: VerdictKind,
    #[serde(flatten)]
    pub reason: VerdictReason,
    /// Evidence files that decided the verdict, in the order they were read
    pub evidence: Vec<PathBuf>,
    /// Names of the predicates that evaluated to true
    pub fired: Vec<&'static str>,
}

impl Verdict {
    pub fn new(folder: &Path, kind: VerdictKind, reason: VerdictReason) -> Self {
        Self {
            folder_name: folder_name(folder),
            folder_path: folder.to_path_buf(),
            kind,
            reason,
            evidence: Vec::new(),
            fired: Vec::new(),
        }
    }

    pub fn with_evidence(mut self, path: impl Into<PathBuf>) -> Self {
        self.evidence.push(path.into());
        self
    }

    pub fn with_fired(mut self, predicate: &'static str) -> Self {
        self.fired.push(predicate);
        self
    }

    /// File name of the first evidence file (the run log for crash verdicts)
    pub fn primary_evidence_name(&self) -> Option<String> {
        self.evidence
            .first()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
    }
}

/// A folder that could not be classified
#[derive(Debug, Serialize)]
pub struct FolderFailure {
    pub folder_path: PathBuf,
    pub message: String,
}

/// Aggregated result of one corpus walk
#[derive(Debug, Default, Serialize)]
pub struct WalkReport {
    pub root: PathBuf,
    pub policy: String,
    /// Number of folders that matched the filter and were visited
    pub folders_scanned: usize,
    pub buckets: BTreeMap<VerdictKind, Vec<Verdict>>,
    pub failures: Vec<FolderFailure>,
    /// The walk stopped early on user request
    pub interrupted: bool,
    pub scan_duration_ms: u64,
}

impl WalkReport {
    pub fn new(root: &Path, policy: &str) -> Self {
        Self {
            root: root.to_path_buf(),
            policy: policy.to_string(),
            ..Default::default()
        }
    }

    pub fn record(&mut self, verdict: Verdict) {
        self.buckets.entry(verdict.kind).or_default().push(verdict);
    }

    pub fn bucket(&self, kind: VerdictKind) -> &[Verdict] {
        self.buckets.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, kind: VerdictKind) -> usize {
        self.bucket(kind).len()
    }

    /// Folder paths in a bucket, i.e. the plan handed to a cleanup step
    pub fn paths(&self, kind: VerdictKind) -> Vec<PathBuf> {
        self.bucket(kind).iter().map(|v| v.folder_path.clone()).collect()
    }

    /// Verdicts in which the named predicate fired, across all buckets
    pub fn fired_count(&self, predicate: &str) -> usize {
        self.buckets
            .values()
            .flatten()
            .filter(|v| v.fired.iter().any(|fired| *fired == predicate))
            .count()
    }
}

/// Shared stop request, set from the Ctrl-C handler and polled by walks
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub(crate) fn folder_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
