//! Folder classification policies
//!
//! A policy reads a folder's evidence files, runs predicates over them and
//! produces exactly one [`Verdict`]. Policies never touch the filesystem
//! beyond reading.
//!
//! ## Crash policy
//!
//! ```text
//! <folder>/*.log            none      -> skip-no-evidence (no-log)
//!                           several   -> skip-no-evidence (ambiguous-log)
//!                           no crash  -> keep (no-crash)
//! docker_logs/events.1.txt  connected -> keep (connection-recovered)
//!                           otherwise -> flag-for-report
//! ```
//!
//! ## Marker policy
//!
//! ```text
//! **/events.1.txt           none      -> skip-no-evidence
//!                           any hit   -> keep (stops at first hit)
//!                           no hit    -> flag-for-delete
//! ```

use super::evidence::{Evidence, read_evidence};
use super::predicates::{CONNECTION_SUCCESS_MARKER, CRASH_KEYWORDS, Predicate, RRC_SETUP_MARKER};
use super::types::{Verdict, VerdictKind, VerdictReason};
use crate::errors::SiftError;
use globset::{Glob, GlobMatcher};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Classification policy applied to one folder at a time
pub trait FolderPolicy {
    /// Classify a single folder
    ///
    /// Errors are per-folder; walkers record them and continue.
    fn classify(&self, folder: &Path) -> Result<Verdict, SiftError>;

    /// Get the name of this policy for logging and reports
    fn name(&self) -> &'static str;
}

/// Settings for [`CrashPolicy`]
#[derive(Debug, Clone)]
pub struct CrashPolicyConfig {
    pub log_glob: String,
    pub events_path: PathBuf,
    pub keywords: Vec<String>,
    pub connection_marker: String,
}

impl Default for CrashPolicyConfig {
    fn default() -> Self {
        Self {
            log_glob: "*.log".to_string(),
            events_path: PathBuf::from("docker_logs").join("events.1.txt"),
            keywords: CRASH_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            connection_marker: CONNECTION_SUCCESS_MARKER.to_string(),
        }
    }
}

/// Finds runs that crashed and never recovered a connection
pub struct CrashPolicy {
    log_matcher: GlobMatcher,
    events_path: PathBuf,
    crash: Predicate,
    connected: Predicate,
}

impl CrashPolicy {
    pub fn new(config: CrashPolicyConfig) -> Result<Self, SiftError> {
        Ok(Self {
            log_matcher: compile_glob(&config.log_glob)?,
            events_path: config.events_path,
            crash: Predicate::any_keyword("crash-keyword", config.keywords),
            connected: Predicate::marker("connection-success", config.connection_marker),
        })
    }

    /// Top-level files of `folder` whose name matches the log glob, sorted
    fn find_logs(&self, folder: &Path) -> Result<Vec<PathBuf>, SiftError> {
        let entries = fs::read_dir(folder).map_err(|source| SiftError::Read {
            path: folder.to_path_buf(),
            source,
        })?;

        let mut logs = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| SiftError::Read {
                path: folder.to_path_buf(),
                source,
            })?;
            let is_file = entry.file_type().map(|ft| ft.is_file()).unwrap_or(false);
            if is_file && self.log_matcher.is_match(entry.file_name()) {
                logs.push(entry.path());
            }
        }
        logs.sort();
        Ok(logs)
    }
}

impl FolderPolicy for CrashPolicy {
    fn classify(&self, folder: &Path) -> Result<Verdict, SiftError> {
        let mut logs = self.find_logs(folder)?;

        let log = match logs.len() {
            0 => {
                tracing::warn!("No .log file found in {}", folder.display());
                return Ok(Verdict::new(folder, VerdictKind::SkipNoEvidence, VerdictReason::NoLog));
            }
            1 => logs.remove(0),
            n => {
                tracing::warn!("{} .log files found in {}, refusing to pick one", n, folder.display());
                return Ok(Verdict::new(
                    folder,
                    VerdictKind::SkipNoEvidence,
                    VerdictReason::AmbiguousLog { candidates: logs },
                ));
            }
        };

        let content = match read_evidence(&log)? {
            Evidence::Found(content) => content,
            // Removed between listing and reading
            Evidence::NotFound => {
                tracing::warn!("Log file vanished: {}", log.display());
                return Ok(Verdict::new(folder, VerdictKind::SkipNoEvidence, VerdictReason::NoLog));
            }
        };

        if !self.crash.evaluate(&content) {
            tracing::trace!("No crash keywords in {}", log.display());
            return Ok(Verdict::new(folder, VerdictKind::Keep, VerdictReason::NoCrash).with_evidence(log));
        }
        tracing::info!("Crash found in {}", log.display());

        let events = folder.join(&self.events_path);
        let connected = match read_evidence(&events)? {
            Evidence::Found(content) => self.connected.evaluate(&content),
            Evidence::NotFound => false,
        };

        let verdict = Verdict::new(
            folder,
            if connected { VerdictKind::Keep } else { VerdictKind::FlagForReport },
            if connected {
                VerdictReason::ConnectionRecovered
            } else {
                VerdictReason::CrashWithoutRecovery
            },
        )
        .with_evidence(log)
        .with_evidence(events)
        .with_fired(self.crash.name());

        Ok(if connected {
            tracing::debug!("Skipping {} (UE connected)", verdict.folder_name);
            verdict.with_fired(self.connected.name())
        } else {
            tracing::debug!("Reporting {} (no UE connection)", verdict.folder_name);
            verdict
        })
    }

    fn name(&self) -> &'static str {
        "crash-without-recovery"
    }
}

/// Keeps folders whose event transcripts contain a target string
pub struct MarkerPolicy {
    evidence_name: String,
    target: Predicate,
}

impl MarkerPolicy {
    pub fn new(evidence_name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            evidence_name: evidence_name.into(),
            target: Predicate::marker("target-string", target),
        }
    }

    /// All files named exactly `evidence_name` anywhere under `folder`, sorted
    ///
    /// Directories that cannot be listed are returned as errors alongside
    /// the files that were found.
    fn find_evidence(&self, folder: &Path) -> (Vec<PathBuf>, Vec<SiftError>) {
        let mut files = Vec::new();
        let mut errors = Vec::new();

        for entry in WalkDir::new(folder).sort_by_file_name() {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() && entry.file_name() == self.evidence_name.as_str() {
                        files.push(entry.into_path());
                    }
                }
                Err(e) => {
                    tracing::warn!("Walk error under {}: {}", folder.display(), e);
                    errors.push(walk_error(folder, e));
                }
            }
        }

        (files, errors)
    }
}

fn walk_error(folder: &Path, error: walkdir::Error) -> SiftError {
    let path = error.path().unwrap_or(folder).to_path_buf();
    SiftError::Read {
        path,
        source: error.into(),
    }
}

impl Default for MarkerPolicy {
    fn default() -> Self {
        Self::new("events.1.txt", RRC_SETUP_MARKER)
    }
}

impl FolderPolicy for MarkerPolicy {
    fn classify(&self, folder: &Path) -> Result<Verdict, SiftError> {
        let (files, walk_errors) = self.find_evidence(folder);
        let mut last_error = walk_errors.into_iter().last();

        if files.is_empty() {
            if let Some(e) = last_error {
                return Err(e);
            }
            tracing::info!("No {} found in {}", self.evidence_name, folder.display());
            return Ok(Verdict::new(folder, VerdictKind::SkipNoEvidence, VerdictReason::NoEventsFile));
        }

        for file in &files {
            match read_evidence(file) {
                Ok(Evidence::Found(content)) => {
                    if self.target.evaluate(&content) {
                        tracing::debug!("Target string found in {}", file.display());
                        return Ok(Verdict::new(folder, VerdictKind::Keep, VerdictReason::TargetFound)
                            .with_evidence(file)
                            .with_fired(self.target.name()));
                    }
                }
                Ok(Evidence::NotFound) => {}
                Err(e) => {
                    tracing::warn!("{}", e);
                    last_error = Some(e);
                }
            }
        }

        // Unreadable evidence must not turn into a delete
        if let Some(e) = last_error {
            return Err(e);
        }

        tracing::debug!("Target string missing from every {} in {}", self.evidence_name, folder.display());
        let mut verdict = Verdict::new(folder, VerdictKind::FlagForDelete, VerdictReason::TargetMissing);
        verdict.evidence = files;
        Ok(verdict)
    }

    fn name(&self) -> &'static str {
        "content-membership"
    }
}

pub(crate) fn compile_glob(pattern: &str) -> Result<GlobMatcher, SiftError> {
    Glob::new(pattern)
        .map(|glob| glob.compile_matcher())
        .map_err(|source| SiftError::Pattern {
            pattern: pattern.to_string(),
            source,
        })
}
