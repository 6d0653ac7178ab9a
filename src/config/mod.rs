//! Configuration management for runsift
//!
//! Defaults are embedded from `default-config.toml` and layered with user and
//! project files plus `RUNSIFT_*` environment variables using figment.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scanner::{CrashPolicy, CrashPolicyConfig, MarkerPolicy};

mod core;

pub use self::core::CliOverrides;

/// Main configuration structure for runsift
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiftConfig {
    pub general: GeneralConfig,
    /// Crash-without-recovery scan
    pub crash: CrashConfig,
    /// Marker-based folder pruning
    pub marker: MarkerConfig,
    /// File-level sweeps
    pub sweep: SweepConfig,
    /// Payload name extraction
    pub names: NamesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Corpus root used when no path is given
    pub default_root: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrashConfig {
    /// Only directories whose name starts with this are scanned
    pub folder_prefix: String,
    pub log_glob: String,
    /// Events transcript, relative to the run folder
    pub events_path: PathBuf,
    pub keywords: Vec<String>,
    pub connection_marker: String,
    pub report_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerConfig {
    pub evidence_name: String,
    pub target: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    pub binary_extension: String,
    pub text_extension: String,
    /// How many planned paths to list before "... and N more"
    pub preview_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamesConfig {
    /// Line prefix of folder name records in a crash report
    pub label: String,
    pub output_file: PathBuf,
}

impl CrashConfig {
    pub fn policy(&self) -> Result<CrashPolicy> {
        Ok(CrashPolicy::new(CrashPolicyConfig {
            log_glob: self.log_glob.clone(),
            events_path: self.events_path.clone(),
            keywords: self.keywords.clone(),
            connection_marker: self.connection_marker.clone(),
        })?)
    }
}

impl MarkerConfig {
    pub fn policy(&self) -> MarkerPolicy {
        MarkerPolicy::new(self.evidence_name.clone(), self.target.clone())
    }
}
