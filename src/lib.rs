//! # runsift - maintenance for test-run artifact trees
//!
//! Fuzzing campaigns leave behind one folder per run: a device log, packet
//! captures and event transcripts. runsift classifies those folders by their
//! content and turns the verdicts into reports or cleanup plans.
//!
//! - **Crash scan**: find runs whose log shows a crash and whose UE never
//!   connected, and write them to a report for reproduction
//! - **Marker prune**: delete run folders whose `events.1.txt` never shows
//!   the expected message
//! - **Purges**: delete packet captures and blank text files
//! - **Payload names**: strip timestamps from reported folder names and
//!   dedupe them
//!
//! Classification never deletes anything. Plans are applied separately by
//! [`cleanup`], after confirmation.
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use runsift::scanner::{CorpusWalker, FolderFilter, MarkerPolicy, VerdictKind, WalkDepth};
//!
//! let walker = CorpusWalker::new("results/", FolderFilter::All, WalkDepth::Shallow);
//! let report = walker.walk(&MarkerPolicy::default())?;
//!
//! for path in report.paths(VerdictKind::FlagForDelete) {
//!     println!("would delete {}", path.display());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cleanup;
pub mod cli;
pub mod config;
pub mod errors;
pub mod names;
pub mod reports;
pub mod scanner;

pub use cli::{Cli, Output};
pub use config::SiftConfig;
pub use errors::SiftError;
