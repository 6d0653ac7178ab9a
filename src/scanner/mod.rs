//! Run-folder classification
//!
//! Reads evidence files leniently, evaluates content predicates over them and
//! buckets run folders by verdict. Planning only: deletion lives in
//! [`crate::cleanup`].

pub mod classifier;
pub mod evidence;
pub mod files;
pub mod predicates;
pub mod types;
pub mod walker;

// Re-export main types for easier access
pub use classifier::{CrashPolicy, CrashPolicyConfig, FolderPolicy, MarkerPolicy};
pub use evidence::{Evidence, read_evidence};
pub use files::{SweepPlan, plan_blank_sweep, plan_extension_sweep};
pub use predicates::{Predicate, contains_any_keyword, contains_marker, is_blank};
pub use types::{CancelFlag, FolderFailure, Verdict, VerdictKind, VerdictReason, WalkReport};
pub use walker::{CorpusWalker, FolderFilter, WalkDepth};
