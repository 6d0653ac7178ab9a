//! Command implementations for the runsift CLI
//!
//! Each command parses its own arguments, builds a plan through the scanner,
//! and only then applies it. The interactive menu reuses the same `run_*`
//! functions.

pub mod all;
pub mod config;
pub mod crash;
pub mod menu;
pub mod names;
pub mod prune;
pub mod purge;

use std::path::{Path, PathBuf};

use super::CommandContext;

/// The path given on the command line, or the configured default root
pub(crate) fn resolve_root(path: Option<&Path>, ctx: &CommandContext) -> PathBuf {
    path.map(Path::to_path_buf)
        .unwrap_or_else(|| ctx.config.general.default_root.clone())
}
