use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use super::resolve_root;
use crate::cleanup::{CleanupOutcome, delete_trees};
use crate::cli::CommandContext;
use crate::scanner::{CorpusWalker, FolderFilter, VerdictKind, WalkDepth};

#[derive(Args, Debug, Default)]
pub struct PruneArgs {
    /// Root whose immediate sub-folders are checked (defaults to general.default_root)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// String a folder's events.1.txt must contain to be kept
    #[arg(long)]
    pub target: Option<String>,
}

pub async fn execute(args: PruneArgs, ctx: &CommandContext) -> Result<()> {
    let root = resolve_root(args.path.as_deref(), ctx);
    run(&root, ctx, ctx.assume_yes)?;
    Ok(())
}

/// Plan folder deletions and apply them once confirmed
///
/// Returns `None` when nothing was deleted.
pub fn run(root: &Path, ctx: &CommandContext, assume_yes: bool) -> Result<Option<CleanupOutcome>> {
    let output = &ctx.output;
    let marker = &ctx.config.marker;

    output.header("Marker prune");
    output.step(&format!("Looking for '{}' in {} files", marker.target, marker.evidence_name));

    let walker = CorpusWalker::new(root, FolderFilter::All, WalkDepth::Shallow).with_cancel(ctx.cancel.clone());
    let report = walker
        .walk(&marker.policy())
        .with_context(|| format!("Marker prune of {} failed", root.display()))?;

    for verdict in report.bucket(VerdictKind::Keep) {
        if let Some(evidence) = verdict.evidence.first() {
            let shown = evidence.strip_prefix(root).unwrap_or(evidence);
            output.status_indicator(&format!("Target found in {}", shown.display()), true);
        }
    }
    for verdict in report.bucket(VerdictKind::SkipNoEvidence) {
        output.info(&format!("No {} in {}", marker.evidence_name, verdict.folder_name));
    }
    for verdict in report.bucket(VerdictKind::FlagForDelete) {
        output.status_indicator(
            &format!("{}: {} lacks the target string", verdict.folder_name, marker.evidence_name),
            false,
        );
    }
    for failure in &report.failures {
        output.error(&format!("{}: {}", failure.folder_path.display(), failure.message));
    }

    output.separator();
    output.summary_stats("Folders kept:", report.count(VerdictKind::Keep));
    output.summary_stats("Folders without evidence:", report.count(VerdictKind::SkipNoEvidence));
    output.summary_stats("Folders to delete:", report.count(VerdictKind::FlagForDelete));

    if report.interrupted {
        output.warning("Prune interrupted, nothing deleted");
        return Ok(None);
    }

    let plan = report.paths(VerdictKind::FlagForDelete);
    if plan.is_empty() {
        output.info("No folders need deletion");
        return Ok(None);
    }

    output.blank_line();
    output.info(&format!("{} folder(s) to delete:", plan.len()));
    for verdict in report.bucket(VerdictKind::FlagForDelete) {
        output.list_item(&verdict.folder_name);
    }

    if ctx.dry_run {
        output.info("Dry run: nothing deleted");
        return Ok(None);
    }
    if !(assume_yes || ctx.confirmed("Delete these folders?")) {
        output.info("Operation cancelled");
        return Ok(None);
    }

    let outcome = delete_trees(&plan);
    for (path, e) in &outcome.failed {
        output.error(&format!("Failed to delete {}: {}", path.display(), e));
    }
    output.success(&format!(
        "Deleted {} folder(s), {} failed",
        outcome.deleted_count(),
        outcome.failed_count()
    ));
    Ok(Some(outcome))
}
