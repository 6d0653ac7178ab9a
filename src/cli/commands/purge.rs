//! File-level purges: by extension and blank text files

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use super::resolve_root;
use crate::cleanup::{CleanupOutcome, delete_files};
use crate::cli::CommandContext;
use crate::scanner::{SweepPlan, plan_blank_sweep, plan_extension_sweep};

#[derive(Args, Debug, Default)]
pub struct PurgeExtArgs {
    /// Root to search recursively (defaults to general.default_root)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// File extension to delete, without the dot
    #[arg(long)]
    pub ext: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct PurgeBlankArgs {
    /// Root to search recursively (defaults to general.default_root)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Text file extension to check, without the dot
    #[arg(long)]
    pub ext: Option<String>,
}

pub async fn execute_extension(args: PurgeExtArgs, ctx: &CommandContext) -> Result<()> {
    let root = resolve_root(args.path.as_deref(), ctx);
    run_extension(&root, ctx, ctx.assume_yes)?;
    Ok(())
}

pub async fn execute_blank(args: PurgeBlankArgs, ctx: &CommandContext) -> Result<()> {
    let root = resolve_root(args.path.as_deref(), ctx);
    run_blank(&root, ctx, ctx.assume_yes)?;
    Ok(())
}

/// Delete every file with the configured binary extension
pub fn run_extension(root: &Path, ctx: &CommandContext, assume_yes: bool) -> Result<Option<CleanupOutcome>> {
    let output = &ctx.output;
    let extension = &ctx.config.sweep.binary_extension;

    output.header(&format!("Purge .{} files", extension));
    let plan = plan_extension_sweep(root, extension)
        .with_context(|| format!("Cannot purge .{} files under {}", extension, root.display()))?;

    if plan.files.is_empty() {
        output.info(&format!("No .{} files found", extension));
        return Ok(None);
    }

    output.info(&format!("Found {} .{} file(s):", plan.files.len(), extension));
    apply(&plan, ctx, assume_yes, &format!("Delete these {} files?", plan.files.len()))
}

/// Delete every empty or whitespace-only text file
pub fn run_blank(root: &Path, ctx: &CommandContext, assume_yes: bool) -> Result<Option<CleanupOutcome>> {
    let output = &ctx.output;
    let extension = &ctx.config.sweep.text_extension;

    output.header(&format!("Purge blank .{} files", extension));
    output.step(&format!("Scanning {}", root.display()));
    let plan = plan_blank_sweep(root, extension)
        .with_context(|| format!("Cannot purge blank .{} files under {}", extension, root.display()))?;

    for path in &plan.unreadable {
        output.warning(&format!("Cannot read {}", path.display()));
    }
    output.summary_stats(&format!("Checked .{} files:", extension), plan.checked);
    output.summary_stats("Blank files:", plan.files.len());

    if plan.files.is_empty() {
        output.info("No blank files found");
        return Ok(None);
    }

    apply(&plan, ctx, assume_yes, &format!("Delete these {} blank files?", plan.files.len()))
}

fn apply(plan: &SweepPlan, ctx: &CommandContext, assume_yes: bool, prompt: &str) -> Result<Option<CleanupOutcome>> {
    let output = &ctx.output;
    output.path_preview(&plan.files, ctx.config.sweep.preview_limit);

    if ctx.dry_run {
        output.info("Dry run: nothing deleted");
        return Ok(None);
    }
    if !(assume_yes || ctx.confirmed(prompt)) {
        output.info("Operation cancelled");
        return Ok(None);
    }

    let outcome = delete_files(&plan.files);
    for (path, e) in &outcome.failed {
        output.error(&format!("Failed to delete {}: {}", path.display(), e));
    }
    output.success(&format!(
        "Deleted {} file(s), {} failed",
        outcome.deleted_count(),
        outcome.failed_count()
    ));
    Ok(Some(outcome))
}
