use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

use super::{prune, purge, resolve_root};
use crate::cli::CommandContext;

#[derive(Args, Debug, Default)]
pub struct AllArgs {
    /// Root to clean (defaults to general.default_root)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// String a folder's events.1.txt must contain to be kept
    #[arg(long)]
    pub target: Option<String>,
}

pub async fn execute(args: AllArgs, ctx: &CommandContext) -> Result<()> {
    let root = resolve_root(args.path.as_deref(), ctx);
    run(&root, ctx)
}

/// Binary purge and blank purge run unattended; folder prune still asks
pub fn run(root: &Path, ctx: &CommandContext) -> Result<()> {
    let output = &ctx.output;
    output.header("Running all cleanup operations");

    output.step(&format!("[1/3] Purging .{} files", ctx.config.sweep.binary_extension));
    purge::run_extension(root, ctx, true)?;

    output.step(&format!("[2/3] Purging blank .{} files", ctx.config.sweep.text_extension));
    purge::run_blank(root, ctx, true)?;

    output.step("[3/3] Pruning folders without the target string");
    prune::run(root, ctx, ctx.assume_yes)?;

    output.success("All cleanup operations finished");
    Ok(())
}
