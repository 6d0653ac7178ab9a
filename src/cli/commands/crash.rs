use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;
use std::path::{Path, PathBuf};

use super::resolve_root;
use crate::cli::CommandContext;
use crate::reports::{render_crash_report, render_json, write_report};
use crate::scanner::{CorpusWalker, FolderFilter, VerdictKind, VerdictReason, WalkDepth, WalkReport};

#[derive(Args, Debug, Default)]
pub struct CrashArgs {
    /// Corpus root to scan (defaults to general.default_root)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Report file to write
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Only scan directories whose name starts with this prefix
    #[arg(long)]
    pub prefix: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Summary on the terminal and a report file
    #[default]
    Text,
    /// Full walk report as JSON on stdout, no report file
    Json,
}

pub async fn execute(args: CrashArgs, ctx: &CommandContext) -> Result<()> {
    let root = resolve_root(args.path.as_deref(), ctx);

    if args.format == OutputFormat::Json {
        let report = scan(&root, ctx)?;
        println!("{}", render_json(&report)?);
        return Ok(());
    }

    run(&root, ctx)?;
    Ok(())
}

/// Classify every matching folder under `root`
pub fn scan(root: &Path, ctx: &CommandContext) -> Result<WalkReport> {
    let crash = &ctx.config.crash;
    let policy = crash.policy()?;
    let walker = CorpusWalker::new(root, FolderFilter::NamePrefix(crash.folder_prefix.clone()), WalkDepth::Recursive)
        .with_cancel(ctx.cancel.clone());

    walker
        .walk(&policy)
        .with_context(|| format!("Crash scan of {} failed", root.display()))
}

/// Scan, summarize and write the report file
pub fn run(root: &Path, ctx: &CommandContext) -> Result<WalkReport> {
    let output = &ctx.output;
    let crash = &ctx.config.crash;

    output.header("Crash scan");
    output.step(&format!("Scanning {}", root.display()));
    output.step(&format!("Looking for folders starting with '{}'", crash.folder_prefix));

    let report = scan(root, ctx)?;
    let flagged = report.bucket(VerdictKind::FlagForReport);

    for verdict in flagged {
        output.status_indicator(&format!("{} (no UE connection)", verdict.folder_name), false);
    }
    for verdict in report.bucket(VerdictKind::Keep) {
        if verdict.reason == VerdictReason::ConnectionRecovered {
            output.verbose(&format!("Skipped {} (UE connected)", verdict.folder_name));
        }
    }
    for verdict in report.bucket(VerdictKind::SkipNoEvidence) {
        match &verdict.reason {
            VerdictReason::AmbiguousLog { candidates } => output.warning(&format!(
                "{}: {} .log files, not classified",
                verdict.folder_path.display(),
                candidates.len()
            )),
            _ => output.warning(&format!("No .log file in {}", verdict.folder_path.display())),
        }
    }
    for failure in &report.failures {
        output.error(&format!("{}: {}", failure.folder_path.display(), failure.message));
    }

    output.separator();
    output.summary_stats("Folders processed:", report.folders_scanned);
    output.summary_stats("Crash logs found:", report.fired_count("crash-keyword"));
    output.summary_stats("Folders to reproduce:", flagged.len());
    if !report.failures.is_empty() {
        output.summary_stats("Folders failed:", report.failures.len());
    }

    if report.interrupted {
        output.warning("Scan interrupted, partial results only; no report written");
        return Ok(report);
    }

    if flagged.is_empty() {
        output.info("No matching folders found");
        return Ok(report);
    }

    if ctx.dry_run {
        output.info(&format!("Dry run: would write report to {}", crash.report_file.display()));
        return Ok(report);
    }

    let text = render_crash_report(&report, Local::now());
    write_report(&crash.report_file, &text)?;
    output.success(&format!("Results saved to {}", crash.report_file.display()));

    Ok(report)
}
