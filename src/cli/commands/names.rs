use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

use crate::cli::CommandContext;
use crate::errors::SiftError;
use crate::names::{Normalized, folder_names_from_report, normalize_all};
use crate::reports::{render_identifiers, write_report};
use crate::scanner::{Evidence, read_evidence};

#[derive(Args, Debug, Default)]
pub struct NamesArgs {
    /// Crash report to read (defaults to crash.report_file)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Where to write the payload names (defaults to names.output_file)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

pub async fn execute(args: NamesArgs, ctx: &CommandContext) -> Result<()> {
    let input = args.input.unwrap_or_else(|| ctx.config.crash.report_file.clone());
    let output_file = args.output.unwrap_or_else(|| ctx.config.names.output_file.clone());
    run(&input, &output_file, ctx)?;
    Ok(())
}

/// Extract payload names from `input` and write them to `output_file`
pub fn run(input: &Path, output_file: &Path, ctx: &CommandContext) -> Result<Normalized> {
    let output = &ctx.output;
    output.header("Extract payload names");
    output.step(&format!("Input: {}", input.display()));
    output.step(&format!("Output: {}", output_file.display()));

    let report = match read_evidence(input)? {
        Evidence::Found(content) => content,
        Evidence::NotFound => return Err(SiftError::PathNotFound(input.to_path_buf()).into()),
    };

    let folder_names = folder_names_from_report(&report, &ctx.config.names.label);
    let normalized = normalize_all(folder_names.iter().copied());

    for name in &normalized.rejected {
        output.warning(&format!("Cannot parse folder name '{}'", name));
    }
    output.summary_stats("Records read:", folder_names.len());
    output.summary_stats("Unique payload names:", normalized.identifiers.len());

    if ctx.dry_run {
        for id in &normalized.identifiers {
            output.list_item(id);
        }
        output.info(&format!("Dry run: would write {}", output_file.display()));
        return Ok(normalized);
    }

    write_report(output_file, &render_identifiers(&normalized.identifiers))?;
    output.success(&format!(
        "Saved {} unique payload name(s) to {}",
        normalized.identifiers.len(),
        output_file.display()
    ));
    Ok(normalized)
}
