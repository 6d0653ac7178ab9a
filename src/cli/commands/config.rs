//! Configuration command implementations

use crate::cli::CommandContext;
use anyhow::{Result, bail};
use clap::Subcommand;

/// Configuration subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the merged configuration as TOML
    Show,
    /// Check that the configuration can build every policy
    Validate,
}

/// Execute config commands
pub async fn execute(cmd: ConfigCommands, ctx: &CommandContext) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show(ctx),
        ConfigCommands::Validate => validate(ctx),
    }
}

fn show(ctx: &CommandContext) -> Result<()> {
    print!("{}", ctx.config.to_toml()?);
    Ok(())
}

fn validate(ctx: &CommandContext) -> Result<()> {
    let output = &ctx.output;
    output.header("Validating configuration");

    ctx.config.crash.policy()?;

    if ctx.config.crash.keywords.is_empty() {
        bail!("crash.keywords must not be empty");
    }
    if ctx.config.marker.target.is_empty() {
        bail!("marker.target must not be empty");
    }
    if ctx.config.marker.evidence_name.is_empty() {
        bail!("marker.evidence_name must not be empty");
    }

    output.success("Configuration is valid");
    Ok(())
}
