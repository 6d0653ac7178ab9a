//! Command-line interface for runsift
//!
//! Parses arguments with clap, loads configuration, installs the Ctrl-C
//! handler and dispatches to the command implementations.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

pub mod commands;
mod interrupt;
mod output;

pub use output::Output;

use crate::config::{CliOverrides, SiftConfig};
use crate::scanner::CancelFlag;
use commands::{all, config, crash, menu, names, prune, purge};

/// runsift - maintenance for test-run artifact trees
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<String>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Show what would be done without deleting or writing anything
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Apply destructive plans without asking for confirmation
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Report run folders whose log shows a crash and whose UE never connected
    Crash(crash::CrashArgs),
    /// Delete top-level folders whose events.1.txt files lack the target string
    Prune(prune::PruneArgs),
    /// Delete every file with a given extension (default: pcapng)
    PurgeExt(purge::PurgeExtArgs),
    /// Delete empty or whitespace-only text files
    PurgeBlank(purge::PurgeBlankArgs),
    /// Run purge-ext, purge-blank and prune against one root
    All(all::AllArgs),
    /// Extract deduplicated payload names from a crash report
    Names(names::NamesArgs),
    /// Interactive menu
    Menu,
    /// Configuration management
    #[command(subcommand)]
    Config(config::ConfigCommands),
}

impl Commands {
    /// Config values set by this command's flags
    fn overrides(&self) -> CliOverrides {
        let overrides = CliOverrides::new();
        match self {
            Commands::Crash(args) => overrides
                .set("crash", "folder_prefix", args.prefix.clone())
                .set("crash", "report_file", args.output.as_ref().map(|p| p.display().to_string())),
            Commands::Prune(args) => overrides.set("marker", "target", args.target.clone()),
            Commands::PurgeExt(args) => overrides.set("sweep", "binary_extension", args.ext.clone()),
            Commands::PurgeBlank(args) => overrides.set("sweep", "text_extension", args.ext.clone()),
            Commands::All(args) => overrides.set("marker", "target", args.target.clone()),
            Commands::Names(_) | Commands::Menu | Commands::Config(_) => overrides,
        }
    }
}

/// Everything a command needs besides its own arguments
pub struct CommandContext {
    pub config: SiftConfig,
    pub output: Output,
    pub cancel: CancelFlag,
    pub dry_run: bool,
    pub assume_yes: bool,
}

impl CommandContext {
    /// Whether a destructive step may proceed
    pub fn confirmed(&self, prompt: &str) -> bool {
        self.assume_yes || self.output.confirm(prompt)
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        // Set up logging based on verbosity
        setup_logging(self.verbose, self.quiet);

        let Some(command) = self.command else {
            // Show help when no command is provided
            let mut cmd = Cli::command();
            cmd.print_help()?;
            return Ok(());
        };

        let config = SiftConfig::load_with_overrides(self.config.as_deref(), &command.overrides())?;
        let ctx = CommandContext {
            config,
            output: Output::new(self.verbose > 0, self.quiet),
            cancel: interrupt::install(),
            dry_run: self.dry_run,
            assume_yes: self.yes,
        };

        match command {
            Commands::Crash(args) => crash::execute(args, &ctx).await,
            Commands::Prune(args) => prune::execute(args, &ctx).await,
            Commands::PurgeExt(args) => purge::execute_extension(args, &ctx).await,
            Commands::PurgeBlank(args) => purge::execute_blank(args, &ctx).await,
            Commands::All(args) => all::execute(args, &ctx).await,
            Commands::Names(args) => names::execute(args, &ctx).await,
            Commands::Menu => menu::execute(&ctx).await,
            Commands::Config(cmd) => config::execute(cmd, &ctx).await,
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            match verbose {
                0 => tracing_subscriber::EnvFilter::new("warn"),
                1 => tracing_subscriber::EnvFilter::new("info"),
                2 => tracing_subscriber::EnvFilter::new("debug"),
                _ => tracing_subscriber::EnvFilter::new("trace"),
            }
        });

    // Logs go to stderr so JSON output on stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
