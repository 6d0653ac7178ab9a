//! Interactive menu
//!
//! A thin shell over the same `run_*` functions the subcommands use. The
//! "current default path" lives here and nowhere else.

use anyhow::Result;
use dialoguer::{Input, Select, theme::ColorfulTheme};
use std::path::PathBuf;

use super::{all, crash, names, prune, purge};
use crate::cli::CommandContext;

const ITEMS: &[&str] = &[
    "Purge files by extension",
    "Purge blank text files",
    "Prune folders lacking the target string",
    "Run all cleanup operations",
    "Scan for crashes without recovery",
    "Extract payload names from the crash report",
    "Set default path",
    "Exit",
];

struct Menu<'a> {
    ctx: &'a CommandContext,
    default_path: PathBuf,
    theme: ColorfulTheme,
}

pub async fn execute(ctx: &CommandContext) -> Result<()> {
    let mut menu = Menu {
        ctx,
        default_path: ctx.config.general.default_root.clone(),
        theme: ColorfulTheme::default(),
    };
    menu.run()
}

impl Menu<'_> {
    fn run(&mut self) -> Result<()> {
        let ctx = self.ctx;
        let output = &ctx.output;

        loop {
            output.header("runsift - main menu");
            output.info(&format!("Current default path: {}", self.default_path.display()));

            let choice = Select::with_theme(&self.theme)
                .with_prompt("Select an operation")
                .items(ITEMS)
                .default(0)
                .interact()?;

            let result = match choice {
                0 => self.choose_path().and_then(|p| purge::run_extension(&p, ctx, ctx.assume_yes).map(drop)),
                1 => self.choose_path().and_then(|p| purge::run_blank(&p, ctx, ctx.assume_yes).map(drop)),
                2 => self.choose_path().and_then(|p| prune::run(&p, ctx, ctx.assume_yes).map(drop)),
                3 => self.choose_path().and_then(|p| all::run(&p, ctx)),
                4 => self.choose_path().and_then(|p| crash::run(&p, ctx).map(drop)),
                5 => {
                    let config = &ctx.config;
                    names::run(&config.crash.report_file, &config.names.output_file, ctx).map(drop)
                }
                6 => self.set_default_path(),
                _ => {
                    output.info("Goodbye!");
                    return Ok(());
                }
            };

            // Failures end the operation, not the session
            if let Err(e) = result {
                output.error(&format!("{:#}", e));
            }

            if ctx.cancel.is_cancelled() {
                output.warning("Interrupted, leaving menu");
                return Ok(());
            }
        }
    }

    fn choose_path(&self) -> Result<PathBuf> {
        let default_label = format!("Use default path: {}", self.default_path.display());
        let choice = Select::with_theme(&self.theme)
            .with_prompt("Which path?")
            .items(&[default_label.as_str(), "Enter a custom path"])
            .default(0)
            .interact()?;

        if choice == 0 {
            return Ok(self.default_path.clone());
        }

        let entered: String = Input::with_theme(&self.theme)
            .with_prompt("Path")
            .allow_empty(true)
            .interact_text()?;
        let entered = entered.trim();
        Ok(if entered.is_empty() {
            self.default_path.clone()
        } else {
            PathBuf::from(entered)
        })
    }

    fn set_default_path(&mut self) -> Result<()> {
        let ctx = self.ctx;
        let output = &ctx.output;
        let entered: String = Input::with_theme(&self.theme)
            .with_prompt("New default path (empty keeps the current one)")
            .allow_empty(true)
            .interact_text()?;
        let entered = entered.trim();

        if entered.is_empty() {
            output.info("Default path unchanged");
            return Ok(());
        }

        let path = PathBuf::from(entered);
        if path.exists() {
            output.success(&format!("Default path set to {}", path.display()));
            self.default_path = path;
        } else {
            output.error(&format!("Path '{}' does not exist, keeping {}", entered, self.default_path.display()));
        }
        Ok(())
    }
}
