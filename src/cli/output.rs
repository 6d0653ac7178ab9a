//! Styled terminal output for runsift
//!
//! Consistent symbols and colors for progress, summaries and prompts.
//! Diagnostics go through `tracing`; this is what the user reads.

use console::style;
use dialoguer::{Confirm, theme::ColorfulTheme};
use std::path::PathBuf;

/// Output handler for consistent CLI formatting
#[derive(Debug, Clone)]
pub struct Output {
    verbose: bool,
    quiet: bool,
}

impl Output {
    /// Create a new output handler
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("✔").green(), message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        // Errors are always shown, even in quiet mode
        eprintln!("{} {}", style("✖").red(), message);
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("⚠").yellow(), message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("ℹ").blue(), message);
        }
    }

    /// Print a verbose message (only if verbose mode is enabled)
    pub fn verbose(&self, message: &str) {
        if self.verbose && !self.quiet {
            println!("{} {}", style("ℹ").dim(), style(message).dim());
        }
    }

    /// Print a header/title
    pub fn header(&self, title: &str) {
        if !self.quiet {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    /// Print a step in a process
    pub fn step(&self, step: &str) {
        if !self.quiet {
            println!("{} {}", style("❯").cyan(), step);
        }
    }

    /// Print a list item
    pub fn list_item(&self, item: &str) {
        if !self.quiet {
            println!("  • {}", item);
        }
    }

    /// Print a section separator
    pub fn separator(&self) {
        if !self.quiet {
            println!("{}", style("─".repeat(50)).dim());
        }
    }

    /// Print summary statistics with enhanced styling
    pub fn summary_stats(&self, label: &str, value: usize) {
        if !self.quiet {
            println!("  {} {}", style(label).dim(), style(value.to_string()).bold());
        }
    }

    /// Print a status indicator with consistent styling
    pub fn status_indicator(&self, message: &str, is_success: bool) {
        if !self.quiet {
            let icon = if is_success {
                style("✓").green().bold()
            } else {
                style("✗").red().bold()
            };
            println!("{} {}", icon, message);
        }
    }

    /// List the first `limit` paths, then how many were left out
    pub fn path_preview(&self, paths: &[PathBuf], limit: usize) {
        for path in paths.iter().take(limit) {
            self.list_item(&path.display().to_string());
        }
        if paths.len() > limit {
            self.list_item(&format!("... and {} more", paths.len() - limit));
        }
    }

    /// Ask for user confirmation, defaulting to no
    ///
    /// Anything but an explicit yes (including a closed stdin) declines.
    pub fn confirm(&self, message: &str) -> bool {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .default(false)
            .interact()
            .unwrap_or(false)
    }

    /// Print blank line
    pub fn blank_line(&self) {
        if !self.quiet {
            println!();
        }
    }
}
