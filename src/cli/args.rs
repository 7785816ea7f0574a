//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `run`: Run the linter and rewrite hardcoded strings into translation calls
//! - `init`: Initialize an `.autotranslaterc.json` configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::config::Config;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Run(cmd)) => cmd.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct RunCommand {
    /// Primary locale (overrides config file)
    #[arg(long)]
    pub primary_locale: Option<String>,

    /// Messages directory path (overrides config file)
    #[arg(long)]
    pub messages_root: Option<String>,

    /// Source directory the linter reports paths under (overrides config file)
    #[arg(long)]
    pub source_root: Option<String>,

    /// Read the lint report from a file ("-" for stdin) instead of running the linter
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Show what would change without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Exit with status 1 if any string was skipped
    #[arg(long)]
    pub check: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl RunCommand {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(locale) = &self.primary_locale {
            config.primary_locale = locale.clone();
        }
        if let Some(root) = &self.messages_root {
            config.messages_root = root.clone();
        }
        if let Some(root) = &self.source_root {
            config.source_root = root.clone();
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replace hardcoded strings reported by the linter with translation calls
    Run(RunCommand),
    /// Initialize a new .autotranslaterc.json configuration file
    Init,
}
