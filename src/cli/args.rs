//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: List translatable messages found in source files
//! - `rewrite`: Replace translation calls with translated literals
//! - `init`: Initialize the configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

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

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.args.common.verbose,
            Some(Command::Rewrite(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root directory, where the config file is looked up
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Messages grouped by file
    #[default]
    Text,
    /// A JSON array of message records
    Json,
}

#[derive(Debug, Parser)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    #[command(flatten)]
    pub args: ExtractArgs,
}

#[derive(Debug, Parser)]
pub struct RewriteArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Translation catalog: a JSON array of entries or `{ "items": [...] }`
    #[arg(long)]
    pub catalog: PathBuf,

    /// Actually write the rewritten files (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Args)]
pub struct RewriteCommand {
    #[command(flatten)]
    pub args: RewriteArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List gettext messages found in source files
    Extract(ExtractCommand),
    /// Replace gettext calls with translated literals from a catalog
    Rewrite(RewriteCommand),
    /// Initialize a new .gettextrc.json configuration file
    Init,
}
