//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Run catalog checks (unfinished, untranslated, placeholders, ...)
//! - `lookup`: Translate one string through a catalog
//! - `merge`: Combine catalogs, later files winning
//! - `stats`: Translation progress per catalog
//! - `init`: Initialize tscat configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use super::commands::check::CheckRule;

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
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Stats(cmd)) => cmd.common.verbose,
            Some(Command::Lookup(cmd)) => cmd.verbose,
            Some(Command::Merge(cmd)) => cmd.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Arguments shared by commands that operate on a set of catalog files.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Directory scanned for *.ts files (overrides config file)
    #[arg(long, env = "TSCAT_TRANSLATIONS_ROOT")]
    pub translations_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Rules to run (default: all)
    #[arg(long = "rule", short = 'r', value_enum)]
    pub rules: Vec<CheckRule>,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Catalog files to check (default: every *.ts under the translations root)
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Args)]
pub struct LookupCommand {
    /// Catalog file to read
    pub file: PathBuf,

    /// Context name (e.g. "GensQt4::GensWindow")
    pub context: String,

    /// Source text to translate
    pub source: String,

    /// Disambiguation comment
    #[arg(long, short = 'c')]
    pub comment: Option<String>,

    /// Count for plural messages; also replaces %n
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    pub count: Option<i64>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct MergeCommand {
    /// Catalog to merge into (created if missing)
    pub base: PathBuf,

    /// Catalogs merged in order; later files win on equal keys
    #[arg(required = true)]
    pub overlays: Vec<PathBuf>,

    /// Write the result here instead of overwriting BASE
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct StatsCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Catalog files to summarize (default: every *.ts under the translations root)
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check catalogs for unfinished, untranslated or inconsistent messages
    Check(CheckCommand),
    /// Look up the translation of a source string
    Lookup(LookupCommand),
    /// Merge catalogs into one; later catalogs win on equal keys
    Merge(MergeCommand),
    /// Show translation progress per catalog
    Stats(StatsCommand),
    /// Initialize a new .tscatrc.json configuration file
    Init,
}
