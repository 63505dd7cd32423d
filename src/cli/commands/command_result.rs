use std::path::PathBuf;

use crate::{core::CatalogStats, issues::Issue};

#[derive(Debug)]
pub enum CommandSummary {
    Check,
    Lookup(LookupSummary),
    Merge(MergeSummary),
    Stats(StatsSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct LookupSummary {
    /// Text to display: the translation, or the source when none is finished.
    pub text: String,
    pub translated: bool,
}

#[derive(Debug)]
pub struct MergeSummary {
    pub output: PathBuf,
    pub overlay_count: usize,
    pub added: usize,
    pub replaced: usize,
}

#[derive(Debug)]
pub struct StatsRow {
    pub file_path: String,
    pub language: Option<String>,
    pub stats: CatalogStats,
}

#[derive(Debug)]
pub struct StatsSummary {
    pub rows: Vec<StatsRow>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
    pub error: Option<String>,
}

/// Result of running a tscat command.
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    pub exit_on_errors: bool,
    /// All issues found, sorted. Parse errors are included for every command
    /// that reads a set of catalogs.
    pub issues: Vec<Issue>,
    /// Number of files that failed to parse.
    pub parse_error_count: usize,
    /// Number of catalog files that were read.
    pub files_checked: usize,
}
