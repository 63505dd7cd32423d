//! Report formatting and printing utilities.
//!
//! Issues are shown in cargo-style format. Kept apart from the command
//! handlers so tscat can be used as a library.

use std::io::{self, Write};

use colored::{ColoredString, Colorize};
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CommandResult, CommandSummary, InitSummary, LookupSummary, MergeSummary, StatsSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format, sorted, followed by a problem summary.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    let gutter = line_number_width(&sorted);
    for issue in &sorted {
        print_issue(issue, writer, gutter);
    }

    print_summary(&sorted, writer);
}

/// Print a success line when no issues are found.
pub fn print_success_to<W: Write>(files_checked: usize, writer: &mut W) {
    let text = format!(
        "Checked {} - no issues found",
        counted(files_checked, "catalog file", "catalog files")
    );
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), text.green());
}

// ============================================================
// Internal Functions
// ============================================================

/// `1 file`, `2 files`.
fn counted(n: usize, singular: &str, plural: &str) -> String {
    format!("{} {}", n, if n == 1 { singular } else { plural })
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, gutter: usize) {
    let label = match issue.severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };
    let _ = writeln!(
        writer,
        "{}: {:?}  {}",
        label,
        issue.message(),
        issue.rule().to_string().dimmed().cyan()
    );

    // `path:line:col` so terminals can jump to the message.
    let target = match issue.location() {
        ReportLocation::Message(site) => {
            format!("{}:{}:{}", site.file_path(), site.line(), site.col())
        }
        ReportLocation::File { path } => path.to_string(),
    };
    let _ = writeln!(writer, "  {} {}", "-->".blue(), target);

    if let Some(details) = issue.details() {
        print_annotation(writer, gutter, "note:".bold(), &details);
    }
    if let Some(hint) = issue.hint() {
        print_annotation(writer, gutter, "hint:".bold().cyan(), hint);
    }

    let _ = writeln!(writer);
}

fn print_annotation<W: Write>(writer: &mut W, gutter: usize, label: ColoredString, text: &str) {
    let _ = writeln!(
        writer,
        "{:>gutter$} {} {} {}",
        "",
        "=".blue(),
        label,
        text,
        gutter = gutter
    );
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let errors = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let warnings = issues.len() - errors;

    let _ = writeln!(
        writer,
        "{} {} ({}, {})",
        FAILURE_MARK.red(),
        counted(issues.len(), "problem", "problems"),
        counted(errors, "error", "errors").red(),
        counted(warnings, "warning", "warnings").yellow()
    );
}

/// Width of the widest line number, so `=` annotations line up.
fn line_number_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Message(site) => Some(site.line()),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

pub fn print(result: &CommandResult, verbose: bool) {
    print_to(result, verbose, &mut io::stdout().lock());
}

pub fn print_to<W: Write>(result: &CommandResult, verbose: bool, writer: &mut W) {
    match &result.summary {
        CommandSummary::Check => {
            report_to(&result.issues, writer);
            if result.issues.is_empty() {
                print_success_to(result.files_checked, writer);
            }
        }
        CommandSummary::Lookup(summary) => print_lookup(summary, writer),
        CommandSummary::Merge(summary) => print_merge(summary, writer),
        CommandSummary::Stats(summary) => {
            print_stats(summary, verbose, writer);
            report_to(&result.issues, writer);
        }
        CommandSummary::Init(summary) => print_init(summary),
    }
}

fn print_lookup<W: Write>(summary: &LookupSummary, writer: &mut W) {
    let _ = writeln!(writer, "{}", summary.text);
}

fn print_merge<W: Write>(summary: &MergeSummary, writer: &mut W) {
    let text = format!(
        "Merged {} into {}: {} added, {} replaced",
        counted(summary.overlay_count, "catalog", "catalogs"),
        summary.output.display(),
        summary.added,
        summary.replaced
    );
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), text.green());
}

fn print_stats<W: Write>(summary: &StatsSummary, verbose: bool, writer: &mut W) {
    if summary.rows.is_empty() {
        let _ = writeln!(writer, "No catalog files found");
        return;
    }

    let path_width = summary
        .rows
        .iter()
        .map(|row| UnicodeWidthStr::width(row.file_path.as_str()))
        .max()
        .unwrap_or(0);

    for row in &summary.rows {
        let stats = &row.stats;
        let live = stats.messages - stats.retired;
        let percent = stats.percent_complete();
        let percent_str = format!("{:>5.1}%", percent);
        let percent_colored = if stats.finished == live {
            percent_str.green()
        } else {
            percent_str.yellow()
        };
        let padding = path_width - UnicodeWidthStr::width(row.file_path.as_str());

        let _ = write!(
            writer,
            "{}{:padding$}  {:<6} {}  {}/{} finished, {} unfinished",
            row.file_path,
            "",
            row.language.as_deref().unwrap_or("-"),
            percent_colored,
            stats.finished,
            live,
            stats.unfinished,
            padding = padding
        );
        if verbose {
            let _ = write!(
                writer,
                ", {} retired, {} contexts",
                stats.retired, stats.contexts
            );
        }
        let _ = writeln!(writer);
    }
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
    if let Some(error) = &summary.error {
        eprintln!("Error: {}", error);
    }
}

// ============================================================
// Tests
// ============================================================
