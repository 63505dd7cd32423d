//! Issue types for catalog checks.
//!
//! Each issue is self-contained with everything the reporter needs to
//! display it.

use enum_dispatch::enum_dispatch;

use crate::core::MessageSite;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    Unfinished,
    Untranslated,
    EmptyTranslation,
    PlaceholderMismatch,
    AcceleratorMismatch,
    ParseError,
}

impl Rule {
    /// Errors fail `check`; warnings are only reported.
    pub fn severity(self) -> Severity {
        match self {
            Rule::PlaceholderMismatch | Rule::ParseError => Severity::Error,
            Rule::Unfinished
            | Rule::Untranslated
            | Rule::EmptyTranslation
            | Rule::AcceleratorMismatch => Severity::Warning,
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::Unfinished => write!(f, "unfinished"),
            Rule::Untranslated => write!(f, "untranslated"),
            Rule::EmptyTranslation => write!(f, "empty"),
            Rule::PlaceholderMismatch => write!(f, "placeholder"),
            Rule::AcceleratorMismatch => write!(f, "accelerator"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

// ============================================================
// Issue Types - Messages (MessageSite)
// ============================================================

/// Message still marked `type="unfinished"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnfinishedIssue {
    pub site: MessageSite,
}

/// Finished translation identical to its source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UntranslatedIssue {
    pub site: MessageSite,
}

/// Finished message with an empty translation (or empty plural form).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyTranslationIssue {
    pub site: MessageSite,
    /// Index of the empty plural form, `None` for singular messages.
    pub form: Option<usize>,
}

/// Numbered placeholders (`%1`, `%2`, ...) differ between source and translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderMismatchIssue {
    pub site: MessageSite,
    pub form: Option<usize>,
    /// Placeholders in the source text, ascending.
    pub expected: Vec<u32>,
    /// Placeholders in the translation, ascending.
    pub found: Vec<u32>,
}

/// Only one of source and translation marks a keyboard accelerator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceleratorMismatchIssue {
    pub site: MessageSite,
    pub form: Option<usize>,
    /// True when the source has the accelerator and the translation lacks it.
    pub missing_in_translation: bool,
}

// ============================================================
// Special Issue Types
// ============================================================

/// Catalog file could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

// ============================================================
// Issue Enum
// ============================================================

/// A catalog issue found by `check`.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    Unfinished(UnfinishedIssue),
    Untranslated(UntranslatedIssue),
    EmptyTranslation(EmptyTranslationIssue),
    PlaceholderMismatch(PlaceholderMismatchIssue),
    AcceleratorMismatch(AcceleratorMismatchIssue),
    ParseError(ParseErrorIssue),
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// A message inside a catalog file.
    Message(&'a MessageSite),
    /// File-level only (for ParseError).
    File { path: &'a str },
}

/// Trait for types that can be reported to CLI.
///
/// Implemented by all issue types; `enum_dispatch` forwards it on `Issue`.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display (source text or error).
    fn message(&self) -> String;

    fn rule(&self) -> Rule;

    fn severity(&self) -> Severity {
        self.rule().severity()
    }

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

/// "context 'X'" with the disambiguation appended when present.
fn describe_site(site: &MessageSite) -> String {
    match &site.disambiguation {
        Some(comment) => format!("context '{}' ({})", site.context, comment),
        None => format!("context '{}'", site.context),
    }
}

fn describe_form(form: Option<usize>) -> String {
    match form {
        Some(index) => format!(", plural form {}", index),
        None => String::new(),
    }
}

fn format_placeholders(markers: &[u32]) -> String {
    if markers.is_empty() {
        return "none".to_string();
    }
    markers
        .iter()
        .map(|n| format!("%{}", n))
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for UnfinishedIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.site)
    }

    fn message(&self) -> String {
        self.site.source.clone()
    }

    fn rule(&self) -> Rule {
        Rule::Unfinished
    }

    fn details(&self) -> Option<String> {
        Some(describe_site(&self.site))
    }
}

impl Report for UntranslatedIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.site)
    }

    fn message(&self) -> String {
        self.site.source.clone()
    }

    fn rule(&self) -> Rule {
        Rule::Untranslated
    }

    fn details(&self) -> Option<String> {
        Some(format!("{}: translation is identical to the source", describe_site(&self.site)))
    }

    fn hint(&self) -> Option<&str> {
        Some("add the text to 'ignoreTexts' if it needs no translation")
    }
}

impl Report for EmptyTranslationIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.site)
    }

    fn message(&self) -> String {
        self.site.source.clone()
    }

    fn rule(&self) -> Rule {
        Rule::EmptyTranslation
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "{}{}: finished translation is empty",
            describe_site(&self.site),
            describe_form(self.form)
        ))
    }
}

impl Report for PlaceholderMismatchIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.site)
    }

    fn message(&self) -> String {
        self.site.source.clone()
    }

    fn rule(&self) -> Rule {
        Rule::PlaceholderMismatch
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "{}{}: expected {}, found {}",
            describe_site(&self.site),
            describe_form(self.form),
            format_placeholders(&self.expected),
            format_placeholders(&self.found)
        ))
    }
}

impl Report for AcceleratorMismatchIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.site)
    }

    fn message(&self) -> String {
        self.site.source.clone()
    }

    fn rule(&self) -> Rule {
        Rule::AcceleratorMismatch
    }

    fn details(&self) -> Option<String> {
        let what = if self.missing_in_translation {
            "translation has no '&' accelerator"
        } else {
            "translation adds an '&' accelerator the source does not have"
        };
        Some(format!(
            "{}{}: {}",
            describe_site(&self.site),
            describe_form(self.form),
            what
        ))
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn rule(&self) -> Rule {
        Rule::ParseError
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Issue {
    fn sort_file_path(&self) -> &str {
        match self.location() {
            ReportLocation::Message(site) => site.file_path(),
            ReportLocation::File { path } => path,
        }
    }

    fn sort_line(&self) -> usize {
        match self.location() {
            ReportLocation::Message(site) => site.line(),
            ReportLocation::File { .. } => 0,
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Sort by: file_path, line, rule, message
        self.sort_file_path()
            .cmp(other.sort_file_path())
            .then_with(|| self.sort_line().cmp(&other.sort_line()))
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================
