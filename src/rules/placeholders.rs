//! Placeholder mismatch detection rule.
//!
//! `QString::arg()` fills `%1`..`%99` in the translated text. A translation
//! that drops or invents a marker shows wrong or missing values at runtime.
//! Order and repetition do not matter; `%n` is handled by plural lookup and
//! is not compared.

use crate::{
    core::{CatalogFile, CheckContext},
    issues::PlaceholderMismatchIssue,
    rules::live_messages,
    utils::placeholders,
};

pub fn check_placeholder_issues(ctx: &CheckContext) -> Vec<PlaceholderMismatchIssue> {
    check_placeholders(ctx.catalogs())
}

pub fn check_placeholders(files: &[CatalogFile]) -> Vec<PlaceholderMismatchIssue> {
    let mut issues = Vec::new();

    for entry in live_messages(files).filter(|e| e.message.state.is_finished()) {
        let expected = placeholders(&entry.message.source);
        for (form, text) in entry.forms() {
            // Empty texts are reported by the `empty` rule.
            if text.is_empty() {
                continue;
            }
            let found = placeholders(text);
            if found != expected {
                issues.push(PlaceholderMismatchIssue {
                    site: entry.site(),
                    form,
                    expected: expected.iter().copied().collect(),
                    found: found.into_iter().collect(),
                });
            }
        }
    }

    issues
}
