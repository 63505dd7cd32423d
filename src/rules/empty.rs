//! Empty translation detection rule.
//!
//! A message marked finished but with no text (or an empty plural form)
//! silently falls back to the source at lookup time.

use crate::{
    core::{CatalogFile, CheckContext},
    issues::EmptyTranslationIssue,
    rules::live_messages,
};

pub fn check_empty_issues(ctx: &CheckContext) -> Vec<EmptyTranslationIssue> {
    check_empty(ctx.catalogs())
}

pub fn check_empty(files: &[CatalogFile]) -> Vec<EmptyTranslationIssue> {
    let mut issues = Vec::new();

    for entry in live_messages(files).filter(|e| e.message.state.is_finished()) {
        for (form, text) in entry.forms() {
            if text.is_empty() {
                issues.push(EmptyTranslationIssue {
                    site: entry.site(),
                    form,
                });
            }
        }
    }

    issues
}
