//! Accelerator mismatch detection rule.
//!
//! Menu and button labels mark their keyboard shortcut with `&`. The rule
//! warns when only one of source and translation has such a marker.

use crate::{
    core::{CatalogFile, CheckContext},
    issues::AcceleratorMismatchIssue,
    rules::live_messages,
    utils::has_accelerator,
};

pub fn check_accelerator_issues(ctx: &CheckContext) -> Vec<AcceleratorMismatchIssue> {
    check_accelerators(ctx.catalogs())
}

pub fn check_accelerators(files: &[CatalogFile]) -> Vec<AcceleratorMismatchIssue> {
    let mut issues = Vec::new();

    for entry in live_messages(files).filter(|e| e.message.state.is_finished()) {
        let source_has = has_accelerator(&entry.message.source);
        for (form, text) in entry.forms() {
            if text.is_empty() {
                continue;
            }
            if has_accelerator(text) != source_has {
                issues.push(AcceleratorMismatchIssue {
                    site: entry.site(),
                    form,
                    missing_in_translation: source_has,
                });
            }
        }
    }

    issues
}
