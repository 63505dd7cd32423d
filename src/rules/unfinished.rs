//! Unfinished message detection rule.
//!
//! Reports every live message whose translation is still marked
//! `type="unfinished"`. Lookups fall back to the source text for these.

use crate::{
    core::{CatalogFile, CheckContext, TranslationState},
    issues::UnfinishedIssue,
    rules::live_messages,
};

pub fn check_unfinished_issues(ctx: &CheckContext) -> Vec<UnfinishedIssue> {
    check_unfinished(ctx.catalogs())
}

pub fn check_unfinished(files: &[CatalogFile]) -> Vec<UnfinishedIssue> {
    live_messages(files)
        .filter(|entry| entry.message.state == TranslationState::Unfinished)
        .map(|entry| UnfinishedIssue { site: entry.site() })
        .collect()
}
