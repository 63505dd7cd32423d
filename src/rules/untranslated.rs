//! Untranslated value detection rule.
//!
//! Detects finished translations that are identical to their source text,
//! which may indicate the text was copied instead of translated. Sources
//! without letters (numbers, symbols) and sources listed in `ignoreTexts`
//! are skipped, as are catalogs written in the source language itself
//! (an `en_GB` catalog for English sources).

use std::collections::HashSet;

use crate::{
    core::{Catalog, CatalogFile, CheckContext},
    issues::UntranslatedIssue,
    rules::live_messages,
    utils::contains_alphabetic,
};

pub fn check_untranslated_issues(ctx: &CheckContext) -> Vec<UntranslatedIssue> {
    check_untranslated(
        ctx.catalogs(),
        &ctx.ignore_texts,
        &ctx.config.source_language,
    )
}

/// Check for untranslated values.
///
/// `source_language` applies to catalogs without a `sourcelanguage`
/// attribute. A plural message is reported only when every form equals the
/// source.
pub fn check_untranslated(
    files: &[CatalogFile],
    ignore_texts: &HashSet<String>,
    source_language: &str,
) -> Vec<UntranslatedIssue> {
    live_messages(files)
        .filter(|entry| !translates_into_source_language(&entry.file.catalog, source_language))
        .filter(|entry| entry.message.state.is_finished())
        .filter(|entry| {
            let source = &entry.message.source;
            contains_alphabetic(source) && !ignore_texts.contains(source)
        })
        .filter(|entry| {
            let forms = entry.forms();
            !forms.is_empty()
                && forms
                    .iter()
                    .all(|(_, text)| *text == entry.message.source.as_str())
        })
        .map(|entry| UntranslatedIssue { site: entry.site() })
        .collect()
}

fn translates_into_source_language(catalog: &Catalog, default_source: &str) -> bool {
    let primary = |code: &str| {
        code.split(['_', '-'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase()
    };
    let source = catalog.source_language.as_deref().unwrap_or(default_source);
    catalog
        .language()
        .is_some_and(|target| primary(target) == primary(source))
}
