//! Common text helpers shared by the checker rules.

use std::{collections::BTreeSet, sync::LazyLock};

use regex::Regex;

/// `%1`..`%99`, including Qt's localized `%L1` form.
static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"%L?(\d{1,2})").unwrap());

/// HTML entities in rich text, which are not accelerator markers.
static ENTITY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(?:[A-Za-z]+|#\d+|#x[0-9A-Fa-f]+);").unwrap());

/// Checks if the text contains at least one Unicode alphabetic character.
///
/// Returns false for empty strings, pure numbers, or pure symbols.
///
/// # Examples
///
/// ```
/// use tscat::utils::contains_alphabetic;
///
/// assert!(contains_alphabetic("Hello"));
/// assert!(contains_alphabetic("你好"));
/// assert!(!contains_alphabetic("123"));
/// assert!(!contains_alphabetic("%1 / %2"));
/// assert!(!contains_alphabetic(""));
/// ```
pub fn contains_alphabetic(text: &str) -> bool {
    text.chars().any(|c| c.is_alphabetic())
}

/// Numbered placeholders used in `text`, ignoring repeats and order.
///
/// ```
/// use tscat::utils::placeholders;
///
/// let found: Vec<u32> = placeholders("%2 of %1 (%L1)").into_iter().collect();
/// assert_eq!(found, vec![1, 2]);
/// ```
pub fn placeholders(text: &str) -> BTreeSet<u32> {
    PLACEHOLDER_REGEX
        .captures_iter(text)
        .filter_map(|caps| caps[1].parse().ok())
        .collect()
}

/// Whether `text` marks a keyboard accelerator with `&`.
///
/// `&&` is a literal ampersand and HTML entities such as `&nbsp;` are
/// ignored.
pub fn has_accelerator(text: &str) -> bool {
    let text = ENTITY_REGEX.replace_all(text, "");
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '&' {
            continue;
        }
        match chars.peek() {
            Some('&') => {
                chars.next();
            }
            Some(next) if !next.is_whitespace() => return true,
            _ => {}
        }
    }
    false
}
