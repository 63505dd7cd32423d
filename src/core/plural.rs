//! Plural category rules per target language.
//!
//! A plural message stores one translation variant per category of the
//! catalog's language, in the order returned by [`PluralRule::categories`].
//! Looking up a plural message with a count picks the variant whose category
//! the rule assigns to that count.

use std::fmt;

/// A CLDR-style plural category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PluralCategory {
    One,
    Few,
    Many,
    Other,
}

impl fmt::Display for PluralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluralCategory::One => write!(f, "one"),
            PluralCategory::Few => write!(f, "few"),
            PluralCategory::Many => write!(f, "many"),
            PluralCategory::Other => write!(f, "other"),
        }
    }
}

/// Pluralization rule shared by a family of languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PluralRule {
    /// No plural distinction (Japanese, Chinese, Korean, ...).
    Invariant,
    /// Singular for exactly 1, plural for everything else, including 0.
    #[default]
    OneOther,
    /// Russian, Ukrainian, Belarusian, Serbian, Croatian, Bosnian.
    EastSlavic,
    /// Polish.
    Polish,
    /// Czech and Slovak.
    CzechSlovak,
}

impl PluralRule {
    /// Look up the rule for a language code such as `fr`, `fr_CA` or `pt-BR`.
    ///
    /// Returns `None` for languages this table does not know.
    pub fn for_language(code: &str) -> Option<Self> {
        let lang = code
            .split(['_', '-'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        let rule = match lang.as_str() {
            "ja" | "zh" | "ko" | "vi" | "th" | "id" | "ms" | "lo" | "my" => PluralRule::Invariant,
            "en" | "fr" | "de" | "nl" | "sv" | "da" | "nb" | "nn" | "no" | "fi" | "es" | "it"
            | "pt" | "el" | "hu" | "et" | "he" | "bg" | "ca" | "eo" | "eu" | "gl" | "af"
            | "tr" => PluralRule::OneOther,
            "ru" | "uk" | "be" | "sr" | "hr" | "bs" => PluralRule::EastSlavic,
            "pl" => PluralRule::Polish,
            "cs" | "sk" => PluralRule::CzechSlovak,
            _ => return None,
        };
        Some(rule)
    }

    /// Categories in the order their variants are stored.
    pub fn categories(&self) -> &'static [PluralCategory] {
        use PluralCategory::*;
        match self {
            PluralRule::Invariant => &[Other],
            PluralRule::OneOther => &[One, Other],
            PluralRule::EastSlavic | PluralRule::Polish => &[One, Few, Many],
            PluralRule::CzechSlovak => &[One, Few, Other],
        }
    }

    /// Number of variants a finished plural message must carry.
    pub fn form_count(&self) -> usize {
        self.categories().len()
    }

    /// Category this rule assigns to `count`. Negative counts use their magnitude.
    pub fn category(&self, count: i64) -> PluralCategory {
        let n = count.unsigned_abs();
        let (n10, n100) = (n % 10, n % 100);
        let few = (2..=4).contains(&n10) && !(12..=14).contains(&n100);

        match self {
            PluralRule::Invariant => PluralCategory::Other,
            PluralRule::OneOther => {
                if n == 1 {
                    PluralCategory::One
                } else {
                    PluralCategory::Other
                }
            }
            PluralRule::EastSlavic => {
                if n10 == 1 && n100 != 11 {
                    PluralCategory::One
                } else if few {
                    PluralCategory::Few
                } else {
                    PluralCategory::Many
                }
            }
            PluralRule::Polish => {
                if n == 1 {
                    PluralCategory::One
                } else if few {
                    PluralCategory::Few
                } else {
                    PluralCategory::Many
                }
            }
            PluralRule::CzechSlovak => match n {
                1 => PluralCategory::One,
                2..=4 => PluralCategory::Few,
                _ => PluralCategory::Other,
            },
        }
    }

    /// Index of the variant to use for `count`.
    pub fn form_index(&self, count: i64) -> usize {
        let category = self.category(count);
        self.categories()
            .iter()
            .position(|c| *c == category)
            .unwrap_or(0)
    }
}
