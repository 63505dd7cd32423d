//! Error types for catalog loading, merging and writing.
//!
//! Only structural problems are errors. A missing or unfinished translation is
//! not: lookups fall back to the source text instead.

use thiserror::Error;

/// Errors produced while reading, merging or writing a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The document is not well-formed XML.
    #[error("invalid XML at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    /// The document is well-formed XML but violates the catalog structure.
    #[error("malformed catalog: {0}")]
    Malformed(#[from] MalformedCatalog),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<quick_xml::Error> for CatalogError {
    fn from(source: quick_xml::Error) -> Self {
        CatalogError::Xml {
            position: 0,
            source,
        }
    }
}

impl CatalogError {
    pub fn is_malformed(&self) -> bool {
        matches!(self, CatalogError::Malformed(_))
    }
}

/// Structural violations of the catalog model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedCatalog {
    #[error("document has no <TS> root element")]
    MissingRoot,

    #[error("<{element}> is missing its <{child}> element")]
    MissingElement {
        element: &'static str,
        child: &'static str,
    },

    #[error("unexpected <{found}> inside <{parent}>")]
    UnexpectedElement { parent: String, found: String },

    #[error("document ended inside <{0}>")]
    UnexpectedEof(String),

    #[error("context '{0}' is defined more than once")]
    DuplicateContext(String),

    #[error(
        "context '{context}' has more than one message for source {source_text:?} with disambiguation {disambiguation:?}"
    )]
    DuplicateMessage {
        context: String,
        source_text: String,
        disambiguation: String,
    },

    #[error(
        "plural message {source_text:?} in context '{context}' has {found} form(s) but language '{language}' defines {expected}"
    )]
    UndefinedPluralCategory {
        context: String,
        source_text: String,
        language: String,
        expected: usize,
        found: usize,
    },

    #[error(
        "finished plural message {source_text:?} in context '{context}' has {found} form(s) but language '{language}' requires {expected}"
    )]
    MissingPluralCategory {
        context: String,
        source_text: String,
        language: String,
        expected: usize,
        found: usize,
    },

    #[error("message {source_text:?} in context '{context}' has plural forms but is not marked numerus")]
    UnexpectedPluralForms {
        context: String,
        source_text: String,
    },

    #[error("plural message {source_text:?} in context '{context}' has plain translation text")]
    PluralWithoutForms {
        context: String,
        source_text: String,
    },

    #[error("invalid line number {0:?} in <location>")]
    InvalidLine(String),

    #[error("invalid <byte> value {0:?}")]
    InvalidByte(String),

    #[error("cannot merge a '{theirs}' catalog into a '{ours}' catalog")]
    LanguageMismatch { ours: String, theirs: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn test_duplicate_message_display() {
        let err = CatalogError::from(MalformedCatalog::DuplicateMessage {
            context: "GensQt4::VBackend".to_string(),
            source_text: "None".to_string(),
            disambiguation: "osd-stretch".to_string(),
        });
        assert!(err.is_malformed());
        assert_snapshot!(err.to_string(), @r#"malformed catalog: context 'GensQt4::VBackend' has more than one message for source "None" with disambiguation "osd-stretch""#);
    }

    #[test]
    fn test_plural_count_display() {
        let err = MalformedCatalog::MissingPluralCategory {
            context: "GensQt4::GensWindow".to_string(),
            source_text: "SRAM loaded. (%n byte(s))".to_string(),
            language: "fr".to_string(),
            expected: 2,
            found: 1,
        };
        assert_snapshot!(err.to_string(), @r#"finished plural message "SRAM loaded. (%n byte(s))" in context 'GensQt4::GensWindow' has 1 form(s) but language 'fr' requires 2"#);
    }

    #[test]
    fn test_io_error_is_not_malformed() {
        let err = CatalogError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "gone",
        ));
        assert!(!err.is_malformed());
    }
}
