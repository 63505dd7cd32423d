use std::fmt;

/// Where a source string appears in the host program.
///
/// Purely informational; lookups never consult it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    /// Path of the host source file, as written by the extraction tool.
    pub filename: String,
    /// Line number (1-indexed).
    pub line: u32,
}

impl Location {
    pub fn new(filename: impl Into<String>, line: u32) -> Self {
        Self {
            filename: filename.into(),
            line,
        }
    }
}

/// Finalization state of a translation.
///
/// Only [`TranslationState::Finished`] translations are returned by lookups.
/// `Vanished` and `Obsolete` mark messages whose source string no longer
/// exists in the host program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum TranslationState {
    #[default]
    Finished,
    Unfinished,
    Vanished,
    Obsolete,
}

impl TranslationState {
    /// Parse the `type` attribute of `<translation>`.
    pub fn from_type_attr(value: &str) -> Option<Self> {
        match value {
            "unfinished" => Some(TranslationState::Unfinished),
            "vanished" => Some(TranslationState::Vanished),
            "obsolete" => Some(TranslationState::Obsolete),
            _ => None,
        }
    }

    /// Value for the `type` attribute, `None` for finished translations.
    pub fn type_attr(&self) -> Option<&'static str> {
        match self {
            TranslationState::Finished => None,
            TranslationState::Unfinished => Some("unfinished"),
            TranslationState::Vanished => Some("vanished"),
            TranslationState::Obsolete => Some("obsolete"),
        }
    }

    pub fn is_finished(&self) -> bool {
        *self == TranslationState::Finished
    }

    /// Vanished and obsolete messages are kept for translators but are
    /// no longer used by the host program.
    pub fn is_retired(&self) -> bool {
        matches!(
            self,
            TranslationState::Vanished | TranslationState::Obsolete
        )
    }
}

impl fmt::Display for TranslationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationState::Finished => write!(f, "finished"),
            TranslationState::Unfinished => write!(f, "unfinished"),
            TranslationState::Vanished => write!(f, "vanished"),
            TranslationState::Obsolete => write!(f, "obsolete"),
        }
    }
}

/// Translation payload of a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Translation {
    /// A single translation string.
    Single(String),
    /// One variant per plural category of the catalog language, in rule order.
    Plural(Vec<String>),
}

impl Default for Translation {
    fn default() -> Self {
        Translation::Single(String::new())
    }
}

impl Translation {
    /// True when there is no text to show (empty string, no forms, or any empty form).
    pub fn is_empty(&self) -> bool {
        match self {
            Translation::Single(text) => text.is_empty(),
            Translation::Plural(forms) => forms.is_empty() || forms.iter().any(String::is_empty),
        }
    }

    /// Iterate over every translation string.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            Translation::Single(text) => std::slice::from_ref(text),
            Translation::Plural(forms) => forms,
        };
        slice.iter().map(String::as_str)
    }
}

/// A single translatable string of a context.
///
/// The pair `(source, disambiguation)` is unique within its context.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    /// Optional message identifier (ID-based catalogs).
    pub id: Option<String>,
    /// Original-language text; part of the lookup key.
    pub source: String,
    /// Source text before the last fuzzy merge.
    pub old_source: Option<String>,
    /// Disambiguating comment; the other half of the lookup key.
    pub disambiguation: Option<String>,
    /// Disambiguation before the last fuzzy merge.
    pub old_disambiguation: Option<String>,
    /// Guidance for translators written by developers (`<extracomment>`).
    pub extra_comment: Option<String>,
    /// Note left by a translator (`<translatorcomment>`).
    pub translator_comment: Option<String>,
    pub locations: Vec<Location>,
    pub translation: Translation,
    pub state: TranslationState,
}

impl Message {
    /// Create a finished message with an empty translation.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    /// Set the disambiguating comment. An empty comment means none.
    pub fn with_disambiguation(mut self, comment: impl Into<String>) -> Self {
        self.disambiguation = non_empty(comment.into());
        self
    }

    pub fn with_extra_comment(mut self, comment: impl Into<String>) -> Self {
        self.extra_comment = non_empty(comment.into());
        self
    }

    pub fn with_translator_comment(mut self, comment: impl Into<String>) -> Self {
        self.translator_comment = non_empty(comment.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = non_empty(id.into());
        self
    }

    pub fn with_location(mut self, filename: impl Into<String>, line: u32) -> Self {
        self.locations.push(Location::new(filename, line));
        self
    }

    pub fn with_translation(mut self, text: impl Into<String>) -> Self {
        self.translation = Translation::Single(text.into());
        self
    }

    /// Mark the message plural-sensitive with the given variants.
    pub fn with_plural_forms<I, S>(mut self, forms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.translation = Translation::Plural(forms.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_state(mut self, state: TranslationState) -> Self {
        self.state = state;
        self
    }

    /// Shorthand for `with_state(TranslationState::Unfinished)`.
    pub fn unfinished(self) -> Self {
        self.with_state(TranslationState::Unfinished)
    }

    /// Empty optional texts mean "absent", as they do in a `.ts` file.
    pub(crate) fn normalized(mut self) -> Self {
        for field in [
            &mut self.id,
            &mut self.disambiguation,
            &mut self.old_disambiguation,
            &mut self.extra_comment,
            &mut self.translator_comment,
        ] {
            if field.as_deref() == Some("") {
                *field = None;
            }
        }
        self
    }

    pub fn is_plural(&self) -> bool {
        matches!(self.translation, Translation::Plural(_))
    }

    /// Disambiguation as used in the lookup key (`""` when absent).
    pub fn disambiguation_key(&self) -> &str {
        self.disambiguation.as_deref().unwrap_or_default()
    }

    /// The finished translation to display for `form`, if there is one.
    ///
    /// `form` is ignored for single translations. Empty texts count as missing.
    pub fn finished_text(&self, form: usize) -> Option<&str> {
        if !self.state.is_finished() {
            return None;
        }
        let text = match &self.translation {
            Translation::Single(text) => text.as_str(),
            Translation::Plural(forms) => forms.get(form)?.as_str(),
        };
        (!text.is_empty()).then_some(text)
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

/// Position of a message inside a catalog file, used for issue reports.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MessageLocation {
    /// Path to the catalog file (e.g., "./translations/app_fr.ts").
    pub file_path: String,
    /// Line number of the `<message>` element (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub col: usize,
}

impl MessageLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }

    /// Create with default column (1).
    pub fn with_line(file_path: impl Into<String>, line: usize) -> Self {
        Self::new(file_path, line, 1)
    }
}

/// A message together with where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSite {
    pub location: MessageLocation,
    /// Name of the enclosing context (e.g., "GensQt4::GensWindow").
    pub context: String,
    pub source: String,
    pub disambiguation: Option<String>,
}

impl MessageSite {
    pub fn new(location: MessageLocation, context: impl Into<String>, message: &Message) -> Self {
        Self {
            location,
            context: context.into(),
            source: message.source.clone(),
            disambiguation: message.disambiguation.clone(),
        }
    }

    pub fn file_path(&self) -> &str {
        &self.location.file_path
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn col(&self) -> usize {
        self.location.col
    }
}
