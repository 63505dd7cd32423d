use std::{borrow::Cow, collections::HashMap};

use super::message::{Message, Translation, TranslationState};
use crate::core::{
    error::{CatalogError, MalformedCatalog},
    plural::PluralRule,
};

/// Messages indexed by source text, then by disambiguation.
///
/// Nested so that lookups can borrow `&str` keys without allocating.
type MessageIndex = HashMap<String, HashMap<String, usize>>;

/// A named group of messages, typically one UI component.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Context {
    pub name: String,
    /// Optional context-level comment.
    pub comment: Option<String>,
    messages: Vec<Message>,
    index: MessageIndex,
}

impl Context {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Messages in authoring order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Exact-key lookup. `disambiguation` is `""` for messages without one.
    pub fn get(&self, source: &str, disambiguation: &str) -> Option<&Message> {
        let position = *self.index.get(source)?.get(disambiguation)?;
        self.messages.get(position)
    }

    /// Append a message, rejecting a duplicate `(source, disambiguation)` key.
    pub fn insert(&mut self, message: Message) -> Result<(), MalformedCatalog> {
        if self.get(&message.source, message.disambiguation_key()).is_some() {
            return Err(MalformedCatalog::DuplicateMessage {
                context: self.name.clone(),
                source_text: message.source,
                disambiguation: message.disambiguation.unwrap_or_default(),
            });
        }
        self.push(message);
        Ok(())
    }

    /// Insert or replace by key. Returns true if an existing message was replaced.
    ///
    /// A replaced message keeps its position.
    pub fn upsert(&mut self, message: Message) -> bool {
        let existing = self
            .index
            .get(&message.source)
            .and_then(|by_comment| by_comment.get(message.disambiguation_key()))
            .copied();

        match existing {
            Some(position) => {
                self.messages[position] = message.normalized();
                true
            }
            None => {
                self.push(message);
                false
            }
        }
    }

    fn push(&mut self, message: Message) {
        let message = message.normalized();
        self.index
            .entry(message.source.clone())
            .or_default()
            .insert(message.disambiguation_key().to_string(), self.messages.len());
        self.messages.push(message);
    }
}

/// Counts of messages per finalization state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogStats {
    pub contexts: usize,
    pub messages: usize,
    pub finished: usize,
    pub unfinished: usize,
    /// Vanished and obsolete messages.
    pub retired: usize,
}

impl CatalogStats {
    /// Share of live (non-retired) messages that are finished, in percent.
    pub fn percent_complete(&self) -> f64 {
        let live = self.messages - self.retired;
        if live == 0 {
            100.0
        } else {
            self.finished as f64 * 100.0 / live as f64
        }
    }
}

/// Outcome of [`Catalog::merge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeStats {
    pub added: usize,
    pub replaced: usize,
}

/// An in-memory translation catalog for one target language.
///
/// Immutable once loaded; share it behind an `Arc` (see
/// [`SharedCatalog`](crate::core::SharedCatalog)) and look up from any thread.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    /// Format version from the `<TS version>` attribute.
    pub version: Option<String>,
    /// Language of the source strings.
    pub source_language: Option<String>,
    language: Option<String>,
    plural_rule: PluralRule,
    contexts: Vec<Context>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Create an empty catalog targeting `language` (e.g. "fr").
    pub fn new(language: impl Into<String>) -> Self {
        let mut catalog = Self::default();
        catalog.set_language(Some(language.into()));
        catalog
    }

    /// Target language code, if declared.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Set the target language and the plural rule that goes with it.
    ///
    /// Unknown languages use the singular/plural rule.
    pub fn set_language(&mut self, language: Option<String>) {
        self.plural_rule = plural_rule_for(language.as_deref());
        self.language = language.filter(|code| !code.is_empty());
    }

    pub fn plural_rule(&self) -> PluralRule {
        self.plural_rule
    }

    /// Contexts in authoring order.
    pub fn contexts(&self) -> &[Context] {
        &self.contexts
    }

    pub fn context(&self, name: &str) -> Option<&Context> {
        self.index.get(name).map(|&i| &self.contexts[i])
    }

    /// Every message with its context, in authoring order.
    pub fn messages(&self) -> impl Iterator<Item = (&Context, &Message)> {
        self.contexts
            .iter()
            .flat_map(|ctx| ctx.messages.iter().map(move |msg| (ctx, msg)))
    }

    /// Total number of messages.
    pub fn len(&self) -> usize {
        self.contexts.iter().map(Context::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.iter().all(Context::is_empty)
    }

    /// Append a new context, rejecting a name that is already defined.
    pub fn add_context(&mut self, mut context: Context) -> Result<(), MalformedCatalog> {
        if self.index.contains_key(&context.name) {
            return Err(MalformedCatalog::DuplicateContext(context.name));
        }
        for message in &context.messages {
            self.check_plural_forms(&context.name, message)?;
        }
        if context.comment.as_deref() == Some("") {
            context.comment = None;
        }
        self.index.insert(context.name.clone(), self.contexts.len());
        self.contexts.push(context);
        Ok(())
    }

    /// Add a message to `context`, creating the context on first use.
    ///
    /// Fails on a duplicate key or when a plural message does not fit the
    /// language's plural categories.
    pub fn insert(&mut self, context: &str, message: Message) -> Result<(), MalformedCatalog> {
        self.check_plural_forms(context, &message)?;
        let position = self.context_position(context);
        self.contexts[position].insert(message)
    }

    fn context_position(&mut self, name: &str) -> usize {
        if let Some(&position) = self.index.get(name) {
            return position;
        }
        self.index.insert(name.to_string(), self.contexts.len());
        self.contexts.push(Context::new(name));
        self.contexts.len() - 1
    }

    fn check_plural_forms(&self, context: &str, message: &Message) -> Result<(), MalformedCatalog> {
        check_plural_forms(self.plural_rule, self.language.as_deref(), context, message)
    }

    /// Exact-key lookup of a message.
    pub fn find(&self, context: &str, source: &str, disambiguation: &str) -> Option<&Message> {
        self.context(context)?.get(source, disambiguation)
    }

    /// Find the message a lookup would use.
    ///
    /// A non-empty disambiguation that matches nothing is retried once
    /// without it.
    pub fn resolve(
        &self,
        context: &str,
        source: &str,
        disambiguation: Option<&str>,
    ) -> Option<&Message> {
        let disambiguation = disambiguation.unwrap_or_default();
        self.find(context, source, disambiguation).or_else(|| {
            if disambiguation.is_empty() {
                None
            } else {
                self.find(context, source, "")
            }
        })
    }

    /// The finished translation for a key, or `None` when the caller should
    /// fall back to the source text.
    pub fn find_translation(
        &self,
        context: &str,
        source: &str,
        disambiguation: Option<&str>,
        count: Option<i64>,
    ) -> Option<&str> {
        let message = self.resolve(context, source, disambiguation)?;
        let form = match count {
            Some(n) if message.is_plural() => self.plural_rule.form_index(n),
            _ => 0,
        };
        message.finished_text(form)
    }

    /// Translate `source`, returning it unchanged when no finished
    /// translation exists.
    ///
    /// With `count` on a plural message, the variant for the language's
    /// plural category of `count` is returned.
    pub fn lookup<'a>(
        &'a self,
        context: &str,
        source: &'a str,
        disambiguation: Option<&str>,
        count: Option<i64>,
    ) -> &'a str {
        self.find_translation(context, source, disambiguation, count)
            .unwrap_or(source)
    }

    /// Like [`Catalog::lookup`], then replaces `%n` with `count`.
    pub fn translate<'a>(
        &'a self,
        context: &str,
        source: &'a str,
        disambiguation: Option<&str>,
        count: Option<i64>,
    ) -> Cow<'a, str> {
        let text = self.lookup(context, source, disambiguation, count);
        match count {
            Some(n) if text.contains("%n") => Cow::Owned(text.replace("%n", &n.to_string())),
            _ => Cow::Borrowed(text),
        }
    }

    /// Combine `other` into this catalog; its messages win on equal keys.
    ///
    /// Replaced messages keep their position, new ones are appended in
    /// `other`'s order. Catalogs for different languages cannot be merged,
    /// and every resulting plural message must fit the resulting language.
    /// On error `self` is left unchanged.
    pub fn merge(&mut self, other: Catalog) -> Result<MergeStats, CatalogError> {
        if let (Some(ours), Some(theirs)) = (&self.language, &other.language)
            && !same_language(ours, theirs)
        {
            return Err(MalformedCatalog::LanguageMismatch {
                ours: ours.clone(),
                theirs: theirs.clone(),
            }
            .into());
        }
        let adopted = match (&self.language, &other.language) {
            (None, Some(theirs)) => Some((theirs.clone(), plural_rule_for(Some(theirs)))),
            _ => None,
        };
        let (rule, language) = match &adopted {
            Some((code, rule)) => (*rule, Some(code.as_str())),
            None => (self.plural_rule, self.language.as_deref()),
        };

        // Validate everything before touching `self`.
        for context in &other.contexts {
            for message in &context.messages {
                check_plural_forms(rule, language, &context.name, message)?;
            }
        }
        if adopted.is_some() {
            for (context, message) in self.messages() {
                let replaced = other
                    .find(&context.name, &message.source, message.disambiguation_key())
                    .is_some();
                if !replaced {
                    check_plural_forms(rule, language, &context.name, message)?;
                }
            }
        }

        if let Some((code, rule)) = adopted {
            self.language = Some(code);
            self.plural_rule = rule;
        }
        if self.version.is_none() {
            self.version = other.version;
        }
        if self.source_language.is_none() {
            self.source_language = other.source_language;
        }

        let mut stats = MergeStats::default();
        for context in other.contexts {
            let position = self.context_position(&context.name);
            let target = &mut self.contexts[position];
            if let Some(comment) = context.comment.filter(|comment| !comment.is_empty()) {
                target.comment = Some(comment);
            }
            for message in context.messages {
                if target.upsert(message) {
                    stats.replaced += 1;
                } else {
                    stats.added += 1;
                }
            }
        }

        tracing::debug!(
            added = stats.added,
            replaced = stats.replaced,
            "merged catalog"
        );
        Ok(stats)
    }

    pub fn stats(&self) -> CatalogStats {
        let mut stats = CatalogStats {
            contexts: self.contexts.len(),
            ..Default::default()
        };
        for (_, message) in self.messages() {
            stats.messages += 1;
            match message.state {
                TranslationState::Finished => stats.finished += 1,
                TranslationState::Unfinished => stats.unfinished += 1,
                TranslationState::Vanished | TranslationState::Obsolete => stats.retired += 1,
            }
        }
        stats
    }
}

/// Plural rule for a language code. Unknown languages use the singular/plural rule.
fn plural_rule_for(language: Option<&str>) -> PluralRule {
    match language {
        Some(code) if !code.is_empty() => PluralRule::for_language(code).unwrap_or_else(|| {
            tracing::warn!(
                language = code,
                "unknown language, assuming singular/plural forms"
            );
            PluralRule::default()
        }),
        _ => PluralRule::default(),
    }
}

/// A plural message may never have more forms than `rule` defines, and a
/// finished one must have all of them.
fn check_plural_forms(
    rule: PluralRule,
    language: Option<&str>,
    context: &str,
    message: &Message,
) -> Result<(), MalformedCatalog> {
    let Translation::Plural(forms) = &message.translation else {
        return Ok(());
    };
    let expected = rule.form_count();
    let found = forms.len();
    let language = language.unwrap_or_default().to_string();

    if found > expected {
        return Err(MalformedCatalog::UndefinedPluralCategory {
            context: context.to_string(),
            source_text: message.source.clone(),
            language,
            expected,
            found,
        });
    }
    if found < expected && message.state.is_finished() {
        return Err(MalformedCatalog::MissingPluralCategory {
            context: context.to_string(),
            source_text: message.source.clone(),
            language,
            expected,
            found,
        });
    }
    Ok(())
}

/// Compare language codes ignoring case and `-`/`_` differences.
fn same_language(a: &str, b: &str) -> bool {
    let normalize = |code: &str| code.to_ascii_lowercase().replace('-', "_");
    normalize(a) == normalize(b)
}
