//! Rule implementations for tscat.
//!
//! Each rule is a pure function over parsed catalog files returning its own
//! issue type. Vanished and obsolete messages are never checked.
//!
//! - `unfinished`: messages still marked unfinished
//! - `untranslated`: finished translations identical to the source
//! - `empty`: finished messages with empty text
//! - `placeholders`: `%1`..`%99` markers that differ from the source
//! - `accelerators`: `&` shortcut markers present on one side only

pub mod accelerators;
pub mod empty;
pub mod placeholders;
pub mod unfinished;
pub mod untranslated;

use crate::core::{CatalogFile, Context, Message, MessageLocation, MessageSite, Translation};

/// A live message of a catalog file, with enough context to report it.
pub struct MessageEntry<'a> {
    pub file: &'a CatalogFile,
    pub context: &'a Context,
    pub message: &'a Message,
    line: usize,
}

impl MessageEntry<'_> {
    pub fn site(&self) -> MessageSite {
        MessageSite::new(
            MessageLocation::with_line(&self.file.file_path, self.line),
            &self.context.name,
            self.message,
        )
    }

    /// Translation texts with their plural form index (`None` for singular).
    pub fn forms(&self) -> Vec<(Option<usize>, &str)> {
        match &self.message.translation {
            Translation::Single(text) => vec![(None, text.as_str())],
            Translation::Plural(forms) => forms
                .iter()
                .enumerate()
                .map(|(i, form)| (Some(i), form.as_str()))
                .collect(),
        }
    }
}

/// Every non-retired message of `files`, in file order.
pub fn live_messages(files: &[CatalogFile]) -> impl Iterator<Item = MessageEntry<'_>> {
    files.iter().flat_map(|file| {
        file.catalog
            .contexts()
            .iter()
            .enumerate()
            .flat_map(move |(ci, context)| {
                context
                    .messages()
                    .iter()
                    .enumerate()
                    .filter(|(_, message)| !message.state.is_retired())
                    .map(move |(mi, message)| MessageEntry {
                        file,
                        context,
                        message,
                        line: file.message_line(ci, mi),
                    })
            })
    })
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{live_messages, test_helpers::catalog_file};

    #[test]
    fn test_live_messages_skip_retired() {
        let file = catalog_file(
            r#"<TS language="fr">
<context>
    <name>Ctx</name>
    <message>
        <source>Open</source>
        <translation>Ouvrir</translation>
    </message>
    <message>
        <source>Gone</source>
        <translation type="obsolete">Parti</translation>
    </message>
    <message numerus="yes">
        <source>%n file(s)</source>
        <translation><numerusform>%n fichier</numerusform><numerusform>%n fichiers</numerusform></translation>
    </message>
</context>
</TS>"#,
        );
        let files = [file];
        let entries: Vec<_> = live_messages(&files).collect();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].site().line(), 4);
        assert_eq!(entries[0].forms(), vec![(None, "Ouvrir")]);
        assert_eq!(entries[1].site().line(), 12);
        assert_eq!(
            entries[1].forms(),
            vec![(Some(0), "%n fichier"), (Some(1), "%n fichiers")]
        );
    }
}
