//! Writer for Qt Linguist `.ts` catalogs.
//!
//! Output follows the layout Qt's own tools produce: XML declaration,
//! `<!DOCTYPE TS>`, contexts at column 0 and 4-space indentation below them.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result};
use quick_xml::{
    Writer,
    escape::escape,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::core::{
    CatalogError, MergeStats,
    data::{Catalog, Context, Message, Translation},
    parsers::ts,
};

/// Serialize a catalog to a `.ts` document.
pub fn serialize(catalog: &Catalog) -> Result<String, CatalogError> {
    let mut buffer = Vec::new();
    write_ts(catalog, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Write a catalog as a `.ts` document to `out`.
pub fn write_ts<W: Write>(catalog: &Catalog, out: W) -> Result<(), CatalogError> {
    let mut xml = TsXml {
        writer: Writer::new(out),
    };
    xml.document(catalog)
}

struct TsXml<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> TsXml<W> {
    fn newline(&mut self, depth: usize) -> Result<(), CatalogError> {
        let indent = format!("\n{}", "    ".repeat(depth));
        self.writer
            .write_event(Event::Text(BytesText::from_escaped(indent)))?;
        Ok(())
    }

    fn start(&mut self, element: BytesStart<'_>) -> Result<(), CatalogError> {
        self.writer.write_event(Event::Start(element))?;
        Ok(())
    }

    fn end(&mut self, name: &str) -> Result<(), CatalogError> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// Escaped text; control characters XML cannot carry become `<byte/>`.
    fn text(&mut self, text: &str) -> Result<(), CatalogError> {
        let mut rest = text;
        while let Some(pos) = rest.find(is_control) {
            let (plain, tail) = rest.split_at(pos);
            if !plain.is_empty() {
                self.escaped_text(plain)?;
            }
            let mut chars = tail.chars();
            if let Some(c) = chars.next() {
                let value = format!("x{:x}", u32::from(c));
                let byte = BytesStart::new("byte").with_attributes([("value", value.as_str())]);
                self.writer.write_event(Event::Empty(byte))?;
            }
            rest = chars.as_str();
        }
        if !rest.is_empty() {
            self.escaped_text(rest)?;
        }
        Ok(())
    }

    /// All five XML entities are escaped, quotes included, as Qt does.
    fn escaped_text(&mut self, text: &str) -> Result<(), CatalogError> {
        self.writer
            .write_event(Event::Text(BytesText::from_escaped(escape(text))))?;
        Ok(())
    }

    fn text_element(&mut self, depth: usize, name: &str, text: &str) -> Result<(), CatalogError> {
        self.newline(depth)?;
        self.start(BytesStart::new(name))?;
        self.text(text)?;
        self.end(name)
    }

    fn optional_element(
        &mut self,
        depth: usize,
        name: &str,
        text: Option<&str>,
    ) -> Result<(), CatalogError> {
        match text {
            Some(text) => self.text_element(depth, name, text),
            None => Ok(()),
        }
    }

    fn document(&mut self, catalog: &Catalog) -> Result<(), CatalogError> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        self.newline(0)?;
        self.writer
            .write_event(Event::DocType(BytesText::from_escaped("TS")))?;
        self.newline(0)?;

        let mut root = BytesStart::new("TS");
        if let Some(version) = &catalog.version {
            root.push_attribute(("version", version.as_str()));
        }
        if let Some(language) = catalog.language() {
            root.push_attribute(("language", language));
        }
        if let Some(source_language) = &catalog.source_language {
            root.push_attribute(("sourcelanguage", source_language.as_str()));
        }
        self.start(root)?;

        for context in catalog.contexts() {
            self.context(context)?;
        }

        self.newline(0)?;
        self.end("TS")?;
        self.newline(0)
    }

    fn context(&mut self, context: &Context) -> Result<(), CatalogError> {
        self.newline(0)?;
        self.start(BytesStart::new("context"))?;
        self.text_element(1, "name", &context.name)?;
        self.optional_element(1, "comment", context.comment.as_deref())?;
        for message in context.messages() {
            self.message(message)?;
        }
        self.newline(0)?;
        self.end("context")
    }

    fn message(&mut self, message: &Message) -> Result<(), CatalogError> {
        let mut start = BytesStart::new("message");
        if let Some(id) = &message.id {
            start.push_attribute(("id", id.as_str()));
        }
        if message.is_plural() {
            start.push_attribute(("numerus", "yes"));
        }
        self.newline(1)?;
        self.start(start)?;

        for location in &message.locations {
            let line = location.line.to_string();
            let element = BytesStart::new("location").with_attributes([
                ("filename", location.filename.as_str()),
                ("line", line.as_str()),
            ]);
            self.newline(2)?;
            self.writer.write_event(Event::Empty(element))?;
        }

        self.text_element(2, "source", &message.source)?;
        self.optional_element(2, "oldsource", message.old_source.as_deref())?;
        self.optional_element(2, "comment", message.disambiguation.as_deref())?;
        self.optional_element(2, "oldcomment", message.old_disambiguation.as_deref())?;
        self.optional_element(2, "extracomment", message.extra_comment.as_deref())?;
        self.optional_element(
            2,
            "translatorcomment",
            message.translator_comment.as_deref(),
        )?;
        self.translation(message)?;

        self.newline(1)?;
        self.end("message")
    }

    fn translation(&mut self, message: &Message) -> Result<(), CatalogError> {
        let mut start = BytesStart::new("translation");
        if let Some(kind) = message.state.type_attr() {
            start.push_attribute(("type", kind));
        }
        self.newline(2)?;
        self.start(start)?;

        match &message.translation {
            Translation::Single(text) => self.text(text)?,
            Translation::Plural(forms) => {
                for form in forms {
                    self.text_element(3, "numerusform", form)?;
                }
                if !forms.is_empty() {
                    self.newline(2)?;
                }
            }
        }
        self.end("translation")
    }
}

fn is_control(c: char) -> bool {
    c.is_control() && !matches!(c, '\t' | '\n' | '\r') && u32::from(c) < 0x20
}

/// `.ts` file writer that merges updates into an existing catalog.
pub struct TsWriter {
    file_path: PathBuf,
    catalog: Catalog,
}

impl TsWriter {
    /// Open an existing catalog file or start an empty catalog.
    pub fn open_or_create(path: &Path) -> Result<Self> {
        let catalog = if path.exists() {
            ts::load_file(path)
                .with_context(|| format!("Failed to load catalog: {}", path.display()))?
        } else {
            Catalog::default()
        };

        Ok(Self {
            file_path: path.to_path_buf(),
            catalog,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Merge `update` into the catalog; its messages win on equal keys.
    pub fn merge(&mut self, update: Catalog) -> Result<MergeStats> {
        self.catalog
            .merge(update)
            .with_context(|| format!("Failed to merge into {}", self.file_path.display()))
    }

    /// Save the catalog back to the file it was opened from.
    pub fn save(&self) -> Result<()> {
        self.save_to(&self.file_path)
    }

    /// Save the catalog to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = serialize(&self.catalog).context("Failed to serialize catalog")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), messages = self.catalog.len(), "saved catalog");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{TranslationState, parsers::ts::load};
    use pretty_assertions::assert_eq;

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new("fr");
        catalog.version = Some("2.0".to_string());
        catalog
            .insert(
                "GensQt4::CtrlConfigWindow",
                Message::new("4-Way Play")
                    .with_disambiguation("shortDeviceName")
                    .with_extra_comment("EA 4-Way Play. (Specific brand name; only modify if it's different in your region!)")
                    .with_location("../CtrlConfigWindow.cpp", 202)
                    .unfinished(),
            )
            .unwrap();
        catalog
            .insert(
                "GensQt4::GensWindow",
                Message::new("SRAM loaded. (%n byte(s))")
                    .with_disambiguation("Onscreen Display")
                    .with_location("../GensWindow.cpp", 575)
                    .with_plural_forms(["SRAM chargée. (%n byte)", "SRAM chargée. (%n bytes)"]),
            )
            .unwrap();
        catalog
    }

    #[test]
    fn test_serialize_layout() {
        let expected = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.0" language="fr">
<context>
    <name>GensQt4::CtrlConfigWindow</name>
    <message>
        <location filename="../CtrlConfigWindow.cpp" line="202"/>
        <source>4-Way Play</source>
        <comment>shortDeviceName</comment>
        <extracomment>EA 4-Way Play. (Specific brand name; only modify if it&apos;s different in your region!)</extracomment>
        <translation type="unfinished"></translation>
    </message>
</context>
<context>
    <name>GensQt4::GensWindow</name>
    <message numerus="yes">
        <location filename="../GensWindow.cpp" line="575"/>
        <source>SRAM loaded. (%n byte(s))</source>
        <comment>Onscreen Display</comment>
        <translation>
            <numerusform>SRAM chargée. (%n byte)</numerusform>
            <numerusform>SRAM chargée. (%n bytes)</numerusform>
        </translation>
    </message>
</context>
</TS>
"#;
        assert_eq!(serialize(&sample_catalog()).unwrap(), expected);
    }

    #[test]
    fn test_round_trip() {
        let mut catalog = sample_catalog();
        catalog.source_language = Some("en".to_string());
        catalog
            .insert(
                "Escapes",
                Message::new("C&redits <\"quoted\">")
                    .with_id("credits")
                    .with_translator_comment("keep the accelerator")
                    .with_translation("&Générique\n\tsur deux lignes \u{1b}"),
            )
            .unwrap();
        catalog
            .insert(
                "Escapes",
                Message::new("Gone")
                    .with_state(TranslationState::Obsolete)
                    .with_translation("Parti"),
            )
            .unwrap();
        catalog
            .insert(
                "Escapes",
                Message::new("%n item(s)")
                    .with_plural_forms(Vec::<String>::new())
                    .unfinished(),
            )
            .unwrap();

        let text = serialize(&catalog).unwrap();
        assert_eq!(load(&text).unwrap(), catalog);
    }

    #[test]
    fn test_empty_catalog() {
        let text = serialize(&Catalog::default()).unwrap();
        assert_eq!(
            text,
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE TS>\n<TS>\n</TS>\n"
        );
        assert_eq!(load(&text).unwrap(), Catalog::default());
    }

    #[test]
    fn test_real_catalog_round_trip() {
        let original = load(include_str!("../../tests/fixtures/gens-qt4_fr.ts")).unwrap();
        assert_eq!(original.len(), 413);
        assert_eq!(original.contexts().len(), 18);
        assert_eq!(original.stats().unfinished, 29);

        let reloaded = load(&serialize(&original).unwrap()).unwrap();
        assert_eq!(reloaded, original);
    }

    #[test]
    fn test_ts_writer_merge_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("app_fr.ts");

        let mut writer = TsWriter::open_or_create(&path).unwrap();
        assert!(writer.catalog().is_empty());
        let stats = writer.merge(sample_catalog()).unwrap();
        assert_eq!(stats.added, 2);
        writer.save().unwrap();

        let reopened = TsWriter::open_or_create(&path).unwrap();
        assert_eq!(reopened.catalog(), &sample_catalog());
    }
}
