//! Reader for Qt Linguist `.ts` catalogs.
//!
//! The reader is event driven (`quick-xml`) and builds the [`Catalog`] while
//! walking the document, so structural checks (duplicate keys, plural form
//! counts) run during the single pass.

use std::{collections::HashMap, fs, path::Path};

use anyhow::{Context as _, Result};
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use crate::core::{
    CatalogError, MalformedCatalog,
    data::{Catalog, Context, Location, Message, Translation, TranslationState},
};

/// A catalog together with the line of every `<message>` element.
///
/// `message_lines[c][m]` is the 1-based line of message `m` of context `c`,
/// parallel to [`Catalog::contexts`].
#[derive(Debug)]
pub struct ParsedCatalog {
    pub catalog: Catalog,
    pub message_lines: Vec<Vec<usize>>,
}

/// A parsed catalog file.
#[derive(Debug)]
pub struct CatalogFile {
    pub file_path: String,
    pub catalog: Catalog,
    pub message_lines: Vec<Vec<usize>>,
}

impl CatalogFile {
    /// Line of the `<message>` element for `(context_index, message_index)`.
    pub fn message_line(&self, context: usize, message: usize) -> usize {
        self.message_lines
            .get(context)
            .and_then(|lines| lines.get(message))
            .copied()
            .unwrap_or(1)
    }
}

/// Parse a serialized catalog.
///
/// Fails with [`CatalogError::Malformed`] when the document violates the
/// catalog structure (duplicate keys, wrong number of plural forms, ...).
pub fn load(data: &str) -> Result<Catalog, CatalogError> {
    parse_ts(data).map(|parsed| parsed.catalog)
}

/// Read and parse a catalog file.
pub fn load_file(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
    let content = fs::read_to_string(path)?;
    load(&content)
}

/// Parse a serialized catalog, keeping message line numbers.
pub fn parse_ts(data: &str) -> Result<ParsedCatalog, CatalogError> {
    let data = data.strip_prefix('\u{feff}').unwrap_or(data);
    let parsed = TsParser::new(data).parse()?;
    tracing::debug!(
        language = parsed.catalog.language().unwrap_or("?"),
        contexts = parsed.catalog.contexts().len(),
        messages = parsed.catalog.len(),
        "loaded catalog"
    );
    Ok(parsed)
}

/// Read and parse a catalog file for reporting.
pub fn parse_ts_file(path: &Path) -> Result<CatalogFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file: {:?}", path))?;
    let parsed = parse_ts(&content)
        .with_context(|| format!("Failed to parse catalog file: {:?}", path))?;

    Ok(CatalogFile {
        file_path: path.to_string_lossy().to_string(),
        catalog: parsed.catalog,
        message_lines: parsed.message_lines,
    })
}

/// Build an index of line start byte offsets for O(log n) line lookups.
fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// Find the 1-based line number for a byte offset.
fn offset_to_line(line_index: &[usize], offset: usize) -> usize {
    match line_index.binary_search(&offset) {
        Ok(line) => line + 1,
        Err(line) => line,
    }
}

/// Resolves Qt's relative `<location>` form to absolute file and line.
///
/// A missing `filename` refers to the previous location's file; a line of
/// `+N` or `-N` is relative to the last line seen in that file.
#[derive(Default)]
struct LocationResolver {
    last_file: Option<String>,
    last_lines: HashMap<String, i64>,
}

impl LocationResolver {
    fn resolve(
        &mut self,
        filename: Option<String>,
        line: Option<&str>,
    ) -> Result<Option<Location>, MalformedCatalog> {
        let file = match filename {
            Some(file) => file,
            None => match &self.last_file {
                Some(file) => file.clone(),
                None => return Ok(None),
            },
        };
        let previous = self.last_lines.get(&file).copied().unwrap_or(0);

        let line = match line {
            None => previous,
            Some(value) => {
                let parsed: i64 = value
                    .trim()
                    .parse()
                    .map_err(|_| MalformedCatalog::InvalidLine(value.to_string()))?;
                if value.starts_with(['+', '-']) {
                    previous + parsed
                } else {
                    parsed
                }
            }
        };
        let line = u32::try_from(line)
            .map_err(|_| MalformedCatalog::InvalidLine(line.to_string()))?;

        self.last_lines.insert(file.clone(), i64::from(line));
        self.last_file = Some(file.clone());
        Ok(Some(Location::new(file, line)))
    }
}

/// Content of a `<translation>` element before it is matched against `numerus`.
#[derive(Default)]
struct RawTranslation {
    text: String,
    forms: Vec<String>,
    variants: Vec<String>,
}

struct TsParser<'a> {
    reader: Reader<&'a [u8]>,
    line_index: Vec<usize>,
    locations: LocationResolver,
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

impl<'a> TsParser<'a> {
    fn new(data: &'a str) -> Self {
        Self {
            reader: Reader::from_str(data),
            line_index: build_line_index(data),
            locations: LocationResolver::default(),
        }
    }

    fn xml_error(&self, err: impl Into<quick_xml::Error>) -> CatalogError {
        CatalogError::Xml {
            position: self.reader.buffer_position() as u64,
            source: err.into(),
        }
    }

    fn next(&mut self) -> Result<Event<'a>, CatalogError> {
        let event = self.reader.read_event();
        event.map_err(|err| self.xml_error(err))
    }

    fn current_line(&self) -> usize {
        offset_to_line(&self.line_index, self.reader.buffer_position() as usize)
    }

    fn attr(&self, e: &BytesStart<'_>, name: &str) -> Result<Option<String>, CatalogError> {
        let attribute = match e.try_get_attribute(name) {
            Ok(attribute) => attribute,
            Err(err) => return Err(self.xml_error(err)),
        };
        match attribute {
            Some(attribute) => match attribute.unescape_value() {
                Ok(value) => Ok(Some(value.into_owned())),
                Err(err) => Err(self.xml_error(err)),
            },
            None => Ok(None),
        }
    }

    /// Skip an element we do not model, including its children.
    fn skip(&mut self, e: &BytesStart<'_>) -> Result<(), CatalogError> {
        let end = e.to_end().into_owned();
        let skipped = self.reader.read_to_end(end.name());
        skipped.map(|_| ()).map_err(|err| self.xml_error(err))
    }

    fn parse(mut self) -> Result<ParsedCatalog, CatalogError> {
        loop {
            match self.next()? {
                Event::Start(e) if e.name().as_ref() == b"TS" => return self.parse_root(&e),
                Event::Empty(e) if e.name().as_ref() == b"TS" => {
                    return Ok(ParsedCatalog {
                        catalog: self.root_catalog(&e)?,
                        message_lines: Vec::new(),
                    });
                }
                Event::Start(e) | Event::Empty(e) => {
                    return Err(MalformedCatalog::UnexpectedElement {
                        parent: "document".to_string(),
                        found: element_name(&e),
                    }
                    .into());
                }
                Event::Eof => return Err(MalformedCatalog::MissingRoot.into()),
                // Declaration, doctype, comments and whitespace.
                _ => {}
            }
        }
    }

    fn root_catalog(&self, e: &BytesStart<'_>) -> Result<Catalog, CatalogError> {
        let mut catalog = Catalog::default();
        catalog.version = self.attr(e, "version")?;
        catalog.source_language = self.attr(e, "sourcelanguage")?.and_then(non_empty);
        catalog.set_language(self.attr(e, "language")?);
        Ok(catalog)
    }

    fn parse_root(&mut self, e: &BytesStart<'_>) -> Result<ParsedCatalog, CatalogError> {
        let mut catalog = self.root_catalog(e)?;
        let mut message_lines = Vec::new();

        loop {
            match self.next()? {
                Event::Start(e) if e.name().as_ref() == b"context" => {
                    let (context, lines) = self.parse_context()?;
                    catalog.add_context(context)?;
                    message_lines.push(lines);
                }
                Event::Empty(e) if e.name().as_ref() == b"context" => {
                    return Err(MalformedCatalog::MissingElement {
                        element: "context",
                        child: "name",
                    }
                    .into());
                }
                // <defaultcodec>, <dependencies>, ...
                Event::Start(e) => self.skip(&e)?,
                Event::End(_) => break,
                Event::Eof => return Err(MalformedCatalog::UnexpectedEof("TS".to_string()).into()),
                _ => {}
            }
        }

        Ok(ParsedCatalog {
            catalog,
            message_lines,
        })
    }

    fn parse_context(&mut self) -> Result<(Context, Vec<usize>), CatalogError> {
        let mut name: Option<String> = None;
        let mut comment = None;
        let mut messages = Vec::new();

        loop {
            match self.next()? {
                Event::Start(e) => match e.name().as_ref() {
                    b"name" => name = Some(self.read_text("name")?),
                    b"comment" => comment = non_empty(self.read_text("comment")?),
                    b"message" => {
                        let line = self.current_line();
                        let context_name = name.clone().unwrap_or_default();
                        let message = self.parse_message(&e, &context_name)?;
                        messages.push((message, line));
                    }
                    _ => self.skip(&e)?,
                },
                Event::Empty(e) => match e.name().as_ref() {
                    b"name" => name = Some(String::new()),
                    b"message" => {
                        return Err(MalformedCatalog::MissingElement {
                            element: "message",
                            child: "source",
                        }
                        .into());
                    }
                    _ => {}
                },
                Event::End(_) => break,
                Event::Eof => {
                    return Err(MalformedCatalog::UnexpectedEof("context".to_string()).into());
                }
                _ => {}
            }
        }

        let name = name.ok_or(MalformedCatalog::MissingElement {
            element: "context",
            child: "name",
        })?;
        let mut context = Context::new(name);
        context.comment = comment;

        let mut lines = Vec::with_capacity(messages.len());
        for (message, line) in messages {
            context.insert(message)?;
            lines.push(line);
        }
        Ok((context, lines))
    }

    fn parse_message(
        &mut self,
        start: &BytesStart<'_>,
        context_name: &str,
    ) -> Result<Message, CatalogError> {
        let numerus = self.attr(start, "numerus")?.as_deref() == Some("yes");
        let mut message = Message {
            id: self.attr(start, "id")?.and_then(non_empty),
            ..Default::default()
        };
        let mut source = None;
        let mut translation = None;

        loop {
            match self.next()? {
                Event::Start(e) => match e.name().as_ref() {
                    b"source" => source = Some(self.read_text("source")?),
                    b"oldsource" => message.old_source = Some(self.read_text("oldsource")?),
                    b"comment" => message.disambiguation = non_empty(self.read_text("comment")?),
                    b"oldcomment" => {
                        message.old_disambiguation = non_empty(self.read_text("oldcomment")?)
                    }
                    b"extracomment" => {
                        message.extra_comment = non_empty(self.read_text("extracomment")?)
                    }
                    b"translatorcomment" => {
                        message.translator_comment =
                            non_empty(self.read_text("translatorcomment")?)
                    }
                    b"translation" => translation = Some(self.parse_translation(&e)?),
                    b"location" => {
                        self.push_location(&e, &mut message)?;
                        self.skip(&e)?;
                    }
                    // <userdata>, <extra-*>, ...
                    _ => self.skip(&e)?,
                },
                Event::Empty(e) => match e.name().as_ref() {
                    b"location" => self.push_location(&e, &mut message)?,
                    b"source" => source = Some(String::new()),
                    b"translation" => {
                        translation = Some((self.translation_state(&e)?, RawTranslation::default()))
                    }
                    _ => {}
                },
                Event::End(_) => break,
                Event::Eof => {
                    return Err(MalformedCatalog::UnexpectedEof("message".to_string()).into());
                }
                _ => {}
            }
        }

        message.source = source.ok_or(MalformedCatalog::MissingElement {
            element: "message",
            child: "source",
        })?;

        // A message without <translation> has never been translated.
        let (state, raw) =
            translation.unwrap_or((TranslationState::Unfinished, RawTranslation::default()));
        message.state = state;
        message.translation = if numerus {
            if raw.forms.is_empty() && !raw.text.trim().is_empty() {
                return Err(MalformedCatalog::PluralWithoutForms {
                    context: context_name.to_string(),
                    source_text: message.source,
                }
                .into());
            }
            Translation::Plural(raw.forms)
        } else {
            if !raw.forms.is_empty() {
                return Err(MalformedCatalog::UnexpectedPluralForms {
                    context: context_name.to_string(),
                    source_text: message.source,
                }
                .into());
            }
            Translation::Single(raw.variants.into_iter().next().unwrap_or(raw.text))
        };

        Ok(message)
    }

    fn push_location(
        &mut self,
        e: &BytesStart<'_>,
        message: &mut Message,
    ) -> Result<(), CatalogError> {
        let filename = self.attr(e, "filename")?;
        let line = self.attr(e, "line")?;
        if let Some(location) = self.locations.resolve(filename, line.as_deref())? {
            message.locations.push(location);
        }
        Ok(())
    }

    fn translation_state(&self, e: &BytesStart<'_>) -> Result<TranslationState, CatalogError> {
        Ok(self
            .attr(e, "type")?
            .as_deref()
            .and_then(TranslationState::from_type_attr)
            .unwrap_or_default())
    }

    fn parse_translation(
        &mut self,
        start: &BytesStart<'_>,
    ) -> Result<(TranslationState, RawTranslation), CatalogError> {
        let state = self.translation_state(start)?;
        let mut raw = RawTranslation::default();

        loop {
            match self.next()? {
                Event::Text(t) => {
                    let text = t.unescape().map_err(|err| self.xml_error(err))?;
                    raw.text.push_str(&text);
                }
                Event::CData(c) => raw.text.push_str(&String::from_utf8_lossy(&c)),
                Event::Start(e) => match e.name().as_ref() {
                    b"numerusform" => raw.forms.push(self.read_text("numerusform")?),
                    b"lengthvariant" => raw.variants.push(self.read_text("lengthvariant")?),
                    _ => self.skip(&e)?,
                },
                Event::Empty(e) => match e.name().as_ref() {
                    b"numerusform" => raw.forms.push(String::new()),
                    b"byte" => raw.text.push(self.byte_char(&e)?),
                    _ => {}
                },
                Event::End(_) => break,
                Event::Eof => {
                    return Err(MalformedCatalog::UnexpectedEof("translation".to_string()).into());
                }
                _ => {}
            }
        }

        Ok((state, raw))
    }

    /// Collect the text content of a leaf element up to its end tag.
    ///
    /// Only the first `<lengthvariant>` of an element contributes text.
    fn read_text(&mut self, tag: &'static str) -> Result<String, CatalogError> {
        let mut text = String::new();
        let mut variant_seen = false;

        loop {
            match self.next()? {
                Event::Text(t) => {
                    let unescaped = t.unescape().map_err(|err| self.xml_error(err))?;
                    text.push_str(&unescaped);
                }
                Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c)),
                Event::Empty(e) if e.name().as_ref() == b"byte" => text.push(self.byte_char(&e)?),
                Event::Start(e) if e.name().as_ref() == b"lengthvariant" => {
                    let variant = self.read_text("lengthvariant")?;
                    if !variant_seen {
                        text.push_str(&variant);
                        variant_seen = true;
                    }
                }
                Event::Start(e) | Event::Empty(e) => {
                    return Err(MalformedCatalog::UnexpectedElement {
                        parent: tag.to_string(),
                        found: element_name(&e),
                    }
                    .into());
                }
                Event::End(_) => return Ok(text),
                Event::Eof => return Err(MalformedCatalog::UnexpectedEof(tag.to_string()).into()),
                _ => {}
            }
        }
    }

    /// Decode `<byte value="x1b"/>` (hex) or `<byte value="27"/>` (decimal).
    fn byte_char(&self, e: &BytesStart<'_>) -> Result<char, CatalogError> {
        let value = self.attr(e, "value")?.unwrap_or_default();
        let code = match value.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => value.parse::<u32>().ok(),
        };
        code.and_then(char::from_u32)
            .ok_or_else(|| MalformedCatalog::InvalidByte(value).into())
    }
}
