// SPDX-License-Identifier: MPL-2.0
//! Reader for the Qt Linguist `.ts` format.
//!
//! The parser walks `quick-xml` events and builds the [`Catalog`] tree
//! directly. Text content is kept verbatim: whitespace is significant in UI
//! strings, so nothing is trimmed. Elements the model does not know about
//! (`userdata`, `extra-*`, context comments) are skipped.

use super::{
    Catalog, Context, LineRef, Location, Message, Translation, TranslationState,
    TranslationValue,
};
use crate::error::{CatalogError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::cell::Cell;
use std::fmt::Display;
use std::fs;
use std::path::Path;

/// Parses a catalog from its XML text.
pub fn parse_str(input: &str) -> std::result::Result<Catalog, CatalogError> {
    Parser::new(input).catalog()
}

/// Reads and parses a catalog file.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let content = fs::read_to_string(path)?;
    Ok(parse_str(&content)?)
}

struct Parser<'i> {
    reader: Reader<&'i [u8]>,
    input: &'i str,
    /// Last byte offset turned into a line, with the newlines before it.
    counted: Cell<(usize, usize)>,
}

impl<'i> Parser<'i> {
    fn new(input: &'i str) -> Self {
        let mut reader = Reader::from_str(input);
        reader.config_mut().trim_text(false);
        Self {
            reader,
            input,
            counted: Cell::new((0, 0)),
        }
    }

    /// Byte offset of the reader, clamped to the input.
    fn position(&self) -> usize {
        usize::try_from(self.reader.buffer_position())
            .unwrap_or(usize::MAX)
            .min(self.input.len())
    }

    /// 1-based line of the reader's current position.
    fn line(&self) -> usize {
        self.line_at(self.position())
    }

    /// 1-based line of `position`.
    ///
    /// The reader only moves forward, so counting resumes at the offset of
    /// the previous call and the whole input is scanned at most once.
    fn line_at(&self, position: usize) -> usize {
        let position = position.min(self.input.len());
        let (mut offset, mut newlines) = self.counted.get();
        if position < offset {
            (offset, newlines) = (0, 0);
        }
        newlines += count_newlines(&self.input.as_bytes()[offset..position]);
        self.counted.set((position, newlines));
        newlines + 1
    }

    fn xml_error(&self, err: impl Display) -> CatalogError {
        CatalogError::Xml {
            line: self.line(),
            message: err.to_string(),
        }
    }

    fn next(&mut self) -> std::result::Result<Event<'i>, CatalogError> {
        self.reader.read_event().map_err(|err| self.xml_error(err))
    }

    fn skip(&mut self, start: &BytesStart<'_>) -> std::result::Result<(), CatalogError> {
        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "skipping unsupported element <{}> at line {}",
                element_name(start),
                self.line()
            );
        }
        self.close(start)
    }

    /// Consumes the rest of an element whose content is not needed.
    fn close(&mut self, start: &BytesStart<'_>) -> std::result::Result<(), CatalogError> {
        self.reader
            .read_to_end(start.name())
            .map(|_| ())
            .map_err(|err| self.xml_error(err))
    }

    fn attributes(
        &self,
        start: &BytesStart<'_>,
    ) -> std::result::Result<Vec<(String, String)>, CatalogError> {
        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|err| self.xml_error(err))?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute
                .unescape_value()
                .map_err(|err| self.xml_error(err))?
                .into_owned();
            attributes.push((key, value));
        }
        Ok(attributes)
    }

    fn catalog(&mut self) -> std::result::Result<Catalog, CatalogError> {
        loop {
            match self.next()? {
                Event::Start(start) => {
                    let mut catalog = self.catalog_header(&start)?;
                    self.catalog_body(&mut catalog)?;
                    return Ok(catalog);
                }
                Event::Empty(start) => return self.catalog_header(&start),
                Event::Eof => {
                    return Err(CatalogError::UnexpectedEof {
                        element: "TS".to_string(),
                    })
                }
                // declaration, doctype, comments and stray whitespace
                _ => {}
            }
        }
    }

    fn catalog_header(
        &self,
        start: &BytesStart<'_>,
    ) -> std::result::Result<Catalog, CatalogError> {
        if start.local_name().as_ref() != b"TS" {
            return Err(CatalogError::NotACatalog {
                root: element_name(start),
            });
        }

        let mut catalog = Catalog::default();
        for (key, value) in self.attributes(start)? {
            match key.as_str() {
                "version" => catalog.version = value,
                "language" => catalog.language = Some(value),
                "sourcelanguage" => catalog.source_language = Some(value),
                _ => {}
            }
        }
        Ok(catalog)
    }

    fn catalog_body(&mut self, catalog: &mut Catalog) -> std::result::Result<(), CatalogError> {
        loop {
            match self.next()? {
                Event::Start(start) if start.local_name().as_ref() == b"context" => {
                    let context = self.context()?;
                    catalog.contexts.push(context);
                }
                Event::Start(start) => self.skip(&start)?,
                Event::End(_) => return Ok(()),
                Event::Eof => {
                    return Err(CatalogError::UnexpectedEof {
                        element: "TS".to_string(),
                    })
                }
                _ => {}
            }
        }
    }

    fn context(&mut self) -> std::result::Result<Context, CatalogError> {
        let opened_at = self.position();
        let mut name = None;
        let mut messages = Vec::new();

        loop {
            match self.next()? {
                Event::Start(start) => match start.local_name().as_ref() {
                    b"name" => name = Some(self.text("name")?),
                    b"message" => messages.push(self.message(&start)?),
                    _ => self.skip(&start)?,
                },
                Event::Empty(start) => match start.local_name().as_ref() {
                    b"name" => name = Some(String::new()),
                    b"message" => {
                        return Err(CatalogError::MissingElement {
                            line: self.line(),
                            parent: "message",
                            element: "source",
                        })
                    }
                    _ => {}
                },
                Event::End(_) => break,
                Event::Eof => {
                    return Err(CatalogError::UnexpectedEof {
                        element: "context".to_string(),
                    })
                }
                _ => {}
            }
        }

        let name = name.ok_or_else(|| CatalogError::MissingElement {
            line: self.line_at(opened_at),
            parent: "context",
            element: "name",
        })?;
        Ok(Context { name, messages })
    }

    fn message(&mut self, start: &BytesStart<'_>) -> std::result::Result<Message, CatalogError> {
        let opened_at = self.position();
        let mut message = Message::default();
        let mut numerus = false;

        for (key, value) in self.attributes(start)? {
            match key.as_str() {
                "id" => message.id = Some(value),
                "numerus" => numerus = value == "yes",
                "utf8" => message.utf8 = value == "true" || value == "both",
                // TS 1.1 marked literal text with encoding="UTF-8"
                "encoding" => message.utf8 = value.eq_ignore_ascii_case("utf-8"),
                _ => {}
            }
        }

        let mut source = None;
        let mut translation = None;

        loop {
            match self.next()? {
                Event::Start(child) => match child.local_name().as_ref() {
                    b"location" => {
                        message.locations.push(self.location(&child)?);
                        self.close(&child)?;
                    }
                    b"source" => source = Some(self.text("source")?),
                    b"oldsource" => message.old_source = Some(self.text("oldsource")?),
                    b"comment" => message.comment = Some(self.text("comment")?),
                    b"extracomment" => message.extra_comment = Some(self.text("extracomment")?),
                    b"translatorcomment" => {
                        message.translator_comment = Some(self.text("translatorcomment")?)
                    }
                    b"translation" => translation = Some(self.translation(&child, numerus)?),
                    _ => self.skip(&child)?,
                },
                Event::Empty(child) => match child.local_name().as_ref() {
                    b"location" => message.locations.push(self.location(&child)?),
                    b"source" => source = Some(String::new()),
                    b"oldsource" => message.old_source = Some(String::new()),
                    b"comment" => message.comment = Some(String::new()),
                    b"extracomment" => message.extra_comment = Some(String::new()),
                    b"translatorcomment" => message.translator_comment = Some(String::new()),
                    b"translation" => {
                        translation = Some(Translation {
                            state: self.translation_state(&child)?,
                            value: empty_value(numerus),
                        })
                    }
                    _ => {}
                },
                Event::End(_) => break,
                Event::Eof => {
                    return Err(CatalogError::UnexpectedEof {
                        element: "message".to_string(),
                    })
                }
                _ => {}
            }
        }

        message.source = source.ok_or_else(|| CatalogError::MissingElement {
            line: self.line_at(opened_at),
            parent: "message",
            element: "source",
        })?;
        message.translation = translation.unwrap_or(Translation {
            state: TranslationState::Finished,
            value: empty_value(numerus),
        });
        Ok(message)
    }

    fn location(&self, start: &BytesStart<'_>) -> std::result::Result<Location, CatalogError> {
        let mut location = Location::default();
        for (key, value) in self.attributes(start)? {
            match key.as_str() {
                "filename" => location.filename = Some(value),
                "line" => {
                    let line = value.parse::<LineRef>().map_err(|_| {
                        CatalogError::InvalidAttribute {
                            line: self.line(),
                            attribute: key.clone(),
                            value: value.clone(),
                        }
                    })?;
                    location.line = Some(line);
                }
                _ => {}
            }
        }
        Ok(location)
    }

    fn translation_state(
        &self,
        start: &BytesStart<'_>,
    ) -> std::result::Result<TranslationState, CatalogError> {
        for (key, value) in self.attributes(start)? {
            if key == "type" {
                return match TranslationState::from_attribute(&value) {
                    Some(state) => Ok(state),
                    None => Err(CatalogError::InvalidAttribute {
                        line: self.line(),
                        attribute: key,
                        value,
                    }),
                };
            }
        }
        Ok(TranslationState::Finished)
    }

    fn translation(
        &mut self,
        start: &BytesStart<'_>,
        numerus: bool,
    ) -> std::result::Result<Translation, CatalogError> {
        let state = self.translation_state(start)?;
        if !numerus {
            let text = self.text("translation")?;
            return Ok(Translation {
                state,
                value: TranslationValue::Text(text),
            });
        }

        let mut forms = Vec::new();
        loop {
            match self.next()? {
                Event::Start(child) if child.local_name().as_ref() == b"numerusform" => {
                    forms.push(self.text("numerusform")?);
                }
                Event::Empty(child) if child.local_name().as_ref() == b"numerusform" => {
                    forms.push(String::new());
                }
                Event::Start(child) => self.skip(&child)?,
                Event::End(_) => break,
                Event::Eof => {
                    return Err(CatalogError::UnexpectedEof {
                        element: "translation".to_string(),
                    })
                }
                // indentation between the forms
                _ => {}
            }
        }

        Ok(Translation {
            state,
            value: TranslationValue::Plural(forms),
        })
    }

    /// Collects the text of the current element up to its end tag.
    fn text(&mut self, element: &str) -> std::result::Result<String, CatalogError> {
        let mut text = String::new();
        loop {
            match self.next()? {
                Event::Text(chunk) => {
                    let chunk = chunk.unescape().map_err(|err| self.xml_error(err))?;
                    text.push_str(&chunk);
                }
                Event::CData(chunk) => text.push_str(&String::from_utf8_lossy(&chunk)),
                Event::Empty(child) if child.local_name().as_ref() == b"byte" => {
                    text.push(self.byte(&child)?);
                }
                Event::Start(child) => self.skip(&child)?,
                Event::End(_) => return Ok(text),
                Event::Eof => {
                    return Err(CatalogError::UnexpectedEof {
                        element: element.to_string(),
                    })
                }
                _ => {}
            }
        }
    }

    /// Decodes Qt's `<byte value="x1b"/>` escape for control characters.
    fn byte(&self, start: &BytesStart<'_>) -> std::result::Result<char, CatalogError> {
        let raw = self
            .attributes(start)?
            .into_iter()
            .find(|(key, _)| key == "value")
            .map(|(_, value)| value)
            .unwrap_or_default();

        let code = match raw.strip_prefix('x').or_else(|| raw.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => raw.parse::<u32>().ok(),
        };

        code.and_then(char::from_u32)
            .ok_or_else(|| CatalogError::InvalidAttribute {
                line: self.line(),
                attribute: "value".to_string(),
                value: raw,
            })
    }
}

fn empty_value(numerus: bool) -> TranslationValue {
    if numerus {
        TranslationValue::Plural(Vec::new())
    } else {
        TranslationValue::Text(String::new())
    }
}

fn count_newlines(bytes: &[u8]) -> usize {
    bytes.iter().filter(|byte| **byte == b'\n').count()
}

fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}
