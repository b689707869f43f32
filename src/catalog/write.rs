// SPDX-License-Identifier: MPL-2.0
//! Writer for the Qt Linguist `.ts` format.
//!
//! Output follows the layout `lupdate` produces, so a file written by Qt
//! tools survives a parse/write cycle unchanged and diffs stay readable.

use super::{Catalog, Context, Location, Message, TranslationValue};
use crate::error::Result;
use quick_xml::escape::escape;
use std::fs;
use std::path::Path;

const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE TS>\n";

/// Serializes a catalog to `.ts` XML.
#[must_use]
pub fn to_string(catalog: &Catalog) -> String {
    let mut out = String::from(XML_HEADER);

    out.push_str("<TS version=\"");
    out.push_str(&escape(catalog.version.as_str()));
    out.push('"');
    if let Some(language) = &catalog.language {
        push_attribute(&mut out, "language", language);
    }
    if let Some(source_language) = &catalog.source_language {
        push_attribute(&mut out, "sourcelanguage", source_language);
    }
    out.push_str(">\n");

    for context in &catalog.contexts {
        write_context(&mut out, context);
    }

    out.push_str("</TS>\n");
    out
}

/// Writes a catalog to disk, creating parent directories as needed.
pub fn write_file<P: AsRef<Path>>(catalog: &Catalog, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, to_string(catalog))?;
    Ok(())
}

fn write_context(out: &mut String, context: &Context) {
    out.push_str("<context>\n    <name>");
    out.push_str(&escape_text(&context.name));
    out.push_str("</name>\n");
    for message in &context.messages {
        write_message(out, message);
    }
    out.push_str("</context>\n");
}

fn write_message(out: &mut String, message: &Message) {
    out.push_str("    <message");
    if let Some(id) = &message.id {
        push_attribute(out, "id", id);
    }
    if message.is_plural() {
        out.push_str(" numerus=\"yes\"");
    }
    if message.utf8 {
        out.push_str(" utf8=\"true\"");
    }
    out.push_str(">\n");

    for location in &message.locations {
        write_location(out, location);
    }

    push_element(out, "source", &message.source);
    let optional = [
        ("oldsource", &message.old_source),
        ("comment", &message.comment),
        ("extracomment", &message.extra_comment),
        ("translatorcomment", &message.translator_comment),
    ];
    for (name, value) in optional {
        if let Some(value) = value {
            push_element(out, name, value);
        }
    }

    out.push_str("        <translation");
    if let Some(state) = message.translation.state.as_attribute() {
        push_attribute(out, "type", state);
    }
    out.push('>');
    match &message.translation.value {
        TranslationValue::Text(text) => out.push_str(&escape_text(text)),
        TranslationValue::Plural(forms) if !forms.is_empty() => {
            out.push('\n');
            for form in forms {
                out.push_str("            <numerusform>");
                out.push_str(&escape_text(form));
                out.push_str("</numerusform>\n");
            }
            out.push_str("        ");
        }
        TranslationValue::Plural(_) => {}
    }
    out.push_str("</translation>\n");

    out.push_str("    </message>\n");
}

fn write_location(out: &mut String, location: &Location) {
    out.push_str("        <location");
    if let Some(filename) = &location.filename {
        push_attribute(out, "filename", filename);
    }
    if let Some(line) = location.line {
        push_attribute(out, "line", &line.to_string());
    }
    out.push_str("/>\n");
}

fn push_element(out: &mut String, name: &str, text: &str) {
    out.push_str("        <");
    out.push_str(name);
    out.push('>');
    out.push_str(&escape_text(text));
    out.push_str("</");
    out.push_str(name);
    out.push_str(">\n");
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape(value));
    out.push('"');
}

/// Control characters are not representable in XML 1.0 text; Qt writes
/// them as `<byte value="xN"/>`.
fn needs_byte_element(ch: char) -> bool {
    (ch as u32) < 0x20 && !matches!(ch, '\t' | '\n' | '\r')
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(position) = rest.find(needs_byte_element) {
        out.push_str(&escape(&rest[..position]));
        // control characters are single-byte
        let code = rest.as_bytes()[position];
        out.push_str(&format!("<byte value=\"x{:x}\"/>", code));
        rest = &rest[position + 1..];
    }
    out.push_str(&escape(rest));
    out
}
