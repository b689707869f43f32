// SPDX-License-Identifier: MPL-2.0
//! Translation catalog data model.
//!
//! A [`Catalog`] mirrors one Qt Linguist `.ts` file: a list of UI contexts
//! (one per dialog or window), each holding the messages that appear in it.
//! Catalogs are built by [`parse`] and written back by [`write`]; lookups go
//! through [`crate::translator::Translator`], which indexes a catalog once.
//!
//! # Examples
//!
//! ```
//! use monav_l10n::catalog;
//!
//! let ts = r#"<?xml version="1.0" encoding="utf-8"?>
//! <!DOCTYPE TS>
//! <TS version="2.0" language="de_DE">
//! <context>
//!     <name>BookmarksDialog</name>
//!     <message>
//!         <location filename="../client/bookmarksdialog.ui" line="54"/>
//!         <source>Delete</source>
//!         <translation>Löschen</translation>
//!     </message>
//! </context>
//! </TS>
//! "#;
//!
//! let catalog = catalog::parse_str(ts).unwrap();
//! assert_eq!(catalog.language.as_deref(), Some("de_DE"));
//! assert_eq!(catalog.contexts[0].messages[0].translation.text(), Some("Löschen"));
//! assert_eq!(catalog::to_string(&catalog), ts);
//! ```

pub mod parse;
pub mod write;

pub use parse::{parse_file, parse_str};
pub use write::{to_string, write_file};

use crate::config::defaults::DEFAULT_FORMAT_VERSION;
use std::fmt;

/// One `.ts` file: every context for a single target language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// Format version from the `TS` element (`"2.0"`, `"2.1"`).
    pub version: String,
    /// Target language as written in the file, e.g. `de_DE`.
    pub language: Option<String>,
    /// Language the source texts are authored in.
    pub source_language: Option<String>,
    pub contexts: Vec<Context>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            version: DEFAULT_FORMAT_VERSION.to_string(),
            language: None,
            source_language: None,
            contexts: Vec::new(),
        }
    }
}

impl Catalog {
    /// Creates an empty catalog for the given target language.
    #[must_use]
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: Some(language.into()),
            ..Self::default()
        }
    }

    /// Iterates every message together with the name of its context.
    pub fn messages(&self) -> impl Iterator<Item = (&str, &Message)> {
        self.contexts.iter().flat_map(|context| {
            context
                .messages
                .iter()
                .map(move |message| (context.name.as_str(), message))
        })
    }

    /// Returns the first context block with the given name.
    pub fn context(&self, name: &str) -> Option<&Context> {
        self.contexts.iter().find(|context| context.name == name)
    }

    /// Returns `true` when the catalog holds no messages at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contexts.iter().all(|context| context.messages.is_empty())
    }

    /// Counts messages by translation status, as `lrelease` reports them.
    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        let mut stats = CatalogStats {
            contexts: self.contexts.len(),
            ..CatalogStats::default()
        };

        for (_, message) in self.messages() {
            stats.messages += 1;
            match message.translation.state {
                TranslationState::Obsolete | TranslationState::Vanished => stats.obsolete += 1,
                TranslationState::Unfinished if message.is_translated() => stats.unfinished += 1,
                _ if message.is_translated() => stats.translated += 1,
                _ => stats.untranslated += 1,
            }
        }

        stats
    }
}

/// Message counts of a catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogStats {
    pub contexts: usize,
    pub messages: usize,
    /// Finished messages with a non-empty translation.
    pub translated: usize,
    /// Unfinished messages that nevertheless carry text.
    pub unfinished: usize,
    /// Live messages with an empty translation.
    pub untranslated: usize,
    /// Obsolete or vanished messages, never used for lookup.
    pub obsolete: usize,
}

impl fmt::Display for CatalogStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} context(s), {} message(s): {} finished, {} unfinished, {} untranslated, {} obsolete",
            self.contexts,
            self.messages,
            self.translated,
            self.unfinished,
            self.untranslated,
            self.obsolete
        )
    }
}

/// The strings of one UI component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    pub name: String,
    pub messages: Vec<Message>,
}

impl Context {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            messages: Vec::new(),
        }
    }

    /// Finds a message by its source text, ignoring disambiguation comments.
    pub fn message(&self, source: &str) -> Option<&Message> {
        self.messages.iter().find(|message| message.source == source)
    }
}

/// A single translatable string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pub id: Option<String>,
    /// Literal/encoded-text marker (`utf8="true"`).
    pub utf8: bool,
    /// Where the string appears in the UI sources. Informational only.
    pub locations: Vec<Location>,
    pub source: String,
    pub old_source: Option<String>,
    /// Disambiguation comment; part of the lookup key.
    pub comment: Option<String>,
    pub extra_comment: Option<String>,
    pub translator_comment: Option<String>,
    pub translation: Translation,
}

impl Message {
    /// Creates a finished message with a single translation.
    #[must_use]
    pub fn new(source: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            translation: Translation::finished(translation),
            ..Self::default()
        }
    }

    /// Adds a location hint.
    #[must_use]
    pub fn at(mut self, filename: impl Into<String>, line: u32) -> Self {
        self.locations.push(Location {
            filename: Some(filename.into()),
            line: Some(LineRef::Absolute(line)),
        });
        self
    }

    /// Whether the message has usable translated text.
    #[must_use]
    pub fn is_translated(&self) -> bool {
        match &self.translation.value {
            TranslationValue::Text(text) => !text.is_empty(),
            TranslationValue::Plural(forms) => forms.iter().any(|form| !form.is_empty()),
        }
    }

    /// Plural messages carry `numerus="yes"`.
    #[must_use]
    pub fn is_plural(&self) -> bool {
        matches!(self.translation.value, TranslationValue::Plural(_))
    }
}

/// A source location hint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub filename: Option<String>,
    pub line: Option<LineRef>,
}

/// Line attribute of a location.
///
/// `lupdate -locations relative` writes offsets from the previous hint
/// (`line="+3"`); absolute mode writes plain numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRef {
    Absolute(u32),
    Relative(i32),
}

impl fmt::Display for LineRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineRef::Absolute(line) => write!(f, "{}", line),
            LineRef::Relative(offset) => write!(f, "{:+}", offset),
        }
    }
}

impl std::str::FromStr for LineRef {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.starts_with('+') || s.starts_with('-') {
            s.parse::<i32>().map(LineRef::Relative)
        } else {
            s.parse::<u32>().map(LineRef::Absolute)
        }
    }
}

/// Translation status from the `type` attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TranslationState {
    #[default]
    Finished,
    Unfinished,
    Obsolete,
    Vanished,
}

impl TranslationState {
    /// Value of the `type` attribute, `None` for finished translations.
    #[must_use]
    pub fn as_attribute(self) -> Option<&'static str> {
        match self {
            TranslationState::Finished => None,
            TranslationState::Unfinished => Some("unfinished"),
            TranslationState::Obsolete => Some("obsolete"),
            TranslationState::Vanished => Some("vanished"),
        }
    }

    /// Parses a `type` attribute value.
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "unfinished" => Some(TranslationState::Unfinished),
            "obsolete" => Some(TranslationState::Obsolete),
            "vanished" => Some(TranslationState::Vanished),
            _ => None,
        }
    }

    /// Obsolete and vanished entries stay in the file but are never shown.
    #[must_use]
    pub fn is_live(self) -> bool {
        matches!(
            self,
            TranslationState::Finished | TranslationState::Unfinished
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translation {
    pub state: TranslationState,
    pub value: TranslationValue,
}

impl Translation {
    #[must_use]
    pub fn finished(text: impl Into<String>) -> Self {
        Self {
            state: TranslationState::Finished,
            value: TranslationValue::Text(text.into()),
        }
    }

    #[must_use]
    pub fn unfinished(text: impl Into<String>) -> Self {
        Self {
            state: TranslationState::Unfinished,
            value: TranslationValue::Text(text.into()),
        }
    }

    /// Singular text, `None` for plural translations.
    pub fn text(&self) -> Option<&str> {
        match &self.value {
            TranslationValue::Text(text) => Some(text),
            TranslationValue::Plural(_) => None,
        }
    }
}

/// Translated text: either a single string or the numerus forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationValue {
    Text(String),
    Plural(Vec<String>),
}

impl Default for TranslationValue {
    fn default() -> Self {
        TranslationValue::Text(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        let mut catalog = Catalog::new("de_DE");
        let mut gps = Context::new("GPSDialog");
        gps.messages.push(Message::new("GPS Information", ""));
        gps.messages.push(Message::new("Latitude:", "Breitengrad:"));
        let mut main = Context::new("MainWindow");
        main.messages.push(Message {
            translation: Translation::unfinished("Zoom"),
            ..Message::new("Zoom", "")
        });
        main.messages.push(Message {
            translation: Translation {
                state: TranslationState::Obsolete,
                value: TranslationValue::Text("Alt".into()),
            },
            ..Message::new("Old", "")
        });
        catalog.contexts.push(gps);
        catalog.contexts.push(main);
        catalog
    }

    #[test]
    fn stats_classify_each_message_once() {
        let stats = sample().stats();
        assert_eq!(stats.contexts, 2);
        assert_eq!(stats.messages, 4);
        assert_eq!(stats.translated, 1);
        assert_eq!(stats.untranslated, 1);
        assert_eq!(stats.unfinished, 1);
        assert_eq!(stats.obsolete, 1);
    }

    #[test]
    fn messages_iterates_with_context_names() {
        let catalog = sample();
        let names: Vec<_> = catalog.messages().map(|(ctx, m)| (ctx, m.source.as_str())).collect();
        assert_eq!(names[0], ("GPSDialog", "GPS Information"));
        assert_eq!(names[3], ("MainWindow", "Old"));
    }

    #[test]
    fn empty_plural_forms_are_not_translated() {
        let message = Message {
            translation: Translation {
                state: TranslationState::Finished,
                value: TranslationValue::Plural(vec![String::new(), String::new()]),
            },
            ..Message::new("%n file(s)", "")
        };
        assert!(message.is_plural());
        assert!(!message.is_translated());
    }

    #[test]
    fn line_ref_parses_absolute_and_relative() {
        assert_eq!("14".parse::<LineRef>(), Ok(LineRef::Absolute(14)));
        assert_eq!("+3".parse::<LineRef>(), Ok(LineRef::Relative(3)));
        assert_eq!("-2".parse::<LineRef>(), Ok(LineRef::Relative(-2)));
        assert!("x".parse::<LineRef>().is_err());
        assert_eq!(LineRef::Relative(3).to_string(), "+3");
        assert_eq!(LineRef::Relative(-2).to_string(), "-2");
    }

    #[test]
    fn translation_state_attribute_mapping() {
        assert_eq!(TranslationState::Finished.as_attribute(), None);
        assert_eq!(
            TranslationState::from_attribute("vanished"),
            Some(TranslationState::Vanished)
        );
        assert_eq!(TranslationState::from_attribute("bogus"), None);
        assert!(!TranslationState::Obsolete.is_live());
    }

    #[test]
    fn default_catalog_is_empty() {
        let catalog = Catalog::default();
        assert!(catalog.is_empty());
        assert_eq!(catalog.version, DEFAULT_FORMAT_VERSION);
    }
}
