// SPDX-License-Identifier: MPL-2.0
//! Read-only lookup table built from a catalog.
//!
//! A [`Translator`] is created once, when the catalog for the active locale
//! is loaded, and never changes afterwards. Lookups take `&self` only, so a
//! translator can be shared between threads behind an `Arc` or installed
//! process-wide with [`install`].
//!
//! A missing translation is not an error: every lookup falls back to the
//! source text it was given.

use crate::args::fill_count;
use crate::catalog::{Catalog, TranslationState, TranslationValue};
use crate::plural::PluralRule;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Whether translations marked `type="unfinished"` are used.
///
/// `lrelease` ships unfinished translations unless told otherwise, and so
/// does the loader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Unfinished {
    #[default]
    Include,
    Skip,
}

impl Unfinished {
    #[must_use]
    pub fn from_flag(include: bool) -> Self {
        if include {
            Unfinished::Include
        } else {
            Unfinished::Skip
        }
    }
}

#[derive(Debug, Clone)]
enum Entry {
    Text(String),
    Plural(Vec<String>),
}

impl Entry {
    fn text(&self) -> Option<&str> {
        match self {
            Entry::Text(text) => Some(text),
            Entry::Plural(forms) => forms.first().map(String::as_str).filter(|f| !f.is_empty()),
        }
    }
}

#[derive(Debug, Clone)]
struct Variant {
    /// Disambiguation comment, empty when the message has none.
    comment: String,
    entry: Entry,
}

/// Immutable `(context, source) -> translation` table.
#[derive(Debug, Clone)]
pub struct Translator {
    language: Option<String>,
    rule: PluralRule,
    contexts: HashMap<String, HashMap<String, Vec<Variant>>>,
    len: usize,
}

impl Default for Translator {
    fn default() -> Self {
        Self::empty()
    }
}

impl Translator {
    /// A translator without entries: every lookup returns its input.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            language: None,
            rule: PluralRule::OneOther,
            contexts: HashMap::new(),
            len: 0,
        }
    }

    /// Indexes every usable translation of `catalog`.
    ///
    /// Obsolete and vanished messages are ignored, and so are messages with
    /// an empty translation, which makes them fall back to their source.
    /// When a `(context, source, comment)` key occurs twice the first
    /// translated occurrence wins.
    #[must_use]
    pub fn from_catalog(catalog: &Catalog, unfinished: Unfinished) -> Self {
        let mut translator = Self {
            language: catalog.language.clone(),
            rule: catalog
                .language
                .as_deref()
                .map(PluralRule::for_language)
                .unwrap_or(PluralRule::OneOther),
            ..Self::empty()
        };

        for (context, message) in catalog.messages() {
            let state = message.translation.state;
            if !state.is_live() || !message.is_translated() {
                continue;
            }
            if state == TranslationState::Unfinished && unfinished == Unfinished::Skip {
                continue;
            }

            let comment = message.comment.clone().unwrap_or_default();
            let variants = translator
                .contexts
                .entry(context.to_string())
                .or_default()
                .entry(message.source.clone())
                .or_default();

            if variants.iter().any(|variant| variant.comment == comment) {
                log::warn!(
                    "duplicate message {:?} in context {}; keeping the first translation",
                    message.source,
                    context
                );
                continue;
            }

            let entry = match &message.translation.value {
                TranslationValue::Text(text) => Entry::Text(text.clone()),
                TranslationValue::Plural(forms) => Entry::Plural(forms.clone()),
            };
            variants.push(Variant { comment, entry });
            translator.len += 1;
        }

        translator
    }

    /// Target language of the catalog this table was built from.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Plural rule used by [`Translator::lookup_plural`].
    #[must_use]
    pub fn plural_rule(&self) -> PluralRule {
        self.rule
    }

    /// Number of indexed translations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether a non-empty translation exists for the key.
    #[must_use]
    pub fn contains(&self, context: &str, source: &str) -> bool {
        self.find(context, source, "").is_some()
    }

    /// Returns the display text for `source` in `context`.
    ///
    /// # Example
    ///
    /// ```
    /// use monav_l10n::catalog::{Catalog, Context, Message};
    /// use monav_l10n::translator::{Translator, Unfinished};
    ///
    /// let mut catalog = Catalog::new("de_DE");
    /// let mut context = Context::new("BookmarksDialog");
    /// context.messages.push(Message::new("Delete", "Löschen"));
    /// catalog.contexts.push(context);
    ///
    /// let translator = Translator::from_catalog(&catalog, Unfinished::Include);
    /// assert_eq!(translator.lookup("BookmarksDialog", "Delete"), "Löschen");
    /// assert_eq!(translator.lookup("MainWindow", "Unknown Label"), "Unknown Label");
    /// ```
    pub fn lookup<'a>(&'a self, context: &str, source: &'a str) -> &'a str {
        self.find(context, source, "")
            .and_then(Entry::text)
            .unwrap_or(source)
    }

    /// Like [`Translator::lookup`] for messages carrying a disambiguation
    /// comment. An exact comment match is preferred, then the message
    /// without a comment.
    pub fn lookup_disambiguated<'a>(
        &'a self,
        context: &str,
        source: &'a str,
        comment: &str,
    ) -> &'a str {
        self.find(context, source, comment)
            .and_then(Entry::text)
            .unwrap_or(source)
    }

    /// Returns the numerus form for `n` with `%n` replaced by the count.
    ///
    /// Without a usable translation the source text is used as template.
    #[must_use]
    pub fn lookup_plural(&self, context: &str, source: &str, n: i64) -> String {
        let template = match self.find(context, source, "") {
            Some(Entry::Plural(forms)) => self
                .rule
                .select(forms, n)
                .filter(|form| !form.is_empty())
                .unwrap_or(source),
            Some(Entry::Text(text)) => text.as_str(),
            None => source,
        };
        fill_count(template, n)
    }

    fn find(&self, context: &str, source: &str, comment: &str) -> Option<&Entry> {
        let variants = self.contexts.get(context)?.get(source)?;
        variants
            .iter()
            .find(|variant| variant.comment == comment)
            .or_else(|| variants.iter().find(|variant| variant.comment.is_empty()))
            .map(|variant| &variant.entry)
    }
}

static INSTALLED: OnceLock<Translator> = OnceLock::new();

/// Installs the process-wide translator used by [`tr`].
///
/// Can only succeed once; a second call hands the translator back.
pub fn install(translator: Translator) -> Result<(), Translator> {
    INSTALLED.set(translator)
}

/// The installed translator, if any.
pub fn installed() -> Option<&'static Translator> {
    INSTALLED.get()
}

/// Looks `source` up in the installed translator, returning it unchanged
/// when none is installed.
pub fn tr<'a>(context: &str, source: &'a str) -> &'a str {
    match INSTALLED.get() {
        Some(translator) => translator.lookup(context, source),
        None => source,
    }
}
