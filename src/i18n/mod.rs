// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! This module picks the UI locale at startup, loads the matching Qt
//! Linguist catalog and hands out translated strings.
//!
//! # Features
//!
//! - Automatic locale detection from CLI, config, or system settings
//! - Catalogs from a user directory or bundled into the binary
//! - Runtime language switching (a new table replaces the old one)
//! - Fallback to the source text when translations are missing

pub mod store;

pub use store::{file_stems, normalize_locale, CatalogStore};

use crate::config::{Config, DEFAULT_LOCALE};
use crate::paths;
use crate::translator::{Translator, Unfinished};
use std::path::Path;
use std::sync::Arc;
use unic_langid::LanguageIdentifier;

pub struct I18n {
    store: CatalogStore,
    unfinished: Unfinished,
    pub available_locales: Vec<LanguageIdentifier>,
    current_locale: LanguageIdentifier,
    translator: Arc<Translator>,
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(None, &Config::default())
    }
}

impl I18n {
    pub fn new(cli_lang: Option<String>, config: &Config) -> Self {
        let dir = paths::get_catalog_dir(config.catalog_dir.clone());
        Self::with_store(cli_lang, config, CatalogStore::new(dir))
    }

    pub fn with_store(cli_lang: Option<String>, config: &Config, store: CatalogStore) -> Self {
        let unfinished = Unfinished::from_flag(config.include_unfinished());
        let available_locales = store.available_locales();

        let current_locale = resolve_locale(cli_lang.as_deref(), config, &available_locales)
            .unwrap_or_else(default_locale);
        let translator = store.load(&current_locale, unfinished);
        log::info!(
            "locale {} with {} translation(s)",
            current_locale,
            translator.len()
        );

        Self {
            store,
            unfinished,
            available_locales,
            current_locale,
            translator: Arc::new(translator),
        }
    }

    pub fn current_locale(&self) -> &LanguageIdentifier {
        &self.current_locale
    }

    /// Directory searched before the bundled catalogs, if any.
    pub fn catalog_dir(&self) -> Option<&Path> {
        self.store.dir()
    }

    /// Shared handle on the active table, e.g. for worker threads.
    pub fn translator(&self) -> Arc<Translator> {
        Arc::clone(&self.translator)
    }

    /// Switches to `locale` if a catalog exists for it.
    ///
    /// Returns whether the locale changed. The previous table is dropped
    /// once the last handle on it goes away.
    pub fn set_locale(&mut self, locale: LanguageIdentifier) -> bool {
        if !is_available(&locale, &self.available_locales) {
            return false;
        }
        self.translator = Arc::new(self.store.load(&locale, self.unfinished));
        self.current_locale = locale;
        true
    }

    pub fn tr<'a>(&'a self, context: &str, source: &'a str) -> &'a str {
        self.translator.lookup(context, source)
    }

    pub fn tr_plural(&self, context: &str, source: &str, n: i64) -> String {
        self.translator.lookup_plural(context, source, n)
    }
}

fn default_locale() -> LanguageIdentifier {
    DEFAULT_LOCALE.parse().unwrap_or_default()
}

/// A locale is usable when one of its catalog stems exists.
fn is_available(locale: &LanguageIdentifier, available: &[LanguageIdentifier]) -> bool {
    let stems = file_stems(locale);
    available
        .iter()
        .filter_map(|candidate| file_stems(candidate).into_iter().next())
        .any(|stem| stems.contains(&stem))
}

fn resolve_locale(
    cli_lang: Option<&str>,
    config: &Config,
    available: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    // 1. Check CLI args
    if let Some(lang) = cli_lang.and_then(normalize_locale) {
        if is_available(&lang, available) {
            return Some(lang);
        }
        log::debug!("no catalog for requested locale {}", lang);
    }

    // 2. Check config file
    if let Some(lang) = config.language.as_deref().and_then(normalize_locale) {
        if is_available(&lang, available) {
            return Some(lang);
        }
    }

    // 3. Check OS locale
    if let Some(os_lang) = sys_locale::get_locale()
        .as_deref()
        .and_then(normalize_locale)
    {
        if is_available(&os_lang, available) {
            return Some(os_lang);
        }
    }

    None
}
