// SPDX-License-Identifier: MPL-2.0
//! Locating and loading catalogs for a locale.
//!
//! Catalogs are looked up by file stem the way `QTranslator::load` searches:
//! `de_DE.ts` first, then `de.ts`. A user directory takes precedence over
//! the catalogs bundled into the binary.

use crate::catalog::{self, Catalog};
use crate::config::CATALOG_EXTENSION;
use crate::translator::{Translator, Unfinished};
use rust_embed::RustEmbed;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "assets/translations/"]
struct Asset;

/// Parses a locale name as found in settings, CLI flags or the
/// environment (`de_DE`, `de-DE`, `de_DE.UTF-8@euro`).
///
/// The POSIX `C` locale and empty strings name no language.
pub fn normalize_locale(raw: &str) -> Option<LanguageIdentifier> {
    let base = raw.split(['.', '@']).next().unwrap_or_default().trim();
    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }
    base.parse().ok()
}

/// Catalog file stems to try for `locale`, most specific first.
#[must_use]
pub fn file_stems(locale: &LanguageIdentifier) -> Vec<String> {
    let language = locale.language.as_str();
    let mut stems = Vec::with_capacity(2);
    if let Some(region) = locale.region {
        stems.push(format!("{}_{}", language, region.as_str()));
    }
    stems.push(language.to_string());
    stems
}

/// Where catalogs come from.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    dir: Option<PathBuf>,
    embedded: bool,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new(None)
    }
}

impl CatalogStore {
    /// A store reading `dir` (when given) and the bundled catalogs.
    #[must_use]
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self {
            dir,
            embedded: true,
        }
    }

    /// A store that ignores the bundled catalogs.
    #[must_use]
    pub fn directory_only(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
            embedded: false,
        }
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// Locales for which a catalog file exists, sorted by name.
    #[must_use]
    pub fn available_locales(&self) -> Vec<LanguageIdentifier> {
        let mut found = BTreeMap::new();

        if self.embedded {
            for name in Asset::iter() {
                if let Some(locale) = locale_of_file_name(&name) {
                    found.insert(locale.to_string(), locale);
                }
            }
        }

        if let Some(dir) = &self.dir {
            match fs::read_dir(dir) {
                Ok(entries) => {
                    for entry in entries.flatten() {
                        let name = entry.file_name();
                        if let Some(locale) = name.to_str().and_then(locale_of_file_name) {
                            found.insert(locale.to_string(), locale);
                        }
                    }
                }
                Err(err) => log::debug!("cannot list catalogs in {}: {}", dir.display(), err),
            }
        }

        found.into_values().collect()
    }

    /// Loads the catalog for `locale`.
    ///
    /// The first existing candidate is used. A candidate that cannot be read
    /// or parsed counts as no catalog at all: the problem is logged and
    /// `None` is returned, leaving the UI in its source language.
    pub fn load_catalog(&self, locale: &LanguageIdentifier) -> Option<Catalog> {
        for stem in file_stems(locale) {
            let Some((origin, content)) = self.read(&stem) else {
                continue;
            };

            return match catalog::parse_str(&content) {
                Ok(catalog) => {
                    log::debug!("using catalog {} for {}", origin, locale);
                    Some(catalog)
                }
                Err(err) => {
                    log::warn!("ignoring malformed catalog {}: {}", origin, err);
                    None
                }
            };
        }

        log::debug!("no catalog for {}", locale);
        None
    }

    /// Builds the lookup table for `locale`; never fails.
    #[must_use]
    pub fn load(&self, locale: &LanguageIdentifier, unfinished: Unfinished) -> Translator {
        self.load_catalog(locale)
            .map(|catalog| Translator::from_catalog(&catalog, unfinished))
            .unwrap_or_default()
    }

    fn read(&self, stem: &str) -> Option<(String, String)> {
        let file_name = format!("{}.{}", stem, CATALOG_EXTENSION);

        if let Some(dir) = &self.dir {
            let path = dir.join(&file_name);
            if path.is_file() {
                let origin = path.display().to_string();
                return match fs::read(&path) {
                    Ok(bytes) => {
                        let content = decode(&origin, bytes);
                        Some((origin, content))
                    }
                    Err(err) => {
                        log::warn!("cannot read catalog {}: {}", origin, err);
                        Some((origin, String::new()))
                    }
                };
            }
        }

        if self.embedded {
            if let Some(file) = Asset::get(&file_name) {
                let origin = format!("<bundled>/{}", file_name);
                let content = decode(&origin, file.data.into_owned());
                return Some((origin, content));
            }
        }

        None
    }
}

/// Catalog text of `bytes`. Invalid UTF-8 yields an empty text, which the
/// parser rejects like any other unusable catalog.
fn decode(origin: &str, bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap_or_else(|err| {
        log::warn!("catalog {} is not valid UTF-8: {}", origin, err);
        String::new()
    })
}

fn locale_of_file_name(name: &str) -> Option<LanguageIdentifier> {
    let stem = name.strip_suffix(CATALOG_EXTENSION)?.strip_suffix('.')?;
    normalize_locale(stem)
}
