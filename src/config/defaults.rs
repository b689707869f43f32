// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for configuration and catalog handling.
//!
//! # Categories
//!
//! - **Locale**: Source language and locale used when nothing else matches
//! - **Catalog format**: TS version and file naming
//! - **Logging**: Default verbosity

// ==========================================================================
// Locale Defaults
// ==========================================================================

/// Language the UI source strings are written in.
pub const SOURCE_LOCALE: &str = "en-US";

/// Locale assumed when CLI, config and system all fail to name one.
pub const DEFAULT_LOCALE: &str = SOURCE_LOCALE;

// ==========================================================================
// Catalog Format Defaults
// ==========================================================================

/// TS format version written into new catalogs.
pub const DEFAULT_FORMAT_VERSION: &str = "2.0";

/// File extension of translation catalogs.
pub const CATALOG_EXTENSION: &str = "ts";

/// Name of the directory holding catalogs below the data directory.
pub const CATALOG_DIR_NAME: &str = "translations";

/// Whether unfinished translations are shown by default.
pub const DEFAULT_INCLUDE_UNFINISHED: bool = true;

// ==========================================================================
// Logging Defaults
// ==========================================================================

/// Default log level for the command-line tool.
pub const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Warn;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(!SOURCE_LOCALE.is_empty());
    assert!(!CATALOG_EXTENSION.is_empty());
    assert!(!DEFAULT_FORMAT_VERSION.is_empty());
};

#[cfg(test)]
mod tests {
    use super::*;
    use unic_langid::LanguageIdentifier;

    #[test]
    fn default_locale_parses() {
        let locale: LanguageIdentifier = DEFAULT_LOCALE.parse().unwrap();
        assert_eq!(locale.language.as_str(), "en");
    }

    #[test]
    fn log_level_default_survives_its_name() {
        let name = DEFAULT_LOG_LEVEL.as_str().to_ascii_lowercase();
        assert_eq!(name.parse::<log::LevelFilter>().unwrap(), DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn catalog_defaults_are_valid() {
        assert_eq!(CATALOG_EXTENSION, "ts");
        assert_eq!(DEFAULT_FORMAT_VERSION, "2.0");
    }
}
