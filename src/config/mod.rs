// SPDX-License-Identifier: MPL-2.0
//! This module handles the user's localization preferences, loading and
//! saving them to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use monav_l10n::config::{self, Config};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.language = Some("de_DE".to_string());
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // To load/save from a specific path (e.g., for testing)
//! let temp_dir = PathBuf::from("./temp_config_dir");
//! std::fs::create_dir_all(&temp_dir).unwrap();
//! let temp_file = temp_dir.join("test_settings.toml");
//! config::save_to_path(&config, &temp_file).expect("Failed to save to path");
//! let loaded_config = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert_eq!(loaded_config.language, Some("de_DE".to_string()));
//! std::fs::remove_dir_all(&temp_dir).unwrap();
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Preferred UI locale, e.g. `de_DE`.
    pub language: Option<String>,
    /// Directory searched for `.ts` catalogs before the bundled ones.
    #[serde(default)]
    pub catalog_dir: Option<PathBuf>,
    #[serde(default)]
    pub include_unfinished: Option<bool>,
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: None,
            catalog_dir: None,
            include_unfinished: Some(DEFAULT_INCLUDE_UNFINISHED),
            log_level: Some(DEFAULT_LOG_LEVEL.as_str().to_ascii_lowercase()),
        }
    }
}

impl Config {
    /// Effective unfinished-translation policy.
    #[must_use]
    pub fn include_unfinished(&self) -> bool {
        self.include_unfinished
            .unwrap_or(DEFAULT_INCLUDE_UNFINISHED)
    }

    /// Effective log level; unknown names fall back to the default.
    #[must_use]
    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level
            .as_deref()
            .and_then(|level| level.parse().ok())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    paths::get_app_config_dir().map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            log::warn!("ignoring invalid config {}: {}", path.display(), err);
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_language() {
        let config = Config {
            language: Some("de_DE".to_string()),
            catalog_dir: Some(PathBuf::from("/opt/monav/translations")),
            include_unfinished: Some(false),
            log_level: Some("debug".to_string()),
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert!(loaded.language.is_none());
    }

    #[test]
    fn missing_fields_use_serde_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "language = \"de_DE\"\n").expect("failed to write toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded.language.as_deref(), Some("de_DE"));
        assert!(loaded.catalog_dir.is_none());
        assert!(loaded.include_unfinished());
        assert_eq!(loaded.log_level(), DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn save_to_path_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("deep").join("path").join("settings.toml");

        save_to_path(&Config::default(), &config_path).expect("save should create directories");
        assert!(config_path.exists());
    }

    #[test]
    fn unknown_log_level_falls_back() {
        let config = Config {
            log_level: Some("chatty".into()),
            ..Config::default()
        };
        assert_eq!(config.log_level(), DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn default_config_uses_default_log_level() {
        let config = Config::default();
        assert_eq!(config.log_level(), DEFAULT_LOG_LEVEL);
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("log_level = \"warn\""));
    }
}
