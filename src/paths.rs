// SPDX-License-Identifier: MPL-2.0
//! Centralized path management for configuration and catalog directories.
//!
//! # Path Resolution Order
//!
//! Paths are resolved in the following priority order:
//! 1. **Explicit override** - parameter to [`get_app_config_dir_with_override`] (for tests)
//! 2. **CLI arguments** (`--catalog-dir`, `--config-dir`) - set via [`init_cli_overrides`]
//! 3. **Environment variables** (`MONAV_CATALOG_DIR`, `MONAV_CONFIG_DIR`)
//! 4. **Config file** - `catalog_dir` in `settings.toml` (catalog directory only)
//! 5. **Platform default** - via `dirs` crate
//!
//! # Usage
//!
//! CLI overrides should be initialized once at startup:
//! ```ignore
//! paths::init_cli_overrides(flags.catalog_dir, flags.config_dir);
//! ```

use crate::config::CATALOG_DIR_NAME;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Application name used for directory naming.
const APP_NAME: &str = "MoNav";

/// Environment variable to override the catalog directory.
pub const ENV_CATALOG_DIR: &str = "MONAV_CATALOG_DIR";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "MONAV_CONFIG_DIR";

/// Global CLI override for the catalog directory (set once at startup).
static CLI_CATALOG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Global CLI override for the config directory (set once at startup).
static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Initializes CLI overrides for catalog and config directories.
///
/// Should be called once at startup, before any path is resolved. Later
/// calls are ignored and logged.
pub fn init_cli_overrides(catalog_dir: Option<String>, config_dir: Option<String>) {
    if CLI_CATALOG_DIR.set(catalog_dir.map(PathBuf::from)).is_err()
        || CLI_CONFIG_DIR.set(config_dir.map(PathBuf::from)).is_err()
    {
        log::warn!("CLI path overrides already initialized; ignoring");
    }
}

fn get_cli_catalog_dir() -> Option<PathBuf> {
    CLI_CATALOG_DIR.get().and_then(Clone::clone)
}

fn get_cli_config_dir() -> Option<PathBuf> {
    CLI_CONFIG_DIR.get().and_then(Clone::clone)
}

fn env_dir(name: &str) -> Option<PathBuf> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Returns the directory searched for user-supplied `.ts` catalogs.
///
/// # Resolution Order
///
/// 1. CLI argument `--catalog-dir` (if set via [`init_cli_overrides`])
/// 2. `MONAV_CATALOG_DIR` environment variable (if set and non-empty)
/// 3. `configured`, the `catalog_dir` from `settings.toml`
/// 4. Platform-specific data directory:
///    - Linux: `~/.local/share/MoNav/translations/`
///    - macOS: `~/Library/Application Support/MoNav/translations/`
///    - Windows: `C:\Users\<User>\AppData\Roaming\MoNav\translations\`
pub fn get_catalog_dir(configured: Option<PathBuf>) -> Option<PathBuf> {
    resolve_catalog_dir(get_cli_catalog_dir(), configured)
}

fn resolve_catalog_dir(cli: Option<PathBuf>, configured: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = cli {
        return Some(path);
    }

    if let Some(path) = env_dir(ENV_CATALOG_DIR) {
        return Some(path);
    }

    if let Some(path) = configured {
        return Some(path);
    }

    dirs::data_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CATALOG_DIR_NAME);
        path
    })
}

/// Returns the config directory holding `settings.toml`.
///
/// # Resolution Order
///
/// 1. CLI argument `--config-dir` (if set via [`init_cli_overrides`])
/// 2. `MONAV_CONFIG_DIR` environment variable (if set and non-empty)
/// 3. Platform-specific config directory with the app name appended
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

/// Returns the config directory with an optional override.
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Some(path) = get_cli_config_dir() {
        return Some(path);
    }

    if let Some(path) = env_dir(ENV_CONFIG_DIR) {
        return Some(path);
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to prevent parallel tests from interfering with each other's env vars
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn catalog_dir_contains_app_name() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::remove_var(ENV_CATALOG_DIR);

        if let Some(path) = get_catalog_dir(None) {
            let path = path.to_string_lossy();
            assert!(path.contains(APP_NAME));
            assert!(path.ends_with(CATALOG_DIR_NAME));
        }
    }

    #[test]
    fn config_dir_contains_app_name() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::remove_var(ENV_CONFIG_DIR);

        if let Some(path) = get_app_config_dir() {
            assert!(path.to_string_lossy().contains(APP_NAME));
        }
    }

    #[test]
    fn override_path_takes_precedence() {
        let override_path = PathBuf::from("/custom/config");
        assert_eq!(
            get_app_config_dir_with_override(Some(override_path.clone())),
            Some(override_path)
        );
    }

    #[test]
    fn env_var_overrides_default_catalog_dir() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_CATALOG_DIR, "/test/catalogs");

        assert_eq!(get_catalog_dir(None), Some(PathBuf::from("/test/catalogs")));

        std::env::remove_var(ENV_CATALOG_DIR);
    }

    #[test]
    fn catalog_dir_prefers_cli_then_env_then_config() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let cli = Some(PathBuf::from("/cli/catalogs"));
        let configured = Some(PathBuf::from("/config/catalogs"));

        std::env::set_var(ENV_CATALOG_DIR, "/env/catalogs");
        assert_eq!(resolve_catalog_dir(cli.clone(), configured.clone()), cli);
        assert_eq!(
            resolve_catalog_dir(None, configured.clone()),
            Some(PathBuf::from("/env/catalogs"))
        );

        std::env::remove_var(ENV_CATALOG_DIR);
        assert_eq!(resolve_catalog_dir(None, configured.clone()), configured);
    }

    #[test]
    fn empty_env_var_uses_default() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_CONFIG_DIR, "");

        if let Some(path) = get_app_config_dir() {
            assert!(path.to_string_lossy().contains(APP_NAME));
        }

        std::env::remove_var(ENV_CONFIG_DIR);
    }
}
