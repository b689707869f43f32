// SPDX-License-Identifier: MPL-2.0
//! Stderr logger for the command-line tool.
//!
//! The library only talks to the `log` facade; binaries decide where
//! records go. This logger prints records from this crate to stderr with a
//! local timestamp, filtered by a level that can be changed at runtime.

use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};
use std::io::{self, Write};
use std::sync::{OnceLock, PoisonError, RwLock};

const CRATE_TARGET: &str = "monav_l10n";

struct Logger {
    level: RwLock<LevelFilter>,
}

impl Logger {
    fn new(level: LevelFilter) -> Self {
        Self {
            level: RwLock::new(level),
        }
    }

    fn level(&self) -> LevelFilter {
        *self.level.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_level(&self, level: LevelFilter) {
        *self.level.write().unwrap_or_else(PoisonError::into_inner) = level;
    }

    fn is_app_target(target: &str) -> bool {
        target == CRATE_TARGET || target.starts_with("monav_l10n::")
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level() && Self::is_app_target(metadata.target())
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record);
        let _ = io::stderr().lock().write_all(line.as_bytes());
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Installs the logger (first call) and applies `level`.
pub fn init(level: LevelFilter) {
    let logger = LOGGER.get_or_init(|| Logger::new(level));
    logger.set_level(level);
    let _ = log::set_logger(logger);
    log::set_max_level(level);
}

fn format_line(record: &Record) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
    format!(
        "{timestamp} [{level}] {message}\n",
        level = record.level(),
        message = record.args()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn only_crate_targets_are_logged() {
        assert!(Logger::is_app_target("monav_l10n"));
        assert!(Logger::is_app_target("monav_l10n::i18n::store"));
        assert!(!Logger::is_app_target("quick_xml"));
        assert!(!Logger::is_app_target("monav_l10n_other"));
    }

    #[test]
    fn level_filter_applies() {
        let logger = Logger::new(LevelFilter::Warn);
        let warn = Metadata::builder()
            .level(Level::Warn)
            .target("monav_l10n::translator")
            .build();
        let debug = Metadata::builder()
            .level(Level::Debug)
            .target("monav_l10n::translator")
            .build();
        assert!(logger.enabled(&warn));
        assert!(!logger.enabled(&debug));

        logger.set_level(LevelFilter::Debug);
        assert!(logger.enabled(&debug));
    }

    #[test]
    fn line_contains_level_and_message() {
        let line = format_line(
            &Record::builder()
                .args(format_args!("ignoring malformed catalog"))
                .level(Level::Warn)
                .target("monav_l10n")
                .build(),
        );
        assert!(line.contains("[WARN] ignoring malformed catalog"));
        assert!(line.ends_with('\n'));
    }

    #[test]
    fn init_installs_logger_and_updates_level() {
        init(LevelFilter::Debug);
        assert_eq!(log::max_level(), LevelFilter::Debug);
        let debug = Metadata::builder()
            .level(Level::Debug)
            .target("monav_l10n::i18n")
            .build();
        assert!(log::logger().enabled(&debug));

        init(LevelFilter::Error);
        assert_eq!(log::max_level(), LevelFilter::Error);
        assert!(!log::logger().enabled(&debug));
    }
}
