// SPDX-License-Identifier: MPL-2.0
//! `monav_l10n` reads, writes and serves the Qt Linguist translation
//! catalogs of the MoNav navigation client.
//!
//! A catalog is loaded once at startup into an immutable [`Translator`];
//! UI code then asks it for display text by `(context, source text)` and
//! gets the source text back whenever no translation exists.

#![doc(html_root_url = "https://docs.rs/monav_l10n/0.4.0")]

pub mod args;
pub mod catalog;
pub mod config;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod paths;
pub mod plural;
pub mod translator;

pub use catalog::Catalog;
pub use error::{CatalogError, Error, Result};
pub use translator::{tr, Translator, Unfinished};
