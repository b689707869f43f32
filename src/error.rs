// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Catalog(CatalogError),
}

/// Specific failures while reading a translation catalog.
///
/// The resource loader never surfaces these to the UI: a catalog that fails
/// to parse is logged and replaced by an empty table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The document is not well-formed XML.
    Xml { line: usize, message: String },

    /// The root element is not `<TS>`.
    NotACatalog { root: String },

    /// A required child element is absent (e.g. a message without `<source>`).
    MissingElement {
        line: usize,
        parent: &'static str,
        element: &'static str,
    },

    /// An attribute carries a value that cannot be interpreted.
    InvalidAttribute {
        line: usize,
        attribute: String,
        value: String,
    },

    /// The file ended inside an open element.
    UnexpectedEof { element: String },
}

impl CatalogError {
    /// Line of the document the error was detected on, when known.
    pub fn line(&self) -> Option<usize> {
        match self {
            CatalogError::Xml { line, .. }
            | CatalogError::MissingElement { line, .. }
            | CatalogError::InvalidAttribute { line, .. } => Some(*line),
            CatalogError::NotACatalog { .. } | CatalogError::UnexpectedEof { .. } => None,
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Xml { line, message } => {
                write!(f, "malformed XML at line {}: {}", line, message)
            }
            CatalogError::NotACatalog { root } => {
                write!(f, "expected <TS> root element, found <{}>", root)
            }
            CatalogError::MissingElement {
                line,
                parent,
                element,
            } => write!(f, "<{}> at line {} has no <{}>", parent, line, element),
            CatalogError::InvalidAttribute {
                line,
                attribute,
                value,
            } => write!(
                f,
                "invalid value {:?} for attribute '{}' at line {}",
                value, attribute, line
            ),
            CatalogError::UnexpectedEof { element } => {
                write!(f, "unexpected end of file inside <{}>", element)
            }
        }
    }
}

impl std::error::Error for CatalogError {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Catalog(e) => write!(f, "Catalog Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<CatalogError> for Error {
    fn from(err: CatalogError) -> Self {
        Error::Catalog(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
