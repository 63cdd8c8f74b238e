//! Error types for catalog loading and statement generation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for generator operations.
pub type GenResult<T> = Result<T, GenError>;

/// Errors that can occur while building a catalog or rendering statements.
#[derive(Debug, Error)]
pub enum GenError {
    /// A feature or frame name was empty.
    #[error("name must not be empty")]
    EmptyName,

    /// A name contains a character that cannot appear unquoted in the template.
    #[error("name {name:?} contains unsupported character {ch:?}")]
    UnsafeName { name: String, ch: char },

    /// A name starts with something that is not a valid identifier start.
    #[error("name {name:?} must start with a letter or '.' not followed by a digit")]
    InvalidStart { name: String },

    /// A catalog entry was rejected. `position` is 1-based.
    #[error("catalog entry {position} ({raw:?}) rejected: {source}")]
    InvalidEntry {
        position: usize,
        raw: String,
        #[source]
        source: Box<GenError>,
    },

    /// Unknown category tag in a catalog file.
    #[error("unknown feature category {0:?}. Use level, pressure, flow or other")]
    UnknownCategory(String),

    /// Unknown target column selector.
    #[error("unknown column {0:?}. Use 'delta' or 'abs-delta'")]
    UnknownColumn(String),

    /// Catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog file could not be parsed.
    #[error("failed to parse catalog {path}: {message}")]
    CatalogParse { path: PathBuf, message: String },

    /// Template rendering failed.
    #[error("template error: {0}")]
    Render(#[from] askama::Error),

    /// IO error while writing statements.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GenError {
    /// Wrap an error with the catalog position and raw value it came from.
    pub fn at_entry(position: usize, raw: impl Into<String>, source: GenError) -> Self {
        Self::InvalidEntry {
            position,
            raw: raw.into(),
            source: Box::new(source),
        }
    }
}
