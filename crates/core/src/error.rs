//! Error types for catalog loading
//!
//! Every failure here is fatal to a synthesis run: a catalog that cannot be
//! read or that violates the assumed shape must never yield partial output.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised while loading or validating a contract catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("can't read catalog '{path}': {source}")]
    Read {
        /// Path that was being read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// Catalog text is not valid TOML or does not match the catalog schema
    #[error("can't parse catalog '{origin}': {message}")]
    Parse {
        /// File path, or `<inline>` for catalogs parsed from a string
        origin: String,
        /// Parser diagnostic
        message: String,
    },

    /// Catalog parsed but violates a structural rule
    #[error("invalid catalog: {0}")]
    Invalid(String),
}

impl CatalogError {
    /// Shorthand for [`CatalogError::Invalid`]
    pub fn invalid(message: impl Into<String>) -> Self {
        CatalogError::Invalid(message.into())
    }
}
