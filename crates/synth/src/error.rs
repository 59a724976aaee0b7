//! Synthesis errors
//!
//! Every variant is fatal to the run. A contract that violates the assumed
//! shape is never skipped silently: a partially synthesized set of stubs
//! could hide a real mismatch between catalog and contract traits.

use dynrpc_core::CatalogError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for synthesis operations
pub type Result<T> = std::result::Result<T, SynthError>;

/// Fatal synthesis failures
#[derive(Debug, Error)]
pub enum SynthError {
    /// Catalog could not be loaded or failed validation
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Filtering left nothing to synthesize
    #[error("no eligible service contracts found in catalog")]
    NoEligibleContracts,

    /// A parameter or result type the translator does not recognize
    #[error("don't know what to do with type '{type_ref}' in {contract}::{method}")]
    UnsupportedType {
        /// Contract carrying the method
        contract: String,
        /// Method carrying the reference
        method: String,
        /// Reference text as written in the catalog
        type_ref: String,
    },

    /// A method whose result list is neither `[error]` nor `[payload, error]`
    #[error("don't know how to make a stub for {contract}::{method} with {count} results")]
    UnsupportedArity {
        /// Contract carrying the method
        contract: String,
        /// Offending method
        method: String,
        /// Number of results declared
        count: usize,
    },

    /// A result list with the right arity but an unusable shape
    #[error("unsupported result '{type_ref}' in {contract}::{method}: {reason}")]
    UnsupportedResult {
        /// Contract carrying the method
        contract: String,
        /// Offending method
        method: String,
        /// Result reference text
        type_ref: String,
        /// What is wrong with it
        reason: &'static str,
    },

    /// Stub type or module name cannot be emitted
    #[error("contract '{contract}' yields unusable stub name '{name}': {reason}")]
    InvalidStubName {
        /// Contract being synthesized
        contract: String,
        /// Derived type name or file stem
        name: String,
        /// What is wrong with it
        reason: &'static str,
    },

    /// Two eligible contracts map to the same output file
    #[error("contracts '{first}' and '{second}' both map to output file '{stem}.rs'")]
    FileStemCollision {
        /// Shared file stem
        stem: String,
        /// Contract synthesized first
        first: String,
        /// Contract synthesized second
        second: String,
    },

    /// Configuration file could not be read, parsed, or validated
    #[error("configuration error in '{origin}': {message}")]
    Config {
        /// Config file path, or `<default>`
        origin: String,
        /// Diagnostic
        message: String,
    },

    /// Output could not be written
    #[error("writing '{path}': {source}")]
    Write {
        /// File or directory being written
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },
}

impl SynthError {
    /// Shorthand for [`SynthError::Write`]
    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SynthError::Write {
            path: path.into(),
            source,
        }
    }
}
