//! Core types for dynrpc
//!
//! This crate defines the input model of stub synthesis:
//! - Catalog: the set of service contracts plus their owning namespace
//! - ServiceContract: one RPC-style interface with an ordered method list
//! - Method: a named operation with parameter and result type references
//! - TypeRef: verbatim type text, classified later by the translator
//! - Error: catalog loading and validation failures
//!
//! Catalogs are loaded once from a TOML file and are immutable afterwards.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod error;
pub mod ident;

pub use catalog::{Catalog, Method, ServiceContract, TypeRef};
pub use error::{CatalogError, Result};
pub use ident::{is_identifier, split_path};
