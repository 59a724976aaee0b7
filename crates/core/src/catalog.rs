//! Service contract catalog
//!
//! The catalog is the explicit, load-time-populated stand-in for interface
//! reflection: every service contract the host exposes is described once in
//! a TOML file, and stub synthesis works purely from that description.
//!
//! ## Format
//!
//! ```toml
//! # Path of the namespace owning every message type below
//! namespace = "dynrpc_services::pb"
//!
//! [[contracts]]
//! name = "WidgetServer"
//!
//! [[contracts.methods]]
//! name = "get_widget"
//! params = ["&Context", "&dynrpc_services::pb::GetWidgetRequest"]
//! results = ["dynrpc_services::pb::Widget", "Status"]
//! ```
//!
//! Type references are kept verbatim; deciding what they mean is the
//! translator's job, so that an unexpected shape is reported against the
//! method that carries it.
//!
//! ## Validation
//!
//! - `namespace` must be a non-empty path
//! - at least one contract must be present
//! - contract and method names must be plain identifiers
//! - contract names are unique; method names are unique within a contract

use crate::error::{CatalogError, Result};
use crate::ident::is_identifier;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// A verbatim type reference from a parameter or result position
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeRef(String);

impl TypeRef {
    /// Wrap a type reference as written in the catalog
    pub fn new(text: impl Into<String>) -> Self {
        TypeRef(text.into())
    }

    /// The reference text, with surrounding whitespace removed
    pub fn as_str(&self) -> &str {
        self.0.trim()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for TypeRef {
    fn from(text: &str) -> Self {
        TypeRef::new(text)
    }
}

/// One remotely invocable operation of a contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Method {
    name: String,
    #[serde(default)]
    params: Vec<TypeRef>,
    #[serde(default)]
    results: Vec<TypeRef>,
}

impl Method {
    /// Create a method description
    pub fn new<P, R>(name: impl Into<String>, params: P, results: R) -> Self
    where
        P: IntoIterator,
        P::Item: Into<TypeRef>,
        R: IntoIterator,
        R::Item: Into<TypeRef>,
    {
        Method {
            name: name.into(),
            params: params.into_iter().map(Into::into).collect(),
            results: results.into_iter().map(Into::into).collect(),
        }
    }

    /// Method name, used verbatim for the forwarding method
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter type references in declaration order
    pub fn params(&self) -> &[TypeRef] {
        &self.params
    }

    /// Result type references in declaration order
    pub fn results(&self) -> &[TypeRef] {
        &self.results
    }
}

/// A named RPC-style interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceContract {
    name: String,
    /// Fully-qualified paths of capabilities this contract extends
    #[serde(default)]
    embeds: Vec<String>,
    #[serde(default)]
    methods: Vec<Method>,
}

impl ServiceContract {
    /// Create a contract with the given methods and no embedded capabilities
    pub fn new(name: impl Into<String>, methods: Vec<Method>) -> Self {
        ServiceContract {
            name: name.into(),
            embeds: Vec::new(),
            methods,
        }
    }

    /// Add an embedded capability path (builder style)
    pub fn with_embed(mut self, path: impl Into<String>) -> Self {
        self.embeds.push(path.into());
        self
    }

    /// Contract name, e.g. `WidgetServer`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Embedded capability paths, e.g. `dynrpc_runtime::ServerStream`
    pub fn embeds(&self) -> &[String] {
        &self.embeds
    }

    /// Methods in declaration order
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }
}

/// The full set of contracts known to a synthesis run
///
/// Deserializing goes through validation, so every `Catalog` value obeys
/// the catalog rules no matter how it was built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCatalog")]
pub struct Catalog {
    namespace: String,
    contracts: Vec<ServiceContract>,
}

/// Catalog as written on disk, before validation
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCatalog {
    namespace: String,
    #[serde(default)]
    contracts: Vec<ServiceContract>,
}

impl TryFrom<RawCatalog> for Catalog {
    type Error = CatalogError;

    fn try_from(raw: RawCatalog) -> Result<Self> {
        Catalog::new(raw.namespace, raw.contracts)
    }
}

impl Catalog {
    /// Build and validate a catalog from already-constructed contracts
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Invalid`] if any validation rule fails.
    pub fn new(namespace: impl Into<String>, contracts: Vec<ServiceContract>) -> Result<Self> {
        let catalog = Catalog {
            namespace: namespace.into(),
            contracts,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse and validate a catalog from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Self::parse(text, "<inline>")
    }

    /// Read, parse and validate a catalog file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, &path.display().to_string())
    }

    fn parse(text: &str, origin: &str) -> Result<Self> {
        let raw: RawCatalog = toml::from_str(text).map_err(|e| CatalogError::Parse {
            origin: origin.to_string(),
            message: e.to_string(),
        })?;
        Catalog::try_from(raw)
    }

    /// Owning namespace path of the message types, e.g. `dynrpc_services::pb`
    pub fn namespace(&self) -> &str {
        self.namespace.trim()
    }

    /// Contracts in declaration order
    pub fn contracts(&self) -> &[ServiceContract] {
        &self.contracts
    }

    /// Look up a contract by name
    pub fn contract(&self, name: &str) -> Option<&ServiceContract> {
        self.contracts.iter().find(|c| c.name == name)
    }

    fn validate(&self) -> Result<()> {
        let namespace = self.namespace();
        if namespace.is_empty() {
            return Err(CatalogError::invalid("namespace must not be empty"));
        }
        if !namespace.split("::").all(is_identifier_or_root) {
            return Err(CatalogError::invalid(format!(
                "namespace '{}' is not a valid path",
                namespace
            )));
        }
        if self.contracts.is_empty() {
            return Err(CatalogError::invalid("catalog declares no contracts"));
        }

        let mut seen_contracts = HashSet::new();
        for contract in &self.contracts {
            if !is_identifier(&contract.name) {
                return Err(CatalogError::invalid(format!(
                    "contract name '{}' is not an identifier",
                    contract.name
                )));
            }
            if !seen_contracts.insert(contract.name.as_str()) {
                return Err(CatalogError::invalid(format!(
                    "duplicate contract '{}'",
                    contract.name
                )));
            }

            let mut seen_methods = HashSet::new();
            for method in &contract.methods {
                if !is_identifier(&method.name) {
                    return Err(CatalogError::invalid(format!(
                        "method name '{}' in contract '{}' is not an identifier",
                        method.name, contract.name
                    )));
                }
                if !seen_methods.insert(method.name.as_str()) {
                    return Err(CatalogError::invalid(format!(
                        "duplicate method '{}' in contract '{}'",
                        method.name, contract.name
                    )));
                }
            }
        }
        Ok(())
    }
}

// `crate`, `self` and `super` may lead a namespace path even though they are keywords.
fn is_identifier_or_root(segment: &str) -> bool {
    matches!(segment, "crate" | "self" | "super") || is_identifier(segment)
}
