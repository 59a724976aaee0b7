//! Generator configuration via `stubgen.toml`
//!
//! The generator takes no arguments. It looks for `stubgen.toml` in its
//! working directory; when the file is absent every setting takes its
//! default, which matches the conventional layout of a services crate:
//!
//! ```text
//! <crate>/
//! ├── catalog/services.toml   contract catalog
//! └── src/dynrpcserver/       generated stubs (one file per contract + mod.rs)
//! ```
//!
//! Relative paths resolve against the directory holding the config file.

use crate::eligibility::EligibilityRules;
use crate::emit::EmitOptions;
use crate::error::{Result, SynthError};
use crate::synthesize::SynthOptions;
use dynrpc_core::{is_identifier, split_path};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file name looked up in the generator's working directory
pub const CONFIG_FILE_NAME: &str = "stubgen.toml";

/// Conventional catalog location
pub const DEFAULT_CATALOG: &str = "catalog/services.toml";

/// Conventional output directory
pub const DEFAULT_OUTPUT_DIR: &str = "src/dynrpcserver";

/// Generator configuration loaded from `stubgen.toml`.
///
/// # Example
///
/// ```toml
/// catalog = "catalog/services.toml"
/// output_dir = "src/dynrpcserver"
///
/// [eligibility]
/// role_suffix = "Server"
/// excluded = ["SetupServer"]
/// streaming_markers = ["dynrpc_runtime::ServerStream"]
///
/// [emit]
/// namespace_import = "crate::pb"
/// namespace_alias = "pb"
/// runtime_crate = "dynrpc_runtime"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StubgenConfig {
    /// Catalog file, relative to the config directory
    #[serde(default = "default_catalog")]
    pub catalog: PathBuf,
    /// Output directory, relative to the config directory
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Eligibility filter settings
    #[serde(default)]
    pub eligibility: EligibilityRules,
    /// Emission settings
    #[serde(default)]
    pub emit: EmitOptions,
}

fn default_catalog() -> PathBuf {
    PathBuf::from(DEFAULT_CATALOG)
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

impl Default for StubgenConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            output_dir: default_output_dir(),
            eligibility: EligibilityRules::default(),
            emit: EmitOptions::default(),
        }
    }
}

impl StubgenConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# dynrpc-stubgen configuration
#
# Contract catalog, relative to this file.
catalog = "catalog/services.toml"

# Directory receiving one <stub>.rs per eligible contract plus mod.rs.
output_dir = "src/dynrpcserver"

[eligibility]
# Only contracts whose name ends with this suffix are wrapped.
role_suffix = "Server"
# Contracts never wrapped even though they carry the suffix.
excluded = ["SetupServer"]
# Contracts embedding any of these capabilities are streaming and skipped.
streaming_markers = ["dynrpc_runtime::ServerStream"]

[emit]
# Where generated code imports the contract traits and messages from,
# and the local name it uses for them.
namespace_import = "crate::pb"
namespace_alias = "pb"
# Crate providing Context, DelegateCell and Status.
runtime_crate = "dynrpc_runtime"
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let origin = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| SynthError::Config {
            origin: origin.clone(),
            message: format!("can't read file: {}", e),
        })?;
        Self::parse(&content, &origin)
    }

    /// Parse config from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Self::parse(text, "<inline>")
    }

    fn parse(text: &str, origin: &str) -> Result<Self> {
        let config: StubgenConfig = toml::from_str(text).map_err(|e| SynthError::Config {
            origin: origin.to_string(),
            message: e.to_string(),
        })?;
        config.validate(origin)?;
        Ok(config)
    }

    /// Load `stubgen.toml` from `dir`, or defaults if it does not exist
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            debug!(path = %path.display(), "loading generator config");
            Self::from_file(&path)
        } else {
            debug!(dir = %dir.display(), "no {} found, using defaults", CONFIG_FILE_NAME);
            let config = Self::default();
            config.validate("<default>")?;
            Ok(config)
        }
    }

    /// Options handed to [`synthesize`](crate::synthesize::synthesize)
    pub fn synth_options(&self) -> SynthOptions {
        SynthOptions {
            rules: self.eligibility.clone(),
            namespace_alias: self.emit.namespace_alias.clone(),
        }
    }

    fn validate(&self, origin: &str) -> Result<()> {
        let fail = |message: String| SynthError::Config {
            origin: origin.to_string(),
            message,
        };

        if self.eligibility.role_suffix.is_empty() {
            return Err(fail("eligibility.role_suffix must not be empty".to_string()));
        }
        for marker in &self.eligibility.streaming_markers {
            if split_path(marker.trim()).is_none() {
                return Err(fail(format!(
                    "streaming marker '{}' must be a path like crate_name::Trait",
                    marker
                )));
            }
        }
        if !is_identifier(&self.emit.namespace_alias) {
            return Err(fail(format!(
                "emit.namespace_alias '{}' is not an identifier",
                self.emit.namespace_alias
            )));
        }
        if !is_identifier(&self.emit.runtime_crate) {
            return Err(fail(format!(
                "emit.runtime_crate '{}' is not an identifier",
                self.emit.runtime_crate
            )));
        }
        let import_ok = self
            .emit
            .namespace_import
            .split("::")
            .enumerate()
            .all(|(i, segment)| {
                is_identifier(segment) || (i == 0 && matches!(segment, "crate" | "self" | "super"))
            });
        if !import_ok {
            return Err(fail(format!(
                "emit.namespace_import '{}' is not a valid path",
                self.emit.namespace_import
            )));
        }
        Ok(())
    }
}
