//! Eligibility filter
//!
//! Decides which catalog contracts are activatable unary services. Rules are
//! applied in order and the first failing rule wins:
//!
//! 1. the name must end with the role suffix (and be longer than it)
//! 2. the name must not be in the exclusion set
//! 3. the contract must not embed a streaming marker
//!
//! Streaming contracts carry a role suffix too, so rule 3 looks at what the
//! contract embeds rather than at its name. A marker matches only when both
//! its owning path and its name match.

use dynrpc_core::{split_path, ServiceContract};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default role suffix of service contracts
pub const DEFAULT_ROLE_SUFFIX: &str = "Server";

/// Contracts excluded by default: setup has its own lifecycle
pub const DEFAULT_EXCLUDED: &[&str] = &["SetupServer"];

/// Streaming capability recognized by default
pub const DEFAULT_STREAMING_MARKER: &str = "dynrpc_runtime::ServerStream";

/// Configurable inputs of the eligibility filter (`[eligibility]` in `stubgen.toml`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EligibilityRules {
    /// Suffix marking a service-role contract
    #[serde(default = "default_role_suffix")]
    pub role_suffix: String,
    /// Contract names never wrapped even though they carry the suffix
    #[serde(default = "default_excluded")]
    pub excluded: Vec<String>,
    /// Fully-qualified paths of streaming session capabilities
    #[serde(default = "default_streaming_markers")]
    pub streaming_markers: Vec<String>,
}

fn default_role_suffix() -> String {
    DEFAULT_ROLE_SUFFIX.to_string()
}

fn default_excluded() -> Vec<String> {
    DEFAULT_EXCLUDED.iter().map(|s| s.to_string()).collect()
}

fn default_streaming_markers() -> Vec<String> {
    vec![DEFAULT_STREAMING_MARKER.to_string()]
}

impl Default for EligibilityRules {
    fn default() -> Self {
        Self {
            role_suffix: default_role_suffix(),
            excluded: default_excluded(),
            streaming_markers: default_streaming_markers(),
        }
    }
}

/// Why a contract was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Rule 1: not a service-role contract
    MissingRoleSuffix,
    /// Rule 2: explicitly excluded
    Excluded,
    /// Rule 3: embeds a streaming marker
    Streaming {
        /// The embedded path that matched
        marker: String,
    },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::MissingRoleSuffix => write!(f, "not a service-role contract"),
            Rejection::Excluded => write!(f, "explicitly excluded"),
            Rejection::Streaming { marker } => write!(f, "embeds streaming marker {}", marker),
        }
    }
}

impl EligibilityRules {
    /// First rule that rejects `contract`, or `None` if it is eligible
    pub fn explain(&self, contract: &ServiceContract) -> Option<Rejection> {
        let name = contract.name();
        if self.strip_suffix(name).is_none() {
            return Some(Rejection::MissingRoleSuffix);
        }
        if self.excluded.iter().any(|excluded| excluded == name) {
            return Some(Rejection::Excluded);
        }
        contract
            .embeds()
            .iter()
            .find(|embed| self.is_streaming_marker(embed))
            .map(|embed| Rejection::Streaming {
                marker: embed.clone(),
            })
    }

    /// True if `contract` qualifies for stub synthesis
    pub fn is_eligible(&self, contract: &ServiceContract) -> bool {
        self.explain(contract).is_none()
    }

    /// Contract name minus the role suffix, if it carries the suffix and
    /// something is left after removing it
    pub fn strip_suffix<'a>(&self, name: &'a str) -> Option<&'a str> {
        name.strip_suffix(self.role_suffix.as_str())
            .filter(|base| !base.is_empty())
    }

    fn is_streaming_marker(&self, embed: &str) -> bool {
        let embed = match split_path(embed.trim()) {
            Some(parts) => parts,
            None => return false,
        };
        self.streaming_markers
            .iter()
            .filter_map(|marker| split_path(marker.trim()))
            .any(|marker| marker == embed)
    }
}
