//! Stub synthesis for activatable RPC services
//!
//! Synthesis turns a contract catalog into Rust source for one stub type per
//! eligible contract. Each stub implements the original contract trait by
//! forwarding to a delegate that can be installed, swapped or withdrawn at
//! runtime.
//!
//! ## Pipeline
//!
//! ```text
//! Catalog ──▶ eligibility ──▶ translate ──▶ synthesize ──▶ emit ──▶ output
//!             (filter)        (signatures)  (descriptors)  (source) (files)
//! ```
//!
//! Every stage is deterministic. Any shape the synthesizer does not
//! understand aborts the whole run with a [`SynthError`]; partial output
//! would hide the mismatch.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod eligibility;
pub mod emit;
pub mod error;
pub mod naming;
pub mod output;
pub mod run;
pub mod synthesize;
pub mod translate;

pub use config::{StubgenConfig, CONFIG_FILE_NAME};
pub use eligibility::{EligibilityRules, Rejection};
pub use emit::{render_artifacts, Artifact, EmitOptions, GENERATED_HEADER};
pub use error::{Result, SynthError};
pub use naming::to_file_stem;
pub use output::{write_artifacts, WriteReport};
pub use run::{run, RunReport};
pub use synthesize::{synthesize, ForwardingMethod, ResultShape, StubDescriptor, SynthOptions};
pub use translate::{Translated, Translator, TypeKind};
