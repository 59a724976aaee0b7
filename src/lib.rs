//! dynrpc - Activatable RPC server stubs
//!
//! A server often has to register every service before the code that
//! implements some of them is ready. dynrpc generates, for each service
//! contract, a stub that can be registered immediately: it answers every
//! call with `Unavailable` until a real implementation is activated, then
//! forwards to it. Implementations can be swapped or withdrawn at any time.
//!
//! # Crates
//!
//! - [`catalog`] - the contract catalog the generator reads
//! - [`synth`] - eligibility, signature translation, naming and emission;
//!   the `dynrpc-stubgen` binary lives here
//! - [`runtime`] - what generated stubs depend on: [`DelegateCell`],
//!   [`Status`], [`Context`]
//!
//! # Quick Start
//!
//! ```ignore
//! use dynrpc::{Catalog, SynthOptions, EmitOptions};
//!
//! let catalog = Catalog::from_file("catalog/services.toml".as_ref())?;
//! let stubs = dynrpc::synthesize(&catalog, &SynthOptions::default())?;
//! for artifact in dynrpc::render_artifacts(&stubs, &EmitOptions::default()) {
//!     println!("{}", artifact.file_name);
//! }
//! ```

pub use dynrpc_core as catalog;
pub use dynrpc_runtime as runtime;
pub use dynrpc_synth as synth;

pub use dynrpc_core::{Catalog, CatalogError, Method, ServiceContract, TypeRef};
pub use dynrpc_runtime::{Code, Context, DelegateCell, ServerStream, Status};
pub use dynrpc_synth::{
    render_artifacts, run, synthesize, EmitOptions, RunReport, StubDescriptor, StubgenConfig,
    SynthError, SynthOptions,
};
