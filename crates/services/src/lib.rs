//! Sample service contracts and their activatable stubs
//!
//! [`pb`] holds the contract traits and message types, described for the
//! generator by `catalog/services.toml`. [`dynrpcserver`] is generated by
//! `dynrpc-stubgen` from that catalog: one stub per eligible contract that
//! can be registered before its real implementation exists.
//!
//! ```
//! use std::sync::Arc;
//! use dynrpc_runtime::{Context, Status};
//! use dynrpc_services::dynrpcserver::Health;
//! use dynrpc_services::pb::{self, HealthServer};
//!
//! struct Live;
//!
//! impl HealthServer for Live {
//!     fn check(&self, _ctx: &Context) -> Result<pb::HealthStatus, Status> {
//!         Ok(pb::HealthStatus { serving: true, detail: String::new() })
//!     }
//!
//!     fn probe(
//!         &self,
//!         value: Box<dyn std::any::Any + Send>,
//!     ) -> Result<Box<dyn std::any::Any + Send>, Status> {
//!         Ok(value)
//!     }
//! }
//!
//! let stub = Health::new_stub();
//! let ctx = Context::background();
//! assert!(stub.check(&ctx).unwrap_err().is_stub_unavailable());
//!
//! stub.activate_rpc_server(Some(Arc::new(Live)));
//! assert!(stub.check(&ctx).unwrap().serving);
//! ```

pub mod dynrpcserver;
pub mod pb;
