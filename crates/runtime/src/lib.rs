//! Runtime support for activatable server stubs
//!
//! Generated stubs are thin: each one owns a [`DelegateCell`] holding the
//! currently installed backend and forwards every contract method through it.
//! This crate provides the pieces those stubs and their contracts share:
//!
//! - [`DelegateCell`]: lock-guarded, replaceable delegate reference
//! - [`Status`] / [`Code`]: the failure channel of every contract method
//! - [`Context`]: call-scoped deadline and cancellation carrier
//! - [`ServerStream`]: capability embedded by streaming contracts
//!
//! ## State machine
//!
//! ```text
//!            activate(Some(d))
//!  Unbound ───────────────────▶ Bound(d)
//!     ▲                          │   │ activate(Some(d2))
//!     └──────────────────────────┘   ▼
//!            activate(None)        Bound(d2)
//! ```
//!
//! A cell starts `Unbound` and never reaches a terminal state.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod context;
pub mod delegate;
pub mod status;
pub mod stream;

pub use context::Context;
pub use delegate::DelegateCell;
pub use status::{Code, Status, UNAVAILABLE_MESSAGE};
pub use stream::ServerStream;
