//! Streaming session capability
//!
//! Streaming contracts carry per-call session state and extend this trait.
//! Stub synthesis recognizes `dynrpc_runtime::ServerStream` in a contract's
//! embeds and refuses to wrap it; plain forwarding cannot carry a session.

use crate::context::Context;
use crate::status::Status;

/// A server-side stream of messages bound to one call
pub trait ServerStream: Send {
    /// Context of the call this stream belongs to
    fn context(&self) -> &Context;

    /// Send response headers before the first message
    ///
    /// Default implementation sends nothing.
    fn send_header(&mut self) -> Result<(), Status> {
        Ok(())
    }
}
