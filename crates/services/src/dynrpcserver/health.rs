// Code generated by dynrpc-stubgen. DO NOT EDIT.

use std::sync::Arc;

use dynrpc_runtime::{Context, DelegateCell, Status};

use crate::pb;

/// Activatable stand-in for [`pb::HealthServer`].
///
/// Every call fails with `Status::unavailable()` until a server is
/// installed with [`Health::activate_rpc_server`].
pub struct Health {
    server: DelegateCell<dyn pb::HealthServer>,
}

const _: fn() = || {
    fn assert_server<T: pb::HealthServer>() {}
    assert_server::<Health>();
};

impl Health {
    /// Creates a stub with no server installed.
    pub fn new_stub() -> Self {
        Health {
            server: DelegateCell::new("HealthServer"),
        }
    }

    /// Installs `server` as the backend, or clears it when `None`.
    pub fn activate_rpc_server(&self, server: Option<Arc<dyn pb::HealthServer>>) {
        self.server.activate(server);
    }

    fn real_rpc_server(&self) -> Result<Arc<dyn pb::HealthServer>, Status> {
        self.server.get()
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new_stub()
    }
}

impl std::fmt::Debug for Health {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Health").field("server", &self.server).finish()
    }
}

impl pb::HealthServer for Health {
    fn check(&self, a0: &Context) -> Result<pb::HealthStatus, Status> {
        let server = self.real_rpc_server()?;
        pb::HealthServer::check(&*server, a0)
    }

    fn probe(&self, a0: Box<dyn std::any::Any + Send>) -> Result<Box<dyn std::any::Any + Send>, Status> {
        let server = self.real_rpc_server()?;
        pb::HealthServer::probe(&*server, a0)
    }
}
