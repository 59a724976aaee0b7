// Code generated by dynrpc-stubgen. DO NOT EDIT.

use std::sync::Arc;

use dynrpc_runtime::{Context, DelegateCell, Status};

use crate::pb;

/// Activatable stand-in for [`pb::ModuleRegistryServer`].
///
/// Every call fails with `Status::unavailable()` until a server is
/// installed with [`ModuleRegistry::activate_rpc_server`].
pub struct ModuleRegistry {
    server: DelegateCell<dyn pb::ModuleRegistryServer>,
}

const _: fn() = || {
    fn assert_server<T: pb::ModuleRegistryServer>() {}
    assert_server::<ModuleRegistry>();
};

impl ModuleRegistry {
    /// Creates a stub with no server installed.
    pub fn new_stub() -> Self {
        ModuleRegistry {
            server: DelegateCell::new("ModuleRegistryServer"),
        }
    }

    /// Installs `server` as the backend, or clears it when `None`.
    pub fn activate_rpc_server(&self, server: Option<Arc<dyn pb::ModuleRegistryServer>>) {
        self.server.activate(server);
    }

    fn real_rpc_server(&self) -> Result<Arc<dyn pb::ModuleRegistryServer>, Status> {
        self.server.get()
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new_stub()
    }
}

impl std::fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleRegistry").field("server", &self.server).finish()
    }
}

impl pb::ModuleRegistryServer for ModuleRegistry {
    fn get_module_metadata(&self, a0: &Context, a1: &pb::GetModuleMetadataRequest) -> Result<pb::ModuleMetadata, Status> {
        let server = self.real_rpc_server()?;
        pb::ModuleRegistryServer::get_module_metadata(&*server, a0, a1)
    }

    fn open_module_package(&self, a0: &Context, a1: pb::OpenModulePackageRequest) -> Result<pb::ModulePackageHandle, Status> {
        let server = self.real_rpc_server()?;
        pb::ModuleRegistryServer::open_module_package(&*server, a0, a1)
    }

    fn close_module_package(&self, a0: &Context, a1: &pb::ModulePackageHandle) -> Result<(), Status> {
        let server = self.real_rpc_server()?;
        pb::ModuleRegistryServer::close_module_package(&*server, a0, a1)
    }
}
