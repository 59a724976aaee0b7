//! Activation lifecycle through the public facade
//!
//! Mirrors how a host server uses dynrpc: register every stub at startup,
//! serve traffic while backends come up, bind each backend as it becomes
//! ready, and withdraw it on shutdown.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use dynrpc::{Code, Context, Status};
use dynrpc_services::dynrpcserver::{Health, ModuleRegistry, Widget};
use dynrpc_services::pb::{self, HealthServer, ModuleRegistryServer, WidgetServer};

struct Registry {
    modules: HashMap<String, String>,
}

impl ModuleRegistryServer for Registry {
    fn get_module_metadata(
        &self,
        _ctx: &Context,
        req: &pb::GetModuleMetadataRequest,
    ) -> Result<pb::ModuleMetadata, Status> {
        let version = self
            .modules
            .get(&req.source_addr)
            .ok_or_else(|| Status::not_found(format!("module {}", req.source_addr)))?;
        Ok(pb::ModuleMetadata {
            source_addr: req.source_addr.clone(),
            version: version.clone(),
        })
    }

    fn open_module_package(
        &self,
        _ctx: &Context,
        req: pb::OpenModulePackageRequest,
    ) -> Result<pb::ModulePackageHandle, Status> {
        if !self.modules.contains_key(&req.source_addr) {
            return Err(Status::not_found(req.source_addr));
        }
        Ok(pb::ModulePackageHandle { handle: 1 })
    }

    fn close_module_package(
        &self,
        _ctx: &Context,
        _handle: &pb::ModulePackageHandle,
    ) -> Result<(), Status> {
        Ok(())
    }
}

struct Serving;

impl HealthServer for Serving {
    fn check(&self, ctx: &Context) -> Result<pb::HealthStatus, Status> {
        if ctx.is_done() {
            return Err(Status::deadline_exceeded("health check"));
        }
        Ok(pb::HealthStatus {
            serving: true,
            detail: "serving".to_string(),
        })
    }

    fn probe(&self, value: Box<dyn Any + Send>) -> Result<Box<dyn Any + Send>, Status> {
        Ok(value)
    }
}

/// What a host registers at startup
struct Services {
    health: Arc<Health>,
    modules: Arc<ModuleRegistry>,
    widgets: Arc<Widget>,
}

impl Services {
    fn register() -> Self {
        Services {
            health: Arc::new(Health::new_stub()),
            modules: Arc::new(ModuleRegistry::new_stub()),
            widgets: Arc::new(Widget::new_stub()),
        }
    }
}

#[test]
fn test_staged_startup_and_shutdown() {
    let services = Services::register();
    let ctx = Context::background();

    // Nothing bound: all unavailable.
    let status = services.health.check(&ctx).unwrap_err();
    assert_eq!(status.code(), Code::Unavailable);
    assert!(services
        .widgets
        .get_widget(&ctx, &pb::GetWidgetRequest { id: 1 })
        .unwrap_err()
        .is_stub_unavailable());

    // Health comes up first; the rest stay unavailable.
    services.health.activate_rpc_server(Some(Arc::new(Serving)));
    assert!(services.health.check(&ctx).unwrap().serving);
    assert!(services
        .modules
        .get_module_metadata(&ctx, &pb::GetModuleMetadataRequest::default())
        .unwrap_err()
        .is_stub_unavailable());

    // The registry binds once its index is loaded.
    let mut modules = HashMap::new();
    modules.insert("registry.example/net/vpc".to_string(), "1.4.0".to_string());
    services
        .modules
        .activate_rpc_server(Some(Arc::new(Registry { modules })));

    let metadata = services
        .modules
        .get_module_metadata(
            &ctx,
            &pb::GetModuleMetadataRequest {
                source_addr: "registry.example/net/vpc".to_string(),
            },
        )
        .unwrap();
    assert_eq!(metadata.version, "1.4.0");

    let missing = services
        .modules
        .open_module_package(
            &ctx,
            pb::OpenModulePackageRequest {
                source_addr: "registry.example/none".to_string(),
            },
        )
        .unwrap_err();
    assert_eq!(missing.code(), Code::NotFound);
    assert!(!missing.is_stub_unavailable());

    // Shutdown withdraws backends; stubs go back to unavailable.
    services.modules.activate_rpc_server(None);
    services.health.activate_rpc_server(None);
    assert!(services.health.check(&ctx).unwrap_err().is_stub_unavailable());
    assert!(services
        .modules
        .close_module_package(&ctx, &pb::ModulePackageHandle { handle: 1 })
        .unwrap_err()
        .is_stub_unavailable());
}

#[test]
fn test_stub_forwards_expired_context() {
    let services = Services::register();
    services.health.activate_rpc_server(Some(Arc::new(Serving)));

    let ctx = Context::background();
    ctx.cancel();
    let status = services.health.check(&ctx).unwrap_err();
    assert_eq!(status.code(), Code::DeadlineExceeded);
}

#[test]
fn test_facade_exposes_synthesis() {
    let catalog_path =
        std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("crates/services/catalog/services.toml");
    let catalog = dynrpc::Catalog::from_file(&catalog_path).unwrap();
    let stubs = dynrpc::synthesize(&catalog, &dynrpc::SynthOptions::default()).unwrap();
    let artifacts = dynrpc::render_artifacts(&stubs, &dynrpc::EmitOptions::default());
    assert_eq!(artifacts.len(), stubs.len() + 1);
    assert_eq!(artifacts.last().unwrap().file_name, "mod.rs");
}
