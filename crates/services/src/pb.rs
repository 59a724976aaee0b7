//! Service contracts and message types
//!
//! Every trait here has a matching entry in `catalog/services.toml`; keep the
//! two in sync and rerun `dynrpc-stubgen` after changing either.

use dynrpc_runtime::{Context, ServerStream, Status};
use std::any::Any;

// ============================================================================
// Messages
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Widget {
    pub id: u64,
    pub name: String,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetWidgetRequest {
    pub id: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListWidgetsRequest {
    pub name_prefix: String,
    /// Zero means no limit
    pub limit: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListWidgetsResponse {
    pub widgets: Vec<Widget>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteWidgetRequest {
    pub id: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetRef {
    pub id: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetEvent {
    pub id: u64,
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandshakeRequest {
    pub client_version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandshakeResponse {
    pub server_version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopRequest {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetModuleMetadataRequest {
    pub source_addr: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleMetadata {
    pub source_addr: String,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenModulePackageRequest {
    pub source_addr: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModulePackageHandle {
    pub handle: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HealthStatus {
    pub serving: bool,
    pub detail: String,
}

// ============================================================================
// Contracts
// ============================================================================

/// Version negotiation. Runs before any other service is registered.
pub trait SetupServer: Send + Sync {
    fn handshake(&self, ctx: &Context, req: &HandshakeRequest) -> Result<HandshakeResponse, Status>;
    fn stop(&self, ctx: &Context, req: &StopRequest) -> Result<(), Status>;
}

pub trait WidgetServer: Send + Sync {
    fn get_widget(&self, ctx: &Context, req: &GetWidgetRequest) -> Result<Widget, Status>;
    fn list_widgets(
        &self,
        ctx: &Context,
        req: &ListWidgetsRequest,
    ) -> Result<ListWidgetsResponse, Status>;
    fn delete_widget(&self, ctx: &Context, req: &DeleteWidgetRequest) -> Result<(), Status>;
    fn annotate_widget(
        &self,
        ctx: &Context,
        widget: &WidgetRef,
        note: Box<dyn Any + Send>,
    ) -> Result<(), Status>;
}

/// Per-call event stream for one widget subscription
pub trait StreamWidgetServer: ServerStream {
    fn send(&mut self, event: &WidgetEvent) -> Result<(), Status>;
}

pub trait ModuleRegistryServer: Send + Sync {
    fn get_module_metadata(
        &self,
        ctx: &Context,
        req: &GetModuleMetadataRequest,
    ) -> Result<ModuleMetadata, Status>;
    fn open_module_package(
        &self,
        ctx: &Context,
        req: OpenModulePackageRequest,
    ) -> Result<ModulePackageHandle, Status>;
    fn close_module_package(&self, ctx: &Context, handle: &ModulePackageHandle)
        -> Result<(), Status>;
}

pub trait HealthServer: Send + Sync {
    fn check(&self, ctx: &Context) -> Result<HealthStatus, Status>;
    fn probe(&self, value: Box<dyn Any + Send>) -> Result<Box<dyn Any + Send>, Status>;
}

/// Client-side callback; implemented by callers, not served.
pub trait WidgetEvents: Send + Sync {
    fn publish(&self, event: &WidgetEvent) -> Result<(), Status>;
}
