// Code generated by dynrpc-stubgen. DO NOT EDIT.

use std::sync::Arc;

use dynrpc_runtime::{Context, DelegateCell, Status};

use crate::pb;

/// Activatable stand-in for [`pb::WidgetServer`].
///
/// Every call fails with `Status::unavailable()` until a server is
/// installed with [`Widget::activate_rpc_server`].
pub struct Widget {
    server: DelegateCell<dyn pb::WidgetServer>,
}

const _: fn() = || {
    fn assert_server<T: pb::WidgetServer>() {}
    assert_server::<Widget>();
};

impl Widget {
    /// Creates a stub with no server installed.
    pub fn new_stub() -> Self {
        Widget {
            server: DelegateCell::new("WidgetServer"),
        }
    }

    /// Installs `server` as the backend, or clears it when `None`.
    pub fn activate_rpc_server(&self, server: Option<Arc<dyn pb::WidgetServer>>) {
        self.server.activate(server);
    }

    fn real_rpc_server(&self) -> Result<Arc<dyn pb::WidgetServer>, Status> {
        self.server.get()
    }
}

impl Default for Widget {
    fn default() -> Self {
        Self::new_stub()
    }
}

impl std::fmt::Debug for Widget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Widget").field("server", &self.server).finish()
    }
}

impl pb::WidgetServer for Widget {
    fn get_widget(&self, a0: &Context, a1: &pb::GetWidgetRequest) -> Result<pb::Widget, Status> {
        let server = self.real_rpc_server()?;
        pb::WidgetServer::get_widget(&*server, a0, a1)
    }

    fn list_widgets(&self, a0: &Context, a1: &pb::ListWidgetsRequest) -> Result<pb::ListWidgetsResponse, Status> {
        let server = self.real_rpc_server()?;
        pb::WidgetServer::list_widgets(&*server, a0, a1)
    }

    fn delete_widget(&self, a0: &Context, a1: &pb::DeleteWidgetRequest) -> Result<(), Status> {
        let server = self.real_rpc_server()?;
        pb::WidgetServer::delete_widget(&*server, a0, a1)
    }

    fn annotate_widget(&self, a0: &Context, a1: &pb::WidgetRef, a2: Box<dyn std::any::Any + Send>) -> Result<(), Status> {
        let server = self.real_rpc_server()?;
        pb::WidgetServer::annotate_widget(&*server, a0, a1, a2)
    }
}
