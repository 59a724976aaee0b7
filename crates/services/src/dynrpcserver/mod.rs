// Code generated by dynrpc-stubgen. DO NOT EDIT.

//! Activatable stubs for every eligible service contract.

#[rustfmt::skip]
mod health;
#[rustfmt::skip]
mod module_registry;
#[rustfmt::skip]
mod widget;

pub use health::Health;
pub use module_registry::ModuleRegistry;
pub use widget::Widget;
