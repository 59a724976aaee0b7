//! Replaceable delegate storage
//!
//! `DelegateCell<S>` is the state every generated stub owns: an optional
//! shared handle to the real server, guarded by a reader/writer lock.
//!
//! ## Locking discipline
//!
//! - Readers hold the read lock only while cloning the `Arc` handle. The
//!   delegate call itself runs with no lock held, so a slow backend never
//!   blocks other callers or a pending activation.
//! - [`activate`](DelegateCell::activate) holds the write lock only while
//!   swapping the handle. The previous handle is dropped after the lock is
//!   released, so a delegate's `Drop` never runs inside the critical section.
//!
//! Any read that starts after `activate` returns observes that delegate or a
//! newer one. Reads racing an activation see either the old or the new
//! handle, never anything in between.

use crate::status::Status;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Lock-guarded, replaceable reference to a delegate implementation
///
/// `S` is usually a contract trait object such as `dyn WidgetServer`.
pub struct DelegateCell<S: ?Sized> {
    /// Contract name, used for diagnostics only
    name: &'static str,
    current: RwLock<Option<Arc<S>>>,
}

impl<S: ?Sized> DelegateCell<S> {
    /// Create an unbound cell for the contract called `name`
    pub fn new(name: &'static str) -> Self {
        DelegateCell {
            name,
            current: RwLock::new(None),
        }
    }

    /// Contract name given at construction
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Install `delegate` as the backend, or clear it with `None`
    ///
    /// Never fails. Once this returns, every subsequent read observes the
    /// new value (or a later one).
    pub fn activate(&self, delegate: Option<Arc<S>>) {
        let bound = delegate.is_some();
        let previous = {
            let mut current = self.current.write();
            std::mem::replace(&mut *current, delegate)
        };
        debug!(
            service = self.name,
            bound,
            replaced = previous.is_some(),
            "delegate activated"
        );
        drop(previous);
    }

    /// Snapshot of the installed delegate, if any
    pub fn current(&self) -> Option<Arc<S>> {
        self.current.read().clone()
    }

    /// The installed delegate, or the fixed unavailable failure
    pub fn get(&self) -> Result<Arc<S>, Status> {
        self.current().ok_or_else(Status::unavailable)
    }

    /// True if a delegate is currently installed
    pub fn is_bound(&self) -> bool {
        self.current.read().is_some()
    }
}

impl<S: ?Sized> fmt::Debug for DelegateCell<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelegateCell")
            .field("name", &self.name)
            .field("bound", &self.is_bound())
            .finish()
    }
}
