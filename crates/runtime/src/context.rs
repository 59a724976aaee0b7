//! Call-scoped context
//!
//! A `Context` travels with every call as the first argument. Stubs never
//! inspect it; they hand it to the delegate unchanged. Cancellation is shared
//! between clones, so a transport can cancel a call it already dispatched.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Deadline and cancellation carrier for a single call
#[derive(Debug, Clone, Default)]
pub struct Context {
    deadline: Option<Instant>,
    cancelled: Arc<AtomicBool>,
}

impl Context {
    /// A context with no deadline that is never cancelled unless asked to be
    pub fn background() -> Self {
        Self::default()
    }

    /// Derive a context that expires at `deadline`
    ///
    /// The derived context shares cancellation with `self`. An earlier
    /// existing deadline wins.
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let deadline = match self.deadline {
            Some(current) if current <= deadline => current,
            _ => deadline,
        };
        Context {
            deadline: Some(deadline),
            cancelled: Arc::clone(&self.cancelled),
        }
    }

    /// Derive a context that expires `timeout` from now
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Deadline of this call, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Cancel this context and every clone derived from it
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// True once [`cancel`](Self::cancel) has been called on any clone
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// True if cancelled or past the deadline
    pub fn is_done(&self) -> bool {
        self.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}
