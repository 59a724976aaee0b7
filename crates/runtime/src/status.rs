//! Failure channel for contract methods
//!
//! Every contract method returns `Result<_, Status>`. A stub introduces
//! exactly one failure of its own, [`Status::unavailable`], when no backend
//! is installed. Anything a backend returns travels through untouched.

use std::fmt;
use thiserror::Error;

/// Message carried by the failure a stub reports while unbound
pub const UNAVAILABLE_MESSAGE: &str = "service not yet available";

/// Canonical RPC status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Code {
    /// Not an error; present for completeness of the code space
    Ok,
    /// The operation was cancelled, typically by the caller
    Cancelled,
    /// Unknown error
    Unknown,
    /// Client specified an invalid argument
    InvalidArgument,
    /// Deadline expired before the operation could complete
    DeadlineExceeded,
    /// Some requested entity was not found
    NotFound,
    /// The entity a client attempted to create already exists
    AlreadyExists,
    /// Caller lacks permission for the operation
    PermissionDenied,
    /// Some resource has been exhausted
    ResourceExhausted,
    /// System is not in a state required for the operation
    FailedPrecondition,
    /// The operation was aborted
    Aborted,
    /// Operation attempted past the valid range
    OutOfRange,
    /// Operation is not implemented or supported
    Unimplemented,
    /// Internal invariant broken
    Internal,
    /// The service is currently unavailable
    Unavailable,
    /// Unrecoverable data loss or corruption
    DataLoss,
    /// Request lacks valid authentication credentials
    Unauthenticated,
}

impl Code {
    /// Lower snake-case name of the code
    pub fn as_str(self) -> &'static str {
        match self {
            Code::Ok => "ok",
            Code::Cancelled => "cancelled",
            Code::Unknown => "unknown",
            Code::InvalidArgument => "invalid_argument",
            Code::DeadlineExceeded => "deadline_exceeded",
            Code::NotFound => "not_found",
            Code::AlreadyExists => "already_exists",
            Code::PermissionDenied => "permission_denied",
            Code::ResourceExhausted => "resource_exhausted",
            Code::FailedPrecondition => "failed_precondition",
            Code::Aborted => "aborted",
            Code::OutOfRange => "out_of_range",
            Code::Unimplemented => "unimplemented",
            Code::Internal => "internal",
            Code::Unavailable => "unavailable",
            Code::DataLoss => "data_loss",
            Code::Unauthenticated => "unauthenticated",
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An RPC failure: a code plus a human-readable message
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[error("{code}: {message}")]
pub struct Status {
    code: Code,
    message: String,
}

impl Status {
    /// Create a status with an arbitrary code
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        Status {
            code,
            message: message.into(),
        }
    }

    /// The failure reported by a stub with no backend installed
    pub fn unavailable() -> Self {
        Status::new(Code::Unavailable, UNAVAILABLE_MESSAGE)
    }

    /// Shorthand for [`Code::InvalidArgument`]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Status::new(Code::InvalidArgument, message)
    }

    /// Shorthand for [`Code::NotFound`]
    pub fn not_found(message: impl Into<String>) -> Self {
        Status::new(Code::NotFound, message)
    }

    /// Shorthand for [`Code::Internal`]
    pub fn internal(message: impl Into<String>) -> Self {
        Status::new(Code::Internal, message)
    }

    /// Shorthand for [`Code::Cancelled`]
    pub fn cancelled(message: impl Into<String>) -> Self {
        Status::new(Code::Cancelled, message)
    }

    /// Shorthand for [`Code::DeadlineExceeded`]
    pub fn deadline_exceeded(message: impl Into<String>) -> Self {
        Status::new(Code::DeadlineExceeded, message)
    }

    /// Status code
    pub fn code(&self) -> Code {
        self.code
    }

    /// Status message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// True if this is exactly the failure an unbound stub reports
    ///
    /// A backend that itself returns `Unavailable` with another message is
    /// not mistaken for an unbound stub.
    pub fn is_stub_unavailable(&self) -> bool {
        self.code == Code::Unavailable && self.message == UNAVAILABLE_MESSAGE
    }
}
