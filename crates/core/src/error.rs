//! Error types for tarsmith
//!
//! This module defines the error taxonomy used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Which variants reach a caller depends on the operation: inspection raises
//! decode failures, while an entry removal folds decode, framing and replace
//! failures into a `false` completion flag and only raises preconditions.

use std::fmt;
use std::io;
use thiserror::Error;

/// Result type alias for tarsmith operations
pub type Result<T> = std::result::Result<T, Error>;

/// Classification attached to precondition failures
///
/// Mirrors the status a request/response boundary reports to its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// The repository, the thing, or the path could not be found
    NotFound,
    /// The request itself is malformed (missing identifier, bad path, ...)
    NotAcceptable,
}

impl StatusCode {
    /// HTTP status code equivalent
    pub fn http_code(&self) -> u16 {
        match self {
            StatusCode::NotFound => 404,
            StatusCode::NotAcceptable => 406,
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusCode::NotFound => write!(f, "not found"),
            StatusCode::NotAcceptable => write!(f, "not acceptable"),
        }
    }
}

/// Error types for tarsmith
#[derive(Debug, Error)]
pub enum Error {
    /// Request could not be served (bad identifier, wrong collaborator, unopenable path)
    #[error("{message} ({status})")]
    Precondition {
        /// Classification reported to the caller
        status: StatusCode,
        /// Human-readable description
        message: String,
    },

    /// Input is not valid gzip data or not valid tar framing
    #[error("Decode error: {0}")]
    Decode(String),

    /// Write-side entry framing contract was violated
    #[error("Framing error: {0}")]
    Framing(String),

    /// Moving the staging artifact over the original archive failed
    #[error("Replace of '{to}' with '{from}' failed: {source}")]
    Replace {
        /// Staging path
        from: String,
        /// Archive path being replaced
        to: String,
        /// Underlying repository error
        #[source]
        source: io::Error,
    },

    /// I/O error against a repository stream
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Create a not-found precondition error
    pub fn not_found(message: impl Into<String>) -> Self {
        Error::Precondition {
            status: StatusCode::NotFound,
            message: message.into(),
        }
    }

    /// Create a not-acceptable precondition error
    pub fn not_acceptable(message: impl Into<String>) -> Self {
        Error::Precondition {
            status: StatusCode::NotAcceptable,
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Error::Decode(msg.into())
    }

    /// Create a framing error
    pub fn framing(msg: impl Into<String>) -> Self {
        Error::Framing(msg.into())
    }

    /// Status classification, if this is a precondition failure
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Precondition { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this error must be raised immediately rather than folded into a result
    pub fn is_precondition(&self) -> bool {
        matches!(self, Error::Precondition { .. })
    }
}
