//! Shared Error Types
//!
//! Error taxonomy for the client core:
//!
//! - `Network` - transport unreachable, timeout, or unexpected server status
//! - `Auth` - invalid or expired session token
//! - `Validation` - empty or malformed input, rejected before any request
//!
//! All variants are recoverable at the caller level; nothing in the core
//! retries automatically. Errors are `Clone` so test scripts and UI state can
//! hold them by value.

use thiserror::Error;

/// Errors surfaced by the chat client core
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// Transport failure or unexpected server response
    #[error("network error: {message}")]
    Network {
        /// Human-readable error message
        message: String,
    },

    /// Invalid or expired session token
    #[error("authentication error: {message}")]
    Auth {
        /// Human-readable error message
        message: String,
    },

    /// Input rejected before issuing a request
    #[error("validation error in field '{field}': {message}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl ChatError {
    /// Create a new network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a new authentication error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Map an HTTP status code to the matching error variant.
    ///
    /// 401 and 403 indicate a rejected session token; everything else that
    /// reaches this point is a transport-level failure.
    pub fn from_status(status: u16, detail: impl Into<String>) -> Self {
        match status {
            401 | 403 => Self::auth(detail),
            _ => Self::network(format!("HTTP {}: {}", status, detail.into())),
        }
    }

    /// Whether this error indicates the session token was rejected
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) if status.as_u16() == 401 || status.as_u16() == 403 => {
                Self::auth(err.to_string())
            }
            _ => Self::network(err.to_string()),
        }
    }
}
