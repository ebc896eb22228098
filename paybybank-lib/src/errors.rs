//! Error types for Pay-by-Bank operations.
//!
//! Every failure mode of the library is expressed as a [`PayByBankError`].
//! Public operations never return these directly to the caller; they are
//! folded into a [`StepOutcome`](crate::workflow::StepOutcome) at the step
//! boundary. The error type is still public so custom [`Upstream`]
//! implementations can report failures the same way the HTTP client does.
//!
//! [`Upstream`]: crate::upstream::Upstream

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Coarse classification carried in every result returned to callers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// The call succeeded.
    #[default]
    None,
    /// Caller input was rejected before any network call.
    Validation,
    /// No response was received from the processor.
    Network,
    /// The processor answered with a non-2xx status.
    Upstream,
    /// A local failure prevented the call from being issued.
    Internal,
}

/// Comprehensive error type for Pay-by-Bank operations.
#[derive(Debug, thiserror::Error)]
pub enum PayByBankError {
    /// Required credential or request fields are missing or malformed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Transport failure without a more specific cause.
    #[error("transport error: {0}")]
    Transport(String),

    /// Connection to the processor could not be established.
    #[error("connection to {target} failed: {reason}")]
    ConnectionFailed {
        /// Target URL
        target: String,
        /// Underlying error message
        reason: String,
    },

    /// The processor did not answer within the configured timeout.
    #[error("{operation} timed out after {timeout_ms}ms")]
    ConnectionTimeout {
        /// Operation that timed out
        operation: String,
        /// Timeout duration in milliseconds
        timeout_ms: u64,
    },

    /// The processor answered with a non-2xx status.
    #[error("processor responded with status {status}")]
    Upstream {
        /// HTTP status code
        status: u16,
        /// Response body, parsed as JSON when possible
        body: Value,
    },

    /// Payload could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Client configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Internal/unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PayByBankError {
    /// Classify this error for the caller-facing result.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Transport(_) | Self::ConnectionFailed { .. } | Self::ConnectionTimeout { .. } => {
                ErrorKind::Network
            }
            Self::Upstream { .. } => ErrorKind::Upstream,
            Self::Serialization(_) | Self::Config(_) | Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// The processor's HTTP status, or 0 when no response was received.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Upstream { status, .. } => *status,
            _ => 0,
        }
    }

    /// The processor's response body, or `Null` when no response was received.
    pub fn body(&self) -> Value {
        match self {
            Self::Upstream { body, .. } => body.clone(),
            _ => Value::Null,
        }
    }

    /// Body handed back to the caller: the processor's body, or
    /// `{"error": reason}` for rejected input.
    pub fn response_body(&self) -> Value {
        match self {
            Self::Validation(reason) => serde_json::json!({ "error": reason }),
            other => other.body(),
        }
    }

    /// Create a validation error.
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation(reason.into())
    }
}

impl From<serde_json::Error> for PayByBankError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
