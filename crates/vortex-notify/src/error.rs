//! Error types for the auxiliary listener.

use thiserror::Error;

/// Primary error type for listener transport operations.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// HTTP request to the messaging platform failed.
    #[error("transport request failed")]
    Transport {
        /// Operation identifier.
        operation: &'static str,
        /// Underlying HTTP client error.
        source: reqwest::Error,
    },
    /// Messaging platform answered with an error payload.
    #[error("platform request rejected")]
    Platform {
        /// Operation identifier.
        operation: &'static str,
        /// Description reported by the platform.
        description: String,
    },
}

/// Convenience alias for listener results.
pub type NotifyResult<T> = Result<T, NotifyError>;
