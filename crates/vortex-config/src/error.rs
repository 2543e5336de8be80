//! Error types for configuration operations.

use thiserror::Error;

/// Primary error type for configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable was absent or empty.
    #[error("missing environment variable")]
    MissingVar {
        /// Name of the missing variable.
        name: &'static str,
    },
    /// Environment variable held an unusable value.
    #[error("invalid environment variable")]
    InvalidVar {
        /// Name of the offending variable.
        name: &'static str,
        /// Value as presented by the environment.
        value: String,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;
