//! # Design
//!
//! - Provide structured, constant-message errors for artifact storage.
//! - Keep rejection and absence distinguishable internally; callers collapse
//!   both into the same boundary response so directory structure never leaks.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for artifact store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors produced by the artifact store sandbox.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Candidate path attempted to reach outside the artifact root.
    #[error("artifact path rejected")]
    Rejected {
        /// Candidate as presented by the caller.
        name: String,
    },
    /// No artifact with the requested name exists under the root.
    #[error("artifact not found")]
    NotFound {
        /// Candidate as presented by the caller.
        name: String,
    },
    /// IO failures while interacting with the artifact directory.
    #[error("artifact store io failure")]
    Io {
        /// Operation that triggered the IO failure.
        operation: &'static str,
        /// Path involved in the IO failure.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}
