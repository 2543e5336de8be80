//! Error types for job orchestration.

use thiserror::Error;
use vortex_store::StoreError;

/// Primary error type for job submission.
#[derive(Debug, Error)]
pub enum JobError {
    /// Resource URL failed validation before any work began.
    #[error("invalid resource url")]
    InvalidUrl {
        /// URL as presented by the caller.
        value: String,
        /// Machine-readable reason for the rejection.
        reason: &'static str,
    },
    /// Fetch engine reported a failure.
    #[error("fetch engine failure")]
    Fetch {
        /// Underlying engine error.
        #[source]
        source: anyhow::Error,
    },
    /// Engine output failed artifact store validation.
    #[error("artifact store failure")]
    Store {
        /// Underlying store error.
        #[source]
        source: StoreError,
    },
    /// Offloaded fetch task could not be joined.
    #[error("worker join failure")]
    Worker {
        /// Underlying join error.
        #[source]
        source: tokio::task::JoinError,
    },
}

/// Convenience alias for job operation results.
pub type JobResult<T> = Result<T, JobError>;
