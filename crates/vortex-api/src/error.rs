//! Error types for the API server host.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// Primary error type for serving the API.
#[derive(Debug, Error)]
pub enum ApiServerError {
    /// The TCP listener could not be bound.
    #[error("failed to bind api listener")]
    Bind {
        /// Address the listener attempted to bind.
        addr: SocketAddr,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The server terminated unexpectedly.
    #[error("api server terminated unexpectedly")]
    Serve {
        /// Underlying IO error.
        source: io::Error,
    },
}
