//! Error types for the `yt-dlp` engine.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for engine invocations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine binary could not be launched.
    #[error("engine binary failed to launch")]
    Spawn {
        /// Binary that failed to launch.
        binary: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The engine exited with a failure status.
    #[error("engine extraction failed")]
    Extraction {
        /// Exit code when the process was not killed by a signal.
        status: Option<i32>,
        /// Truncated stderr captured for diagnostics.
        detail: String,
    },
    /// The engine succeeded but its output could not be interpreted.
    #[error("engine output unreadable")]
    Output {
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
}

/// Convenience alias for engine results.
pub type EngineResult<T> = Result<T, EngineError>;
