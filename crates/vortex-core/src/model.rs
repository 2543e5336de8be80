//! Job identifiers and data transfer objects.

use std::fmt;
use std::path::PathBuf;

use url::Url;
use uuid::Uuid;

/// Number of UUID hex characters kept in a job identifier.
const JOB_ID_LEN: usize = 8;

/// Opaque, unguessable identifier minted once per job.
///
/// Disambiguates artifact filenames on disk; never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobId(String);

impl JobId {
    /// Mint a fresh identifier.
    #[must_use]
    pub fn generate() -> Self {
        let simple = Uuid::new_v4().simple().to_string();
        Self(simple[..JOB_ID_LEN].to_string())
    }

    /// Identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Inputs handed to the fetch engine for a single job.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// Validated resource URL.
    pub url: Url,
    /// Job identifier the engine must embed in the output name.
    pub job_id: JobId,
    /// Directory the engine must place the artifact in.
    pub target_dir: PathBuf,
}

/// Result reported by the fetch engine.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    /// Title of the fetched resource.
    pub title: String,
    /// Path of the produced artifact as reported by the engine.
    pub filepath: PathBuf,
}

/// Final job result returned to the caller.
#[derive(Debug, Clone)]
pub struct JobOutcome {
    /// Title of the fetched resource.
    pub title: String,
    /// Bare artifact file name under the store root.
    pub filename: String,
    /// Sandbox-validated absolute artifact path.
    pub filepath: PathBuf,
}
