//! Job orchestration over a blocking fetch engine.
//!
//! # Design
//! - Validation happens before any side effect; a rejected URL never touches
//!   the filesystem or the engine.
//! - The engine call may block for minutes, so it runs on the tokio blocking
//!   pool while the submitting request awaits its own result.
//! - Engine output paths are re-validated against the artifact store; the
//!   engine is not trusted to stay inside the root.

use std::ffi::OsStr;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::task;
use tracing::{error, info};
use url::Url;
use vortex_store::{ArtifactStore, StoreError};

use crate::error::{JobError, JobResult};
use crate::model::{FetchOutcome, FetchRequest, JobId, JobOutcome};

/// Blocking media extraction engine boundary.
///
/// Implementations may block the calling thread; the orchestrator offloads
/// them to the worker pool.
pub trait MediaFetcher: Send + Sync {
    /// Fetch the requested resource and persist it under the target
    /// directory, embedding the job identifier in the output name.
    ///
    /// # Errors
    ///
    /// Returns an error when the resource cannot be fetched or persisted.
    fn fetch(&self, request: &FetchRequest) -> anyhow::Result<FetchOutcome>;
}

/// Job submission surface consumed by the HTTP layer.
#[async_trait]
pub trait JobWorkflow: Send + Sync {
    /// Validate the URL, run the fetch to completion and return the outcome.
    async fn submit(&self, url: &str) -> JobResult<JobOutcome>;
}

/// Orchestrates a single fetch job from validation to sandboxed artifact.
#[derive(Clone)]
pub struct JobRunner {
    fetcher: Arc<dyn MediaFetcher>,
    store: ArtifactStore,
}

impl JobRunner {
    /// Construct a runner over the given engine and artifact store.
    #[must_use]
    pub fn new(fetcher: Arc<dyn MediaFetcher>, store: ArtifactStore) -> Self {
        Self { fetcher, store }
    }

    /// Submit one job and await its completion.
    ///
    /// Concurrent submissions are independent: each receives a fresh
    /// [`JobId`], so output names never collide and no shared state is
    /// touched during the offloaded work.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid URLs, engine failures, or engine output
    /// that escapes the artifact root.
    pub async fn submit(&self, url: &str) -> JobResult<JobOutcome> {
        let url = validate_url(url)?;
        let job_id = JobId::generate();
        let request = FetchRequest {
            url,
            job_id: job_id.clone(),
            target_dir: self.store.root().to_path_buf(),
        };

        info!(job_id = %job_id, url = %request.url, "dispatching fetch job");
        let fetcher = Arc::clone(&self.fetcher);
        let outcome = task::spawn_blocking(move || fetcher.fetch(&request))
            .await
            .map_err(|source| JobError::Worker { source })?
            .map_err(|source| {
                error!(job_id = %job_id, error = %source, "fetch job failed");
                JobError::Fetch { source }
            })?;

        let filepath = self
            .store
            .confine(&outcome.filepath)
            .map_err(|source| JobError::Store { source })?;
        let filename = artifact_file_name(&filepath)?;

        info!(job_id = %job_id, filename = %filename, "fetch job completed");
        Ok(JobOutcome {
            title: outcome.title,
            filename,
            filepath,
        })
    }
}

#[async_trait]
impl JobWorkflow for JobRunner {
    async fn submit(&self, url: &str) -> JobResult<JobOutcome> {
        Self::submit(self, url).await
    }
}

fn validate_url(raw: &str) -> JobResult<Url> {
    let url = Url::parse(raw).map_err(|_| JobError::InvalidUrl {
        value: raw.to_string(),
        reason: "unparseable",
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(JobError::InvalidUrl {
            value: raw.to_string(),
            reason: "unsupported_scheme",
        }),
    }
}

fn artifact_file_name(filepath: &std::path::Path) -> JobResult<String> {
    filepath
        .file_name()
        .and_then(OsStr::to_str)
        .map(ToString::to_string)
        .ok_or_else(|| JobError::Store {
            source: StoreError::Rejected {
                name: filepath.display().to_string(),
            },
        })
}
