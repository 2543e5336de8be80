//! Job submission endpoint.
//!
//! # Design
//! - Validation failures report their reason; engine failures collapse to a
//!   generic indicator while the full error is logged internally.
//! - The handler awaits its own job but never blocks the runtime; slow
//!   fetches run on the worker pool inside the orchestrator.

use std::sync::Arc;

use axum::{Json, extract::State};
use tracing::{error, info};
use vortex_core::JobError;

use crate::http::errors::ApiError;
use crate::models::{JobSubmitRequest, JobSubmitResponse};
use crate::state::ApiState;

pub(crate) async fn submit_job(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<JobSubmitRequest>,
) -> Result<Json<JobSubmitResponse>, ApiError> {
    info!(url = %request.url, "job submission received");
    let outcome = state
        .jobs
        .submit(&request.url)
        .await
        .map_err(map_job_error)?;

    let download_url = format!("/files/{}", outcome.filename);
    Ok(Json(JobSubmitResponse {
        status: "success".to_string(),
        title: outcome.title,
        filename: outcome.filename,
        download_url,
    }))
}

fn map_job_error(err: JobError) -> ApiError {
    match err {
        JobError::InvalidUrl { reason, .. } => ApiError::bad_request(match reason {
            "unsupported_scheme" => "URL scheme must be http or https",
            _ => "resource URL is not valid",
        }),
        other => {
            error!(error = ?other, "job submission failed");
            ApiError::bad_request("download failed")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tests::{ScriptedJob, StubWorkflow, state_with};
    use anyhow::Result;
    use axum::http::StatusCode;
    use std::path::PathBuf;
    use vortex_core::JobOutcome;

    fn success_outcome() -> JobOutcome {
        JobOutcome {
            title: "Demo".to_string(),
            filename: "Demo [ab12cd34].mp4".to_string(),
            filepath: PathBuf::from("/data/downloads/Demo [ab12cd34].mp4"),
        }
    }

    fn submit_request(url: &str) -> Json<JobSubmitRequest> {
        Json(JobSubmitRequest {
            url: url.to_string(),
        })
    }

    #[tokio::test]
    async fn successful_submission_returns_download_url() -> Result<()> {
        let jobs = Arc::new(StubWorkflow::new(ScriptedJob::Success(success_outcome())));
        let state = Arc::new(state_with("secret", Arc::clone(&jobs), "/tmp"));

        let Json(response) =
            submit_job(State(state), submit_request("https://example.com/video"))
                .await
                .map_err(|err| anyhow::anyhow!("unexpected error: {err:?}"))?;

        assert_eq!(response.status, "success");
        assert_eq!(response.title, "Demo");
        assert_eq!(response.filename, "Demo [ab12cd34].mp4");
        assert_eq!(response.download_url, "/files/Demo [ab12cd34].mp4");
        assert_eq!(jobs.call_count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_url_reports_the_scheme_problem() {
        let jobs = Arc::new(StubWorkflow::new(ScriptedJob::InvalidUrl));
        let state = Arc::new(state_with("secret", jobs, "/tmp"));

        let err = submit_job(State(state), submit_request("ftp://example.com"))
            .await
            .expect_err("invalid input must be rejected");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.detail(), Some("URL scheme must be http or https"));
    }

    #[tokio::test]
    async fn engine_failures_collapse_to_a_generic_detail() {
        let jobs = Arc::new(StubWorkflow::new(ScriptedJob::FetchFailed));
        let state = Arc::new(state_with("secret", jobs, "/tmp"));

        let err = submit_job(State(state), submit_request("https://example.com/video"))
            .await
            .expect_err("engine failure must surface as an error");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.detail(), Some("download failed"));
    }
}
