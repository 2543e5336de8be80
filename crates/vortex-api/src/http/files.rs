//! Artifact retrieval endpoint.
//!
//! # Design
//! - The query-token credential is checked before any filesystem access.
//! - Sandbox rejection and genuine absence collapse into the same 404 so the
//!   response never reveals directory structure.
//! - Bytes are streamed; artifacts can be large.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path as AxumPath, Query, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::Response,
};
use serde::Deserialize;
use tokio_util::io::ReaderStream;
use tracing::{error, warn};

use crate::http::auth::verify_query_token;
use crate::http::errors::ApiError;
use crate::state::ApiState;

const FILE_NOT_FOUND: &str = "file not found";

#[derive(Debug, Deserialize)]
pub(crate) struct FileTokenQuery {
    #[serde(default)]
    pub(crate) token: Option<String>,
}

pub(crate) async fn download_artifact(
    State(state): State<Arc<ApiState>>,
    AxumPath(filename): AxumPath<String>,
    Query(query): Query<FileTokenQuery>,
) -> Result<Response, ApiError> {
    verify_query_token(&state, query.token.as_deref())?;

    let path = state.store.resolve_existing(&filename).map_err(|err| {
        warn!(candidate = %filename, error = %err, "artifact resolution failed");
        ApiError::not_found(FILE_NOT_FOUND)
    })?;

    let file = tokio::fs::File::open(&path).await.map_err(|err| {
        warn!(path = %path.display(), error = %err, "artifact open failed");
        ApiError::not_found(FILE_NOT_FOUND)
    })?;

    Response::builder()
        .header(CONTENT_TYPE, "application/octet-stream")
        .header(
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        )
        .body(Body::from_stream(ReaderStream::new(file)))
        .map_err(|err| {
            error!(error = %err, "failed to build file response");
            ApiError::internal("failed to build file response")
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tests::{ScriptedJob, StubWorkflow, state_with};
    use anyhow::Result;
    use axum::http::StatusCode;
    use tempfile::TempDir;

    fn state_over(root: &TempDir) -> Arc<ApiState> {
        Arc::new(state_with(
            "secret",
            Arc::new(StubWorkflow::new(ScriptedJob::FetchFailed)),
            root.path(),
        ))
    }

    fn token(value: &str) -> Query<FileTokenQuery> {
        Query(FileTokenQuery {
            token: Some(value.to_string()),
        })
    }

    #[tokio::test]
    async fn streams_an_existing_artifact() -> Result<()> {
        let root = TempDir::new()?;
        std::fs::write(root.path().join("Demo [ab12cd34].mp4"), b"video-bytes")?;
        let state = state_over(&root);

        let response = download_artifact(
            State(state),
            AxumPath("Demo [ab12cd34].mp4".to_string()),
            token("secret"),
        )
        .await
        .map_err(|err| anyhow::anyhow!("unexpected error: {err:?}"))?;

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        assert_eq!(bytes.as_ref(), b"video-bytes");
        Ok(())
    }

    #[tokio::test]
    async fn wrong_token_is_unauthorized_before_any_lookup() -> Result<()> {
        let root = TempDir::new()?;
        std::fs::write(root.path().join("movie.mp4"), b"video")?;
        let state = state_over(&root);

        let err = download_artifact(
            State(state),
            AxumPath("movie.mp4".to_string()),
            token("wrong"),
        )
        .await
        .expect_err("bad token must be rejected");
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        Ok(())
    }

    #[tokio::test]
    async fn missing_and_traversal_names_share_the_same_shape() -> Result<()> {
        let root = TempDir::new()?;
        let state = state_over(&root);

        let missing = download_artifact(
            State(Arc::clone(&state)),
            AxumPath("never-produced.mp4".to_string()),
            token("secret"),
        )
        .await
        .expect_err("missing artifact must 404");
        let traversal = download_artifact(
            State(state),
            AxumPath("../../etc/passwd".to_string()),
            token("secret"),
        )
        .await
        .expect_err("traversal must 404");

        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(traversal.status(), StatusCode::NOT_FOUND);
        assert_eq!(missing.detail(), traversal.detail());
        Ok(())
    }
}
