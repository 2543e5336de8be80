//! Router construction and server host for the API.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::{HeaderName, Method, Request, header::CONTENT_TYPE},
    middleware,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::Span;
use vortex_config::AccessKey;
use vortex_core::JobWorkflow;
use vortex_store::ArtifactStore;

use crate::error::ApiServerError;
use crate::http::auth::require_access_key;
use crate::http::constants::HEADER_ACCESS_KEY;
use crate::http::files::download_artifact;
use crate::http::health::health;
use crate::http::jobs::submit_job;
use crate::state::ApiState;

/// Axum router wrapper that hosts the Vortex gateway services.
pub struct ApiServer {
    router: Router,
}

impl ApiServer {
    /// Construct a new API server with shared dependencies wired through
    /// application state.
    #[must_use]
    pub fn new(access_key: AccessKey, jobs: Arc<dyn JobWorkflow>, store: ArtifactStore) -> Self {
        Self::with_state(Arc::new(ApiState::new(access_key, jobs, store)))
    }

    fn with_state(state: Arc<ApiState>) -> Self {
        let cors_layer = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([CONTENT_TYPE, HeaderName::from_static(HEADER_ACCESS_KEY)]);
        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &Request<_>| {
                tracing::info_span!(
                    "http.request",
                    method = %request.method(),
                    route = %request.uri().path(),
                    status_code = tracing::field::Empty,
                    latency_ms = tracing::field::Empty
                )
            })
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &Span| {
                    span.record("status_code", response.status().as_u16());
                    let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
                    span.record("latency_ms", latency_ms);
                },
            );
        let layered = ServiceBuilder::new().layer(trace_layer);

        let router = Self::build_router(&state)
            .layer(cors_layer)
            .route_layer(layered)
            .with_state(state);

        Self { router }
    }

    fn build_router(state: &Arc<ApiState>) -> Router<Arc<ApiState>> {
        let require_key = middleware::from_fn_with_state(state.clone(), require_access_key);

        Router::new()
            .route("/health", get(health))
            .route("/yoink", post(submit_job).route_layer(require_key))
            .route("/files/{filename}", get(download_artifact))
    }

    /// Serve the API on the supplied address until the shutdown signal
    /// resolves, then drain gracefully.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener fails to bind or the server
    /// terminates unexpectedly.
    pub async fn serve_until(
        self,
        addr: SocketAddr,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), ApiServerError> {
        tracing::info!("Starting API on {}", addr);
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ApiServerError::Bind { addr, source })?;
        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|source| ApiServerError::Serve { source })
    }

    /// Serve the API on the supplied address for the lifetime of the process.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener fails to bind or the server
    /// terminates unexpectedly.
    pub async fn serve(self, addr: SocketAddr) -> Result<(), ApiServerError> {
        self.serve_until(addr, std::future::pending()).await
    }

    #[cfg(test)]
    pub(crate) fn router(&self) -> Router {
        self.router.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{JobSubmitResponse, ProblemDetails};
    use crate::state::tests::{ScriptedJob, StubWorkflow, state_with};
    use anyhow::Result;
    use axum::body::Body;
    use axum::http::StatusCode;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;
    use tower::ServiceExt;
    use vortex_core::JobOutcome;

    fn server_with(jobs: Arc<StubWorkflow>, root: &Path) -> ApiServer {
        ApiServer::with_state(Arc::new(state_with("secret", jobs, root)))
    }

    fn yoink_request(access_key: Option<&str>) -> Result<Request<Body>> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/yoink")
            .header(CONTENT_TYPE, "application/json");
        if let Some(key) = access_key {
            builder = builder.header(HEADER_ACCESS_KEY, key);
        }
        Ok(builder.body(Body::from(r#"{"url":"https://example.com/video"}"#))?)
    }

    #[tokio::test]
    async fn health_is_served_without_credentials() -> Result<()> {
        let temp = TempDir::new()?;
        let jobs = Arc::new(StubWorkflow::new(ScriptedJob::FetchFailed));
        let server = server_with(jobs, temp.path());

        let response = server
            .router()
            .oneshot(Request::builder().uri("/health").body(Body::empty())?)
            .await?;
        assert_eq!(response.status(), StatusCode::OK);
        Ok(())
    }

    #[tokio::test]
    async fn yoink_rejects_a_wrong_credential_before_any_fetch() -> Result<()> {
        let temp = TempDir::new()?;
        let jobs = Arc::new(StubWorkflow::new(ScriptedJob::FetchFailed));
        let server = server_with(Arc::clone(&jobs), temp.path());

        for key in [None, Some("wrong")] {
            let response = server.router().oneshot(yoink_request(key)?).await?;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
            let problem: ProblemDetails = serde_json::from_slice(&bytes)?;
            assert_eq!(problem.detail.as_deref(), Some("invalid access key"));
        }
        assert_eq!(jobs.call_count(), 0, "no fetch may run without credentials");
        Ok(())
    }

    #[tokio::test]
    async fn yoink_returns_the_job_outcome_payload() -> Result<()> {
        let temp = TempDir::new()?;
        let outcome = JobOutcome {
            title: "Demo".to_string(),
            filename: "Demo [ab12cd34].mp4".to_string(),
            filepath: PathBuf::from("/data/downloads/Demo [ab12cd34].mp4"),
        };
        let jobs = Arc::new(StubWorkflow::new(ScriptedJob::Success(outcome)));
        let server = server_with(jobs, temp.path());

        let response = server
            .router()
            .oneshot(yoink_request(Some("secret"))?)
            .await?;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let payload: JobSubmitResponse = serde_json::from_slice(&bytes)?;
        assert_eq!(payload.status, "success");
        assert_eq!(payload.title, "Demo");
        assert_eq!(payload.download_url, "/files/Demo [ab12cd34].mp4");
        Ok(())
    }

    #[tokio::test]
    async fn files_route_enforces_the_query_token() -> Result<()> {
        let temp = TempDir::new()?;
        std::fs::write(temp.path().join("movie.mp4"), b"video-bytes")?;
        let jobs = Arc::new(StubWorkflow::new(ScriptedJob::FetchFailed));
        let server = server_with(jobs, temp.path());

        let denied = server
            .router()
            .oneshot(Request::builder().uri("/files/movie.mp4").body(Body::empty())?)
            .await?;
        assert_eq!(denied.status(), StatusCode::UNAUTHORIZED);

        let served = server
            .router()
            .oneshot(
                Request::builder()
                    .uri("/files/movie.mp4?token=secret")
                    .body(Body::empty())?,
            )
            .await?;
        assert_eq!(served.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(served.into_body(), usize::MAX).await?;
        assert_eq!(bytes.as_ref(), b"video-bytes");
        Ok(())
    }
}
