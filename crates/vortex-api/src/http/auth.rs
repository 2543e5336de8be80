//! Credential-guard middleware for the HTTP layer.
//!
//! Both presentation modes (header and query token) verify against the same
//! process-wide secret through a constant-time comparison; failures always
//! surface as the same generic 401.

use std::sync::Arc;

use axum::{extract::State, http::Request, middleware::Next, response::Response};

use crate::http::constants::HEADER_ACCESS_KEY;
use crate::http::errors::ApiError;
use crate::state::ApiState;

const INVALID_CREDENTIAL: &str = "invalid access key";

pub(crate) async fn require_access_key(
    State(state): State<Arc<ApiState>>,
    req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = req
        .headers()
        .get(HEADER_ACCESS_KEY)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    let Some(presented) = presented else {
        return Err(ApiError::unauthorized(INVALID_CREDENTIAL));
    };
    if !state.access_key.verify(presented) {
        return Err(ApiError::unauthorized(INVALID_CREDENTIAL));
    }

    Ok(next.run(req).await)
}

/// Verify the query-token credential used by artifact retrieval.
pub(crate) fn verify_query_token(
    state: &ApiState,
    token: Option<&str>,
) -> Result<(), ApiError> {
    match token.map(str::trim).filter(|token| !token.is_empty()) {
        Some(token) if state.access_key.verify(token) => Ok(()),
        _ => Err(ApiError::unauthorized(INVALID_CREDENTIAL)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tests::stub_state;
    use axum::http::StatusCode;

    #[test]
    fn query_token_requires_exact_match() {
        let state = stub_state("secret");

        assert!(verify_query_token(&state, Some("secret")).is_ok());

        for presented in [None, Some(""), Some("  "), Some("secreT"), Some("secret ")] {
            let trimmed_ok = presented == Some("secret ");
            let result = verify_query_token(&state, presented);
            if trimmed_ok {
                assert!(result.is_ok(), "surrounding whitespace is trimmed");
            } else {
                let err = result.expect_err("credential should be rejected");
                assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
                assert_eq!(err.detail(), Some(INVALID_CREDENTIAL));
            }
        }
    }
}
