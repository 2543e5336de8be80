//! API data transfer objects.

use serde::{Deserialize, Serialize};

/// RFC9457-style problem payload returned for API errors.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// Problem type identifier.
    #[serde(rename = "type")]
    pub kind: String,
    /// Short human-readable summary of the problem class.
    pub title: String,
    /// HTTP status code mirrored into the payload.
    pub status: u16,
    /// Occurrence-specific detail, when one can be disclosed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Job submission request body.
#[derive(Debug, Serialize, Deserialize)]
pub struct JobSubmitRequest {
    /// Resource URL to fetch.
    pub url: String,
}

/// Job submission success payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct JobSubmitResponse {
    /// Fixed success marker.
    pub status: String,
    /// Title of the fetched resource.
    pub title: String,
    /// Artifact file name under the downloads directory.
    pub filename: String,
    /// Relative retrieval URL for the artifact.
    pub download_url: String,
}

/// Liveness payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Fixed liveness marker.
    pub status: String,
    /// Service mood.
    pub vibe: String,
}
