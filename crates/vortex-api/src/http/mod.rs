//! HTTP surface modules (router, guard middleware, handlers).

/// Credential-guard middleware and helpers.
pub mod auth;
/// Shared constants and header names for the HTTP surface.
pub mod constants;
/// Problem response helpers and error types.
pub mod errors;
/// Artifact retrieval endpoint.
pub mod files;
/// Liveness endpoint.
pub mod health;
/// Job submission endpoint.
pub mod jobs;
/// Router construction and server host.
pub mod router;
