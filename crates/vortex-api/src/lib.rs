#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! HTTP surface for the Vortex gateway.
//!
//! Layout: `http/` (router, credential guard, handlers), `models.rs` (API
//! DTOs), `state.rs` (shared handler state), `error.rs` (server host
//! errors).

pub mod error;
pub mod http;
pub mod models;
pub(crate) mod state;

pub use error::ApiServerError;
pub use http::router::ApiServer;
