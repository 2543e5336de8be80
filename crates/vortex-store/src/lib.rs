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

//! Sandboxed artifact storage for fetched media files.
//!
//! Layout: `service.rs` (the `ArtifactStore` sandbox), `error.rs` (error
//! types).

pub mod error;
pub mod service;

pub use error::{StoreError, StoreResult};
pub use service::ArtifactStore;
