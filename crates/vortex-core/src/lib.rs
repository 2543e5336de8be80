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

//! Engine-agnostic job orchestration for gated media fetches.
//!
//! Layout: `model.rs` (job identifiers and DTOs), `service.rs` (the
//! `JobRunner` orchestrator and engine/workflow traits), `error.rs` (error
//! types).

pub mod error;
pub mod model;
pub mod service;

pub use error::{JobError, JobResult};
pub use model::{FetchOutcome, FetchRequest, JobId, JobOutcome};
pub use service::{JobRunner, JobWorkflow, MediaFetcher};
