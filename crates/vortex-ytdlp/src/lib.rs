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

//! `yt-dlp` subprocess implementation of the media fetch engine.
//!
//! Layout: `engine.rs` (subprocess invocation and output parsing),
//! `error.rs` (error types).

pub mod engine;
pub mod error;

pub use engine::YtDlpFetcher;
pub use error::{EngineError, EngineResult};
