//! `yt-dlp` subprocess invocation.
//!
//! # Design
//! - One subprocess per job; the process blocks until the download and any
//!   post-processing (merge, move) have completed.
//! - The output template embeds the orchestrator-supplied job identifier so
//!   concurrent jobs never collide on disk.
//! - `--print after_move:*` reports the title and final artifact path on
//!   stdout once the file has reached its final location.

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;
use vortex_core::{FetchOutcome, FetchRequest, MediaFetcher};

use crate::error::{EngineError, EngineResult};

const DEFAULT_BINARY: &str = "yt-dlp";
const FORMAT_SELECTOR: &str = "bestvideo+bestaudio/best";
/// Upper bound on stderr bytes preserved in error context.
const STDERR_CONTEXT_LIMIT: usize = 2048;

/// Media fetch engine backed by the `yt-dlp` command line tool.
#[derive(Debug, Clone)]
pub struct YtDlpFetcher {
    binary: PathBuf,
}

impl YtDlpFetcher {
    /// Construct an engine using the `yt-dlp` binary from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from(DEFAULT_BINARY),
        }
    }

    /// Construct an engine using an explicit binary path.
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn run(&self, request: &FetchRequest) -> EngineResult<FetchOutcome> {
        let args = build_args(request);
        debug!(binary = %self.binary.display(), job_id = %request.job_id, "invoking yt-dlp");
        let output = Command::new(&self.binary)
            .args(&args)
            .output()
            .map_err(|source| EngineError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(EngineError::Extraction {
                status: output.status.code(),
                detail: truncate_context(&String::from_utf8_lossy(&output.stderr)),
            });
        }

        parse_output(&String::from_utf8_lossy(&output.stdout))
    }
}

impl Default for YtDlpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaFetcher for YtDlpFetcher {
    fn fetch(&self, request: &FetchRequest) -> anyhow::Result<FetchOutcome> {
        Ok(self.run(request)?)
    }
}

fn output_template(request: &FetchRequest) -> String {
    format!(
        "{}/%(title)s [{}].%(ext)s",
        request.target_dir.display(),
        request.job_id
    )
}

fn build_args(request: &FetchRequest) -> Vec<String> {
    vec![
        "--no-warnings".to_string(),
        "--quiet".to_string(),
        "--no-simulate".to_string(),
        "--restrict-filenames".to_string(),
        "--format".to_string(),
        FORMAT_SELECTOR.to_string(),
        "--output".to_string(),
        output_template(request),
        "--print".to_string(),
        "after_move:title".to_string(),
        "--print".to_string(),
        "after_move:filepath".to_string(),
        request.url.to_string(),
    ]
}

/// Interpret the two `--print` lines: title first, final filepath second.
fn parse_output(stdout: &str) -> EngineResult<FetchOutcome> {
    let mut lines = stdout.lines().map(str::trim).filter(|line| !line.is_empty());
    let title = lines
        .next()
        .ok_or(EngineError::Output {
            reason: "missing_title",
        })?
        .to_string();
    let filepath = lines.next().ok_or(EngineError::Output {
        reason: "missing_filepath",
    })?;
    Ok(FetchOutcome {
        title,
        filepath: PathBuf::from(filepath),
    })
}

fn truncate_context(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.len() <= STDERR_CONTEXT_LIMIT {
        return trimmed.to_string();
    }
    let mut cut = STDERR_CONTEXT_LIMIT;
    while !trimmed.is_char_boundary(cut) {
        cut -= 1;
    }
    trimmed[..cut].to_string()
}
