//! Artifact directory sandbox.
//!
//! # Design
//! - Every filesystem access, read or write, is confined to a single root
//!   directory resolved at startup.
//! - Candidate names from the network are reduced to a bare file name before
//!   any filesystem call; anything carrying directory components is rejected
//!   outright.
//! - Engine-reported output paths are re-validated against the root rather
//!   than trusted.

use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::warn;

use crate::error::{StoreError, StoreResult};

/// Sandbox around the single flat directory that holds fetched artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    /// Create a store rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory the store is rooted at.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the artifact root if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn ensure_root(&self) -> StoreResult<()> {
        fs::create_dir_all(&self.root)
            .map_err(|source| StoreError::io("create_root", &self.root, source))
    }

    /// Resolve an untrusted candidate name to an existing artifact path.
    ///
    /// # Errors
    ///
    /// Returns `Rejected` when the candidate carries directory components or
    /// resolves outside the root, and `NotFound` when no such artifact
    /// exists.
    pub fn resolve_existing(&self, name: &str) -> StoreResult<PathBuf> {
        let file_name = bare_file_name(name)?;
        let canonical_root = self.canonical_root()?;
        let canonical = self
            .root
            .join(file_name)
            .canonicalize()
            .map_err(|_| StoreError::NotFound {
                name: name.to_string(),
            })?;
        if canonical.starts_with(&canonical_root) {
            Ok(canonical)
        } else {
            warn!(candidate = %name, "artifact resolution escaped the store root");
            Err(StoreError::Rejected {
                name: name.to_string(),
            })
        }
    }

    /// Verify that an engine-reported output path lies under the root.
    ///
    /// # Errors
    ///
    /// Returns `Rejected` when the canonical path escapes the root, or an IO
    /// error when the path cannot be canonicalized.
    pub fn confine(&self, path: &Path) -> StoreResult<PathBuf> {
        let canonical_root = self.canonical_root()?;
        let canonical = path
            .canonicalize()
            .map_err(|source| StoreError::io("canonicalize_artifact", path, source))?;
        if canonical.starts_with(&canonical_root) {
            Ok(canonical)
        } else {
            warn!(path = %path.display(), "engine output landed outside the store root");
            Err(StoreError::Rejected {
                name: path.display().to_string(),
            })
        }
    }

    fn canonical_root(&self) -> StoreResult<PathBuf> {
        self.root
            .canonicalize()
            .map_err(|source| StoreError::io("canonicalize_root", &self.root, source))
    }
}

/// Reduce a candidate to a bare file name, rejecting any directory structure.
fn bare_file_name(name: &str) -> StoreResult<PathBuf> {
    let path = Path::new(name);
    let mut components = path.components();
    let (Some(Component::Normal(first)), None) = (components.next(), components.next()) else {
        return Err(StoreError::Rejected {
            name: name.to_string(),
        });
    };
    if first.to_str() != Some(name) {
        return Err(StoreError::Rejected {
            name: name.to_string(),
        });
    }
    Ok(PathBuf::from(first))
}
