//! Artifact storage
//!
//! [`FsArtifactStore`] writes artifacts under a root directory, creating
//! intermediate directories. Writes go straight to the final path; there is
//! no temp-file rename. Writers to the same path are serialized by a
//! per-path lock, so the last call to finish is the content that remains.
//! A lock is dropped from the table once no writer or reader holds it.

use crate::artifact::GeneratedArtifact;
use crate::error::{RenderError, RenderResult};
use dashmap::DashMap;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Destination for generated artifacts
pub trait ArtifactStore: Send + Sync {
    /// Persist an artifact, returning its absolute location
    ///
    /// # Errors
    /// - `RenderError::Io` if the artifact cannot be written
    fn write(&self, artifact: &GeneratedArtifact) -> RenderResult<PathBuf>;

    /// Read back an artifact by its relative path
    ///
    /// # Errors
    /// - `RenderError::Io` if the file cannot be read
    /// - `RenderError::NonUtf8` if the content is not UTF-8
    fn read(&self, relative: &Path) -> RenderResult<String>;
}

/// Filesystem-backed store
#[derive(Debug)]
pub struct FsArtifactStore {
    root: PathBuf,
    locks: DashMap<PathBuf, Arc<Mutex<()>>>,
}

impl FsArtifactStore {
    /// Create store rooted at `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            locks: DashMap::new(),
        }
    }

    /// Output root
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn lock_for(&self, path: &Path) -> Arc<Mutex<()>> {
        Arc::clone(self.locks.entry(path.to_path_buf()).or_default().value())
    }

    /// Run `f` while holding the lock for `path`
    fn with_lock<T>(&self, path: &Path, f: impl FnOnce() -> T) -> T {
        let out = {
            let lock = self.lock_for(path);
            let _guard = lock.lock();
            f()
        };
        // only the table's own reference is left when nobody else waits
        self.locks.remove_if(path, |_, lock| Arc::strong_count(lock) == 1);
        out
    }
}

impl ArtifactStore for FsArtifactStore {
    fn write(&self, artifact: &GeneratedArtifact) -> RenderResult<PathBuf> {
        let full = self.root.join(&artifact.path);
        self.with_lock(&full, || {
            if let Some(parent) = full.parent() {
                std::fs::create_dir_all(parent).map_err(|e| RenderError::io_error(parent, e))?;
            }
            std::fs::write(&full, artifact.content.as_bytes()).map_err(|e| RenderError::io_error(&full, e))
        })?;

        tracing::debug!(path = %full.display(), checksum = %artifact.checksum.short(), "wrote artifact");
        Ok(full)
    }

    fn read(&self, relative: &Path) -> RenderResult<String> {
        let full = self.root.join(relative);
        let bytes = self
            .with_lock(&full, || std::fs::read(&full))
            .map_err(|e| RenderError::io_error(&full, e))?;
        String::from_utf8(bytes).map_err(|_| RenderError::NonUtf8(full))
    }
}
