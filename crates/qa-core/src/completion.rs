//! Completion collaborators
//!
//! A [`CompletionClient`] turns a requirement and its [`Prompt`] into raw
//! free-form text. Any failure is recoverable: the pipeline substitutes empty
//! text, which the assembler answers with the fallback test case.

use crate::error::CompletionError;
use crate::prompt::Prompt;
use qa_model::Requirement;
use std::path::{Path, PathBuf};

/// Produces raw completion text for a requirement
#[async_trait::async_trait]
pub trait CompletionClient: Send + Sync {
    /// Request completion text
    ///
    /// # Errors
    /// - `CompletionError` if no text can be obtained
    async fn complete(&self, requirement: &Requirement, prompt: &Prompt) -> Result<String, CompletionError>;
}

/// Completions recorded ahead of time as `<dir>/<requirement id>.txt`
#[derive(Debug, Clone)]
pub struct DirectoryCompletions {
    dir: PathBuf,
}

impl DirectoryCompletions {
    /// Create client reading from `dir`
    #[inline]
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory read by this client
    #[inline]
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the completion for `requirement_id`
    #[must_use]
    pub fn path_for(&self, requirement_id: u64) -> PathBuf {
        self.dir.join(format!("{requirement_id}.txt"))
    }
}

#[async_trait::async_trait]
impl CompletionClient for DirectoryCompletions {
    async fn complete(&self, requirement: &Requirement, _prompt: &Prompt) -> Result<String, CompletionError> {
        let path = self.path_for(requirement.id);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(CompletionError::Missing {
                requirement_id: requirement.id,
            }),
            Err(source) => Err(CompletionError::Io { path, source }),
        }
    }
}
