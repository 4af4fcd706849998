//! Error types for the pipeline and its collaborators

use qa_runner::PersistenceError;
use std::path::PathBuf;

/// Fatal pipeline errors
///
/// Per-scenario failures (completion, rendering, execution) never surface
/// here; they are recorded as events, render failures or result records.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Configuration is invalid
    #[error("configuration error: {0}")]
    Config(String),

    /// Configuration text is not valid TOML for [`PipelineConfig`](crate::PipelineConfig)
    #[error("invalid configuration: {0}")]
    ConfigFormat(#[from] toml::de::Error),

    /// File could not be read
    #[error("io error at {path}: {source}")]
    Io {
        /// Path involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Requirements could not be fetched
    #[error("requirement source failed: {0}")]
    RequirementSource(#[from] SourceError),

    /// Execution report could not be written
    #[error("report persistence failed: {0}")]
    Persistence(#[from] PersistenceError),
}

impl PipelineError {
    /// Create configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors fetching requirements
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Source file could not be read
    #[error("io error at {path}: {source}")]
    Io {
        /// Path involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Source content is not a requirement list
    #[error("malformed requirements in {path}: {source}")]
    Malformed {
        /// Path involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
}

/// Errors obtaining completion text for a requirement
///
/// Every variant leads to the fallback test case; none is fatal.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// No completion is available for the requirement
    #[error("no completion for requirement {requirement_id}")]
    Missing {
        /// Requirement id
        requirement_id: u64,
    },

    /// Completion could not be read
    #[error("io error at {path}: {source}")]
    Io {
        /// Path involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Completion service rejected or failed the request
    #[error("completion service error: {0}")]
    Service(String),

    /// Completion exceeded its time limit
    #[error("completion timed out after {secs}s")]
    Timeout {
        /// Limit in seconds
        secs: u64,
    },
}

/// Result type alias for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_cause() {
        assert_eq!(
            PipelineError::config("no targets configured").to_string(),
            "configuration error: no targets configured"
        );
        assert_eq!(
            CompletionError::Missing { requirement_id: 7 }.to_string(),
            "no completion for requirement 7"
        );
        assert_eq!(CompletionError::Timeout { secs: 60 }.to_string(), "completion timed out after 60s");
    }

    #[test]
    fn persistence_converts() {
        let inner = PersistenceError::io_error("/r", std::io::Error::other("disk full"));
        let err: PipelineError = inner.into();
        assert!(matches!(err, PipelineError::Persistence(_)));
        assert!(err.to_string().contains("disk full"));
    }
}
