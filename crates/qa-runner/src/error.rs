//! Error types for execution and persistence
//!
//! [`ExecutionError`]s never abort a run: the aggregator turns each one into
//! a synthetic result. [`PersistenceError`] is fatal for the run.

use std::path::PathBuf;

/// Errors locating or running a scenario's test unit
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    /// Suite file does not exist
    #[error("test suite not found: {0}")]
    NotFound(PathBuf),

    /// Suite could not be loaded by the test framework
    #[error("failed to import {module}: {detail}")]
    Import {
        /// Module or path that failed
        module: String,
        /// Framework output explaining the failure
        detail: String,
    },

    /// Runner process could not be started
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        /// Program that failed to start
        program: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Execution exceeded its time limit
    #[error("execution timed out after {secs}s")]
    Timeout {
        /// Limit in seconds
        secs: u64,
    },
}

impl ExecutionError {
    /// Create import error
    pub fn import(module: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Import {
            module: module.into(),
            detail: detail.into(),
        }
    }

    /// Create spawn error
    pub fn spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            source,
        }
    }
}

/// Errors writing the execution report
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// Report could not be serialized
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Report could not be written
    #[error("io error at {path}: {source}")]
    Io {
        /// Path involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl PersistenceError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for execution
pub type RunResult<T> = Result<T, ExecutionError>;
