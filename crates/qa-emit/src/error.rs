//! Error types for emission
//!
//! A [`RenderError`] aborts emission for one scenario/target pair only;
//! callers record it and move on to the next pair.

use std::path::PathBuf;

/// Errors during rendering or artifact storage
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// No renderer registered for a template set
    #[error("no renderer registered for template set: '{0}'")]
    UnknownTemplateSet(String),

    /// Template engine failure
    #[error("template '{template}' failed: {source}")]
    Template {
        /// Template that failed
        template: String,
        /// Engine error
        #[source]
        source: askama::Error,
    },

    /// I/O failure reading or writing an artifact
    #[error("io error at {path}: {source}")]
    Io {
        /// Path involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Stored artifact is not valid UTF-8
    #[error("artifact at {0} is not valid UTF-8")]
    NonUtf8(PathBuf),
}

impl RenderError {
    /// Create template error
    pub fn template(template: impl Into<String>, source: askama::Error) -> Self {
        Self::Template {
            template: template.into(),
            source,
        }
    }

    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for emission
pub type RenderResult<T> = Result<T, RenderError>;
