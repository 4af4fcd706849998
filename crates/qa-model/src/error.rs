//! Error types for the QA Forge model
//!
//! Only construction-time invariants can fail here; everything else in the
//! model is plain data.

/// Errors raised when a model invariant would be violated
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Test case titles must carry at least one non-whitespace character
    #[error("test case title must not be empty")]
    EmptyTitle,

    /// A scenario must own at least one test case
    #[error("scenario for requirement {requirement_id} has no test cases")]
    EmptyScenario {
        /// Requirement the scenario was built for
        requirement_id: u64,
    },

    /// Content hash could not be decoded
    #[error("invalid content hash: {0}")]
    InvalidHash(String),
}

/// Result type alias for model operations
pub type ModelResult<T> = Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_scenario_display() {
        let err = ModelError::EmptyScenario { requirement_id: 42 };
        assert_eq!(err.to_string(), "scenario for requirement 42 has no test cases");
    }

    #[test]
    fn empty_title_display() {
        assert_eq!(ModelError::EmptyTitle.to_string(), "test case title must not be empty");
    }
}
