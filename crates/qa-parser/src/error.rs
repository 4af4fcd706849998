//! Error types for parsing
//!
//! Parse failures never escape [`crate::ResponseParser::parse`]; they are
//! only visible through [`crate::ResponseParser::try_parse`].

/// Errors during completion-text parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Input exceeds the configured size limit
    #[error("input too large: {size} bytes (max: {max})")]
    InputTooLarge {
        /// Input size in bytes
        size: usize,
        /// Configured maximum
        max: usize,
    },
}

impl ParseError {
    /// Create input-too-large error
    #[inline]
    #[must_use]
    pub fn input_too_large(size: usize, max: usize) -> Self {
        Self::InputTooLarge { size, max }
    }
}

/// Result type alias for parse operations
pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_too_large_display() {
        let err = ParseError::input_too_large(2048, 1024);
        assert_eq!(err.to_string(), "input too large: 2048 bytes (max: 1024)");
    }
}
