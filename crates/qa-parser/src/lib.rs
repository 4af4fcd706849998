//! QA Forge Parser
//!
//! Turns loosely structured completion text into [`TestCase`](qa_model::TestCase)s
//! and assembles them into [`Scenario`](qa_model::Scenario)s.
//!
//! # Recognized vocabulary
//!
//! - Block boundary: `Test Case <n>:` or `Test Scenario <n>:`
//! - Title anchor: `Test Case Title:`
//! - Section headers: `<n>. Test Steps:`, `<n>. Expected Results:`,
//!   `<n>. Test Data Requirements:`
//! - Items: lines starting with `-`
//!
//! Matching is case-insensitive; everything else is ignored.
//!
//! # Example
//!
//! ```rust
//! use qa_parser::ResponseParser;
//!
//! let text = "Test Case 1:\nTest Case Title: Login succeeds\n1. Test Steps:\n- Enter username";
//! let cases = ResponseParser::new().parse(text);
//! assert_eq!(cases[0].title(), "Login succeeds");
//! assert_eq!(cases[0].steps, vec!["Enter username"]);
//! ```

#![warn(unreachable_pub)]

pub mod assembler;
pub mod classifier;
pub mod error;
pub mod parser;

pub use assembler::{fallback_case, ScenarioAssembler};
pub use classifier::{classify, Action, LineClass, Section};
pub use error::{ParseError, ParseResult};
pub use parser::{DroppedBlock, ParseOutcome, ResponseParser, DEFAULT_MAX_INPUT_BYTES};
