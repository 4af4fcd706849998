//! QA Forge Model
//!
//! Plain data shared by every stage of the pipeline.
//!
//! # Core Concepts
//!
//! - [`Requirement`]: work item supplied by the tracker
//! - [`TestCase`]: one parsed or synthesized unit of steps, expected results and data
//! - [`Scenario`]: a requirement paired with at least one test case
//! - [`ExecutionReport`]: aggregated outcome of one run
//! - [`ContentHash`]: Blake3 checksum of generated content
//! - [`PipelineEvent`] / [`EventSink`]: structured, sink-agnostic observability
//!
//! # Example
//!
//! ```rust
//! use qa_model::{Requirement, Scenario, TestCase};
//!
//! let req = Requirement::new(1, "User Login");
//! let case = TestCase::new("Login succeeds")
//!     .unwrap()
//!     .with_steps(["Enter username", "Enter password"]);
//! let scenario = Scenario::new(req.id, &req.title, vec![case]).unwrap();
//! assert_eq!(scenario.len(), 1);
//! ```

#![warn(unreachable_pub)]

pub mod error;
pub mod events;
pub mod execution;
pub mod hash;
pub mod naming;
pub mod requirement;
pub mod scenario;
pub mod test_case;

pub use error::{ModelError, ModelResult};
pub use events::{EventSink, MemorySink, NullSink, PipelineEvent, TracingSink};
pub use execution::{ExecutionReport, ExecutionResult, ExecutionStatus, ScenarioResult};
pub use hash::ContentHash;
pub use naming::NamingRule;
pub use requirement::Requirement;
pub use scenario::{Scenario, ScenarioRef};
pub use test_case::TestCase;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
