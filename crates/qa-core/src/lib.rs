//! QA Forge Core - pipeline orchestrator
//!
//! Drives requirements through completion, assembly, emission and
//! execution:
//! - Fetches requirements from a [`RequirementSource`]
//! - Requests completion text from a [`CompletionClient`] under a time limit
//! - Assembles scenarios and emits suites for every configured target
//! - Runs the runner target's suites and persists the execution report
//!
//! # Example
//!
//! ```rust,no_run
//! use qa_core::{DirectoryCompletions, JsonFileRequirements, Pipeline, PipelineConfig, RequirementSource};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PipelineConfig::new().with_targets(["pytest", "unittest", "testng"]);
//! let requirements = JsonFileRequirements::new("requirements.json").fetch().await?;
//! let pipeline = Pipeline::new(config, Arc::new(DirectoryCompletions::new("completions")))?;
//!
//! let outcome = pipeline.run(&requirements).await?;
//! println!("{} passed, {} failed", outcome.report.passed_tests, outcome.report.failed_tests);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod completion;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod prompt;
pub mod source;

pub use completion::{CompletionClient, DirectoryCompletions};
pub use config::{PipelineConfig, RunnerConfig};
pub use error::{CompletionError, PipelineError, PipelineResult, SourceError};
pub use pipeline::{GenerateOutcome, Pipeline, RunOutcome};
pub use prompt::{build_prompt, Prompt, SYSTEM_PROMPT};
pub use source::{parse_requirements, JsonFileRequirements, RequirementSource};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
