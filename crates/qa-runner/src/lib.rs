//! QA Forge Runner
//!
//! Executes generated suites and aggregates their outcomes.
//!
//! # Core Concepts
//!
//! - [`TestRunner`]: locate and execute one scenario's test unit
//! - [`ProcessRunner`]: runs suites as child processes and parses their output
//! - [`ResultAggregator`]: per-scenario accumulators merged into one
//!   [`ExecutionReport`](qa_model::ExecutionReport)
//! - [`persist`]: writes the report as `test_execution_<timestamp>.json`
//!
//! Execution failures become `ERROR` results and never stop a run; only
//! report persistence can fail the run.

#![warn(unreachable_pub)]

pub mod aggregator;
pub mod error;
pub mod output;
pub mod process;
pub mod runner;

pub use aggregator::{persist, ResultAggregator, MODULE_IMPORT, NO_TESTS_FOUND};
pub use error::{ExecutionError, PersistenceError, RunResult};
pub use output::{parse_pytest, parse_unittest, OutputFormat};
pub use process::ProcessRunner;
pub use runner::{TestRunner, TestUnitHandle};
