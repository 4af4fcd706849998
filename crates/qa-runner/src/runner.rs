//! Test runner collaborator

use crate::error::RunResult;
use qa_model::{ExecutionResult, Scenario, ScenarioRef};
use std::path::PathBuf;

/// Located, runnable test unit for one scenario
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestUnitHandle {
    /// Scenario the unit was generated from
    pub scenario: ScenarioRef,
    /// Suite file
    pub path: PathBuf,
    /// Dotted module name relative to `dir`
    pub module: String,
    /// Target directory the suite lives under
    pub dir: PathBuf,
}

/// Locates and executes generated test units
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TestRunner: Send + Sync {
    /// Find the test unit generated for `scenario`
    ///
    /// # Errors
    /// - `ExecutionError::NotFound` if no suite exists for the scenario
    async fn locate(&self, scenario: &Scenario) -> RunResult<TestUnitHandle>;

    /// Run a located unit
    ///
    /// An empty result list means the unit loaded but held no tests.
    ///
    /// # Errors
    /// - `ExecutionError::Import` if the suite cannot be loaded
    /// - `ExecutionError::Spawn` if the runner cannot start
    async fn execute(&self, handle: &TestUnitHandle) -> RunResult<Vec<ExecutionResult>>;
}
