//! Result aggregation
//!
//! Scenarios are executed in input order. Each one fills its own
//! [`ScenarioResult`] accumulator; all accumulators are merged into the
//! [`ExecutionReport`] in a single step at the end of the run. A scenario
//! that cannot be located, imported or finished in time contributes one
//! synthetic `ERROR` result instead of aborting the batch.

use crate::error::{ExecutionError, PersistenceError, RunResult};
use crate::runner::TestRunner;
use chrono::{DateTime, Utc};
use qa_model::{
    EventSink, ExecutionReport, ExecutionResult, PipelineEvent, Scenario, ScenarioResult, TracingSink,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Name of the synthetic result for a scenario whose unit could not run
pub const MODULE_IMPORT: &str = "module_import";

/// Name of the synthetic result for a unit that held no tests
pub const NO_TESTS_FOUND: &str = "no_tests_found";

/// Runs scenarios and folds their outcomes into a report
#[derive(Clone)]
pub struct ResultAggregator {
    runner: Arc<dyn TestRunner>,
    timeout: Option<Duration>,
    sink: Arc<dyn EventSink>,
}

impl std::fmt::Debug for ResultAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultAggregator")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ResultAggregator {
    /// Create aggregator around a runner
    #[must_use]
    pub fn new(runner: Arc<dyn TestRunner>) -> Self {
        Self {
            runner,
            timeout: None,
            sink: Arc::new(TracingSink),
        }
    }

    /// With per-scenario time limit covering locate and execute
    #[inline]
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// With event sink
    #[inline]
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Execute all scenarios, stamping the report with the current time
    pub async fn run(&self, scenarios: &[Scenario]) -> ExecutionReport {
        self.run_at(Utc::now(), scenarios).await
    }

    /// Execute all scenarios with an explicit execution time
    pub async fn run_at(&self, execution_time: DateTime<Utc>, scenarios: &[Scenario]) -> ExecutionReport {
        let mut accumulators = Vec::with_capacity(scenarios.len());
        for scenario in scenarios {
            accumulators.push(self.run_scenario(scenario).await);
        }
        ExecutionReport::merge(execution_time, accumulators)
    }

    /// Execute one scenario into its own accumulator
    pub async fn run_scenario(&self, scenario: &Scenario) -> ScenarioResult {
        let id = scenario.requirement_id();
        let outcome = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.locate_and_execute(scenario))
                .await
                .unwrap_or(Err(ExecutionError::Timeout {
                    secs: limit.as_secs(),
                })),
            None => self.locate_and_execute(scenario).await,
        };

        let results = match outcome {
            Ok(results) if results.is_empty() => {
                vec![ExecutionResult::error(id, NO_TESTS_FOUND, "No valid tests found in module.")]
            }
            Ok(results) => results,
            Err(e) => {
                self.sink.emit(PipelineEvent::ExecutionFailed {
                    requirement_id: id,
                    reason: e.to_string(),
                });
                vec![ExecutionResult::error(id, MODULE_IMPORT, e.to_string())]
            }
        };

        let accumulator = ScenarioResult::from_results(scenario, results);
        self.sink.emit(PipelineEvent::ScenarioExecuted {
            requirement_id: id,
            passed: accumulator.passed_tests,
            failed: accumulator.failed_tests,
        });
        accumulator
    }

    async fn locate_and_execute(&self, scenario: &Scenario) -> RunResult<Vec<ExecutionResult>> {
        let handle = self.runner.locate(scenario).await?;
        self.runner.execute(&handle).await
    }
}

/// Write `report` as pretty JSON to `<dir>/<run id>.json`
///
/// Runs started within the same second share a run id; the later report
/// replaces the earlier one.
///
/// # Errors
/// - `PersistenceError::Io` if the directory or file cannot be written
/// - `PersistenceError::Serialize` if the report cannot be encoded
pub async fn persist(report: &ExecutionReport, dir: &Path) -> Result<PathBuf, PersistenceError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| PersistenceError::io_error(dir, e))?;
    let path = dir.join(format!("{}.json", report.run_id()));
    let json = serde_json::to_string_pretty(report)?;
    tokio::fs::write(&path, json)
        .await
        .map_err(|e| PersistenceError::io_error(&path, e))?;
    Ok(path)
}
