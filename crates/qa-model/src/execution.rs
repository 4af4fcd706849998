//! Execution outcomes and the aggregated run report
//!
//! Results are collected per scenario into a [`ScenarioResult`] accumulator and
//! merged into an [`ExecutionReport`] in one final step. Counts on the report
//! are always derived from the results it holds, never tracked separately.

use crate::scenario::Scenario;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp format used for run identifiers
pub const RUN_ID_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Prefix of persisted report file names
pub const RUN_ID_PREFIX: &str = "test_execution_";

/// Outcome of one test unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExecutionStatus {
    /// Test ran and passed
    Passed,
    /// Test ran and an assertion failed
    Failed,
    /// Test could not run (missing, unimportable, crashed)
    Error,
    /// Test was skipped by the runner
    Skipped,
}

impl ExecutionStatus {
    /// Whether this status counts toward `failed_tests`
    #[inline]
    #[must_use]
    pub fn counts_as_failure(self) -> bool {
        matches!(self, Self::Failed | Self::Error)
    }

    /// Upper-case label used in reports
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "PASSED",
            Self::Failed => "FAILED",
            Self::Error => "ERROR",
            Self::Skipped => "SKIPPED",
        }
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single test unit, traced back to its scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Requirement id of the owning scenario
    #[serde(skip_serializing, default)]
    pub scenario_id: u64,
    /// Test unit name (method or function name)
    pub name: String,
    /// Outcome
    pub status: ExecutionStatus,
    /// Failure or error detail
    #[serde(rename = "error")]
    pub message: Option<String>,
}

impl ExecutionResult {
    /// Create a result without a message
    #[inline]
    #[must_use]
    pub fn new(scenario_id: u64, name: impl Into<String>, status: ExecutionStatus) -> Self {
        Self {
            scenario_id,
            name: name.into(),
            status,
            message: None,
        }
    }

    /// Passed result
    #[inline]
    #[must_use]
    pub fn passed(scenario_id: u64, name: impl Into<String>) -> Self {
        Self::new(scenario_id, name, ExecutionStatus::Passed)
    }

    /// Failed result with a message
    #[inline]
    #[must_use]
    pub fn failed(scenario_id: u64, name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(scenario_id, name, ExecutionStatus::Failed).with_message(message)
    }

    /// Error result with a message
    #[inline]
    #[must_use]
    pub fn error(scenario_id: u64, name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(scenario_id, name, ExecutionStatus::Error).with_message(message)
    }

    /// With message
    #[inline]
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Per-scenario accumulator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Requirement id
    pub requirement_id: u64,
    /// Requirement title
    pub requirement_title: String,
    /// Passed units in this scenario
    pub passed_tests: usize,
    /// Failed or errored units in this scenario
    pub failed_tests: usize,
    /// Individual unit outcomes in runner order
    pub test_cases: Vec<ExecutionResult>,
}

impl ScenarioResult {
    /// Empty accumulator for a scenario
    #[must_use]
    pub fn new(scenario: &Scenario) -> Self {
        Self {
            requirement_id: scenario.requirement_id(),
            requirement_title: scenario.requirement_title().to_string(),
            passed_tests: 0,
            failed_tests: 0,
            test_cases: Vec::new(),
        }
    }

    /// Build an accumulator from a batch of results
    #[must_use]
    pub fn from_results(scenario: &Scenario, results: Vec<ExecutionResult>) -> Self {
        let mut acc = Self::new(scenario);
        for result in results {
            acc.record(result);
        }
        acc
    }

    /// Record one result, stamping it with this scenario's id
    pub fn record(&mut self, mut result: ExecutionResult) {
        result.scenario_id = self.requirement_id;
        match result.status {
            ExecutionStatus::Passed => self.passed_tests += 1,
            status if status.counts_as_failure() => self.failed_tests += 1,
            _ => {}
        }
        self.test_cases.push(result);
    }
}

/// Aggregated outcome document for one pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReport {
    /// When the run started
    pub execution_time: DateTime<Utc>,
    /// Number of scenarios processed
    pub total_scenarios: usize,
    /// Passed units across all scenarios
    pub passed_tests: usize,
    /// Failed or errored units across all scenarios
    pub failed_tests: usize,
    /// Per-scenario results in input order
    pub scenario_results: Vec<ScenarioResult>,
}

impl ExecutionReport {
    /// Merge per-scenario accumulators into a report
    #[must_use]
    pub fn merge(execution_time: DateTime<Utc>, scenario_results: Vec<ScenarioResult>) -> Self {
        let passed_tests = scenario_results.iter().map(|s| s.passed_tests).sum();
        let failed_tests = scenario_results.iter().map(|s| s.failed_tests).sum();
        Self {
            execution_time,
            total_scenarios: scenario_results.len(),
            passed_tests,
            failed_tests,
            scenario_results,
        }
    }

    /// Run identifier derived from the execution time (second resolution)
    #[must_use]
    pub fn run_id(&self) -> String {
        format!("{RUN_ID_PREFIX}{}", self.execution_time.format(RUN_ID_FORMAT))
    }

    /// All unit results in scenario order
    pub fn results(&self) -> impl Iterator<Item = &ExecutionResult> {
        self.scenario_results.iter().flat_map(|s| s.test_cases.iter())
    }

    /// Whether any unit failed or errored
    #[inline]
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed_tests > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_case::TestCase;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn scenario(id: u64, title: &str) -> Scenario {
        Scenario::new(id, title, vec![TestCase::new("case").unwrap()]).unwrap()
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 9, 15, 7).unwrap()
    }

    #[test]
    fn two_scenarios_with_one_pass_and_one_fail_each() {
        let a = scenario(1, "Login");
        let b = scenario(2, "Cart");
        let results = vec![
            ScenarioResult::from_results(
                &a,
                vec![ExecutionResult::passed(0, "test_ok"), ExecutionResult::failed(0, "test_bad", "boom")],
            ),
            ScenarioResult::from_results(
                &b,
                vec![ExecutionResult::passed(0, "test_ok"), ExecutionResult::failed(0, "test_bad", "boom")],
            ),
        ];
        let report = ExecutionReport::merge(at(), results);
        assert_eq!(report.total_scenarios, 2);
        assert_eq!(report.passed_tests, 2);
        assert_eq!(report.failed_tests, 2);
        assert!(report.has_failures());
    }

    #[test]
    fn error_counts_as_failed_and_skipped_counts_as_neither() {
        let s = scenario(3, "Checkout");
        let acc = ScenarioResult::from_results(
            &s,
            vec![
                ExecutionResult::error(0, "module_import", "missing"),
                ExecutionResult::new(0, "test_later", ExecutionStatus::Skipped),
            ],
        );
        assert_eq!(acc.failed_tests, 1);
        assert_eq!(acc.passed_tests, 0);
        assert_eq!(acc.test_cases.len(), 2);
    }

    #[test]
    fn record_stamps_scenario_id() {
        let s = scenario(11, "Search");
        let acc = ScenarioResult::from_results(&s, vec![ExecutionResult::passed(0, "test_a")]);
        assert_eq!(acc.test_cases[0].scenario_id, 11);
    }

    #[test]
    fn run_id_uses_second_resolution_timestamp() {
        let report = ExecutionReport::merge(at(), Vec::new());
        assert_eq!(report.run_id(), "test_execution_20260302_091507");
    }

    #[test]
    fn json_shape_matches_report_format() {
        let s = scenario(5, "Login");
        let report = ExecutionReport::merge(
            at(),
            vec![ScenarioResult::from_results(&s, vec![ExecutionResult::failed(0, "test_x", "assert")])],
        );
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["total_scenarios"], 1);
        assert_eq!(value["failed_tests"], 1);
        let case = &value["scenario_results"][0]["test_cases"][0];
        assert_eq!(case["name"], "test_x");
        assert_eq!(case["status"], "FAILED");
        assert_eq!(case["error"], "assert");
        assert!(case.get("scenario_id").is_none());
    }

    #[test]
    fn results_iterates_in_scenario_order() {
        let a = scenario(1, "A");
        let b = scenario(2, "B");
        let report = ExecutionReport::merge(
            at(),
            vec![
                ScenarioResult::from_results(&a, vec![ExecutionResult::passed(0, "first")]),
                ScenarioResult::from_results(&b, vec![ExecutionResult::passed(0, "second")]),
            ],
        );
        let names: Vec<_> = report.results().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }
}
