//! Test-framework output parsers
//!
//! Both parsers read verbose console output and return one
//! [`ExecutionResult`] per reported unit, in report order. Failure details
//! printed after the unit list are attached as messages.

use once_cell::sync::Lazy;
use qa_model::{ExecutionResult, ExecutionStatus};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

static UNITTEST_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(test\w*) \(([\w.]+)\)").expect("static regex"));

static UNITTEST_STATUS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r" \.\.\. (ok|FAIL|ERROR|skipped.*|expected failure|unexpected success)\s*$")
        .expect("static regex")
});

static UNITTEST_DETAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:FAIL|ERROR): (\w+) \(").expect("static regex"));

static PYTEST_UNIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\S+::(\w+)(?:\[[^\]]*\])? (PASSED|FAILED|ERROR|SKIPPED|XFAIL|XPASS)\b")
        .expect("static regex")
});

static PYTEST_SUMMARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:FAILED|ERROR) \S+::(\w+)(?:\[[^\]]*\])? - (.+)$").expect("static regex")
});

/// Console format a runner produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// `python -m unittest -v`
    Unittest,
    /// `pytest -v`
    Pytest,
}

impl OutputFormat {
    /// Parse console output into results stamped with `scenario_id`
    #[must_use]
    pub fn parse(self, scenario_id: u64, output: &str) -> Vec<ExecutionResult> {
        match self {
            Self::Unittest => parse_unittest(scenario_id, output),
            Self::Pytest => parse_pytest(scenario_id, output),
        }
    }
}

fn is_rule(line: &str, c: char) -> bool {
    line.len() >= 20 && line.chars().all(|x| x == c)
}

/// Parse `unittest -v` output
///
/// With docstrings, unittest prints the unit id on one line and the
/// docstring plus status on the next; both layouts are handled.
#[must_use]
pub fn parse_unittest(scenario_id: u64, output: &str) -> Vec<ExecutionResult> {
    let mut results = Vec::new();
    let mut pending: Option<String> = None;

    for line in output.lines() {
        let header = UNITTEST_HEADER.captures(line).map(|c| c[1].to_string());
        if let Some(caps) = UNITTEST_STATUS.captures(line) {
            let Some(name) = header.or_else(|| pending.take()) else {
                continue;
            };
            let status = match &caps[1] {
                "ok" => ExecutionStatus::Passed,
                "FAIL" | "unexpected success" => ExecutionStatus::Failed,
                "ERROR" => ExecutionStatus::Error,
                _ => ExecutionStatus::Skipped,
            };
            results.push(ExecutionResult::new(scenario_id, name, status));
            pending = None;
        } else if header.is_some() {
            pending = header;
        }
    }

    attach(results, &unittest_details(output))
}

enum DetailState {
    Outside,
    Header(String),
    Body(String),
}

/// Last traceback line of each FAIL/ERROR section, keyed by unit name
fn unittest_details(output: &str) -> HashMap<String, String> {
    let mut details = HashMap::new();
    let mut state = DetailState::Outside;
    let mut last = String::new();

    let mut close = |state: DetailState, last: &mut String| {
        if let DetailState::Body(name) = state {
            if !last.is_empty() {
                details.entry(name).or_insert_with(|| last.clone());
            }
        }
        last.clear();
    };

    for line in output.lines() {
        if let Some(caps) = UNITTEST_DETAIL.captures(line) {
            close(std::mem::replace(&mut state, DetailState::Outside), &mut last);
            state = DetailState::Header(caps[1].to_string());
        } else if is_rule(line, '=') {
            close(std::mem::replace(&mut state, DetailState::Outside), &mut last);
        } else if is_rule(line, '-') {
            state = match std::mem::replace(&mut state, DetailState::Outside) {
                DetailState::Header(name) => DetailState::Body(name),
                other => {
                    close(other, &mut last);
                    DetailState::Outside
                }
            };
        } else if matches!(state, DetailState::Body(_)) && !line.trim().is_empty() {
            last = line.trim().to_string();
        }
    }
    close(state, &mut last);
    details
}

/// Parse `pytest -v` output
#[must_use]
pub fn parse_pytest(scenario_id: u64, output: &str) -> Vec<ExecutionResult> {
    let mut results = Vec::new();
    let mut details = HashMap::new();

    for line in output.lines() {
        if let Some(caps) = PYTEST_SUMMARY.captures(line) {
            details.entry(caps[1].to_string()).or_insert_with(|| caps[2].trim().to_string());
            continue;
        }
        if let Some(caps) = PYTEST_UNIT.captures(line) {
            let status = match &caps[2] {
                "PASSED" | "XPASS" => ExecutionStatus::Passed,
                "FAILED" => ExecutionStatus::Failed,
                "ERROR" => ExecutionStatus::Error,
                _ => ExecutionStatus::Skipped,
            };
            results.push(ExecutionResult::new(scenario_id, &caps[1], status));
        }
    }
    attach(results, &details)
}

fn attach(results: Vec<ExecutionResult>, details: &HashMap<String, String>) -> Vec<ExecutionResult> {
    results
        .into_iter()
        .map(|result| match details.get(&result.name) {
            Some(message) if result.status.counts_as_failure() => result.with_message(message.clone()),
            _ => result,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const UNITTEST_OUT: &str = "\
test_login_succeeds (tests.test_user_login.TestUserLogin.test_login_succeeds)
Login succeeds ... ok
test_wrong_password (tests.test_user_login.TestUserLogin.test_wrong_password)
Wrong password ... FAIL
test_locked_out (tests.test_user_login.TestUserLogin.test_locked_out) ... ERROR
test_later (tests.test_user_login.TestUserLogin.test_later) ... skipped 'not ready'

======================================================================
ERROR: test_locked_out (tests.test_user_login.TestUserLogin.test_locked_out)
----------------------------------------------------------------------
Traceback (most recent call last):
  File \"tests/test_user_login.py\", line 30, in test_locked_out
    self.page.locked()
AttributeError: 'UserLoginPage' object has no attribute 'locked'

======================================================================
FAIL: test_wrong_password (tests.test_user_login.TestUserLogin.test_wrong_password)
Wrong password
----------------------------------------------------------------------
Traceback (most recent call last):
  File \"tests/test_user_login.py\", line 22, in test_wrong_password
    self.assertTrue(False)
AssertionError: False is not true

----------------------------------------------------------------------
Ran 4 tests in 0.120s

FAILED (failures=1, errors=1, skipped=1)
";

    #[test]
    fn unittest_statuses_and_details() {
        let results = parse_unittest(9, UNITTEST_OUT);
        let summary: Vec<_> = results.iter().map(|r| (r.name.as_str(), r.status)).collect();
        assert_eq!(
            summary,
            vec![
                ("test_login_succeeds", ExecutionStatus::Passed),
                ("test_wrong_password", ExecutionStatus::Failed),
                ("test_locked_out", ExecutionStatus::Error),
                ("test_later", ExecutionStatus::Skipped),
            ]
        );
        assert_eq!(results[0].message, None);
        assert_eq!(results[1].message.as_deref(), Some("AssertionError: False is not true"));
        assert_eq!(
            results[2].message.as_deref(),
            Some("AttributeError: 'UserLoginPage' object has no attribute 'locked'")
        );
        assert!(results.iter().all(|r| r.scenario_id == 9));
    }

    #[test]
    fn unittest_empty_run() {
        let out = "\n----------------------------------------------------------------------\nRan 0 tests in 0.000s\n\nNO TESTS RAN\n";
        assert!(parse_unittest(1, out).is_empty());
    }

    const PYTEST_OUT: &str = "\
============================= test session starts ==============================
collected 4 items

tests/test_user_login.py::test_login_succeeds PASSED                     [ 25%]
tests/test_user_login.py::test_wrong_password FAILED                     [ 50%]
tests/test_user_login.py::TestX::test_param[a-1] SKIPPED (later)         [ 75%]
tests/test_user_login.py::test_known_bug XFAIL                           [100%]

=================================== FAILURES ===================================
_____________________________ test_wrong_password ______________________________
E       AssertionError: assert False
=========================== short test summary info ============================
FAILED tests/test_user_login.py::test_wrong_password - AssertionError: assert False
==================== 1 failed, 1 passed, 2 skipped in 0.12s ====================
";

    #[test]
    fn pytest_statuses_and_details() {
        let results = OutputFormat::Pytest.parse(3, PYTEST_OUT);
        let summary: Vec<_> = results.iter().map(|r| (r.name.as_str(), r.status)).collect();
        assert_eq!(
            summary,
            vec![
                ("test_login_succeeds", ExecutionStatus::Passed),
                ("test_wrong_password", ExecutionStatus::Failed),
                ("test_param", ExecutionStatus::Skipped),
                ("test_known_bug", ExecutionStatus::Skipped),
            ]
        );
        assert_eq!(results[1].message.as_deref(), Some("AssertionError: assert False"));
    }

    #[test]
    fn pytest_collection_error_has_no_units() {
        let out = "ERROR tests/test_user_login.py - ModuleNotFoundError: No module named 'pages'\n";
        assert!(parse_pytest(1, out).is_empty());
    }
}
