//! Scenarios: a requirement paired with its ordered test cases

use crate::error::{ModelError, ModelResult};
use crate::test_case::TestCase;
use serde::{Deserialize, Serialize};

/// Immutable pairing of a requirement with at least one test case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawScenario")]
pub struct Scenario {
    requirement_id: u64,
    requirement_title: String,
    test_cases: Vec<TestCase>,
}

impl Scenario {
    /// Create a scenario
    ///
    /// # Errors
    /// Returns [`ModelError::EmptyScenario`] when `test_cases` is empty
    pub fn new(
        requirement_id: u64,
        requirement_title: impl Into<String>,
        test_cases: Vec<TestCase>,
    ) -> ModelResult<Self> {
        if test_cases.is_empty() {
            return Err(ModelError::EmptyScenario { requirement_id });
        }
        Ok(Self {
            requirement_id,
            requirement_title: requirement_title.into(),
            test_cases,
        })
    }

    /// Create a scenario from a first case and any further cases
    ///
    /// Infallible: the first case makes the scenario non-empty by construction.
    #[must_use]
    pub fn with_first(
        requirement_id: u64,
        requirement_title: impl Into<String>,
        first: TestCase,
        rest: Vec<TestCase>,
    ) -> Self {
        let mut test_cases = Vec::with_capacity(rest.len() + 1);
        test_cases.push(first);
        test_cases.extend(rest);
        Self {
            requirement_id,
            requirement_title: requirement_title.into(),
            test_cases,
        }
    }

    /// Requirement id
    #[inline]
    #[must_use]
    pub fn requirement_id(&self) -> u64 {
        self.requirement_id
    }

    /// Requirement title
    #[inline]
    #[must_use]
    pub fn requirement_title(&self) -> &str {
        &self.requirement_title
    }

    /// Ordered test cases (never empty)
    #[inline]
    #[must_use]
    pub fn test_cases(&self) -> &[TestCase] {
        &self.test_cases
    }

    /// Number of test cases
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.test_cases.len()
    }

    /// Whether there are no test cases (never true)
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.test_cases.is_empty()
    }

    /// Back-reference used by artifacts and results
    #[inline]
    #[must_use]
    pub fn reference(&self) -> ScenarioRef {
        ScenarioRef {
            requirement_id: self.requirement_id,
            requirement_title: self.requirement_title.clone(),
        }
    }
}

/// Lightweight reference to the scenario an artifact or result came from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScenarioRef {
    /// Requirement id of the scenario
    pub requirement_id: u64,
    /// Requirement title of the scenario
    pub requirement_title: String,
}

#[derive(Deserialize)]
struct RawScenario {
    requirement_id: u64,
    #[serde(default)]
    requirement_title: String,
    test_cases: Vec<TestCase>,
}

impl TryFrom<RawScenario> for Scenario {
    type Error = ModelError;

    fn try_from(raw: RawScenario) -> Result<Self, Self::Error> {
        Scenario::new(raw.requirement_id, raw.requirement_title, raw.test_cases)
    }
}
