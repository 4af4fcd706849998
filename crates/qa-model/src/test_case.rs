//! Parsed or synthesized test cases

use crate::error::{ModelError, ModelResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Prefix used for synthesized test-data keys
pub const DATA_KEY_PREFIX: &str = "data_";

/// Title used when a prefixed title would otherwise be blank
pub const UNTITLED: &str = "Untitled test";

/// One unit of steps, expected results and test data
///
/// The title is always non-empty. `test_data` preserves insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTestCase")]
pub struct TestCase {
    title: String,
    /// Ordered test steps
    pub steps: Vec<String>,
    /// Ordered expected results
    pub expected_results: Vec<String>,
    /// Test data, keyed by label or synthesized `data_<n>`
    pub test_data: IndexMap<String, String>,
}

impl TestCase {
    /// Create a test case with the given title
    ///
    /// # Errors
    /// Returns [`ModelError::EmptyTitle`] when the title is blank
    pub fn new(title: impl Into<String>) -> ModelResult<Self> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(ModelError::EmptyTitle);
        }
        Ok(Self {
            title,
            steps: Vec::new(),
            expected_results: Vec::new(),
            test_data: IndexMap::new(),
        })
    }

    /// Create a test case titled `<prefix> <subject>`
    ///
    /// Never fails: a blank result is replaced by [`UNTITLED`].
    #[must_use]
    pub fn with_prefixed_title(prefix: &str, subject: &str) -> Self {
        let title = format!("{} {}", prefix.trim(), subject.trim()).trim().to_string();
        Self {
            title: if title.is_empty() { UNTITLED.to_string() } else { title },
            steps: Vec::new(),
            expected_results: Vec::new(),
            test_data: IndexMap::new(),
        }
    }

    /// Title of the test case
    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// With steps
    #[inline]
    #[must_use]
    pub fn with_steps<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steps.extend(steps.into_iter().map(Into::into));
        self
    }

    /// With expected results
    #[inline]
    #[must_use]
    pub fn with_expected_results<I, S>(mut self, results: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expected_results.extend(results.into_iter().map(Into::into));
        self
    }

    /// Insert an unlabeled test-data value under a synthesized key
    ///
    /// Returns the key used.
    pub fn insert_data(&mut self, value: impl Into<String>) -> String {
        let key = self.next_data_key();
        self.test_data.insert(key.clone(), value.into());
        key
    }

    /// Insert a labeled test-data value
    ///
    /// Falls back to a synthesized key when the label is blank or already taken.
    pub fn insert_labeled_data(&mut self, label: &str, value: impl Into<String>) -> String {
        let label = label.trim();
        if label.is_empty() || self.test_data.contains_key(label) {
            return self.insert_data(value);
        }
        self.test_data.insert(label.to_string(), value.into());
        label.to_string()
    }

    fn next_data_key(&self) -> String {
        let mut n = self.test_data.len() + 1;
        loop {
            let key = format!("{DATA_KEY_PREFIX}{n}");
            if !self.test_data.contains_key(&key) {
                return key;
            }
            n += 1;
        }
    }
}

#[derive(Deserialize)]
struct RawTestCase {
    title: String,
    #[serde(default)]
    steps: Vec<String>,
    #[serde(default)]
    expected_results: Vec<String>,
    #[serde(default)]
    test_data: IndexMap<String, String>,
}

impl TryFrom<RawTestCase> for TestCase {
    type Error = ModelError;

    fn try_from(raw: RawTestCase) -> Result<Self, Self::Error> {
        let mut case = TestCase::new(raw.title)?;
        case.steps = raw.steps;
        case.expected_results = raw.expected_results;
        case.test_data = raw.test_data;
        Ok(case)
    }
}
