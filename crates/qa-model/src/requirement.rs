//! Requirements supplied by the work-item tracker

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("static regex"));
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

/// A requirement (work item) that test scenarios are derived from
///
/// Only `id` is guaranteed to be meaningful; every text field may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// Unique work-item identifier
    pub id: u64,
    /// Work-item title
    #[serde(default)]
    pub title: String,
    /// Free-form description (often HTML)
    #[serde(default)]
    pub description: String,
    /// Acceptance criteria text
    #[serde(default)]
    pub acceptance_criteria: String,
}

impl Requirement {
    /// Create a requirement with only id and title set
    #[inline]
    #[must_use]
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            acceptance_criteria: String::new(),
        }
    }

    /// With description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// With acceptance criteria
    #[inline]
    #[must_use]
    pub fn with_acceptance_criteria(mut self, criteria: impl Into<String>) -> Self {
        self.acceptance_criteria = criteria.into();
        self
    }

    /// Description with markup removed and whitespace collapsed
    #[must_use]
    pub fn plain_description(&self) -> String {
        strip_markup(&self.description)
    }

    /// Acceptance criteria with markup removed and whitespace collapsed
    #[must_use]
    pub fn plain_acceptance_criteria(&self) -> String {
        strip_markup(&self.acceptance_criteria)
    }
}

/// Remove HTML tags, decode the common entities and collapse whitespace
#[must_use]
pub fn strip_markup(text: &str) -> String {
    let without_tags = HTML_TAG.replace_all(text, " ");
    let decoded = without_tags
        .replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&");
    WHITESPACE_RUN.replace_all(decoded.trim(), " ").into_owned()
}
