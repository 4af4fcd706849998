//! Locator hints
//!
//! A [`LocatorSource`] supplies element locators for a scenario's page
//! object. Hints are opaque to the engine: each one becomes a declared
//! locator plus an accessor in the page artifact.

use qa_model::Scenario;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How an element is located
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocatorStrategy {
    /// Element id
    Id,
    /// XPath expression
    XPath,
    /// CSS selector
    Css,
    /// `name` attribute
    Name,
}

impl LocatorStrategy {
    /// Python `By` constant
    #[inline]
    #[must_use]
    pub fn python_by(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::XPath => "XPATH",
            Self::Css => "CSS_SELECTOR",
            Self::Name => "NAME",
        }
    }

    /// Java `By` factory method
    #[inline]
    #[must_use]
    pub fn java_by(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::XPath => "xpath",
            Self::Css => "cssSelector",
            Self::Name => "name",
        }
    }
}

/// One suggested element locator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatorHint {
    /// Free-text element name, normalized per target
    pub name: String,
    /// Location strategy
    pub strategy: LocatorStrategy,
    /// Strategy-specific expression
    pub value: String,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
}

impl LocatorHint {
    /// Create a hint
    #[must_use]
    pub fn new(name: impl Into<String>, strategy: LocatorStrategy, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            strategy,
            value: value.into(),
            description: String::new(),
        }
    }

    /// With description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Supplier of locator hints
pub trait LocatorSource: Send + Sync {
    /// Hints for a scenario's page object, in declaration order
    fn hints(&self, scenario: &Scenario) -> Vec<LocatorHint>;
}

/// Source that never suggests anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocators;

impl LocatorSource for NoLocators {
    fn hints(&self, _scenario: &Scenario) -> Vec<LocatorHint> {
        Vec::new()
    }
}

/// Fixed hints keyed by requirement id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticLocators {
    by_requirement: HashMap<u64, Vec<LocatorHint>>,
}

impl StaticLocators {
    /// Create empty source
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hint for a requirement
    #[must_use]
    pub fn with_hint(mut self, requirement_id: u64, hint: LocatorHint) -> Self {
        self.by_requirement.entry(requirement_id).or_default().push(hint);
        self
    }
}

impl LocatorSource for StaticLocators {
    fn hints(&self, scenario: &Scenario) -> Vec<LocatorHint> {
        self.by_requirement
            .get(&scenario.requirement_id())
            .cloned()
            .unwrap_or_default()
    }
}
