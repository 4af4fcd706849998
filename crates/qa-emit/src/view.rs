//! Render views
//!
//! Templates only substitute and loop. Every decision (names, quoting,
//! de-duplication, the injected navigation step) is made here, once, for
//! all template sets.

use crate::locator::LocatorHint;
use crate::target::{Language, Target};
use qa_model::{Scenario, TestCase};
use std::collections::HashSet;

/// Page-object view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    /// Page class name
    pub class_name: String,
    /// Doc-safe requirement title
    pub doc: String,
    /// Declared locators
    pub locators: Vec<LocatorView>,
}

/// One declared locator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorView {
    /// Accessor name, unique within the page
    pub name: String,
    /// Field holding the locator
    pub field: String,
    /// Language-specific `By` selector
    pub by: String,
    /// Quoted locator expression
    pub value: String,
    /// Comment-safe description
    pub description: String,
}

/// Suite view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteView {
    /// Suite class name (unused by script-style sets)
    pub class_name: String,
    /// Doc-safe requirement title
    pub doc: String,
    /// Page class the suite drives
    pub page_class: String,
    /// Module or file stem of the page artifact
    pub page_module: String,
    /// Quoted name of the base-URL environment variable
    pub base_url_env: String,
    /// One entry per test case, in order
    pub units: Vec<UnitView>,
}

/// One test unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitView {
    /// Unit name, unique within the suite
    pub name: String,
    /// Doc-safe test case title
    pub doc: String,
    /// Executable statements; the first is always the navigation step
    pub actions: Vec<String>,
    /// Comment-safe steps
    pub steps: Vec<String>,
    /// Comment-safe expected results
    pub expected: Vec<String>,
    /// Quoted test data
    pub data: Vec<DataEntry>,
}

/// One quoted test-data pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataEntry {
    /// Quoted key
    pub key: String,
    /// Quoted value
    pub value: String,
}

impl PageView {
    /// Build the page view for a scenario
    #[must_use]
    pub fn build(scenario: &Scenario, target: &Target, hints: &[LocatorHint]) -> Self {
        let language = target.language;
        let names = locator_names(hints.iter().map(|h| target.member_naming.apply(&h.name)), language);
        let locators = hints
            .iter()
            .zip(names)
            .map(|(hint, name)| LocatorView {
                field: language.locator_field(&name),
                name,
                by: match language {
                    Language::Python => hint.strategy.python_by(),
                    Language::Java => hint.strategy.java_by(),
                }
                .to_string(),
                value: language.quote(&hint.value),
                description: language.comment_text(if hint.description.is_empty() {
                    &hint.name
                } else {
                    &hint.description
                }),
            })
            .collect();

        Self {
            class_name: target.page_class(scenario.requirement_title()),
            doc: language.doc_text(scenario.requirement_title()),
            locators,
        }
    }
}

impl SuiteView {
    /// Build the suite view for a scenario
    #[must_use]
    pub fn build(scenario: &Scenario, target: &Target) -> Self {
        let title = scenario.requirement_title();
        let names = unique_names(
            scenario
                .test_cases()
                .iter()
                .map(|case| target.member_naming.apply(&format!("test {}", case.title()))),
        );
        let units = scenario
            .test_cases()
            .iter()
            .zip(names)
            .map(|(case, name)| UnitView::build(case, name, target))
            .collect();
        let page_module = target
            .page_path_for(title)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        Self {
            class_name: target.suite_class(title),
            doc: target.language.doc_text(title),
            page_class: target.page_class(title),
            page_module,
            base_url_env: target.language.quote(&target.base_url_env),
            units,
        }
    }
}

impl UnitView {
    fn build(case: &TestCase, name: String, target: &Target) -> Self {
        let language = target.language;
        Self {
            name,
            doc: language.doc_text(case.title()),
            actions: vec![target.navigation_step.clone()],
            steps: case.steps.iter().map(|s| language.comment_text(s)).collect(),
            expected: case
                .expected_results
                .iter()
                .map(|s| language.comment_text(s))
                .collect(),
            data: case
                .test_data
                .iter()
                .map(|(k, v)| DataEntry {
                    key: language.quote(k),
                    value: language.quote(v),
                })
                .collect(),
        }
    }
}

/// De-duplicate names in order by appending `_2`, `_3`, ...
fn unique_names(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .map(|base| {
            let mut candidate = base.clone();
            let mut n = 2;
            while !seen.insert(candidate.clone()) {
                candidate = format!("{base}_{n}");
                n += 1;
            }
            candidate
        })
        .collect()
}

/// Accessor names for locators
///
/// Keywords are suffixed, and a name is skipped to `_2`, `_3`, ... while it
/// or its locator field clashes with a page member or an earlier locator.
fn locator_names(names: impl Iterator<Item = String>, language: Language) -> Vec<String> {
    let mut taken: HashSet<String> = language.page_members().iter().map(ToString::to_string).collect();
    names
        .map(|name| {
            let base = language.escape_keyword(name);
            let mut candidate = base.clone();
            let mut n = 2;
            while taken.contains(&candidate) || taken.contains(&language.locator_field(&candidate)) {
                candidate = format!("{base}_{n}");
                n += 1;
            }
            taken.insert(language.locator_field(&candidate));
            taken.insert(candidate.clone());
            candidate
        })
        .collect()
}
