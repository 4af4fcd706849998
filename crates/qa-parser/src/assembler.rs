//! Scenario assembly
//!
//! Pairs a [`Requirement`] with the test cases parsed from its completion
//! text. When parsing yields nothing a single fallback case is synthesized,
//! so every assembled [`Scenario`] carries at least one test case.

use crate::parser::ResponseParser;
use qa_model::{EventSink, PipelineEvent, Requirement, Scenario, TestCase, TracingSink};
use rayon::prelude::*;
use std::sync::Arc;

/// Title prefix of the fallback test case
pub const FALLBACK_TITLE_PREFIX: &str = "Default test for:";

/// Second step of the fallback test case
pub const FALLBACK_DESIGN_STEP: &str = "Design a basic test flow based on acceptance criteria.";

/// Expected result of the fallback test case
pub const FALLBACK_EXPECTATION: &str = "Requirement is covered by at least one test.";

/// Builds scenarios from requirements and completion text
#[derive(Clone)]
pub struct ScenarioAssembler {
    parser: ResponseParser,
    sink: Arc<dyn EventSink>,
}

impl std::fmt::Debug for ScenarioAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScenarioAssembler")
            .field("parser", &self.parser)
            .finish_non_exhaustive()
    }
}

impl Default for ScenarioAssembler {
    fn default() -> Self {
        Self::new(ResponseParser::new())
    }
}

impl ScenarioAssembler {
    /// Create assembler around a parser
    #[inline]
    #[must_use]
    pub fn new(parser: ResponseParser) -> Self {
        Self {
            parser,
            sink: Arc::new(TracingSink),
        }
    }

    /// With event sink (also handed to the parser)
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.parser = self.parser.with_sink(Arc::clone(&sink));
        self.sink = sink;
        self
    }

    /// Assemble one scenario
    ///
    /// Never fails and never returns an empty scenario.
    #[must_use]
    pub fn assemble(&self, requirement: &Requirement, raw_text: &str) -> Scenario {
        let mut cases = self.parser.parse(raw_text).into_iter();
        let first = match cases.next() {
            Some(first) => first,
            None => {
                self.sink.emit(PipelineEvent::FallbackInjected {
                    requirement_id: requirement.id,
                });
                fallback_case(requirement)
            }
        };
        Scenario::with_first(requirement.id, &requirement.title, first, cases.collect())
    }

    /// Assemble many scenarios in parallel, preserving input order
    #[must_use]
    pub fn assemble_all(&self, inputs: &[(Requirement, String)]) -> Vec<Scenario> {
        tracing::debug!(requirements = inputs.len(), "assembling scenarios");
        inputs
            .par_iter()
            .map(|(requirement, text)| self.assemble(requirement, text))
            .collect()
    }
}

/// Synthesized test case for a requirement with no parsable scenarios
#[must_use]
pub fn fallback_case(requirement: &Requirement) -> TestCase {
    TestCase::with_prefixed_title(FALLBACK_TITLE_PREFIX, &requirement.title)
        .with_steps([
            format!("Review requirement: {}", requirement.plain_description()),
            FALLBACK_DESIGN_STEP.to_string(),
        ])
        .with_expected_results([FALLBACK_EXPECTATION])
}
