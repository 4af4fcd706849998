//! Response parser
//!
//! Extracts ordered [`TestCase`]s from loosely structured completion text.
//! The text is split on `Test Case <n>:` / `Test Scenario <n>:` markers and
//! every block is scanned with the transition table in [`crate::classifier`].
//! Blocks without a title anchor are dropped; no title is ever inferred.

use crate::classifier::{classify, transition, Action, Section};
use crate::error::{ParseError, ParseResult};
use once_cell::sync::Lazy;
use qa_model::{EventSink, PipelineEvent, TestCase, TracingSink};
use regex::Regex;
use std::sync::Arc;

/// Default maximum input size (1 MiB)
pub const DEFAULT_MAX_INPUT_BYTES: usize = 1024 * 1024;

static BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)test\s+(?:case|scenario)\s+\d+\s*:").expect("static regex"));

/// Block that was skipped for lacking a title
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DroppedBlock {
    /// Zero-based block position
    pub index: usize,
    /// Item lines the block carried
    pub items: usize,
}

/// Structured result of a parse
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParseOutcome {
    /// Extracted test cases in document order
    pub cases: Vec<TestCase>,
    /// Blocks found between markers
    pub blocks_seen: usize,
    /// Blocks dropped for lacking a title
    pub dropped: Vec<DroppedBlock>,
}

/// Parser for completion text
#[derive(Clone)]
pub struct ResponseParser {
    max_input_bytes: usize,
    sink: Arc<dyn EventSink>,
}

impl std::fmt::Debug for ResponseParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseParser")
            .field("max_input_bytes", &self.max_input_bytes)
            .finish_non_exhaustive()
    }
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseParser {
    /// Create parser reporting to `tracing`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            sink: Arc::new(TracingSink),
        }
    }

    /// With event sink
    #[inline]
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// With maximum input size in bytes
    #[inline]
    #[must_use]
    pub fn with_max_input_bytes(mut self, max: usize) -> Self {
        self.max_input_bytes = max;
        self
    }

    /// Parse `raw_text` into test cases
    ///
    /// Never fails: any internal failure yields an empty list and a
    /// [`PipelineEvent::ParseDegraded`] event.
    #[must_use]
    pub fn parse(&self, raw_text: &str) -> Vec<TestCase> {
        match self.try_parse(raw_text) {
            Ok(outcome) => {
                for block in &outcome.dropped {
                    self.sink.emit(PipelineEvent::BlockDropped {
                        index: block.index,
                        items: block.items,
                    });
                }
                self.sink.emit(PipelineEvent::ParseCompleted {
                    blocks_seen: outcome.blocks_seen,
                    blocks_dropped: outcome.dropped.len(),
                    cases: outcome.cases.len(),
                });
                outcome.cases
            }
            Err(e) => {
                self.sink.emit(PipelineEvent::ParseDegraded { reason: e.to_string() });
                Vec::new()
            }
        }
    }

    /// Parse `raw_text`, exposing block statistics and failures
    ///
    /// # Errors
    /// - `ParseError::InputTooLarge` if the text exceeds the configured limit
    pub fn try_parse(&self, raw_text: &str) -> ParseResult<ParseOutcome> {
        if raw_text.len() > self.max_input_bytes {
            return Err(ParseError::input_too_large(raw_text.len(), self.max_input_bytes));
        }

        let mut outcome = ParseOutcome::default();
        for (index, block) in BOUNDARY.split(raw_text).skip(1).enumerate() {
            outcome.blocks_seen += 1;
            let scanned = scan_block(block);
            match scanned.finish() {
                Ok(case) => outcome.cases.push(case),
                Err(items) => outcome.dropped.push(DroppedBlock { index, items }),
            }
        }
        Ok(outcome)
    }
}

#[derive(Debug, Default)]
struct BlockBuilder {
    title: Option<String>,
    steps: Vec<String>,
    expected: Vec<String>,
    data: Vec<String>,
}

impl BlockBuilder {
    fn append(&mut self, section: Section, item: &str) {
        if item.is_empty() {
            return;
        }
        let list = match section {
            Section::Steps => &mut self.steps,
            Section::Expected => &mut self.expected,
            Section::TestData => &mut self.data,
            Section::None => return,
        };
        list.push(item.to_string());
    }

    /// Build the test case, or report the item count of a title-less block
    fn finish(self) -> Result<TestCase, usize> {
        let items = self.steps.len() + self.expected.len() + self.data.len();
        let Some(title) = self.title else {
            return Err(items);
        };
        let mut case = TestCase::new(title).map_err(|_| items)?;
        case.steps = self.steps;
        case.expected_results = self.expected;
        for item in self.data {
            match split_label(&item) {
                Some((label, value)) => case.insert_labeled_data(label, value),
                None => case.insert_data(item),
            };
        }
        Ok(case)
    }
}

fn scan_block(block: &str) -> BlockBuilder {
    let mut builder = BlockBuilder::default();
    let mut section = Section::None;

    for raw_line in block.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        let classified = classify(line);
        let step = transition(section, classified.class);
        match step.action {
            Action::SetTitle => {
                builder.title = Some(classified.payload.to_string()).filter(|t| !t.is_empty());
            }
            Action::Append => builder.append(section, classified.payload),
            Action::Discard => {}
        }
        if let Some(next) = step.next {
            section = next;
        }
    }
    builder
}

/// Split a `label: value` test-data item
fn split_label(item: &str) -> Option<(&str, &str)> {
    let (label, value) = item.split_once(':')?;
    let (label, value) = (label.trim(), value.trim());
    let plain_label = label
        .chars()
        .all(|c| c.is_alphanumeric() || c == ' ' || c == '_' || c == '-');
    if label.is_empty() || value.is_empty() || !plain_label || value.starts_with("//") {
        return None;
    }
    if label.split_whitespace().count() > 4 {
        return None;
    }
    Some((label, value))
}
