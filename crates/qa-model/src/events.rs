//! Structured pipeline events
//!
//! Components never log free text directly. They report [`PipelineEvent`]s to
//! an injected [`EventSink`]; the default [`TracingSink`] forwards them to
//! `tracing`, and [`MemorySink`] records them for assertions.

use parking_lot::Mutex;
use std::path::PathBuf;

/// Something observable that happened during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    /// Raw text was parsed
    ParseCompleted {
        /// Blocks found between boundary markers
        blocks_seen: usize,
        /// Blocks dropped for lacking a title
        blocks_dropped: usize,
        /// Test cases produced
        cases: usize,
    },
    /// A block had content but no title anchor
    BlockDropped {
        /// Zero-based block position in the document
        index: usize,
        /// Item lines the block carried
        items: usize,
    },
    /// Parsing failed internally and degraded to an empty list
    ParseDegraded {
        /// Failure description
        reason: String,
    },
    /// The completion collaborator failed or timed out
    CompletionFailed {
        /// Requirement the completion was requested for
        requirement_id: u64,
        /// Failure description
        reason: String,
    },
    /// The assembler synthesized the fallback test case
    FallbackInjected {
        /// Requirement id
        requirement_id: u64,
    },
    /// An artifact was written to storage
    ArtifactWritten {
        /// Target id
        target: String,
        /// Path written
        path: PathBuf,
        /// Test units contained (0 for page artifacts)
        units: usize,
    },
    /// Emission for one scenario/target failed
    RenderFailed {
        /// Requirement id
        requirement_id: u64,
        /// Target id
        target: String,
        /// Failure description
        reason: String,
    },
    /// A scenario's test unit could not be located, imported or run
    ExecutionFailed {
        /// Requirement id
        requirement_id: u64,
        /// Failure description
        reason: String,
    },
    /// A scenario finished executing
    ScenarioExecuted {
        /// Requirement id
        requirement_id: u64,
        /// Passed units
        passed: usize,
        /// Failed or errored units
        failed: usize,
    },
    /// The run report was persisted
    ReportPersisted {
        /// Report location
        path: PathBuf,
    },
}

/// Receiver of pipeline events
pub trait EventSink: Send + Sync {
    /// Handle one event
    fn emit(&self, event: PipelineEvent);
}

/// Forwards events to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: PipelineEvent) {
        match event {
            PipelineEvent::ParseCompleted {
                blocks_seen,
                blocks_dropped,
                cases,
            } => tracing::debug!(blocks_seen, blocks_dropped, cases, "parsed completion text"),
            PipelineEvent::BlockDropped { index, items } => {
                tracing::debug!(index, items, "dropped block without title");
            }
            PipelineEvent::ParseDegraded { reason } => {
                tracing::warn!(%reason, "parse degraded to empty result");
            }
            PipelineEvent::CompletionFailed { requirement_id, reason } => {
                tracing::warn!(requirement_id, %reason, "completion failed");
            }
            PipelineEvent::FallbackInjected { requirement_id } => {
                tracing::info!(requirement_id, "injected fallback test case");
            }
            PipelineEvent::ArtifactWritten { target, path, units } => {
                tracing::info!(%target, path = %path.display(), units, "artifact written");
            }
            PipelineEvent::RenderFailed {
                requirement_id,
                target,
                reason,
            } => tracing::error!(requirement_id, %target, %reason, "render failed"),
            PipelineEvent::ExecutionFailed { requirement_id, reason } => {
                tracing::warn!(requirement_id, %reason, "execution failed");
            }
            PipelineEvent::ScenarioExecuted {
                requirement_id,
                passed,
                failed,
            } => tracing::info!(requirement_id, passed, failed, "scenario executed"),
            PipelineEvent::ReportPersisted { path } => {
                tracing::info!(path = %path.display(), "report persisted");
            }
        }
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: PipelineEvent) {}
}

/// Records events in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<PipelineEvent>>,
}

impl MemorySink {
    /// Create empty sink
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded events
    #[must_use]
    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events.lock().clone()
    }

    /// Count events matching a predicate
    pub fn count(&self, predicate: impl Fn(&PipelineEvent) -> bool) -> usize {
        self.events.lock().iter().filter(|e| predicate(e)).count()
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: PipelineEvent) {
        self.events.lock().push(event);
    }
}
