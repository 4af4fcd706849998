//! Pipeline orchestration
//!
//! One run walks every requirement through four phases:
//!
//! 1. completion: request raw text (failures and timeouts become empty text)
//! 2. assembly: parse the text into a scenario, falling back when nothing parses
//! 3. emission: render each scenario for each configured target and write it
//! 4. execution: run the runner target's suites, aggregate and persist the report
//!
//! Only report persistence can fail a run; every other failure is recorded
//! and the run continues.

use crate::completion::CompletionClient;
use crate::config::PipelineConfig;
use crate::error::{CompletionError, PipelineResult};
use crate::prompt::build_prompt;
use chrono::{DateTime, Utc};
use qa_emit::{ArtifactStore, CodeEmitter, FsArtifactStore, GeneratedArtifact, LocatorSource, RenderFailure, Target};
use qa_model::{EventSink, ExecutionReport, PipelineEvent, Requirement, Scenario, TracingSink};
use qa_parser::{ResponseParser, ScenarioAssembler};
use qa_runner::{persist, ResultAggregator, TestRunner};
use std::path::PathBuf;
use std::sync::Arc;

/// Result of the generation phases
#[derive(Debug, Default)]
pub struct GenerateOutcome {
    /// One scenario per requirement, in input order
    pub scenarios: Vec<Scenario>,
    /// Artifacts written, in scenario then target order
    pub artifacts: Vec<GeneratedArtifact>,
    /// Scenario/target pairs that failed to render or write
    pub render_failures: Vec<RenderFailure>,
}

/// Result of a full run
#[derive(Debug)]
pub struct RunOutcome {
    /// One scenario per requirement, in input order
    pub scenarios: Vec<Scenario>,
    /// Artifacts written, in scenario then target order
    pub artifacts: Vec<GeneratedArtifact>,
    /// Scenario/target pairs that failed to render or write
    pub render_failures: Vec<RenderFailure>,
    /// Aggregated execution outcome
    pub report: ExecutionReport,
    /// Where the report was written
    pub report_path: PathBuf,
}

impl RunOutcome {
    /// True when any test failed or errored
    #[inline]
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.report.has_failures()
    }
}

/// Requirement-to-report pipeline
#[derive(Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    targets: Vec<Target>,
    completions: Arc<dyn CompletionClient>,
    emitter: CodeEmitter,
    runner: Arc<dyn TestRunner>,
    sink: Arc<dyn EventSink>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("emitter", &self.emitter)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Create pipeline writing under the configured output root and running
    /// suites with the configured process runner
    ///
    /// # Errors
    /// - `PipelineError::Config` if `config` fails validation
    pub fn new(config: PipelineConfig, completions: Arc<dyn CompletionClient>) -> PipelineResult<Self> {
        config.validate()?;
        let targets = config.resolve_targets()?;
        let runner: Arc<dyn TestRunner> = Arc::new(config.process_runner()?);
        let sink: Arc<dyn EventSink> = Arc::new(TracingSink);
        let emitter = CodeEmitter::new(Arc::new(FsArtifactStore::new(&config.output_root)))
            .with_sink(Arc::clone(&sink));
        Ok(Self {
            config,
            targets,
            completions,
            emitter,
            runner,
            sink,
        })
    }

    /// With test runner
    #[inline]
    #[must_use]
    pub fn with_runner(mut self, runner: Arc<dyn TestRunner>) -> Self {
        self.runner = runner;
        self
    }

    /// With artifact store
    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn ArtifactStore>) -> Self {
        self.emitter = CodeEmitter::new(store).with_sink(Arc::clone(&self.sink));
        self
    }

    /// With locator hints for page objects
    #[must_use]
    pub fn with_locators(mut self, locators: Arc<dyn LocatorSource>) -> Self {
        self.emitter = self.emitter.with_locators(locators);
        self
    }

    /// With event sink for every phase
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.emitter = self.emitter.with_sink(Arc::clone(&sink));
        self.sink = sink;
        self
    }

    /// Configuration in effect
    #[inline]
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Targets generated, in emission order
    #[inline]
    #[must_use]
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Run completion, assembly and emission without executing anything
    pub async fn generate(&self, requirements: &[Requirement]) -> GenerateOutcome {
        tracing::info!(requirements = requirements.len(), targets = self.targets.len(), "generating suites");

        let mut inputs = Vec::with_capacity(requirements.len());
        for requirement in requirements {
            let text = self.complete(requirement).await;
            inputs.push((requirement.clone(), text));
        }

        let parser = ResponseParser::new().with_max_input_bytes(self.config.max_input_bytes);
        let scenarios = ScenarioAssembler::new(parser)
            .with_sink(Arc::clone(&self.sink))
            .assemble_all(&inputs);

        let summary = self.emitter.emit_all(&scenarios, &self.targets);
        tracing::info!(
            scenarios = scenarios.len(),
            artifacts = summary.artifacts.len(),
            failures = summary.failures.len(),
            "generation finished"
        );
        GenerateOutcome {
            scenarios,
            artifacts: summary.artifacts,
            render_failures: summary.failures,
        }
    }

    /// Generate, execute and persist the report, stamped with the current time
    ///
    /// # Errors
    /// - `PipelineError::Persistence` if the report cannot be written
    pub async fn run(&self, requirements: &[Requirement]) -> PipelineResult<RunOutcome> {
        self.run_at(Utc::now(), requirements).await
    }

    /// Generate, execute and persist the report with an explicit execution time
    ///
    /// # Errors
    /// - `PipelineError::Persistence` if the report cannot be written
    pub async fn run_at(&self, execution_time: DateTime<Utc>, requirements: &[Requirement]) -> PipelineResult<RunOutcome> {
        let generated = self.generate(requirements).await;

        let report = ResultAggregator::new(Arc::clone(&self.runner))
            .with_timeout(self.config.execution_timeout())
            .with_sink(Arc::clone(&self.sink))
            .run_at(execution_time, &generated.scenarios)
            .await;

        let report_path = persist(&report, &self.config.results_dir).await.map_err(|e| {
            tracing::error!(error = %e, dir = %self.config.results_dir.display(), "failed to persist report");
            e
        })?;
        self.sink.emit(PipelineEvent::ReportPersisted {
            path: report_path.clone(),
        });
        tracing::info!(
            passed = report.passed_tests,
            failed = report.failed_tests,
            "run finished"
        );

        Ok(RunOutcome {
            scenarios: generated.scenarios,
            artifacts: generated.artifacts,
            render_failures: generated.render_failures,
            report,
            report_path,
        })
    }

    /// Completion text for `requirement`, empty on failure or timeout
    async fn complete(&self, requirement: &Requirement) -> String {
        let prompt = build_prompt(requirement);
        let limit = self.config.completion_timeout();
        let result = tokio::time::timeout(limit, self.completions.complete(requirement, &prompt))
            .await
            .unwrap_or(Err(CompletionError::Timeout {
                secs: limit.as_secs(),
            }));

        match result {
            Ok(text) => {
                tracing::debug!(requirement_id = requirement.id, bytes = text.len(), "completion received");
                text
            }
            Err(e) => {
                self.sink.emit(PipelineEvent::CompletionFailed {
                    requirement_id: requirement.id,
                    reason: e.to_string(),
                });
                String::new()
            }
        }
    }
}
