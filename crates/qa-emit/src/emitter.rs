//! Code emitter
//!
//! [`CodeEmitter::render`] is a pure function of `(scenario, target)`: the
//! same inputs always give byte-identical artifacts. [`CodeEmitter::emit`]
//! renders and then writes through the configured [`ArtifactStore`].

use crate::artifact::{ArtifactKind, GeneratedArtifact};
use crate::error::{RenderError, RenderResult};
use crate::locator::{LocatorSource, NoLocators};
use crate::renderer::RendererRegistry;
use crate::store::ArtifactStore;
use crate::target::Target;
use crate::view::{PageView, SuiteView};
use qa_model::{EventSink, PipelineEvent, Scenario, TracingSink};
use std::sync::Arc;

/// Emission failure for one scenario/target pair
#[derive(Debug)]
pub struct RenderFailure {
    /// Requirement id of the scenario
    pub requirement_id: u64,
    /// Target id
    pub target_id: String,
    /// Cause
    pub error: RenderError,
}

/// Result of emitting a batch
#[derive(Debug, Default)]
pub struct EmitSummary {
    /// Artifacts written, in scenario then target order
    pub artifacts: Vec<GeneratedArtifact>,
    /// Pairs that failed
    pub failures: Vec<RenderFailure>,
}

/// Renders scenarios into target artifacts
#[derive(Clone)]
pub struct CodeEmitter {
    registry: RendererRegistry,
    locators: Arc<dyn LocatorSource>,
    store: Arc<dyn ArtifactStore>,
    sink: Arc<dyn EventSink>,
}

impl std::fmt::Debug for CodeEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeEmitter")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl CodeEmitter {
    /// Create emitter writing to `store` with the built-in template sets
    #[must_use]
    pub fn new(store: Arc<dyn ArtifactStore>) -> Self {
        Self {
            registry: RendererRegistry::with_defaults(),
            locators: Arc::new(NoLocators),
            store,
            sink: Arc::new(TracingSink),
        }
    }

    /// With renderer registry
    #[inline]
    #[must_use]
    pub fn with_registry(mut self, registry: RendererRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// With locator source
    #[inline]
    #[must_use]
    pub fn with_locators(mut self, locators: Arc<dyn LocatorSource>) -> Self {
        self.locators = locators;
        self
    }

    /// With event sink
    #[inline]
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Renderer registry in use
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &RendererRegistry {
        &self.registry
    }

    /// Render one page artifact and one suite artifact
    ///
    /// # Errors
    /// - `RenderError::UnknownTemplateSet` if the target's set is not registered
    /// - `RenderError::Template` if a template fails
    pub fn render(&self, scenario: &Scenario, target: &Target) -> RenderResult<Vec<GeneratedArtifact>> {
        let renderer = self.registry.get(&target.template_set)?;
        let title = scenario.requirement_title();

        let hints = self.locators.hints(scenario);
        let page_view = PageView::build(scenario, target, &hints);
        let suite_view = SuiteView::build(scenario, target);

        let page = renderer.render_page(&page_view)?;
        let suite = renderer.render_suite(&suite_view)?;

        Ok(vec![
            GeneratedArtifact::new(
                &target.id,
                ArtifactKind::Page,
                target.page_path_for(title),
                page,
                scenario.reference(),
                0,
            ),
            GeneratedArtifact::new(
                &target.id,
                ArtifactKind::Suite,
                target.test_path_for(title),
                suite,
                scenario.reference(),
                suite_view.units.len(),
            ),
        ])
    }

    /// Render and write through the store
    ///
    /// # Errors
    /// - Any error of [`render`](Self::render)
    /// - `RenderError::Io` if writing fails
    pub fn emit(&self, scenario: &Scenario, target: &Target) -> RenderResult<Vec<GeneratedArtifact>> {
        let artifacts = self.render(scenario, target)?;
        for artifact in &artifacts {
            self.store.write(artifact)?;
            self.sink.emit(PipelineEvent::ArtifactWritten {
                target: target.id.clone(),
                path: artifact.path.clone(),
                units: artifact.unit_count,
            });
        }
        Ok(artifacts)
    }

    /// Emit every scenario for every target
    ///
    /// A failing pair is recorded and skipped; the batch continues.
    pub fn emit_all(&self, scenarios: &[Scenario], targets: &[Target]) -> EmitSummary {
        let mut summary = EmitSummary::default();
        for scenario in scenarios {
            for target in targets {
                match self.emit(scenario, target) {
                    Ok(artifacts) => summary.artifacts.extend(artifacts),
                    Err(error) => {
                        self.sink.emit(PipelineEvent::RenderFailed {
                            requirement_id: scenario.requirement_id(),
                            target: target.id.clone(),
                            reason: error.to_string(),
                        });
                        summary.failures.push(RenderFailure {
                            requirement_id: scenario.requirement_id(),
                            target_id: target.id.clone(),
                            error,
                        });
                    }
                }
            }
        }
        summary
    }
}
