//! Subcommand handlers
//!
//! Handlers return the text to print so the formatting can be tested
//! without a terminal.

use anyhow::Context;
use qa_core::{
    DirectoryCompletions, GenerateOutcome, JsonFileRequirements, Pipeline, PipelineConfig, RequirementSource,
};
use qa_emit::{ArtifactKind, Target};
use qa_model::{ExecutionReport, ExecutionStatus, TestCase};
use qa_parser::ResponseParser;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Inputs shared by `generate` and `run`
#[derive(Debug, Clone)]
pub(crate) struct PipelineArgs {
    pub(crate) requirements: PathBuf,
    pub(crate) completions: PathBuf,
    pub(crate) config: Option<PathBuf>,
    pub(crate) out: Option<PathBuf>,
    pub(crate) results: Option<PathBuf>,
}

impl PipelineArgs {
    fn config(&self) -> anyhow::Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::load(path)
                .with_context(|| format!("loading configuration from {}", path.display()))?,
            None => PipelineConfig::new(),
        };
        if let Some(out) = &self.out {
            config = config.with_output_root(out);
        }
        if let Some(results) = &self.results {
            config = config.with_results_dir(results);
        }
        config.validate()?;
        Ok(config)
    }

    async fn prepare(&self) -> anyhow::Result<(Pipeline, Vec<qa_model::Requirement>)> {
        let config = self.config()?;
        let requirements = JsonFileRequirements::new(&self.requirements)
            .fetch()
            .await
            .context("fetching requirements")?;
        let pipeline = Pipeline::new(config, Arc::new(DirectoryCompletions::new(&self.completions)))?;
        Ok((pipeline, requirements))
    }
}

/// `parse`: show what the parser extracts from a completion file
pub(crate) fn parse(path: &Path, json: bool, max_input_bytes: usize) -> anyhow::Result<String> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let outcome = ResponseParser::new()
        .with_max_input_bytes(max_input_bytes)
        .try_parse(&text)?;

    if json {
        return Ok(serde_json::to_string_pretty(&outcome.cases)?);
    }

    let mut out = String::new();
    writeln!(
        out,
        "{} test case(s) from {} block(s), {} dropped",
        outcome.cases.len(),
        outcome.blocks_seen,
        outcome.dropped.len()
    )?;
    for (i, case) in outcome.cases.iter().enumerate() {
        write_case(&mut out, i + 1, case)?;
    }
    Ok(out)
}

fn write_case(out: &mut String, number: usize, case: &TestCase) -> std::fmt::Result {
    writeln!(out, "\n{number}. {}", case.title())?;
    for step in &case.steps {
        writeln!(out, "   step:   {step}")?;
    }
    for expected in &case.expected_results {
        writeln!(out, "   expect: {expected}")?;
    }
    for (key, value) in &case.test_data {
        writeln!(out, "   data:   {key} = {value}")?;
    }
    Ok(())
}

/// `generate`: write suites without executing them
///
/// Returns the summary and whether any scenario/target pair failed.
pub(crate) async fn generate(args: &PipelineArgs) -> anyhow::Result<(String, bool)> {
    let (pipeline, requirements) = args.prepare().await?;
    let outcome = pipeline.generate(&requirements).await;
    let failed = !outcome.render_failures.is_empty();
    Ok((generation_summary(&outcome)?, failed))
}

fn generation_summary(outcome: &GenerateOutcome) -> anyhow::Result<String> {
    let mut out = String::new();
    for artifact in &outcome.artifacts {
        let kind = match artifact.kind {
            ArtifactKind::Page => "page ",
            ArtifactKind::Suite => "suite",
        };
        writeln!(out, "{kind} {} ({} units)", artifact.path.display(), artifact.unit_count)?;
    }
    for failure in &outcome.render_failures {
        writeln!(
            out,
            "failed requirement {} for {}: {}",
            failure.requirement_id, failure.target_id, failure.error
        )?;
    }
    writeln!(
        out,
        "{} scenario(s), {} artifact(s), {} failure(s)",
        outcome.scenarios.len(),
        outcome.artifacts.len(),
        outcome.render_failures.len()
    )?;
    Ok(out)
}

/// `run`: generate, execute and persist the report
///
/// Returns the summary and whether any test failed.
pub(crate) async fn run(args: &PipelineArgs) -> anyhow::Result<(String, bool)> {
    let (pipeline, requirements) = args.prepare().await?;
    let outcome = pipeline.run(&requirements).await?;
    let mut out = report_summary(&outcome.report)?;
    writeln!(out, "report: {}", outcome.report_path.display())?;
    Ok((out, outcome.has_failures()))
}

fn report_summary(report: &ExecutionReport) -> anyhow::Result<String> {
    let mut out = String::new();
    for scenario in &report.scenario_results {
        writeln!(
            out,
            "[{}] {}: {} passed, {} failed",
            scenario.requirement_id, scenario.requirement_title, scenario.passed_tests, scenario.failed_tests
        )?;
        for result in scenario.test_cases.iter().filter(|r| r.status != ExecutionStatus::Passed) {
            let message = result.message.as_deref().unwrap_or_default();
            writeln!(out, "    {} {} {message}", result.status, result.name)?;
        }
    }
    writeln!(
        out,
        "total: {} scenario(s), {} passed, {} failed",
        report.total_scenarios, report.passed_tests, report.failed_tests
    )?;
    Ok(out)
}

/// `targets`: list the built-in targets
pub(crate) fn targets() -> String {
    let mut out = String::new();
    for target in Target::builtins() {
        let _ = writeln!(
            out,
            "{:<9} {:<6} {:?}  {}  {}",
            target.id,
            target.language.name(),
            target.style,
            target.page_path,
            target.test_path
        );
    }
    out
}
