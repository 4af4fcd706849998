//! Pipeline configuration
//!
//! Loaded from TOML; every field has a default so a partial file is valid.
//!
//! ```toml
//! output_root = "generated"
//! targets = ["pytest", "unittest", "testng"]
//! execution_timeout_secs = 120
//!
//! [runner]
//! target = "pytest"
//! program = "python3"
//! ```

use crate::error::{PipelineError, PipelineResult};
use qa_emit::{Language, Target, DEFAULT_BASE_URL_ENV};
use qa_parser::DEFAULT_MAX_INPUT_BYTES;
use qa_runner::{OutputFormat, ProcessRunner};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How generated suites are executed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Target whose suites are executed
    pub target: String,
    /// Program to run instead of `python`
    pub program: Option<String>,
    /// Arguments; `{path}`, `{module}` and `{dir}` are expanded per suite
    pub args: Option<Vec<String>>,
    /// Console format of the runner's output
    pub format: Option<OutputFormat>,
    /// Working directory instead of the target directory
    pub working_dir: Option<PathBuf>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            target: "unittest".to_string(),
            program: None,
            args: None,
            format: None,
            working_dir: None,
        }
    }
}

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory generated sources are written under
    pub output_root: PathBuf,
    /// Directory execution reports are written to
    pub results_dir: PathBuf,
    /// Target ids to generate, in emission order
    pub targets: Vec<String>,
    /// Largest completion text parsed; longer text falls back
    pub max_input_bytes: usize,
    /// Time limit for one completion request
    pub completion_timeout_secs: u64,
    /// Time limit for locating and running one scenario's suite
    pub execution_timeout_secs: u64,
    /// Environment variable the generated suites read the base URL from
    pub base_url_env: String,
    /// Execution settings
    pub runner: RunnerConfig,
}

impl PipelineConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    /// - `PipelineError::ConfigFormat` if the text is not valid TOML or has wrongly typed fields
    /// - `PipelineError::Config` if the values fail [`validate`](Self::validate)
    pub fn from_toml_str(text: &str) -> PipelineResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// - `PipelineError::Io` if the file cannot be read
    /// - see [`from_toml_str`](Self::from_toml_str)
    pub fn load(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| PipelineError::io_error(path, e))?;
        Self::from_toml_str(&text)
    }

    /// With output root
    #[inline]
    #[must_use]
    pub fn with_output_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_root = dir.into();
        self
    }

    /// With results directory
    #[inline]
    #[must_use]
    pub fn with_results_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.results_dir = dir.into();
        self
    }

    /// With target ids
    #[must_use]
    pub fn with_targets<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.targets = ids.into_iter().map(Into::into).collect();
        self
    }

    /// With completion size limit
    #[inline]
    #[must_use]
    pub fn with_max_input_bytes(mut self, max: usize) -> Self {
        self.max_input_bytes = max;
        self
    }

    /// With completion timeout
    #[inline]
    #[must_use]
    pub fn with_completion_timeout(mut self, secs: u64) -> Self {
        self.completion_timeout_secs = secs;
        self
    }

    /// With execution timeout
    #[inline]
    #[must_use]
    pub fn with_execution_timeout(mut self, secs: u64) -> Self {
        self.execution_timeout_secs = secs;
        self
    }

    /// With base-URL environment variable
    #[inline]
    #[must_use]
    pub fn with_base_url_env(mut self, env: impl Into<String>) -> Self {
        self.base_url_env = env.into();
        self
    }

    /// With runner settings
    #[inline]
    #[must_use]
    pub fn with_runner(mut self, runner: RunnerConfig) -> Self {
        self.runner = runner;
        self
    }

    /// Completion time limit
    #[inline]
    #[must_use]
    pub fn completion_timeout(&self) -> Duration {
        Duration::from_secs(self.completion_timeout_secs)
    }

    /// Execution time limit per scenario
    #[inline]
    #[must_use]
    pub fn execution_timeout(&self) -> Duration {
        Duration::from_secs(self.execution_timeout_secs)
    }

    /// Check values that serde cannot
    ///
    /// # Errors
    /// - `PipelineError::Config` naming the first offending value
    pub fn validate(&self) -> PipelineResult<()> {
        if self.targets.is_empty() {
            return Err(PipelineError::config("no targets configured"));
        }
        if let Some(id) = self.targets.iter().find(|id| Target::builtin(id).is_none()) {
            return Err(PipelineError::config(format!("unknown target '{id}'")));
        }
        if self.completion_timeout_secs == 0 {
            return Err(PipelineError::config("completion_timeout_secs must be positive"));
        }
        if self.execution_timeout_secs == 0 {
            return Err(PipelineError::config("execution_timeout_secs must be positive"));
        }
        if self.max_input_bytes == 0 {
            return Err(PipelineError::config("max_input_bytes must be positive"));
        }
        if self.base_url_env.trim().is_empty() {
            return Err(PipelineError::config("base_url_env must not be empty"));
        }

        let runner = &self.runner.target;
        match Target::builtin(runner) {
            None => Err(PipelineError::config(format!("unknown runner target '{runner}'"))),
            Some(target) if target.language != Language::Python => Err(PipelineError::config(format!(
                "runner target '{runner}' has no supported output format"
            ))),
            Some(_) if !self.targets.contains(runner) => Err(PipelineError::config(format!(
                "runner target '{runner}' is not among the generated targets"
            ))),
            Some(_) => Ok(()),
        }
    }

    /// Configured targets, in order, carrying the configured base-URL variable
    ///
    /// # Errors
    /// - `PipelineError::Config` for an unknown target id
    pub fn resolve_targets(&self) -> PipelineResult<Vec<Target>> {
        self.targets.iter().map(|id| self.resolve(id)).collect()
    }

    /// Process runner for the configured runner target
    ///
    /// # Errors
    /// - `PipelineError::Config` for an unknown runner target
    pub fn process_runner(&self) -> PipelineResult<ProcessRunner> {
        let settings = &self.runner;
        let mut runner = ProcessRunner::new(&self.output_root, self.resolve(&settings.target)?);
        if settings.program.is_some() || settings.args.is_some() {
            runner = runner.with_command(
                settings.program.clone().unwrap_or_else(|| "python".to_string()),
                settings.args.clone().unwrap_or_default(),
            );
        }
        if let Some(format) = settings.format {
            runner = runner.with_format(format);
        }
        if let Some(dir) = &settings.working_dir {
            runner = runner.with_working_dir(dir);
        }
        Ok(runner)
    }

    fn resolve(&self, id: &str) -> PipelineResult<Target> {
        Target::builtin(id)
            .map(|t| t.with_base_url_env(&self.base_url_env))
            .ok_or_else(|| PipelineError::config(format!("unknown target '{id}'")))
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from("generated"),
            results_dir: PathBuf::from("test-results"),
            targets: vec!["pytest".to_string(), "unittest".to_string()],
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            completion_timeout_secs: 60,
            execution_timeout_secs: 300,
            base_url_env: DEFAULT_BASE_URL_ENV.to_string(),
            runner: RunnerConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_valid() {
        let config = PipelineConfig::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.targets, vec!["pytest", "unittest"]);
        assert_eq!(config.completion_timeout(), Duration::from_secs(60));
        assert_eq!(config.execution_timeout(), Duration::from_secs(300));
        assert_eq!(config.base_url_env, "TEST_WEBSITE_URL");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = PipelineConfig::from_toml_str(
            r#"
            output_root = "out"
            targets = ["pytest", "testng"]
            base_url_env = "APP_URL"

            [runner]
            target = "pytest"
            program = "python3"
            format = "pytest"
            "#,
        )
        .unwrap();

        assert_eq!(config.output_root, PathBuf::from("out"));
        assert_eq!(config.results_dir, PathBuf::from("test-results"));
        assert_eq!(config.execution_timeout_secs, 300);
        assert_eq!(config.runner.program.as_deref(), Some("python3"));
        assert_eq!(config.runner.format, Some(OutputFormat::Pytest));

        let targets = config.resolve_targets().unwrap();
        let ids: Vec<_> = targets.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["pytest", "testng"]);
        assert!(targets.iter().all(|t| t.base_url_env == "APP_URL"));
    }

    #[test]
    fn unknown_target_rejected() {
        let err = PipelineConfig::new().with_targets(["pytest", "cypress"]).validate().unwrap_err();
        assert_eq!(err.to_string(), "configuration error: unknown target 'cypress'");
    }

    #[test]
    fn zero_timeouts_rejected() {
        assert!(PipelineConfig::new().with_completion_timeout(0).validate().is_err());
        assert!(PipelineConfig::new().with_execution_timeout(0).validate().is_err());
    }

    #[test]
    fn runner_target_must_be_generated_python() {
        let not_generated = PipelineConfig::new().with_targets(["pytest"]);
        assert!(not_generated.validate().is_err());

        let java = PipelineConfig::new()
            .with_targets(["testng"])
            .with_runner(RunnerConfig {
                target: "testng".to_string(),
                ..RunnerConfig::default()
            });
        assert!(java.validate().unwrap_err().to_string().contains("no supported output format"));
    }

    #[test]
    fn malformed_toml_is_format_error() {
        let err = PipelineConfig::from_toml_str("targets = 3").unwrap_err();
        assert!(matches!(err, PipelineError::ConfigFormat(_)));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = PipelineConfig::load(dir.path().join("qa-forge.toml")).unwrap_err();
        assert!(matches!(err, PipelineError::Io { .. }));
    }

    #[test]
    fn demo_config_is_valid() {
        let config = PipelineConfig::from_toml_str(include_str!("../../../demos/qa-forge.toml")).unwrap();
        assert_eq!(config.targets.len(), 3);
        assert_eq!(config.runner.format, Some(OutputFormat::Unittest));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("qa-forge.toml");
        std::fs::write(&path, "completion_timeout_secs = 5\n").unwrap();
        assert_eq!(PipelineConfig::load(&path).unwrap().completion_timeout_secs, 5);
    }
}
