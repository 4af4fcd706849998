//! Process-backed test runner
//!
//! Locates a scenario's suite through its [`Target`] path function and runs
//! a configured command on it. Arguments may use the placeholders `{path}`
//! (suite file), `{module}` (dotted module under the target directory) and
//! `{dir}` (target directory).

use crate::error::{ExecutionError, RunResult};
use crate::output::OutputFormat;
use crate::runner::{TestRunner, TestUnitHandle};
use qa_emit::Target;
use qa_model::{ExecutionResult, Scenario};
use std::path::{Path, PathBuf};
use std::process::Stdio;

/// Lines of stderr kept when reporting an import failure
const STDERR_TAIL_LINES: usize = 20;

/// Runs generated suites as child processes
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    output_root: PathBuf,
    target: Target,
    program: String,
    args: Vec<String>,
    format: OutputFormat,
    working_dir: Option<PathBuf>,
}

impl ProcessRunner {
    /// Create runner for suites of `target` under `output_root`
    ///
    /// Defaults to `python -m pytest -v {path}` for the pytest target and
    /// `python -m unittest -v {module}` otherwise, run from the target directory.
    #[must_use]
    pub fn new(output_root: impl Into<PathBuf>, target: Target) -> Self {
        let (format, args) = if target.id == "pytest" {
            (OutputFormat::Pytest, ["-m", "pytest", "-v", "{path}"])
        } else {
            (OutputFormat::Unittest, ["-m", "unittest", "-v", "{module}"])
        };
        Self {
            output_root: output_root.into(),
            target,
            program: "python".to_string(),
            args: args.iter().map(ToString::to_string).collect(),
            format,
            working_dir: None,
        }
    }

    /// With command
    #[must_use]
    pub fn with_command(mut self, program: impl Into<String>, args: Vec<String>) -> Self {
        self.program = program.into();
        self.args = args;
        self
    }

    /// With output format
    #[inline]
    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// With working directory (defaults to the target directory)
    #[inline]
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Arguments with placeholders expanded for `handle`
    #[must_use]
    pub fn expand_args(&self, handle: &TestUnitHandle) -> Vec<String> {
        let path = handle.path.display().to_string();
        let dir = handle.dir.display().to_string();
        self.args
            .iter()
            .map(|arg| {
                arg.replace("{path}", &path)
                    .replace("{module}", &handle.module)
                    .replace("{dir}", &dir)
            })
            .collect()
    }
}

/// Dotted module name of `path` relative to `dir`, without extension
fn module_name(path: &Path, dir: &Path) -> String {
    let relative = path.strip_prefix(dir).unwrap_or(path).with_extension("");
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(".")
}

fn tail(text: &str, lines: usize) -> String {
    let all: Vec<_> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    all[all.len().saturating_sub(lines)..].join("\n")
}

#[async_trait::async_trait]
impl TestRunner for ProcessRunner {
    async fn locate(&self, scenario: &Scenario) -> RunResult<TestUnitHandle> {
        let path = self.output_root.join(self.target.test_path_for(scenario.requirement_title()));
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(ExecutionError::NotFound(path));
        }
        let dir = self.output_root.join(&self.target.id);
        Ok(TestUnitHandle {
            scenario: scenario.reference(),
            module: module_name(&path, &dir),
            path,
            dir,
        })
    }

    async fn execute(&self, handle: &TestUnitHandle) -> RunResult<Vec<ExecutionResult>> {
        let args = self.expand_args(handle);
        let cwd = self.working_dir.clone().unwrap_or_else(|| handle.dir.clone());
        tracing::debug!(program = %self.program, ?args, cwd = %cwd.display(), "running suite");

        let output = tokio::process::Command::new(&self.program)
            .args(&args)
            .current_dir(&cwd)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ExecutionError::spawn(&self.program, e))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let combined = format!("{stdout}\n{stderr}");
        let results = self.format.parse(handle.scenario.requirement_id, &combined);

        if results.is_empty() && !output.status.success() {
            let detail = tail(if stderr.trim().is_empty() { &stdout } else { &stderr }, STDERR_TAIL_LINES);
            return Err(ExecutionError::import(&handle.module, detail));
        }
        Ok(results)
    }
}
