//! End-to-end pipeline tests

use mockall::mock;
use pretty_assertions::assert_eq;
use qa_core::{DirectoryCompletions, Pipeline, PipelineConfig, PipelineError, RunnerConfig};
use qa_model::{ExecutionResult, ExecutionStatus, MemorySink, PipelineEvent, Requirement, Scenario};
use qa_runner::{RunResult, TestRunner, TestUnitHandle, MODULE_IMPORT};
use qa_test_utils::{cart_requirement, fixed_time, login_requirement, CART_COMPLETION, LOGIN_COMPLETION};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

mock! {
    Runner {}

    #[async_trait::async_trait]
    impl TestRunner for Runner {
        async fn locate(&self, scenario: &Scenario) -> RunResult<TestUnitHandle>;
        async fn execute(&self, handle: &TestUnitHandle) -> RunResult<Vec<ExecutionResult>>;
    }
}

fn workspace() -> (TempDir, PipelineConfig) {
    let dir = TempDir::new().unwrap();
    let completions = dir.path().join("completions");
    std::fs::create_dir_all(&completions).unwrap();
    std::fs::write(completions.join("101.txt"), LOGIN_COMPLETION).unwrap();
    std::fs::write(completions.join("102.txt"), CART_COMPLETION).unwrap();

    let config = PipelineConfig::new()
        .with_output_root(dir.path().join("generated"))
        .with_results_dir(dir.path().join("test-results"));
    (dir, config)
}

fn requirements() -> Vec<Requirement> {
    vec![
        login_requirement(),
        cart_requirement(),
        Requirement::new(103, "Checkout").with_description("Pay for the cart."),
    ]
}

fn pass_and_fail_runner() -> MockRunner {
    let mut runner = MockRunner::new();
    runner.expect_locate().returning(|s| {
        Ok(TestUnitHandle {
            scenario: s.reference(),
            path: PathBuf::from("suite.py"),
            module: "suite".to_string(),
            dir: PathBuf::from("."),
        })
    });
    runner.expect_execute().returning(|h| {
        let id = h.scenario.requirement_id;
        Ok(vec![
            ExecutionResult::passed(id, "test_ok"),
            ExecutionResult::failed(id, "test_broken", "AssertionError"),
        ])
    });
    runner
}

#[tokio::test]
async fn generate_writes_every_target_and_falls_back() {
    let (dir, config) = workspace();
    let sink = Arc::new(MemorySink::new());
    let pipeline = Pipeline::new(config, Arc::new(DirectoryCompletions::new(dir.path().join("completions"))))
        .unwrap()
        .with_sink(sink.clone());

    let outcome = pipeline.generate(&requirements()).await;

    let counts: Vec<_> = outcome.scenarios.iter().map(Scenario::len).collect();
    assert_eq!(counts, vec![1, 2, 1]);
    assert_eq!(
        outcome.scenarios[2].test_cases()[0].title(),
        "Default test for: Checkout"
    );
    assert!(outcome.render_failures.is_empty());
    // page and suite per scenario per target
    assert_eq!(outcome.artifacts.len(), 3 * 2 * 2);

    let suite = dir
        .path()
        .join("generated/unittest/tests/test_user_login_and_authentication.py");
    let content = std::fs::read_to_string(suite).unwrap();
    assert!(content.contains("def test_login_succeeds(self):"));
    assert!(dir.path().join("generated/pytest/pages/checkout_page.py").exists());

    assert_eq!(
        sink.count(|e| matches!(e, PipelineEvent::CompletionFailed { requirement_id: 103, .. })),
        1
    );
    assert_eq!(sink.count(|e| matches!(e, PipelineEvent::ArtifactWritten { .. })), 12);
}

#[tokio::test]
async fn run_aggregates_and_persists_report() {
    let (dir, config) = workspace();
    let sink = Arc::new(MemorySink::new());
    let pipeline = Pipeline::new(config, Arc::new(DirectoryCompletions::new(dir.path().join("completions"))))
        .unwrap()
        .with_runner(Arc::new(pass_and_fail_runner()))
        .with_sink(sink.clone());

    let outcome = pipeline.run_at(fixed_time(), &requirements()[..2]).await.unwrap();

    assert_eq!(outcome.report.total_scenarios, 2);
    assert_eq!((outcome.report.passed_tests, outcome.report.failed_tests), (2, 2));
    assert!(outcome.has_failures());
    assert_eq!(
        outcome.report_path,
        dir.path().join("test-results/test_execution_20260302_091507.json")
    );

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&outcome.report_path).unwrap()).unwrap();
    assert_eq!(json["scenario_results"][1]["requirement_title"], "Add Items to Cart and Verify on Cart Page");
    assert_eq!(json["scenario_results"][0]["test_cases"][1]["error"], "AssertionError");
    assert_eq!(
        sink.count(|e| matches!(e, PipelineEvent::ReportPersisted { .. })),
        1
    );
}

#[tokio::test]
async fn unwritable_results_dir_is_fatal() {
    let (dir, config) = workspace();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();

    let pipeline = Pipeline::new(
        config.with_results_dir(&blocker),
        Arc::new(DirectoryCompletions::new(dir.path().join("completions"))),
    )
    .unwrap()
    .with_runner(Arc::new(pass_and_fail_runner()));

    let err = pipeline.run(&[login_requirement()]).await.unwrap_err();
    assert!(matches!(err, PipelineError::Persistence(_)));
}

#[cfg(unix)]
#[tokio::test]
async fn configured_process_runner_executes_generated_suites() {
    let (dir, config) = workspace();
    let config = config.with_runner(RunnerConfig {
        target: "unittest".to_string(),
        program: Some("sh".to_string()),
        args: Some(vec![
            "-c".to_string(),
            "echo 'test_login_succeeds ({module}.TestX.test_login_succeeds) ... ok' >&2".to_string(),
        ]),
        ..RunnerConfig::default()
    });
    let pipeline =
        Pipeline::new(config, Arc::new(DirectoryCompletions::new(dir.path().join("completions")))).unwrap();

    let outcome = pipeline.run_at(fixed_time(), &[login_requirement()]).await.unwrap();

    let results = &outcome.report.scenario_results[0].test_cases;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "test_login_succeeds");
    assert_eq!(results[0].status, ExecutionStatus::Passed);
    assert!(!outcome.has_failures());
}

#[tokio::test]
async fn missing_suite_becomes_error_result() {
    let (dir, config) = workspace();
    let pipeline = Pipeline::new(config, Arc::new(DirectoryCompletions::new(dir.path().join("completions"))))
        .unwrap()
        .with_runner(Arc::new(qa_runner::ProcessRunner::new(
            dir.path().join("elsewhere"),
            qa_emit::Target::unittest(),
        )));

    let outcome = pipeline.run_at(fixed_time(), &[login_requirement()]).await.unwrap();
    let result = &outcome.report.scenario_results[0].test_cases[0];
    assert_eq!(result.name, MODULE_IMPORT);
    assert_eq!(result.status, ExecutionStatus::Error);
}
