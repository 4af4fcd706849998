//! Parser and assembler integration tests

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use qa_model::{MemorySink, PipelineEvent, TestCase};
use qa_parser::{ResponseParser, ScenarioAssembler};
use qa_test_utils::{cart_requirement, login_requirement, CART_COMPLETION, LOGIN_COMPLETION};
use std::sync::Arc;

#[test]
fn login_completion_parses_exactly() {
    let cases = ResponseParser::new().parse(LOGIN_COMPLETION);
    let expected = TestCase::new("Login succeeds")
        .unwrap()
        .with_steps(["Enter username", "Enter password"])
        .with_expected_results(["User is redirected to dashboard"]);
    assert_eq!(cases, vec![expected]);
}

#[test]
fn markdown_heavy_completion() {
    let cases = ResponseParser::new().parse(CART_COMPLETION);
    assert_eq!(cases.len(), 2);

    let add = &cases[0];
    assert_eq!(add.title(), "Add single item to cart");
    assert_eq!(add.steps.len(), 2);
    assert_eq!(add.expected_results, vec!["Cart badge shows 1"]);
    assert_eq!(add.test_data["Username"], "standard_user");
    assert_eq!(add.test_data["Password"], "secret_sauce");

    let remove = &cases[1];
    assert_eq!(remove.title(), "Remove item from cart");
    assert_eq!(remove.steps.len(), 3);
    assert_eq!(remove.expected_results, vec!["Cart is empty", "Cart badge is hidden"]);
    assert!(remove.test_data.is_empty());
}

#[test]
fn parse_reports_completion_event() {
    let sink = Arc::new(MemorySink::new());
    let parser = ResponseParser::new().with_sink(sink.clone());
    let _ = parser.parse(CART_COMPLETION);
    assert_eq!(
        sink.events(),
        vec![PipelineEvent::ParseCompleted {
            blocks_seen: 2,
            blocks_dropped: 0,
            cases: 2,
        }]
    );
}

#[test]
fn assembler_without_markers_falls_back() {
    let requirement = login_requirement();
    let scenario = ScenarioAssembler::default().assemble(&requirement, "No structured output here.");
    assert_eq!(scenario.len(), 1);
    assert!(scenario.test_cases()[0].title().contains(&requirement.title));
    assert_eq!(
        scenario.test_cases()[0].steps[0],
        "Review requirement: Users sign in with username & password."
    );
}

#[test]
fn assembler_keeps_parsed_cases() {
    let scenario = ScenarioAssembler::default().assemble(&cart_requirement(), CART_COMPLETION);
    assert_eq!(scenario.len(), 2);
    assert_eq!(scenario.requirement_id(), 102);
}

proptest! {
    #[test]
    fn text_without_markers_yields_nothing(text in "[a-zA-Z0-9 .:\\-\n]{0,200}") {
        prop_assume!(!text.to_lowercase().contains("test"));
        prop_assert!(ResponseParser::new().parse(&text).is_empty());
    }

    #[test]
    fn parse_never_panics(text in "\\PC{0,400}") {
        let _ = ResponseParser::new().parse(&text);
    }

    #[test]
    fn assembled_scenario_is_never_empty(text in "\\PC{0,200}", title in "[A-Za-z ]{0,20}") {
        let requirement = qa_model::Requirement::new(1, title);
        let scenario = ScenarioAssembler::default().assemble(&requirement, &text);
        prop_assert!(!scenario.is_empty());
    }

    #[test]
    fn every_titled_block_yields_a_case(titles in prop::collection::vec("[A-Za-z][A-Za-z ]{0,15}", 1..6)) {
        let text: String = titles
            .iter()
            .enumerate()
            .map(|(i, t)| format!("Test Case {}:\nTest Case Title: {}\n1. Test Steps:\n- step\n", i + 1, t))
            .collect();
        let cases = ResponseParser::new().parse(&text);
        prop_assert_eq!(cases.len(), titles.len());
        for (case, title) in cases.iter().zip(&titles) {
            prop_assert_eq!(case.title(), title.trim());
        }
    }
}
