//! Emission integration tests

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use qa_emit::{
    ArtifactKind, ArtifactStore, CodeEmitter, FsArtifactStore, LocatorHint, LocatorStrategy, StaticLocators,
    Target,
};
use qa_model::{Scenario, TestCase};
use qa_test_utils::{login_scenario, scenario_with_titles, test_case, cart_requirement, login_requirement};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn emitter(dir: &TempDir) -> CodeEmitter {
    CodeEmitter::new(Arc::new(FsArtifactStore::new(dir.path())))
}

#[test]
fn class_style_suite_has_one_method_per_case() {
    let dir = TempDir::new().unwrap();
    let scenario = scenario_with_titles(&cart_requirement(), &["Add item", "Remove item", "Empty cart", "Add item"]);
    let artifacts = emitter(&dir).render(&scenario, &Target::unittest()).unwrap();

    let suites: Vec<_> = artifacts.iter().filter(|a| a.kind == ArtifactKind::Suite).collect();
    assert_eq!(suites.len(), 1);
    assert_eq!(suites[0].unit_count, 4);
    assert_eq!(suites[0].content.matches("    def test_").count(), 4);
    assert!(suites[0].content.contains("def test_add_item_2(self):"));
}

#[test]
fn emitting_twice_leaves_byte_identical_files() {
    let dir = TempDir::new().unwrap();
    let emitter = emitter(&dir);
    for target in Target::builtins() {
        let first = emitter.emit(&login_scenario(), &target).unwrap();
        let on_disk: Vec<Vec<u8>> = first
            .iter()
            .map(|a| std::fs::read(dir.path().join(&a.path)).unwrap())
            .collect();

        let second = emitter.emit(&login_scenario(), &target).unwrap();
        assert_eq!(first, second, "target {}", target.id);
        for (artifact, before) in second.iter().zip(&on_disk) {
            let after = std::fs::read(dir.path().join(&artifact.path)).unwrap();
            assert_eq!(&after, before, "{}", artifact.path.display());
            assert_eq!(after, artifact.content.as_bytes());
        }
    }
}

#[test]
fn page_members_survive_keyword_and_reserved_hint_names() {
    let dir = TempDir::new().unwrap();
    let scenario = login_scenario();
    let locators = StaticLocators::new()
        .with_hint(scenario.requirement_id(), LocatorHint::new("class", LocatorStrategy::Id, "cls"))
        .with_hint(scenario.requirement_id(), LocatorHint::new("navigate to", LocatorStrategy::Css, ".nav"));
    let emitter = emitter(&dir).with_locators(Arc::new(locators));

    let python = emitter.emit(&scenario, &Target::unittest()).unwrap();
    let page = &python[0].content;
    assert!(!page.contains("def class("));
    assert!(page.contains("def class_(self):"));
    assert!(page.contains("class__locator = (By.ID, \"cls\")"));
    assert_eq!(page.matches("def navigate_to(").count(), 1);
    assert!(page.contains("def navigate_to_2(self):"));
    assert!(page.contains("navigate_to_2_locator = (By.CSS_SELECTOR, \".nav\")"));

    let java = emitter.emit(&scenario, &Target::testng()).unwrap();
    let page = &java[0].content;
    assert!(!page.contains("WebElement class()"));
    assert!(page.contains("public WebElement classElement() {"));
    assert!(page.contains("private final By classElementLocator = By.id(\"cls\");"));
    assert_eq!(page.matches("public void navigateTo(").count(), 1);
    assert!(page.contains("public WebElement navigateTo_2() {"));
}

#[test]
fn empty_case_still_navigates() {
    let dir = TempDir::new().unwrap();
    let requirement = login_requirement();
    let scenario = Scenario::new(requirement.id, &requirement.title, vec![test_case("Nothing to do")]).unwrap();
    for target in Target::builtins() {
        let artifacts = emitter(&dir).render(&scenario, &target).unwrap();
        let suite = &artifacts[1];
        assert_eq!(suite.content.matches(target.navigation_step.as_str()).count(), 1, "target {}", target.id);
    }
}

#[test]
fn emit_writes_to_target_paths() {
    let dir = TempDir::new().unwrap();
    let emitter = emitter(&dir);
    emitter.emit(&login_scenario(), &Target::unittest()).unwrap();
    emitter.emit(&login_scenario(), &Target::testng()).unwrap();

    let root = dir.path();
    assert!(root.join("unittest/pages/user_login_and_authentication_page.py").is_file());
    assert!(root.join("unittest/tests/test_user_login_and_authentication.py").is_file());
    assert!(root.join("testng/src/main/java/pages/UserLoginAndAuthenticationPage.java").is_file());
    assert!(root.join("testng/src/test/java/tests/TestUserLoginAndAuthentication.java").is_file());
}

#[test]
fn colliding_titles_share_a_path_and_later_write_wins() {
    let dir = TempDir::new().unwrap();
    let emitter = emitter(&dir);
    let store = FsArtifactStore::new(dir.path());
    let target = Target::pytest();

    let first = Scenario::new(1, "User Login", vec![TestCase::new("First version").unwrap()]).unwrap();
    let second = Scenario::new(2, "user-login!", vec![TestCase::new("Second version").unwrap()]).unwrap();

    let a = emitter.emit(&first, &target).unwrap();
    let b = emitter.emit(&second, &target).unwrap();
    assert_eq!(a[1].path, b[1].path);

    let stored = store.read(&b[1].path).unwrap();
    assert!(stored.contains("def test_second_version(page):"));
    assert!(!stored.contains("first_version"));
}

#[test]
fn read_back_matches_rendered_content() {
    let dir = TempDir::new().unwrap();
    let artifacts = emitter(&dir).emit(&login_scenario(), &Target::pytest()).unwrap();
    let store = FsArtifactStore::new(dir.path());
    for artifact in artifacts {
        assert_eq!(store.read(Path::new(&artifact.path)).unwrap(), artifact.content);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn suite_unit_count_matches_cases(titles in prop::collection::vec("[A-Za-z0-9 !?-]{1,20}", 1..12)) {
        let titles: Vec<_> = titles.into_iter().filter(|t| !t.trim().is_empty()).collect();
        prop_assume!(!titles.is_empty());
        let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        let scenario = scenario_with_titles(&login_requirement(), &refs);
        let dir = TempDir::new().unwrap();
        for target in Target::builtins() {
            let artifacts = emitter(&dir).render(&scenario, &target).unwrap();
            prop_assert_eq!(artifacts[1].unit_count, titles.len());
            prop_assert_eq!(
                artifacts[1].content.matches(target.navigation_step.as_str()).count(),
                titles.len()
            );
        }
    }
}
