//! Renderers and their registry
//!
//! A [`Renderer`] turns views into source text for one template set. The
//! built-in sets are askama templates compiled into the crate; further sets
//! can be registered at runtime under their own key.

use crate::error::{RenderError, RenderResult};
use crate::view::{PageView, SuiteView};
use askama::Template;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Renders page and suite views for one template set
pub trait Renderer: Send + Sync {
    /// Template-set key
    fn id(&self) -> &str;

    /// Render the page-object source
    ///
    /// # Errors
    /// - `RenderError::Template` if the template engine fails
    fn render_page(&self, view: &PageView) -> RenderResult<String>;

    /// Render the suite source
    ///
    /// # Errors
    /// - `RenderError::Template` if the template engine fails
    fn render_suite(&self, view: &SuiteView) -> RenderResult<String>;
}

#[derive(Template)]
#[template(path = "python/page.py", escape = "none")]
struct PythonPage<'a> {
    page: &'a PageView,
}

#[derive(Template)]
#[template(path = "pytest/suite.py", escape = "none")]
struct PytestSuite<'a> {
    suite: &'a SuiteView,
}

#[derive(Template)]
#[template(path = "unittest/suite.py", escape = "none")]
struct UnittestSuite<'a> {
    suite: &'a SuiteView,
}

#[derive(Template)]
#[template(path = "testng/page.java", escape = "none")]
struct TestNgPage<'a> {
    page: &'a PageView,
}

#[derive(Template)]
#[template(path = "testng/suite.java", escape = "none")]
struct TestNgSuite<'a> {
    suite: &'a SuiteView,
}

fn render_with(template: &impl Template, name: &str) -> RenderResult<String> {
    template.render().map_err(|e| RenderError::template(name, e))
}

/// Flat pytest functions with fixtures
#[derive(Debug, Clone, Copy, Default)]
pub struct PytestRenderer;

impl Renderer for PytestRenderer {
    fn id(&self) -> &str {
        "pytest"
    }

    fn render_page(&self, view: &PageView) -> RenderResult<String> {
        render_with(&PythonPage { page: view }, "python/page.py")
    }

    fn render_suite(&self, view: &SuiteView) -> RenderResult<String> {
        render_with(&PytestSuite { suite: view }, "pytest/suite.py")
    }
}

/// `unittest.TestCase` class with setUp/tearDown
#[derive(Debug, Clone, Copy, Default)]
pub struct UnittestRenderer;

impl Renderer for UnittestRenderer {
    fn id(&self) -> &str {
        "unittest"
    }

    fn render_page(&self, view: &PageView) -> RenderResult<String> {
        render_with(&PythonPage { page: view }, "python/page.py")
    }

    fn render_suite(&self, view: &SuiteView) -> RenderResult<String> {
        render_with(&UnittestSuite { suite: view }, "unittest/suite.py")
    }
}

/// TestNG class with `@BeforeMethod`/`@AfterMethod`
#[derive(Debug, Clone, Copy, Default)]
pub struct TestNgRenderer;

impl Renderer for TestNgRenderer {
    fn id(&self) -> &str {
        "testng"
    }

    fn render_page(&self, view: &PageView) -> RenderResult<String> {
        render_with(&TestNgPage { page: view }, "testng/page.java")
    }

    fn render_suite(&self, view: &SuiteView) -> RenderResult<String> {
        render_with(&TestNgSuite { suite: view }, "testng/suite.java")
    }
}

/// Renderers keyed by template-set id
#[derive(Clone, Default)]
pub struct RendererRegistry {
    renderers: BTreeMap<String, Arc<dyn Renderer>>,
}

impl std::fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RendererRegistry")
            .field("template_sets", &self.template_sets())
            .finish()
    }
}

impl RendererRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create registry with the built-in template sets
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(PytestRenderer);
        registry.register(UnittestRenderer);
        registry.register(TestNgRenderer);
        registry
    }

    /// Register a renderer under its id, replacing any previous one
    pub fn register<R: Renderer + 'static>(&mut self, renderer: R) {
        self.renderers.insert(renderer.id().to_string(), Arc::new(renderer));
    }

    /// Renderer for a template set
    ///
    /// # Errors
    /// - `RenderError::UnknownTemplateSet` if nothing is registered under `id`
    pub fn get(&self, id: &str) -> RenderResult<&dyn Renderer> {
        self.renderers
            .get(id)
            .map(|r| &**r)
            .ok_or_else(|| RenderError::UnknownTemplateSet(id.to_string()))
    }

    /// Check if a template set is registered
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.renderers.contains_key(id)
    }

    /// Registered template-set ids, sorted
    #[must_use]
    pub fn template_sets(&self) -> Vec<&str> {
        self.renderers.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::{LocatorHint, LocatorStrategy};
    use crate::target::Target;
    use qa_model::{Scenario, TestCase};

    fn scenario() -> Scenario {
        let case = TestCase::new("Login succeeds")
            .unwrap()
            .with_steps(["Enter username"])
            .with_expected_results(["Dashboard shown"]);
        Scenario::new(1, "User Login", vec![case, TestCase::new("Empty").unwrap()]).unwrap()
    }

    #[test]
    fn defaults_cover_builtin_targets() {
        let registry = RendererRegistry::with_defaults();
        assert_eq!(registry.template_sets(), vec!["pytest", "testng", "unittest"]);
        for target in Target::builtins() {
            assert!(registry.contains(&target.template_set));
        }
        assert!(matches!(
            registry.get("cypress"),
            Err(RenderError::UnknownTemplateSet(id)) if id == "cypress"
        ));
    }

    #[test]
    fn unittest_suite_has_class_scaffolding() {
        let target = Target::unittest();
        let view = SuiteView::build(&scenario(), &target);
        let out = UnittestRenderer.render_suite(&view).unwrap();
        assert!(out.contains("class TestUserLogin(unittest.TestCase):"));
        assert!(out.contains("def setUp(self):"));
        assert!(out.contains("def tearDown(self):"));
        assert!(out.contains("from pages.user_login_page import UserLoginPage"));
        assert!(out.contains("os.getenv(\"TEST_WEBSITE_URL\")"));
        assert_eq!(out.matches("    def test_").count(), 2);
        assert_eq!(out.matches("self.page.navigate_to(self.base_url)").count(), 2);
        assert!(out.contains("# Step: Enter username"));
        assert!(out.contains("# Expect: Dashboard shown"));
    }

    #[test]
    fn pytest_suite_is_flat() {
        let view = SuiteView::build(&scenario(), &Target::pytest());
        let out = PytestRenderer.render_suite(&view).unwrap();
        assert!(!out.contains("class "));
        assert_eq!(out.matches("\ndef test_").count(), 2);
        assert!(out.contains("def test_login_succeeds(page):"));
        assert_eq!(out.matches("page.navigate_to(BASE_URL)").count(), 2);
    }

    #[test]
    fn python_page_declares_locators() {
        let hints = [LocatorHint::new("add to cart", LocatorStrategy::Id, "add-to-cart")];
        let view = PageView::build(&scenario(), &Target::unittest(), &hints);
        let out = UnittestRenderer.render_page(&view).unwrap();
        assert!(out.contains("class UserLoginPage:"));
        assert!(out.contains("add_to_cart_locator = (By.ID, \"add-to-cart\")"));
        assert!(out.contains("def add_to_cart(self):"));
        assert!(out.contains("def navigate_to(self, url):"));
    }

    #[test]
    fn testng_suite_has_annotations() {
        let mut case = TestCase::new("Login succeeds").unwrap();
        case.insert_labeled_data("Username", "standard_user");
        let scenario = Scenario::new(1, "User Login", vec![case]).unwrap();
        let view = SuiteView::build(&scenario, &Target::testng());
        let out = TestNgRenderer.render_suite(&view).unwrap();
        assert!(out.contains("public class TestUserLogin {"));
        assert!(out.contains("@BeforeMethod"));
        assert!(out.contains("@AfterMethod"));
        assert_eq!(out.matches("@Test\n").count(), 1);
        assert!(out.contains("public void testLoginSucceeds() {"));
        assert!(out.contains("page.navigateTo(baseUrl);"));
        assert!(out.contains("testData.put(\"Username\", \"standard_user\");"));
    }

    #[test]
    fn testng_page_declares_locators() {
        let hints = [LocatorHint::new("cart badge", LocatorStrategy::Css, ".shopping_cart_badge")];
        let view = PageView::build(&scenario(), &Target::testng(), &hints);
        let out = TestNgRenderer.render_page(&view).unwrap();
        assert!(out.contains("package pages;"));
        assert!(out.contains("public class UserLoginPage {"));
        assert!(out.contains("private final By cartBadgeLocator = By.cssSelector(\".shopping_cart_badge\");"));
        assert!(out.contains("public WebElement cartBadge() {"));
    }
}
