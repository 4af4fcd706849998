//! Testing utilities for QA Forge workspace
//!
//! Shared fixtures: requirements, completion texts and scenarios.

#![allow(missing_docs)]

use chrono::{DateTime, TimeZone, Utc};
use qa_model::{Requirement, Scenario, TestCase};

/// Completion text with a single well-formed login case
pub const LOGIN_COMPLETION: &str = "\
Test Case 1:
Test Case Title: Login succeeds
1. Test Steps:
- Enter username
- Enter password
2. Expected Results:
- User is redirected to dashboard
";

/// Completion text in the shape a model typically returns, with prose noise
pub const CART_COMPLETION: &str = "\
Here are the test scenarios for the shopping cart requirement.

**Test Case 1:**
**Test Case Title:** Add single item to cart
1. **Test Steps:**
- Log in as standard user
- Click \"Add to cart\" on the first product
2. **Expected Results:**
- Cart badge shows 1
3. **Test Data Requirements:**
- Username: standard_user
- Password: secret_sauce

**Test Case 2:**
**Test Case Title:** Remove item from cart
1. **Test Steps:**
- Add an item to the cart
- Open the cart page
- Click \"Remove\"
2. **Expected Results:**
- Cart is empty
- Cart badge is hidden

Let me know if you need more scenarios.
";

pub fn login_requirement() -> Requirement {
    Requirement::new(101, "User Login and Authentication")
        .with_description("<div>Users sign in with <b>username</b> &amp; password.</div>")
        .with_acceptance_criteria("<ul><li>Valid credentials open the inventory</li></ul>")
}

pub fn cart_requirement() -> Requirement {
    Requirement::new(102, "Add Items to Cart and Verify on Cart Page")
        .with_description("Shoppers can add and remove products.")
}

pub fn test_case(title: &str) -> TestCase {
    TestCase::new(title).unwrap()
}

pub fn test_case_with_steps(title: &str, steps: &[&str]) -> TestCase {
    test_case(title).with_steps(steps.iter().copied())
}

/// Scenario with one case per title
pub fn scenario_with_titles(requirement: &Requirement, titles: &[&str]) -> Scenario {
    let cases = titles.iter().map(|t| test_case(t)).collect();
    Scenario::new(requirement.id, &requirement.title, cases).unwrap()
}

pub fn login_scenario() -> Scenario {
    let case = test_case_with_steps("Login succeeds", &["Enter username", "Enter password"])
        .with_expected_results(["User is redirected to dashboard"]);
    let requirement = login_requirement();
    Scenario::new(requirement.id, &requirement.title, vec![case]).unwrap()
}

/// Fixed timestamp for reproducible run ids
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 15, 7).unwrap()
}
