//! Completion request text

use qa_model::Requirement;
use serde::Serialize;

/// Fixed instruction sent with every completion request
pub const SYSTEM_PROMPT: &str = "You are a test automation expert. Generate detailed, \
practical test scenarios that can be automated using Selenium.";

/// A completion request for one requirement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prompt {
    /// Instruction framing the assistant
    pub system: String,
    /// Request naming the requirement and the expected answer layout
    pub user: String,
}

/// Build the request asking for test cases covering `requirement`
///
/// The answer layout it asks for (numbered test cases with a titled header
/// and numbered sections) is the one the response parser reads.
#[must_use]
pub fn build_prompt(requirement: &Requirement) -> Prompt {
    let user = format!(
        "Based on the following requirement, generate detailed test scenarios:\n\
         \n\
         Title: {title}\n\
         Description: {description}\n\
         Acceptance Criteria: {criteria}\n\
         \n\
         Start each test case with \"Test Case <n>:\" followed by a \"Test Case Title:\" line.\n\
         For each test case, provide:\n\
         1. Test case title\n\
         2. Test steps\n\
         3. Expected results\n\
         4. Test data requirements\n",
        title = requirement.title,
        description = requirement.plain_description(),
        criteria = requirement.plain_acceptance_criteria(),
    );
    Prompt {
        system: SYSTEM_PROMPT.to_string(),
        user,
    }
}
