//! Target descriptors
//!
//! A [`Target`] says everything the engine needs to know about one output
//! flavour: which template set renders it, how titles become names, where
//! files go and which statement opens every test unit. Adding a target
//! means adding a descriptor and a template set; the engine is unchanged.

use qa_model::NamingRule;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding the site under test
pub const DEFAULT_BASE_URL_ENV: &str = "TEST_WEBSITE_URL";

/// Ids of the built-in targets
pub const BUILTIN_TARGET_IDS: [&str; 3] = ["pytest", "unittest", "testng"];

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class", "continue",
    "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if", "import", "in",
    "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with", "yield",
];

const JAVA_KEYWORDS: &[&str] = &[
    "_", "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "null", "package", "private", "protected", "public", "record", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient",
    "true", "try", "var", "void", "volatile", "while", "yield",
];

// Members of the page templates plus, for Java, the `Object` methods a
// no-argument accessor would clash with.
const PYTHON_PAGE_MEMBERS: &[&str] = &["driver", "wait", "navigate_to"];
const JAVA_PAGE_MEMBERS: &[&str] = &[
    "driver", "navigateTo", "getClass", "hashCode", "equals", "toString", "clone", "finalize",
    "notify", "notifyAll", "wait",
];

/// Output language of a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    /// Python 3
    Python,
    /// Java
    Java,
}

impl Language {
    /// Source file extension (without dot)
    #[inline]
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Language::Python => "py",
            Language::Java => "java",
        }
    }

    /// Human-readable name
    #[inline]
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Java => "java",
        }
    }

    /// Whether `name` is a reserved word
    #[must_use]
    pub fn is_keyword(self, name: &str) -> bool {
        match self {
            Language::Python => PYTHON_KEYWORDS.contains(&name),
            Language::Java => JAVA_KEYWORDS.contains(&name),
        }
    }

    /// `name` if usable as an identifier, otherwise a suffixed form
    #[must_use]
    pub fn escape_keyword(self, name: String) -> String {
        if !self.is_keyword(&name) {
            return name;
        }
        match self {
            Language::Python => format!("{name}_"),
            Language::Java => format!("{name}Element"),
        }
    }

    /// Member names the page templates declare themselves
    #[inline]
    #[must_use]
    pub fn page_members(self) -> &'static [&'static str] {
        match self {
            Language::Python => PYTHON_PAGE_MEMBERS,
            Language::Java => JAVA_PAGE_MEMBERS,
        }
    }

    /// Name of the field holding the locator behind accessor `name`
    #[must_use]
    pub fn locator_field(self, name: &str) -> String {
        match self {
            Language::Python => format!("{name}_locator"),
            Language::Java => format!("{name}Locator"),
        }
    }

    /// Double-quoted string literal for `text`
    #[must_use]
    pub fn quote(self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + 2);
        out.push('"');
        for c in text.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '"' => out.push_str("\\\""),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c => out.push(c),
            }
        }
        out.push('"');
        out
    }

    /// Single-line text safe to place after a line-comment marker
    #[must_use]
    pub fn comment_text(self, text: &str) -> String {
        let flat = flatten(text);
        match self {
            Language::Python => flat,
            // javac decodes unicode escapes before stripping comments
            Language::Java => flat.replace("\\u", "\\ u"),
        }
    }

    /// Single-line text safe inside a docstring or doc comment
    #[must_use]
    pub fn doc_text(self, text: &str) -> String {
        let flat = self.comment_text(text);
        match self {
            Language::Python => flat.replace('\\', "\\\\").replace('"', "\\\""),
            Language::Java => flat.replace("*/", "* /"),
        }
    }
}

fn flatten(text: &str) -> String {
    text.split(['\n', '\r']).map(str::trim).filter(|s| !s.is_empty()).collect::<Vec<_>>().join(" ")
}

/// How test units are laid out in a suite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetStyle {
    /// Flat test functions
    Script,
    /// One test class with setup/teardown and one method per test case
    Class,
}

/// Output flavour descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Unique id, also the output subdirectory
    pub id: String,
    /// Suite layout
    pub style: TargetStyle,
    /// Output language
    pub language: Language,
    /// Rule for class names
    pub type_naming: NamingRule,
    /// Rule for method, function and locator names
    pub member_naming: NamingRule,
    /// Renderer key in the [`RendererRegistry`](crate::RendererRegistry)
    pub template_set: String,
    /// Page artifact path template, relative to the target directory
    pub page_path: String,
    /// Suite artifact path template, relative to the target directory
    pub test_path: String,
    /// Statement placed first in every test unit
    pub navigation_step: String,
    /// Environment variable read for the base URL
    pub base_url_env: String,
}

impl Target {
    /// Script-style pytest target
    #[must_use]
    pub fn pytest() -> Self {
        Self {
            id: "pytest".to_string(),
            style: TargetStyle::Script,
            language: Language::Python,
            type_naming: NamingRule::Pascal,
            member_naming: NamingRule::Snake,
            template_set: "pytest".to_string(),
            page_path: "pages/{snake}_page.py".to_string(),
            test_path: "tests/test_{snake}.py".to_string(),
            navigation_step: "page.navigate_to(BASE_URL)".to_string(),
            base_url_env: DEFAULT_BASE_URL_ENV.to_string(),
        }
    }

    /// Class-style unittest target
    #[must_use]
    pub fn unittest() -> Self {
        Self {
            id: "unittest".to_string(),
            style: TargetStyle::Class,
            language: Language::Python,
            type_naming: NamingRule::Pascal,
            member_naming: NamingRule::Snake,
            template_set: "unittest".to_string(),
            page_path: "pages/{snake}_page.py".to_string(),
            test_path: "tests/test_{snake}.py".to_string(),
            navigation_step: "self.page.navigate_to(self.base_url)".to_string(),
            base_url_env: DEFAULT_BASE_URL_ENV.to_string(),
        }
    }

    /// Class-style Java TestNG target
    #[must_use]
    pub fn testng() -> Self {
        Self {
            id: "testng".to_string(),
            style: TargetStyle::Class,
            language: Language::Java,
            type_naming: NamingRule::Pascal,
            member_naming: NamingRule::Camel,
            template_set: "testng".to_string(),
            page_path: "src/main/java/pages/{pascal}Page.java".to_string(),
            test_path: "src/test/java/tests/Test{pascal}.java".to_string(),
            navigation_step: "page.navigateTo(baseUrl);".to_string(),
            base_url_env: DEFAULT_BASE_URL_ENV.to_string(),
        }
    }

    /// Look up a built-in target by id
    #[must_use]
    pub fn builtin(id: &str) -> Option<Self> {
        match id {
            "pytest" => Some(Self::pytest()),
            "unittest" => Some(Self::unittest()),
            "testng" => Some(Self::testng()),
            _ => None,
        }
    }

    /// All built-in targets
    #[must_use]
    pub fn builtins() -> Vec<Self> {
        BUILTIN_TARGET_IDS.iter().filter_map(|id| Self::builtin(id)).collect()
    }

    /// With base-URL environment variable
    #[inline]
    #[must_use]
    pub fn with_base_url_env(mut self, env: impl Into<String>) -> Self {
        self.base_url_env = env.into();
        self
    }

    /// Page class name for a requirement title
    #[must_use]
    pub fn page_class(&self, title: &str) -> String {
        format!("{}Page", self.type_naming.apply(title))
    }

    /// Suite class name for a requirement title
    #[must_use]
    pub fn suite_class(&self, title: &str) -> String {
        format!("Test{}", self.type_naming.apply(title))
    }

    /// Page artifact path, relative to the output root
    #[must_use]
    pub fn page_path_for(&self, title: &str) -> PathBuf {
        self.expand(&self.page_path, title)
    }

    /// Suite artifact path, relative to the output root
    #[must_use]
    pub fn test_path_for(&self, title: &str) -> PathBuf {
        self.expand(&self.test_path, title)
    }

    fn expand(&self, template: &str, title: &str) -> PathBuf {
        let rendered = template
            .replace("{snake}", &qa_model::naming::snake(title))
            .replace("{pascal}", &qa_model::naming::pascal(title))
            .replace("{camel}", &qa_model::naming::camel(title));
        let mut path = PathBuf::from(&self.id);
        path.extend(rendered.split('/').filter(|part| !part.is_empty()));
        path
    }
}
