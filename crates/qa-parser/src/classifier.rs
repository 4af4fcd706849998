//! Line classification and section transitions
//!
//! Each non-empty line of a block is classified into a [`LineClass`]; the
//! pair `(current section, class)` indexes [`TRANSITIONS`], which yields the
//! next section and the action to take. All section logic lives in that table.

use once_cell::sync::Lazy;
use regex::Regex;

static TITLE_ANCHOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)test\s+case\s+title[*\s]*:").expect("static regex"));

static SECTION_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[#*\s]*\d+\.[*\s]*(test\s+steps|expected\s+results|test\s+data\s+requirements)\b\s*:?")
        .expect("static regex")
});

/// Section cursor while scanning a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Outside any list section
    None,
    /// Collecting test steps
    Steps,
    /// Collecting expected results
    Expected,
    /// Collecting test data
    TestData,
}

impl Section {
    const fn row(self) -> usize {
        match self {
            Self::None => 0,
            Self::Steps => 1,
            Self::Expected => 2,
            Self::TestData => 3,
        }
    }
}

/// Kind of a classified line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineClass {
    /// Contains the `Test Case Title:` anchor
    Title,
    /// `<n>. Test Steps:` header
    StepsHeader,
    /// `<n>. Expected Results:` header
    ExpectedHeader,
    /// `<n>. Test Data Requirements:` header
    TestDataHeader,
    /// Dash-prefixed list item
    Item,
    /// Anything else
    Noise,
}

impl LineClass {
    const fn column(self) -> usize {
        match self {
            Self::Title => 0,
            Self::StepsHeader => 1,
            Self::ExpectedHeader => 2,
            Self::TestDataHeader => 3,
            Self::Item => 4,
            Self::Noise => 5,
        }
    }
}

/// A classified line with its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// Classification
    pub class: LineClass,
    /// Title text for [`LineClass::Title`], item text for [`LineClass::Item`], empty otherwise
    pub payload: &'a str,
}

/// What to do with a classified line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Replace the block title with the payload
    SetTitle,
    /// Append the payload to the current section
    Append,
    /// Drop the line
    Discard,
}

/// One cell of the transition table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Section after this line; `None` keeps the current one
    pub next: Option<Section>,
    /// Action for this line
    pub action: Action,
}

const fn to(section: Section, action: Action) -> Transition {
    Transition {
        next: Some(section),
        action,
    }
}

const fn stay(action: Action) -> Transition {
    Transition { next: None, action }
}

/// Rows: current section. Columns: title, steps hdr, expected hdr, data hdr, item, noise.
pub const TRANSITIONS: [[Transition; 6]; 4] = {
    use Action::{Append, Discard, SetTitle};
    use Section::{Expected, Steps, TestData};
    let title = to(Section::None, SetTitle);
    let steps = to(Steps, Discard);
    let expected = to(Expected, Discard);
    let data = to(TestData, Discard);
    [
        [title, steps, expected, data, stay(Discard), stay(Discard)],
        [title, steps, expected, data, stay(Append), stay(Discard)],
        [title, steps, expected, data, stay(Append), stay(Discard)],
        [title, steps, expected, data, stay(Append), stay(Discard)],
    ]
};

/// Look up the transition for `class` in `section`
#[inline]
#[must_use]
pub fn transition(section: Section, class: LineClass) -> Transition {
    TRANSITIONS[section.row()][class.column()]
}

/// Classify one trimmed, non-empty line
#[must_use]
pub fn classify(line: &str) -> Line<'_> {
    if let Some(anchor) = TITLE_ANCHOR.find(line) {
        let title = line[anchor.end()..].trim_matches(|c: char| c.is_whitespace() || c == '*');
        return Line {
            class: LineClass::Title,
            payload: title,
        };
    }

    if let Some(caps) = SECTION_HEADER.captures(line) {
        let name = caps
            .get(1)
            .map_or("", |m| m.as_str())
            .split_whitespace()
            .map(str::to_ascii_lowercase)
            .collect::<Vec<_>>()
            .join(" ");
        let class = match name.as_str() {
            "test steps" => LineClass::StepsHeader,
            "expected results" => LineClass::ExpectedHeader,
            _ => LineClass::TestDataHeader,
        };
        return Line { class, payload: "" };
    }

    if line.starts_with('-') {
        return Line {
            class: LineClass::Item,
            payload: line.trim_start_matches(['-', ' ']).trim(),
        };
    }

    Line {
        class: LineClass::Noise,
        payload: "",
    }
}
