//! Name-normalization rules
//!
//! Targets turn free-text titles into file stems, class names and test-unit
//! names through a [`NamingRule`]. Every rule yields a valid identifier in the
//! generated languages: words are split on any non-alphanumeric character, an
//! empty result becomes `unnamed`, and a leading digit is prefixed with `_`.

use heck::{ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};
use serde::{Deserialize, Serialize};

/// Replacement for titles that normalize to nothing
pub const UNNAMED: &str = "unnamed";

/// How a title is turned into an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingRule {
    /// `user_login_and_authentication`
    Snake,
    /// `UserLoginAndAuthentication`
    Pascal,
    /// `userLoginAndAuthentication`
    Camel,
}

impl NamingRule {
    /// Apply the rule to a title
    #[must_use]
    pub fn apply(self, title: &str) -> String {
        let converted = match self {
            Self::Snake => title.to_snake_case(),
            Self::Pascal => title.to_upper_camel_case(),
            Self::Camel => title.to_lower_camel_case(),
        };
        guard_identifier(converted)
    }
}

/// Snake-case identifier for `title`
#[inline]
#[must_use]
pub fn snake(title: &str) -> String {
    NamingRule::Snake.apply(title)
}

/// Pascal-case identifier for `title`
#[inline]
#[must_use]
pub fn pascal(title: &str) -> String {
    NamingRule::Pascal.apply(title)
}

/// Camel-case identifier for `title`
#[inline]
#[must_use]
pub fn camel(title: &str) -> String {
    NamingRule::Camel.apply(title)
}

fn guard_identifier(mut name: String) -> String {
    name.retain(|c| c.is_alphanumeric() || c == '_');
    if name.is_empty() {
        return UNNAMED.to_string();
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}
