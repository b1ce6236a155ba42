//! Small validated text primitives shared across the clinic crates.

use serde::{Deserialize, Serialize};

/// Error returned when constructing a [`NonEmptyText`] from blank input.
#[derive(Debug, thiserror::Error)]
#[error("text must contain at least one non-whitespace character")]
pub struct EmptyText;

/// A string that is guaranteed to hold visible content.
///
/// Input is trimmed on construction; configuration values such as an upstream
/// API key or model name must never be blank, and this type makes that
/// impossible to represent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Trims `input` and wraps it, rejecting empty or whitespace-only text.
    pub fn new(input: impl AsRef<str>) -> Result<Self, EmptyText> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(EmptyText);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NonEmptyText {
    type Error = EmptyText;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        NonEmptyText::new(value)
    }
}

impl From<NonEmptyText> for String {
    fn from(value: NonEmptyText) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        let text = NonEmptyText::new("  sk-test-key \n").unwrap();
        assert_eq!(text.as_str(), "sk-test-key");
    }

    #[test]
    fn rejects_blank_input() {
        assert!(NonEmptyText::new("").is_err());
        assert!(NonEmptyText::new("   \t").is_err());
    }

    #[test]
    fn deserializes_through_validation() {
        let ok: NonEmptyText = serde_json::from_str("\"gpt-3.5-turbo\"").unwrap();
        assert_eq!(ok.as_str(), "gpt-3.5-turbo");

        let blank = serde_json::from_str::<NonEmptyText>("\" \"");
        assert!(blank.is_err());
    }
}
