//! Poll text value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// Maximum length of question and choice text, in characters.
pub const MAX_TEXT_CHARS: usize = 200;

/// Text of a question or a choice (Value Object)
///
/// Always non-blank and at most [`MAX_TEXT_CHARS`] characters long, so the
/// store can accept it without further checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PollText(String);

impl PollText {
    /// Validate and wrap the given text.
    ///
    /// Surrounding whitespace is kept as entered; only the emptiness check
    /// looks at the trimmed form.
    pub fn parse(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::InvalidText("text cannot be empty".to_string()));
        }
        let chars = text.chars().count();
        if chars > MAX_TEXT_CHARS {
            return Err(DomainError::InvalidText(format!(
                "text is {} characters long, the limit is {}",
                chars, MAX_TEXT_CHARS
            )));
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for PollText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PollText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PollText {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<&str> for PollText {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<PollText> for String {
    fn from(value: PollText) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let text = PollText::parse("What's up?").unwrap();
        assert_eq!(text.as_str(), "What's up?");
    }

    #[test]
    fn test_parse_empty() {
        assert!(PollText::parse("").is_err());
        assert!(PollText::parse("   ").is_err());
    }

    #[test]
    fn test_parse_limit_counts_characters() {
        let at_limit = "é".repeat(MAX_TEXT_CHARS);
        assert!(PollText::parse(at_limit).is_ok());

        let over_limit = "a".repeat(MAX_TEXT_CHARS + 1);
        let err = PollText::parse(over_limit).unwrap_err();
        assert!(err.to_string().contains("201 characters"));
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: PollText = serde_json::from_str("\"Not much\"").unwrap();
        assert_eq!(ok.to_string(), "Not much");
        assert!(serde_json::from_str::<PollText>("\"\"").is_err());
    }
}
