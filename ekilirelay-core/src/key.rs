use std::fmt::{Debug, Formatter};
use thiserror::Error;

/// Represents a non-empty Relay API key.
///
/// The `Debug` output is redacted so the credential never ends up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ApiKey {
    type Error = ParseError;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        Self::new(s).ok_or(ParseError::Empty)
    }
}

impl TryFrom<&str> for ApiKey {
    type Error = ParseError;

    fn try_from(s: &str) -> std::result::Result<Self, Self::Error> {
        Self::new(s).ok_or(ParseError::Empty)
    }
}

impl Debug for ApiKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// Indicates that no API key was supplied.
    #[error("API key is required")]
    Empty,
}
