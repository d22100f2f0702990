use crate::email::{EmailRequest, MAX_MESSAGE_BYTES};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Local part (dot-separated atoms or a quoted string) `@` (bracketed dotted quad or a hostname
/// ending in an alphabetic label of at least two characters).
const EMAIL_PATTERN: &str = r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("EMAIL_REGEX should compile - this is a bug"));

/// A single rule an `EmailRequest` can violate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    InvalidRecipient,
    MissingSubject,
    MissingMessage,
    MessageTooLarge,
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::InvalidRecipient => write!(f, "Invalid recipient email address"),
            Violation::MissingSubject => write!(f, "Subject is required"),
            Violation::MissingMessage => write!(f, "Message is required"),
            Violation::MessageTooLarge => write!(f, "Message exceeds maximum size limit"),
        }
    }
}

/// Every rule an `EmailRequest` failed, reported together.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    violations: Vec<Violation>,
    message: String,
}

impl ValidationError {
    fn new(violations: Vec<Violation>) -> Self {
        let message = violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            violations,
            message,
        }
    }

    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

/// Returns if the address matches the accepted email address grammar.
///
/// This is purely syntactic; no DNS or mailbox checks are made.
#[must_use]
pub fn validate_email_address(address: &str) -> bool {
    EMAIL_REGEX.is_match(address)
}

/// Validates an `EmailRequest` against a message size limit of `MAX_MESSAGE_BYTES`.
///
/// # Errors
///
/// Will return `Err` listing every violated rule.
pub fn validate_request(request: &EmailRequest) -> Result<(), ValidationError> {
    validate_request_with_limit(request, MAX_MESSAGE_BYTES)
}

/// Validates an `EmailRequest` using a custom message size limit, in bytes.
///
/// # Errors
///
/// Will return `Err` listing every violated rule.
pub fn validate_request_with_limit(
    request: &EmailRequest,
    max_message_bytes: usize,
) -> Result<(), ValidationError> {
    let mut violations = Vec::new();

    if request.to.is_empty() || !validate_email_address(&request.to) {
        violations.push(Violation::InvalidRecipient);
    }
    if request.subject.trim().is_empty() {
        violations.push(Violation::MissingSubject);
    }
    if request.message.trim().is_empty() {
        violations.push(Violation::MissingMessage);
    }
    if request.message.len() > max_message_bytes {
        violations.push(Violation::MessageTooLarge);
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(violations))
    }
}

/// Removes every `<` and `>` and trims surrounding whitespace.
#[must_use]
pub fn sanitize(input: &str) -> String {
    input
        .replace(|c: char| matches!(c, '<' | '>'), "")
        .trim()
        .to_string()
}
