use crate::validate::sanitize;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The upper bound, in UTF-8 bytes, of an email message body.
pub const MAX_MESSAGE_BYTES: usize = 10 * 1024 * 1024;

/// Is a structure describing a single email to be relayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailRequest {
    /// The recipient's email address.
    pub to: String,

    /// The email subject.
    pub subject: String,

    /// The email body.
    pub message: String,

    /// Optional free-form extra header lines passed through to the relay.
    pub headers: Option<String>,
}

impl EmailRequest {
    #[must_use]
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            message: message.into(),
            headers: None,
        }
    }

    #[must_use]
    pub fn with_headers(mut self, headers: impl Into<String>) -> Self {
        self.headers = Some(headers.into());
        self
    }

    /// Returns a copy with every field sanitized. Headers that sanitize down to an empty string
    /// are dropped.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        Self {
            to: sanitize(&self.to),
            subject: sanitize(&self.subject),
            message: sanitize(&self.message),
            headers: self
                .headers
                .as_deref()
                .map(sanitize)
                .filter(|h| !h.is_empty()),
        }
    }
}

/// The outcome reported by the Relay service.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// The normalized response shape returned by both Relay endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: Status,

    /// Human readable detail; always set on locally built error responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Opaque payload echoed from the Relay service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ApiResponse {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            message: Some(message.into()),
            data: None,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: Some(message.into()),
            data: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

/// Result of sending an email.
pub type EmailResult = ApiResponse;

/// Result of uploading a file.
pub type UploadResult = ApiResponse;
