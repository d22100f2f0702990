use ekilirelay_core::key::ParseError;
use ekilirelay_core::validate::ValidationError;
use reqwest::StatusCode;
use thiserror::Error;

/// The HTTP Client interaction result.
pub type Result<T> = std::result::Result<T, Error>;

/// HTTP Client error types.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// indicates the client was constructed without an API key.
    #[error("API key is required")]
    Authentication,

    /// indicates the email failed local validation before any request was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// indicates the Relay service responded with a non-success status code.
    #[error("HTTP error! status: {}", .status_code.as_u16())]
    Http { status_code: StatusCode },

    /// any other failure such as a network error, timeout or malformed response body.
    #[error("unexpected error: {message}")]
    Unexpected { message: String },
}

impl Error {
    /// Returns the status code associated with the error, if any.
    #[inline]
    #[must_use]
    pub const fn status_code(&self) -> Option<StatusCode> {
        match self {
            Error::Authentication => Some(StatusCode::UNAUTHORIZED),
            Error::Validation(_) => Some(StatusCode::BAD_REQUEST),
            Error::Http { status_code } => Some(*status_code),
            Error::Unexpected { .. } => None,
        }
    }

    /// Returns if the error is deemed retryable by standard HTTP semantics.
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http { status_code } => {
                status_code.is_server_error()
                    || matches!(
                        *status_code,
                        StatusCode::TOO_MANY_REQUESTS | StatusCode::REQUEST_TIMEOUT
                    )
            }
            Error::Authentication | Error::Validation(_) | Error::Unexpected { .. } => false,
        }
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Empty => Error::Authentication,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status_code) => Error::Http { status_code },
            None => Error::Unexpected {
                message: err.to_string(),
            },
        }
    }
}
