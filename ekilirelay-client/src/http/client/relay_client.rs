use std::time::Duration;

use ekilirelay_core::email::{ApiResponse, EmailRequest, EmailResult, UploadResult};
use ekilirelay_core::key::ApiKey;
use ekilirelay_core::upload::FileUpload;
use ekilirelay_core::validate::validate_request;
use metrics::increment_counter;
use reqwest::multipart::{Form, Part};
use tracing::{debug, error, warn};

use crate::http::client::Error;

use super::errors::Result;

/// The Relay email endpoint.
pub const EMAIL_URL: &str = "https://relay.ekilie.com/api/index.php";

/// The Relay storage endpoint used for file uploads.
pub const STORAGE_URL: &str = "https://relay.ekilie.com/api/storage/v1/index.php";

/// The message returned in place of any failure that is not an HTTP status rejection.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred while sending the email";

/// A Builder can be used to create a custom `Client`.
pub struct Builder {
    api_key: String,
    email_url: String,
    storage_url: String,
    timeout: Duration,
    client: Option<reqwest::Client>,
}

impl Builder {
    /// Initializes a new Builder with sane defaults to create a custom `Client`.
    #[must_use]
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            email_url: EMAIL_URL.to_string(),
            storage_url: STORAGE_URL.to_string(),
            timeout: Duration::from_secs(60),
            client: None,
        }
    }

    /// Set the total timeout applied to each request.
    ///
    /// Ignored when a custom HTTP client is supplied.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets a custom HTTP [Client](https://docs.rs/reqwest/latest/reqwest/struct.Client.html#) for use.
    #[must_use]
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Points the client at mock endpoints.
    #[cfg(test)]
    pub(crate) fn endpoints(mut self, email_url: &str, storage_url: &str) -> Self {
        self.email_url = email_url.to_string();
        self.storage_url = storage_url.to_string();
        self
    }

    /// Creates a `Client` which uses the Builders configuration.
    ///
    /// # Errors
    ///
    /// Will return `Err` on:
    /// - an empty API key.
    /// - an invalid internal configuration of the `reqwest::Client`.
    pub fn build(self) -> Result<Client> {
        let api_key = ApiKey::try_from(self.api_key)?;

        let client = match self.client {
            Some(client) => client,
            None => reqwest::ClientBuilder::default()
                .timeout(self.timeout)
                .connect_timeout(Duration::from_secs(10))
                .tcp_keepalive(Duration::from_secs(60))
                .build()?,
        };

        debug!(email_url = %self.email_url, "relay client ready");

        Ok(Client {
            api_key,
            email_url: self.email_url,
            storage_url: self.storage_url,
            client,
        })
    }
}

/// Relay HTTP Client.
///
/// Holds only immutable configuration and may be shared across tasks, eg. behind an `Arc`.
#[derive(Debug)]
pub struct Client {
    api_key: ApiKey,
    email_url: String,
    storage_url: String,
    client: reqwest::Client,
}

impl Client {
    /// Creates a `Client` with the default configuration.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the API key is empty.
    pub fn new(api_key: &str) -> Result<Self> {
        Builder::new(api_key).build()
    }

    /// Sends an email to a single recipient.
    ///
    /// # Errors
    ///
    /// See [`Client::send`].
    pub async fn send_email(
        &self,
        to: &str,
        subject: &str,
        message: &str,
        headers: Option<&str>,
    ) -> Result<EmailResult> {
        let mut request = EmailRequest::new(to, subject, message);
        request.headers = headers.map(ToString::to_string);
        self.send(&request).await
    }

    /// Validates, sanitizes and sends an `EmailRequest`.
    ///
    /// Failures other than those listed below, such as network errors or a malformed response
    /// body, are logged and returned as an error `ApiResponse` with a generic message.
    ///
    /// # Errors
    ///
    /// Will return `Err` on:
    /// - the request failing validation.
    /// - the Relay service responding with a non-success status code.
    #[tracing::instrument(name = "send_email", level = "debug", skip_all)]
    pub async fn send(&self, request: &EmailRequest) -> Result<EmailResult> {
        if let Err(e) = validate_request(request) {
            increment_counter!("ekilirelay_requests", "endpoint" => "email", "outcome" => "invalid");
            return Err(e.into());
        }

        match self.post_email(request.sanitized()).await {
            Ok(result) => {
                increment_counter!("ekilirelay_requests", "endpoint" => "email", "outcome" => "sent");
                Ok(result)
            }
            Err(e @ Error::Http { .. }) => {
                increment_counter!("ekilirelay_requests", "endpoint" => "email", "outcome" => "rejected");
                error!(error = %e, "relay rejected email");
                Err(e)
            }
            Err(e) => {
                increment_counter!("ekilirelay_requests", "endpoint" => "email", "outcome" => "failed");
                error!(error = %e, "error sending email");
                Ok(ApiResponse::error(UNEXPECTED_ERROR_MESSAGE))
            }
        }
    }

    /// Uploads a single file to the Relay storage endpoint.
    ///
    /// Every failure is returned as an error `ApiResponse` carrying the failure reason. For an
    /// HTTP rejection that is the `message` of the Relay's error body when one is present.
    #[tracing::instrument(name = "send_file", level = "debug", skip_all)]
    pub async fn send_file(&self, file: FileUpload) -> UploadResult {
        match self.post_file(file).await {
            Ok(result) => {
                let outcome = if result.is_success() { "sent" } else { "rejected" };
                increment_counter!("ekilirelay_requests", "endpoint" => "storage", "outcome" => outcome);
                result
            }
            Err(e) => {
                increment_counter!("ekilirelay_requests", "endpoint" => "storage", "outcome" => "failed");
                error!(error = %e, "error uploading file");
                match e {
                    Error::Unexpected { message } => ApiResponse::error(message),
                    e => ApiResponse::error(e.to_string()),
                }
            }
        }
    }

    async fn post_email(&self, request: EmailRequest) -> Result<EmailResult> {
        let mut form = Form::new()
            .text("to", request.to)
            .text("subject", request.subject)
            .text("message", request.message)
            .text("apikey", self.api_key.as_str().to_string());

        if let Some(headers) = request.headers {
            form = form.text("headers", headers);
        }

        debug!(url = %self.email_url, "posting email");
        let res = self.client.post(&self.email_url).multipart(form).send().await?;
        let status_code = res.status();

        if status_code.is_success() {
            Ok(res.json().await?)
        } else {
            Err(Error::Http { status_code })
        }
    }

    async fn post_file(&self, file: FileUpload) -> Result<UploadResult> {
        let mut part = Part::bytes(file.content).file_name(file.file_name);
        if let Some(mime_type) = &file.mime_type {
            part = part.mime_str(mime_type)?;
        }
        let form = Form::new()
            .part("file", part)
            .text("apikey", self.api_key.as_str().to_string());

        debug!(url = %self.storage_url, "posting file");
        let res = self
            .client
            .post(&self.storage_url)
            .multipart(form)
            .send()
            .await?;
        let status_code = res.status();

        if status_code.is_success() {
            return Ok(res.json().await?);
        }

        let body = match res.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!(error = %e, %status_code, "failed to read rejected upload body");
                String::new()
            }
        };
        let message = serde_json::from_str::<ApiResponse>(&body)
            .ok()
            .and_then(|r| r.message)
            .unwrap_or_else(|| Error::Http { status_code }.to_string());
        warn!(%status_code, %message, "relay rejected file upload");
        Ok(ApiResponse::error(message))
    }
}
