//! HTTP client for the Relay email and storage endpoints.
mod errors;
mod relay_client;

pub use errors::{Error, Result};
pub use relay_client::{Builder, Client, EMAIL_URL, STORAGE_URL, UNEXPECTED_ERROR_MESSAGE};
