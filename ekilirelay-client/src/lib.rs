//! Client for the Ekili Relay email and file relay service.
pub mod http;

pub use ekilirelay_core::email::{ApiResponse, EmailRequest, EmailResult, Status, UploadResult};
pub use ekilirelay_core::upload::FileUpload;
