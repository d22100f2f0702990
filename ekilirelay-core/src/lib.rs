//! Domain types, validation and sanitization shared by the Ekili Relay client.
pub mod email;
pub mod key;
pub mod upload;
pub mod validate;
