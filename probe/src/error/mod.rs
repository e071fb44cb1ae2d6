//! Layered error types for the runtime crate.
//!
//! The error hierarchy is structured for actionable diagnostics:
//! - [`ApiError`] - Top-level error type for every call
//! - [`ClientError`] - HTTP transport errors and unexpected statuses
//! - [`ValidationError`] - Response decoding errors
//! - [`AuthError`] - Credential and authorization errors
//! - [`ConfigError`] - Configuration and argument binding errors

mod api_error;
mod auth_error;
mod client_error;
mod config_error;
mod validation_error;

pub use api_error::ApiError;
pub use auth_error::AuthError;
pub use client_error::ClientError;
pub use config_error::ConfigError;
pub use validation_error::ValidationError;
