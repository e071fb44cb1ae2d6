//! Authentication and authorization errors.

use thiserror::Error;

/// Errors related to API authentication.
///
/// These errors occur while resolving credentials or when the server
/// rejects them.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No credential was found in any of the API's environment variables.
    #[error("Missing credential: set one of {}", .env_vars.join(", "))]
    MissingCredential {
        /// Variables that were checked, in order.
        env_vars: Vec<String>,
    },

    /// A bearer token was supplied but is blank.
    #[error("Bearer token must not be empty")]
    EmptyToken,

    /// Server rejected the authentication credentials (HTTP 401).
    #[error("Authentication failed: {message}")]
    AuthenticationFailed {
        /// Error message from the server.
        message: String,
    },

    /// Insufficient permissions for the requested operation (HTTP 403).
    #[error("Insufficient permissions: {operation}")]
    InsufficientPermissions {
        /// The operation that was denied.
        operation: String,
    },
}

impl AuthError {
    /// Returns `true` if the server saw the request and refused it.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationFailed { .. } | Self::InsufficientPermissions { .. }
        )
    }
}
