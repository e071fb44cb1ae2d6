//! Top-level API error type.

use probe_define::DefinitionError;
use thiserror::Error;

use super::{AuthError, ClientError, ConfigError, ValidationError};

/// Top-level error type for all API operations.
///
/// This enum aggregates all error categories, enabling unified error handling
/// while preserving the ability to match on specific error types when needed.
///
/// ## Examples
///
/// ```rust
/// use probe::error::{ApiError, ClientError};
///
/// fn describe(err: &ApiError) -> &'static str {
///     match err {
///         ApiError::Client(_) => "transport",
///         ApiError::Validation(_) => "decoding",
///         ApiError::Auth(_) => "credentials",
///         ApiError::Config(_) => "configuration",
///     }
/// }
///
/// let err = ApiError::from(ClientError::Connection("refused".to_string()));
/// assert_eq!(describe(&err), "transport");
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP client errors (network, timeout, unexpected status).
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Response decoding errors (parse failures, shape mismatches).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Authentication and authorization errors.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Configuration and binding errors.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<DefinitionError> for ApiError {
    fn from(err: DefinitionError) -> Self {
        Self::Config(ConfigError::Definition(err))
    }
}

impl ApiError {
    /// Maps a status other than the expected one to an error.
    ///
    /// 401 and 403 become [`AuthError`]s; anything else is
    /// [`ClientError::UnexpectedStatus`] carrying the raw body.
    pub fn unexpected_status(
        operation: &str,
        expected: u16,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        match status {
            401 => AuthError::AuthenticationFailed {
                message: body.into(),
            }
            .into(),
            403 => AuthError::InsufficientPermissions {
                operation: operation.to_string(),
            }
            .into(),
            _ => ClientError::UnexpectedStatus {
                expected,
                status,
                body: body.into(),
            }
            .into(),
        }
    }

    /// Returns the HTTP status behind this error, when there is one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Client(e) => e.status_code(),
            Self::Auth(AuthError::AuthenticationFailed { .. }) => Some(401),
            Self::Auth(AuthError::InsufficientPermissions { .. }) => Some(403),
            _ => None,
        }
    }

    /// Returns `true` when the call was rejected before anything was sent
    /// because of a bad argument.
    pub fn is_argument_error(&self) -> bool {
        match self {
            Self::Config(ConfigError::Definition(e)) => e.is_argument_error(),
            Self::Auth(AuthError::EmptyToken) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use probe_define::ParamLocation;

    #[test]
    fn from_client_error() {
        let api_err: ApiError = ClientError::Connection("refused".to_string()).into();
        assert!(matches!(api_err, ApiError::Client(_)));
    }

    #[test]
    fn from_definition_error_lands_in_config() {
        let err: ApiError = DefinitionError::EmptyParam {
            endpoint: "GetRepoInfo".to_string(),
            name: "owner".to_string(),
            location: ParamLocation::Path,
        }
        .into();
        assert!(matches!(err, ApiError::Config(ConfigError::Definition(_))));
        assert!(err.is_argument_error());
        assert_eq!(
            err.to_string(),
            "GetRepoInfo: path parameter `owner` must not be empty"
        );
    }

    #[test]
    fn unexpected_status_maps_auth_codes() {
        let err = ApiError::unexpected_status("CreatePost", 201, 401, "Invalid token");
        assert!(matches!(
            err,
            ApiError::Auth(AuthError::AuthenticationFailed { ref message }) if message == "Invalid token"
        ));
        assert_eq!(err.status_code(), Some(401));

        let err = ApiError::unexpected_status("CreatePost", 201, 403, "");
        assert!(matches!(
            err,
            ApiError::Auth(AuthError::InsufficientPermissions { ref operation }) if operation == "CreatePost"
        ));
    }

    #[test]
    fn unexpected_status_keeps_raw_body() {
        let err = ApiError::unexpected_status("ListRepoIssues", 200, 415, "{\"message\":\"no\"}");
        assert_eq!(err.status_code(), Some(415));
        assert!(err.to_string().contains("415"));
        assert!(err.to_string().contains("{\"message\":\"no\"}"));
        assert!(!err.is_argument_error());
    }

    #[test]
    fn empty_token_is_an_argument_error() {
        let err: ApiError = AuthError::EmptyToken.into();
        assert!(err.is_argument_error());
        assert_eq!(err.status_code(), None);
    }
}
