//! HTTP client and network errors.

use thiserror::Error;

/// Errors from the HTTP client layer.
///
/// These errors represent network-level failures, statuses other than the
/// one an endpoint declares, and malformed headers.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed due to network or protocol error.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a status other than the expected one.
    #[error("Expected HTTP {expected}, got {status}: {body}")]
    UnexpectedStatus {
        /// Status declared by the endpoint.
        expected: u16,
        /// Status actually returned.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Failed to establish connection to the server.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// A header name or value cannot be sent over HTTP.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

impl ClientError {
    /// Classifies a transport failure from `reqwest`.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_connect() {
            Self::Connection(err.to_string())
        } else {
            Self::Request(err)
        }
    }

    /// Returns the HTTP status code if the server answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Request(e) if e.is_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_status_display() {
        let err = ClientError::UnexpectedStatus {
            expected: 201,
            status: 422,
            body: "title can't be blank".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Expected HTTP 201, got 422: title can't be blank"
        );
        assert_eq!(err.status_code(), Some(422));
    }

    #[test]
    fn connection_has_no_status() {
        let err = ClientError::Connection("connection refused".to_string());
        assert_eq!(err.status_code(), None);
        assert!(!err.is_timeout());
    }

    #[test]
    fn invalid_header_display() {
        let err = ClientError::InvalidHeader("bad\nname".to_string());
        assert!(err.to_string().starts_with("Invalid header"));
    }
}
