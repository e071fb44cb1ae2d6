//! Response decoding errors.

use thiserror::Error;

/// Errors while turning a response body into a value.
///
/// A shape mismatch means the service answered with something other than
/// what the endpoint declares.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A request body could not be encoded as JSON.
    #[error("JSON encode error: {0}")]
    JsonEncode(serde_json::Error),

    /// Body is not valid UTF-8 text.
    #[error("Response body is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// Body parsed but does not have the declared shape.
    #[error("Unexpected response shape: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// The declared shape.
        expected: String,
        /// What the body actually contained.
        actual: String,
    },

    /// Empty response body when content was expected.
    #[error("Empty response body")]
    EmptyBody,
}

impl ValidationError {
    /// Creates a shape mismatch error.
    pub fn shape_mismatch(expected: impl ToString, actual: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_string(),
            actual: actual.into(),
        }
    }

    /// Returns `true` if this is a shape mismatch.
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, Self::ShapeMismatch { .. })
    }

    /// Returns `true` if this is a parsing error.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::JsonParse(_) | Self::InvalidUtf8(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_mismatch() {
        let err = ValidationError::shape_mismatch("Post record", "array");
        assert!(err.is_shape_mismatch());
        assert!(!err.is_parse_error());
        assert_eq!(
            err.to_string(),
            "Unexpected response shape: expected Post record, got array"
        );
    }

    #[test]
    fn json_parse_is_parse_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err = ValidationError::JsonParse(json_err);
        assert!(err.is_parse_error());
        assert!(!err.is_shape_mismatch());
    }

    #[test]
    fn empty_body_display() {
        assert_eq!(ValidationError::EmptyBody.to_string(), "Empty response body");
    }
}
