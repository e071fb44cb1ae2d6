//! Errors raised while validating definitions or binding call arguments.

use thiserror::Error;

use crate::param::ParamLocation;

/// Errors from definition validation and argument binding.
///
/// These are caller-side failures: nothing has been sent over the network
/// when one of them is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// A required parameter was not supplied.
    #[error("{endpoint}: missing required {location} parameter `{name}`")]
    MissingParam {
        /// Endpoint id.
        endpoint: String,
        /// Parameter name.
        name: String,
        /// Where the parameter belongs.
        location: ParamLocation,
    },

    /// A required parameter was supplied with an empty value.
    #[error("{endpoint}: {location} parameter `{name}` must not be empty")]
    EmptyParam {
        /// Endpoint id.
        endpoint: String,
        /// Parameter name.
        name: String,
        /// Where the parameter belongs.
        location: ParamLocation,
    },

    /// An argument does not correspond to any declared parameter.
    #[error("{endpoint}: unknown parameter `{name}`")]
    UnknownParam {
        /// Endpoint id.
        endpoint: String,
        /// Argument name.
        name: String,
    },

    /// A path value would change the structure of the URL.
    #[error("{endpoint}: path parameter `{name}` has invalid value {value:?}")]
    InvalidPathValue {
        /// Endpoint id.
        endpoint: String,
        /// Parameter name.
        name: String,
        /// The rejected value.
        value: String,
    },

    /// No endpoint with this id exists in the API.
    #[error("{api}: unknown endpoint `{id}`")]
    UnknownEndpoint {
        /// API name.
        api: String,
        /// Requested endpoint id.
        id: String,
    },

    /// Endpoint id does not follow identifier rules.
    #[error("invalid endpoint id {id:?}: {reason}")]
    InvalidEndpointId {
        /// The rejected id.
        id: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// Two endpoints share an id within one API.
    #[error("{api}: duplicate endpoint id `{id}`")]
    DuplicateEndpoint {
        /// API name.
        api: String,
        /// Endpoint id.
        id: String,
    },

    /// Path template is malformed.
    #[error("{endpoint}: invalid path template {path:?}: {reason}")]
    InvalidPathTemplate {
        /// Endpoint id.
        endpoint: String,
        /// The template.
        path: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// A placeholder and the declared path parameters disagree.
    #[error("{endpoint}: placeholder `{name}` has no matching path parameter")]
    UndeclaredPlaceholder {
        /// Endpoint id.
        endpoint: String,
        /// Placeholder name.
        name: String,
    },

    /// A declared path parameter does not appear in the template.
    #[error("{endpoint}: path parameter `{name}` is not used by the path template")]
    UnusedPathParam {
        /// Endpoint id.
        endpoint: String,
        /// Parameter name.
        name: String,
    },

    /// A path parameter was declared optional.
    #[error("{endpoint}: path parameter `{name}` cannot be optional")]
    OptionalPathParam {
        /// Endpoint id.
        endpoint: String,
        /// Parameter name.
        name: String,
    },

    /// The endpoint takes a body and none was given.
    #[error("{endpoint}: a {expected} request body is required")]
    MissingBody {
        /// Endpoint id.
        endpoint: String,
        /// Declared content type.
        expected: String,
    },

    /// A body was given to an endpoint that takes none.
    #[error("{endpoint}: does not take a request body")]
    UnexpectedBody {
        /// Endpoint id.
        endpoint: String,
    },

    /// The body's content type differs from the declared one.
    #[error("{endpoint}: request body must be {expected}, got {actual}")]
    BodyMismatch {
        /// Endpoint id.
        endpoint: String,
        /// Declared content type.
        expected: String,
        /// Content type of the given body.
        actual: String,
    },

    /// A path parameter was declared to accept blank values.
    #[error("{endpoint}: path parameter `{name}` cannot accept blank values")]
    BlankPathParam {
        /// Endpoint id.
        endpoint: String,
        /// Parameter name.
        name: String,
    },
}

impl DefinitionError {
    /// Returns `true` for errors caused by call arguments rather than the
    /// definition itself.
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            Self::MissingParam { .. }
                | Self::EmptyParam { .. }
                | Self::UnknownParam { .. }
                | Self::InvalidPathValue { .. }
                | Self::MissingBody { .. }
                | Self::UnexpectedBody { .. }
                | Self::BodyMismatch { .. }
        )
    }
}
