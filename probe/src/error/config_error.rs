//! Configuration and binding errors.

use probe_define::DefinitionError;
use thiserror::Error;

/// Errors in configuration or in the arguments of a call.
///
/// Nothing has been sent over the network when one of these is returned.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// No API with this name is registered.
    #[error("Unknown API {name}")]
    UnknownApi {
        /// Requested API name.
        name: String,
    },

    /// No endpoint with this id exists in the API.
    #[error("Unknown endpoint {api}.{id}")]
    UnknownEndpoint {
        /// API name.
        api: String,
        /// Requested endpoint id.
        id: String,
    },

    /// Argument binding or definition validation failed.
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    /// An environment variable holds a value that cannot be used.
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue {
        /// Variable name.
        var: String,
        /// The rejected value.
        value: String,
    },
}

impl ConfigError {
    /// Creates an unknown endpoint error.
    pub fn unknown_endpoint(api: impl Into<String>, id: impl Into<String>) -> Self {
        Self::UnknownEndpoint {
            api: api.into(),
            id: id.into(),
        }
    }
}
