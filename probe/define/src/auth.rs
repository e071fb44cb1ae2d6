//! Authentication strategies for REST APIs.
//!
//! A strategy only says how a credential is applied to a request. Where the
//! credential comes from is described by [`RestApi::env_auth`](crate::RestApi::env_auth)
//! so that no secret is ever written into a definition.

use serde::{Deserialize, Serialize};

/// Authentication strategy for an API.
///
/// ## Examples
///
/// No authentication:
///
/// ```
/// use probe_define::AuthStrategy;
///
/// let auth = AuthStrategy::None;
/// assert!(!auth.requires_credential());
/// ```
///
/// Bearer token in the default `Authorization` header:
///
/// ```
/// use probe_define::AuthStrategy;
///
/// let auth = AuthStrategy::BearerToken { header: None };
/// assert_eq!(auth.header_name(), Some("Authorization"));
/// assert_eq!(auth.header_value("abc").as_deref(), Some("Bearer abc"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthStrategy {
    /// No authentication required.
    #[default]
    None,

    /// Bearer token, sent as `<header>: Bearer <token>`.
    BearerToken {
        /// Header name override. Defaults to `Authorization`.
        header: Option<String>,
    },

    /// Raw key in a custom header, sent as `<header>: <key>`.
    ApiKey {
        /// Header name (e.g., "X-API-Key").
        header: String,
    },
}

impl AuthStrategy {
    /// Returns `true` when requests need a credential.
    pub fn requires_credential(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// The header this strategy writes, if any.
    pub fn header_name(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::BearerToken { header } => Some(header.as_deref().unwrap_or("Authorization")),
            Self::ApiKey { header } => Some(header.as_str()),
        }
    }

    /// Formats `credential` into the header value for this strategy.
    pub fn header_value(&self, credential: &str) -> Option<String> {
        match self {
            Self::None => None,
            Self::BearerToken { .. } => Some(bearer(credential)),
            Self::ApiKey { .. } => Some(credential.to_string()),
        }
    }
}

/// Formats a bearer `Authorization` value.
///
/// Tokens that already carry the `Bearer ` scheme are passed through.
pub fn bearer(token: &str) -> String {
    let token = token.trim();
    if token
        .get(..7)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("bearer "))
    {
        token.to_string()
    } else {
        format!("Bearer {token}")
    }
}
