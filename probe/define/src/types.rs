//! Core descriptor types.
//!
//! - [`RestApi`] - one remote service and its endpoints
//! - [`Endpoint`] - one remote operation
//! - [`RestMethod`] - HTTP method enumeration
//! - [`BoundRequest`] - an endpoint with call arguments resolved

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::auth::AuthStrategy;
use crate::error::DefinitionError;
use crate::param::{Param, ParamLocation};
use crate::request::ApiRequest;
use crate::response::ResponseShape;

/// HTTP methods supported by REST APIs.
///
/// ```
/// use std::str::FromStr;
/// use probe_define::RestMethod;
///
/// assert_eq!(RestMethod::from_str("GET").unwrap(), RestMethod::Get);
/// assert_eq!(RestMethod::Post.to_string(), "POST");
/// assert!(!RestMethod::Post.is_idempotent());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum RestMethod {
    /// HTTP GET - Retrieve a resource
    Get,
    /// HTTP POST - Create a new resource
    Post,
    /// HTTP PUT - Replace a resource entirely
    Put,
    /// HTTP PATCH - Partially update a resource
    Patch,
    /// HTTP DELETE - Remove a resource
    Delete,
    /// HTTP HEAD - Get headers only (no body)
    Head,
    /// HTTP OPTIONS - Get allowed methods for a resource
    Options,
}

impl RestMethod {
    /// Returns `true` if this method typically has a request body.
    pub fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }

    /// Returns `true` if repeating the call has the same effect as calling once.
    pub fn is_idempotent(&self) -> bool {
        !matches!(self, Self::Post | Self::Patch)
    }

    /// Returns `true` if this method should not modify server state.
    pub fn is_safe(&self) -> bool {
        matches!(self, Self::Get | Self::Head | Self::Options)
    }
}

/// A complete service definition.
///
/// ```
/// use probe_define::{AuthStrategy, Endpoint, Param, ResponseShape, RestApi, RestMethod};
///
/// let api = RestApi {
///     name: "Example".to_string(),
///     description: "Example API".to_string(),
///     base_url: "https://api.example.com".to_string(),
///     docs_url: None,
///     auth: AuthStrategy::None,
///     env_auth: vec![],
///     headers: vec![],
///     endpoints: vec![Endpoint {
///         id: "GetUser".to_string(),
///         method: RestMethod::Get,
///         path: "/users/{user}".to_string(),
///         description: "Fetch one user".to_string(),
///         params: vec![Param::path("user")],
///         request: None,
///         response: ResponseShape::record("User"),
///         expected_status: 200,
///         headers: vec![],
///         auth_required: false,
///     }],
/// };
///
/// assert!(api.validate().is_ok());
/// let bound = api.bind("GetUser", &[("user", "defunkt")]).unwrap();
/// assert_eq!(bound.path, "/users/defunkt");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestApi {
    /// Unique name for this API (e.g. "GitHub").
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Base URL that endpoint paths are appended to.
    pub base_url: String,
    /// Link to API documentation.
    pub docs_url: Option<String>,
    /// How the API-level credential is applied.
    pub auth: AuthStrategy,
    /// Environment variables holding the credential, tried in order.
    ///
    /// The first variable that is set and non-empty wins.
    pub env_auth: Vec<String>,
    /// Headers sent with every request.
    ///
    /// Endpoint headers override these for matching keys (case-insensitive).
    pub headers: Vec<(String, String)>,
    /// All endpoints of this API.
    pub endpoints: Vec<Endpoint>,
}

impl RestApi {
    /// Finds an endpoint by id.
    pub fn endpoint(&self, id: &str) -> Option<&Endpoint> {
        self.endpoints.iter().find(|e| e.id == id)
    }

    /// Checks the definition for structural mistakes.
    ///
    /// ## Errors
    ///
    /// Returns the first problem found: an invalid or duplicate endpoint id,
    /// a malformed path template, or path parameters that disagree with the
    /// template placeholders.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        for (idx, endpoint) in self.endpoints.iter().enumerate() {
            endpoint.validate()?;
            if self.endpoints[..idx].iter().any(|e| e.id == endpoint.id) {
                return Err(DefinitionError::DuplicateEndpoint {
                    api: self.name.clone(),
                    id: endpoint.id.clone(),
                });
            }
        }
        Ok(())
    }

    /// Binds arguments to the named endpoint, folding in API-level headers.
    ///
    /// ## Errors
    ///
    /// Returns [`DefinitionError::UnknownEndpoint`] for an unknown id, and
    /// any error from [`Endpoint::bind`].
    pub fn bind(&self, id: &str, args: &[(&str, &str)]) -> Result<BoundRequest, DefinitionError> {
        let endpoint = self
            .endpoint(id)
            .ok_or_else(|| DefinitionError::UnknownEndpoint {
                api: self.name.clone(),
                id: id.to_string(),
            })?;
        let mut bound = endpoint.bind(args)?;
        bound.headers = merge_headers(&self.headers, &bound.headers);
        Ok(bound)
    }
}

/// A single remote operation.
///
/// Paths use `{name}` placeholders; each one must be declared as a
/// [`Param::path`] in `params`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Identifier for this endpoint, PascalCase by convention.
    pub id: String,
    /// HTTP method.
    pub method: RestMethod,
    /// Path template (e.g. "/users/{user}/posts").
    pub path: String,
    /// What this endpoint does.
    pub description: String,
    /// Declared path, query and header parameters.
    pub params: Vec<Param>,
    /// Request body, if the endpoint takes one.
    pub request: Option<ApiRequest>,
    /// Declared shape of a successful response body.
    pub response: ResponseShape,
    /// The status code that counts as success.
    pub expected_status: u16,
    /// Static headers for this endpoint.
    pub headers: Vec<(String, String)>,
    /// Whether the API-level credential must be attached.
    pub auth_required: bool,
}

impl Endpoint {
    /// Declared parameters placed at `location`, in declaration order.
    pub fn params_at(&self, location: ParamLocation) -> impl Iterator<Item = &Param> {
        self.params.iter().filter(move |p| p.location == location)
    }

    /// Finds a declared parameter by name.
    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.matches(name))
    }

    /// Placeholder names in the path template, in order of appearance.
    ///
    /// ## Errors
    ///
    /// Fails on an unclosed `{`, a stray `}` or an empty `{}`.
    pub fn placeholders(&self) -> Result<Vec<&str>, DefinitionError> {
        let mut names = Vec::new();
        let mut rest = self.path.as_str();
        loop {
            let open = rest.find('{');
            let close = rest.find('}');
            match (open, close) {
                (None, None) => break,
                (Some(start), Some(end)) if start < end => {
                    let name = &rest[start + 1..end];
                    if name.is_empty() {
                        return Err(self.template_error("empty placeholder"));
                    }
                    if name.contains('{') {
                        return Err(self.template_error("nested placeholder"));
                    }
                    names.push(name);
                    rest = &rest[end + 1..];
                }
                (Some(_), None) => return Err(self.template_error("unclosed placeholder")),
                _ => return Err(self.template_error("unmatched closing brace")),
            }
        }
        Ok(names)
    }

    fn template_error(&self, reason: &'static str) -> DefinitionError {
        DefinitionError::InvalidPathTemplate {
            endpoint: self.id.clone(),
            path: self.path.clone(),
            reason,
        }
    }

    /// Checks id rules and that placeholders match the declared path params.
    ///
    /// ## Errors
    ///
    /// See [`RestApi::validate`].
    pub fn validate(&self) -> Result<(), DefinitionError> {
        validate_id(&self.id)?;

        let placeholders = self.placeholders()?;
        for name in &placeholders {
            if !self.params_at(ParamLocation::Path).any(|p| p.name == *name) {
                return Err(DefinitionError::UndeclaredPlaceholder {
                    endpoint: self.id.clone(),
                    name: (*name).to_string(),
                });
            }
        }
        for param in self.params_at(ParamLocation::Path) {
            if !placeholders.contains(&param.name.as_str()) {
                return Err(DefinitionError::UnusedPathParam {
                    endpoint: self.id.clone(),
                    name: param.name.clone(),
                });
            }
            if !param.required {
                return Err(DefinitionError::OptionalPathParam {
                    endpoint: self.id.clone(),
                    name: param.name.clone(),
                });
            }
            if param.allow_empty {
                return Err(DefinitionError::BlankPathParam {
                    endpoint: self.id.clone(),
                    name: param.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Checks a body against the declared request body.
    ///
    /// `content_type` is the content type of the body being sent, or `None`
    /// when there is no body.
    ///
    /// ## Errors
    ///
    /// - [`DefinitionError::MissingBody`] when a body is declared but absent
    /// - [`DefinitionError::UnexpectedBody`] when none is declared
    /// - [`DefinitionError::BodyMismatch`] when the content types differ
    pub fn check_body(&self, content_type: Option<&str>) -> Result<(), DefinitionError> {
        match (&self.request, content_type) {
            (None, None) => Ok(()),
            (Some(request), None) => Err(DefinitionError::MissingBody {
                endpoint: self.id.clone(),
                expected: request.content_type().to_string(),
            }),
            (None, Some(_)) => Err(DefinitionError::UnexpectedBody {
                endpoint: self.id.clone(),
            }),
            (Some(request), Some(actual)) if request.accepts(actual) => Ok(()),
            (Some(request), Some(actual)) => Err(DefinitionError::BodyMismatch {
                endpoint: self.id.clone(),
                expected: request.content_type().to_string(),
                actual: actual.to_string(),
            }),
        }
    }

    /// Resolves call arguments into a transport-agnostic request.
    ///
    /// Each `(name, value)` pair is routed to the path, query string or
    /// headers according to its declaration. Optional parameters given an
    /// empty value are dropped unless they accept blank values.
    ///
    /// ## Errors
    ///
    /// - [`DefinitionError::UnknownParam`] for an undeclared argument
    /// - [`DefinitionError::MissingParam`] for an absent required parameter
    /// - [`DefinitionError::EmptyParam`] for a blank required parameter that
    ///   does not [`allow_empty`](Param::allow_empty)
    /// - [`DefinitionError::InvalidPathValue`] when a path value contains
    ///   `/`, `?` or `#`
    pub fn bind(&self, args: &[(&str, &str)]) -> Result<BoundRequest, DefinitionError> {
        if let Some((name, _)) = args.iter().find(|(name, _)| self.param(name).is_none()) {
            return Err(DefinitionError::UnknownParam {
                endpoint: self.id.clone(),
                name: (*name).to_string(),
            });
        }

        let mut path_values: Vec<(&str, &str)> = Vec::new();
        let mut query = Vec::new();
        let mut param_headers = Vec::new();

        for param in &self.params {
            let value = args
                .iter()
                .find(|(name, _)| param.matches(name))
                .map(|(_, value)| *value);

            let value = match value {
                Some(v) if param.allow_empty || !v.trim().is_empty() => v,
                Some(_) if param.required => {
                    return Err(DefinitionError::EmptyParam {
                        endpoint: self.id.clone(),
                        name: param.name.clone(),
                        location: param.location,
                    });
                }
                None if param.required => {
                    return Err(DefinitionError::MissingParam {
                        endpoint: self.id.clone(),
                        name: param.name.clone(),
                        location: param.location,
                    });
                }
                _ => continue,
            };

            match param.location {
                ParamLocation::Path => {
                    if value.contains(['/', '?', '#']) {
                        return Err(DefinitionError::InvalidPathValue {
                            endpoint: self.id.clone(),
                            name: param.name.clone(),
                            value: value.to_string(),
                        });
                    }
                    path_values.push((param.name.as_str(), value));
                }
                ParamLocation::Query => query.push((param.name.clone(), value.to_string())),
                ParamLocation::Header => param_headers.push((param.name.clone(), value.to_string())),
            }
        }

        Ok(BoundRequest {
            endpoint_id: self.id.clone(),
            method: self.method,
            path: self.render_path(&path_values)?,
            query,
            headers: merge_headers(&self.headers, &param_headers),
        })
    }

    fn render_path(&self, values: &[(&str, &str)]) -> Result<String, DefinitionError> {
        let mut rendered = String::with_capacity(self.path.len());
        let mut rest = self.path.as_str();
        while let Some(start) = rest.find('{') {
            rendered.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let end = after
                .find('}')
                .ok_or_else(|| self.template_error("unclosed placeholder"))?;
            let name = &after[..end];
            let value = values
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, v)| *v)
                .ok_or_else(|| DefinitionError::UndeclaredPlaceholder {
                    endpoint: self.id.clone(),
                    name: name.to_string(),
                })?;
            rendered.push_str(value);
            rest = &after[end + 1..];
        }
        rendered.push_str(rest);
        Ok(rendered)
    }
}

/// An endpoint with its arguments resolved, ready for any transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundRequest {
    /// Id of the endpoint this request was bound from.
    pub endpoint_id: String,
    /// HTTP method.
    pub method: RestMethod,
    /// Path with every placeholder substituted.
    pub path: String,
    /// Query pairs in declaration order.
    pub query: Vec<(String, String)>,
    /// Headers after merging static and parameter headers.
    pub headers: Vec<(String, String)>,
}

impl BoundRequest {
    /// Looks up a header value, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Merges two header lists; `overrides` win on case-insensitive key matches.
pub fn merge_headers(
    base: &[(String, String)],
    overrides: &[(String, String)],
) -> Vec<(String, String)> {
    let mut result: Vec<(String, String)> = base
        .iter()
        .filter(|(key, _)| !overrides.iter().any(|(k, _)| k.eq_ignore_ascii_case(key)))
        .cloned()
        .collect();
    result.extend(overrides.iter().cloned());
    result
}

fn validate_id(id: &str) -> Result<(), DefinitionError> {
    let invalid = |reason| DefinitionError::InvalidEndpointId {
        id: id.to_string(),
        reason,
    };
    let mut chars = id.chars();
    match chars.next() {
        None => return Err(invalid("must not be empty")),
        Some(c) if !c.is_ascii_alphabetic() => {
            return Err(invalid("must start with an alphabetic character"));
        }
        _ => {}
    }
    if chars.any(|c| !c.is_ascii_alphanumeric() && c != '_') {
        return Err(invalid("may only contain alphanumerics and `_`"));
    }
    Ok(())
}
