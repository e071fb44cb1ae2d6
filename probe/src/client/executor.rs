//! Request execution with tracing instrumentation.
//!
//! This module provides the [`ApiClient`] struct for dispatching bound
//! requests with automatic auth handling and tracing.

use std::time::Duration;

use probe_define::{BoundRequest, Endpoint, RestApi, bearer};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use tracing::{Span, debug, instrument};
use url::Url;

use crate::config::{DEFAULT_TIMEOUT_SECS, ProbeConfig, resolve_credential};
use crate::error::{ApiError, AuthError, ClientError, ConfigError};
use crate::method::ToReqwest;
use crate::request::{RequestBody, RequestSpec, Response};

/// Builder for configuring an [`ApiClient`].
#[derive(Debug)]
pub struct ApiClientBuilder {
    base_url: Url,
    timeout: Duration,
    default_headers: HeaderMap,
    auth: Option<(probe_define::AuthStrategy, String)>,
    api: Option<RestApi>,
}

impl ApiClientBuilder {
    /// Creates a new builder with the specified base URL.
    fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_headers: HeaderMap::new(),
            auth: None,
            api: None,
        }
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds a default header to all requests.
    ///
    /// Headers set on an individual request take precedence.
    ///
    /// ## Errors
    ///
    /// Returns [`ClientError::InvalidHeader`] if the name or value is invalid.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, ApiError> {
        let (name, value) = header_pair(name.as_ref(), value.as_ref())?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets the authentication strategy and credential.
    ///
    /// The credential is applied to every request that does not already
    /// carry the strategy's header.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use probe::ApiClient;
    /// use probe_define::AuthStrategy;
    ///
    /// let client = ApiClient::builder("https://api.github.com".parse().unwrap())
    ///     .auth(AuthStrategy::BearerToken { header: None }, "ghp_example")
    ///     .build()
    ///     .unwrap();
    /// assert!(client.has_credential());
    /// ```
    pub fn auth(
        mut self,
        strategy: probe_define::AuthStrategy,
        credential: impl Into<String>,
    ) -> Self {
        self.auth = Some((strategy, credential.into()));
        self
    }

    /// Attaches an API definition.
    ///
    /// The API's headers become default headers, its endpoints become
    /// reachable through [`ApiClient::operation`], and its `env_auth` chain
    /// is reported when a credential is missing.
    ///
    /// ## Errors
    ///
    /// Returns [`ClientError::InvalidHeader`] if an API header is invalid.
    pub fn api(mut self, api: &RestApi) -> Result<Self, ApiError> {
        for (name, value) in &api.headers {
            self = self.default_header(name, value)?;
        }
        self.api = Some(api.clone());
        Ok(self)
    }

    /// Builds the [`ApiClient`].
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(self.default_headers)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(ClientError::Request)?;

        Ok(ApiClient {
            client,
            base_url: self.base_url,
            auth: self.auth,
            api: self.api,
        })
    }
}

/// Async HTTP client for dispatching endpoint calls.
///
/// The client wraps `reqwest::Client` with connection pooling. It never
/// judges a status code itself: every answer comes back as a [`Response`]
/// and the caller decides what counts as success.
///
/// ## Examples
///
/// ```rust,no_run
/// use probe::ApiClient;
/// use probe_definitions::{define_github_api, github};
///
/// # async fn run() -> Result<(), probe::ApiError> {
/// let api = define_github_api();
/// let client = ApiClient::builder("https://api.github.com".parse().unwrap())
///     .api(&api)?
///     .build()?;
///
/// let response = client
///     .operation(github::GET_USER)?
///     .param("user", "defunkt")
///     .send()
///     .await?;
/// assert_eq!(response.field("login"), Some("defunkt".into()));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
    auth: Option<(probe_define::AuthStrategy, String)>,
    api: Option<RestApi>,
}

impl ApiClient {
    /// Creates a new builder for configuring an API client.
    pub fn builder(base_url: Url) -> ApiClientBuilder {
        ApiClientBuilder::new(base_url)
    }

    /// Creates a new API client with default settings.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, ApiError> {
        Self::builder(base_url).build()
    }

    /// Creates a client for `api` using `config`.
    ///
    /// The credential is taken from the API's `env_auth` chain when one is
    /// set; without it, endpoints that need auth fail before sending.
    ///
    /// ## Errors
    ///
    /// Returns an error for an invalid base URL or header.
    pub fn for_api(api: &RestApi, config: &ProbeConfig) -> Result<Self, ApiError> {
        let mut builder = Self::builder(config.base_url_for(api)?)
            .timeout(config.timeout)
            .api(api)?;

        match resolve_credential(api) {
            Ok(credential) => builder = builder.auth(api.auth.clone(), credential),
            Err(_) if api.auth.requires_credential() => {
                debug!(api = %api.name, "no credential in environment");
            }
            Err(_) => {}
        }

        builder.build()
    }

    /// Returns the base URL for this client.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the attached API definition.
    pub fn api(&self) -> Option<&RestApi> {
        self.api.as_ref()
    }

    /// Returns `true` if a credential is configured.
    pub fn has_credential(&self) -> bool {
        self.auth.is_some()
    }

    /// Starts a request for `endpoint`.
    pub fn given<'a>(&'a self, endpoint: &'a Endpoint) -> RequestSpec<'a> {
        RequestSpec::new(self, endpoint)
    }

    /// Starts a request for an endpoint of the attached API.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::UnknownEndpoint`] if no API is attached or it
    /// has no endpoint `id`.
    pub fn operation(&self, id: &str) -> Result<RequestSpec<'_>, ApiError> {
        let api = self
            .api
            .as_ref()
            .ok_or_else(|| ConfigError::unknown_endpoint("<none>", id))?;
        let endpoint = api
            .endpoint(id)
            .ok_or_else(|| ConfigError::unknown_endpoint(&api.name, id))?;
        Ok(self.given(endpoint))
    }

    /// Sends a bound request and returns the response, whatever its status.
    ///
    /// ## Errors
    ///
    /// Returns an error if:
    /// - the endpoint needs a credential and none is available
    /// - a header is invalid or the URL cannot be built
    /// - the request fails (network, timeout, etc.)
    #[instrument(
        name = "api_request",
        skip(self, endpoint, bound, body),
        fields(
            api.operation = %bound.endpoint_id,
            http.method = tracing::field::Empty,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn execute(
        &self,
        endpoint: &Endpoint,
        bound: &BoundRequest,
        body: Option<&RequestBody>,
    ) -> Result<Response, ApiError> {
        Span::current().record("http.method", bound.method.to_string().as_str());
        let url = self.url_for(bound)?;
        Span::current().record("http.url", url.as_str());

        let mut request = self.client.request(bound.method.to_reqwest(), url);
        for (name, value) in &bound.headers {
            let (name, value) = header_pair(name, value)?;
            request = request.header(name, value);
        }
        request = self.apply_auth(request, endpoint, bound)?;

        match body {
            Some(RequestBody::Json(value)) => request = request.json(value),
            Some(RequestBody::Text {
                content,
                content_type,
            }) => {
                let (name, value) = header_pair(CONTENT_TYPE.as_str(), content_type)?;
                request = request.header(name, value).body(content.clone());
            }
            None => {}
        }

        debug!(
            headers = ?redacted(&bound.headers),
            query = ?bound.query,
            body = body.map(RequestBody::kind),
            "sending request"
        );

        let response = request.send().await.map_err(ClientError::from_transport)?;

        let status = response.status();
        let status_code = status.as_u16();
        Span::current().record("http.status_code", status_code);

        let otel_status = if status_code == endpoint.expected_status {
            "OK"
        } else if status.is_server_error() {
            "ERROR"
        } else {
            "UNSET"
        };
        Span::current().record("otel.status_code", otel_status);

        let headers = response.headers().clone();
        let bytes = response.bytes().await.map_err(ClientError::Request)?;

        debug!(
            status = status_code,
            expected = endpoint.expected_status,
            bytes = bytes.len(),
            "received response"
        );

        Ok(Response::new(endpoint, status_code, headers, bytes))
    }

    /// Joins the base URL, the bound path and the query string.
    ///
    /// The base URL's own path is kept as a prefix.
    fn url_for(&self, bound: &BoundRequest) -> Result<Url, ApiError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}{}", bound.path)).map_err(ConfigError::from)?;
        if !bound.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&bound.query);
        }
        Ok(url)
    }

    /// Applies the configured credential unless the request already carries
    /// the auth header.
    fn apply_auth(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: &Endpoint,
        bound: &BoundRequest,
    ) -> Result<reqwest::RequestBuilder, ApiError> {
        let strategy = self
            .auth
            .as_ref()
            .map(|(strategy, _)| strategy)
            .or_else(|| self.api.as_ref().map(|api| &api.auth));
        let header = strategy
            .and_then(|s| s.header_name())
            .unwrap_or("Authorization");

        if bound.header(header).is_some() {
            return Ok(request);
        }

        match &self.auth {
            Some((strategy, credential)) => match strategy.header_value(credential) {
                Some(value) => {
                    let (name, value) = header_pair(header, &value)?;
                    Ok(request.header(name, value))
                }
                None => Ok(request),
            },
            None if endpoint.auth_required => Err(AuthError::MissingCredential {
                env_vars: self
                    .api
                    .as_ref()
                    .map(|api| api.env_auth.clone())
                    .unwrap_or_default(),
            }
            .into()),
            None => Ok(request),
        }
    }
}

fn header_pair(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), ClientError> {
    let header_name = HeaderName::try_from(name)
        .map_err(|e| ClientError::InvalidHeader(format!("{name:?}: {e}")))?;
    let header_value = HeaderValue::try_from(value)
        .map_err(|e| ClientError::InvalidHeader(format!("value of {name}: {e}")))?;
    Ok((header_name, header_value))
}

/// Header list with credential values masked, for logging.
fn redacted(headers: &[(String, String)]) -> Vec<(&str, &str)> {
    headers
        .iter()
        .map(|(name, value)| {
            if name.eq_ignore_ascii_case("authorization") {
                (name.as_str(), "<redacted>")
            } else {
                (name.as_str(), value.as_str())
            }
        })
        .collect()
}

/// Formats `token` as a bearer header value, rejecting blank tokens.
pub(crate) fn bearer_value(token: &str) -> Result<String, AuthError> {
    if token.trim().is_empty() {
        return Err(AuthError::EmptyToken);
    }
    Ok(bearer(token))
}
