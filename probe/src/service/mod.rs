//! Typed service proxies.
//!
//! Each service exposes one async method per operation. A method builds a
//! request variant, and the shared [`Proxy`] binds it against the
//! descriptor table, sends it and decodes the body with the operation's
//! [`ResponseFormat`].
//!
//! ```rust,no_run
//! use probe::service::GorestService;
//!
//! # async fn run() -> Result<(), probe::ApiError> {
//! let gorest = GorestService::from_env()?;
//! let reply = gorest.list_posts("token", "7439480").await?;
//! if reply.is_successful() {
//!     println!("{} posts", reply.body().map(Vec::len).unwrap_or(0));
//! }
//! # Ok(())
//! # }
//! ```

mod github;
mod gorest;

pub use github::{GitHubRequest, GitHubService};
pub use gorest::{GorestRequest, GorestService};

use probe_define::RestApi;
use probe_definitions::registry;

use crate::client::ApiClient;
use crate::config::ProbeConfig;
use crate::error::{ApiError, ConfigError, ValidationError};
use crate::request::{RequestBody, Response};
use crate::response::ResponseFormat;

/// Arguments and body of a service request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestParts {
    /// `(parameter, value)` pairs, bound by name.
    pub args: Vec<(&'static str, String)>,
    /// Request body, if any.
    pub body: Option<RequestBody>,
}

/// One operation call of a service, ready to be dispatched.
pub trait ServiceRequest {
    /// Id of the endpoint this request targets.
    fn endpoint_id(&self) -> &'static str;

    /// Converts the request into its arguments and body.
    ///
    /// ## Errors
    ///
    /// Fails when an argument is invalid before binding (e.g. a blank token)
    /// or the body cannot be encoded.
    fn into_parts(self) -> Result<RequestParts, ApiError>;
}

/// Dispatches [`ServiceRequest`]s through an [`ApiClient`].
#[derive(Debug, Clone)]
pub struct Proxy {
    client: ApiClient,
}

impl Proxy {
    /// Wraps a client with an attached API definition.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Builds a proxy for the registered API `name`.
    ///
    /// ## Errors
    ///
    /// Returns an error if the API is not registered or the client cannot be
    /// built.
    pub fn for_registered(name: &str, config: &ProbeConfig) -> Result<Self, ApiError> {
        let api = registered_api(name)?;
        Ok(Self::new(ApiClient::for_api(api, config)?))
    }

    /// The underlying client.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Sends `request` and decodes an expected-status body with `F`.
    ///
    /// ## Errors
    ///
    /// Binding, credential and transport errors, a shape mismatch when `F`
    /// cannot read the endpoint's declared response, plus decoding errors for
    /// a body that arrived with the expected status. Other statuses are not
    /// errors; they are reported through [`Reply`].
    pub async fn call<F: ResponseFormat>(
        &self,
        request: impl ServiceRequest,
    ) -> Result<Reply<F::Output>, ApiError> {
        let id = request.endpoint_id();
        let RequestParts { args, body } = request.into_parts()?;

        let mut spec = self.client.operation(id)?;
        let declared = &spec.endpoint().response;
        if !F::reads(declared) {
            return Err(ValidationError::shape_mismatch(declared, F::NAME).into());
        }
        for (name, value) in args {
            spec = spec.param(name, value);
        }
        if let Some(body) = body {
            spec = spec.body(body);
        }

        let response = spec.send().await?;
        Reply::decode::<F>(response).await
    }
}

fn registered_api(name: &str) -> Result<&'static RestApi, ApiError> {
    registry()?.api(name).ok_or_else(|| {
        ConfigError::UnknownApi {
            name: name.to_string(),
        }
        .into()
    })
}

/// The outcome of a proxied call.
///
/// Carries the decoded body when the status is the expected one, and the raw
/// body otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<T> {
    operation: String,
    code: u16,
    expected: u16,
    body: Option<T>,
    error_body: Option<String>,
}

impl<T> Reply<T> {
    async fn decode<F>(response: Response) -> Result<Self, ApiError>
    where
        F: ResponseFormat<Output = T>,
    {
        let (body, error_body) = if response.is_expected() {
            response.decode()?;
            (Some(F::parse(response.bytes().clone()).await?), None)
        } else {
            let raw = String::from_utf8_lossy(response.bytes()).into_owned();
            (None, Some(raw))
        };

        Ok(Self {
            operation: response.operation().to_string(),
            code: response.status(),
            expected: response.expected_status(),
            body,
            error_body,
        })
    }

    /// The endpoint id this reply answers.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// HTTP status code.
    pub fn code(&self) -> u16 {
        self.code
    }

    /// The status the endpoint declares for success.
    pub fn expected_code(&self) -> u16 {
        self.expected
    }

    /// Returns `true` if the status is the declared one.
    pub fn is_successful(&self) -> bool {
        self.code == self.expected
    }

    /// The decoded body of a successful reply.
    pub fn body(&self) -> Option<&T> {
        self.body.as_ref()
    }

    /// The raw body of an unsuccessful reply.
    pub fn error_body(&self) -> Option<&str> {
        self.error_body.as_deref()
    }

    /// The decoded body, or the error for the status.
    ///
    /// ## Errors
    ///
    /// See [`ApiError::unexpected_status`].
    pub fn into_body(self) -> Result<T, ApiError> {
        match self.body {
            Some(body) => Ok(body),
            None => Err(ApiError::unexpected_status(
                &self.operation,
                self.expected,
                self.code,
                self.error_body.unwrap_or_default(),
            )),
        }
    }
}
