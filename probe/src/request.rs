//! Declarative request builder.
//!
//! A [`RequestSpec`] is started from an endpoint, given arguments and an
//! optional body, then sent. The resulting [`Response`] is returned for every
//! status so that assertions can be made on failures as well as successes.
//!
//! ```rust,no_run
//! use probe::ApiClient;
//! use probe::config::ProbeConfig;
//! use probe_definitions::{define_gorest_api, gorest};
//!
//! # async fn run() -> Result<(), probe::ApiError> {
//! let client = ApiClient::for_api(&define_gorest_api(), &ProbeConfig::from_env()?)?;
//!
//! let response = client
//!     .operation(gorest::CREATE_POST)?
//!     .bearer("token")
//!     .param("user", "7439480")
//!     .param("title", "test-title")
//!     .param("body", "text")
//!     .send()
//!     .await?;
//!
//! assert_eq!(response.status(), 201);
//! assert_eq!(response.field("title"), Some("test-title".into()));
//! # Ok(())
//! # }
//! ```

use bytes::Bytes;
use probe_define::{Endpoint, ParamLocation, ResponseShape, merge_headers};
use probe_definitions::Record;
use reqwest::header::HeaderMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::{ApiClient, bearer_value};
use crate::error::{ApiError, ValidationError};
use crate::response::ResponseBody;

/// A request body.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Serialized as JSON with `Content-Type: application/json`.
    Json(Value),
    /// Sent verbatim with the given content type.
    Text {
        /// The body.
        content: String,
        /// The `Content-Type` header value.
        content_type: String,
    },
}

impl RequestBody {
    /// Serializes `value` into a JSON body.
    ///
    /// ## Errors
    ///
    /// Returns [`ValidationError::JsonEncode`] if `value` cannot be encoded.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, ValidationError> {
        serde_json::to_value(value)
            .map(Self::Json)
            .map_err(ValidationError::JsonEncode)
    }

    /// A raw body with an explicit content type.
    pub fn text(content: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
            content_type: content_type.into(),
        }
    }

    /// The `Content-Type` this body is sent with.
    pub fn content_type(&self) -> &str {
        match self {
            Self::Json(_) => "application/json",
            Self::Text { content_type, .. } => content_type,
        }
    }

    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Json(_) => "json",
            Self::Text { .. } => "text",
        }
    }
}

/// A request under construction.
///
/// Errors from the builder steps are held back and returned by
/// [`send`](RequestSpec::send), so calls can be chained without `?`.
#[derive(Debug)]
#[must_use = "a request does nothing until it is sent"]
pub struct RequestSpec<'a> {
    client: &'a ApiClient,
    endpoint: &'a Endpoint,
    args: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: Option<RequestBody>,
    error: Option<ApiError>,
}

impl<'a> RequestSpec<'a> {
    pub(crate) fn new(client: &'a ApiClient, endpoint: &'a Endpoint) -> Self {
        Self {
            client,
            endpoint,
            args: Vec::new(),
            headers: Vec::new(),
            body: None,
            error: None,
        }
    }

    /// The endpoint this request is for.
    pub fn endpoint(&self) -> &Endpoint {
        self.endpoint
    }

    /// Supplies a declared parameter. A repeated name replaces the earlier
    /// value.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.args.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.args.push((name, value.into()));
        self
    }

    /// Sets a header, overriding endpoint and default headers.
    ///
    /// A header the endpoint declares as a parameter is supplied as that
    /// parameter, so it satisfies a required declaration.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        if self
            .endpoint
            .params_at(ParamLocation::Header)
            .any(|p| p.matches(&name))
        {
            return self.param(name, value);
        }
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    /// Sends `token` as `Authorization: Bearer <token>`.
    ///
    /// Goes through the endpoint's `Authorization` parameter when it
    /// declares one. A blank token fails the request with
    /// [`AuthError::EmptyToken`](crate::AuthError::EmptyToken).
    pub fn bearer(self, token: &str) -> Self {
        match bearer_value(token) {
            Ok(value) => self.header("Authorization", value),
            Err(e) => self.fail(e),
        }
    }

    /// Sets a JSON body.
    pub fn json_body<T: Serialize + ?Sized>(self, value: &T) -> Self {
        match RequestBody::json(value) {
            Ok(body) => self.body(body),
            Err(e) => self.fail(e),
        }
    }

    /// Sets a raw body sent verbatim with `content_type`.
    pub fn text_body(self, content: impl Into<String>, content_type: impl Into<String>) -> Self {
        self.body(RequestBody::text(content, content_type))
    }

    /// Sets the body.
    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    fn fail(mut self, err: impl Into<ApiError>) -> Self {
        if self.error.is_none() {
            self.error = Some(err.into());
        }
        self
    }

    /// Binds the arguments and sends the request.
    ///
    /// ## Errors
    ///
    /// - any error held back from a builder step
    /// - [`ConfigError::Definition`](crate::ConfigError::Definition) when
    ///   binding fails (missing, blank or unknown arguments) or the body
    ///   does not fit the endpoint's declared request body
    /// - transport and credential errors from [`ApiClient::execute`]
    ///
    /// A status other than the expected one is not an error here; see
    /// [`Response::error_for_status`].
    pub async fn send(self) -> Result<Response, ApiError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        self.endpoint
            .check_body(self.body.as_ref().map(RequestBody::content_type))?;

        let args: Vec<(&str, &str)> = self
            .args
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        let mut bound = self.endpoint.bind(&args)?;
        bound.headers = merge_headers(&bound.headers, &self.headers);

        self.client
            .execute(self.endpoint, &bound, self.body.as_ref())
            .await
    }
}

/// A response with its status, headers and raw body.
///
/// Decoding is done on demand; every accessor re-reads the stored body.
#[derive(Debug, Clone)]
pub struct Response {
    operation: String,
    status: u16,
    expected_status: u16,
    shape: ResponseShape,
    headers: HeaderMap,
    body: Bytes,
}

impl Response {
    pub(crate) fn new(endpoint: &Endpoint, status: u16, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            operation: endpoint.id.clone(),
            status,
            expected_status: endpoint.expected_status,
            shape: endpoint.response.clone(),
            headers,
            body,
        }
    }

    /// The endpoint id this response answers.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// The status the endpoint declares for success.
    pub fn expected_status(&self) -> u16 {
        self.expected_status
    }

    /// Returns `true` if the status is the declared one.
    pub fn is_expected(&self) -> bool {
        self.status == self.expected_status
    }

    /// A response header, if present and valid text.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The raw body.
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// The body as text.
    ///
    /// ## Errors
    ///
    /// Returns [`ValidationError::InvalidUtf8`] for non-UTF-8 content.
    pub fn text(&self) -> Result<&str, ValidationError> {
        Ok(std::str::from_utf8(&self.body)?)
    }

    /// Returns `true` if the body is empty or whitespace.
    pub fn is_empty(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// Deserializes the body as JSON.
    ///
    /// ## Errors
    ///
    /// [`ValidationError::EmptyBody`] or [`ValidationError::JsonParse`].
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyBody);
        }
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// The body as a single record.
    pub fn record(&self) -> Result<Record, ValidationError> {
        match ResponseBody::decode(&ResponseShape::record("Record"), &self.body)? {
            ResponseBody::Record(record) => Ok(record),
            other => Err(ValidationError::shape_mismatch("record", other.kind())),
        }
    }

    /// The body as a list of records.
    pub fn records(&self) -> Result<Vec<Record>, ValidationError> {
        match ResponseBody::decode(&ResponseShape::record_list("Record"), &self.body)? {
            ResponseBody::RecordList(records) => Ok(records),
            other => Err(ValidationError::shape_mismatch("record list", other.kind())),
        }
    }

    /// A top-level field of a record body.
    ///
    /// `None` when the body is not a record or lacks the field.
    pub fn field(&self, name: &str) -> Option<Value> {
        self.record().ok()?.remove(name)
    }

    /// The named field of every record in a list body.
    ///
    /// Records without the field are skipped; a body that is not a list
    /// yields nothing.
    pub fn pluck(&self, name: &str) -> Vec<Value> {
        self.records()
            .map(|records| {
                records
                    .into_iter()
                    .filter_map(|mut record| record.remove(name))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Decodes the body into the endpoint's declared shape.
    ///
    /// ## Errors
    ///
    /// See [`ResponseBody::decode`].
    pub fn decode(&self) -> Result<ResponseBody, ValidationError> {
        ResponseBody::decode(&self.shape, &self.body)
    }

    /// Returns `self` for the expected status, otherwise the matching error.
    ///
    /// ## Errors
    ///
    /// See [`ApiError::unexpected_status`].
    pub fn error_for_status(self) -> Result<Self, ApiError> {
        if self.is_expected() {
            return Ok(self);
        }
        let body = String::from_utf8_lossy(&self.body).into_owned();
        Err(ApiError::unexpected_status(
            &self.operation,
            self.expected_status,
            self.status,
            body,
        ))
    }
}
