//! API test-automation harness.
//!
//! One descriptor table (`probe-definitions`) drives two client styles:
//!
//! - a declarative builder: [`ApiClient::given`] / [`ApiClient::operation`]
//!   followed by [`RequestSpec::send`], returning a [`Response`] for any
//!   status;
//! - typed service proxies: [`GitHubService`] and [`GorestService`], whose
//!   methods return a [`Reply`].
//!
//! ## Features
//!
//! - **Descriptor-driven**: paths, parameters and expected statuses come
//!   from the registry, never from call sites
//! - **Async HTTP client**: built on `reqwest` with `tokio`, one awaited
//!   round trip per call
//! - **Layered error handling**: structured errors for transport, decoding,
//!   credentials and configuration
//! - **Tracing**: every call runs in an `api_request` span
//!
//! ## Example
//!
//! ```rust,no_run
//! use probe::{ApiClient, GitHubService};
//! use probe::config::ProbeConfig;
//! use probe_definitions::{define_github_api, github};
//!
//! # async fn run() -> Result<(), probe::ApiError> {
//! probe::logging::init();
//!
//! // Builder style
//! let client = ApiClient::for_api(&define_github_api(), &ProbeConfig::from_env()?)?;
//! let response = client.operation(github::GET_USER)?.param("user", "defunkt").send().await?;
//! assert_eq!(response.status(), 200);
//!
//! // Proxy style
//! let github = GitHubService::from_env()?;
//! assert!(github.zen().await?.is_successful());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod logging;
mod method;
pub mod request;
pub mod response;
pub mod service;

pub use client::{ApiClient, ApiClientBuilder};
pub use config::{ProbeConfig, resolve_credential};
pub use error::{ApiError, AuthError, ClientError, ConfigError, ValidationError};
pub use request::{RequestBody, RequestSpec, Response};
pub use response::{JsonBody, JsonFormat, PlainTextFormat, ResponseBody, ResponseFormat};
pub use service::{GitHubService, GorestService, Proxy, Reply, ServiceRequest};
