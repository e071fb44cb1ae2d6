//! HTTP client module.
//!
//! This module provides the async HTTP client that dispatches bound
//! requests with authentication handling and tracing instrumentation.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use probe::ApiClient;
//! use probe::config::ProbeConfig;
//! use probe_definitions::{define_github_api, github};
//!
//! # async fn run() -> Result<(), probe::ApiError> {
//! let api = define_github_api();
//! let client = ApiClient::for_api(&api, &ProbeConfig::from_env()?)?;
//!
//! let response = client.operation(github::ZEN)?.send().await?;
//! assert_eq!(response.status(), 200);
//! # Ok(())
//! # }
//! ```

mod executor;

pub use executor::{ApiClient, ApiClientBuilder};
pub(crate) use executor::bearer_value;
