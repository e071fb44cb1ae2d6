//! Runtime configuration and credential lookup.
//!
//! Base URLs and the timeout come from `PROBE_*` environment variables so
//! the suites can be pointed at a stub server. Credentials are never part of
//! a definition; they are looked up through each API's `env_auth` chain.

use std::time::Duration;

use probe_define::RestApi;
use probe_definitions::{github, gorest};
use url::Url;

use crate::error::{AuthError, ConfigError};

/// Overrides the GitHub base URL.
pub const GITHUB_URL_VAR: &str = "PROBE_GITHUB_URL";
/// Overrides the GoRest base URL.
pub const GOREST_URL_VAR: &str = "PROBE_GOREST_URL";
/// Request timeout in whole seconds.
pub const TIMEOUT_VAR: &str = "PROBE_TIMEOUT_SECS";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DEFAULT_GITHUB_URL: &str = "https://api.github.com";
const DEFAULT_GOREST_URL: &str = "https://gorest.co.in";

/// Where each service lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    /// GitHub base URL.
    pub github_url: Url,
    /// GoRest base URL.
    pub gorest_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ProbeConfig {
    /// Reads configuration from the process environment.
    ///
    /// ## Errors
    ///
    /// - [`ConfigError::InvalidUrl`] for an unparsable base URL
    /// - [`ConfigError::InvalidValue`] for a non-numeric timeout
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// ```
    /// use probe::config::ProbeConfig;
    ///
    /// let config = ProbeConfig::from_lookup(|var| {
    ///     (var == "PROBE_GOREST_URL").then(|| "http://localhost:8080".to_string())
    /// })
    /// .unwrap();
    /// assert_eq!(config.gorest_url.as_str(), "http://localhost:8080/");
    /// assert_eq!(config.github_url.as_str(), "https://api.github.com/");
    /// ```
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = |var: &str, default: &str| -> Result<Url, ConfigError> {
            let raw = lookup(var).filter(|v| !v.trim().is_empty());
            Ok(Url::parse(raw.as_deref().unwrap_or(default).trim())?)
        };

        let timeout = match lookup(TIMEOUT_VAR).filter(|v| !v.trim().is_empty()) {
            None => DEFAULT_TIMEOUT_SECS,
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    var: TIMEOUT_VAR.to_string(),
                    value: raw.clone(),
                })?,
        };

        Ok(Self {
            github_url: url(GITHUB_URL_VAR, DEFAULT_GITHUB_URL)?,
            gorest_url: url(GOREST_URL_VAR, DEFAULT_GOREST_URL)?,
            timeout: Duration::from_secs(timeout),
        })
    }

    /// Returns the base URL to use for `api`.
    ///
    /// Bundled APIs use the configured URL; any other API uses its own
    /// `base_url`.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if a foreign API's base URL does
    /// not parse.
    pub fn base_url_for(&self, api: &RestApi) -> Result<Url, ConfigError> {
        match api.name.as_str() {
            github::API_NAME => Ok(self.github_url.clone()),
            gorest::API_NAME => Ok(self.gorest_url.clone()),
            _ => Ok(Url::parse(&api.base_url)?),
        }
    }
}

/// Returns the first non-blank credential in `api`'s `env_auth` chain.
///
/// ## Errors
///
/// Returns [`AuthError::MissingCredential`] naming every variable checked.
pub fn resolve_credential(api: &RestApi) -> Result<String, AuthError> {
    resolve_credential_with(api, |var| std::env::var(var).ok())
}

/// [`resolve_credential`] with an explicit variable lookup.
pub fn resolve_credential_with(
    api: &RestApi,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, AuthError> {
    api.env_auth
        .iter()
        .filter_map(|var| lookup(var))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .ok_or_else(|| AuthError::MissingCredential {
            env_vars: api.env_auth.clone(),
        })
}
