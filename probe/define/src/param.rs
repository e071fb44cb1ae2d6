//! Endpoint parameter declarations.
//!
//! Every value a caller passes to an operation is declared up front with the
//! place it travels in: a path placeholder, a query string pair, or a header.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Where a parameter is placed in the outgoing request.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ParamLocation {
    /// Substituted into a `{name}` placeholder of the path template.
    Path,
    /// Appended to the query string.
    Query,
    /// Sent as a request header.
    Header,
}

/// A single declared parameter.
///
/// Parameters are required by default. Path parameters are always required;
/// [`RestApi::validate`](crate::RestApi::validate) rejects an optional one.
///
/// ```
/// use probe_define::{Param, ParamLocation};
///
/// let title = Param::query("title").with_description("Post title");
/// assert_eq!(title.location, ParamLocation::Query);
/// assert!(title.required);
///
/// let accept = Param::header("Accept").optional();
/// assert!(!accept.required);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    /// Name as it appears on the wire (placeholder, query key or header name).
    pub name: String,
    /// Where the value is placed.
    pub location: ParamLocation,
    /// Whether the caller must supply a value.
    pub required: bool,
    /// Whether a blank value is sent as-is instead of being rejected.
    #[serde(default)]
    pub allow_empty: bool,
    /// Human-readable description.
    pub description: Option<String>,
}

impl Param {
    fn new(name: impl Into<String>, location: ParamLocation) -> Self {
        Self {
            name: name.into(),
            location,
            required: true,
            allow_empty: false,
            description: None,
        }
    }

    /// A required path placeholder.
    pub fn path(name: impl Into<String>) -> Self {
        Self::new(name, ParamLocation::Path)
    }

    /// A required query parameter.
    pub fn query(name: impl Into<String>) -> Self {
        Self::new(name, ParamLocation::Query)
    }

    /// A required header.
    pub fn header(name: impl Into<String>) -> Self {
        Self::new(name, ParamLocation::Header)
    }

    /// Makes the parameter optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Accepts blank values. The parameter must still be supplied when
    /// required, but `""` and whitespace are sent verbatim.
    pub fn allow_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Returns true if `name` refers to this parameter.
    ///
    /// Header names compare case-insensitively, everything else exactly.
    pub fn matches(&self, name: &str) -> bool {
        match self.location {
            ParamLocation::Header => self.name.eq_ignore_ascii_case(name),
            ParamLocation::Path | ParamLocation::Query => self.name == name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn constructors_set_location() {
        assert_eq!(Param::path("user").location, ParamLocation::Path);
        assert_eq!(Param::query("title").location, ParamLocation::Query);
        assert_eq!(Param::header("Authorization").location, ParamLocation::Header);
    }

    #[test]
    fn required_by_default() {
        assert!(Param::query("body").required);
        assert!(!Param::query("body").optional().required);
    }

    #[test]
    fn blank_values_are_rejected_unless_allowed() {
        assert!(!Param::query("title").allow_empty);
        let title = Param::query("title").allow_empty();
        assert!(title.allow_empty);
        assert!(title.required);
    }

    #[test]
    fn header_match_ignores_case() {
        let param = Param::header("Authorization");
        assert!(param.matches("authorization"));
        assert!(param.matches("AUTHORIZATION"));
    }

    #[test]
    fn query_match_is_exact() {
        let param = Param::query("title");
        assert!(param.matches("title"));
        assert!(!param.matches("Title"));
    }

    #[test]
    fn location_round_trips_through_strings() {
        assert_eq!(ParamLocation::Header.to_string(), "header");
        assert_eq!(ParamLocation::from_str("query").unwrap(), ParamLocation::Query);
        let json = serde_json::to_string(&ParamLocation::Path).unwrap();
        assert_eq!(json, "\"path\"");
    }
}
