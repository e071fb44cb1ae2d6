//! Declared response shapes.
//!
//! The shape tells a front-end how to decode a successful response body.
//! Whether the service actually honours it is only known per call.

use std::fmt;

use crate::schema::Schema;

/// The shape a successful response body is expected to have.
///
/// ```
/// use probe_define::ResponseShape;
///
/// let shape = ResponseShape::record_list("Post");
/// assert!(shape.is_list());
/// assert_eq!(shape.to_string(), "list of Post records");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseShape {
    /// Raw text body, returned as-is.
    Text,

    /// A single JSON object.
    Record(Schema),

    /// A JSON array of objects.
    RecordList(Schema),

    /// No body is expected (e.g. 204 No Content).
    Empty,
}

impl ResponseShape {
    /// A single record of the named type.
    pub fn record(type_name: impl Into<String>) -> Self {
        Self::Record(Schema::new(type_name))
    }

    /// A list of records of the named type.
    pub fn record_list(type_name: impl Into<String>) -> Self {
        Self::RecordList(Schema::new(type_name))
    }

    /// Returns the schema for record shapes.
    pub fn schema(&self) -> Option<&Schema> {
        match self {
            Self::Record(schema) | Self::RecordList(schema) => Some(schema),
            Self::Text | Self::Empty => None,
        }
    }

    /// Returns true if this shape is decoded from JSON.
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Record(_) | Self::RecordList(_))
    }

    /// Returns true for [`ResponseShape::RecordList`].
    pub fn is_list(&self) -> bool {
        matches!(self, Self::RecordList(_))
    }

    /// Returns true for [`ResponseShape::Text`].
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text)
    }

    /// Returns true for [`ResponseShape::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl fmt::Display for ResponseShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Record(schema) => write!(f, "{schema} record"),
            Self::RecordList(schema) => write!(f, "list of {schema} records"),
            Self::Empty => write!(f, "empty body"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_is_json_but_not_list() {
        let shape = ResponseShape::record("Issue");
        assert!(shape.is_json());
        assert!(!shape.is_list());
        assert_eq!(shape.schema().map(|s| s.type_name.as_str()), Some("Issue"));
    }

    #[test]
    fn text_has_no_schema() {
        assert!(ResponseShape::Text.is_text());
        assert!(!ResponseShape::Text.is_json());
        assert!(ResponseShape::Text.schema().is_none());
    }

    #[test]
    fn empty_shape() {
        assert!(ResponseShape::Empty.is_empty());
        assert_eq!(ResponseShape::Empty.to_string(), "empty body");
    }

    #[test]
    fn display_names_the_schema() {
        assert_eq!(ResponseShape::record("User").to_string(), "User record");
    }
}
