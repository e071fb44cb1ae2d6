//! Request body descriptors.

use crate::schema::Schema;

/// Describes the body an endpoint accepts.
///
/// ```
/// use probe_define::ApiRequest;
///
/// let request = ApiRequest::json_type("Issue");
/// assert_eq!(request.content_type(), "application/json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    /// JSON body of the given type.
    Json(Schema),

    /// Raw text body with an explicit MIME type.
    Text {
        /// MIME type (e.g., "text/plain").
        content_type: String,
    },
}

impl ApiRequest {
    /// Creates a JSON request with the given schema.
    pub fn json(schema: Schema) -> Self {
        Self::Json(schema)
    }

    /// Creates a JSON request with just a type name.
    pub fn json_type(type_name: impl Into<String>) -> Self {
        Self::Json(Schema::new(type_name))
    }

    /// Creates a raw text request.
    pub fn text(content_type: impl Into<String>) -> Self {
        Self::Text {
            content_type: content_type.into(),
        }
    }

    /// The `Content-Type` header value for this body.
    pub fn content_type(&self) -> &str {
        match self {
            Self::Json(_) => "application/json",
            Self::Text { content_type } => content_type,
        }
    }

    /// Returns `true` if a body sent as `content_type` fits this descriptor.
    ///
    /// Media types compare case-insensitively; parameters such as
    /// `charset` are ignored.
    pub fn accepts(&self, content_type: &str) -> bool {
        media_type(content_type).eq_ignore_ascii_case(media_type(self.content_type()))
    }
}

fn media_type(content_type: &str) -> &str {
    content_type.split(';').next().unwrap_or_default().trim()
}

impl From<Schema> for ApiRequest {
    fn from(schema: Schema) -> Self {
        Self::Json(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_type_creates_schema() {
        let ApiRequest::Json(schema) = ApiRequest::json_type("Issue") else {
            panic!("expected a JSON request");
        };
        assert_eq!(schema.type_name, "Issue");
    }

    #[test]
    fn text_keeps_content_type() {
        let request = ApiRequest::text("text/csv");
        assert_eq!(request.content_type(), "text/csv");
    }

    #[test]
    fn accepts_ignores_case_and_parameters() {
        let request = ApiRequest::json_type("Issue");
        assert!(request.accepts("application/json"));
        assert!(request.accepts("Application/JSON; charset=utf-8"));
        assert!(!request.accepts("text/plain"));
    }

    #[test]
    fn from_schema_is_json() {
        let request: ApiRequest = Schema::new("Post").into();
        assert_eq!(request.content_type(), "application/json");
    }
}
