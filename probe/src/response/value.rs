//! Bodies decoded into a declared [`ResponseShape`].

use probe_define::ResponseShape;
use probe_definitions::Record;
use serde_json::Value;

use crate::error::ValidationError;

/// A response body decoded according to an endpoint's declared shape.
///
/// ## Examples
///
/// ```rust
/// use probe::response::ResponseBody;
/// use probe_define::ResponseShape;
///
/// let body = ResponseBody::decode(&ResponseShape::record_list("Post"), b"[]").unwrap();
/// assert_eq!(body.as_records().map(<[_]>::len), Some(0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Raw text.
    Text(String),
    /// A single JSON object.
    Record(Record),
    /// A JSON array of objects.
    RecordList(Vec<Record>),
    /// No content.
    Empty,
}

impl ResponseBody {
    /// Decodes `body` into `shape`.
    ///
    /// ## Errors
    ///
    /// - [`ValidationError::EmptyBody`] when a record shape gets no content
    /// - [`ValidationError::JsonParse`] when a record shape gets invalid JSON
    /// - [`ValidationError::ShapeMismatch`] when the content is well formed
    ///   but of the wrong kind
    pub fn decode(shape: &ResponseShape, body: &[u8]) -> Result<Self, ValidationError> {
        let blank = body.iter().all(u8::is_ascii_whitespace);
        match shape {
            ResponseShape::Text => Ok(Self::Text(std::str::from_utf8(body)?.to_string())),
            ResponseShape::Empty if blank => Ok(Self::Empty),
            ResponseShape::Empty => Err(ValidationError::shape_mismatch(
                shape,
                format!("{} bytes", body.len()),
            )),
            ResponseShape::Record(_) | ResponseShape::RecordList(_) if blank => {
                Err(ValidationError::EmptyBody)
            }
            ResponseShape::Record(_) => match serde_json::from_slice(body)? {
                Value::Object(record) => Ok(Self::Record(record)),
                other => Err(ValidationError::shape_mismatch(shape, kind_of(&other))),
            },
            ResponseShape::RecordList(_) => match serde_json::from_slice(body)? {
                Value::Array(items) => items
                    .into_iter()
                    .map(|item| match item {
                        Value::Object(record) => Ok(record),
                        other => Err(ValidationError::shape_mismatch(
                            shape,
                            format!("array containing {}", kind_of(&other)),
                        )),
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(Self::RecordList),
                other => Err(ValidationError::shape_mismatch(shape, kind_of(&other))),
            },
        }
    }

    /// Returns the text for [`ResponseBody::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the record for [`ResponseBody::Record`].
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Returns the records for [`ResponseBody::RecordList`].
    pub fn as_records(&self) -> Option<&[Record]> {
        match self {
            Self::RecordList(records) => Some(records),
            _ => None,
        }
    }

    /// Short name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Record(_) => "record",
            Self::RecordList(_) => "record list",
            Self::Empty => "empty body",
        }
    }

    /// Returns `true` for no content, blank text or an empty list.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Record(_) => false,
            Self::RecordList(records) => records.is_empty(),
            Self::Empty => true,
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
