//! Untyped JSON records.
//!
//! A [`Record`] is the order-irrelevant field map used for bodies that have
//! no dedicated Rust type, such as the generic CRUD payloads.

use serde::Serialize;
use serde_json::{Map, Value};

/// A JSON object: field name to value.
pub type Record = Map<String, Value>;

/// Read helpers for [`Record`].
pub trait RecordExt {
    /// Returns a string field, or `None` when absent or not a string.
    fn str_field(&self, key: &str) -> Option<&str>;

    /// Returns an integer field, or `None` when absent or not an integer.
    fn i64_field(&self, key: &str) -> Option<i64>;

    /// Returns a nested record field.
    fn record_field(&self, key: &str) -> Option<&Record>;
}

impl RecordExt for Record {
    fn str_field(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    fn i64_field(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    fn record_field(&self, key: &str) -> Option<&Record> {
        self.get(key).and_then(Value::as_object)
    }
}

/// Converts any serializable value that encodes as a JSON object into a record.
///
/// Returns `None` when the value serializes to anything other than an object.
///
/// ```
/// use probe_definitions::{Issue, to_record};
/// use probe_definitions::RecordExt;
///
/// let record = to_record(&Issue::new("Bug: crash", "Steps")).unwrap();
/// assert_eq!(record.str_field("title"), Some("Bug: crash"));
/// ```
pub fn to_record<T: Serialize>(value: &T) -> Option<Record> {
    match serde_json::to_value(value).ok()? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// Builds a record from string pairs, keeping the last value for a repeated key.
pub fn record_of<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> Record {
    fields
        .into_iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect()
}
