//! Typed body decoders for the service proxies.
//!
//! A [`ResponseFormat`] turns the raw bytes of an expected-status reply into
//! the value a service method returns. Each format also states which
//! declared [`ResponseShape`]s it can read, so a proxy method wired to the
//! wrong decoder fails before anything is sent. The body itself is checked
//! against the declared shape before it reaches a format.

use std::future::Future;
use std::marker::PhantomData;

use bytes::Bytes;
use probe_define::ResponseShape;
use probe_definitions::{Issue, Post, Record};
use serde::de::DeserializeOwned;

use crate::error::ValidationError;

/// Decodes a reply body into a typed value.
pub trait ResponseFormat: Send + Sync {
    /// Decoded value.
    type Output: Send + Sync;

    /// Short name used in shape-mismatch errors.
    const NAME: &'static str;

    /// Decodes `body`.
    fn parse(body: Bytes) -> impl Future<Output = Result<Self::Output, ValidationError>> + Send;

    /// Returns `true` if this format can decode a body of the `declared` shape.
    fn reads(declared: &ResponseShape) -> bool;
}

/// A type a JSON reply body deserializes into.
///
/// `IS_LIST` ties the type to the shape it can read: `Vec`s read record
/// lists, everything else reads a single record.
pub trait JsonBody: DeserializeOwned + Send + Sync {
    /// Whether the type is decoded from a JSON array.
    const IS_LIST: bool = false;
}

impl<T: JsonBody> JsonBody for Vec<T> {
    const IS_LIST: bool = true;
}

impl JsonBody for Record {}
impl JsonBody for Issue {}
impl JsonBody for Post {}

/// Deserializes a JSON record or list of records into `T`.
///
/// A blank body is [`ValidationError::EmptyBody`] rather than a parse error,
/// which keeps "server sent nothing" apart from "server sent garbage".
#[derive(Debug, Clone, Copy)]
pub struct JsonFormat<T>(PhantomData<T>);

impl<T: JsonBody> ResponseFormat for JsonFormat<T> {
    type Output = T;

    const NAME: &'static str = "json";

    async fn parse(body: Bytes) -> Result<T, ValidationError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(ValidationError::EmptyBody);
        }
        serde_json::from_slice(&body).map_err(ValidationError::JsonParse)
    }

    fn reads(declared: &ResponseShape) -> bool {
        match declared {
            ResponseShape::Record(_) => !T::IS_LIST,
            ResponseShape::RecordList(_) => T::IS_LIST,
            ResponseShape::Text | ResponseShape::Empty => false,
        }
    }
}

/// Returns the body as UTF-8 text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextFormat;

impl ResponseFormat for PlainTextFormat {
    type Output = String;

    const NAME: &'static str = "text";

    async fn parse(body: Bytes) -> Result<String, ValidationError> {
        Ok(std::str::from_utf8(&body)?.to_owned())
    }

    fn reads(declared: &ResponseShape) -> bool {
        declared.is_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn json_decodes_issue() {
        let body = Bytes::from(r#"{"title": "issue QwErT", "body": "Description of new issue", "number": 3}"#);
        let issue = JsonFormat::<Issue>::parse(body).await.unwrap();
        assert_eq!(issue, Issue::new("issue QwErT", "Description of new issue"));
    }

    #[tokio::test]
    async fn json_reports_garbage_as_parse_error() {
        let err = JsonFormat::<Record>::parse(Bytes::from("<html>")).await.unwrap_err();
        assert!(err.is_parse_error());
    }

    #[tokio::test]
    async fn json_reports_blank_body_as_empty() {
        let result = JsonFormat::<Vec<Record>>::parse(Bytes::from(" \n")).await;
        assert!(matches!(result, Err(ValidationError::EmptyBody)));
    }

    #[tokio::test]
    async fn text_passes_body_through() {
        let body = Bytes::from("Approachable is better than simple.");
        let text = PlainTextFormat::parse(body).await.unwrap();
        assert_eq!(text, "Approachable is better than simple.");
    }

    #[tokio::test]
    async fn text_rejects_invalid_utf8() {
        let result = PlainTextFormat::parse(Bytes::from(vec![0x66, 0xFF, 0x6F])).await;
        assert!(matches!(result, Err(ValidationError::InvalidUtf8(_))));
    }

    #[test]
    fn formats_read_matching_shapes_only() {
        assert!(JsonFormat::<Record>::reads(&ResponseShape::record("Post")));
        assert!(JsonFormat::<Vec<Record>>::reads(&ResponseShape::record_list("Post")));
        assert!(!JsonFormat::<Record>::reads(&ResponseShape::record_list("Post")));
        assert!(!JsonFormat::<Vec<Post>>::reads(&ResponseShape::record("Post")));
        assert!(!JsonFormat::<Record>::reads(&ResponseShape::Text));
        assert!(PlainTextFormat::reads(&ResponseShape::Text));
        assert!(!PlainTextFormat::reads(&ResponseShape::Empty));
    }
}
