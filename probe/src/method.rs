//! Conversion from descriptor methods to `reqwest` methods.

use probe_define::RestMethod;

/// Converts a [`RestMethod`] to the equivalent `reqwest::Method`.
pub(crate) trait ToReqwest {
    fn to_reqwest(self) -> reqwest::Method;
}

impl ToReqwest for RestMethod {
    fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
            Self::Head => reqwest::Method::HEAD,
            Self::Options => reqwest::Method::OPTIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn names_agree_for_every_method() {
        for method in RestMethod::iter() {
            assert_eq!(method.to_reqwest().as_str(), method.to_string());
        }
    }
}
