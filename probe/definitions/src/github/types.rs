//! GitHub body types.

use serde::{Deserialize, Deserializer, Serialize};

/// A work item created in a repository.
///
/// Only `title` and `body` are observable. Server-assigned fields in a
/// response (`id`, `number`, `user`, ...) are ignored on deserialization,
/// and a `null` body reads as an empty string.
///
/// ```
/// use probe_definitions::Issue;
///
/// let issue = Issue::default()
///     .with_title("issue AbCdE")
///     .with_body("Description of new issue");
/// assert_eq!(issue.title, "issue AbCdE");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue title.
    pub title: String,
    /// Issue description.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,
}

impl Issue {
    /// Creates an issue with the given title and body.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Replaces the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Replaces the body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
