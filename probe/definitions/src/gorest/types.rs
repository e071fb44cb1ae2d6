//! GoRest body types.

use serde::{Deserialize, Serialize};

/// A post owned by a GoRest user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Server-assigned identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Owning user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    /// Post title.
    pub title: String,
    /// Post text.
    pub body: String,
}
