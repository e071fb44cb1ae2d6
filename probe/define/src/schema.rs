//! Named body types for request and response descriptors.

use std::fmt;

/// The name of the type a body maps to.
///
/// Descriptors carry the name only; binding it to an actual Rust type is
/// the job of the typed front-end, so a mismatch shows up per call.
///
/// ```
/// use probe_define::Schema;
///
/// let schema = Schema::new("Issue");
/// assert_eq!(schema.to_string(), "Issue");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Schema {
    /// Type name as it appears in error messages (e.g. "Post").
    pub type_name: String,
}

impl Schema {
    /// Creates a schema for the named type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name)
    }
}
