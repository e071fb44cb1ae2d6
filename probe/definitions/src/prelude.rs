//! Convenient re-exports for working with API definitions.
//!
//! ```
//! use probe_definitions::prelude::*;
//!
//! let api = define_github_api();
//! assert_eq!(api.name, "GitHub");
//! ```

pub use crate::github::{Issue, define_github_api};
pub use crate::gorest::{Post, define_gorest_api};
pub use crate::record::{Record, RecordExt, record_of, to_record};
pub use crate::registry;
