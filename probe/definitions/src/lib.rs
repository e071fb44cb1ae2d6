//! Probe API Definitions
//!
//! Concrete endpoint tables built from `probe-define` primitives, one module
//! per service, plus the process-wide [`registry`].
//!
//! ## Available APIs
//!
//! - [`github`] - GitHub REST API (source hosting)
//! - [`gorest`] - GoRest (CRUD sandbox)
//!
//! ## Examples
//!
//! ```
//! use probe_definitions::{github, registry};
//!
//! let registry = registry().unwrap();
//! let zen = registry.endpoint(github::API_NAME, github::ZEN).unwrap();
//! assert_eq!(zen.path, "/zen");
//! ```

pub mod github;
pub mod gorest;
pub mod prelude;
pub mod record;

use std::sync::LazyLock;

use probe_define::{DefinitionError, Registry};

pub use github::{Issue, define_github_api};
pub use gorest::{Post, define_gorest_api};
pub use record::{Record, RecordExt, record_of, to_record};

static REGISTRY: LazyLock<Result<Registry, DefinitionError>> =
    LazyLock::new(|| Registry::new(vec![define_github_api(), define_gorest_api()]));

/// The validated registry of every bundled API.
///
/// Built once on first access and shared for the rest of the process.
///
/// ## Errors
///
/// Returns the validation error if a bundled definition is malformed.
pub fn registry() -> Result<&'static Registry, DefinitionError> {
    REGISTRY.as_ref().map_err(Clone::clone)
}
