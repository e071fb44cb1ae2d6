//! Convenient re-exports for writing API definitions.
//!
//! ```
//! use probe_define::prelude::*;
//!
//! let api = RestApi {
//!     name: "MyAPI".to_string(),
//!     description: "My API".to_string(),
//!     base_url: "https://api.example.com".to_string(),
//!     docs_url: None,
//!     auth: AuthStrategy::BearerToken { header: None },
//!     env_auth: vec!["API_KEY".to_string()],
//!     headers: vec![],
//!     endpoints: vec![],
//! };
//! assert!(api.validate().is_ok());
//! ```

pub use crate::auth::{AuthStrategy, bearer};
pub use crate::error::DefinitionError;
pub use crate::param::{Param, ParamLocation};
pub use crate::registry::Registry;
pub use crate::request::ApiRequest;
pub use crate::response::ResponseShape;
pub use crate::schema::Schema;
pub use crate::types::{BoundRequest, Endpoint, RestApi, RestMethod, merge_headers};
