//! Probe Definition Library
//!
//! Declarative primitives for describing REST endpoints. A definition says
//! *what* a call looks like (method, path template, parameters, body and
//! response shape) and never *how* it is sent, so the same table can drive
//! any client front-end.
//!
//! ## Core Types
//!
//! - [`RestApi`] - A service: base URL, auth strategy, default headers, endpoints
//! - [`Endpoint`] - One remote operation
//! - [`Param`] / [`ParamLocation`] - Declared path, query and header parameters
//! - [`ResponseShape`] - Text, single record, list of records, or empty
//! - [`ApiRequest`] - Request body description
//! - [`AuthStrategy`] - How the API-level credential is applied
//! - [`Registry`] - Lookup of endpoints by logical operation name
//! - [`BoundRequest`] - An endpoint with its arguments resolved
//!
//! ## Examples
//!
//! ```
//! use probe_define::{AuthStrategy, Endpoint, Param, ResponseShape, RestApi, RestMethod};
//!
//! let api = RestApi {
//!     name: "Gorest".to_string(),
//!     description: "GoRest".to_string(),
//!     base_url: "https://gorest.co.in".to_string(),
//!     docs_url: None,
//!     auth: AuthStrategy::BearerToken { header: None },
//!     env_auth: vec!["GOREST_TOKEN".to_string()],
//!     headers: vec![],
//!     endpoints: vec![Endpoint {
//!         id: "ListPosts".to_string(),
//!         method: RestMethod::Get,
//!         path: "/public/v2/users/{user}/posts".to_string(),
//!         description: "List posts of a user".to_string(),
//!         params: vec![Param::path("user"), Param::header("Authorization")],
//!         request: None,
//!         response: ResponseShape::record_list("Post"),
//!         expected_status: 200,
//!         headers: vec![],
//!         auth_required: false,
//!     }],
//! };
//!
//! let bound = api
//!     .bind("ListPosts", &[("user", "42"), ("Authorization", "Bearer t")])
//!     .unwrap();
//! assert_eq!(bound.path, "/public/v2/users/42/posts");
//! ```

pub mod auth;
pub mod error;
pub mod param;
pub mod prelude;
pub mod registry;
pub mod request;
pub mod response;
pub mod schema;
pub mod types;

pub use auth::{AuthStrategy, bearer};
pub use error::DefinitionError;
pub use param::{Param, ParamLocation};
pub use registry::Registry;
pub use request::ApiRequest;
pub use response::ResponseShape;
pub use schema::Schema;
pub use types::{BoundRequest, Endpoint, RestApi, RestMethod, merge_headers};
