//! GoRest API definition.
//!
//! GoRest is a hosted CRUD sandbox. Posts hang off users and are created
//! from query parameters rather than a JSON body.
//!
//! ## Authentication
//!
//! Every call here takes the bearer token as an explicit `Authorization`
//! header parameter. `GOREST_TOKEN` is the conventional place to keep it.

mod types;

pub use types::Post;

use probe_define::{AuthStrategy, Endpoint, Param, ResponseShape, RestApi, RestMethod};

/// API name used for registry lookups.
pub const API_NAME: &str = "Gorest";

/// `POST /public/v2/users/{user}/posts`
pub const CREATE_POST: &str = "CreatePost";
/// `GET /public/v2/users/{user}/posts`
pub const LIST_POSTS: &str = "ListPosts";

/// Creates the GoRest API definition.
///
/// ## Endpoints
///
/// | ID | Method | Path | Response | Status |
/// |----|--------|------|----------|--------|
/// | CreatePost | POST | /public/v2/users/{user}/posts | record | 201 |
/// | ListPosts | GET | /public/v2/users/{user}/posts | list | 200 |
///
/// ## Examples
///
/// ```rust
/// use probe_definitions::gorest::define_gorest_api;
///
/// let api = define_gorest_api();
/// assert_eq!(api.name, "Gorest");
/// assert_eq!(api.endpoints.len(), 2);
/// ```
pub fn define_gorest_api() -> RestApi {
    RestApi {
        name: API_NAME.to_string(),
        description: "GoRest CRUD sandbox API".to_string(),
        base_url: "https://gorest.co.in".to_string(),
        docs_url: Some("https://gorest.co.in/".to_string()),
        auth: AuthStrategy::BearerToken { header: None },
        env_auth: vec!["GOREST_TOKEN".to_string()],
        headers: vec![("Accept".to_string(), "application/json".to_string())],
        endpoints: vec![
            Endpoint {
                id: CREATE_POST.to_string(),
                method: RestMethod::Post,
                path: "/public/v2/users/{user}/posts".to_string(),
                description: "Creates a post for a user; title and body are echoed back"
                    .to_string(),
                params: vec![
                    Param::path("user").with_description("User id"),
                    Param::query("title").allow_empty(),
                    Param::query("body").allow_empty(),
                    Param::header("Authorization").with_description("Bearer token"),
                ],
                request: None,
                response: ResponseShape::record("Post"),
                expected_status: 201,
                headers: vec![],
                auth_required: false,
            },
            Endpoint {
                id: LIST_POSTS.to_string(),
                method: RestMethod::Get,
                path: "/public/v2/users/{user}/posts".to_string(),
                description: "Lists the posts of a user".to_string(),
                params: vec![
                    Param::path("user").with_description("User id"),
                    Param::header("Authorization").with_description("Bearer token"),
                ],
                request: None,
                response: ResponseShape::record_list("Post"),
                expected_status: 200,
                headers: vec![],
                auth_required: false,
            },
        ],
    }
}
