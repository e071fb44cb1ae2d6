//! GoRest service proxy.

use std::fmt;

use probe_definitions::Post;
use probe_definitions::gorest::{API_NAME, CREATE_POST, LIST_POSTS};

use super::{Proxy, Reply, RequestParts, ServiceRequest};
use crate::client::{ApiClient, bearer_value};
use crate::config::ProbeConfig;
use crate::error::ApiError;
use crate::response::JsonFormat;

/// Request enum for the GoRest API.
///
/// Tokens are kept raw and formatted as bearer values when the request is
/// dispatched.
#[derive(Clone, PartialEq, Eq)]
pub enum GorestRequest {
    /// `POST /public/v2/users/{user}/posts?title=..&body=..`
    CreatePost {
        /// Bearer token.
        token: String,
        /// User id.
        user: String,
        /// Post title.
        title: String,
        /// Post text.
        body: String,
    },
    /// `GET /public/v2/users/{user}/posts`
    ListPosts {
        /// Bearer token.
        token: String,
        /// User id.
        user: String,
    },
}

impl fmt::Debug for GorestRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreatePost {
                user, title, body, ..
            } => f
                .debug_struct("CreatePost")
                .field("token", &"<redacted>")
                .field("user", user)
                .field("title", title)
                .field("body", body)
                .finish(),
            Self::ListPosts { user, .. } => f
                .debug_struct("ListPosts")
                .field("token", &"<redacted>")
                .field("user", user)
                .finish(),
        }
    }
}

impl ServiceRequest for GorestRequest {
    fn endpoint_id(&self) -> &'static str {
        match self {
            Self::CreatePost { .. } => CREATE_POST,
            Self::ListPosts { .. } => LIST_POSTS,
        }
    }

    fn into_parts(self) -> Result<RequestParts, ApiError> {
        let args = match self {
            Self::CreatePost {
                token,
                user,
                title,
                body,
            } => vec![
                ("Authorization", bearer_value(&token)?),
                ("user", user),
                ("title", title),
                ("body", body),
            ],
            Self::ListPosts { token, user } => {
                vec![("Authorization", bearer_value(&token)?), ("user", user)]
            }
        };
        Ok(RequestParts { args, body: None })
    }
}

/// Typed client for the GoRest API.
///
/// Every call takes the bearer token explicitly.
#[derive(Debug, Clone)]
pub struct GorestService {
    proxy: Proxy,
}

impl GorestService {
    /// Wraps a client that has the GoRest definition attached.
    pub fn new(client: ApiClient) -> Self {
        Self {
            proxy: Proxy::new(client),
        }
    }

    /// Builds the service from `config`.
    ///
    /// ## Errors
    ///
    /// Returns an error if the client cannot be built.
    pub fn from_config(config: &ProbeConfig) -> Result<Self, ApiError> {
        Ok(Self {
            proxy: Proxy::for_registered(API_NAME, config)?,
        })
    }

    /// Builds the service from environment configuration.
    ///
    /// ## Errors
    ///
    /// Returns an error for invalid configuration.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_config(&ProbeConfig::from_env()?)
    }

    /// The underlying client.
    pub fn client(&self) -> &ApiClient {
        self.proxy.client()
    }

    /// Creates a post for `user`; the server echoes `title` and `body`.
    ///
    /// ## Errors
    ///
    /// - [`AuthError::EmptyToken`](crate::AuthError::EmptyToken) for a blank token
    /// - binding errors for a blank `user`, `title` or `body`
    /// - transport errors
    ///
    /// A token the server rejects shows up as a 401 [`Reply`].
    pub async fn create_post(
        &self,
        auth_token: &str,
        user: &str,
        title: &str,
        body: &str,
    ) -> Result<Reply<Post>, ApiError> {
        let request = GorestRequest::CreatePost {
            token: auth_token.to_string(),
            user: user.to_string(),
            title: title.to_string(),
            body: body.to_string(),
        };
        self.proxy.call::<JsonFormat<Post>>(request).await
    }

    /// Lists the posts of `user`.
    ///
    /// ## Errors
    ///
    /// Same as [`create_post`](Self::create_post).
    pub async fn list_posts(&self, auth_token: &str, user: &str) -> Result<Reply<Vec<Post>>, ApiError> {
        let request = GorestRequest::ListPosts {
            token: auth_token.to_string(),
            user: user.to_string(),
        };
        self.proxy.call::<JsonFormat<Vec<Post>>>(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthError;
    use probe_definitions::define_gorest_api;
    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service(server: &MockServer) -> GorestService {
        let client = ApiClient::builder(Url::parse(&server.uri()).unwrap())
            .api(&define_gorest_api())
            .unwrap()
            .build()
            .unwrap();
        GorestService::new(client)
    }

    #[test]
    fn debug_hides_token() {
        let request = GorestRequest::ListPosts {
            token: "secret".to_string(),
            user: "1".to_string(),
        };
        let shown = format!("{request:?}");
        assert!(!shown.contains("secret"));
        assert!(shown.contains("<redacted>"));
    }

    #[test]
    fn blank_token_is_rejected_before_binding() {
        let request = GorestRequest::CreatePost {
            token: "".to_string(),
            user: "1".to_string(),
            title: "t".to_string(),
            body: "b".to_string(),
        };
        assert!(matches!(
            request.into_parts(),
            Err(ApiError::Auth(AuthError::EmptyToken))
        ));
    }

    #[tokio::test]
    async fn create_post_sends_query_and_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/public/v2/users/7439480/posts"))
            .and(query_param("title", "test-title"))
            .and(query_param("body", "Description of new issue"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 1,
                "user_id": 7439480,
                "title": "test-title",
                "body": "Description of new issue"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = service(&server)
            .create_post("tok", "7439480", "test-title", "Description of new issue")
            .await
            .unwrap();
        assert_eq!(reply.code(), 201);
        let post = reply.into_body().unwrap();
        assert_eq!(post.title, "test-title");
        assert_eq!(post.user_id, Some(7439480));
    }

    #[tokio::test]
    async fn rejected_token_surfaces_as_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/public/v2/users/1/posts"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid token" })),
            )
            .mount(&server)
            .await;

        let reply = service(&server).list_posts("expired", "1").await.unwrap();
        assert_eq!(reply.code(), 401);
        assert!(matches!(
            reply.into_body(),
            Err(ApiError::Auth(AuthError::AuthenticationFailed { .. }))
        ));
    }

    #[tokio::test]
    async fn list_posts_empty_is_not_null() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/public/v2/users/2/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let posts = service(&server)
            .list_posts("tok", "2")
            .await
            .unwrap()
            .into_body()
            .unwrap();
        assert!(posts.is_empty());
    }
}
