//! GitHub service proxy.

use probe_definitions::github::{
    API_NAME, CREATE_ISSUE, GET_REPO_INFO, GET_USER, LIST_REPO_ISSUES, LIST_USER_REPOS, ZEN,
};
use probe_definitions::{Issue, Record};

use super::{Proxy, Reply, RequestParts, ServiceRequest};
use crate::client::ApiClient;
use crate::config::ProbeConfig;
use crate::error::ApiError;
use crate::request::RequestBody;
use crate::response::{JsonFormat, PlainTextFormat};

/// Request enum for the GitHub API.
///
/// One variant per endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitHubRequest {
    /// `GET /zen`
    Zen,
    /// `GET /repos/{owner}`
    GetRepoInfo {
        /// Account login.
        owner: String,
    },
    /// `GET /users/{user}`
    GetUser {
        /// Account login.
        user: String,
    },
    /// `GET /users/{user}/repos`
    ListUserRepos {
        /// Account login.
        user: String,
    },
    /// `GET /repos/{owner}/{repo}/issues`
    ListRepoIssues {
        /// Repository owner.
        owner: String,
        /// Repository name.
        repo: String,
        /// `Accept` override; the server default is used when `None`.
        accept: Option<String>,
    },
    /// `POST /repos/{owner}/{repo}/issues`
    CreateIssue {
        /// Repository owner.
        owner: String,
        /// Repository name.
        repo: String,
        /// The issue to open.
        issue: Issue,
    },
}

impl ServiceRequest for GitHubRequest {
    fn endpoint_id(&self) -> &'static str {
        match self {
            Self::Zen => ZEN,
            Self::GetRepoInfo { .. } => GET_REPO_INFO,
            Self::GetUser { .. } => GET_USER,
            Self::ListUserRepos { .. } => LIST_USER_REPOS,
            Self::ListRepoIssues { .. } => LIST_REPO_ISSUES,
            Self::CreateIssue { .. } => CREATE_ISSUE,
        }
    }

    fn into_parts(self) -> Result<RequestParts, ApiError> {
        let parts = match self {
            Self::Zen => RequestParts::default(),
            Self::GetRepoInfo { owner } => RequestParts {
                args: vec![("owner", owner)],
                body: None,
            },
            Self::GetUser { user } | Self::ListUserRepos { user } => RequestParts {
                args: vec![("user", user)],
                body: None,
            },
            Self::ListRepoIssues {
                owner,
                repo,
                accept,
            } => {
                let mut args = vec![("owner", owner), ("repo", repo)];
                args.extend(accept.map(|accept| ("Accept", accept)));
                RequestParts { args, body: None }
            }
            Self::CreateIssue { owner, repo, issue } => RequestParts {
                args: vec![("owner", owner), ("repo", repo)],
                body: Some(RequestBody::json(&issue)?),
            },
        };
        Ok(parts)
    }
}

/// Typed client for the GitHub API.
///
/// ```rust,no_run
/// use probe::service::GitHubService;
///
/// # async fn run() -> Result<(), probe::ApiError> {
/// let github = GitHubService::from_env()?;
/// let zen = github.zen().await?.into_body()?;
/// assert!(!zen.is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GitHubService {
    proxy: Proxy,
}

impl GitHubService {
    /// Wraps a client that has the GitHub definition attached.
    pub fn new(client: ApiClient) -> Self {
        Self {
            proxy: Proxy::new(client),
        }
    }

    /// Builds the service from `config`, with a credential from the
    /// environment when one is set.
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

    /// `GET /zen`: a line of design philosophy as plain text.
    pub async fn zen(&self) -> Result<Reply<String>, ApiError> {
        self.proxy.call::<PlainTextFormat>(GitHubRequest::Zen).await
    }

    /// `GET /repos/{owner}`: repository information for `owner`.
    ///
    /// A blank `owner` fails before anything is sent.
    pub async fn get_repo_info(&self, owner: &str) -> Result<Reply<Record>, ApiError> {
        let request = GitHubRequest::GetRepoInfo {
            owner: owner.to_string(),
        };
        self.proxy.call::<JsonFormat<Record>>(request).await
    }

    /// `GET /users/{user}`: a public profile.
    pub async fn get_user(&self, user: &str) -> Result<Reply<Record>, ApiError> {
        let request = GitHubRequest::GetUser {
            user: user.to_string(),
        };
        self.proxy.call::<JsonFormat<Record>>(request).await
    }

    /// `GET /users/{user}/repos`: public repositories of `user`.
    pub async fn list_user_repos(&self, user: &str) -> Result<Reply<Vec<Record>>, ApiError> {
        let request = GitHubRequest::ListUserRepos {
            user: user.to_string(),
        };
        self.proxy.call::<JsonFormat<Vec<Record>>>(request).await
    }

    /// `GET /repos/{owner}/{repo}/issues`, optionally with an `Accept`
    /// override.
    pub async fn list_repo_issues(
        &self,
        owner: &str,
        repo: &str,
        accept: Option<&str>,
    ) -> Result<Reply<Vec<Record>>, ApiError> {
        let request = GitHubRequest::ListRepoIssues {
            owner: owner.to_string(),
            repo: repo.to_string(),
            accept: accept.map(str::to_string),
        };
        self.proxy.call::<JsonFormat<Vec<Record>>>(request).await
    }

    /// `POST /repos/{owner}/{repo}/issues`: opens `issue`.
    ///
    /// Needs a credential; without one this fails with
    /// [`AuthError::MissingCredential`](crate::AuthError::MissingCredential).
    pub async fn create_issue(
        &self,
        owner: &str,
        repo: &str,
        issue: &Issue,
    ) -> Result<Reply<Issue>, ApiError> {
        let request = GitHubRequest::CreateIssue {
            owner: owner.to_string(),
            repo: repo.to_string(),
            issue: issue.clone(),
        };
        self.proxy.call::<JsonFormat<Issue>>(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AuthError, ConfigError};
    use probe_define::AuthStrategy;
    use probe_definitions::{RecordExt, define_github_api};
    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service(server: &MockServer, token: Option<&str>) -> GitHubService {
        let mut builder = ApiClient::builder(Url::parse(&server.uri()).unwrap())
            .api(&define_github_api())
            .unwrap();
        if let Some(token) = token {
            builder = builder.auth(AuthStrategy::BearerToken { header: None }, token);
        }
        GitHubService::new(builder.build().unwrap())
    }

    #[test]
    fn list_issues_passes_accept_only_when_given() {
        let without = GitHubRequest::ListRepoIssues {
            owner: "o".to_string(),
            repo: "r".to_string(),
            accept: None,
        };
        assert_eq!(without.into_parts().unwrap().args.len(), 2);

        let with = GitHubRequest::ListRepoIssues {
            owner: "o".to_string(),
            repo: "r".to_string(),
            accept: Some("application/xml".to_string()),
        };
        let parts = with.into_parts().unwrap();
        assert!(parts.args.contains(&("Accept", "application/xml".to_string())));
    }

    #[test]
    fn create_issue_carries_json_body() {
        let request = GitHubRequest::CreateIssue {
            owner: "o".to_string(),
            repo: "r".to_string(),
            issue: Issue::new("t", "b"),
        };
        assert_eq!(request.endpoint_id(), CREATE_ISSUE);
        let parts = request.into_parts().unwrap();
        assert_eq!(
            parts.body,
            Some(RequestBody::Json(json!({ "title": "t", "body": "b" })))
        );
    }

    #[tokio::test]
    async fn get_user_returns_record() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/defunkt"))
            .and(header("user-agent", "probe"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "login": "defunkt" })))
            .mount(&server)
            .await;

        let reply = service(&server, None).get_user("defunkt").await.unwrap();
        assert!(reply.is_successful());
        assert_eq!(reply.body().unwrap().str_field("login"), Some("defunkt"));
    }

    #[tokio::test]
    async fn get_repo_info_rejects_blank_owner() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = service(&server, None).get_repo_info("").await.unwrap_err();
        assert!(err.is_argument_error());
        assert!(matches!(err, ApiError::Config(ConfigError::Definition(_))));
    }

    #[tokio::test]
    async fn create_issue_round_trips() {
        let server = MockServer::start().await;
        let issue = Issue::new("issue abcde", "Description of new issue");
        Mock::given(method("POST"))
            .and(path("/repos/Stragnik/Homework/issues"))
            .and(header("authorization", "Bearer ghp_test"))
            .and(header("accept", "application/json"))
            .and(body_json(&issue))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "number": 12,
                "title": "issue abcde",
                "body": "Description of new issue"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = service(&server, Some("ghp_test"))
            .create_issue("Stragnik", "Homework", &issue)
            .await
            .unwrap();
        assert_eq!(reply.code(), 201);
        assert_eq!(reply.into_body().unwrap(), issue);
    }

    #[tokio::test]
    async fn create_issue_without_credential_fails_locally() {
        let server = MockServer::start().await;
        let err = service(&server, None)
            .create_issue("o", "r", &Issue::new("t", "b"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Auth(AuthError::MissingCredential { .. })));
    }

    #[tokio::test]
    async fn unsupported_accept_is_reported_not_raised() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/ilyademchenco/rest/issues"))
            .and(header("accept", "application/xml"))
            .respond_with(ResponseTemplate::new(415).set_body_json(json!({
                "message": "Unsupported 'Accept' header: [\"application/xml\"]. Must accept 'application/json'."
            })))
            .mount(&server)
            .await;

        let reply = service(&server, None)
            .list_repo_issues("ilyademchenco", "rest", Some("application/xml"))
            .await
            .unwrap();
        assert_eq!(reply.code(), 415);
        assert!(reply.body().is_none());
        assert!(
            reply
                .error_body()
                .unwrap()
                .contains("Must accept 'application/json'")
        );
    }
}
