//! GitHub REST API definition.
//!
//! Covers the handful of public endpoints the scenario suites exercise.
//!
//! ## Authentication
//!
//! Bearer token read from `GITHUB_TOKEN`, falling back to `GH_TOKEN`. Only
//! [`CREATE_ISSUE`] requires it; the other endpoints work anonymously
//! (subject to GitHub's rate limits).
//!
//! GitHub rejects requests without a `User-Agent`, so one is set at the API
//! level.

mod types;

pub use types::Issue;

use probe_define::{ApiRequest, AuthStrategy, Endpoint, Param, ResponseShape, RestApi, RestMethod};

/// API name used for registry lookups.
pub const API_NAME: &str = "GitHub";

/// `GET /zen`
pub const ZEN: &str = "Zen";
/// `GET /repos/{owner}`
pub const GET_REPO_INFO: &str = "GetRepoInfo";
/// `GET /users/{user}`
pub const GET_USER: &str = "GetUser";
/// `GET /users/{user}/repos`
pub const LIST_USER_REPOS: &str = "ListUserRepos";
/// `GET /repos/{owner}/{repo}/issues`
pub const LIST_REPO_ISSUES: &str = "ListRepoIssues";
/// `POST /repos/{owner}/{repo}/issues`
pub const CREATE_ISSUE: &str = "CreateIssue";

/// Creates the GitHub API definition.
///
/// ## Endpoints
///
/// | ID | Method | Path | Response | Status |
/// |----|--------|------|----------|--------|
/// | Zen | GET | /zen | text | 200 |
/// | GetRepoInfo | GET | /repos/{owner} | record | 200 |
/// | GetUser | GET | /users/{user} | record | 200 |
/// | ListUserRepos | GET | /users/{user}/repos | list | 200 |
/// | ListRepoIssues | GET | /repos/{owner}/{repo}/issues | list | 200 |
/// | CreateIssue | POST | /repos/{owner}/{repo}/issues | record | 201 |
///
/// ## Examples
///
/// ```rust
/// use probe_definitions::github::define_github_api;
///
/// let api = define_github_api();
/// assert_eq!(api.name, "GitHub");
/// assert_eq!(api.endpoints.len(), 6);
/// assert!(api.validate().is_ok());
/// ```
pub fn define_github_api() -> RestApi {
    RestApi {
        name: API_NAME.to_string(),
        description: "GitHub REST API".to_string(),
        base_url: "https://api.github.com".to_string(),
        docs_url: Some("https://docs.github.com/en/rest".to_string()),
        auth: AuthStrategy::BearerToken { header: None },
        env_auth: vec!["GITHUB_TOKEN".to_string(), "GH_TOKEN".to_string()],
        headers: vec![("User-Agent".to_string(), "probe".to_string())],
        endpoints: vec![
            Endpoint {
                id: ZEN.to_string(),
                method: RestMethod::Get,
                path: "/zen".to_string(),
                description: "Returns a random line of GitHub design philosophy".to_string(),
                params: vec![],
                request: None,
                response: ResponseShape::Text,
                expected_status: 200,
                headers: vec![],
                auth_required: false,
            },
            Endpoint {
                id: GET_REPO_INFO.to_string(),
                method: RestMethod::Get,
                path: "/repos/{owner}".to_string(),
                description: "Fetches repository information for an owner".to_string(),
                params: vec![Param::path("owner").with_description("Account login")],
                request: None,
                response: ResponseShape::record("Record"),
                expected_status: 200,
                headers: vec![],
                auth_required: false,
            },
            Endpoint {
                id: GET_USER.to_string(),
                method: RestMethod::Get,
                path: "/users/{user}".to_string(),
                description: "Fetches a public user profile".to_string(),
                params: vec![Param::path("user").with_description("Account login")],
                request: None,
                response: ResponseShape::record("Record"),
                expected_status: 200,
                headers: vec![],
                auth_required: false,
            },
            Endpoint {
                id: LIST_USER_REPOS.to_string(),
                method: RestMethod::Get,
                path: "/users/{user}/repos".to_string(),
                description: "Lists public repositories of a user".to_string(),
                params: vec![
                    Param::path("user").with_description("Account login"),
                    Param::header("Authorization").optional(),
                ],
                request: None,
                response: ResponseShape::record_list("Record"),
                expected_status: 200,
                headers: vec![],
                auth_required: false,
            },
            Endpoint {
                id: LIST_REPO_ISSUES.to_string(),
                method: RestMethod::Get,
                path: "/repos/{owner}/{repo}/issues".to_string(),
                description: "Lists issues of a repository".to_string(),
                params: vec![
                    Param::path("owner"),
                    Param::path("repo"),
                    Param::header("Accept")
                        .optional()
                        .with_description("Media type; anything but JSON is rejected with 415"),
                ],
                request: None,
                response: ResponseShape::record_list("Issue"),
                expected_status: 200,
                headers: vec![],
                auth_required: false,
            },
            Endpoint {
                id: CREATE_ISSUE.to_string(),
                method: RestMethod::Post,
                path: "/repos/{owner}/{repo}/issues".to_string(),
                description: "Creates an issue; title and body are echoed back".to_string(),
                params: vec![
                    Param::path("owner"),
                    Param::path("repo"),
                    Param::header("Accept").optional(),
                ],
                request: Some(ApiRequest::json_type("Issue")),
                response: ResponseShape::record("Issue"),
                expected_status: 201,
                headers: vec![("Accept".to_string(), "application/json".to_string())],
                auth_required: true,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use probe_define::ParamLocation;

    fn endpoint(id: &str) -> Endpoint {
        define_github_api()
            .endpoint(id)
            .cloned()
            .unwrap_or_else(|| panic!("missing endpoint {id}"))
    }

    #[test]
    fn api_has_correct_metadata() {
        let api = define_github_api();
        assert_eq!(api.base_url, "https://api.github.com");
        assert!(api.docs_url.is_some());
        assert!(api.validate().is_ok());
    }

    #[test]
    fn api_uses_bearer_auth_from_env() {
        let api = define_github_api();
        assert_eq!(api.auth, AuthStrategy::BearerToken { header: None });
        assert_eq!(api.env_auth, vec!["GITHUB_TOKEN", "GH_TOKEN"]);
    }

    #[test]
    fn every_request_carries_a_user_agent() {
        let api = define_github_api();
        let bound = api.bind(ZEN, &[]).unwrap();
        assert_eq!(bound.header("User-Agent"), Some("probe"));
    }

    #[test]
    fn zen_is_parameterless_text() {
        let zen = endpoint(ZEN);
        assert_eq!(zen.method, RestMethod::Get);
        assert_eq!(zen.path, "/zen");
        assert!(zen.params.is_empty());
        assert!(zen.response.is_text());
        assert_eq!(zen.expected_status, 200);
    }

    #[test]
    fn repo_info_requires_owner() {
        let repo = endpoint(GET_REPO_INFO);
        assert_eq!(repo.placeholders().unwrap(), vec!["owner"]);
        assert!(repo.bind(&[("owner", "")]).is_err());
        assert_eq!(repo.bind(&[("owner", "Stragnik")]).unwrap().path, "/repos/Stragnik");
    }

    #[test]
    fn create_issue_posts_json_and_expects_201() {
        let create = endpoint(CREATE_ISSUE);
        assert_eq!(create.method, RestMethod::Post);
        assert_eq!(create.expected_status, 201);
        assert!(create.auth_required);
        assert_eq!(
            create.request.as_ref().map(|r| r.content_type()),
            Some("application/json")
        );

        let bound = create.bind(&[("owner", "Stragnik"), ("repo", "Homework")]).unwrap();
        assert_eq!(bound.path, "/repos/Stragnik/Homework/issues");
        assert_eq!(bound.header("Accept"), Some("application/json"));
    }

    #[test]
    fn list_issues_accept_header_is_overridable() {
        let issues = endpoint(LIST_REPO_ISSUES);
        let accept = issues.param("accept").unwrap();
        assert_eq!(accept.location, ParamLocation::Header);
        assert!(!accept.required);

        let bound = issues
            .bind(&[("owner", "o"), ("repo", "r"), ("Accept", "application/xml")])
            .unwrap();
        assert_eq!(bound.header("accept"), Some("application/xml"));
        assert!(issues.response.is_list());
    }
}
