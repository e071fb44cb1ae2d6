//! GoRest scenarios against a local stub server.

use probe::config::{GOREST_URL_VAR, ProbeConfig};
use probe::fixtures::{ISSUE_DESCRIPTION, issue_title};
use probe::{ApiClient, ApiError, AuthError, GorestService};
use probe_define::DefinitionError;
use probe_definitions::{Post, RecordExt, define_gorest_api, gorest};
use serde_json::{Map, Value, json};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const USER: &str = "7439480";

fn config_for(server: &MockServer) -> ProbeConfig {
    let uri = server.uri();
    ProbeConfig::from_lookup(move |var| (var == GOREST_URL_VAR).then(|| uri.clone())).unwrap()
}

fn service_for(server: &MockServer) -> GorestService {
    probe::logging::init();
    GorestService::from_config(&config_for(server)).unwrap()
}

/// Builds a post from the query string, the way GoRest creates one.
fn echo_post(req: &Request) -> ResponseTemplate {
    let mut post: Map<String, Value> = req
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
        .collect();
    post.insert("id".to_string(), json!(101));
    post.insert("user_id".to_string(), json!(7439480));
    ResponseTemplate::new(201).set_body_json(Value::Object(post))
}

async fn mount_create(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path(format!("/public/v2/users/{USER}/posts")))
        .and(header("authorization", format!("Bearer {token}").as_str()))
        .and(header("accept", "application/json"))
        .respond_with(echo_post)
        .mount(server)
        .await;
}

#[tokio::test]
async fn create_post_echoes_title() {
    let server = MockServer::start().await;
    mount_create(&server, "gorest-stub").await;

    let reply = service_for(&server)
        .create_post("gorest-stub", USER, "test-title", ISSUE_DESCRIPTION)
        .await
        .unwrap();

    assert_eq!(reply.code(), 201);
    let post = reply.into_body().unwrap();
    assert_eq!(post.title, "test-title");
    assert_eq!(post.body, ISSUE_DESCRIPTION);
}

#[tokio::test]
async fn create_post_through_builder() {
    let server = MockServer::start().await;
    mount_create(&server, "gorest-stub").await;

    let client = ApiClient::for_api(&define_gorest_api(), &config_for(&server)).unwrap();
    let title = issue_title();
    let response = client
        .operation(gorest::CREATE_POST)
        .unwrap()
        .bearer("gorest-stub")
        .param("user", USER)
        .param("title", title.as_str())
        .param("body", ISSUE_DESCRIPTION)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 201);
    let record = response.record().unwrap();
    assert_eq!(record.str_field("title"), Some(title.as_str()));
    assert_eq!(record.str_field("body"), Some(ISSUE_DESCRIPTION));
}

#[tokio::test]
async fn create_post_with_empty_token_is_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let err = service_for(&server)
        .create_post("", USER, "t", "b")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Auth(AuthError::EmptyToken)));
}

#[tokio::test]
async fn rejected_token_is_an_authorization_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/public/v2/users/{USER}/posts")))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Authentication failed"
        })))
        .mount(&server)
        .await;

    let reply = service_for(&server)
        .create_post("stale", USER, "t", "b")
        .await
        .unwrap();
    assert!(!reply.is_successful());

    let err = reply.into_body().unwrap_err();
    assert!(matches!(err, ApiError::Auth(ref e) if e.is_rejection()));
}

#[tokio::test]
async fn list_posts_is_non_empty_when_posts_exist() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/public/v2/users/{USER}/posts")))
        .and(header("authorization", "Bearer gorest-stub"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "user_id": 7439480, "title": "first", "body": "a" },
            { "id": 2, "user_id": 7439480, "title": "second", "body": "b" }
        ])))
        .mount(&server)
        .await;

    let reply = service_for(&server)
        .list_posts("gorest-stub", USER)
        .await
        .unwrap();
    assert_eq!(reply.code(), 200);
    let posts: &Vec<Post> = reply.body().unwrap();
    assert_eq!(posts.len(), 2);
    assert!(posts.iter().all(|p| p.user_id == Some(7439480)));
}

#[tokio::test]
async fn list_posts_is_a_stable_read() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/public/v2/users/{USER}/posts")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "title": "only", "body": "x" }
        ])))
        .expect(2)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let first = service.list_posts("t", USER).await.unwrap().into_body().unwrap();
    let second = service.list_posts("t", USER).await.unwrap().into_body().unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn create_post_title_via_query_param() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(query_param("title", "test-title"))
        .respond_with(echo_post)
        .expect(1)
        .mount(&server)
        .await;

    let reply = service_for(&server)
        .create_post("t", USER, "test-title", "text")
        .await
        .unwrap();
    assert_eq!(reply.body().map(|p| p.title.as_str()), Some("test-title"));
}

#[tokio::test]
async fn blank_title_and_body_are_sent_as_given() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/public/v2/users/{USER}/posts")))
        .and(query_param("title", ""))
        .respond_with(echo_post)
        .expect(2)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let reply = service.create_post("t", USER, "", "b").await.unwrap();
    assert_eq!(reply.code(), 201);
    assert_eq!(reply.body().map(|p| p.title.as_str()), Some(""));

    let reply = service.create_post("t", USER, "", "  ").await.unwrap();
    assert_eq!(reply.body().map(|p| p.body.as_str()), Some("  "));
}

#[tokio::test]
async fn list_posts_through_builder_with_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/public/v2/users/{USER}/posts")))
        .and(header("authorization", "Bearer gorest-stub"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "title": "first", "body": "a" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::for_api(&define_gorest_api(), &config_for(&server)).unwrap();
    let response = client
        .operation(gorest::LIST_POSTS)
        .unwrap()
        .param("user", USER)
        .header("Authorization", "Bearer gorest-stub")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.pluck("title"), vec![json!("first")]);
}

#[tokio::test]
async fn list_posts_with_object_body_is_a_shape_mismatch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/public/v2/users/{USER}/posts")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let err = service_for(&server).list_posts("t", USER).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(ref e) if e.is_shape_mismatch()), "{err:?}");
}

#[tokio::test]
async fn create_post_without_body_parameter_is_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let client = ApiClient::for_api(&define_gorest_api(), &config_for(&server)).unwrap();
    let err = client
        .operation(gorest::CREATE_POST)
        .unwrap()
        .bearer("t")
        .param("user", USER)
        .param("title", "")
        .send()
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Config(probe::ConfigError::Definition(DefinitionError::MissingParam { ref name, .. }))
            if name == "body"
    ));
}
