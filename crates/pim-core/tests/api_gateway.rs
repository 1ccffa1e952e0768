//! Integration tests for the particles API gateway against a mock server.

use pim_core::api::{ApiClient, ApiFailure};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn login_success_acknowledges() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "username": "alice", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Login successful" })))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    client.login("alice", "pw").await.unwrap();
}

#[tokio::test]
async fn login_failure_surfaces_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "error": "Invalid username or password" })),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let failure = client.login("alice", "wrong").await.unwrap_err();

    assert_eq!(failure.status(), 401);
    assert_eq!(failure.message(), "Invalid username or password");
}

#[tokio::test]
async fn failure_without_error_body_gets_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let failure = client.register("alice", "pw").await.unwrap_err();

    assert_eq!(failure.status(), 500);
    assert_eq!(failure.message(), "Request failed (status 500)");
}

#[tokio::test]
async fn list_articles_decodes_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/particles/alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "particle_id": 1, "title": "First", "content": "one" },
                { "article_id": "2", "title": "Second", "content": "two" },
            ],
            "count": 2,
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let articles = client.list_articles("alice").await.unwrap();

    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].id, "1");
    assert_eq!(articles[0].title, "First");
    assert_eq!(articles[1].id, "2");
    assert_eq!(articles[1].content, "two");
}

#[tokio::test]
async fn search_encodes_query_term() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/particles/alice/search"))
        .and(query_param("q", "grocery list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let articles = client.search_articles("alice", "grocery list").await.unwrap();
    assert!(articles.is_empty());
}

#[tokio::test]
async fn create_sends_credentials_and_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/particles/create"))
        .and(body_json(json!({
            "username": "alice",
            "password": "pw",
            "title": "T",
            "content": "C",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "created" })))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    client.create_article("alice", "pw", "T", "C").await.unwrap();
}

#[tokio::test]
async fn update_puts_to_record_path() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/particles/42"))
        .and(body_json(json!({
            "username": "alice",
            "password": "pw",
            "title": "New",
            "content": "Body",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "updated" })))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    client
        .update_article("42", "alice", "pw", "New", "Body")
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_of_missing_record_is_request_failure() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/particles/42"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Article not found" })))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let failure = client.delete_article("42").await.unwrap_err();

    assert!(matches!(failure, ApiFailure::Request { status: 404, .. }));
    assert_eq!(failure.message(), "Article not found");
}

#[tokio::test]
async fn unreachable_server_is_network_failure() {
    // Bind-then-drop to get a port nothing is listening on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let client = ApiClient::new(uri);
    let failure = client.list_articles("alice").await.unwrap_err();

    assert!(matches!(failure, ApiFailure::Network { .. }));
    assert_eq!(failure.status(), 0);
}
