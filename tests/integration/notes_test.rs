//! Integration tests for note CRUD, search, tags, and isolation.

mod helpers;

use http::StatusCode;
use serde_json::{Value, json};

use helpers::TestApp;

async fn create(app: &TestApp, token: &str, title: &str, body: &str, tags: &[&str]) -> Value {
    let response = app
        .request(
            "POST",
            "/api/notes",
            Some(json!({ "title": title, "body": body, "tags": tags })),
            Some(token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.body
}

fn titles(body: &Value) -> Vec<String> {
    body.as_array()
        .expect("array")
        .iter()
        .map(|n| n["title"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn test_create_get_update_delete() {
    let app = TestApp::new();
    let token = app.register_and_login("ada").await;

    let note = create(&app, &token, "Groceries", "milk, eggs", &["home"]).await;
    let id = note["id"].as_str().expect("id").to_string();
    assert!(note["created"].is_string());
    assert!(note["lastModified"].is_string());

    let response = app
        .request("GET", &format!("/api/notes/{id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["title"], "Groceries");

    let response = app
        .request(
            "PUT",
            &format!("/api/notes/{id}"),
            Some(json!({ "body": "milk, eggs, bread" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["title"], "Groceries");
    assert_eq!(response.body["body"], "milk, eggs, bread");
    assert_eq!(response.body["tags"], json!(["home"]));

    let response = app
        .request("DELETE", &format!("/api/notes/{id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app
        .request("GET", &format!("/api/notes/{id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_search_tags_and_sort() {
    let app = TestApp::new();
    let token = app.register_and_login("ada").await;

    create(&app, &token, "beta", "Rust notes", &["work"]).await;
    create(&app, &token, "Alpha", "shopping", &["home"]).await;
    create(&app, &token, "gamma", "more rust", &["work", "lang"]).await;

    let response = app
        .request("GET", "/api/notes?search=RUST", None, Some(&token))
        .await;
    let mut found = titles(&response.body);
    found.sort();
    assert_eq!(found, vec!["beta", "gamma"]);

    let response = app
        .request("GET", "/api/notes?tags=home,lang", None, Some(&token))
        .await;
    let mut found = titles(&response.body);
    found.sort();
    assert_eq!(found, vec!["Alpha", "gamma"]);

    let response = app
        .request("GET", "/api/notes?sortBy=title", None, Some(&token))
        .await;
    assert_eq!(titles(&response.body), vec!["Alpha", "beta", "gamma"]);

    let response = app
        .request("GET", "/api/notes/tags", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!(["work", "home", "lang"]));
}

#[tokio::test]
async fn test_notes_are_isolated_per_user() {
    let app = TestApp::new();
    let ada = app.register_and_login("ada").await;
    let bob = app.register_and_login("bob").await;

    let note = create(&app, &ada, "Private", "ada only", &[]).await;
    let id = note["id"].as_str().expect("id");

    let response = app.request("GET", "/api/notes", None, Some(&bob)).await;
    assert_eq!(response.body, json!([]));

    let response = app
        .request("GET", &format!("/api/notes/{id}"), None, Some(&bob))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("DELETE", &format!("/api/notes/{id}"), None, Some(&bob))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_note_id_is_not_found() {
    let app = TestApp::new();
    let token = app.register_and_login("ada").await;

    let response = app
        .request("GET", "/api/notes/not-a-uuid", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_notes_require_auth() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/notes", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
