//! Integration tests for the export job lifecycle over HTTP.

mod helpers;

use std::time::Duration;

use http::StatusCode;
use serde_json::json;
use tokio::time;

use helpers::TestApp;
use noteflow_worker::scheduler::SHUTDOWN_REASON;

async fn add_note(app: &TestApp, token: &str, title: &str) {
    let response = app
        .request(
            "POST",
            "/api/notes",
            Some(json!({ "title": title, "body": "body text", "tags": ["t"] })),
            Some(token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
}

async fn start_export(app: &TestApp, token: &str, body: Option<serde_json::Value>) -> String {
    let response = app.request("POST", "/api/export", body, Some(token)).await;
    assert_eq!(response.status, StatusCode::ACCEPTED);
    response.body["id"].as_str().expect("job id").to_string()
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[tokio::test(start_paused = true)]
async fn test_json_export_full_lifecycle() {
    let app = TestApp::new();
    let token = app.register_and_login("ada").await;
    add_note(&app, &token, "First").await;
    add_note(&app, &token, "Second").await;

    let response = app
        .request("POST", "/api/export", Some(json!({ "format": "json" })), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::ACCEPTED);
    assert_eq!(response.body["status"], "pending");
    assert_eq!(response.body["progress"], 0);
    assert_eq!(response.body["format"], "json");
    assert!(response.body["createdAt"].is_string());
    assert!(response.body.get("error").is_none());
    assert!(response.body.get("owner").is_none());
    let id = response.body["id"].as_str().expect("id").to_string();

    let response = app
        .request("GET", &format!("/api/export/{id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "INVALID_STATE");
    assert_eq!(response.body["message"], "Export not completed");

    time::sleep(Duration::from_millis(150)).await;
    let response = app
        .request("GET", &format!("/api/jobs/{id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "processing");
    assert_eq!(response.body["progress"], 10);

    time::sleep(Duration::from_secs(2)).await;
    let response = app
        .request("GET", &format!("/api/jobs/{id}"), None, Some(&token))
        .await;
    assert_eq!(response.body["status"], "completed");
    assert_eq!(response.body["progress"], 100);

    let response = app
        .request("GET", &format!("/api/export/{id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("content-type"), Some("application/json"));
    assert_eq!(
        response.header("content-disposition"),
        Some("attachment; filename=\"notes-export.json\"")
    );
    let notes = response.body.as_array().expect("array of notes");
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0]["title"], "First");
}

#[tokio::test(start_paused = true)]
async fn test_pdf_export_has_page_per_note() {
    let app = TestApp::new();
    let token = app.register_and_login("ada").await;
    add_note(&app, &token, "One").await;
    add_note(&app, &token, "Two").await;
    add_note(&app, &token, "Three").await;

    let id = start_export(&app, &token, Some(json!({ "format": "pdf" }))).await;
    time::sleep(Duration::from_secs(3)).await;

    let response = app
        .request("GET", &format!("/api/export/{id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("content-type"), Some("application/pdf"));
    assert_eq!(
        response.header("content-disposition"),
        Some("attachment; filename=\"notes-export.pdf\"")
    );

    let doc = lopdf::Document::load_mem(&response.bytes).expect("valid pdf");
    assert_eq!(doc.get_pages().len(), 3);
    assert!(contains(&response.bytes, b"NoteFlow Export"));
    assert!(contains(&response.bytes, b"Total Notes: 3"));
}

#[tokio::test(start_paused = true)]
async fn test_empty_pdf_export() {
    let app = TestApp::new();
    let token = app.register_and_login("ada").await;

    let id = start_export(&app, &token, Some(json!({ "format": "pdf" }))).await;
    time::sleep(Duration::from_secs(3)).await;

    let response = app
        .request("GET", &format!("/api/export/{id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let doc = lopdf::Document::load_mem(&response.bytes).expect("valid pdf");
    assert_eq!(doc.get_pages().len(), 1);
    assert!(contains(&response.bytes, b"No notes to export."));
    assert!(contains(&response.bytes, b"Total Notes: 0"));
}

#[tokio::test(start_paused = true)]
async fn test_format_defaults_to_json() {
    let app = TestApp::new();
    let token = app.register_and_login("ada").await;

    let response = app.request("POST", "/api/export", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::ACCEPTED);
    assert_eq!(response.body["format"], "json");

    let response = app
        .request("POST", "/api/export", Some(json!({ "format": "docx" })), Some(&token))
        .await;
    assert_eq!(response.body["format"], "json");
}

#[tokio::test(start_paused = true)]
async fn test_jobs_are_visible_only_to_owner() {
    let app = TestApp::new();
    let ada = app.register_and_login("ada").await;
    let bob = app.register_and_login("bob").await;

    let id = start_export(&app, &ada, None).await;
    time::sleep(Duration::from_secs(3)).await;

    let response = app
        .request("GET", &format!("/api/jobs/{id}"), None, Some(&bob))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Job not found");

    let response = app
        .request("GET", &format!("/api/export/{id}"), None, Some(&bob))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("GET", "/api/jobs/not-a-job", None, Some(&ada))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test(start_paused = true)]
async fn test_artifact_reflects_notes_at_fetch_time() {
    let app = TestApp::new();
    let token = app.register_and_login("ada").await;
    add_note(&app, &token, "Before").await;

    let id = start_export(&app, &token, None).await;
    time::sleep(Duration::from_secs(3)).await;
    add_note(&app, &token, "After").await;

    let response = app
        .request("GET", &format!("/api/export/{id}"), None, Some(&token))
        .await;
    assert_eq!(response.body.as_array().map(Vec::len), Some(2));
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_fails_running_jobs() {
    let app = TestApp::new();
    let token = app.register_and_login("ada").await;

    let id = start_export(&app, &token, None).await;
    time::sleep(Duration::from_millis(350)).await;
    app.state.export_service.scheduler().shutdown().await;

    let response = app
        .request("GET", &format!("/api/jobs/{id}"), None, Some(&token))
        .await;
    assert_eq!(response.body["status"], "failed");
    assert_eq!(response.body["error"], SHUTDOWN_REASON);

    let response = app
        .request("GET", &format!("/api/export/{id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_export_requires_auth() {
    let app = TestApp::new();
    let response = app.request("POST", "/api/export", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
