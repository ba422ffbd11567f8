//! Integration tests for multipart JSON note import.

mod helpers;

use http::StatusCode;

use helpers::TestApp;

#[tokio::test]
async fn test_import_accepts_valid_and_reports_rejected() {
    let app = TestApp::new();
    let token = app.register_and_login("ada").await;

    let file = r#"[
        {"title": "Kept", "body": "has both", "tags": ["imported"]},
        {"title": "No body"},
        {"title": "", "body": "empty title"},
        {"title": "Also kept", "body": "no tags"}
    ]"#;
    let response = app.upload("/api/import", "file", file, &token).await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["created"], 2);
    assert_eq!(response.body["rejected"], 2);
    assert_eq!(
        response.body["errors"],
        serde_json::json!([
            "Note at index 1: Missing required fields",
            "Note at index 2: Missing required fields"
        ])
    );

    let response = app.request("GET", "/api/notes?sortBy=title", None, Some(&token)).await;
    let notes = response.body.as_array().expect("array");
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0]["title"], "Also kept");
    assert_eq!(notes[0]["tags"], serde_json::json!([]));
    assert_eq!(notes[1]["tags"], serde_json::json!(["imported"]));
}

#[tokio::test]
async fn test_import_omits_errors_when_all_valid() {
    let app = TestApp::new();
    let token = app.register_and_login("ada").await;

    let response = app
        .upload("/api/import", "file", r#"[{"title": "a", "body": "b"}]"#, &token)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["created"], 1);
    assert_eq!(response.body["rejected"], 0);
    assert!(response.body.get("errors").is_none());
}

#[tokio::test]
async fn test_import_rejects_invalid_json() {
    let app = TestApp::new();
    let token = app.register_and_login("ada").await;

    let response = app.upload("/api/import", "file", "{not json", &token).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Invalid JSON file");
}

#[tokio::test]
async fn test_import_rejects_non_array() {
    let app = TestApp::new();
    let token = app.register_and_login("ada").await;

    let response = app
        .upload("/api/import", "file", r#"{"title": "a", "body": "b"}"#, &token)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Invalid file format");
}

#[tokio::test]
async fn test_import_without_file_part() {
    let app = TestApp::new();
    let token = app.register_and_login("ada").await;

    let response = app.upload("/api/import", "other", "[]", &token).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "No file uploaded");

    let response = app.request("POST", "/api/import", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "No file uploaded");
}

#[tokio::test]
async fn test_imported_notes_belong_to_importer() {
    let app = TestApp::new();
    let ada = app.register_and_login("ada").await;
    let bob = app.register_and_login("bob").await;

    app.upload("/api/import", "file", r#"[{"title": "a", "body": "b"}]"#, &ada)
        .await;

    let response = app.request("GET", "/api/notes", None, Some(&bob)).await;
    assert_eq!(response.body, serde_json::json!([]));
}
