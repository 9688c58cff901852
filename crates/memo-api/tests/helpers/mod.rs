//! Shared helpers for API integration tests: an in-memory app instance and
//! request plumbing.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use memo_api::{build_router, AppState};
use memo_core::Principal;
use memo_db::test_fixtures::memory_database;
use memo_db::Database;
use memo_inference::MockGenerationBackend;

/// A fully wired application over an in-memory database and a mock LLM.
pub struct TestContext {
    pub app: Router,
    #[allow(dead_code)]
    pub db: Database,
    #[allow(dead_code)]
    pub llm: MockGenerationBackend,
}

/// Build a test app with a default mock backend.
#[allow(dead_code)]
pub async fn test_app() -> TestContext {
    test_app_with(MockGenerationBackend::new()).await
}

/// Build a test app around a pre-configured mock backend.
#[allow(dead_code)]
pub async fn test_app_with(llm: MockGenerationBackend) -> TestContext {
    let db = memory_database().await;
    let state = AppState {
        db: db.clone(),
        llm: Arc::new(llm.clone()),
        principal: Principal::default(),
    };
    TestContext {
        app: build_router(state),
        db,
        llm,
    }
}

/// Send a request with an optional JSON body; parse the response as JSON.
/// Empty bodies (204 responses) come back as `Value::Null`.
pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            builder.body(Body::from(json.to_string())).unwrap()
        }
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// Send a request and return the raw response body as text.
#[allow(dead_code)]
pub async fn send_text(app: &Router, method: &str, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

/// Create a note via the API and return its id.
#[allow(dead_code)]
pub async fn create_note(app: &Router, title: &str, content: &str) -> i64 {
    let (status, body) = send_json(
        app,
        "POST",
        "/api/notes",
        Some(serde_json::json!({ "title": title, "content": content })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

/// Create a share link via the API and return its token.
#[allow(dead_code)]
pub async fn create_share(app: &Router, note_id: i64, body: Value) -> String {
    let (status, response) = send_json(
        app,
        "POST",
        &format!("/api/notes/{}/share", note_id),
        Some(body),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    response["share"]["share_token"].as_str().unwrap().to_string()
}
