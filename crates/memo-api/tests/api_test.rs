//! Integration tests for the JSON API surface.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{create_note, create_share, send_json, test_app, test_app_with};
use memo_core::UpstreamError;
use memo_inference::MockGenerationBackend;

#[tokio::test]
async fn test_health() {
    let ctx = test_app().await;
    let (status, body) = send_json(&ctx.app, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

// =============================================================================
// NOTES
// =============================================================================

#[tokio::test]
async fn test_create_and_list_worked_example() {
    let ctx = test_app().await;

    let (status, first) = send_json(
        &ctx.app,
        "POST",
        "/api/notes",
        Some(json!({"title": "A", "content": "B"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["id"], 1);
    assert_eq!(first["order_index"], 0);

    let (_, second) = send_json(
        &ctx.app,
        "POST",
        "/api/notes",
        Some(json!({"title": "C", "content": "D"})),
    )
    .await;
    assert_eq!(second["id"], 2);
    assert_eq!(second["order_index"], 1);

    let (status, body) = send_json(
        &ctx.app,
        "PUT",
        "/api/notes/reorder",
        Some(json!({"note_ids": [2, 1]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "notes reordered successfully");

    let (status, listed) = send_json(&ctx.app, "GET", "/api/notes", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![2, 1]);
}

#[tokio::test]
async fn test_create_note_requires_title_and_content() {
    let ctx = test_app().await;
    let (status, body) = send_json(
        &ctx.app,
        "POST",
        "/api/notes",
        Some(json!({"title": "", "content": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("title"));
}

#[tokio::test]
async fn test_get_update_delete_note() {
    let ctx = test_app().await;
    let id = create_note(&ctx.app, "Original", "body").await;

    let (status, fetched) = send_json(&ctx.app, "GET", &format!("/api/notes/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "Original");

    let (status, updated) = send_json(
        &ctx.app,
        "PUT",
        &format!("/api/notes/{id}"),
        Some(json!({"content": "revised"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Original");
    assert_eq!(updated["content"], "revised");

    let (status, _) = send_json(&ctx.app, "DELETE", &format!("/api/notes/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send_json(&ctx.app, "GET", &format!("/api/notes/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_unknown_note_is_404() {
    let ctx = test_app().await;
    let (status, body) = send_json(&ctx.app, "GET", "/api/notes/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("999"));
}

#[tokio::test]
async fn test_search_endpoint() {
    let ctx = test_app().await;
    create_note(&ctx.app, "Groceries", "buy oat milk").await;
    create_note(&ctx.app, "Workout", "leg day").await;

    let (status, hits) =
        send_json(&ctx.app, "GET", "/api/notes/search?q=oat", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hits.as_array().unwrap().len(), 1);
    assert_eq!(hits[0]["title"], "Groceries");

    // Title-only match is invisible to content-only search.
    let (_, hits) = send_json(
        &ctx.app,
        "GET",
        "/api/notes/search?q=Workout&content_only=true",
        None,
    )
    .await;
    assert!(hits.as_array().unwrap().is_empty());

    // Empty query returns nothing.
    let (_, hits) = send_json(&ctx.app, "GET", "/api/notes/search?q=", None).await;
    assert!(hits.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_advanced_search_endpoint_sorts_by_title() {
    let ctx = test_app().await;
    create_note(&ctx.app, "banana", "x").await;
    create_note(&ctx.app, "apple", "x").await;

    let (status, hits) = send_json(
        &ctx.app,
        "GET",
        "/api/advanced-search?sort=title_asc",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = hits
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["apple", "banana"]);
}

#[tokio::test]
async fn test_reorder_ignores_unknown_ids() {
    let ctx = test_app().await;
    let a = create_note(&ctx.app, "a", "x").await;
    let b = create_note(&ctx.app, "b", "x").await;

    let (status, _) = send_json(
        &ctx.app,
        "PUT",
        "/api/notes/reorder",
        Some(json!({"note_ids": [777, b, a]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, listed) = send_json(&ctx.app, "GET", "/api/notes", None).await;
    let ids: Vec<i64> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![b, a]);
}

// =============================================================================
// SHARE LINKS
// =============================================================================

#[tokio::test]
async fn test_share_lifecycle() {
    let ctx = test_app().await;
    let id = create_note(&ctx.app, "Shared", "visible body").await;

    let (status, created) = send_json(
        &ctx.app,
        "POST",
        &format!("/api/notes/{id}/share"),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let token = created["share"]["share_token"].as_str().unwrap().to_string();
    assert_eq!(created["share"]["has_password"], false);
    assert_eq!(created["share"]["view_count"], 0);
    assert_eq!(
        created["share_url"].as_str().unwrap(),
        format!("/shared/{token}")
    );

    // Listing shows the link, newest first.
    let (status, listed) =
        send_json(&ctx.app, "GET", &format!("/api/notes/{id}/shares"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    // Resolving returns the snapshot and counts the view.
    let (status, view) = send_json(&ctx.app, "GET", &format!("/api/shares/{token}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["title"], "Shared");
    assert_eq!(view["view_count"], 1);

    let (_, view) = send_json(&ctx.app, "GET", &format!("/api/shares/{token}"), None).await;
    assert_eq!(view["view_count"], 2);

    // Revoke, then the link is forbidden; revoking again stays 204.
    let (status, _) = send_json(&ctx.app, "DELETE", &format!("/api/shares/{token}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send_json(&ctx.app, "GET", &format!("/api/shares/{token}"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send_json(&ctx.app, "DELETE", &format!("/api/shares/{token}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_share_password_gate_over_http() {
    let ctx = test_app().await;
    let id = create_note(&ctx.app, "Secret", "classified").await;
    let token = create_share(&ctx.app, id, json!({"password": "sesame"})).await;

    let (status, body) = send_json(&ctx.app, "GET", &format!("/api/shares/{token}"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["password_required"], true);

    let (status, _) = send_json(
        &ctx.app,
        "GET",
        &format!("/api/shares/{token}?password=wrong"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, view) = send_json(
        &ctx.app,
        "GET",
        &format!("/api/shares/{token}?password=sesame"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["view_count"], 1);
}

#[tokio::test]
async fn test_share_invalid_expiry_is_rejected() {
    let ctx = test_app().await;
    let id = create_note(&ctx.app, "Shared", "body").await;

    let (status, body) = send_json(
        &ctx.app,
        "POST",
        &format!("/api/notes/{id}/share"),
        Some(json!({"expires_days": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("expires_days"));
}

#[tokio::test]
async fn test_expired_share_is_gone_over_http() {
    let ctx = test_app().await;
    let id = create_note(&ctx.app, "Ephemeral", "body").await;
    let token = create_share(&ctx.app, id, json!({"expires_days": 1})).await;

    sqlx::query("UPDATE shared_links SET expires_at = ? WHERE share_token = ?")
        .bind(chrono::Utc::now() - chrono::Duration::days(2))
        .bind(&token)
        .execute(ctx.db.pool())
        .await
        .unwrap();

    let (status, _) = send_json(&ctx.app, "GET", &format!("/api/shares/{token}"), None).await;
    assert_eq!(status, StatusCode::GONE);
}

#[tokio::test]
async fn test_deleting_note_removes_share_links() {
    let ctx = test_app().await;
    let id = create_note(&ctx.app, "Doomed", "body").await;
    let token = create_share(&ctx.app, id, json!({})).await;

    let (status, _) = send_json(&ctx.app, "DELETE", &format!("/api/notes/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send_json(&ctx.app, "GET", &format!("/api/shares/{token}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// AI-ASSISTED ENDPOINTS
// =============================================================================

#[tokio::test]
async fn test_translate_note() {
    let mock = MockGenerationBackend::new()
        .with_response_for("Market run", "COURSE AU MARCHÉ")
        .with_response_for("buy bread", "ACHETER DU PAIN");
    let ctx = test_app_with(mock).await;
    let id = create_note(&ctx.app, "Market run", "buy bread").await;

    let (status, body) = send_json(
        &ctx.app,
        "POST",
        &format!("/api/notes/{id}/translate"),
        Some(json!({"target_language": "French"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["original"]["title"], "Market run");
    assert_eq!(body["translated"]["title"], "COURSE AU MARCHÉ");
    assert_eq!(body["translated"]["content"], "ACHETER DU PAIN");
    assert_eq!(body["target_language"], "French");

    // One call per non-empty field.
    assert_eq!(ctx.llm.call_count(), 2);
}

#[tokio::test]
async fn test_translate_requires_target_language() {
    let ctx = test_app().await;
    let id = create_note(&ctx.app, "t", "c").await;
    let (status, _) = send_json(
        &ctx.app,
        "POST",
        &format!("/api/notes/{id}/translate"),
        Some(json!({"target_language": "  "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_translate_unknown_note_is_404() {
    let ctx = test_app().await;
    let (status, _) = send_json(
        &ctx.app,
        "POST",
        "/api/notes/55/translate",
        Some(json!({"target_language": "French"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upstream_failure_maps_to_bad_gateway_with_kind() {
    let mock = MockGenerationBackend::new()
        .with_failure(UpstreamError::Timeout("deadline exceeded".to_string()));
    let ctx = test_app_with(mock).await;
    let id = create_note(&ctx.app, "t", "c").await;

    let (status, body) = send_json(
        &ctx.app,
        "POST",
        &format!("/api/notes/{id}/translate"),
        Some(json!({"target_language": "French"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["upstream"], "timeout");
    assert_eq!(body["retryable"], true);
}

#[tokio::test]
async fn test_missing_credential_maps_to_service_unavailable() {
    let mock = MockGenerationBackend::new().with_failure(UpstreamError::MissingCredential(
        "set LLM_API_KEY".to_string(),
    ));
    let ctx = test_app_with(mock).await;
    let id = create_note(&ctx.app, "t", "c").await;

    let (status, body) = send_json(
        &ctx.app,
        "POST",
        &format!("/api/notes/{id}/translate"),
        Some(json!({"target_language": "French"})),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["upstream"], "missing_credential");
    assert_eq!(body["retryable"], false);
}

#[tokio::test]
async fn test_generate_preview_with_structured_reply() {
    let mock = MockGenerationBackend::new().with_fixed_response(
        r#"{"Title": "Standup", "Notes": "Monday 9am, progress and blockers", "Tags": ["meeting", "team"]}"#,
    );
    let ctx = test_app_with(mock).await;

    let (status, body) = send_json(
        &ctx.app,
        "POST",
        "/api/notes/generate",
        Some(json!({"input": "standup every monday 9am", "language": "English"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["generated"]["title"], "Standup");
    assert_eq!(body["generated"]["tags"][0], "meeting");

    // Preview does not persist anything.
    let (_, listed) = send_json(&ctx.app, "GET", "/api/notes", None).await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_generate_falls_back_on_invalid_json() {
    let mock = MockGenerationBackend::new().with_fixed_response("Sure, here is your note!");
    let ctx = test_app_with(mock).await;

    let (status, body) = send_json(
        &ctx.app,
        "POST",
        "/api/notes/generate",
        Some(json!({"input": "buy milk", "language": "English"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["generated"]["title"], "Generated Note");
    assert_eq!(body["generated"]["content"], "buy milk");
    assert_eq!(body["generated"]["tags"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_generate_and_save_appends_tags() {
    let mock = MockGenerationBackend::new().with_fixed_response(
        r#"{"Title": "Dentist", "Notes": "Call for an afternoon slot", "Tags": ["health", "todo"]}"#,
    );
    let ctx = test_app_with(mock).await;

    let (status, body) = send_json(
        &ctx.app,
        "POST",
        "/api/notes/generate-and-save",
        Some(json!({"input": "call dentist next week", "language": "English"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["note"]["title"], "Dentist");
    let content = body["note"]["content"].as_str().unwrap();
    assert!(content.ends_with("Tags: health, todo"));

    let note_id = body["note"]["id"].as_i64().unwrap();
    let (status, _) = send_json(&ctx.app, "GET", &format!("/api/notes/{note_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_generate_requires_input() {
    let ctx = test_app().await;
    let (status, _) = send_json(
        &ctx.app,
        "POST",
        "/api/notes/generate",
        Some(json!({"input": "  "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// TEMPLATES
// =============================================================================

#[tokio::test]
async fn test_template_catalog() {
    let ctx = test_app().await;
    let (status, body) = send_json(&ctx.app, "GET", "/api/notes/templates", None).await;
    assert_eq!(status, StatusCode::OK);
    let templates = body.as_array().unwrap();
    assert_eq!(templates.len(), 6);
    assert_eq!(templates[0]["id"], "meeting");
    assert_eq!(templates[0]["name"], "Meeting Notes");

    let (status, detail) =
        send_json(&ctx.app, "GET", "/api/notes/templates/daily_journal", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(detail["content"].as_str().unwrap().contains("{date}"));

    let (status, _) = send_json(&ctx.app, "GET", "/api/notes/templates/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_note_from_template() {
    let ctx = test_app().await;

    let (status, note) = send_json(
        &ctx.app,
        "POST",
        "/api/templates/meeting/create",
        Some(json!({"date": "2026-08-05"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(note["title"], "Meeting Notes - 2026-08-05");
    let content = note["content"].as_str().unwrap();
    assert!(content.contains("**Date:** 2026-08-05"));
    assert!(content.ends_with("Tags: meeting, work, notes"));

    let (status, _) = send_json(
        &ctx.app,
        "POST",
        "/api/templates/unknown/create",
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
