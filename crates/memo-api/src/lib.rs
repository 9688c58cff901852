//! memo-api - HTTP API server for memo.
//!
//! The router and application state live in the library so integration
//! tests can drive the full HTTP surface without binding a socket.

pub mod handlers;
pub mod pages;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};

use memo_core::{Error, GenerationBackend, Principal, UpstreamError};
use memo_db::Database;

// =============================================================================
// APPLICATION STATE
// =============================================================================

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub llm: Arc<dyn GenerationBackend>,
    /// The acting user. Single-user deployments pass the seeded default.
    pub principal: Principal,
}

// =============================================================================
// API ERROR
// =============================================================================

/// Handler-level error with an HTTP mapping and a structured JSON body.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    /// Password missing or incorrect; the body carries a `password_required`
    /// flag so clients know to prompt.
    PasswordRequired(String),
    Forbidden(String),
    Gone(String),
    Upstream(UpstreamError),
    Internal(Error),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::NoteNotFound(id) => ApiError::NotFound(format!("note {} not found", id)),
            Error::ShareNotFound(token) => {
                ApiError::NotFound(format!("share link '{}' not found", token))
            }
            Error::PasswordRequired(msg) => ApiError::PasswordRequired(msg),
            Error::Forbidden(msg) => ApiError::Forbidden(msg),
            Error::Gone(msg) => ApiError::Gone(msg),
            Error::Upstream(upstream) => ApiError::Upstream(upstream),
            other => ApiError::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": msg }),
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, serde_json::json!({ "error": msg })),
            ApiError::PasswordRequired(msg) => (
                StatusCode::UNAUTHORIZED,
                serde_json::json!({ "error": msg, "password_required": true }),
            ),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, serde_json::json!({ "error": msg })),
            ApiError::Gone(msg) => (StatusCode::GONE, serde_json::json!({ "error": msg })),
            ApiError::Upstream(upstream) => {
                let status = match upstream {
                    UpstreamError::MissingCredential(_) => StatusCode::SERVICE_UNAVAILABLE,
                    _ => StatusCode::BAD_GATEWAY,
                };
                let body = serde_json::json!({
                    "error": upstream.to_string(),
                    "upstream": upstream.kind(),
                    "retryable": upstream.is_retryable(),
                });
                (status, body)
            }
            ApiError::Internal(err) => {
                tracing::error!(
                    subsystem = "api",
                    error = %err,
                    "Request failed with internal error"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "error": err.to_string() }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// ROUTER
// =============================================================================

/// Build the application router. JSON endpoints live under `/api`; the
/// shared-note HTML page lives at `/shared/:token`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route(
            "/api/notes",
            get(handlers::notes::list_notes).post(handlers::notes::create_note),
        )
        .route("/api/notes/search", get(handlers::notes::search_notes))
        .route("/api/notes/reorder", put(handlers::notes::reorder_notes))
        .route("/api/notes/templates", get(handlers::templates::list_templates))
        .route(
            "/api/notes/templates/:id",
            get(handlers::templates::get_template),
        )
        .route("/api/notes/generate", post(handlers::assist::generate_note))
        .route(
            "/api/notes/generate-and-save",
            post(handlers::assist::generate_and_save),
        )
        .route(
            "/api/notes/:id",
            get(handlers::notes::get_note)
                .put(handlers::notes::update_note)
                .delete(handlers::notes::delete_note),
        )
        .route(
            "/api/notes/:id/translate",
            post(handlers::assist::translate_note),
        )
        .route("/api/notes/:id/share", post(handlers::shares::create_share))
        .route("/api/notes/:id/shares", get(handlers::shares::list_shares))
        .route("/api/advanced-search", get(handlers::notes::advanced_search))
        .route(
            "/api/templates/:id/create",
            post(handlers::templates::create_from_template),
        )
        .route(
            "/api/shares/:token",
            get(handlers::shares::resolve_share).delete(handlers::shares::revoke_share),
        )
        .route("/shared/:token", get(pages::shared_note_page))
        .with_state(state)
}

/// Liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
