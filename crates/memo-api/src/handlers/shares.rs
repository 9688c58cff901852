//! Share link handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use memo_core::{CreateShareRequest, SharedLinkSummary, SharedNoteView, ShareRepository};

use crate::{ApiError, AppState};

#[derive(Debug, Serialize)]
pub struct CreateShareResponse {
    pub share: SharedLinkSummary,
    /// Relative URL of the public HTML view.
    pub share_url: String,
}

pub async fn create_share(
    State(state): State<AppState>,
    Path(note_id): Path<i64>,
    Json(req): Json<CreateShareRequest>,
) -> Result<(StatusCode, Json<CreateShareResponse>), ApiError> {
    let link = state
        .db
        .shares
        .create(state.principal, note_id, req)
        .await?;
    let share_url = format!("/shared/{}", link.share_token);
    Ok((
        StatusCode::CREATED,
        Json(CreateShareResponse {
            share: link.summary(Utc::now()),
            share_url,
        }),
    ))
}

pub async fn list_shares(
    State(state): State<AppState>,
    Path(note_id): Path<i64>,
) -> Result<Json<Vec<SharedLinkSummary>>, ApiError> {
    let now = Utc::now();
    let links = state
        .db
        .shares
        .list_for_note(state.principal, note_id)
        .await?;
    Ok(Json(links.iter().map(|l| l.summary(now)).collect()))
}

#[derive(Debug, Deserialize)]
pub struct ResolveParams {
    pub password: Option<String>,
}

pub async fn resolve_share(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Query(params): Query<ResolveParams>,
) -> Result<Json<SharedNoteView>, ApiError> {
    let view = state
        .db
        .shares
        .resolve(&token, params.password.as_deref())
        .await?;
    Ok(Json(view))
}

pub async fn revoke_share(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.db.shares.revoke(&token).await?;
    Ok(StatusCode::NO_CONTENT)
}
