//! Note CRUD, search, and reorder handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use memo_core::{
    AdvancedSearchRequest, CreateNoteRequest, Note, NoteRepository, ReorderRequest,
    UpdateNoteRequest,
};

use crate::{ApiError, AppState};

pub async fn list_notes(State(state): State<AppState>) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state.db.notes.list(state.principal).await?;
    Ok(Json(notes))
}

pub async fn create_note(
    State(state): State<AppState>,
    Json(req): Json<CreateNoteRequest>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let note = state.db.notes.insert(state.principal, req).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Note>, ApiError> {
    let note = state.db.notes.fetch(state.principal, id).await?;
    Ok(Json(note))
}

pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateNoteRequest>,
) -> Result<Json<Note>, ApiError> {
    let note = state.db.notes.update(state.principal, id, req).await?;
    Ok(Json(note))
}

pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.db.notes.delete(state.principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub content_only: bool,
}

pub async fn search_notes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state
        .db
        .notes
        .search(state.principal, &params.q, params.content_only)
        .await?;
    Ok(Json(notes))
}

pub async fn advanced_search(
    State(state): State<AppState>,
    Query(req): Query<AdvancedSearchRequest>,
) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state.db.notes.advanced_search(state.principal, req).await?;
    Ok(Json(notes))
}

pub async fn reorder_notes(
    State(state): State<AppState>,
    Json(req): Json<ReorderRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.db.notes.reorder(state.principal, &req.note_ids).await?;
    Ok(Json(
        serde_json::json!({ "message": "notes reordered successfully" }),
    ))
}
