//! AI-assisted handlers: translation, structured note generation, and
//! generate-and-save.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use memo_core::{CreateNoteRequest, GeneratedNote, Note, NoteRepository};
use memo_inference::assist;

use super::content_with_tags;
use crate::{ApiError, AppState};

const DEFAULT_LANGUAGE: &str = "English";

// =============================================================================
// TRANSLATION
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    pub target_language: String,
}

#[derive(Debug, Serialize)]
pub struct NoteText {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub original: NoteText,
    pub translated: NoteText,
    pub target_language: String,
}

pub async fn translate_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, ApiError> {
    if req.target_language.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "target_language is required".to_string(),
        ));
    }

    let note = state.db.notes.fetch(state.principal, id).await?;

    // Title and content translate independently; empty fields are skipped.
    let translated_title = if note.title.is_empty() {
        String::new()
    } else {
        assist::translate(state.llm.as_ref(), &note.title, &req.target_language).await?
    };
    let translated_content = if note.content.is_empty() {
        String::new()
    } else {
        assist::translate(state.llm.as_ref(), &note.content, &req.target_language).await?
    };

    Ok(Json(TranslateResponse {
        original: NoteText {
            title: note.title,
            content: note.content,
        },
        translated: NoteText {
            title: translated_title,
            content: translated_content,
        },
        target_language: req.target_language,
    }))
}

// =============================================================================
// STRUCTURED GENERATION
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub input: String,
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub generated: GeneratedNote,
}

#[derive(Debug, Serialize)]
pub struct GenerateAndSaveResponse {
    pub note: Note,
}

pub async fn generate_note(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let generated = run_generation(&state, &req).await?;
    Ok(Json(GenerateResponse { generated }))
}

pub async fn generate_and_save(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<(StatusCode, Json<GenerateAndSaveResponse>), ApiError> {
    let generated = run_generation(&state, &req).await?;

    let note = state
        .db
        .notes
        .insert(
            state.principal,
            CreateNoteRequest {
                title: generated.title.clone(),
                content: content_with_tags(&generated.content, &generated.tags),
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(GenerateAndSaveResponse { note })))
}

async fn run_generation(state: &AppState, req: &GenerateRequest) -> Result<GeneratedNote, ApiError> {
    if req.input.trim().is_empty() {
        return Err(ApiError::BadRequest("input is required".to_string()));
    }
    let language = req.language.as_deref().unwrap_or(DEFAULT_LANGUAGE);
    Ok(assist::extract(state.llm.as_ref(), &req.input, language).await?)
}
