//! Template catalog and template-based note creation handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use memo_core::{templates, CreateNoteRequest, Note, NoteRepository, TemplateOverrides, TemplateSummary};

use super::content_with_tags;
use crate::{ApiError, AppState};

/// Full template payload, including the raw patterns.
#[derive(Debug, Serialize)]
pub struct TemplateDetail {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

pub async fn list_templates() -> Json<Vec<TemplateSummary>> {
    Json(templates::catalog().iter().map(|t| t.summary()).collect())
}

pub async fn get_template(Path(id): Path<String>) -> Result<Json<TemplateDetail>, ApiError> {
    let template = templates::get(&id)
        .ok_or_else(|| ApiError::NotFound(format!("template '{}' not found", id)))?;
    Ok(Json(TemplateDetail {
        id: template.id.to_string(),
        name: template.name.to_string(),
        description: template.description.to_string(),
        icon: template.icon.to_string(),
        title: template.title.to_string(),
        content: template.content.to_string(),
        tags: template.tags.iter().map(|t| t.to_string()).collect(),
    }))
}

pub async fn create_from_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(overrides): Json<TemplateOverrides>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let generated = templates::instantiate(&id, &overrides)?;

    let note = state
        .db
        .notes
        .insert(
            state.principal,
            CreateNoteRequest {
                title: generated.title,
                content: content_with_tags(&generated.content, &generated.tags),
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(note)))
}
