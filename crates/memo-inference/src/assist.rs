//! Prompt construction and response handling for the AI-assisted features:
//! translation and free-text-to-structured-note extraction.

use serde::Deserialize;
use tracing::debug;

use memo_core::{GeneratedNote, GenerationBackend, Result};

/// Title used when the model's reply cannot be parsed as a structured note.
pub const FALLBACK_TITLE: &str = "Generated Note";

/// Translate text to the target language.
pub async fn translate(
    backend: &dyn GenerationBackend,
    text: &str,
    target_language: &str,
) -> Result<String> {
    let prompt = format!(
        "Translate the following text to {}:\n\n{}",
        target_language, text
    );
    let reply = backend.generate(&prompt).await?;
    Ok(reply.trim().to_string())
}

/// Turn free text into a structured note.
///
/// The model is asked for a JSON object with `Title`/`Notes`/`Tags` keys.
/// A reply that fails to parse degrades to a default note wrapping the raw
/// input; only the backend call itself can fail.
pub async fn extract(
    backend: &dyn GenerationBackend,
    input: &str,
    language: &str,
) -> Result<GeneratedNote> {
    let prompt = extraction_prompt(input, language);
    let reply = backend.generate(&prompt).await?;

    Ok(parse_extraction(&reply).unwrap_or_else(|| {
        debug!(
            subsystem = "inference",
            component = "assist",
            op = "extract",
            response_len = reply.len(),
            "Model reply was not valid JSON; using fallback note"
        );
        GeneratedNote {
            title: FALLBACK_TITLE.to_string(),
            content: input.to_string(),
            tags: Vec::new(),
        }
    }))
}

fn extraction_prompt(input: &str, language: &str) -> String {
    format!(
        "You are a note-taking assistant. Convert the following text into a \
         structured note written in {language}.\n\
         Respond with only a JSON object containing exactly these keys:\n\
         \"Title\": a short descriptive title\n\
         \"Notes\": the organized note content\n\
         \"Tags\": an array of up to five short topic tags\n\n\
         Text: {input}"
    )
}

#[derive(Debug, Deserialize)]
struct ExtractionPayload {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Notes")]
    notes: String,
    #[serde(rename = "Tags", default)]
    tags: Vec<String>,
}

fn parse_extraction(reply: &str) -> Option<GeneratedNote> {
    let body = strip_code_fences(reply);
    let payload: ExtractionPayload = serde_json::from_str(body).ok()?;
    Some(GeneratedNote {
        title: payload.title,
        content: payload.notes,
        tags: payload.tags,
    })
}

/// Models often wrap JSON replies in Markdown code fences.
fn strip_code_fences(reply: &str) -> &str {
    let trimmed = reply.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    trimmed.strip_suffix("```").unwrap_or(trimmed).trim()
}
