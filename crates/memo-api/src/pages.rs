//! Shared-note HTML pages.
//!
//! Pure view logic over the share repository's resolve result: the note
//! view, a password prompt, and the not-found/unavailable error states.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;

use memo_core::{Error, SharedNoteView, ShareRepository};

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub password: Option<String>,
}

pub async fn shared_note_page(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Query(params): Query<PageParams>,
) -> Response {
    match state
        .db
        .shares
        .resolve(&token, params.password.as_deref())
        .await
    {
        Ok(view) => (StatusCode::OK, Html(note_page(&view))).into_response(),
        Err(Error::ShareNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Html(message_page(
                "Note Not Found",
                "The shared note you're looking for doesn't exist.",
            )),
        )
            .into_response(),
        Err(Error::Forbidden(_)) => (
            StatusCode::FORBIDDEN,
            Html(message_page(
                "Access Denied",
                "This shared link is no longer active.",
            )),
        )
            .into_response(),
        Err(Error::Gone(_)) => (
            StatusCode::GONE,
            Html(message_page("Access Denied", "This shared link has expired.")),
        )
            .into_response(),
        Err(Error::PasswordRequired(_)) => {
            let wrong_attempt = params.password.is_some();
            (StatusCode::UNAUTHORIZED, Html(password_page(wrong_attempt))).into_response()
        }
        Err(err) => {
            tracing::error!(
                subsystem = "api",
                component = "pages",
                error = %err,
                "Shared note page failed"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(message_page("Error", "An unexpected error occurred.")),
            )
                .into_response()
        }
    }
}

/// Escape text for safe embedding in HTML.
fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const PAGE_STYLE: &str = "\
body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; \
max-width: 800px; margin: 0 auto; padding: 20px; line-height: 1.6; background: #f8f9fa; } \
.container { background: white; padding: 30px; border-radius: 10px; \
box-shadow: 0 2px 10px rgba(0,0,0,0.1); } \
h1 { color: #333; border-bottom: 2px solid #007bff; padding-bottom: 10px; } \
.content { white-space: pre-wrap; background: #f8f9fa; padding: 20px; \
border-radius: 5px; border-left: 4px solid #007bff; margin: 20px 0; } \
.meta { font-size: 14px; color: #666; margin-top: 30px; padding-top: 20px; \
border-top: 1px solid #eee; } \
.badge { background: #007bff; color: white; padding: 4px 8px; \
border-radius: 12px; font-size: 12px; } \
input[type=password] { padding: 10px; font-size: 16px; width: 100%; \
border: 2px solid #ddd; border-radius: 5px; box-sizing: border-box; } \
button { padding: 10px 20px; font-size: 16px; background: #007bff; \
color: white; border: none; border-radius: 5px; cursor: pointer; } \
.warning { color: #dc3545; }";

fn page_shell(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <title>{}</title>\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <style>{}</style>\n\
         </head>\n\
         <body>\n{}\n</body>\n\
         </html>\n",
        html_escape(title),
        PAGE_STYLE,
        body
    )
}

fn note_page(view: &SharedNoteView) -> String {
    let body = format!(
        "<div class=\"container\">\n\
         <h1>📄 {title}</h1>\n\
         <div class=\"content\">{content}</div>\n\
         <div class=\"meta\">\n\
         <span class=\"badge\">👁️ {views} views</span> •\n\
         Shared on {shared}\n\
         </div>\n\
         </div>",
        title = html_escape(&view.title),
        content = html_escape(&view.content),
        views = view.view_count,
        shared = view.shared_at.format("%B %d, %Y"),
    );
    page_shell(&format!("{} - Shared Note", view.title), &body)
}

fn password_page(wrong_attempt: bool) -> String {
    let warning = if wrong_attempt {
        "<p class=\"warning\">Incorrect password, please try again.</p>\n"
    } else {
        ""
    };
    let body = format!(
        "<div class=\"container\">\n\
         <h2>🔒 Password Required</h2>\n{}\
         <form method=\"GET\">\n\
         <div style=\"margin: 20px 0;\">\n\
         <input type=\"password\" name=\"password\" placeholder=\"Enter password\" required>\n\
         </div>\n\
         <button type=\"submit\">Access Note</button>\n\
         </form>\n\
         </div>",
        warning
    );
    page_shell("Password Required", &body)
}

fn message_page(title: &str, message: &str) -> String {
    let body = format!(
        "<div class=\"container\">\n\
         <h1>🚫 {}</h1>\n\
         <p>{}</p>\n\
         </div>",
        html_escape(title),
        html_escape(message)
    );
    page_shell(title, &body)
}
