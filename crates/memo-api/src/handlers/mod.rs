//! HTTP handlers for memo-api.

pub mod assist;
pub mod notes;
pub mod shares;
pub mod templates;

/// Append non-empty tags to note content as a trailing line.
pub(crate) fn content_with_tags(content: &str, tags: &[String]) -> String {
    if tags.is_empty() {
        content.to_string()
    } else {
        format!("{}\n\nTags: {}", content, tags.join(", "))
    }
}
