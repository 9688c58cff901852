//! Core traits for memo abstractions.
//!
//! These traits define the interfaces that concrete implementations
//! must satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// NOTE REPOSITORY
// =============================================================================

/// Repository for note CRUD, search, and ordering.
///
/// Every operation takes the acting [`Principal`] explicitly; nothing in the
/// store assumes a global current user.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// All notes, ordered by `order_index` ascending with ties broken by
    /// `updated_at` descending.
    async fn list(&self, principal: Principal) -> Result<Vec<Note>>;

    /// Insert a new note at the end of the manual order.
    async fn insert(&self, principal: Principal, req: CreateNoteRequest) -> Result<Note>;

    /// Fetch a note by id.
    async fn fetch(&self, principal: Principal, id: i64) -> Result<Note>;

    /// Apply the supplied fields and refresh `updated_at`.
    async fn update(&self, principal: Principal, id: i64, req: UpdateNoteRequest) -> Result<Note>;

    /// Delete a note and all of its share links.
    async fn delete(&self, principal: Principal, id: i64) -> Result<()>;

    /// Case-insensitive substring search. An empty query returns no results.
    async fn search(
        &self,
        principal: Principal,
        query: &str,
        content_only: bool,
    ) -> Result<Vec<Note>>;

    /// Reposition notes to match the order of `note_ids`. Ids not present in
    /// the store are skipped without error; the whole operation is atomic.
    async fn reorder(&self, principal: Principal, note_ids: &[i64]) -> Result<()>;

    /// Composed substring filter, creation date range, and sort order.
    async fn advanced_search(
        &self,
        principal: Principal,
        req: AdvancedSearchRequest,
    ) -> Result<Vec<Note>>;
}

// =============================================================================
// SHARE LINK REPOSITORY
// =============================================================================

/// Repository for the share link lifecycle.
#[async_trait]
pub trait ShareRepository: Send + Sync {
    /// Create a link for a note, optionally password-protected and expiring.
    async fn create(
        &self,
        principal: Principal,
        note_id: i64,
        req: CreateShareRequest,
    ) -> Result<SharedLink>;

    /// Resolve a token to its note snapshot, enforcing the active/expiry/
    /// password gates and incrementing the view counter exactly once per
    /// successful call. No principal: share resolution is public.
    async fn resolve(&self, token: &str, password: Option<&str>) -> Result<SharedNoteView>;

    /// Deactivate a link. Idempotent; revoking an already-revoked link
    /// succeeds silently.
    async fn revoke(&self, token: &str) -> Result<()>;

    /// All links for a note, newest first.
    async fn list_for_note(&self, principal: Principal, note_id: i64) -> Result<Vec<SharedLink>>;
}

// =============================================================================
// GENERATION BACKEND
// =============================================================================

/// Text generation capability backed by an external LLM endpoint.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate a completion for a prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// The model this backend generates with.
    fn model_name(&self) -> &str;
}
