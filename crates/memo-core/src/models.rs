//! Data model for memo: notes, share links, and their wire representations.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// PRINCIPAL
// =============================================================================

/// The current user, passed explicitly into every store operation.
///
/// Single-user deployments use `Principal::default()`, which names the row
/// seeded by the first migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Principal(pub i64);

impl Default for Principal {
    fn default() -> Self {
        Self(1)
    }
}

// =============================================================================
// NOTES
// =============================================================================

/// A stored note.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// Manual display position; lower sorts first.
    pub order_index: i64,
    pub user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request for creating a new note.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
}

/// Partial update; only supplied fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Bulk reposition request. Each note takes the order_index of its position
/// in the list; ids not present in the store are skipped silently.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderRequest {
    pub note_ids: Vec<i64>,
}

/// Sort orders accepted by advanced search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    UpdatedAsc,
    UpdatedDesc,
    CreatedAsc,
    CreatedDesc,
    TitleAsc,
    TitleDesc,
}

impl SortKey {
    /// Parse a sort name; anything unrecognized falls back to `updated_desc`.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("updated_asc") => Self::UpdatedAsc,
            Some("created_asc") => Self::CreatedAsc,
            Some("created_desc") => Self::CreatedDesc,
            Some("title_asc") => Self::TitleAsc,
            Some("title_desc") => Self::TitleDesc,
            _ => Self::UpdatedDesc,
        }
    }
}

/// Advanced search parameters: optional substring filter, optional creation
/// date range, and a sort order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdvancedSearchRequest {
    pub q: Option<String>,
    /// Inclusive lower bound (midnight UTC of this date).
    pub date_from: Option<NaiveDate>,
    /// Exclusive upper bound at the next-day boundary.
    pub date_to: Option<NaiveDate>,
    pub sort: Option<String>,
}

// =============================================================================
// SHARE LINKS
// =============================================================================

/// A stored share link. Internal representation; the password hash never
/// leaves the persistence layer.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SharedLink {
    pub id: i64,
    pub note_id: i64,
    pub share_token: String,
    pub password_hash: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
}

impl SharedLink {
    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map(|e| now > e).unwrap_or(false)
    }

    /// A link is accessible iff it is active and not past its expiry.
    pub fn is_accessible_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active && !self.is_expired_at(now)
    }

    /// Outward representation for JSON responses.
    pub fn summary(&self, now: DateTime<Utc>) -> SharedLinkSummary {
        SharedLinkSummary {
            id: self.id,
            share_token: self.share_token.clone(),
            has_password: self.has_password(),
            expires_at: self.expires_at,
            is_active: self.is_active,
            view_count: self.view_count,
            created_at: self.created_at,
            is_expired: self.is_expired_at(now),
        }
    }
}

/// What clients see when listing or creating share links. Never carries
/// the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedLinkSummary {
    pub id: i64,
    pub share_token: String,
    pub has_password: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub is_expired: bool,
}

/// Request for creating a share link.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateShareRequest {
    pub password: Option<String>,
    /// Days until expiry, within [1, 365]. Absent means never expires.
    pub expires_days: Option<i64>,
}

/// Note snapshot returned by a successful share resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedNoteView {
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// When the link itself was created.
    pub shared_at: DateTime<Utc>,
    /// Count after this resolution's increment.
    pub view_count: i64,
}

// =============================================================================
// AI GENERATION
// =============================================================================

/// Structured note produced by extraction or template instantiation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedNote {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}
