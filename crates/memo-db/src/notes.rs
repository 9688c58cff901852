//! Note repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, NaiveTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;

use memo_core::{
    AdvancedSearchRequest, CreateNoteRequest, Error, Note, NoteRepository, Principal, Result,
    SortKey, UpdateNoteRequest,
};

use crate::escape_like;

const NOTE_COLUMNS: &str = "id, title, content, order_index, user_id, created_at, updated_at";

/// Default listing order: manual position first, most recently touched on ties.
const DEFAULT_ORDER: &str = "order_index ASC, updated_at DESC";

/// SQLite implementation of NoteRepository.
pub struct SqliteNoteRepository {
    pool: SqlitePool,
}

impl SqliteNoteRepository {
    /// Create a new SqliteNoteRepository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_tx(
        tx: &mut Transaction<'_, Sqlite>,
        principal: Principal,
        id: i64,
    ) -> Result<Note> {
        let sql = format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ? AND user_id = ?");
        sqlx::query_as::<_, Note>(&sql)
            .bind(id)
            .bind(principal.0)
            .fetch_optional(&mut **tx)
            .await
            .map_err(Error::Database)?
            .ok_or(Error::NoteNotFound(id))
    }
}

/// Reject missing or blank required text fields.
fn require_text(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidInput(format!("{} is required", field)));
    }
    Ok(())
}

/// ORDER BY clause for an advanced-search sort key.
fn order_clause(sort: SortKey) -> &'static str {
    match sort {
        SortKey::UpdatedAsc => "updated_at ASC",
        SortKey::UpdatedDesc => "updated_at DESC",
        SortKey::CreatedAsc => "created_at ASC",
        SortKey::CreatedDesc => "created_at DESC",
        SortKey::TitleAsc => "LOWER(title) ASC",
        SortKey::TitleDesc => "LOWER(title) DESC",
    }
}

#[async_trait]
impl NoteRepository for SqliteNoteRepository {
    async fn list(&self, principal: Principal) -> Result<Vec<Note>> {
        let sql = format!(
            "SELECT {NOTE_COLUMNS} FROM notes WHERE user_id = ? ORDER BY {DEFAULT_ORDER}"
        );
        let notes = sqlx::query_as::<_, Note>(&sql)
            .bind(principal.0)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(notes)
    }

    async fn insert(&self, principal: Principal, req: CreateNoteRequest) -> Result<Note> {
        require_text(&req.title, "title")?;
        require_text(&req.content, "content")?;

        let now = Utc::now();
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        // New notes append at the end of the manual order; 0 for an empty store.
        let next_index: i64 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(order_index) + 1, 0) FROM notes WHERE user_id = ?",
        )
        .bind(principal.0)
        .fetch_one(&mut *tx)
        .await
        .map_err(Error::Database)?;

        let sql = format!(
            "INSERT INTO notes (title, content, order_index, user_id, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING {NOTE_COLUMNS}"
        );
        let note = sqlx::query_as::<_, Note>(&sql)
            .bind(&req.title)
            .bind(&req.content)
            .bind(next_index)
            .bind(principal.0)
            .bind(now)
            .bind(now)
            .fetch_one(&mut *tx)
            .await
            .map_err(Error::Database)?;

        tx.commit().await.map_err(Error::Database)?;

        debug!(
            subsystem = "database",
            component = "notes",
            op = "insert",
            note_id = note.id,
            order_index = note.order_index,
            "Note created"
        );
        Ok(note)
    }

    async fn fetch(&self, principal: Principal, id: i64) -> Result<Note> {
        let sql = format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ? AND user_id = ?");
        sqlx::query_as::<_, Note>(&sql)
            .bind(id)
            .bind(principal.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?
            .ok_or(Error::NoteNotFound(id))
    }

    async fn update(&self, principal: Principal, id: i64, req: UpdateNoteRequest) -> Result<Note> {
        if let Some(ref title) = req.title {
            require_text(title, "title")?;
        }
        if let Some(ref content) = req.content {
            require_text(content, "content")?;
        }

        let mut tx = self.pool.begin().await.map_err(Error::Database)?;
        let existing = Self::fetch_tx(&mut tx, principal, id).await?;

        let title = req.title.unwrap_or(existing.title);
        let content = req.content.unwrap_or(existing.content);

        let sql = format!(
            "UPDATE notes SET title = ?, content = ?, updated_at = ? WHERE id = ? \
             RETURNING {NOTE_COLUMNS}"
        );
        let note = sqlx::query_as::<_, Note>(&sql)
            .bind(&title)
            .bind(&content)
            .bind(Utc::now())
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(Error::Database)?;

        tx.commit().await.map_err(Error::Database)?;
        Ok(note)
    }

    async fn delete(&self, principal: Principal, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        // Remove links explicitly so the cascade does not depend on the
        // foreign_keys pragma of the current connection.
        sqlx::query("DELETE FROM shared_links WHERE note_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;

        let result = sqlx::query("DELETE FROM notes WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(principal.0)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NoteNotFound(id));
        }

        tx.commit().await.map_err(Error::Database)?;

        debug!(
            subsystem = "database",
            component = "notes",
            op = "delete",
            note_id = id,
            "Note deleted with its share links"
        );
        Ok(())
    }

    async fn search(
        &self,
        principal: Principal,
        query: &str,
        content_only: bool,
    ) -> Result<Vec<Note>> {
        // An empty query matches nothing rather than everything.
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let pattern = format!("%{}%", escape_like(query));
        let sql = if content_only {
            format!(
                "SELECT {NOTE_COLUMNS} FROM notes \
                 WHERE user_id = ? AND content LIKE ? ESCAPE '\\' \
                 ORDER BY {DEFAULT_ORDER}"
            )
        } else {
            format!(
                "SELECT {NOTE_COLUMNS} FROM notes \
                 WHERE user_id = ? AND (title LIKE ? ESCAPE '\\' OR content LIKE ? ESCAPE '\\') \
                 ORDER BY {DEFAULT_ORDER}"
            )
        };

        let mut q = sqlx::query_as::<_, Note>(&sql).bind(principal.0).bind(&pattern);
        if !content_only {
            q = q.bind(&pattern);
        }
        let notes = q.fetch_all(&self.pool).await.map_err(Error::Database)?;

        debug!(
            subsystem = "database",
            component = "notes",
            op = "search",
            query = query,
            content_only = content_only,
            result_count = notes.len(),
            "Substring search complete"
        );
        Ok(notes)
    }

    async fn reorder(&self, principal: Principal, note_ids: &[i64]) -> Result<()> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let mut repositioned = 0u64;
        for (position, note_id) in note_ids.iter().enumerate() {
            // Unknown ids affect zero rows and are skipped by design.
            let result =
                sqlx::query("UPDATE notes SET order_index = ?, updated_at = ? WHERE id = ? AND user_id = ?")
                    .bind(position as i64)
                    .bind(now)
                    .bind(note_id)
                    .bind(principal.0)
                    .execute(&mut *tx)
                    .await
                    .map_err(Error::Database)?;
            repositioned += result.rows_affected();
        }

        tx.commit().await.map_err(Error::Database)?;

        debug!(
            subsystem = "database",
            component = "notes",
            op = "reorder",
            requested = note_ids.len(),
            repositioned = repositioned,
            "Notes reordered"
        );
        Ok(())
    }

    async fn advanced_search(
        &self,
        principal: Principal,
        req: AdvancedSearchRequest,
    ) -> Result<Vec<Note>> {
        let mut sql = format!("SELECT {NOTE_COLUMNS} FROM notes WHERE user_id = ? ");

        let pattern = req
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(|q| format!("%{}%", escape_like(q)));
        if pattern.is_some() {
            sql.push_str("AND (title LIKE ? ESCAPE '\\' OR content LIKE ? ESCAPE '\\') ");
        }

        let from_bound: Option<DateTime<Utc>> = req
            .date_from
            .map(|d| d.and_time(NaiveTime::MIN).and_utc());
        if from_bound.is_some() {
            sql.push_str("AND created_at >= ? ");
        }

        // date_to is inclusive as a date, so the bound is exclusive at the
        // next-day boundary.
        let to_bound: Option<DateTime<Utc>> = req
            .date_to
            .and_then(|d| d.succ_opt())
            .map(|d| d.and_time(NaiveTime::MIN).and_utc());
        if to_bound.is_some() {
            sql.push_str("AND created_at < ? ");
        }

        let sort = SortKey::parse(req.sort.as_deref());
        sql.push_str("ORDER BY ");
        sql.push_str(order_clause(sort));

        let mut q = sqlx::query_as::<_, Note>(&sql).bind(principal.0);
        if let Some(ref p) = pattern {
            q = q.bind(p).bind(p);
        }
        if let Some(from) = from_bound {
            q = q.bind(from);
        }
        if let Some(to) = to_bound {
            q = q.bind(to);
        }

        let notes = q.fetch_all(&self.pool).await.map_err(Error::Database)?;
        Ok(notes)
    }
}
