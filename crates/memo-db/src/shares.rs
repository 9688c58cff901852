//! Share link repository implementation.
//!
//! Tokens are 24 random bytes in URL-safe base64. Passwords are stored as
//! Argon2id PHC strings, never as plaintext.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{Duration, Utc};
use rand::RngCore;
use sqlx::SqlitePool;
use tracing::debug;

use memo_core::{
    CreateShareRequest, Error, Note, Principal, Result, SharedLink, SharedNoteView,
    ShareRepository,
};

const LINK_COLUMNS: &str =
    "id, note_id, share_token, password_hash, expires_at, is_active, view_count, created_at";

/// Allowed expiry window in days.
const MIN_EXPIRES_DAYS: i64 = 1;
const MAX_EXPIRES_DAYS: i64 = 365;

const TOKEN_BYTES: usize = 24;

/// SQLite implementation of ShareRepository.
pub struct SqliteShareRepository {
    pool: SqlitePool,
}

impl SqliteShareRepository {
    /// Create a new SqliteShareRepository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::Internal(format!("password hashing failed: {}", e)))
}

fn verify_password(hash: &str, candidate: &str) -> Result<bool> {
    let parsed =
        PasswordHash::new(hash).map_err(|e| Error::Internal(format!("stored hash invalid: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .is_ok())
}

#[async_trait]
impl ShareRepository for SqliteShareRepository {
    async fn create(
        &self,
        principal: Principal,
        note_id: i64,
        req: CreateShareRequest,
    ) -> Result<SharedLink> {
        if let Some(days) = req.expires_days {
            if !(MIN_EXPIRES_DAYS..=MAX_EXPIRES_DAYS).contains(&days) {
                return Err(Error::InvalidInput(format!(
                    "expires_days must be between {} and {}",
                    MIN_EXPIRES_DAYS, MAX_EXPIRES_DAYS
                )));
            }
        }

        let password_hash = req
            .password
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(hash_password)
            .transpose()?;

        let now = Utc::now();
        let expires_at = req.expires_days.map(|days| now + Duration::days(days));

        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let note_exists: Option<i64> =
            sqlx::query_scalar("SELECT id FROM notes WHERE id = ? AND user_id = ?")
                .bind(note_id)
                .bind(principal.0)
                .fetch_optional(&mut *tx)
                .await
                .map_err(Error::Database)?;
        note_exists.ok_or(Error::NoteNotFound(note_id))?;

        let insert_sql = format!(
            "INSERT INTO shared_links \
             (note_id, share_token, password_hash, expires_at, is_active, view_count, created_at) \
             VALUES (?, ?, ?, ?, 1, 0, ?) RETURNING {LINK_COLUMNS}"
        );

        // Tokens are unique; on the off chance of a collision, draw again.
        let link = loop {
            let token = generate_token();
            let attempt = sqlx::query_as::<_, SharedLink>(&insert_sql)
                .bind(note_id)
                .bind(&token)
                .bind(&password_hash)
                .bind(expires_at)
                .bind(now)
                .fetch_one(&mut *tx)
                .await;
            match attempt {
                Ok(link) => break link,
                Err(sqlx::Error::Database(db)) if db.is_unique_violation() => continue,
                Err(e) => return Err(Error::Database(e)),
            }
        };

        tx.commit().await.map_err(Error::Database)?;

        debug!(
            subsystem = "database",
            component = "shares",
            op = "create",
            note_id = note_id,
            has_password = link.has_password(),
            expires = link.expires_at.is_some(),
            "Share link created"
        );
        Ok(link)
    }

    async fn resolve(&self, token: &str, password: Option<&str>) -> Result<SharedNoteView> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let link_sql = format!("SELECT {LINK_COLUMNS} FROM shared_links WHERE share_token = ?");
        let link = sqlx::query_as::<_, SharedLink>(&link_sql)
            .bind(token)
            .fetch_optional(&mut *tx)
            .await
            .map_err(Error::Database)?
            .ok_or_else(|| Error::ShareNotFound(token.to_string()))?;

        // Revocation wins over expiry so a revoked link never reads as
        // merely expired.
        if !link.is_active {
            return Err(Error::Forbidden(
                "this shared link is no longer active".to_string(),
            ));
        }
        if link.is_expired_at(now) {
            return Err(Error::Gone("this shared link has expired".to_string()));
        }

        if let Some(ref hash) = link.password_hash {
            match password {
                None => {
                    return Err(Error::PasswordRequired(
                        "this shared link requires a password".to_string(),
                    ))
                }
                Some(candidate) => {
                    if !verify_password(hash, candidate)? {
                        return Err(Error::PasswordRequired("incorrect password".to_string()));
                    }
                }
            }
        }

        let note = sqlx::query_as::<_, Note>(
            "SELECT id, title, content, order_index, user_id, created_at, updated_at \
             FROM notes WHERE id = ?",
        )
        .bind(link.note_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(Error::Database)?;

        // Single UPDATE keeps concurrent resolutions from losing increments.
        let view_count: i64 = sqlx::query_scalar(
            "UPDATE shared_links SET view_count = view_count + 1 WHERE id = ? RETURNING view_count",
        )
        .bind(link.id)
        .fetch_one(&mut *tx)
        .await
        .map_err(Error::Database)?;

        tx.commit().await.map_err(Error::Database)?;

        Ok(SharedNoteView {
            title: note.title,
            content: note.content,
            created_at: note.created_at,
            updated_at: note.updated_at,
            shared_at: link.created_at,
            view_count,
        })
    }

    async fn revoke(&self, token: &str) -> Result<()> {
        let result = sqlx::query("UPDATE shared_links SET is_active = 0 WHERE share_token = ?")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::ShareNotFound(token.to_string()));
        }

        debug!(
            subsystem = "database",
            component = "shares",
            op = "revoke",
            "Share link revoked"
        );
        Ok(())
    }

    async fn list_for_note(&self, principal: Principal, note_id: i64) -> Result<Vec<SharedLink>> {
        let note_exists: Option<i64> =
            sqlx::query_scalar("SELECT id FROM notes WHERE id = ? AND user_id = ?")
                .bind(note_id)
                .bind(principal.0)
                .fetch_optional(&self.pool)
                .await
                .map_err(Error::Database)?;
        note_exists.ok_or(Error::NoteNotFound(note_id))?;

        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM shared_links WHERE note_id = ? \
             ORDER BY created_at DESC, id DESC"
        );
        let links = sqlx::query_as::<_, SharedLink>(&sql)
            .bind(note_id)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(links)
    }
}
