//! Test fixtures for database integration tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use memo_db::test_fixtures::memory_database;
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let db = memory_database().await;
//!     // Run your tests...
//! }
//! ```

use memo_core::{CreateNoteRequest, Note, NoteRepository, Principal};

use crate::pool::PoolConfig;
use crate::Database;

/// In-memory database URL used by tests.
pub const TEST_DATABASE_URL: &str = "sqlite::memory:";

/// Fresh, fully migrated in-memory database.
///
/// SQLite memory databases are scoped to a connection, so the pool is pinned
/// to a single connection (see [`PoolConfig::in_memory`]).
pub async fn memory_database() -> Database {
    let db = Database::connect_with_config(TEST_DATABASE_URL, PoolConfig::in_memory())
        .await
        .expect("connect to in-memory database");
    db.migrate().await.expect("run migrations");
    db
}

/// Insert a note for the default principal.
pub async fn seed_note(db: &Database, title: &str, content: &str) -> Note {
    db.notes
        .insert(
            Principal::default(),
            CreateNoteRequest {
                title: title.to_string(),
                content: content.to_string(),
            },
        )
        .await
        .expect("seed note")
}
