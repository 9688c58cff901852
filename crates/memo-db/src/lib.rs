//! # memo-db
//!
//! SQLite database layer for memo.
//!
//! This crate provides:
//! - Connection pool management
//! - Repository implementations for notes and share links
//! - Managed schema migrations
//!
//! ## Example
//!
//! ```rust,ignore
//! use memo_core::{CreateNoteRequest, NoteRepository, Principal};
//! use memo_db::Database;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("sqlite://memo.db").await?;
//!     db.migrate().await?;
//!
//!     let note = db
//!         .notes
//!         .insert(
//!             Principal::default(),
//!             CreateNoteRequest {
//!                 title: "Hello".to_string(),
//!                 content: "First note".to_string(),
//!             },
//!         )
//!         .await?;
//!
//!     println!("Created note: {}", note.id);
//!     Ok(())
//! }
//! ```

pub mod notes;
pub mod pool;
pub mod shares;

// Test fixtures for integration tests.
// Always compiled so integration tests (in tests/) can use them.
pub mod test_fixtures;

// Re-export core types
pub use memo_core::*;

pub use notes::SqliteNoteRepository;
pub use pool::{create_pool, create_pool_with_config, PoolConfig};
pub use shares::SqliteShareRepository;

/// Escape LIKE wildcard characters (`%`, `_`, `\`) in user input.
pub fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Combined database context with all repositories.
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Sqlite>,
    /// Note repository for CRUD, search, and ordering.
    pub notes: SqliteNoteRepository,
    /// Share link repository.
    pub shares: SqliteShareRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Sqlite>) -> Self {
        Self {
            notes: SqliteNoteRepository::new(pool.clone()),
            shares: SqliteShareRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Sqlite> {
        &self.pool
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}
