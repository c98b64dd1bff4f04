//! # notelog - timestamped notes in a local SQLite store
//!
//! notelog provides:
//! - A versioned, transactional schema migrator driven by `PRAGMA user_version`
//! - A notes repository with create / list-between / delete over a narrow
//!   storage capability ([`storage::Store`])
//! - An injectable clock so timestamps are deterministic under test
//! - Natural-language time expressions for the command-line layer

pub mod clock;
pub mod config;
pub mod note;
pub mod notes;
pub mod storage;
pub mod ui;
pub mod when;

// Re-exports for convenient access
pub use clock::{Clock, FixedClock, SystemClock};
pub use note::Note;
pub use notes::NotesRepository;
pub use storage::{MigrationError, Migrator, SqliteStore, Store};

/// Result type alias for notelog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for notelog operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] MigrationError),

    #[error("Timestamp outside the storable years 0000-9999: {0}")]
    TimestampOutOfRange(chrono::DateTime<chrono::Utc>),

    #[error("Invalid time expression: {0}")]
    InvalidTimeExpression(String),
}
