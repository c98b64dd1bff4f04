//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with one table:
//! - notes(id, created_at, content)
//!
//! The schema version is kept in `PRAGMA user_version` and only ever moved
//! forward by the [`Migrator`].

pub mod migrations;
pub mod schema;
pub mod sqlite;

#[cfg(test)]
pub(crate) mod recording;

pub use migrations::{Migration, MigrationError, MigrationReport, Migrator, MIGRATIONS};
pub use sqlite::SqliteStore;

use rusqlite::types::Value;

/// Rows returned by [`Store::query`], fully materialized
pub type RowSet = Vec<Vec<Value>>;

/// Outcome of [`Store::execute`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Executed {
    pub rows_affected: usize,
    pub last_insert_id: i64,
}

/// The storage capability the migrator and the notes repository run against.
///
/// Transactions are connection-scoped: statements issued between
/// `begin_transaction` and `commit`/`rollback` belong to that transaction.
pub trait Store {
    /// Run a statement that returns no rows
    fn execute(&self, sql: &str, params: &[Value]) -> rusqlite::Result<Executed>;

    /// Run a statement and collect every row it returns
    fn query(&self, sql: &str, params: &[Value]) -> rusqlite::Result<RowSet>;

    fn begin_transaction(&self) -> rusqlite::Result<()>;

    fn commit(&self) -> rusqlite::Result<()>;

    fn rollback(&self) -> rusqlite::Result<()>;
}
