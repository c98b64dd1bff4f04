//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, params_from_iter};
use rusqlite::types::Value;
use crate::Result;
use super::{Executed, RowSet, Store};

/// SQLite-backed store holding the notes database
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a database file (creates if doesn't exist)
    ///
    /// The schema is not touched; run a [`super::Migrator`] before use.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Close the connection, reporting any error SQLite raises on close
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, err)| err.into())
    }

    /// Whether the connection is inside an open transaction
    pub fn in_transaction(&self) -> bool {
        !self.conn.is_autocommit()
    }
}

impl Store for SqliteStore {
    fn execute(&self, sql: &str, params: &[Value]) -> rusqlite::Result<Executed> {
        let rows_affected = self.conn.execute(sql, params_from_iter(params.iter()))?;
        Ok(Executed {
            rows_affected,
            last_insert_id: self.conn.last_insert_rowid(),
        })
    }

    fn query(&self, sql: &str, params: &[Value]) -> rusqlite::Result<RowSet> {
        let mut stmt = self.conn.prepare(sql)?;
        let width = stmt.column_count();

        let rows = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                (0..width)
                    .map(|idx| row.get::<_, Value>(idx))
                    .collect::<rusqlite::Result<Vec<Value>>>()
            })?
            .collect::<rusqlite::Result<RowSet>>()?;

        Ok(rows)
    }

    fn begin_transaction(&self) -> rusqlite::Result<()> {
        self.conn.execute("BEGIN TRANSACTION", [])?;
        Ok(())
    }

    fn commit(&self) -> rusqlite::Result<()> {
        self.conn.execute("COMMIT", [])?;
        Ok(())
    }

    fn rollback(&self) -> rusqlite::Result<()> {
        self.conn.execute("ROLLBACK", [])?;
        Ok(())
    }
}
