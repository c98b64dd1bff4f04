//! Notes repository - create, list and delete notes over a [`Store`]
//!
//! Assumes the schema is already current (see [`crate::storage::Migrator`]).
//! Storage failures are returned as [`Error::Storage`] without retries.

use chrono::{DateTime, Utc};
use rusqlite::types::{Type, Value};
use crate::clock::Clock;
use crate::note::{self, Note};
use crate::storage::Store;
use crate::{Error, Result};

const INSERT_NOTE: &str = "INSERT INTO notes (created_at, content) VALUES (?1, ?2)";

const LIST_NOTES_BETWEEN: &str = r#"
SELECT id, created_at, content FROM notes
WHERE created_at >= ?1 AND created_at <= ?2
ORDER BY created_at ASC, id ASC
"#;

const DELETE_NOTE: &str = "DELETE FROM notes WHERE id = ?1";

/// Data access for the `notes` table
pub struct NotesRepository<'a, S: Store + ?Sized, C: Clock> {
    store: &'a S,
    clock: C,
}

impl<'a, S: Store + ?Sized, C: Clock> NotesRepository<'a, S, C> {
    pub fn new(store: &'a S, clock: C) -> Self {
        Self { store, clock }
    }

    /// Insert a note stamped with the clock's current time.
    ///
    /// The clock is read exactly once. A reading outside the storable years
    /// is rejected before anything is written.
    pub fn create(&self, content: &str) -> Result<Note> {
        let created_at = note::to_stored_precision(self.clock.now());
        if !note::is_storable(&created_at) {
            return Err(Error::TimestampOutOfRange(created_at));
        }

        let executed = self.store.execute(
            INSERT_NOTE,
            &[
                Value::Text(note::encode_timestamp(&created_at)),
                Value::Text(content.to_string()),
            ],
        )?;

        Ok(Note {
            id: executed.last_insert_id,
            content: content.to_string(),
            created_at,
        })
    }

    /// Notes with `start <= created_at <= end`, oldest first.
    ///
    /// An inverted or empty window yields an empty list. Bounds beyond the
    /// storable years are clamped to it.
    pub fn list_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Note>> {
        let start = note::encode_range_start(start);
        let end = note::encode_range_end(end);
        let (Some(start), Some(end)) = (start, end) else {
            return Ok(Vec::new());
        };

        let rows = self.store.query(LIST_NOTES_BETWEEN, &[Value::Text(start), Value::Text(end)])?;

        rows.into_iter().map(note_from_row).collect()
    }

    /// Delete a note by id. A missing id is not an error.
    pub fn delete(&self, id: i64) -> Result<()> {
        self.store.execute(DELETE_NOTE, &[Value::Integer(id)])?;
        Ok(())
    }
}

/// Helper to convert a `(id, created_at, content)` row to a Note
fn note_from_row(row: Vec<Value>) -> Result<Note> {
    let mut columns = row.into_iter();

    let id = match columns.next() {
        Some(Value::Integer(id)) => id,
        other => return Err(invalid_column(0, "id", other)),
    };

    let created_at = match columns.next() {
        Some(Value::Text(raw)) => note::decode_timestamp(&raw).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e))
        })?,
        other => return Err(invalid_column(1, "created_at", other)),
    };

    let content = match columns.next() {
        Some(Value::Text(content)) => content,
        other => return Err(invalid_column(2, "content", other)),
    };

    Ok(Note { id, content, created_at })
}

fn invalid_column(idx: usize, name: &str, value: Option<Value>) -> Error {
    let data_type = value.as_ref().map_or(Type::Null, Value::data_type);
    Error::Storage(rusqlite::Error::InvalidColumnType(idx, name.to_string(), data_type))
}
