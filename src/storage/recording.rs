//! In-memory [`Store`] double that records every statement.
//!
//! Understands just enough SQL to track the schema version counter through
//! transactions; everything else returns scripted rows.

use std::cell::{Cell, RefCell};
use rusqlite::ffi;
use rusqlite::types::Value;
use super::{schema, Executed, RowSet, Store};

const SET_VERSION_PREFIX: &str = "PRAGMA user_version = ";

#[derive(Default)]
pub(crate) struct RecordingStore {
    calls: RefCell<Vec<(String, Vec<Value>)>>,
    version: Cell<u32>,
    pending_version: Cell<Option<u32>>,
    fail_on: RefCell<Option<String>>,
    rows: RefCell<RowSet>,
    last_insert_id: Cell<i64>,
}

impl RecordingStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Committed schema version
    pub(crate) fn version(&self) -> u32 {
        self.version.get()
    }

    pub(crate) fn set_version(&self, version: u32) {
        self.version.set(version);
    }

    /// Fail the next and every later statement equal to `sql`
    pub(crate) fn fail_on(&self, sql: &str) {
        *self.fail_on.borrow_mut() = Some(sql.to_string());
    }

    /// Rows returned by every query other than the version read
    pub(crate) fn return_rows(&self, rows: RowSet) {
        *self.rows.borrow_mut() = rows;
    }

    pub(crate) fn statements(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(sql, _)| sql.clone()).collect()
    }

    pub(crate) fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.calls.borrow().clone()
    }

    fn record(&self, sql: &str, params: &[Value]) -> rusqlite::Result<()> {
        self.calls.borrow_mut().push((sql.to_string(), params.to_vec()));

        if self.fail_on.borrow().as_deref() == Some(sql) {
            return Err(rusqlite::Error::SqliteFailure(
                ffi::Error::new(ffi::SQLITE_ERROR),
                Some(format!("forced failure: {sql}")),
            ));
        }
        Ok(())
    }
}

impl Store for RecordingStore {
    fn execute(&self, sql: &str, params: &[Value]) -> rusqlite::Result<Executed> {
        self.record(sql, params)?;

        if let Some(raw) = sql.strip_prefix(SET_VERSION_PREFIX) {
            let version = raw.trim().parse().unwrap_or_default();
            self.pending_version.set(Some(version));
            return Ok(Executed { rows_affected: 0, last_insert_id: self.last_insert_id.get() });
        }

        let rows_affected = if sql.trim_start().starts_with("INSERT") {
            self.last_insert_id.set(self.last_insert_id.get() + 1);
            1
        } else {
            0
        };

        Ok(Executed {
            rows_affected,
            last_insert_id: self.last_insert_id.get(),
        })
    }

    fn query(&self, sql: &str, params: &[Value]) -> rusqlite::Result<RowSet> {
        self.record(sql, params)?;

        if sql == schema::GET_SCHEMA_VERSION {
            return Ok(vec![vec![Value::Integer(i64::from(self.version.get()))]]);
        }
        Ok(self.rows.borrow().clone())
    }

    fn begin_transaction(&self) -> rusqlite::Result<()> {
        self.record("BEGIN", &[])
    }

    fn commit(&self) -> rusqlite::Result<()> {
        self.record("COMMIT", &[])?;
        if let Some(version) = self.pending_version.take() {
            self.version.set(version);
        }
        Ok(())
    }

    fn rollback(&self) -> rusqlite::Result<()> {
        self.pending_version.set(None);
        self.record("ROLLBACK", &[])
    }
}
