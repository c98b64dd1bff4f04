//! Database Migrations
//!
//! Each migration is a single idempotent statement. The store's schema
//! version counts how many entries of [`MIGRATIONS`] have been applied; the
//! counter and the statement are committed together, one transaction per
//! migration.

use rusqlite::types::{Type, Value};
use super::{schema, Store};

/// Migration definitions, in application order (version = index + 1)
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        name: "create notes table",
        statement: schema::CREATE_NOTES_TABLE,
    },
    Migration {
        name: "add notes created_at index",
        statement: schema::CREATE_CREATED_AT_INDEX,
    },
];

/// A database migration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Migration {
    /// Label for diagnostics, never persisted
    pub name: &'static str,
    /// Idempotent DDL to apply
    pub statement: &'static str,
}

/// Errors raised while bringing a store up to date
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("could not read schema version: {0}")]
    ReadVersion(#[source] rusqlite::Error),

    #[error("migration {version} ({name}) failed and was rolled back: {source}")]
    Failed {
        version: u32,
        name: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("schema version {found} is newer than this build, which knows {known} migrations")]
    VersionAhead { found: u32, known: u32 },
}

/// What a migration run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    /// Schema version before the run
    pub from: u32,
    /// Schema version after the run
    pub to: u32,
    /// Names of the migrations applied, in order
    pub applied: Vec<&'static str>,
}

impl MigrationReport {
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty()
    }
}

/// Brings a store's schema to the latest known version
pub struct Migrator<'a, S: Store + ?Sized> {
    store: &'a S,
    migrations: &'a [Migration],
}

impl<'a, S: Store + ?Sized> Migrator<'a, S> {
    /// Migrator over the built-in [`MIGRATIONS`]
    pub fn new(store: &'a S) -> Self {
        Self::with_migrations(store, MIGRATIONS)
    }

    pub fn with_migrations(store: &'a S, migrations: &'a [Migration]) -> Self {
        Self { store, migrations }
    }

    /// Version the store would be at after a successful [`Migrator::apply`]
    pub fn latest_version(&self) -> u32 {
        self.migrations.len() as u32
    }

    /// Read the persisted version counter; a fresh store reads 0
    pub fn current_version(&self) -> rusqlite::Result<u32> {
        let rows = self.store.query(schema::GET_SCHEMA_VERSION, &[])?;

        match rows.first().and_then(|row| row.first()) {
            Some(Value::Integer(version)) => u32::try_from(*version)
                .map_err(|_| rusqlite::Error::IntegralValueOutOfRange(0, *version)),
            Some(other) => Err(rusqlite::Error::InvalidColumnType(
                0,
                "user_version".to_string(),
                other.data_type(),
            )),
            None => Err(rusqlite::Error::InvalidColumnType(
                0,
                "user_version".to_string(),
                Type::Null,
            )),
        }
    }

    /// Apply every migration above the current version, in order.
    ///
    /// Stops at the first failure; that migration is rolled back and the
    /// ones after it are never attempted.
    pub fn apply(&self) -> Result<MigrationReport, MigrationError> {
        let from = self.current_version().map_err(MigrationError::ReadVersion)?;
        let known = self.latest_version();

        if from > known {
            return Err(MigrationError::VersionAhead { found: from, known });
        }

        let mut applied = Vec::new();
        for (idx, migration) in self.migrations.iter().enumerate().skip(from as usize) {
            let version = idx as u32 + 1;
            self.apply_one(version, migration)
                .map_err(|source| MigrationError::Failed {
                    version,
                    name: migration.name,
                    source,
                })?;
            applied.push(migration.name);
        }

        Ok(MigrationReport {
            from,
            to: known,
            applied,
        })
    }

    fn apply_one(&self, version: u32, migration: &Migration) -> rusqlite::Result<()> {
        self.store.begin_transaction()?;

        let outcome = self
            .store
            .execute(migration.statement, &[])
            .and_then(|_| self.store.execute(&schema::set_schema_version(version), &[]))
            .and_then(|_| self.store.commit());

        if let Err(err) = outcome {
            // SQLite may already have ended the transaction; the original error wins.
            let _ = self.store.rollback();
            return Err(err);
        }

        Ok(())
    }
}
