//! Database schema definitions

/// SQL to create the notes table
///
/// `AUTOINCREMENT` keeps ids strictly increasing even after the newest note
/// is deleted.
pub const CREATE_NOTES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS notes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    created_at TEXT NOT NULL,
    content TEXT NOT NULL
)
"#;

/// SQL to index notes by creation time
pub const CREATE_CREATED_AT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_notes_created_at ON notes(created_at)";

/// Read the schema version counter
pub const GET_SCHEMA_VERSION: &str = "PRAGMA user_version";

/// Statement that sets the schema version counter.
///
/// Pragmas take no bound parameters, so the value is formatted in.
pub fn set_schema_version(version: u32) -> String {
    format!("PRAGMA user_version = {version}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_schema_version_statement() {
        assert_eq!(set_schema_version(3), "PRAGMA user_version = 3");
    }
}
