use crate::{OutputMode, emit_success};
use anyhow::bail;
use chrono::{DateTime, TimeZone, Utc};
use notelog::ui::{self, banner};
use notelog::{when, Clock, Note, NotesRepository, Store};
use owo_colors::OwoColorize;

pub fn require_content(content: Option<String>) -> anyhow::Result<String> {
    match content {
        Some(content) if !content.trim().is_empty() => Ok(content),
        _ => bail!("note content required"),
    }
}

pub fn require_id(id: i64) -> anyhow::Result<i64> {
    if id == 0 {
        bail!("note ID required");
    }
    Ok(id)
}

/// Resolve both bounds of a listing window against the same `now`
pub fn parse_window<Tz: TimeZone>(
    start: Option<String>,
    end: Option<String>,
    now: DateTime<Tz>,
) -> anyhow::Result<(DateTime<Utc>, DateTime<Utc>)> {
    let Some(start) = start.filter(|s| !s.trim().is_empty()) else {
        bail!("beginning time required");
    };
    let Some(end) = end.filter(|s| !s.trim().is_empty()) else {
        bail!("end time required");
    };

    let start = when::parse_relative_to(&start, now.clone())?;
    let end = when::parse_relative_to(&end, now)?;
    Ok((start, end))
}

pub fn run_add<S: Store + ?Sized, C: Clock>(
    notes: &NotesRepository<'_, S, C>,
    content: &str,
    output_mode: OutputMode,
) -> anyhow::Result<Note> {
    let note = notes.create(content)?;

    if output_mode.is_human() {
        ui::header("Note added:");
        ui::note_line(&note);
    } else {
        emit_success("add-note", serde_json::to_value(&note)?)?;
    }
    Ok(note)
}

pub fn run_list<S: Store + ?Sized, C: Clock>(
    notes: &NotesRepository<'_, S, C>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    as_table: bool,
    output_mode: OutputMode,
) -> anyhow::Result<Vec<Note>> {
    let found = notes.list_between(start, end)?;
    tracing::debug!("{} notes between {} and {}", found.len(), start, end);

    if !output_mode.is_human() {
        let data = serde_json::json!({
            "start": start,
            "end": end,
            "notes": &found,
        });
        emit_success("list-notes", data)?;
    } else if found.is_empty() {
        ui::empty("No notes in that window.");
    } else if as_table {
        println!("{}", ui::notes_table(&found));
    } else {
        for note in &found {
            ui::note_line(note);
        }
    }
    Ok(found)
}

pub fn run_delete<S: Store + ?Sized, C: Clock>(
    notes: &NotesRepository<'_, S, C>,
    id: i64,
    output_mode: OutputMode,
) -> anyhow::Result<()> {
    notes.delete(id)?;

    if output_mode.is_human() {
        ui::success(&format!("Note {} deleted.", id));
    } else {
        emit_success("delete-note", serde_json::json!({ "id": id }))?;
    }
    Ok(())
}

pub fn run_version(output_mode: OutputMode) -> anyhow::Result<()> {
    if output_mode.is_human() {
        let subtitle = format!(
            "Version {} (schema {})",
            env!("CARGO_PKG_VERSION"),
            notelog::storage::MIGRATIONS.len()
        );
        banner(&format!("{}", "notelog".bold()), &subtitle);
    } else {
        let data = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "schema_version": notelog::storage::MIGRATIONS.len(),
        });
        emit_success("version", data)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use notelog::{FixedClock, Migrator, SqliteStore};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_require_content() {
        assert_eq!(require_content(Some("hello".to_string())).unwrap(), "hello");

        let err = require_content(None).unwrap_err();
        assert_eq!(err.to_string(), "note content required");
        assert!(require_content(Some("   ".to_string())).is_err());
    }

    #[test]
    fn test_require_id() {
        assert_eq!(require_id(12).unwrap(), 12);
        assert_eq!(require_id(0).unwrap_err().to_string(), "note ID required");
    }

    #[test]
    fn test_parse_window() {
        let now = at(1_649_707_678);

        let (start, end) =
            parse_window(Some("1 hour ago".into()), Some("now".into()), now).unwrap();
        assert_eq!(start, at(1_649_707_678 - 3_600));
        assert_eq!(end, now);

        let err = parse_window(None, Some("now".into()), now).unwrap_err();
        assert_eq!(err.to_string(), "beginning time required");
        let err = parse_window(Some("now".into()), Some("".into()), now).unwrap_err();
        assert_eq!(err.to_string(), "end time required");
        assert!(parse_window(Some("whenever".into()), Some("now".into()), now).is_err());
    }

    #[test]
    fn test_add_list_delete() {
        let store = SqliteStore::open_in_memory().unwrap();
        Migrator::new(&store).apply().unwrap();
        let t0 = at(1_649_707_678);
        let notes = NotesRepository::new(&store, FixedClock::new(t0));

        let added = run_add(&notes, "this is a new note", OutputMode::Json).unwrap();
        assert_eq!(added.id, 1);

        let listed = run_list(&notes, t0, t0, false, OutputMode::Json).unwrap();
        assert_eq!(listed, vec![added.clone()]);

        run_delete(&notes, added.id, OutputMode::Json).unwrap();
        assert!(run_list(&notes, t0, t0, true, OutputMode::Json).unwrap().is_empty());
    }
}
