use chrono::{DateTime, TimeZone, Utc};
use notelog::storage::MIGRATIONS;
use notelog::{FixedClock, Migrator, NotesRepository, SqliteStore};

fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

#[test]
fn test_create_list_delete_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.sqlite");
    let t0 = at(1_649_707_678);

    let store = SqliteStore::open(&path).unwrap();
    let report = Migrator::new(&store).apply().unwrap();
    assert_eq!(report.from, 0);
    assert_eq!(report.to, MIGRATIONS.len() as u32);

    let notes = NotesRepository::new(&store, FixedClock::new(t0));
    let created = notes.create("buy milk").unwrap();
    assert_eq!(created.content, "buy milk");
    assert_eq!(created.created_at, t0);

    assert_eq!(notes.list_between(t0, t0).unwrap(), vec![created.clone()]);

    notes.delete(created.id).unwrap();
    assert!(notes.list_between(t0, t0).unwrap().is_empty());

    drop(notes);
    store.close().unwrap();
}

#[test]
fn test_notes_and_schema_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.sqlite");
    let (t1, t2) = (at(1_649_707_678), at(1_649_717_678));

    let first_id = {
        let store = SqliteStore::open(&path).unwrap();
        Migrator::new(&store).apply().unwrap();
        let clock = FixedClock::new(t1);
        let notes = NotesRepository::new(&store, &clock);
        let id = notes.create("first session").unwrap().id;
        drop(notes);
        store.close().unwrap();
        id
    };

    let store = SqliteStore::open(&path).unwrap();
    let migrator = Migrator::new(&store);
    let report = migrator.apply().unwrap();
    assert!(report.is_noop());
    assert_eq!(migrator.current_version().unwrap(), MIGRATIONS.len() as u32);

    let clock = FixedClock::new(t2);
    let notes = NotesRepository::new(&store, &clock);
    let second = notes.create("second session").unwrap();
    assert!(second.id > first_id);

    let listed = notes.list_between(t1, t2).unwrap();
    let contents: Vec<&str> = listed.iter().map(|n| n.content.as_str()).collect();
    assert_eq!(contents, vec!["first session", "second session"]);
}

#[test]
fn test_delete_missing_note_on_fresh_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::open(&dir.path().join("notes.sqlite")).unwrap();
    Migrator::new(&store).apply().unwrap();

    let notes = NotesRepository::new(&store, FixedClock::new(at(0)));
    notes.delete(99999).unwrap();
}
