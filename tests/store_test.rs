mod common;

use common::{make_record, num, today};
use habitlog::core::store::{MemoryStore, RecordStore};
use habitlog::models::HabitType;

/// Exercise the shared contract against any store.
fn check_put_and_read<S: RecordStore>(store: &mut S) {
    let r = make_record(&[("duration", num(30.0))], today());
    store.put_record(today(), &HabitType::Exercise, r.clone()).unwrap();

    assert_eq!(store.record(today(), &HabitType::Exercise).unwrap(), Some(r));
    assert_eq!(store.record(today(), &HabitType::Sleep).unwrap(), None);
    assert_eq!(store.record(today().offset(-1), &HabitType::Exercise).unwrap(), None);
}

fn check_replace<S: RecordStore>(store: &mut S) {
    let first = make_record(&[("duration", num(30.0)), ("calories", num(200.0))], today());
    let second = make_record(&[("duration", num(45.0))], today());
    store.put_record(today(), &HabitType::Exercise, first).unwrap();
    store.put_record(today(), &HabitType::Exercise, second.clone()).unwrap();

    let stored = store.record(today(), &HabitType::Exercise).unwrap().unwrap();
    assert_eq!(stored, second);
    assert!(stored.get("calories").is_none());
}

fn check_remove_keeps_siblings<S: RecordStore>(store: &mut S) {
    let d = today();
    store.put_record(d, &HabitType::Exercise, make_record(&[("duration", num(30.0))], d)).unwrap();
    store.put_record(d, &HabitType::Sleep, make_record(&[("duration", num(7.0))], d)).unwrap();

    assert!(store.remove_record(d, &HabitType::Exercise).unwrap());
    assert!(!store.remove_record(d, &HabitType::Exercise).unwrap());

    let day = store.records_on(d).unwrap();
    assert_eq!(day.len(), 1);
    assert!(day.contains_key(&HabitType::Sleep));
}

fn check_range<S: RecordStore>(store: &mut S) {
    for back in [0, 2, 5, 9] {
        let d = today().offset(-back);
        store
            .put_record(d, &HabitType::Sleep, make_record(&[("duration", num(back as f64 + 1.0))], d))
            .unwrap();
    }
    store
        .put_record(today(), &HabitType::Exercise, make_record(&[("duration", num(20.0))], today()))
        .unwrap();

    let found = store
        .records_in_range(&HabitType::Sleep, today().offset(-5), today())
        .unwrap();
    let dates: Vec<_> = found.iter().map(|d| d.date).collect();
    assert_eq!(dates, vec![today().offset(-5), today().offset(-2), today()]);

    let reversed = store
        .records_in_range(&HabitType::Sleep, today(), today().offset(-5))
        .unwrap();
    assert!(reversed.is_empty());
}

fn check_clear<S: RecordStore>(store: &mut S) {
    store
        .put_record(today(), &HabitType::Nutrition, make_record(&[("water", num(3.0))], today()))
        .unwrap();
    store.clear().unwrap();
    assert!(store.records_on(today()).unwrap().is_empty());
}

// ── memory store ─────────────────────────────────────────────────────────────

#[test]
fn test_memory_put_and_read() {
    check_put_and_read(&mut MemoryStore::new());
}

#[test]
fn test_memory_replace() {
    check_replace(&mut MemoryStore::new());
}

#[test]
fn test_memory_remove_keeps_siblings() {
    check_remove_keeps_siblings(&mut MemoryStore::new());
}

#[test]
fn test_memory_range() {
    check_range(&mut MemoryStore::new());
}

#[test]
fn test_memory_clear() {
    check_clear(&mut MemoryStore::new());
}

#[test]
fn test_memory_snapshot_is_isolated_from_writes() {
    let mut store = MemoryStore::new();
    store
        .put_record(today(), &HabitType::Exercise, make_record(&[("duration", num(30.0))], today()))
        .unwrap();
    let before = store.snapshot();

    store.remove_record(today(), &HabitType::Exercise).unwrap();

    assert_eq!(before.len(), 1);
    assert!(store.is_empty());
    assert!(store.snapshot().is_empty());
}

#[test]
fn test_memory_empty_day_removed() {
    let mut store = MemoryStore::new();
    store
        .put_record(today(), &HabitType::Sleep, make_record(&[("duration", num(8.0))], today()))
        .unwrap();
    store.remove_record(today(), &HabitType::Sleep).unwrap();
    assert!(!store.snapshot().contains_key(&today()));
}

// ── sqlite store ─────────────────────────────────────────────────────────────

#[test]
fn test_db_put_and_read() {
    let (_dir, mut db) = common::setup_db();
    check_put_and_read(&mut db);
}

#[test]
fn test_db_replace() {
    let (_dir, mut db) = common::setup_db();
    check_replace(&mut db);
    assert_eq!(db.count_records().unwrap(), 1);
}

#[test]
fn test_db_remove_keeps_siblings() {
    let (_dir, mut db) = common::setup_db();
    check_remove_keeps_siblings(&mut db);
}

#[test]
fn test_db_range() {
    let (_dir, mut db) = common::setup_db();
    check_range(&mut db);
}

#[test]
fn test_db_clear() {
    let (_dir, mut db) = common::setup_db();
    check_clear(&mut db);
    assert_eq!(db.count_records().unwrap(), 0);
}

#[test]
fn test_db_keeps_notes_and_text_fields() {
    let (_dir, mut db) = common::setup_db();
    let r = make_record(
        &[
            ("bedtime", common::text("23:15")),
            ("duration", num(7.5)),
            ("notes", common::text("restless")),
        ],
        today(),
    );
    db.put_record(today(), &HabitType::Sleep, r.clone()).unwrap();

    let stored = db.record(today(), &HabitType::Sleep).unwrap().unwrap();
    assert_eq!(stored, r);
    assert_eq!(stored.notes.as_deref(), Some("restless"));
    assert_eq!(stored.get("bedtime").and_then(|v| v.as_text()), Some("23:15"));
}

#[test]
fn test_db_survives_reopen() {
    let (dir, mut db) = common::setup_db();
    db.put_record(today(), &HabitType::from("reading"), make_record(&[("pages", num(12.0))], today()))
        .unwrap();
    drop(db);

    let db = habitlog::db::Database::open(&dir.path().join("test.db")).unwrap();
    let day = db.records_on(today()).unwrap();
    assert_eq!(day[&HabitType::from("reading")].number("pages"), Some(12.0));
}

#[cfg(unix)]
#[test]
fn test_db_file_permissions() {
    use std::os::unix::fs::PermissionsExt;
    let (dir, _db) = common::setup_db();
    let mode = std::fs::metadata(dir.path().join("test.db"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}
