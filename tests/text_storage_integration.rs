//! Integration tests for the flat text data file.

use student_records::core::{RecordStore, StudentRecord};
use student_records::storage::TextStore;

fn sample_records() -> Vec<StudentRecord> {
    vec![
        StudentRecord::new(1, "Alice", 88.5),
        StudentRecord::new(2, "Bob", 92.0),
        StudentRecord::new(3, "Cara", 92.0),
    ]
}

#[test]
fn test_save_and_load_preserves_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.txt");
    let store = TextStore::new(&path);

    store.save(&sample_records()).expect("failed to save");

    let report = store.load().expect("failed to load");
    assert!(report.skipped.is_empty());
    assert_eq!(report.store.records(), sample_records().as_slice());
}

#[test]
fn test_round_trip_is_byte_equivalent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.txt");
    let original = "1 Alice,88.5\n2 Bob Lee,92.0\n3 Cara,92.25\n-4  Dan ,0.5\n";
    std::fs::write(&path, original).unwrap();

    let store = TextStore::new(&path);
    let report = store.load().unwrap();
    store.save(report.store.records()).unwrap();

    // "-4  Dan " keeps the name verbatim; only the whitespace after the roll
    // number is normalised to one space.
    let saved = std::fs::read_to_string(&path).unwrap();
    assert_eq!(saved, "1 Alice,88.5\n2 Bob Lee,92.0\n3 Cara,92.25\n-4 Dan ,0.5\n");

    let again = store.load().unwrap();
    assert_eq!(again.store, report.store);
}

#[test]
fn test_save_overwrites_not_appends() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.txt");
    let store = TextStore::new(&path);

    store.save(&sample_records()).unwrap();
    store.save(&sample_records()[..1]).unwrap();

    // A second TextStore simulates reopening.
    let reopened = TextStore::new(&path);
    assert_eq!(reopened.load().unwrap().store.len(), 1);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "1 Alice,88.5\n");
}

#[test]
fn test_malformed_lines_are_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.txt");
    std::fs::write(&path, "1 Alice,88.5\nAlice,88.5\n\n2 Bob,ninety\n3 Cara,92\n").unwrap();

    let report = TextStore::new(&path).load().unwrap();

    let rolls: Vec<i64> = report.store.records().iter().map(|r| r.roll_no).collect();
    assert_eq!(rolls, vec![1, 3]);
    let skipped: Vec<usize> = report.skipped.iter().map(|s| s.line_no).collect();
    assert_eq!(skipped, vec![2, 4]);
}

#[test]
fn test_empty_store_saves_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.txt");
    std::fs::write(&path, "1 Alice,88.5\n").unwrap();

    let store = TextStore::new(&path);
    let mut records = store.load().unwrap().store;
    assert_eq!(records.remove(1), 1);
    store.save(records.records()).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    assert_eq!(store.load().unwrap().store, RecordStore::new());
}

#[test]
fn test_save_into_missing_directory_fails_cleanly_when_blocked() {
    let dir = tempfile::tempdir().unwrap();
    // A regular file where the parent directory should be.
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "x").unwrap();

    let store = TextStore::new(blocker.join("students.txt"));
    let err = store.save(&sample_records()).unwrap_err();
    assert!(matches!(err, student_records::StoreError::Storage { .. }));
}
