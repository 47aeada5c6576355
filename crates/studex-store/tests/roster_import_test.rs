// Integration tests for roster parsing and import

use std::path::PathBuf;

use rusqlite::Connection;
use studex_core::errors::ExErrorKind;
use studex_store::roster::{import_roster, import_roster_str, parse_roster_file};
use studex_store::{migrations, SqliteRepo};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    migrations::apply_migrations(&mut conn).unwrap();
    conn
}

#[test]
fn test_parse_valid_roster() {
    let roster = parse_roster_file(&fixture("roster_valid.yaml")).unwrap();
    assert_eq!(roster.schema_version, 0);
    assert_eq!(roster.students.len(), 3);
    assert_eq!(roster.students[2].gender, "X");
}

#[test]
fn test_import_inserts_all_records_in_order() {
    // Given: A migrated database and a valid roster
    let mut conn = setup();

    // When: The roster is imported
    let digest = import_roster(&fixture("roster_valid.yaml"), &mut conn).unwrap();

    // Then: Every record is stored in file order
    let names: Vec<_> = SqliteRepo::read_all(&conn)
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, vec!["Alice", "Bob", "Sam"]);

    // And: The import is recorded under its digest
    assert_eq!(digest.len(), 64);
    assert_eq!(SqliteRepo::roster_import_count(&conn, &digest).unwrap(), 1);
}

#[test]
fn test_invalid_record_rejects_whole_roster() {
    // Given: A roster whose second record has a blank name
    let mut conn = setup();

    // When: It is imported
    let err = import_roster(&fixture("roster_invalid_name.yaml"), &mut conn).unwrap_err();

    // Then: Nothing is stored, including the valid first record
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    assert!(err.message().contains("students[1]"));
    assert_eq!(SqliteRepo::count_students(&conn).unwrap(), 0);
}

#[test]
fn test_unsupported_schema_version() {
    let mut conn = setup();
    let err = import_roster(&fixture("roster_bad_version.yaml"), &mut conn).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    assert!(err.message().contains("schema_version"));
}

#[test]
fn test_reimport_appends_and_keeps_digest() {
    let mut conn = setup();
    let yaml = "schema_version: 0\nstudents:\n  - {name: Kim, age: 19, grade: 3.9, gender: F}\n";

    let first = import_roster_str(yaml, &mut conn).unwrap();
    let second = import_roster_str(yaml, &mut conn).unwrap();

    assert_eq!(first, second);
    assert_eq!(SqliteRepo::count_students(&conn).unwrap(), 2);
    assert_eq!(SqliteRepo::roster_import_count(&conn, &first).unwrap(), 2);
}

#[test]
fn test_missing_file_is_reported() {
    let mut conn = setup();
    let err = import_roster(&fixture("does_not_exist.yaml"), &mut conn).unwrap_err();
    assert!(err.message().contains("Failed to read roster file"));
}
