// Test suite for engine write commands

use std::sync::{Arc, Mutex};
use std::thread;

use rusqlite::Connection;
use studex_core::errors::ExErrorKind;
use studex_core::StudentRecord;
use studex_engine::{
    apply_engine_command, apply_engine_command_shared, EngineCommand, EngineCommandResult,
};
use studex_store::SqliteRepo;
use tempfile::TempDir;

fn setup_test_db() -> (TempDir, Connection) {
    let temp_dir = TempDir::new().unwrap();
    let conn = studex_store::db::open_and_migrate(temp_dir.path().join("test.db")).unwrap();
    (temp_dir, conn)
}

#[test]
fn test_nan_grade_rejected_before_store() {
    let (_tmp, mut conn) = setup_test_db();

    let err = apply_engine_command(
        EngineCommand::StudentAdd {
            record: StudentRecord::new("Alice", 20, f64::NAN, "F"),
        },
        &mut conn,
    )
    .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(SqliteRepo::count_students(&conn).unwrap(), 0);
}

#[test]
fn test_roster_import_command() {
    let (tmp, mut conn) = setup_test_db();
    let roster_path = tmp.path().join("roster.yaml");
    std::fs::write(
        &roster_path,
        "schema_version: 0\nstudents:\n  - {name: Alice, age: 20, grade: 3.5, gender: F}\n  - {name: Bob, age: 22, grade: 2.5, gender: M}\n",
    )
    .unwrap();

    let result = apply_engine_command(
        EngineCommand::RosterImport { path: roster_path },
        &mut conn,
    )
    .unwrap();

    match result {
        EngineCommandResult::RosterImported { roster_digest } => {
            assert_eq!(roster_digest.len(), 64)
        }
        other => panic!("unexpected result {:?}", other),
    }
    assert_eq!(SqliteRepo::count_students(&conn).unwrap(), 2);
}

#[test]
fn test_concurrent_shared_inserts_all_land() {
    // Given: One connection shared by several threads
    let (_tmp, conn) = setup_test_db();
    let store = Arc::new(Mutex::new(conn));

    // When: Each thread inserts records
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..10 {
                    let name = format!("s{}_{}", t, i);
                    apply_engine_command_shared(
                        EngineCommand::StudentAdd {
                            record: StudentRecord::new(name, 20, 3.0, "M"),
                        },
                        &store,
                    )
                    .unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    // Then: Every insert is visible exactly once
    let conn = store.lock().unwrap();
    assert_eq!(SqliteRepo::count_students(&conn).unwrap(), 40);
}
