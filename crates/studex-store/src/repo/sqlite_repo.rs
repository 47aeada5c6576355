//! SQLite repository implementation
//!
//! Static functions over a borrowed `Connection` (or `Transaction`); the
//! caller owns the handle and decides how access to it is serialized.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use rusqlite::{Connection, OptionalExtension, Row, Statement, Transaction};
use studex_core::model::StudentRecord;

const INSERT_STUDENT: &str =
    "INSERT INTO students (name, age, grade, gender, created_at) VALUES (?1, ?2, ?3, ?4, ?5)";

const SELECT_COLUMNS: &str = "SELECT name, age, grade, gender FROM students";

/// SQLite repository for student records
pub struct SqliteRepo;

impl SqliteRepo {
    /// Insert one record and return its row id
    pub fn insert_student(conn: &Connection, student: &StudentRecord) -> Result<i64> {
        let mut stmt = conn.prepare(INSERT_STUDENT).map_err(from_rusqlite)?;
        execute_insert(&mut stmt, student).map_err(from_rusqlite)?;
        Ok(conn.last_insert_rowid())
    }

    /// Insert records inside an open transaction; returns how many were written
    ///
    /// Nothing is visible to other readers until the caller commits.
    pub fn insert_students_tx(tx: &Transaction, students: &[StudentRecord]) -> Result<usize> {
        let mut stmt = tx.prepare(INSERT_STUDENT).map_err(from_rusqlite)?;
        for student in students {
            execute_insert(&mut stmt, student).map_err(from_rusqlite)?;
        }
        Ok(students.len())
    }

    /// Look up a record by exact name; the earliest inserted match wins
    pub fn find_student_by_name(conn: &Connection, name: &str) -> Result<Option<StudentRecord>> {
        let sql = format!("{} WHERE name = ?1 ORDER BY id ASC LIMIT 1", SELECT_COLUMNS);
        let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;

        let result = stmt
            .query_row([name], student_from_row)
            .optional()
            .map_err(from_rusqlite)?;

        Ok(result)
    }

    /// Read every record in insertion order
    ///
    /// This is the snapshot every statistic is computed from: a single
    /// SELECT, fully materialized before returning.
    pub fn read_all(conn: &Connection) -> Result<Vec<StudentRecord>> {
        let sql = format!("{} ORDER BY id ASC", SELECT_COLUMNS);
        let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;

        let students = stmt
            .query_map([], student_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        Ok(students)
    }

    pub fn count_students(conn: &Connection) -> Result<u64> {
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM students", [], |row| row.get(0))
            .map_err(from_rusqlite)?;
        Ok(count.max(0) as u64)
    }

    /// Record a completed roster import in the ledger
    pub fn record_roster_import_tx(
        tx: &Transaction,
        roster_digest: &str,
        record_count: usize,
    ) -> Result<()> {
        tx.execute(
            "INSERT INTO roster_imports (roster_digest, record_count, imported_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![
                roster_digest,
                record_count as i64,
                chrono::Utc::now().timestamp()
            ],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    /// Number of times a roster with this digest has been imported
    pub fn roster_import_count(conn: &Connection, roster_digest: &str) -> Result<u64> {
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM roster_imports WHERE roster_digest = ?1",
                [roster_digest],
                |row| row.get(0),
            )
            .map_err(from_rusqlite)?;
        Ok(count.max(0) as u64)
    }
}

fn execute_insert(stmt: &mut Statement<'_>, student: &StudentRecord) -> rusqlite::Result<usize> {
    stmt.execute(rusqlite::params![
        student.name,
        student.age,
        student.grade,
        student.gender,
        chrono::Utc::now().timestamp(),
    ])
}

fn student_from_row(row: &Row<'_>) -> rusqlite::Result<StudentRecord> {
    Ok(StudentRecord {
        name: row.get(0)?,
        age: row.get(1)?,
        grade: row.get(2)?,
        gender: row.get(3)?,
    })
}
