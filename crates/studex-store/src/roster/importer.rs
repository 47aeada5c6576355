//! Roster importer orchestration

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use crate::repo::SqliteRepo;
use crate::roster::format_v0::RosterV0;
use crate::roster::{compute_roster_digest, parse_roster_file, parse_roster_str};
use rusqlite::Connection;
use std::path::Path;

/// Import a roster file into the database
///
/// 1. Parses and validates every record
/// 2. Computes the roster digest
/// 3. Inserts all records and a ledger row in one transaction
///
/// Either every record is stored or none is. Returns the roster digest.
pub fn import_roster(path: &Path, conn: &mut Connection) -> Result<String> {
    let roster = parse_roster_file(path)?;
    import_parsed(&roster, conn)
}

/// Import a roster given as YAML text
pub fn import_roster_str(content: &str, conn: &mut Connection) -> Result<String> {
    let roster = parse_roster_str(content)?;
    import_parsed(&roster, conn)
}

fn import_parsed(roster: &RosterV0, conn: &mut Connection) -> Result<String> {
    let roster_digest = compute_roster_digest(roster)?;

    let tx = conn.transaction().map_err(from_rusqlite)?;
    let inserted = SqliteRepo::insert_students_tx(&tx, &roster.students)?;
    SqliteRepo::record_roster_import_tx(&tx, &roster_digest, inserted)?;
    tx.commit().map_err(from_rusqlite)?;

    tracing::info!(
        roster_digest = %roster_digest,
        record_count = inserted,
        "roster imported"
    );

    Ok(roster_digest)
}
