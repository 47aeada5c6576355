//! Engine-level write commands.

#![allow(clippy::result_large_err)]

use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;

use rusqlite::Connection;
use serde::Serialize;
use studex_core::errors::ExError;
use studex_core::model::StudentRecord;
use studex_core::rules::validate_record;
use studex_core::{log_op_end, log_op_error, log_op_start};
use studex_store::errors::Result;
use studex_store::repo::SqliteRepo;
use studex_store::roster;

use crate::commands::lock_store;

/// Engine-level commands that write to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommand {
    /// Validate and append one record.
    StudentAdd { record: StudentRecord },
    /// Append every record of a YAML roster file, all or nothing.
    RosterImport { path: PathBuf },
}

impl EngineCommand {
    pub fn op_name(&self) -> &'static str {
        match self {
            EngineCommand::StudentAdd { .. } => "student_add",
            EngineCommand::RosterImport { .. } => "roster_import",
        }
    }
}

/// Result of applying an engine command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineCommandResult {
    StudentAdded { id: i64 },
    RosterImported { roster_digest: String },
}

/// Apply a write command to a borrowed connection.
///
/// # Errors
/// `InvalidInput` for a record that fails validation (nothing is written),
/// `StoreUnavailable` for any store failure.
pub fn apply_engine_command(cmd: EngineCommand, conn: &mut Connection) -> Result<EngineCommandResult> {
    execute_logged(cmd, |cmd| execute(cmd, conn))
}

/// Apply a write command to a shared connection, holding the lock only for
/// the store write.
///
/// # Errors
/// As [`apply_engine_command`], plus `StoreUnavailable` for a poisoned lock.
pub fn apply_engine_command_shared(
    cmd: EngineCommand,
    store: &Mutex<Connection>,
) -> Result<EngineCommandResult> {
    execute_logged(cmd, |cmd| {
        let mut conn = lock_store(store)?;
        execute(cmd, &mut conn)
    })
}

fn execute_logged<F>(cmd: EngineCommand, run: F) -> Result<EngineCommandResult>
where
    F: FnOnce(EngineCommand) -> Result<EngineCommandResult>,
{
    let op = cmd.op_name();
    match &cmd {
        EngineCommand::StudentAdd { record } => {
            log_op_start!(op, student_name = record.name.as_str());
        }
        EngineCommand::RosterImport { path } => {
            log_op_start!(op, roster_path = %path.display());
        }
    }
    let start = Instant::now();

    let result = validate(&cmd).and_then(|()| run(cmd));

    let elapsed = start.elapsed().as_millis() as u64;
    match &result {
        Ok(EngineCommandResult::StudentAdded { id }) => {
            log_op_end!(op, duration_ms = elapsed, student_id = *id);
        }
        Ok(EngineCommandResult::RosterImported { roster_digest }) => {
            log_op_end!(op, duration_ms = elapsed, roster_digest = roster_digest.as_str());
        }
        Err(e) => {
            log_op_error!(op, e.clone(), duration_ms = elapsed);
        }
    }
    result
}

/// Checks that need no store access run before any lock is taken
fn validate(cmd: &EngineCommand) -> Result<()> {
    match cmd {
        EngineCommand::StudentAdd { record } => {
            validate_record(record).map_err(|e| ExError::from(e).with_op(cmd.op_name()))
        }
        EngineCommand::RosterImport { .. } => Ok(()),
    }
}

fn execute(cmd: EngineCommand, conn: &mut Connection) -> Result<EngineCommandResult> {
    match cmd {
        EngineCommand::StudentAdd { record } => {
            let id = SqliteRepo::insert_student(conn, &record)?;
            Ok(EngineCommandResult::StudentAdded { id })
        }
        EngineCommand::RosterImport { path } => {
            let roster_digest = roster::import_roster(&path, conn)?;
            Ok(EngineCommandResult::RosterImported { roster_digest })
        }
    }
}
