//! Engine-level read-only query surface.
//!
//! Aggregate queries perform exactly one `SqliteRepo::read_all` and hand the
//! resulting snapshot to the pure functions in `studex_core::aggregate`.
//! The store is never touched again for the same query, so the combined
//! snapshot is internally consistent even with concurrent inserts.

#![allow(clippy::result_large_err)]

use std::sync::Mutex;
use std::time::Instant;

use rusqlite::Connection;
use serde::Serialize;
use studex_core::aggregate::{self, AggregateKind, AggregateResult, CombinedSnapshot};
use studex_core::errors::{ExError, StatsError};
use studex_core::model::{GenderSplit, StudentRecord};
use studex_core::policy::EmptyPolicy;
use studex_core::{log_op_end, log_op_error, log_op_start};
use studex_store::errors::Result;
use studex_store::repo::SqliteRepo;

use crate::commands::lock_store;

/// Read-only queries supported by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineQuery {
    /// First record stored under exactly this name.
    StudentGet { name: String },
    AverageGrade,
    GenderPercentage,
    MaxAgeByGender,
    MinAgeByGender,
    AverageGradeByGender,
    /// All five statistics plus the records, from one store read.
    CombinedSnapshot,
}

impl EngineQuery {
    pub fn op_name(&self) -> &'static str {
        match self {
            EngineQuery::StudentGet { .. } => "student_get",
            EngineQuery::CombinedSnapshot => "combined_snapshot",
            other => match other.aggregate_kind() {
                Some(kind) => kind.op_name(),
                None => "unknown",
            },
        }
    }

    fn aggregate_kind(&self) -> Option<AggregateKind> {
        match self {
            EngineQuery::AverageGrade => Some(AggregateKind::AverageGrade),
            EngineQuery::GenderPercentage => Some(AggregateKind::GenderPercentage),
            EngineQuery::MaxAgeByGender => Some(AggregateKind::MaxAgeByGender),
            EngineQuery::MinAgeByGender => Some(AggregateKind::MinAgeByGender),
            EngineQuery::AverageGradeByGender => Some(AggregateKind::AverageGradeByGender),
            EngineQuery::StudentGet { .. } | EngineQuery::CombinedSnapshot => None,
        }
    }
}

/// All possible results from `apply_engine_query`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EngineQueryResult {
    Student(StudentRecord),
    AverageGrade(f64),
    GenderPercentage(GenderSplit<f64>),
    MaxAgeByGender(GenderSplit<u32>),
    MinAgeByGender(GenderSplit<u32>),
    AverageGradeByGender(GenderSplit<f64>),
    CombinedSnapshot(Box<CombinedSnapshot>),
}

impl From<AggregateResult> for EngineQueryResult {
    fn from(result: AggregateResult) -> Self {
        match result {
            AggregateResult::AverageGrade(v) => EngineQueryResult::AverageGrade(v),
            AggregateResult::GenderPercentage(v) => EngineQueryResult::GenderPercentage(v),
            AggregateResult::MaxAgeByGender(v) => EngineQueryResult::MaxAgeByGender(v),
            AggregateResult::MinAgeByGender(v) => EngineQueryResult::MinAgeByGender(v),
            AggregateResult::AverageGradeByGender(v) => {
                EngineQueryResult::AverageGradeByGender(v)
            }
        }
    }
}

/// What a query needs from the store, copied out of it
enum QueryInput {
    Student(Option<StudentRecord>),
    Snapshot(Vec<StudentRecord>),
}

impl QueryInput {
    fn record_count(&self) -> usize {
        match self {
            QueryInput::Student(found) => usize::from(found.is_some()),
            QueryInput::Snapshot(records) => records.len(),
        }
    }
}

/// Execute a read-only query against a borrowed connection.
///
/// # Errors
/// `StoreUnavailable` from the read, `NotFound` for a missing name, and the
/// empty-input errors selected by `policy`.
pub fn apply_engine_query(
    query: EngineQuery,
    conn: &Connection,
    policy: EmptyPolicy,
) -> Result<EngineQueryResult> {
    execute_logged(query, policy, |q| read_input(q, conn))
}

/// Execute a read-only query against a shared connection.
///
/// The lock is held while rows are copied out and released before any
/// statistic is computed.
///
/// # Errors
/// As [`apply_engine_query`], plus `StoreUnavailable` for a poisoned lock.
pub fn apply_engine_query_shared(
    query: EngineQuery,
    store: &Mutex<Connection>,
    policy: EmptyPolicy,
) -> Result<EngineQueryResult> {
    execute_logged(query, policy, |q| {
        let conn = lock_store(store)?;
        read_input(q, &conn)
    })
}

fn execute_logged<F>(query: EngineQuery, policy: EmptyPolicy, read: F) -> Result<EngineQueryResult>
where
    F: FnOnce(&EngineQuery) -> Result<QueryInput>,
{
    let op = query.op_name();
    log_op_start!(op, empty_policy = policy.as_str());
    let start = Instant::now();

    let mut record_count = 0;
    let result = read(&query).and_then(|input| {
        record_count = input.record_count();
        evaluate(query, input, policy)
    });

    let elapsed = start.elapsed().as_millis() as u64;
    match &result {
        Ok(_) => {
            log_op_end!(op, duration_ms = elapsed, record_count = record_count as u64);
        }
        Err(e) => {
            log_op_error!(op, e.clone(), duration_ms = elapsed);
        }
    }
    result
}

fn read_input(query: &EngineQuery, conn: &Connection) -> Result<QueryInput> {
    match query {
        EngineQuery::StudentGet { name } => Ok(QueryInput::Student(
            SqliteRepo::find_student_by_name(conn, name)?,
        )),
        _ => Ok(QueryInput::Snapshot(SqliteRepo::read_all(conn)?)),
    }
}

fn evaluate(query: EngineQuery, input: QueryInput, policy: EmptyPolicy) -> Result<EngineQueryResult> {
    let op = query.op_name();
    let outcome = match (query, input) {
        (EngineQuery::StudentGet { name }, QueryInput::Student(found)) => found
            .map(EngineQueryResult::Student)
            .ok_or(StatsError::RecordNotFound { name }),
        (EngineQuery::CombinedSnapshot, QueryInput::Snapshot(records)) => {
            aggregate::combined_snapshot(records, policy)
                .map(|combined| EngineQueryResult::CombinedSnapshot(Box::new(combined)))
        }
        (query, QueryInput::Snapshot(records)) => match query.aggregate_kind() {
            Some(kind) => aggregate::compute(kind, &records, policy).map(EngineQueryResult::from),
            None => Err(StatsError::Internal {
                message: format!("query {} has no aggregate", op),
            }),
        },
        (_, QueryInput::Student(_)) => Err(StatsError::Internal {
            message: format!("query {} was given a single-record input", op),
        }),
    };
    outcome.map_err(|e| ExError::from(e).with_op(op))
}

#[cfg(test)]
mod tests {
    use super::*;
    use studex_store::migrations::apply_migrations;

    fn setup() -> Connection {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();
        conn
    }

    #[test]
    fn test_op_names_match_aggregate_kinds() {
        assert_eq!(EngineQuery::AverageGrade.op_name(), "average_grade");
        assert_eq!(EngineQuery::MinAgeByGender.op_name(), "min_age_by_gender");
        assert_eq!(
            EngineQuery::StudentGet {
                name: "x".to_string()
            }
            .op_name(),
            "student_get"
        );
    }

    #[test]
    fn test_empty_store_zero_policy() {
        let conn = setup();
        let result = apply_engine_query(EngineQuery::AverageGrade, &conn, EmptyPolicy::Zero).unwrap();
        assert_eq!(result, EngineQueryResult::AverageGrade(0.0));
    }

    #[test]
    fn test_result_serializes_as_bare_value() {
        let json = serde_json::to_value(EngineQueryResult::AverageGrade(3.0)).unwrap();
        assert_eq!(json, serde_json::json!(3.0));
    }
}
