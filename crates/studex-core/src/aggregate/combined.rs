//! Combined snapshot: every statistic plus the records they came from

use serde::{Deserialize, Serialize};

use crate::aggregate::{by_gender, overall};
use crate::errors::Result;
use crate::model::{GenderSplit, StudentRecord};
use crate::policy::EmptyPolicy;
use crate::snapshot::compute_records_digest;

/// All five statistics computed from one store read, with that read's records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedSnapshot {
    pub students: Vec<StudentRecord>,
    pub record_count: usize,
    /// SHA256 of the canonical record sequence the statistics were computed from
    pub snapshot_digest: String,
    pub average_grade: f64,
    pub gender_percentage: GenderSplit<f64>,
    pub max_age: GenderSplit<u32>,
    pub min_age: GenderSplit<u32>,
    pub average_grade_by_gender: GenderSplit<f64>,
}

/// Build the combined snapshot from a single read of the store.
///
/// Takes the records by value: the caller hands over exactly one read, and
/// every statistic below is derived from that same slice.
///
/// # Errors
/// Fails as a whole if any statistic fails; there is no partial result.
pub fn combined_snapshot(
    students: Vec<StudentRecord>,
    policy: EmptyPolicy,
) -> Result<CombinedSnapshot> {
    let average_grade = overall::average_grade(&students, policy)?;
    let gender_percentage = overall::gender_percentage(&students, policy)?;
    let max_age = by_gender::max_age_by_gender(&students, policy)?;
    let min_age = by_gender::min_age_by_gender(&students, policy)?;
    let average_grade_by_gender = by_gender::average_grade_by_gender(&students, policy)?;
    let snapshot_digest = compute_records_digest(&students)?;

    Ok(CombinedSnapshot {
        record_count: students.len(),
        students,
        snapshot_digest,
        average_grade,
        gender_percentage,
        max_age,
        min_age,
        average_grade_by_gender,
    })
}
