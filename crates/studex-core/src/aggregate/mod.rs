//! Aggregation engine
//!
//! Pure functions over an immutable record snapshot. Nothing here touches
//! the store or holds state between calls; the same snapshot and policy
//! always produce the same result.
//!
//! | statistic | function |
//! |---|---|
//! | average grade | [`average_grade`] |
//! | gender percentage | [`gender_percentage`] |
//! | max age by gender | [`max_age_by_gender`] |
//! | min age by gender | [`min_age_by_gender`] |
//! | average grade by gender | [`average_grade_by_gender`] |
//! | all of the above + records | [`combined_snapshot`] |

pub mod by_gender;
pub mod combined;
pub mod overall;

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::model::{GenderSplit, StudentRecord};
use crate::policy::EmptyPolicy;

pub use by_gender::{average_grade_by_gender, max_age_by_gender, min_age_by_gender};
pub use combined::{combined_snapshot, CombinedSnapshot};
pub use overall::{average_grade, gender_percentage};

/// The five single statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateKind {
    AverageGrade,
    GenderPercentage,
    MaxAgeByGender,
    MinAgeByGender,
    AverageGradeByGender,
}

impl AggregateKind {
    pub const ALL: [AggregateKind; 5] = [
        AggregateKind::AverageGrade,
        AggregateKind::GenderPercentage,
        AggregateKind::MaxAgeByGender,
        AggregateKind::MinAgeByGender,
        AggregateKind::AverageGradeByGender,
    ];

    /// Operation name used in log events
    pub fn op_name(&self) -> &'static str {
        match self {
            AggregateKind::AverageGrade => "average_grade",
            AggregateKind::GenderPercentage => "gender_percentage",
            AggregateKind::MaxAgeByGender => "max_age_by_gender",
            AggregateKind::MinAgeByGender => "min_age_by_gender",
            AggregateKind::AverageGradeByGender => "average_grade_by_gender",
        }
    }
}

/// One computed statistic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AggregateResult {
    AverageGrade(f64),
    GenderPercentage(GenderSplit<f64>),
    MaxAgeByGender(GenderSplit<u32>),
    MinAgeByGender(GenderSplit<u32>),
    AverageGradeByGender(GenderSplit<f64>),
}

/// Compute a single statistic selected at runtime
///
/// # Errors
/// Whatever the selected statistic returns under `policy`.
pub fn compute(
    kind: AggregateKind,
    snapshot: &[StudentRecord],
    policy: EmptyPolicy,
) -> Result<AggregateResult> {
    Ok(match kind {
        AggregateKind::AverageGrade => {
            AggregateResult::AverageGrade(average_grade(snapshot, policy)?)
        }
        AggregateKind::GenderPercentage => {
            AggregateResult::GenderPercentage(gender_percentage(snapshot, policy)?)
        }
        AggregateKind::MaxAgeByGender => {
            AggregateResult::MaxAgeByGender(max_age_by_gender(snapshot, policy)?)
        }
        AggregateKind::MinAgeByGender => {
            AggregateResult::MinAgeByGender(min_age_by_gender(snapshot, policy)?)
        }
        AggregateKind::AverageGradeByGender => {
            AggregateResult::AverageGradeByGender(average_grade_by_gender(snapshot, policy)?)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_dispatches_to_matching_statistic() {
        let snapshot = [StudentRecord::new("Alice", 20, 3.5, "F")];
        let result = compute(AggregateKind::AverageGrade, &snapshot, EmptyPolicy::Zero).unwrap();
        assert_eq!(result, AggregateResult::AverageGrade(3.5));
    }

    #[test]
    fn test_result_serializes_with_kind_tag() {
        let json = serde_json::to_value(AggregateResult::MaxAgeByGender(GenderSplit::new(22, 20)))
            .unwrap();
        assert_eq!(json["kind"], "max_age_by_gender");
        assert_eq!(json["value"]["male"], 22);
        assert_eq!(json["value"]["female"], 20);
    }

    #[test]
    fn test_op_names_are_unique() {
        let mut names: Vec<_> = AggregateKind::ALL.iter().map(|k| k.op_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), AggregateKind::ALL.len());
    }
}
