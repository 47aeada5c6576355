// Scenario tests for the aggregation engine
// Each test follows Given / When / Then over an in-memory snapshot.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{alice_and_bob, assert_close, student};
use studex_core::aggregate::{
    average_grade, average_grade_by_gender, combined_snapshot, compute, gender_percentage,
    max_age_by_gender, min_age_by_gender, AggregateKind, AggregateResult,
};
use studex_core::{EmptyPolicy, GenderSplit, StatsError};

#[test]
fn scenario_two_students_every_statistic() {
    // Given Alice (F, 20, 3.5) and Bob (M, 22, 2.5)
    let snapshot = alice_and_bob();

    // When each statistic is computed
    // Then the values match the hand-computed ones
    assert_close(average_grade(&snapshot, EmptyPolicy::Zero).unwrap(), 3.0);

    let pct = gender_percentage(&snapshot, EmptyPolicy::Zero).unwrap();
    assert_close(pct.male, 0.5);
    assert_close(pct.female, 0.5);

    assert_eq!(
        max_age_by_gender(&snapshot, EmptyPolicy::Zero).unwrap(),
        GenderSplit::new(22, 20)
    );
    assert_eq!(
        min_age_by_gender(&snapshot, EmptyPolicy::Zero).unwrap(),
        GenderSplit::new(22, 20)
    );

    let avg = average_grade_by_gender(&snapshot, EmptyPolicy::Zero).unwrap();
    assert_close(avg.male, 2.5);
    assert_close(avg.female, 3.5);
}

#[test]
fn scenario_empty_snapshot_zero_policy() {
    // Given no records and the zero policy
    let snapshot = Vec::new();

    // When the combined snapshot is computed
    let combined = combined_snapshot(snapshot, EmptyPolicy::Zero).unwrap();

    // Then every value is zero and nothing is NaN
    assert_eq!(combined.record_count, 0);
    assert_eq!(combined.average_grade, 0.0);
    assert_eq!(combined.gender_percentage, GenderSplit::new(0.0, 0.0));
    assert_eq!(combined.max_age, GenderSplit::new(0, 0));
    assert_eq!(combined.min_age, GenderSplit::new(0, 0));
    assert_eq!(combined.average_grade_by_gender, GenderSplit::new(0.0, 0.0));
}

#[test]
fn scenario_empty_snapshot_reject_policy() {
    // Given no records and the reject policy
    // When any statistic is computed
    // Then each one reports EmptyDataset
    for kind in AggregateKind::ALL {
        let err = compute(kind, &[], EmptyPolicy::Reject).unwrap_err();
        assert_eq!(err, StatsError::EmptyDataset, "kind {:?}", kind);
    }
    assert_eq!(
        combined_snapshot(Vec::new(), EmptyPolicy::Reject).unwrap_err(),
        StatsError::EmptyDataset
    );
}

#[test]
fn scenario_unrecognized_label_counts_in_denominator_only() {
    // Given one record labelled "X" and one labelled "M"
    let snapshot = vec![student("Sam", 30, 1.0, "X"), student("Bob", 22, 3.0, "M")];

    // When percentages are computed
    let pct = gender_percentage(&snapshot, EmptyPolicy::Zero).unwrap();

    // Then the unlabelled record lowers the sum below one
    assert_close(pct.male, 0.5);
    assert_close(pct.female, 0.0);

    // And it still contributes to the overall average
    assert_close(average_grade(&snapshot, EmptyPolicy::Zero).unwrap(), 2.0);

    // And it is absent from the age extremes
    assert_eq!(
        max_age_by_gender(&snapshot, EmptyPolicy::Zero).unwrap(),
        GenderSplit::new(22, 0)
    );
}

#[test]
fn scenario_lowercase_label_is_not_a_partition() {
    let snapshot = vec![student("Ann", 20, 4.0, "f"), student("Bea", 21, 2.0, "F")];

    let pct = gender_percentage(&snapshot, EmptyPolicy::Zero).unwrap();
    assert_close(pct.female, 0.5);
    assert_eq!(
        min_age_by_gender(&snapshot, EmptyPolicy::Zero).unwrap().female,
        21
    );
}

#[test]
fn scenario_missing_partition_reject_policy() {
    // Given only women
    let snapshot = vec![student("Alice", 20, 3.5, "F"), student("Eve", 24, 3.9, "F")];

    // When a by-gender statistic runs under the reject policy
    let err = max_age_by_gender(&snapshot, EmptyPolicy::Reject).unwrap_err();

    // Then the missing male partition is named
    assert_eq!(
        err,
        StatsError::EmptyPartition {
            gender: "M".to_string()
        }
    );

    // And whole-snapshot statistics are unaffected
    assert!(average_grade(&snapshot, EmptyPolicy::Reject).is_ok());
    assert!(gender_percentage(&snapshot, EmptyPolicy::Reject).is_ok());
}

#[test]
fn scenario_repeated_calls_are_identical() {
    let snapshot = alice_and_bob();
    for kind in AggregateKind::ALL {
        let first = compute(kind, &snapshot, EmptyPolicy::Zero).unwrap();
        let second = compute(kind, &snapshot, EmptyPolicy::Zero).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn scenario_combined_matches_individual_statistics() {
    // Given one snapshot
    let snapshot = vec![
        student("Alice", 20, 3.5, "F"),
        student("Bob", 22, 2.5, "M"),
        student("Cara", 19, 3.0, "F"),
        student("Dan", 25, 1.5, "M"),
        student("Sam", 40, 2.0, "X"),
    ];

    // When the combined snapshot is computed from it
    let combined = combined_snapshot(snapshot.clone(), EmptyPolicy::Zero).unwrap();

    // Then each field equals the single-statistic result over the same records
    assert_eq!(combined.students, snapshot);
    assert_eq!(combined.record_count, 5);
    for kind in AggregateKind::ALL {
        let single = compute(kind, &snapshot, EmptyPolicy::Zero).unwrap();
        match single {
            AggregateResult::AverageGrade(v) => assert_eq!(combined.average_grade, v),
            AggregateResult::GenderPercentage(v) => assert_eq!(combined.gender_percentage, v),
            AggregateResult::MaxAgeByGender(v) => assert_eq!(combined.max_age, v),
            AggregateResult::MinAgeByGender(v) => assert_eq!(combined.min_age, v),
            AggregateResult::AverageGradeByGender(v) => {
                assert_eq!(combined.average_grade_by_gender, v)
            }
        }
    }
}

#[test]
fn scenario_combined_serializes_for_clients() {
    let combined = combined_snapshot(alice_and_bob(), EmptyPolicy::Zero).unwrap();
    let json = serde_json::to_value(&combined).unwrap();

    assert_eq!(json["record_count"], 2);
    assert_eq!(json["students"][0]["name"], "Alice");
    assert_eq!(json["max_age"]["male"], 22);
    assert_eq!(json["snapshot_digest"].as_str().unwrap().len(), 64);
}
