// Property tests for the aggregation engine

#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use studex_core::aggregate::{
    average_grade, average_grade_by_gender, combined_snapshot, gender_percentage,
    max_age_by_gender, min_age_by_gender,
};
use studex_core::{EmptyPolicy, Gender, StudentRecord};

fn arb_gender() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => Just("M".to_string()),
        4 => Just("F".to_string()),
        1 => "[a-zX]{0,2}",
    ]
}

fn arb_record() -> impl Strategy<Value = StudentRecord> {
    ("[A-Z][a-z]{1,8}", 0u32..120, 0.0f64..5.0, arb_gender())
        .prop_map(|(name, age, grade, gender)| StudentRecord::new(name, age, grade, gender))
}

fn arb_labelled_record() -> impl Strategy<Value = StudentRecord> {
    (arb_record(), prop::bool::ANY).prop_map(|(mut record, male)| {
        record.gender = if male { "M" } else { "F" }.to_string();
        record
    })
}

fn arb_unlabelled_record() -> impl Strategy<Value = StudentRecord> {
    (arb_record(), "[a-zX]{0,2}").prop_map(|(mut record, label)| {
        record.gender = label;
        record
    })
}

fn arb_snapshot() -> impl Strategy<Value = Vec<StudentRecord>> {
    prop::collection::vec(arb_record(), 1..40)
}

proptest! {
    #[test]
    fn percentages_bounded_and_sum_at_most_one(snapshot in arb_snapshot()) {
        let pct = gender_percentage(&snapshot, EmptyPolicy::Zero).unwrap();
        prop_assert!((0.0..=1.0).contains(&pct.male));
        prop_assert!((0.0..=1.0).contains(&pct.female));
        prop_assert!(pct.male + pct.female <= 1.0 + 1e-9);
    }

    #[test]
    fn percentages_sum_to_one_when_every_record_is_labelled(
        snapshot in prop::collection::vec(arb_labelled_record(), 1..40)
    ) {
        let pct = gender_percentage(&snapshot, EmptyPolicy::Zero).unwrap();
        prop_assert_eq!(pct.male + pct.female, 1.0);
    }

    #[test]
    fn percentages_sum_below_one_with_an_unlabelled_record(
        (snapshot, at) in (
            prop::collection::vec(arb_record(), 0..39),
            arb_unlabelled_record(),
            any::<prop::sample::Index>(),
        )
            .prop_map(|(mut records, odd, at)| {
                let pos = at.index(records.len() + 1);
                records.insert(pos, odd);
                (records, pos)
            })
    ) {
        prop_assert!(Gender::from_label(&snapshot[at].gender).is_none());
        let pct = gender_percentage(&snapshot, EmptyPolicy::Zero).unwrap();
        prop_assert!(pct.male + pct.female < 1.0);
    }

    #[test]
    fn average_lies_between_extremes(snapshot in arb_snapshot()) {
        let avg = average_grade(&snapshot, EmptyPolicy::Zero).unwrap();
        let lo = snapshot.iter().map(|r| r.grade).fold(f64::INFINITY, f64::min);
        let hi = snapshot.iter().map(|r| r.grade).fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(avg >= lo - 1e-9 && avg <= hi + 1e-9);
    }

    #[test]
    fn min_never_exceeds_max(snapshot in arb_snapshot()) {
        let max = max_age_by_gender(&snapshot, EmptyPolicy::Zero).unwrap();
        let min = min_age_by_gender(&snapshot, EmptyPolicy::Zero).unwrap();
        for gender in Gender::ALL {
            prop_assert!(min.get(gender) <= max.get(gender));
        }
    }

    #[test]
    fn zero_policy_never_yields_nan(snapshot in prop::collection::vec(arb_record(), 0..10)) {
        let avg = average_grade(&snapshot, EmptyPolicy::Zero).unwrap();
        let by_gender = average_grade_by_gender(&snapshot, EmptyPolicy::Zero).unwrap();
        prop_assert!(!avg.is_nan());
        prop_assert!(!by_gender.male.is_nan());
        prop_assert!(!by_gender.female.is_nan());
    }

    #[test]
    fn order_does_not_change_statistics(snapshot in arb_snapshot()) {
        let mut reversed = snapshot.clone();
        reversed.reverse();

        let a = combined_snapshot(snapshot, EmptyPolicy::Zero).unwrap();
        let b = combined_snapshot(reversed, EmptyPolicy::Zero).unwrap();

        prop_assert_eq!(a.max_age, b.max_age);
        prop_assert_eq!(a.min_age, b.min_age);
        prop_assert_eq!(a.gender_percentage, b.gender_percentage);
        prop_assert!((a.average_grade - b.average_grade).abs() < 1e-9);
    }
}
