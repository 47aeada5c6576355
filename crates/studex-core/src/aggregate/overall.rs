//! Statistics over the whole snapshot

use crate::errors::Result;
use crate::model::{Gender, GenderSplit, StudentRecord};
use crate::policy::EmptyPolicy;

/// Arithmetic mean of every record's grade.
///
/// Records with unrecognized gender labels are included.
///
/// # Errors
/// `EmptyDataset` on an empty snapshot under `EmptyPolicy::Reject`.
pub fn average_grade(snapshot: &[StudentRecord], policy: EmptyPolicy) -> Result<f64> {
    if snapshot.is_empty() {
        return policy.on_empty_dataset();
    }
    let total: f64 = snapshot.iter().map(|r| r.grade).sum();
    Ok(total / snapshot.len() as f64)
}

/// Fraction of the snapshot in each gender partition.
///
/// The denominator is the full snapshot size, so records with unrecognized
/// labels lower both fractions and the two sides sum to less than 1.
///
/// # Errors
/// `EmptyDataset` on an empty snapshot under `EmptyPolicy::Reject`.
pub fn gender_percentage(
    snapshot: &[StudentRecord],
    policy: EmptyPolicy,
) -> Result<GenderSplit<f64>> {
    if snapshot.is_empty() {
        return policy.on_empty_dataset();
    }

    let counts = snapshot
        .iter()
        .fold(GenderSplit::<usize>::default(), |mut acc, r| {
            match r.partition() {
                Some(Gender::Male) => acc.male += 1,
                Some(Gender::Female) => acc.female += 1,
                None => {}
            }
            acc
        });

    let total = snapshot.len() as f64;
    Ok(GenderSplit::new(
        counts.male as f64 / total,
        counts.female as f64 / total,
    ))
}
