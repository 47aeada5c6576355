//! Statistics computed separately over each gender partition
//!
//! A partition is the subset of the snapshot whose label matches exactly.
//! Records with any other label belong to neither partition.

use crate::errors::Result;
use crate::model::{Gender, GenderSplit, StudentRecord};
use crate::policy::EmptyPolicy;

fn partition(snapshot: &[StudentRecord], gender: Gender) -> impl Iterator<Item = &StudentRecord> {
    snapshot
        .iter()
        .filter(move |r| r.partition() == Some(gender))
}

/// Apply `reduce` to each partition, resolving empty ones via `policy`.
///
/// An entirely empty snapshot is an empty dataset, not two empty partitions.
fn per_partition<T, F>(
    snapshot: &[StudentRecord],
    policy: EmptyPolicy,
    reduce: F,
) -> Result<GenderSplit<T>>
where
    T: Default,
    F: Fn(&mut dyn Iterator<Item = &StudentRecord>) -> Option<T>,
{
    if snapshot.is_empty() {
        return policy.on_empty_dataset();
    }
    GenderSplit::try_from_fn(|gender| {
        let mut members = partition(snapshot, gender);
        match reduce(&mut members) {
            Some(value) => Ok(value),
            None => policy.on_empty_partition(gender),
        }
    })
}

/// Oldest age in each partition.
///
/// # Errors
/// Under `EmptyPolicy::Reject`: `EmptyDataset` for an empty snapshot,
/// `EmptyPartition` when either partition has no records.
pub fn max_age_by_gender(
    snapshot: &[StudentRecord],
    policy: EmptyPolicy,
) -> Result<GenderSplit<u32>> {
    per_partition(snapshot, policy, |members| members.map(|r| r.age).max())
}

/// Youngest age in each partition.
///
/// # Errors
/// Same as [`max_age_by_gender`].
pub fn min_age_by_gender(
    snapshot: &[StudentRecord],
    policy: EmptyPolicy,
) -> Result<GenderSplit<u32>> {
    per_partition(snapshot, policy, |members| members.map(|r| r.age).min())
}

/// Mean grade in each partition.
///
/// # Errors
/// Same as [`max_age_by_gender`].
pub fn average_grade_by_gender(
    snapshot: &[StudentRecord],
    policy: EmptyPolicy,
) -> Result<GenderSplit<f64>> {
    per_partition(snapshot, policy, |members| {
        let (sum, count) = members.fold((0.0_f64, 0_usize), |(sum, count), r| {
            (sum + r.grade, count + 1)
        });
        (count > 0).then(|| sum / count as f64)
    })
}
