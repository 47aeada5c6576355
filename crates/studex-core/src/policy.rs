//! Empty-input policy for the aggregation engine
//!
//! Averages and percentages over an empty set are undefined. The engine
//! never divides by zero; instead every statistic consults one
//! `EmptyPolicy`, chosen once per process and applied to all of them.

use serde::Deserialize;
use std::str::FromStr;

use crate::errors::{Result, StatsError};
use crate::model::Gender;

/// What a statistic returns when there is nothing to aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyPolicy {
    /// Empty snapshot yields `0` for every value; an empty partition yields
    /// `0` on that side
    #[default]
    Zero,
    /// Empty snapshot fails with `EmptyDataset`; an empty partition fails
    /// by-gender statistics with `EmptyPartition`
    Reject,
}

impl EmptyPolicy {
    /// Resolve the result for an empty snapshot
    pub fn on_empty_dataset<T: Default>(&self) -> Result<T> {
        match self {
            EmptyPolicy::Zero => Ok(T::default()),
            EmptyPolicy::Reject => Err(StatsError::EmptyDataset),
        }
    }

    /// Resolve the result for one empty gender partition
    pub fn on_empty_partition<T: Default>(&self, gender: Gender) -> Result<T> {
        match self {
            EmptyPolicy::Zero => Ok(T::default()),
            EmptyPolicy::Reject => Err(StatsError::EmptyPartition {
                gender: gender.label().to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EmptyPolicy::Zero => "zero",
            EmptyPolicy::Reject => "reject",
        }
    }
}

impl FromStr for EmptyPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zero" => Ok(EmptyPolicy::Zero),
            "reject" => Ok(EmptyPolicy::Reject),
            other => Err(format!(
                "unknown empty policy '{}' (expected 'zero' or 'reject')",
                other
            )),
        }
    }
}

impl std::fmt::Display for EmptyPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
