use crate::errors::{Result, StatsError};
use crate::model::StudentRecord;

/// Validate a record before it is handed to the store
///
/// Rules:
/// 1. `name` is non-empty after trimming whitespace
/// 2. `grade` is finite (NaN or infinity would poison every average)
///
/// Gender is free text. Labels other than `"M"`/`"F"` are accepted here and
/// excluded from the gender partitions at aggregation time.
///
/// # Errors
/// Returns `InvalidRecord` naming the first rule that failed.
pub fn validate_record(record: &StudentRecord) -> Result<()> {
    if record.name.trim().is_empty() {
        return Err(StatsError::InvalidRecord {
            reason: "name cannot be empty".to_string(),
        });
    }

    if !record.grade.is_finite() {
        return Err(StatsError::InvalidRecord {
            reason: format!("grade must be a finite number, got {}", record.grade),
        });
    }

    Ok(())
}
