//! Roster parser with validation

#![allow(clippy::result_large_err)]

use crate::errors::{roster_validation, Result};
use crate::roster::format_v0::RosterV0;
use std::fs;
use std::path::Path;
use studex_core::rules::validate_record;

/// Parse a roster file from a path
pub fn parse_roster_file(path: &Path) -> Result<RosterV0> {
    let content = fs::read_to_string(path)
        .map_err(|e| roster_validation(&format!("Failed to read roster file: {}", e)))?;

    parse_roster_str(&content)
}

/// Parse a roster from a string
///
/// Every record must pass the same validation as a single insert; the first
/// failure rejects the whole roster.
pub fn parse_roster_str(content: &str) -> Result<RosterV0> {
    let roster: RosterV0 = serde_yaml::from_str(content)
        .map_err(|e| roster_validation(&format!("YAML parse error: {}", e)))?;

    if roster.schema_version != 0 {
        return Err(roster_validation(&format!(
            "Unsupported schema_version: {}. Expected 0",
            roster.schema_version
        )));
    }

    for (index, student) in roster.students.iter().enumerate() {
        validate_record(student).map_err(|e| {
            roster_validation(&format!("students[{}] ({}): {}", index, student.name, e))
        })?;
    }

    Ok(roster)
}
