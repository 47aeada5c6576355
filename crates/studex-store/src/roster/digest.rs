//! Roster digest canonicalization
//!
//! Record order is part of the digest: it fixes insertion order, and
//! insertion order decides by-name lookups.

use crate::errors::{serialization_error, Result};
use crate::roster::format_v0::RosterV0;
use serde::Serialize;
use sha2::{Digest, Sha256};
use studex_core::model::StudentRecord;

#[derive(Serialize)]
struct CanonicalRoster<'a> {
    schema_version: u32,
    students: &'a [StudentRecord],
}

/// Compute a stable SHA256 hex digest of a roster
///
/// # Errors
/// `Serialization` if the canonical JSON form cannot be produced.
pub fn compute_roster_digest(roster: &RosterV0) -> Result<String> {
    let canonical = CanonicalRoster {
        schema_version: roster.schema_version,
        students: &roster.students,
    };

    let json = serde_json::to_string(&canonical)
        .map_err(|e| serialization_error("roster_digest", e))?;

    Ok(hex::encode(Sha256::digest(json.as_bytes())))
}
