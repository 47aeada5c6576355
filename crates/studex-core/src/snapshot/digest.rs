//! Digest computation for record snapshots.
//!
//! ## Determinism Guarantees
//!
//! - Same records in the same order → same digest (canonical JSON)
//! - Different order → different digest (order-sensitive)

use crate::errors::Result;
use crate::model::StudentRecord;
use sha2::{Digest, Sha256};

/// Compute the digest of an ordered record snapshot.
///
/// ## Returns
///
/// Hex-encoded SHA256 digest (64 characters)
///
/// ## Errors
///
/// Returns `StatsError::Serialization` if JSON serialization fails.
///
/// ## Example
///
/// ```
/// use studex_core::model::StudentRecord;
/// use studex_core::snapshot::compute_records_digest;
///
/// let records = vec![StudentRecord::new("Alice", 20, 3.5, "F")];
/// let digest = compute_records_digest(&records).unwrap();
/// assert_eq!(digest.len(), 64);
/// ```
pub fn compute_records_digest(records: &[StudentRecord]) -> Result<String> {
    let canonical = serde_json::to_string(records)?;
    Ok(hash_string(&canonical))
}

fn hash_string(s: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    hex::encode(hasher.finalize())
}
