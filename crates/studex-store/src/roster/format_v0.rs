//! Roster format v0
//!
//! ```yaml
//! schema_version: 0
//! students:
//!   - name: Alice
//!     age: 20
//!     grade: 3.5
//!     gender: F
//! ```

use serde::{Deserialize, Serialize};
use studex_core::model::StudentRecord;

/// Top-level roster file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RosterV0 {
    /// Must be 0 for this format
    pub schema_version: u32,

    /// Records in insertion order
    #[serde(default)]
    pub students: Vec<StudentRecord>,
}
