//! Roster import
//!
//! Provides:
//! - Roster format v0 (YAML)
//! - Parser with per-record validation
//! - Digest canonicalization
//! - Transactional importer

pub mod digest;
pub mod format_v0;
pub mod importer;
pub mod parser;

pub use digest::compute_roster_digest;
pub use format_v0::RosterV0;
pub use importer::{import_roster, import_roster_str};
pub use parser::{parse_roster_file, parse_roster_str};
