//! Studex Core - student records and the aggregation engine
//!
//! This crate provides:
//! - The `StudentRecord` model and the `Gender` partitions
//! - Record validation applied before insert
//! - The aggregation engine: pure statistics over a record snapshot
//! - The `EmptyPolicy` deciding what empty input yields
//! - The error facility (`StatsError`, `ExError`) and the logging facility

pub mod aggregate;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod policy;
pub mod rules;
pub mod snapshot;

// Re-export commonly used types
pub use aggregate::{AggregateKind, AggregateResult, CombinedSnapshot};
pub use errors::{ExError, ExErrorKind, Result, StatsError};
pub use model::{Gender, GenderSplit, StudentRecord};
pub use policy::EmptyPolicy;
