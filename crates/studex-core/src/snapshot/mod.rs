//! Snapshot identity
//!
//! A snapshot is the ordered record sequence returned by one store read.
//! Its digest lets a client confirm that two combined responses were
//! computed over the same data.

pub mod digest;

pub use digest::compute_records_digest;
