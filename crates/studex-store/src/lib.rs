//! Studex Store - SQLite persistence for student records
//!
//! Provides:
//! - Connection setup and embedded, checksummed migrations
//! - `SqliteRepo`: insert, by-name lookup and whole-table snapshot reads
//! - YAML roster import, applied in a single transaction

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;
pub mod roster;

// Re-export key types
pub use errors::Result;
pub use repo::SqliteRepo;
