//! Repository layer for persisting student records to SQLite

pub mod sqlite_repo;

pub use sqlite_repo::SqliteRepo;
