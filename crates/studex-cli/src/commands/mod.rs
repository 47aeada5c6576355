pub mod roster;
pub mod stats;
pub mod student;

use std::path::Path;

use rusqlite::Connection;

pub const DEFAULT_DB_PATH: &str = ".studex/students.db";

/// Open (creating if needed) and migrate the store at `path`
pub fn open_store(path: &Path) -> Result<Connection, Box<dyn std::error::Error>> {
    Ok(studex_store::db::open_and_migrate(path)?)
}
