//! Migration framework
//!
//! Ordered SQL files compiled into the binary, each recorded in
//! `schema_version` with its checksum once applied. Re-running is a no-op;
//! an applied migration whose SQL has since changed is refused.

mod checksums;
mod embedded;
mod runner;

pub use embedded::{get_migrations, Migration};
pub use runner::{applied_migrations, apply_migrations, AppliedMigration};
