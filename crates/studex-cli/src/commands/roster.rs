//! Roster import command
//!
//! Usage: studex roster import <PATH>

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use studex_engine::{apply_engine_command, EngineCommand, EngineCommandResult};

use super::open_store;

#[derive(Debug, Args)]
pub struct RosterArgs {
    #[command(subcommand)]
    pub command: RosterCommand,
}

#[derive(Debug, Subcommand)]
pub enum RosterCommand {
    /// Import a roster YAML file in one transaction
    Import(ImportArgs),
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Path to roster YAML file
    pub path: PathBuf,
}

pub fn execute(args: RosterArgs, db: &Path) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        RosterCommand::Import(import_args) => execute_import(import_args, db),
    }
}

fn execute_import(args: ImportArgs, db: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = open_store(db)?;

    println!("Importing {}...", args.path.display());
    let result = apply_engine_command(EngineCommand::RosterImport { path: args.path }, &mut conn)?;
    match result {
        EngineCommandResult::RosterImported { roster_digest } => {
            println!("✓ Imported (digest: {})", roster_digest);
            Ok(())
        }
        other => Err(format!("unexpected result: {:?}", other).into()),
    }
}
