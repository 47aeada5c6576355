//! studex CLI
//!
//! Command-line interface for the student statistics store

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use studex_core::EmptyPolicy;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "studex")]
#[command(about = "studex - Student records and statistics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// SQLite database (created and migrated on first use)
    #[arg(long, global = true, default_value = commands::DEFAULT_DB_PATH)]
    db: PathBuf,

    /// Result for empty input: `zero` yields 0, `reject` fails
    #[arg(long, global = true, default_value = "zero")]
    empty_policy: EmptyPolicy,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Insert one student record
    Add(commands::student::AddArgs),
    /// Print the earliest record with this exact name
    Get(commands::student::GetArgs),
    /// Print one statistic over all stored records
    Stats(commands::stats::StatsArgs),
    /// Print every statistic computed over one read, as JSON
    Combined,
    /// Roster operations
    Roster(commands::roster::RosterArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Add(args) => commands::student::execute_add(args, &cli.db),
        Commands::Get(args) => commands::student::execute_get(args, &cli.db),
        Commands::Stats(args) => commands::stats::execute(args, &cli.db, cli.empty_policy),
        Commands::Combined => commands::stats::execute_combined(&cli.db, cli.empty_policy),
        Commands::Roster(args) => commands::roster::execute(args, &cli.db),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
