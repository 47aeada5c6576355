//! Student record commands
//!
//! Usage:
//!   studex add --name <NAME> --age <AGE> --grade <GRADE> --gender <M|F>
//!   studex get <NAME>

use std::path::Path;

use clap::Args;
use studex_core::{EmptyPolicy, StudentRecord};
use studex_engine::{
    apply_engine_command, apply_engine_query, EngineCommand, EngineCommandResult, EngineQuery,
    EngineQueryResult,
};

use super::open_store;

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub age: u32,

    #[arg(long, allow_negative_numbers = true)]
    pub grade: f64,

    /// "M" or "F"; other labels are stored but left out of by-gender statistics
    #[arg(long)]
    pub gender: String,
}

#[derive(Debug, Args)]
pub struct GetArgs {
    pub name: String,
}

pub fn execute_add(args: AddArgs, db: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = open_store(db)?;
    let record = StudentRecord::new(args.name, args.age, args.grade, args.gender);

    match apply_engine_command(EngineCommand::StudentAdd { record }, &mut conn)? {
        EngineCommandResult::StudentAdded { id } => {
            println!("✓ Added student (id: {})", id);
            Ok(())
        }
        other => Err(format!("unexpected result: {:?}", other).into()),
    }
}

pub fn execute_get(args: GetArgs, db: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_store(db)?;

    // Lookups never consult the policy
    let query = EngineQuery::StudentGet { name: args.name };
    match apply_engine_query(query, &conn, EmptyPolicy::default())? {
        EngineQueryResult::Student(record) => {
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
        other => Err(format!("unexpected result: {:?}", other).into()),
    }
}
