//! Statistics commands
//!
//! Usage:
//!   studex stats <STATISTIC> [--empty-policy zero|reject]
//!   studex combined

use std::path::Path;

use clap::{Args, ValueEnum};
use studex_core::EmptyPolicy;
use studex_engine::{apply_engine_query, EngineQuery};

use super::open_store;

#[derive(Debug, Args)]
pub struct StatsArgs {
    pub statistic: Statistic,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Statistic {
    /// Mean grade over all records
    AverageGrade,
    /// Share of records labelled M and F
    GenderPercentage,
    /// Oldest age per gender
    MaxAge,
    /// Youngest age per gender
    MinAge,
    /// Mean grade per gender
    AverageGradeByGender,
}

impl Statistic {
    fn query(self) -> EngineQuery {
        match self {
            Statistic::AverageGrade => EngineQuery::AverageGrade,
            Statistic::GenderPercentage => EngineQuery::GenderPercentage,
            Statistic::MaxAge => EngineQuery::MaxAgeByGender,
            Statistic::MinAge => EngineQuery::MinAgeByGender,
            Statistic::AverageGradeByGender => EngineQuery::AverageGradeByGender,
        }
    }
}

pub fn execute(
    args: StatsArgs,
    db: &Path,
    policy: EmptyPolicy,
) -> Result<(), Box<dyn std::error::Error>> {
    print_query(args.statistic.query(), db, policy)
}

pub fn execute_combined(db: &Path, policy: EmptyPolicy) -> Result<(), Box<dyn std::error::Error>> {
    print_query(EngineQuery::CombinedSnapshot, db, policy)
}

fn print_query(
    query: EngineQuery,
    db: &Path,
    policy: EmptyPolicy,
) -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_store(db)?;
    let result = apply_engine_query(query, &conn, policy)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
