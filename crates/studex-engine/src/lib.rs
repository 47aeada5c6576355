//! Studex Engine - Orchestration layer
//!
//! Coordinates the record store and the pure aggregation engine. Every
//! operation is bracketed by `start` and `end`/`end_error` log events.

pub mod commands;

pub use commands::engine_command::{
    apply_engine_command, apply_engine_command_shared, EngineCommand, EngineCommandResult,
};
pub use commands::engine_query::{
    apply_engine_query, apply_engine_query_shared, EngineQuery, EngineQueryResult,
};
