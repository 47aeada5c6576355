//! Canonical event names for structured logging
//!
//! The logging macros stamp every operation event with one of these values
//! in its `event` field, so events from the store, the engine and the RPC
//! server can be correlated. Field keys are written literally in the macros
//! because `tracing` takes field names as identifiers, not values.

pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
