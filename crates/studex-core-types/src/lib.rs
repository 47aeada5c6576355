//! Core types shared across the Studex crates
//!
//! Foundational types used by the error facility, the logging facility and
//! the RPC façade:
//!
//! - **Correlation types**: RequestId, TraceId, RequestContext
//! - **Schema constants**: canonical log field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::{RequestContext, RequestId, TraceId};
