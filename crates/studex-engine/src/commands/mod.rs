//! Command orchestration layer.
//!
//! `engine_command` holds the writes, `engine_query` the reads. Both come in
//! two flavours: one over a borrowed `Connection` (CLI) and one over a
//! `Mutex<Connection>` shared between tasks (server), which holds the lock
//! only for the store access itself.

pub mod engine_command;
pub mod engine_query;

use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;
use studex_core::errors::{ExError, ExErrorKind};

pub(crate) fn lock_store(store: &Mutex<Connection>) -> Result<MutexGuard<'_, Connection>, ExError> {
    store.lock().map_err(|_| {
        ExError::new(ExErrorKind::StoreUnavailable)
            .with_op("store_lock")
            .with_message("store lock poisoned by a panicked request")
    })
}
