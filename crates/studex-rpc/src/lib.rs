//! studex JSON-RPC service
//!
//! Serves the student statistics engine over TCP, one JSON-RPC 2.0
//! request per line.

pub mod config;
pub mod handlers;
pub mod protocol;
pub mod server;

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};

pub use config::Settings;
pub use handlers::Handlers;
pub use server::Server;

/// Open the configured store and bind a server for it.
pub async fn bind(settings: &Settings) -> Result<Server> {
    let conn = studex_store::db::open_and_migrate(&settings.store.db_path)
        .with_context(|| format!("failed to open store {}", settings.store.db_path.display()))?;

    let handlers = Handlers::new(
        Arc::new(Mutex::new(conn)),
        settings.aggregation.empty_policy,
    );
    Server::bind(&settings.server, handlers).await
}
