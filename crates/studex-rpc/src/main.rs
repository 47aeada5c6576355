//! studex server
//!
//! Long-running JSON-RPC service over the student store.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use studex_core::logging_facility;
use studex_rpc::Settings;

#[derive(Debug, Parser)]
#[command(name = "studex-server")]
#[command(about = "Student statistics JSON-RPC server", long_about = None)]
struct Args {
    /// Config file (defaults to config/studex.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the bind address
    #[arg(long)]
    bind: Option<String>,

    /// Override the database path
    #[arg(long)]
    db: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut settings =
        Settings::load_from(args.config.as_deref()).context("failed to load configuration")?;
    if let Some(bind) = args.bind {
        settings.server.bind_addr = bind;
    }
    if let Some(db) = args.db {
        settings.store.db_path = db;
    }

    logging_facility::init(settings.logging.profile);
    info!(
        db = %settings.store.db_path.display(),
        empty_policy = settings.aggregation.empty_policy.as_str(),
        "starting studex server"
    );

    let server = studex_rpc::bind(&settings).await?;
    server
        .run_until(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
}
