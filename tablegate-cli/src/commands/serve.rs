//! HTTP server command
//!
//! Builds the pool once, serves until Ctrl+C/SIGTERM, then closes the pool.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use tablegate_server::db::{close_pool, create_pool, MySqlStore};
use tablegate_server::http::{run_server, AppState, ServerConfig};

use super::{resolve_config, DatabaseArgs};

/// How long the startup probe waits before giving up
const STARTUP_PROBE: Duration = Duration::from_secs(5);

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 0.0.0.0:3000)
    #[arg(long, short = 'b', env = "TABLEGATE_BIND")]
    pub bind: Option<SocketAddr>,

    #[command(flatten)]
    pub db: DatabaseArgs,
}

/// Run the HTTP server
pub async fn run_serve(config_path: Option<&Path>, args: ServeArgs) -> Result<()> {
    let config = resolve_config(config_path, args.db, args.bind)?;

    tracing::info!("Starting tablegate server on {}", config.server.bind);

    let pool = create_pool(&config.database).context("Failed to create database pool")?;
    let store = MySqlStore::new(pool.clone());

    // Connections are lazy; probe once so a bad config shows up in the log
    match tokio::time::timeout(STARTUP_PROBE, store.ping()).await {
        Ok(Ok(())) => tracing::info!(database = %config.database.describe(), "database reachable"),
        Ok(Err(e)) => tracing::warn!("database not reachable yet: {}", e),
        Err(_) => tracing::warn!("database did not answer within {:?}", STARTUP_PROBE),
    }

    let server_config = ServerConfig {
        bind_addr: config.server.bind,
    };

    // Run server (blocks until shutdown), then drain the pool either way
    let result = run_server(AppState::new(Arc::new(store)), server_config).await;
    close_pool(&pool).await;
    result.context("Server error")?;

    Ok(())
}
