//! Database connection pool management
//!
//! Uses sqlx MySqlPool with an explicit connection ceiling. The pool is
//! built once at startup, handed to the store, and closed after the server
//! stops accepting requests.

use std::str::FromStr;
use std::time::Duration;

use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use tablegate_core::DatabaseConfig;

use super::DbError;

/// Build connect options from config, preferring `url` when set.
pub fn connect_options(config: &DatabaseConfig) -> Result<MySqlConnectOptions, DbError> {
    match &config.url {
        Some(url) => Ok(MySqlConnectOptions::from_str(url)?),
        None => Ok(MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database)),
    }
}

/// Create a MySQL connection pool.
///
/// Connections are opened on first use, so the server can come up before
/// the database does. Requests beyond `max_connections` wait for a free
/// connection up to `acquire_timeout_secs`.
///
/// Must be called from within a Tokio runtime.
pub fn create_pool(config: &DatabaseConfig) -> Result<MySqlPool, DbError> {
    let options = connect_options(config)?;
    tracing::info!(
        database = %config.describe(),
        max_connections = config.max_connections,
        "creating connection pool"
    );

    Ok(MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_lazy_with(options))
}

/// Acquire one connection and run `SELECT 1` on it.
pub async fn ping(pool: &MySqlPool) -> Result<(), DbError> {
    let mut conn = pool.acquire().await?;
    sqlx::query("SELECT 1").execute(&mut *conn).await?;
    Ok(())
}

/// Wait for checked-out connections to come back, then close them all.
pub async fn close_pool(pool: &MySqlPool) {
    tracing::info!(
        idle = pool.num_idle(),
        size = pool.size(),
        "closing connection pool"
    );
    pool.close().await;
}
