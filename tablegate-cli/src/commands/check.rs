//! Connectivity probe: resolve config, take one connection, run `SELECT 1`

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use tablegate_server::db::{close_pool, create_pool, pool::ping};

use super::{resolve_config, DatabaseArgs};

#[derive(Parser, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub db: DatabaseArgs,
}

pub async fn run_check(config_path: Option<&Path>, args: CheckArgs) -> Result<()> {
    let config = resolve_config(config_path, args.db, None)?;
    let target = config.database.describe();

    let pool = create_pool(&config.database).context("Failed to create database pool")?;
    let result = ping(&pool).await;
    close_pool(&pool).await;

    result.with_context(|| format!("Cannot reach database {}", target))?;
    println!("ok: connected to {}", target);
    Ok(())
}
