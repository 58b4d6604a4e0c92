//! tablegate CLI - HTTP-to-SQL bridge for the sample CRM tables
//!
//! This is the main entry point for the `tablegate` binary, which provides:
//! - The HTTP server (`serve`)
//! - A database connectivity probe (`check`)
//! - Resolved configuration inspection (`config`)

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "tablegate",
    author,
    version,
    about = "HTTP-to-SQL bridge exposing CRUD endpoints over agents, companies and customers",
    long_about = "Serve list/create/update/delete endpoints over a MySQL or MariaDB database. \
                  Every request is validated and executed as a single parameterized statement \
                  on a bounded connection pool."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG still wins when set)
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (default: $TABLEGATE_CONFIG or ~/.tablegate/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::serve::ServeArgs),
    /// Open one pooled connection and run `SELECT 1`
    Check(commands::check::CheckArgs),
    /// Inspect resolved configuration
    Config(commands::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load but don't fail if there is no .env
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Serve(args) => commands::run_serve(config_path, args).await?,
        Commands::Check(args) => commands::run_check(config_path, args).await?,
        Commands::Config(args) => commands::run_config(config_path, args)?,
    }
    Ok(())
}
