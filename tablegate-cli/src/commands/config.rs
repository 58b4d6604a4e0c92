use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tablegate_core::TablegateConfig;

use super::{resolve_config, DatabaseArgs};

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the resolved configuration as TOML (passwords masked)
    Show(ShowArgs),
    /// Show default config file path
    Path,
}

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Bind address override, as `serve` would apply it
    #[arg(long, short = 'b', env = "TABLEGATE_BIND")]
    pub bind: Option<SocketAddr>,

    #[command(flatten)]
    pub db: DatabaseArgs,
}

pub fn run_config(config_path: Option<&Path>, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show(args) => run_show(config_path, args),
        ConfigCommands::Path => {
            println!("{}", TablegateConfig::default_path().display());
            Ok(())
        }
    }
}

fn run_show(config_path: Option<&Path>, args: ShowArgs) -> Result<()> {
    let config = resolve_config(config_path, args.db, args.bind)?;
    let rendered = config
        .to_toml_redacted()
        .context("Failed to render configuration")?;
    print!("{}", rendered);
    Ok(())
}
