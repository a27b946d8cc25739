//! shopsnap CLI - crawler snapshot renderer for hash-routed storefronts
//!
//! This is the main entry point for the shopsnap command-line interface.
//! Command implementations live in the `commands` module, one file per
//! subcommand.

use anyhow::{Context, Result};
use clap::Parser;
use shopsnap_core::{Catalog, StoreConfig};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod cli;
mod commands;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli)?;
    execute_command(cli).await
}

fn initialize_logging(cli: &Cli) -> Result<()> {
    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

async fn execute_command(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let mut catalog = Catalog::new(config)?;

    match cli.command {
        Commands::Render {
            fragment,
            url,
            format,
        } => commands::render_snapshot(&mut catalog, fragment, url, format).await,
        Commands::Probe => commands::probe_api(&mut catalog).await,
        Commands::Profile => commands::show_profile(&mut catalog).await,
    }
}

fn load_config(cli: &Cli) -> Result<StoreConfig> {
    match &cli.config {
        Some(path) => StoreConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display())),
        None => StoreConfig::from_env()
            .context("no --config file given and SHOPSNAP_* environment is incomplete"),
    }
}
