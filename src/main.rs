//! CLI entry point for the storefront tool.

use anyhow::{Context, Result};
use clap::Parser;
use storefront_core::Catalog;
use tracing::{debug, info};

mod app_config;
mod cli;
mod commands;
mod output;

use app_config::{ResolvedSettings, load_default_file_config, resolve_settings};
use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let cli = Cli::parse();

    let loaded_config = load_default_file_config()?;
    let download_args = match &cli.command {
        Some(Command::Download(args)) => Some(args),
        _ => None,
    };
    let settings = resolve_settings(&cli, download_args, loaded_config.config.as_ref());

    // Priority: RUST_LOG env var > quiet flag > verbose flag > config verbosity > info
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(settings.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?cli, "CLI arguments parsed");
    if loaded_config.loaded_from_file()
        && let Some(path) = &loaded_config.path
    {
        debug!(path = %path.display(), "config file loaded");
    }

    let Some(command) = cli.command.as_ref() else {
        output::print_quick_start_guidance();
        return Ok(());
    };

    let catalog = load_catalog(&settings)?;
    info!(items = catalog.len(), "catalog ready");

    match command {
        Command::Search(args) => commands::run_search_command(&catalog, args),
        Command::Discover(args) => commands::run_discover_command(&catalog, args),
        Command::List(args) => commands::run_list_command(&catalog, args),
        Command::Show(args) => commands::run_show_command(&catalog, args),
        Command::Download(args) => {
            commands::run_download_command(&catalog, args, &settings, !cli.quiet).await
        }
        Command::Config => commands::run_config_show_command(&loaded_config, &settings),
    }
}

fn load_catalog(settings: &ResolvedSettings) -> Result<Catalog> {
    match &settings.catalog {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("Failed to load catalog '{}'", path.display())),
        None => Catalog::builtin().context("Built-in catalog is invalid"),
    }
}
