// stall - terminal storefront widget
//
// A product gallery, a basket, a checkout form and a modal dialog, driven
// from a single terminal page.
//
// Architecture:
// - Event bus: typed publish/subscribe connecting everything below
// - Controllers (catalog, order): own basket and checkout state
// - Views (cards, basket, order form, modal): render page regions from
//   state and translate key gestures into bus events
// - TUI shell (ratatui): composites page regions, routes key input

mod bus;
mod cli;
mod config;
mod controllers;
mod events;
mod feed;
mod logging;
mod model;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use config::Config;
use tui::app::Storefront;
use tui::theme::Theme;

#[tokio::main]
async fn main() -> Result<()> {
    // Subcommands (config --show etc.) run and exit before any setup.
    let cli = cli::Cli::parse();
    if cli::handle_command(&cli) {
        return Ok(());
    }

    // Ensure a config template exists (helps users discover options)
    Config::ensure_config_exists();

    let mut config = Config::from_env();
    if let Some(theme) = &cli.theme {
        config.theme = theme.clone();
    }
    if let Some(path) = &cli.catalog {
        config.catalog_path = Some(path.clone());
    }

    // The guard must be kept alive so file logs flush on exit
    let _log_guard = logging::init(&config)?;

    let products = match &config.catalog_path {
        Some(path) => feed::load(path)?,
        None => feed::bundled()?,
    };
    tracing::info!(
        products = products.len(),
        theme = %config.theme,
        "starting storefront"
    );

    let app = Storefront::new(products, Theme::by_name(&config.theme))
        .context("Failed to assemble the storefront page")?;
    tui::run(app).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
