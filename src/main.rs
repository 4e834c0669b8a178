//! Hidden Grid - Main entry point
//!
//! Fetches the published coordinate table over HTTP, renders it, and prints
//! the grid to stdout.
//!
//! Usage:
//! ```bash
//! cargo run -- --url https://docs.google.com/document/d/e/<id>/pub --origin bottom-left
//! ```

use anyhow::Context;
use hidden_grid::cli::{self, URL_ENV_VAR};
use hidden_grid::config::RenderConfig;
use hidden_grid::document::{CachedSource, HttpSource};
use hidden_grid::{logging, pipeline};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let mut cli = cli::parse_args(&args);
    if cli.help {
        print!("{}", cli::usage("hidden_grid"));
        return Ok(());
    }
    cli::apply_env(&mut cli, std::env::var(URL_ENV_VAR).ok());

    let config = RenderConfig::from_properties(&cli.properties)
        .context("Failed to load configuration")?;

    tracing::info!("Hidden Grid v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("  Source: {}", config.source_url);
    tracing::info!(
        "  Origin: {:?}, collision: {:?}",
        config.render.origin,
        config.render.collision
    );

    let source = CachedSource::new(
        HttpSource::new(&config.source_url)
            .with_context(|| format!("Cannot use source URL '{}'", config.source_url))?,
    );

    let message = pipeline::run(&source, &config)
        .await
        .context("Failed to render hidden message")?;

    println!("{}", message.text());
    Ok(())
}
