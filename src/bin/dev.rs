//! Hidden Grid - Development entry point
//!
//! Renders a document saved on disk instead of fetching it, for offline work
//! and for checking new table layouts.
//!
//! Usage:
//! ```bash
//! cargo run --bin dev -- --file saved_doc.html --origin bottom-left
//! RUST_LOG=debug cargo run --bin dev -- --file rows.csv --columns character,x,y
//! ```

use anyhow::{bail, Context};
use hidden_grid::cli;
use hidden_grid::config::RenderConfig;
use hidden_grid::document::FileSource;
use hidden_grid::{logging, pipeline};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let cli = cli::parse_args(&args);
    if cli.help {
        print!("{}", cli::usage("dev"));
        println!("  --file <path>      Local document to render (required)");
        return Ok(());
    }

    let Some(path) = cli.file.clone() else {
        bail!("--file <path> is required (see --help)");
    };

    let config = RenderConfig::from_properties(&cli.properties)
        .context("Failed to load configuration")?;

    let source = FileSource::new(path);
    let message = pipeline::run(&source, &config)
        .await
        .context("Failed to render hidden message")?;

    for skipped in &message.table.skipped {
        tracing::info!("  row {}: {}", skipped.row, skipped.reason);
    }
    tracing::info!("Summary: {}", message.table.summary());

    println!("{}", message.text());
    Ok(())
}
