//! Shared fetch → parse → render pipeline
//!
//! Used by both the HTTP (main.rs) and local-file (dev.rs) entry points.
//!
//! The pipeline:
//! 1. Fetches raw text from a `DocumentSource`
//! 2. Parses it into character placements and renders them onto a grid
//!    (`render_text`, also usable on text fetched elsewhere)

use crate::config::RenderConfig;
use crate::document::{parse_document, DocumentSource, ParsedTable, Result};
use crate::render::Grid;

/// Result of a pipeline run
#[derive(Debug, Clone)]
pub struct RenderedMessage {
    pub table: ParsedTable,
    pub grid: Grid,
}

impl RenderedMessage {
    pub fn text(&self) -> String {
        self.grid.render()
    }
}

/// Parse and render already-fetched text
pub fn render_text(text: &str, config: &RenderConfig) -> Result<RenderedMessage> {
    let table = parse_document(text, &config.parse)?;
    report_skipped(&table);

    let grid = Grid::from_placements(&table.placements, &config.render);
    Ok(RenderedMessage { table, grid })
}

fn report_skipped(table: &ParsedTable) {
    if !table.skipped.is_empty() {
        tracing::warn!(
            "{} malformed row(s) skipped (run with RUST_LOG=debug for details)",
            table.skipped.len()
        );
    }
}

/// Fetch a document from `source` and render the message it encodes
///
/// Source and parse failures are fatal and returned as-is; nothing is retried.
pub async fn run<S: DocumentSource>(source: &S, config: &RenderConfig) -> Result<RenderedMessage> {
    let t0 = std::time::Instant::now();

    tracing::info!("[1/2] Fetching document from {}", source.location());
    let text = source.fetch().await?;
    tracing::info!("  Fetched {} bytes in {:.3}s", text.len(), t0.elapsed().as_secs_f64());

    tracing::info!("[2/2] Parsing and rendering...");
    let message = render_text(&text, config)?;
    tracing::info!(
        "  Grid {}x{} ({} placements) in {:.3}s",
        message.grid.width(),
        message.grid.height(),
        message.table.placements.len(),
        t0.elapsed().as_secs_f64()
    );

    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{CachedSource, DocumentError, StaticSource};
    use crate::properties::PropertyReader;

    fn default_config() -> RenderConfig {
        RenderConfig::from_properties(&PropertyReader::default()).unwrap()
    }

    #[tokio::test]
    async fn test_run_renders_html_table() {
        let html = "<html><body><table>\
            <tr><td>x-coordinate</td><td>Character</td><td>y-coordinate</td></tr>\
            <tr><td>0</td><td>H</td><td>0</td></tr>\
            <tr><td>1</td><td>i</td><td>0</td></tr>\
            <tr><td>1</td><td>!</td><td>1</td></tr>\
            </table></body></html>";

        let message = run(&StaticSource::new(html), &default_config())
            .await
            .unwrap();
        assert_eq!(message.text(), "Hi\n !");
        assert!(message.table.skipped.is_empty());
    }

    #[tokio::test]
    async fn test_run_tolerates_malformed_rows() {
        let message = run(&StaticSource::new("0,A,0\nzero,B,0\n"), &default_config())
            .await
            .unwrap();
        assert_eq!(message.table.placements.len(), 1);
        assert_eq!(message.table.skipped.len(), 1);
        assert_eq!(message.text(), "A");
    }

    #[tokio::test]
    async fn test_run_propagates_unparseable_input() {
        let result = run(&StaticSource::new(""), &default_config()).await;
        assert!(matches!(result, Err(DocumentError::UnparseableInput(_))));
    }

    #[test]
    fn test_render_text_bottom_left() {
        let props = PropertyReader::new([("origin", "bottom-left")]);
        let config = RenderConfig::from_properties(&props).unwrap();

        let message = render_text("0,█,0\n0,▀,1\n1,█,0\n", &config).unwrap();
        assert_eq!(message.text(), "▀ \n██");
    }

    #[test]
    fn test_render_text_header_only() {
        let message = render_text("x,character,y\n", &default_config()).unwrap();
        assert_eq!(message.text(), "");
        assert_eq!(message.grid.height(), 0);
    }

    #[tokio::test]
    async fn test_run_matches_render_text() {
        let text = "x,character,y\n0,O,0\n1,K,0\n";
        let config = default_config();

        let fetched = run(&StaticSource::new(text), &config).await.unwrap();
        let direct = render_text(text, &config).unwrap();
        assert_eq!(fetched.grid, direct.grid);
        assert_eq!(fetched.table.placements, direct.table.placements);
        assert_eq!(fetched.table.skipped, direct.table.skipped);
    }

    #[tokio::test]
    async fn test_run_through_cached_source() {
        let source = CachedSource::new(StaticSource::new("0,A,0\n1,B,0\n"));
        let first = run(&source, &default_config()).await.unwrap();
        assert!(source.is_cached());

        let second = run(&source, &default_config()).await.unwrap();
        assert_eq!(first.text(), "AB");
        assert_eq!(first.text(), second.text());
    }
}
