//! Document input module
//!
//! Everything between "some text arrived" and "here are the placements".
//!
//! Structure:
//! - `source.rs`: `DocumentSource` trait and its HTTP/file/in-memory implementations
//! - `parse.rs`: HTML and delimited-text table parsing
//! - `table.rs`: placement, layout and parse result types
//! - `error.rs`: Error types

pub mod error;
pub mod parse;
pub mod source;
pub mod table;

// Re-exports for convenience
pub use error::{DocumentError, Result, RowError};
pub use parse::{parse_document, ParseOptions};
pub use source::{validate_url, CachedSource, DocumentSource, FileSource, HttpSource, StaticSource};
pub use table::{CharacterPlacement, ColumnLayout, MalformedRow, ParsedTable, TableSummary};
