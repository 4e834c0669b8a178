//! Run configuration from properties
//!
//! All default values come from properties.json via `PropertyReader`; no
//! hardcoded fallbacks in this code.

use crate::document::{ColumnLayout, DocumentError, ParseOptions, Result};
use crate::properties::PropertyReader;
use crate::render::{CollisionPolicy, Origin, RenderOptions};

/// Hard ceiling for `max.coordinate`; the grid holds (max + 1)^2 cells,
/// about 21 MB at this limit
const MAX_COORDINATE_LIMIT: u32 = 2_048;

#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Published document to fetch (HTTP mode only)
    pub source_url: String,

    /// Column layout and coordinate limits for the parser
    pub parse: ParseOptions,

    /// Blank character, origin and collision policy for the renderer
    pub render: RenderOptions,
}

impl RenderConfig {
    /// Create config from properties
    ///
    /// Enumerated and numeric properties fall back to their defaults when
    /// invalid. Column order and blank character have no sensible fallback
    /// and are reported as configuration errors.
    pub fn from_properties(props: &PropertyReader) -> Result<Self> {
        let source_url = props.get_string("source.url");

        let layout = ColumnLayout::parse(&props.get_string("column.order"))?;
        let max_coordinate = props.get_u32_in_range("max.coordinate", 1, MAX_COORDINATE_LIMIT);

        let blank = single_char(&props.get_string("blank.character")).ok_or_else(|| {
            DocumentError::Config(format!(
                "blank.character must be exactly one character, got '{}'",
                props.get_string("blank.character")
            ))
        })?;
        let origin = Origin::parse(&props.get_enum("origin"));
        let collision = CollisionPolicy::parse(&props.get_enum("collision"));

        Ok(Self {
            source_url,
            parse: ParseOptions {
                layout,
                max_coordinate,
            },
            render: RenderOptions {
                blank,
                origin,
                collision,
            },
        })
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
