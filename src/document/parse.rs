//! Coordinate table parsing
//!
//! Turns a raw document body into an ordered list of [`CharacterPlacement`]s.
//! Two layouts are recognized:
//! - HTML documents containing a `<table>` (the published Google Docs format)
//! - Delimited text, one row per line (tab, comma, semicolon, pipe or whitespace)
//!
//! Individual rows that fail validation are skipped and recorded as
//! [`MalformedRow`]s. Only a document without any tabular structure is an error.

use super::error::{DocumentError, Result, RowError};
use super::table::{CharacterPlacement, ColumnLayout, MalformedRow, ParsedTable};
use csv::{ReaderBuilder, Trim};
use scraper::{Html, Selector};

/// Candidate delimiters, in tie-break order
const DELIMITERS: [u8; 4] = [b'\t', b',', b';', b'|'];

type RawRow = std::result::Result<Vec<String>, RowError>;

/// Options controlling how rows are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Layout used when the table has no recognizable header row
    pub layout: ColumnLayout,
    /// Largest accepted coordinate on either axis
    pub max_coordinate: u32,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            layout: ColumnLayout::default(),
            max_coordinate: 1024,
        }
    }
}

/// Parse a document body into character placements
///
/// Placements keep their order of appearance. A table that yields zero valid
/// rows is a valid (empty) result.
pub fn parse_document(text: &str, options: &ParseOptions) -> Result<ParsedTable> {
    if text.trim().is_empty() {
        return Err(DocumentError::UnparseableInput(
            "document is empty".to_string(),
        ));
    }

    let rows = if contains_tag(text, "<table") {
        html_rows(text)?
    } else if ["<html", "<body", "<!doctype"]
        .iter()
        .any(|tag| contains_tag(text, tag))
    {
        return Err(DocumentError::UnparseableInput(
            "HTML document contains no <table> element".to_string(),
        ));
    } else {
        delimited_rows(text, options.layout.required_cells())?
    };

    let table = rows_to_table(rows, options);
    tracing::info!("Parsed coordinate table: {}", table.summary());
    Ok(table)
}

fn contains_tag(text: &str, tag: &str) -> bool {
    text.to_ascii_lowercase().contains(tag)
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| {
        DocumentError::UnparseableInput(format!("Invalid selector '{}': {:?}", css, e))
    })
}

/// Extract the cell text of every row in the first `<table>`
fn html_rows(text: &str) -> Result<Vec<RawRow>> {
    let document = Html::parse_document(text);
    let table_selector = selector("table")?;
    let row_selector = selector("tr")?;
    let cell_selector = selector("td, th")?;

    let table = document.select(&table_selector).next().ok_or_else(|| {
        DocumentError::UnparseableInput("HTML document contains no <table> element".to_string())
    })?;

    let rows: Vec<RawRow> = table
        .select(&row_selector)
        .map(|row| {
            Ok(row
                .select(&cell_selector)
                .map(|cell| cell.text().collect::<String>().trim().to_string())
                .collect())
        })
        .collect();

    if rows.is_empty() {
        return Err(DocumentError::UnparseableInput(
            "table has no rows".to_string(),
        ));
    }

    Ok(rows)
}

/// Split delimited text into rows
///
/// Blank lines are dropped first so row numbers match in every mode. The
/// delimiter is the one that splits the most lines into at least
/// `min_fields` cells; a delimiter that only appears as a glyph (`0 , 0`)
/// never yields enough cells and so never wins. Lines the chosen delimiter
/// leaves short are split on whitespace when that gives enough cells.
///
/// Fails when no line carries enough fields to be a table row.
fn delimited_rows(text: &str, min_fields: usize) -> Result<Vec<RawRow>> {
    let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();

    let rows: Vec<RawRow> = match pick_delimiter(&lines, min_fields) {
        Some(delimiter) => {
            tracing::debug!("Delimiter {:?} chosen", delimiter as char);
            let body = lines.join("\n");
            let mut reader = ReaderBuilder::new()
                .has_headers(false)
                .flexible(true)
                .quoting(false)
                .trim(Trim::All)
                .delimiter(delimiter)
                .from_reader(body.as_bytes());

            // Quoting is off and blank lines are gone: one record per line
            reader
                .records()
                .zip(&lines)
                .map(|(record, line)| -> RawRow {
                    let cells: Vec<String> = record
                        .map(|r| r.iter().map(str::to_string).collect())
                        .map_err(|e| RowError::Unreadable(e.to_string()))?;
                    if cells.len() < min_fields {
                        let spaced = whitespace_cells(line);
                        if spaced.len() >= min_fields {
                            return Ok(spaced);
                        }
                    }
                    Ok(cells)
                })
                .collect()
        }
        None => lines.iter().map(|line| Ok(whitespace_cells(line))).collect(),
    };

    let has_table_row = rows
        .iter()
        .any(|row| matches!(row, Ok(cells) if cells.len() >= min_fields));

    if !has_table_row {
        return Err(DocumentError::UnparseableInput(format!(
            "no line has at least {} fields",
            min_fields
        )));
    }

    Ok(rows)
}

/// Delimiter splitting the most lines into at least `min_fields` cells
///
/// Ties go to the earlier entry of `DELIMITERS`. None means whitespace.
fn pick_delimiter(lines: &[&str], min_fields: usize) -> Option<u8> {
    let mut best: Option<(u8, usize)> = None;

    for delimiter in DELIMITERS {
        let votes = lines
            .iter()
            .filter(|line| line.split(delimiter as char).count() >= min_fields)
            .count();
        if votes > best.map_or(0, |(_, v)| v) {
            best = Some((delimiter, votes));
        }
    }

    best.map(|(delimiter, _)| delimiter)
}

fn whitespace_cells(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

fn rows_to_table(rows: Vec<RawRow>, options: &ParseOptions) -> ParsedTable {
    let header_layout = match rows.first() {
        Some(Ok(cells)) => ColumnLayout::from_header(cells.as_slice()),
        _ => None,
    };
    let (layout, body_start) = match header_layout {
        Some(layout) => {
            tracing::debug!("Column layout taken from header row: {:?}", layout);
            (layout, 1)
        }
        None => (options.layout, 0),
    };

    let mut table = ParsedTable {
        layout,
        ..Default::default()
    };

    for (idx, row) in rows.iter().enumerate().skip(body_start) {
        let parsed = row
            .as_ref()
            .map_err(Clone::clone)
            .and_then(|cells| parse_row(cells, &layout, options.max_coordinate));

        match parsed {
            Ok(placement) => table.placements.push(placement),
            Err(reason) => {
                tracing::debug!(row = idx + 1, %reason, "Skipping malformed row");
                table.skipped.push(MalformedRow {
                    row: idx + 1,
                    reason,
                });
            }
        }
    }

    table
}

fn parse_row(
    cells: &[String],
    layout: &ColumnLayout,
    max_coordinate: u32,
) -> std::result::Result<CharacterPlacement, RowError> {
    let expected = layout.required_cells();
    if cells.len() < expected {
        return Err(RowError::MissingField {
            expected,
            found: cells.len(),
        });
    }

    let character = parse_character(&cells[layout.character])?;
    let x = parse_coordinate('x', &cells[layout.x], max_coordinate)?;
    let y = parse_coordinate('y', &cells[layout.y], max_coordinate)?;

    Ok(CharacterPlacement { character, x, y })
}

fn parse_character(cell: &str) -> std::result::Result<char, RowError> {
    let cell = cell.trim();
    let mut chars = cell.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Err(RowError::EmptyCharacter),
        (Some(c), None) => Ok(c),
        _ => Err(RowError::MultipleCharacters(cell.to_string())),
    }
}

fn parse_coordinate(
    axis: char,
    cell: &str,
    max_coordinate: u32,
) -> std::result::Result<u32, RowError> {
    let cell = cell.trim();
    let value: i64 = cell.parse().map_err(|_| RowError::InvalidCoordinate {
        axis,
        value: cell.to_string(),
    })?;

    if value < 0 {
        return Err(RowError::NegativeCoordinate { axis, value });
    }
    if value > i64::from(max_coordinate) {
        return Err(RowError::CoordinateTooLarge {
            axis,
            value: value as u64,
            max: max_coordinate,
        });
    }

    Ok(value as u32)
}
