use super::error::{DocumentError, Result, RowError};

/// A single character positioned on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharacterPlacement {
    pub character: char,
    pub x: u32,
    pub y: u32,
}

impl CharacterPlacement {
    pub fn new(character: char, x: u32, y: u32) -> Self {
        CharacterPlacement { character, x, y }
    }
}

/// Column roles within a table row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Character,
    X,
    Y,
}

impl ColumnRole {
    /// Match a header cell against the names a published table may use
    fn from_header(cell: &str) -> Option<Self> {
        match cell.trim().to_lowercase().as_str() {
            "x" | "x-coordinate" | "x coordinate" => Some(ColumnRole::X),
            "y" | "y-coordinate" | "y coordinate" => Some(ColumnRole::Y),
            "character" | "char" | "glyph" => Some(ColumnRole::Character),
            _ => None,
        }
    }
}

/// Which cell index holds each field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub character: usize,
    pub x: usize,
    pub y: usize,
}

impl Default for ColumnLayout {
    /// x-coordinate, character, y-coordinate: the order of the published document
    fn default() -> Self {
        ColumnLayout {
            x: 0,
            character: 1,
            y: 2,
        }
    }
}

impl ColumnLayout {
    /// Parse a comma-separated role list such as `"x,character,y"`
    pub fn parse(order: &str) -> Result<Self> {
        let roles: Vec<&str> = order.split(',').map(str::trim).collect();
        if roles.len() != 3 {
            return Err(DocumentError::Config(format!(
                "Column order '{}' must name exactly three columns",
                order
            )));
        }

        Self::from_roles(roles.iter().map(|r| ColumnRole::from_header(r))).ok_or_else(|| {
            DocumentError::Config(format!(
                "Column order '{}' must name x, y and character once each",
                order
            ))
        })
    }

    /// Derive the layout from a header row, if every role is named
    pub fn from_header<S: AsRef<str>>(cells: &[S]) -> Option<Self> {
        Self::from_roles(cells.iter().map(|c| ColumnRole::from_header(c.as_ref())))
    }

    fn from_roles(roles: impl Iterator<Item = Option<ColumnRole>>) -> Option<Self> {
        let (mut character, mut x, mut y) = (None, None, None);

        for (idx, role) in roles.enumerate() {
            let slot = match role {
                Some(ColumnRole::Character) => &mut character,
                Some(ColumnRole::X) => &mut x,
                Some(ColumnRole::Y) => &mut y,
                None => continue,
            };
            if slot.replace(idx).is_some() {
                return None;
            }
        }

        Some(ColumnLayout {
            character: character?,
            x: x?,
            y: y?,
        })
    }

    /// Minimum number of cells a row needs to fill every role
    pub fn required_cells(&self) -> usize {
        self.character.max(self.x).max(self.y) + 1
    }
}

/// A row that was skipped during parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRow {
    /// 1-based row number within the table
    pub row: usize,
    pub reason: RowError,
}

/// Parsed contents of a coordinate table
#[derive(Debug, Clone, Default)]
pub struct ParsedTable {
    /// Valid placements in order of appearance
    pub placements: Vec<CharacterPlacement>,
    pub skipped: Vec<MalformedRow>,
    pub layout: ColumnLayout,
}

impl ParsedTable {
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn summary(&self) -> TableSummary {
        TableSummary {
            placements: self.placements.len(),
            skipped: self.skipped.len(),
            width: self.placements.iter().map(|p| p.x as usize + 1).max().unwrap_or(0),
            height: self.placements.iter().map(|p| p.y as usize + 1).max().unwrap_or(0),
        }
    }
}

/// Summary statistics for a parsed table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSummary {
    pub placements: usize,
    pub skipped: usize,
    pub width: usize,
    pub height: usize,
}

impl std::fmt::Display for TableSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TableSummary {{ placements: {}, skipped: {}, grid: {}x{} }}",
            self.placements, self.skipped, self.width, self.height
        )
    }
}
