use thiserror::Error;

/// Fatal errors raised while obtaining or reading a document
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The document source could not deliver the document
    #[error("Unreachable source '{location}': {reason}")]
    UnreachableSource { location: String, reason: String },

    /// The text has no recognizable tabular structure
    #[error("Unparseable input: {0}")]
    UnparseableInput(String),

    /// Configuration error (invalid URL, bad property value, etc.)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DocumentError {
    pub(crate) fn unreachable(location: impl Into<String>, reason: impl ToString) -> Self {
        DocumentError::UnreachableSource {
            location: location.into(),
            reason: reason.to_string(),
        }
    }
}

/// Why a single table row was skipped.
///
/// Row errors never abort parsing; they are collected alongside the
/// placements that did parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("row could not be read: {0}")]
    Unreadable(String),

    #[error("expected at least {expected} cells, found {found}")]
    MissingField { expected: usize, found: usize },

    #[error("character cell is empty")]
    EmptyCharacter,

    #[error("character cell '{0}' holds more than one code point")]
    MultipleCharacters(String),

    #[error("{axis} coordinate '{value}' is not an integer")]
    InvalidCoordinate { axis: char, value: String },

    #[error("{axis} coordinate {value} is negative")]
    NegativeCoordinate { axis: char, value: i64 },

    #[error("{axis} coordinate {value} exceeds the maximum of {max}")]
    CoordinateTooLarge { axis: char, value: u64, max: u32 },
}

/// Type alias for Results using DocumentError
pub type Result<T> = std::result::Result<T, DocumentError>;
