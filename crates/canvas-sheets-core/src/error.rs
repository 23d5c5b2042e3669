//! Error types for canvas-sheets-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in canvas-sheets-core
#[derive(Debug, Error)]
pub enum Error {
    /// Column label is empty or contains non-letter characters
    #[error("Invalid column label: {0:?}")]
    InvalidColumnLabel(String),

    /// Cell reference is missing letters or digits, or the row is malformed
    #[error("Invalid cell reference: {0:?}")]
    InvalidCellReference(String),

    /// Range string is not of the form `region[cell]` or `region[cell:cell]`
    #[error("Invalid range format: {0:?}")]
    InvalidRangeFormat(String),

    /// Label band name is not one of top/bottom/left/right
    #[error("Unknown label band: {0}")]
    UnknownLabelBand(String),

    /// Sheet not found by id
    #[error("Unknown sheet id: {0}")]
    SheetNotFound(String),

    /// Table not found by id
    #[error("Unknown table id: {0}")]
    TableNotFound(String),

    /// Formula mode other than "spreadsheet"
    #[error("Unsupported formula mode: {0:?}")]
    UnsupportedFormulaMode(String),

    /// Aggregation name not in sum/avg/min/max/count
    #[error("Unsupported aggregation: {0:?}")]
    UnsupportedAggregation(String),

    /// Summary spec with no value columns
    #[error("Summary table requires at least one value column")]
    EmptySummaryValues,

    /// Date or time literal that does not parse as ISO-8601
    #[error("Invalid {kind} literal: {text:?}")]
    InvalidTemporal {
        kind: &'static str,
        text: String,
    },
}
