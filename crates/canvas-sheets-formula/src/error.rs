//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur during formula parsing or evaluation
///
/// Evaluation errors are caught per target cell by the calculation pass and
/// written as the error-sentinel cell value; they never abort the pass.
#[derive(Debug, Error)]
pub enum FormulaError {
    /// Character the tokenizer cannot start a token with
    #[error("Unexpected character {ch:?} at position {pos}")]
    UnexpectedCharacter { ch: char, pos: usize },

    /// Well-formed token in a position the grammar does not allow
    #[error("Unexpected token {found:?} at position {pos}")]
    UnexpectedToken { found: String, pos: usize },

    /// Malformed cell/column reference inside a formula
    #[error("Invalid reference: {0}")]
    Reference(#[from] canvas_sheets_core::Error),

    /// Function name not in the registry
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Wrong number of arguments
    #[error("{function} expects {expected} argument(s), got {actual}")]
    ArityMismatch {
        function: String,
        expected: String,
        actual: usize,
    },

    /// Range-shaped operand where a single value is required
    #[error("Expected a single value, got a range of {0} elements")]
    ScalarExpected(usize),

    /// Operand that does not coerce to a number
    #[error("Cannot use {0} as a number")]
    NotNumeric(String),

    /// Condition that does not coerce to a boolean
    #[error("Cannot use {0} as a condition")]
    NotBoolean(String),

    /// Input outside a function's mathematical domain
    #[error("Domain error: {0}")]
    Domain(String),

    /// Zero divisor in `/` or a zero-period PMT
    #[error("Division by zero")]
    DivisionByZero,

    /// Relative reference resolved to a negative row or column
    #[error("Reference resolves outside the grid")]
    OutOfBounds,

    /// Cross-table reference to an id the project does not contain
    #[error("Unknown table id: {0}")]
    UnknownTable(String),
}
