//! Convenient re-exports for typical usage
//!
//! ```rust
//! use canvas_sheets::prelude::*;
//! ```

pub use crate::calculation::{ApplyStats, ProjectCalculationExt};
pub use canvas_sheets_core::{
    address, date_value, time_value, Aggregation, CellValue, Error, GridRange, LabelBand,
    LabelBands, Project, Result, Sheet, SummarySpec, Table, ValueColumn,
};
pub use canvas_sheets_formula::{parse_formula, FormulaError, Value};
