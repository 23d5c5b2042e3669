//! # canvas-sheets-core
//!
//! Core document model for the canvas-sheets calculation engine.
//!
//! This crate provides the fundamental types used throughout canvas-sheets:
//! - Address codec: [`column_index`], [`column_label`], [`parse_cell`],
//!   [`address`] and [`GridRange`]
//! - [`CellValue`] - typed cell values (numbers, strings, booleans, dates,
//!   times, the evaluation-error sentinel)
//! - [`Table`], [`Sheet`], [`Project`] - the document structures
//! - [`SummarySpec`] / [`Aggregation`] - derived group-by tables
//!
//! Address keys and the formula reference grammar are zero-based:
//! `body[A0]` names row 0, column 0 of a table's body. Human-facing labels
//! (`A1` for row 0) come from [`display_label`] only.
//!
//! ## Example
//!
//! ```rust
//! use canvas_sheets_core::{CellValue, Project};
//!
//! let mut project = Project::new();
//! project.add_sheet("Sheet 1", "sheet_1");
//! let table = project
//!     .add_table("sheet_1", "table_1", "table_1", 0.0, 0.0, 2, 2, None)
//!     .unwrap();
//!
//! table.set_cells([("body[A0]", 1.0), ("body[B0]", 2.0)]);
//! assert_eq!(table.get(0, 1), CellValue::Number(2.0));
//! ```

pub mod address;
pub mod error;
pub mod grid;
pub mod project;
pub mod sheet;
pub mod summary;
pub mod table;
pub mod value;

// Re-exports for convenience
pub use address::{
    address, cell_key, column_index, column_label, display_label, parse_cell, GridRange,
};
pub use error::{Error, Result};
pub use grid::{GridSpec, LabelBand, LabelBands, Rect, CELL_HEIGHT, CELL_WIDTH};
pub use project::Project;
pub use sheet::Sheet;
pub use summary::{Aggregation, SummarySpec, ValueColumn};
pub use table::{FormulaDef, FormulaMode, RangeValue, Table, DEFAULT_COLUMN_TYPE};
pub use value::{date_value, time_value, CellValue, ERROR_SENTINEL};
