//! # canvas-sheets
//!
//! A spreadsheet-style calculation engine: sheets of grid-shaped tables, a
//! formula language with relative/absolute and cross-table addressing, a
//! spreadsheet function library, and derived group-by summary tables.
//!
//! Mutations go through the explicit table API (`set_cells`, `set_range`,
//! `set_formula`, ...); [`ProjectCalculationExt::apply_formulas`]
//! re-evaluates every formula and summary table in definition order and
//! writes the results back into the document.
//!
//! ## Example
//!
//! ```rust
//! use canvas_sheets::prelude::*;
//!
//! let mut project = Project::new();
//! project.add_sheet("Sheet 1", "sheet_1");
//! let table = project
//!     .add_table("sheet_1", "table_1", "table_1", 0.0, 0.0, 3, 3, None)
//!     .unwrap();
//!
//! table.set_range("body[A0:B2]", vec![
//!     vec![1.0, 10.0],
//!     vec![2.0, 20.0],
//!     vec![3.0, 30.0],
//! ], None);
//! table.set_formula("body[C0:C2]", "=A0+B0").unwrap();
//!
//! project.apply_formulas().unwrap();
//!
//! let table = project.table("table_1").unwrap();
//! assert_eq!(table.get(2, 2), CellValue::Number(33.0));
//! ```

pub mod calculation;
pub mod prelude;

// Re-export calculation types
pub use calculation::{ApplyStats, ProjectCalculationExt};

// Re-export core types
pub use canvas_sheets_core::{
    address,
    cell_key,
    column_index,
    column_label,
    date_value,
    display_label,
    parse_cell,
    time_value,
    Aggregation,
    CellValue,
    Error,
    FormulaDef,
    FormulaMode,
    GridRange,
    GridSpec,
    LabelBand,
    LabelBands,
    Project,
    RangeValue,
    Rect,
    Result,
    Sheet,
    SummarySpec,
    Table,
    ValueColumn,
    CELL_HEIGHT,
    CELL_WIDTH,
    DEFAULT_COLUMN_TYPE,
    ERROR_SENTINEL,
};

// Re-export formula types
pub use canvas_sheets_formula::{
    evaluate, parse_formula, EvalContext, Expr, FormulaError, FormulaResult, Reference, Value,
};
