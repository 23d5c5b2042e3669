//! # canvas-sheets-formula
//!
//! Formula parsing and evaluation for canvas-sheets.
//!
//! The formula surface is a small spreadsheet expression language over the
//! canvas-sheets document model: arithmetic and comparison operators, a
//! function library (SUM, AVERAGE, IF, PMT, ...), and references with
//! relative/absolute addressing (`A0`, `$A$0`), rectangular ranges
//! (`A0:B2`), region qualifiers (`top_labels[A0]`), cross-table qualifiers
//! (`table_1::A0`, `table_1::A`, `table_1::2`) and the `COL(...)`/`ROW(...)`
//! whole-column/row forms.
//!
//! ## Example
//!
//! ```rust
//! use canvas_sheets_core::Project;
//! use canvas_sheets_formula::{evaluate, parse_formula, EvalContext, Value};
//!
//! let mut project = Project::new();
//! project.add_sheet("Sheet 1", "sheet_1");
//! let table = project
//!     .add_table("sheet_1", "table_1", "table_1", 0.0, 0.0, 2, 2, None)
//!     .unwrap();
//! table.set_cells([("body[A0]", 2.0), ("body[B0]", 3.0)]);
//!
//! let ast = parse_formula("=A0*B0").unwrap();
//! let table = project.table("table_1").unwrap();
//! let ctx = EvalContext::new(&project, table, 0, 0, 0, 0);
//! assert_eq!(evaluate(&ast, &ctx).unwrap(), Value::Number(6.0));
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod parser;

pub use ast::{BinaryOp, CellRef, Expr, Reference, UnaryOp};
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{evaluate, EvalContext, Value};
pub use parser::parse_formula;
