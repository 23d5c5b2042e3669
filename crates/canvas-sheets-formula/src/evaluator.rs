//! Formula evaluator
//!
//! Reduces a parsed AST to a value against a project, a home table and an
//! anchor/target cell pair. The anchor is the top-left of the formula's
//! declared target range; the target is the cell currently being computed.
//! Relative reference axes shift by `target - anchor`, absolute axes do not,
//! which is how one formula evaluated across a target rectangle produces
//! per-row results.

use crate::ast::{BinaryOp, CellRef, Expr, Reference, UnaryOp};
use crate::error::{FormulaError, FormulaResult};
use crate::functions;
use canvas_sheets_core::{CellValue, Project, Table, ERROR_SENTINEL};
use chrono::{NaiveDate, NaiveTime};

/// Value types during formula evaluation
///
/// Scalars plus one- and two-dimensional collections; whole columns/rows read
/// as `Array`, rectangular ranges as `Matrix`. Dates, times and empty cells
/// carry through but do not coerce to numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Bool(bool),
    Date(NaiveDate),
    Time(NaiveTime),
    Empty,
    Array(Vec<Value>),
    Matrix(Vec<Vec<Value>>),
}

impl Value {
    /// Numeric coercion: numbers as-is, booleans as 0/1, numeric strings
    /// parsed; everything else (dates, times, empty, collections) is `None`
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Bool(true) => Some(1.0),
            Value::Bool(false) => Some(0.0),
            Value::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Number of scalar elements (collections counted recursively)
    pub fn element_count(&self) -> usize {
        match self {
            Value::Array(items) => items.iter().map(Value::element_count).sum(),
            Value::Matrix(rows) => rows
                .iter()
                .flat_map(|row| row.iter().map(Value::element_count))
                .sum(),
            _ => 1,
        }
    }

    /// Reduce to a single scalar; a one-element collection unwraps, anything
    /// larger fails
    pub fn into_scalar(self) -> FormulaResult<Value> {
        match self {
            Value::Array(_) | Value::Matrix(_) => {
                let count = self.element_count();
                if count == 1 {
                    let mut found = None;
                    flatten_into(self, &mut |value| {
                        found.get_or_insert(value);
                    });
                    Ok(found.unwrap_or(Value::Empty))
                } else {
                    Err(FormulaError::ScalarExpected(count))
                }
            }
            scalar => Ok(scalar),
        }
    }

    fn type_label(&self) -> &'static str {
        match self {
            Value::Number(_) => "a number",
            Value::Text(_) => "a string",
            Value::Bool(_) => "a boolean",
            Value::Date(_) => "a date",
            Value::Time(_) => "a time",
            Value::Empty => "an empty cell",
            Value::Array(_) => "an array",
            Value::Matrix(_) => "a range",
        }
    }

    /// Numeric coercion as a hard requirement
    pub fn expect_number(&self) -> FormulaResult<f64> {
        self.as_number()
            .ok_or_else(|| FormulaError::NotNumeric(self.type_label().to_string()))
    }

    /// Boolean coercion: false-like values are FALSE, zero, empty cells and
    /// empty strings
    pub fn expect_bool(&self) -> FormulaResult<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            Value::Number(n) => Ok(*n != 0.0),
            Value::Empty => Ok(false),
            Value::Text(s) => {
                let upper = s.trim().to_uppercase();
                if upper.is_empty() || upper == "FALSE" {
                    Ok(false)
                } else if upper == "TRUE" {
                    Ok(true)
                } else {
                    Err(FormulaError::NotBoolean(self.type_label().to_string()))
                }
            }
            _ => Err(FormulaError::NotBoolean(self.type_label().to_string())),
        }
    }
}

impl From<CellValue> for Value {
    fn from(value: CellValue) -> Self {
        match value {
            CellValue::Empty => Value::Empty,
            CellValue::Number(n) => Value::Number(n),
            CellValue::Text(s) => Value::Text(s),
            CellValue::Bool(b) => Value::Bool(b),
            CellValue::Date(d) => Value::Date(d),
            CellValue::Time(t) => Value::Time(t),
            // The evaluator has no error value; the sentinel string carries it
            CellValue::Error => Value::Text(ERROR_SENTINEL.to_string()),
        }
    }
}

impl From<Value> for CellValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Empty => CellValue::Empty,
            Value::Number(n) => CellValue::Number(n),
            Value::Text(s) => CellValue::Text(s),
            Value::Bool(b) => CellValue::Bool(b),
            Value::Date(d) => CellValue::Date(d),
            Value::Time(t) => CellValue::Time(t),
            Value::Array(_) | Value::Matrix(_) => CellValue::Error,
        }
    }
}

/// Apply `f` to every scalar element, recursing through collections
pub(crate) fn flatten_into(value: Value, f: &mut impl FnMut(Value)) {
    match value {
        Value::Array(items) => {
            for item in items {
                flatten_into(item, f);
            }
        }
        Value::Matrix(rows) => {
            for row in rows {
                for item in row {
                    flatten_into(item, f);
                }
            }
        }
        scalar => f(scalar),
    }
}

/// Context for evaluating one target cell of a formula
pub struct EvalContext<'a> {
    /// Cross-table lookup root
    pub project: &'a Project,
    /// Table the formula is defined on
    pub table: &'a Table,
    /// Top-left of the formula's target range
    pub anchor_row: u32,
    pub anchor_col: u32,
    /// Cell currently being computed
    pub target_row: u32,
    pub target_col: u32,
}

impl<'a> EvalContext<'a> {
    pub fn new(
        project: &'a Project,
        table: &'a Table,
        anchor_row: u32,
        anchor_col: u32,
        target_row: u32,
        target_col: u32,
    ) -> Self {
        Self {
            project,
            table,
            anchor_row,
            anchor_col,
            target_row,
            target_col,
        }
    }

    fn resolve_table(&self, table: Option<&str>) -> FormulaResult<&'a Table> {
        match table {
            None => Ok(self.table),
            Some(id) => self
                .project
                .table(id)
                .map_err(|_| FormulaError::UnknownTable(id.to_string())),
        }
    }

    /// Apply the relative offset to one cell endpoint
    fn resolve_cell(&self, cell: &CellRef) -> FormulaResult<(u32, u32)> {
        let row = self.resolve_axis(cell.row, cell.row_abs, self.target_row, self.anchor_row)?;
        let col = self.resolve_axis(cell.col, cell.col_abs, self.target_col, self.anchor_col)?;
        Ok((row, col))
    }

    fn resolve_axis(&self, base: u32, absolute: bool, target: u32, anchor: u32) -> FormulaResult<u32> {
        if absolute {
            return Ok(base);
        }
        let shifted = base as i64 + target as i64 - anchor as i64;
        if shifted < 0 {
            return Err(FormulaError::OutOfBounds);
        }
        Ok(shifted as u32)
    }

    fn read_cell(&self, table: &Table, region: Option<&str>, row: u32, col: u32) -> Value {
        table.value_at(region.unwrap_or("body"), row, col).into()
    }
}

/// Evaluate a formula expression for one target cell
pub fn evaluate(expr: &Expr, ctx: &EvalContext) -> FormulaResult<Value> {
    match expr {
        Expr::Number(n) => Ok(Value::Number(*n)),
        Expr::Text(s) => Ok(Value::Text(s.clone())),
        Expr::Bool(b) => Ok(Value::Bool(*b)),

        Expr::Reference(reference) => evaluate_reference(reference, ctx),

        Expr::Binary { op, left, right } => evaluate_binary(*op, left, right, ctx),

        Expr::Unary { op, operand } => {
            let value = evaluate(operand, ctx)?.into_scalar()?;
            match op {
                UnaryOp::Negate => Ok(Value::Number(-value.expect_number()?)),
            }
        }

        Expr::Call { name, args } => {
            let def = functions::registry()
                .get(name)
                .ok_or_else(|| FormulaError::UnknownFunction(name.clone()))?;
            def.check_arity(args.len())?;

            let mut values = Vec::with_capacity(args.len());
            for arg in args {
                values.push(evaluate(arg, ctx)?);
            }
            (def.implementation)(&values)
        }
    }
}

fn evaluate_reference(reference: &Reference, ctx: &EvalContext) -> FormulaResult<Value> {
    match reference {
        Reference::Cell { table, region, cell } => {
            let table = ctx.resolve_table(table.as_deref())?;
            let (row, col) = ctx.resolve_cell(cell)?;
            Ok(ctx.read_cell(table, region.as_deref(), row, col))
        }

        Reference::Range {
            table,
            region,
            start,
            end,
        } => {
            let table = ctx.resolve_table(table.as_deref())?;
            let (start_row, start_col) = ctx.resolve_cell(start)?;
            let (end_row, end_col) = ctx.resolve_cell(end)?;

            let (top, bottom) = (start_row.min(end_row), start_row.max(end_row));
            let (left, right) = (start_col.min(end_col), start_col.max(end_col));

            let mut rows = Vec::with_capacity((bottom - top + 1) as usize);
            for row in top..=bottom {
                let mut cols = Vec::with_capacity((right - left + 1) as usize);
                for col in left..=right {
                    cols.push(ctx.read_cell(table, region.as_deref(), row, col));
                }
                rows.push(cols);
            }
            Ok(Value::Matrix(rows))
        }

        Reference::Column { table, col } => {
            let table = ctx.resolve_table(table.as_deref())?;
            let values = (0..table.grid_spec().body_rows)
                .map(|row| ctx.read_cell(table, None, row, *col))
                .collect();
            Ok(Value::Array(values))
        }

        Reference::Row { table, row } => {
            let table = ctx.resolve_table(table.as_deref())?;
            let values = (0..table.grid_spec().body_cols)
                .map(|col| ctx.read_cell(table, None, *row, col))
                .collect();
            Ok(Value::Array(values))
        }
    }
}

fn evaluate_binary(
    op: BinaryOp,
    left: &Expr,
    right: &Expr,
    ctx: &EvalContext,
) -> FormulaResult<Value> {
    let left = evaluate(left, ctx)?.into_scalar()?;
    let right = evaluate(right, ctx)?.into_scalar()?;

    match op {
        BinaryOp::Add => Ok(Value::Number(left.expect_number()? + right.expect_number()?)),
        BinaryOp::Subtract => Ok(Value::Number(left.expect_number()? - right.expect_number()?)),
        BinaryOp::Multiply => Ok(Value::Number(left.expect_number()? * right.expect_number()?)),
        BinaryOp::Divide => {
            let divisor = right.expect_number()?;
            if divisor == 0.0 {
                return Err(FormulaError::DivisionByZero);
            }
            Ok(Value::Number(left.expect_number()? / divisor))
        }
        BinaryOp::Power => Ok(Value::Number(
            left.expect_number()?.powf(right.expect_number()?),
        )),

        BinaryOp::Equal => Ok(Value::Bool(scalars_equal(&left, &right))),
        BinaryOp::NotEqual => Ok(Value::Bool(!scalars_equal(&left, &right))),

        BinaryOp::LessThan => compare(&left, &right, |ord| ord < 0.0),
        BinaryOp::LessEqual => compare(&left, &right, |ord| ord <= 0.0),
        BinaryOp::GreaterThan => compare(&left, &right, |ord| ord > 0.0),
        BinaryOp::GreaterEqual => compare(&left, &right, |ord| ord >= 0.0),
    }
}

/// Equality: numeric when both sides coerce, structural otherwise
fn scalars_equal(left: &Value, right: &Value) -> bool {
    if let (Some(l), Some(r)) = (left.as_number(), right.as_number()) {
        return l == r;
    }
    match (left, right) {
        (Value::Text(l), Value::Text(r)) => l == r,
        (Value::Date(l), Value::Date(r)) => l == r,
        (Value::Time(l), Value::Time(r)) => l == r,
        (Value::Empty, Value::Empty) => true,
        _ => false,
    }
}

fn compare(left: &Value, right: &Value, test: impl Fn(f64) -> bool) -> FormulaResult<Value> {
    let diff = left.expect_number()? - right.expect_number()?;
    Ok(Value::Bool(test(diff)))
}
