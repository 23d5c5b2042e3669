//! Project calculation engine
//!
//! Re-evaluates every formula and summary table of a project in definition
//! order. This is a single linear pass, not a dependency ordering: an entry
//! that reads a value produced by a later entry sees that value as of the
//! previous pass, so callers needing a fixed point call
//! [`ProjectCalculationExt::apply_formulas`] again.
//!
//! # Example
//!
//! ```rust
//! use canvas_sheets::prelude::*;
//!
//! let mut project = Project::new();
//! project.add_sheet("Sheet 1", "sheet_1");
//! let table = project
//!     .add_table("sheet_1", "table_1", "table_1", 0.0, 0.0, 2, 2, None)
//!     .unwrap();
//! table.set_cells([("body[A0]", 10.0), ("body[B0]", 20.0)]);
//! table.set_formula("body[C0]", "=A0+B0").unwrap();
//!
//! let stats = project.apply_formulas().unwrap();
//! assert_eq!(stats.formula_count, 1);
//! assert_eq!(project.table("table_1").unwrap().get(0, 2), CellValue::Number(30.0));
//! ```

use crate::{
    address, evaluate, parse_formula, Aggregation, CellValue, EvalContext, GridRange, Project,
    Result, SummarySpec,
};
use chrono::{NaiveDate, NaiveTime};
use std::collections::HashMap;

/// Statistics from one `apply_formulas` pass
#[derive(Debug, Clone, Default)]
pub struct ApplyStats {
    /// Number of formula definitions evaluated
    pub formula_count: usize,
    /// Number of summary tables recomputed
    pub summary_count: usize,
    /// Number of target cells written
    pub cells_calculated: usize,
    /// Number of target cells that received the error sentinel
    pub errors: usize,
}

/// Extension trait adding whole-project evaluation to [`Project`]
pub trait ProjectCalculationExt {
    /// Re-evaluate all formulas and summary tables in definition order
    fn apply_formulas(&mut self) -> Result<ApplyStats>;
}

impl ProjectCalculationExt for Project {
    fn apply_formulas(&mut self) -> Result<ApplyStats> {
        let mut stats = ApplyStats::default();

        for entry in collect_entries(self) {
            match entry.kind {
                EntryKind::Formula { key, text } => {
                    let writes = evaluate_target_range(self, &entry.table_id, &key, &text)?;
                    stats.formula_count += 1;

                    let table = self.table_mut(&entry.table_id)?;
                    for (cell_key, value) in writes {
                        if value.is_error() {
                            stats.errors += 1;
                        }
                        table.store_result(&cell_key, value);
                        stats.cells_calculated += 1;
                    }
                }
                EntryKind::Summary { spec } => {
                    let rows = compute_summary(self, &spec)?;
                    stats.summary_count += 1;
                    write_summary(self, &entry.table_id, &spec, rows)?;
                }
            }
        }

        Ok(stats)
    }
}

enum EntryKind {
    Formula { key: String, text: String },
    Summary { spec: SummarySpec },
}

struct Entry {
    order: u64,
    table_id: String,
    kind: EntryKind,
}

/// One entry per formula definition and per summary-bearing table, sorted by
/// definition order
fn collect_entries(project: &Project) -> Vec<Entry> {
    let mut entries = Vec::new();

    for sheet in project.sheets() {
        for table in sheet.tables() {
            for (key, def) in table.formula_entries() {
                entries.push(Entry {
                    order: def.order,
                    table_id: table.id().to_string(),
                    kind: EntryKind::Formula {
                        key: key.clone(),
                        text: def.text.clone(),
                    },
                });
            }
            if let Some(spec) = table.summary() {
                entries.push(Entry {
                    order: spec.order,
                    table_id: table.id().to_string(),
                    kind: EntryKind::Summary { spec: spec.clone() },
                });
            }
        }
    }

    entries.sort_by_key(|entry| entry.order);
    entries
}

/// Evaluate one formula across its target range
///
/// The AST is parsed once and evaluated per target cell with the range's
/// top-left as the anchor. A per-cell evaluation error turns into the error
/// sentinel for that cell only; a formula text that fails to parse poisons
/// the whole target range.
fn evaluate_target_range(
    project: &Project,
    table_id: &str,
    target_key: &str,
    text: &str,
) -> Result<Vec<(String, CellValue)>> {
    let range = GridRange::parse(target_key)?.normalized();
    let table = project.table(table_id)?;

    let ast = match parse_formula(text) {
        Ok(ast) => ast,
        Err(_) => {
            return Ok(range
                .cells()
                .map(|(row, col)| (address(&range.region, row, col), CellValue::Error))
                .collect());
        }
    };

    let mut writes = Vec::new();
    for (row, col) in range.cells() {
        let ctx = EvalContext::new(
            project,
            table,
            range.start_row,
            range.start_col,
            row,
            col,
        );
        let value = match evaluate(&ast, &ctx).and_then(|value| value.into_scalar()) {
            Ok(value) => value.into(),
            Err(_) => CellValue::Error,
        };
        writes.push((address(&range.region, row, col), value));
    }

    Ok(writes)
}

/// Hashable form of a group-by cell value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum KeyAtom {
    Number(u64),
    Text(String),
    Bool(bool),
    Date(NaiveDate),
    Time(NaiveTime),
    Empty,
    Error,
}

fn key_atom(value: &CellValue) -> KeyAtom {
    match value {
        CellValue::Number(n) => {
            // Normalize NaN and -0.0 so equal keys hash equally
            let n = if n.is_nan() {
                f64::NAN
            } else if *n == 0.0 {
                0.0
            } else {
                *n
            };
            KeyAtom::Number(n.to_bits())
        }
        CellValue::Text(s) => KeyAtom::Text(s.clone()),
        CellValue::Bool(b) => KeyAtom::Bool(*b),
        CellValue::Date(d) => KeyAtom::Date(*d),
        CellValue::Time(t) => KeyAtom::Time(*t),
        CellValue::Empty => KeyAtom::Empty,
        CellValue::Error => KeyAtom::Error,
    }
}

/// Running state for one value column of one group
struct Accumulator {
    agg: Aggregation,
    sum: f64,
    numeric_count: u64,
    min: Option<f64>,
    max: Option<f64>,
    present_count: u64,
}

impl Accumulator {
    fn new(agg: Aggregation) -> Self {
        Self {
            agg,
            sum: 0.0,
            numeric_count: 0,
            min: None,
            max: None,
            present_count: 0,
        }
    }

    fn add(&mut self, value: &CellValue) {
        if !value.is_blank() {
            self.present_count += 1;
        }
        if let Some(n) = value.numeric_value() {
            self.sum += n;
            self.numeric_count += 1;
            self.min = Some(self.min.map_or(n, |m| m.min(n)));
            self.max = Some(self.max.map_or(n, |m| m.max(n)));
        }
    }

    /// Sum/avg/min/max of no contributing values finalize as empty, not zero;
    /// count is always a number
    fn finalize(&self) -> CellValue {
        match self.agg {
            Aggregation::Sum => {
                if self.numeric_count == 0 {
                    CellValue::Empty
                } else {
                    CellValue::Number(self.sum)
                }
            }
            Aggregation::Avg => {
                if self.numeric_count == 0 {
                    CellValue::Empty
                } else {
                    CellValue::Number(self.sum / self.numeric_count as f64)
                }
            }
            Aggregation::Min => self.min.map_or(CellValue::Empty, CellValue::Number),
            Aggregation::Max => self.max.map_or(CellValue::Empty, CellValue::Number),
            Aggregation::Count => CellValue::Number(self.present_count as f64),
        }
    }
}

/// Scan the source table and produce the summary body rows, group values
/// first, in first-seen group order
fn compute_summary(project: &Project, spec: &SummarySpec) -> Result<Vec<Vec<CellValue>>> {
    let source = project.table(&spec.source_table_id)?;

    let (first_row, last_row) = match &spec.source_range {
        Some(range) => {
            let range = range.normalized();
            (range.start_row, range.end_row)
        }
        None => {
            let rows = source.grid_spec().body_rows;
            if rows == 0 {
                return Ok(Vec::new());
            }
            (0, rows - 1)
        }
    };

    let mut groups: Vec<(Vec<CellValue>, Vec<Accumulator>)> = Vec::new();
    let mut index: HashMap<Vec<KeyAtom>, usize> = HashMap::new();

    for row in first_row..=last_row {
        let group_values: Vec<CellValue> = spec
            .group_by
            .iter()
            .map(|col| source.get(row, *col))
            .collect();

        // A row whose every group value is blank contributes nothing
        if !group_values.is_empty() && group_values.iter().all(CellValue::is_blank) {
            continue;
        }

        let key: Vec<KeyAtom> = group_values.iter().map(key_atom).collect();
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push((
                group_values,
                spec.values
                    .iter()
                    .map(|value| Accumulator::new(value.agg))
                    .collect(),
            ));
            groups.len() - 1
        });

        for (accumulator, value) in groups[slot].1.iter_mut().zip(&spec.values) {
            accumulator.add(&source.get(row, value.column));
        }
    }

    Ok(groups
        .into_iter()
        .map(|(group_values, accumulators)| {
            group_values
                .into_iter()
                .chain(accumulators.iter().map(Accumulator::finalize))
                .collect()
        })
        .collect())
}

/// Replace the summary table's body with the computed rows
fn write_summary(
    project: &mut Project,
    table_id: &str,
    spec: &SummarySpec,
    rows: Vec<Vec<CellValue>>,
) -> Result<()> {
    let body_rows = (rows.len() as u32).max(1);
    let body_cols = ((spec.group_by.len() + spec.values.len()) as u32).max(1);

    let table = project.table_mut(table_id)?;
    table.clear_body_values();
    table.resize(Some(body_rows), Some(body_cols));

    for (row, values) in rows.into_iter().enumerate() {
        for (col, value) in values.into_iter().enumerate() {
            table.store_result(&address("body", row as u32, col as u32), value);
        }
    }

    Ok(())
}
