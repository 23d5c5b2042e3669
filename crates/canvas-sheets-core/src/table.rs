//! Grid table: dimensions, cell values, stored ranges and formula definitions

use crate::address::{address, GridRange};
use crate::error::{Error, Result};
use crate::grid::{GridSpec, LabelBand, LabelBands, Rect, CELL_HEIGHT, CELL_WIDTH};
use crate::summary::SummarySpec;
use crate::value::CellValue;
use ahash::AHashMap;
use serde_json::{json, Map, Value as JsonValue};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Default type tag for body columns
pub const DEFAULT_COLUMN_TYPE: &str = "number";

/// Evaluation mode of a formula definition
///
/// Only spreadsheet mode exists; other mode strings are rejected when the
/// formula is defined, not when it is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormulaMode {
    Spreadsheet,
}

impl FormulaMode {
    pub fn as_str(&self) -> &'static str {
        "spreadsheet"
    }

    pub fn parse(mode: &str) -> Result<Self> {
        if mode == "spreadsheet" {
            Ok(FormulaMode::Spreadsheet)
        } else {
            Err(Error::UnsupportedFormulaMode(mode.to_string()))
        }
    }
}

/// A formula definition attached to a target range
#[derive(Debug, Clone, PartialEq)]
pub struct FormulaDef {
    /// Formula text, stored verbatim (optionally `=`-prefixed)
    pub text: String,
    pub mode: FormulaMode,
    /// Definition-order value; reassigned on every redefinition
    pub order: u64,
}

/// A bulk range payload stored verbatim alongside its expanded cell writes
#[derive(Debug, Clone, PartialEq)]
pub struct RangeValue {
    pub values: Vec<Vec<CellValue>>,
    pub dtype: Option<String>,
}

#[derive(Debug, Default)]
struct LabelBandValues {
    top: AHashMap<u32, Vec<String>>,
    bottom: AHashMap<u32, Vec<String>>,
    left: AHashMap<u32, Vec<String>>,
    right: AHashMap<u32, Vec<String>>,
}

impl LabelBandValues {
    fn band(&self, band: LabelBand) -> &AHashMap<u32, Vec<String>> {
        match band {
            LabelBand::Top => &self.top,
            LabelBand::Bottom => &self.bottom,
            LabelBand::Left => &self.left,
            LabelBand::Right => &self.right,
        }
    }

    fn band_mut(&mut self, band: LabelBand) -> &mut AHashMap<u32, Vec<String>> {
        match band {
            LabelBand::Top => &mut self.top,
            LabelBand::Bottom => &mut self.bottom,
            LabelBand::Left => &mut self.left,
            LabelBand::Right => &mut self.right,
        }
    }
}

/// A grid-shaped table inside a sheet
///
/// The body grid auto-grows to fit any `body[...]` write; label-band regions
/// and custom regions share the address grammar but never grow the grid.
/// Assigning a cell or bulk range over a formula's target range removes that
/// formula definition; the last writer wins.
#[derive(Debug)]
pub struct Table {
    id: String,
    name: String,
    rect: Rect,
    grid_spec: GridSpec,
    body_column_types: Vec<String>,
    cell_values: AHashMap<String, CellValue>,
    range_values: AHashMap<String, RangeValue>,
    formulas: AHashMap<String, FormulaDef>,
    label_band_values: LabelBandValues,
    summary: Option<SummarySpec>,
    order_counter: Arc<AtomicU64>,
}

impl Table {
    pub(crate) fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        x: f64,
        y: f64,
        rows: u32,
        cols: u32,
        label_bands: LabelBands,
        order_counter: Arc<AtomicU64>,
    ) -> Self {
        let grid_spec = GridSpec::new(rows, cols, label_bands);
        let mut table = Self {
            id: id.into(),
            name: name.into(),
            rect: Rect::new(x, y, 0.0, 0.0),
            grid_spec,
            body_column_types: vec![DEFAULT_COLUMN_TYPE.to_string(); cols as usize],
            cell_values: AHashMap::new(),
            range_values: AHashMap::new(),
            formulas: AHashMap::new(),
            label_band_values: LabelBandValues::default(),
            summary: None,
            order_counter,
        };
        table.update_rect();
        table
    }

    // === Identity and geometry ===

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn grid_spec(&self) -> &GridSpec {
        &self.grid_spec
    }

    pub fn body_column_types(&self) -> &[String] {
        &self.body_column_types
    }

    /// Move the table's origin; width/height stay derived from the grid
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.rect.x = x;
        self.rect.y = y;
    }

    /// Set body dimensions explicitly; fields not given are left unchanged
    pub fn resize(&mut self, rows: Option<u32>, cols: Option<u32>) {
        if let Some(rows) = rows {
            self.grid_spec.body_rows = rows;
        }
        if let Some(cols) = cols {
            self.grid_spec.body_cols = cols;
        }
        self.sync_column_types();
        self.update_rect();
    }

    /// Set label band counts; fields not given are left unchanged
    pub fn set_labels(
        &mut self,
        top: Option<u32>,
        left: Option<u32>,
        bottom: Option<u32>,
        right: Option<u32>,
    ) {
        let bands = &mut self.grid_spec.label_bands;
        if let Some(top) = top {
            bands.top_rows = top;
        }
        if let Some(left) = left {
            bands.left_cols = left;
        }
        if let Some(bottom) = bottom {
            bands.bottom_rows = bottom;
        }
        if let Some(right) = right {
            bands.right_cols = right;
        }
        self.update_rect();
    }

    /// Extend the body by `count` rows
    ///
    /// Existing cell values keep their addresses; the insertion point only
    /// matters to the authoring layer.
    pub fn insert_rows(&mut self, _at: u32, count: u32) {
        self.grid_spec.body_rows += count;
        self.update_rect();
    }

    /// Extend the body by `count` columns
    pub fn insert_cols(&mut self, _at: u32, count: u32) {
        self.grid_spec.body_cols += count;
        self.sync_column_types();
        self.update_rect();
    }

    // === Cell mutation ===

    /// Write a mapping of address keys to values
    ///
    /// Keys parsing as `body[...]` grow the grid to fit; any parseable key
    /// removes formula definitions whose target range it intersects; keys
    /// that do not parse are stored verbatim without growth.
    pub fn set_cells<I, K, V>(&mut self, mapping: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<CellValue>,
    {
        for (key, value) in mapping {
            self.write_cell_key(key.into(), value.into());
        }
    }

    /// Store a bulk 2-D payload under a range key, then expand it cell by cell
    ///
    /// The payload is kept verbatim (ragged rows included); each present
    /// position also becomes an individual cell write with the same growth
    /// and formula-clearing rules as [`Table::set_cells`]. A key that does
    /// not parse keeps the payload but expands nothing.
    pub fn set_range<V: Into<CellValue>>(
        &mut self,
        range: &str,
        values: Vec<Vec<V>>,
        dtype: Option<&str>,
    ) {
        let values: Vec<Vec<CellValue>> = values
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();

        self.range_values.insert(
            range.trim().to_string(),
            RangeValue {
                values: values.clone(),
                dtype: dtype.map(str::to_string),
            },
        );

        let parsed = match GridRange::parse(range) {
            Ok(parsed) => parsed.normalized(),
            Err(_) => return,
        };

        for (row_offset, row_values) in values.into_iter().enumerate() {
            for (col_offset, value) in row_values.into_iter().enumerate() {
                let row = parsed.start_row + row_offset as u32;
                let col = parsed.start_col + col_offset as u32;
                self.write_cell_key(address(&parsed.region, row, col), value);
            }
        }
    }

    /// Zero-based body cell read; absent cells read as empty
    pub fn get(&self, row: u32, col: u32) -> CellValue {
        self.value_at("body", row, col)
    }

    /// Zero-based body cell write with auto-growth
    pub fn set<V: Into<CellValue>>(&mut self, row: u32, col: u32, value: V) {
        self.write_cell_key(address("body", row, col), value.into());
    }

    /// Read a cell in any region; absent cells read as empty
    pub fn value_at(&self, region: &str, row: u32, col: u32) -> CellValue {
        self.cell_values
            .get(&address(region, row, col))
            .cloned()
            .unwrap_or(CellValue::Empty)
    }

    /// Look up a raw cell key
    pub fn cell_value(&self, key: &str) -> Option<&CellValue> {
        self.cell_values.get(key)
    }

    /// Iterate all stored cell entries
    pub fn cell_entries(&self) -> impl Iterator<Item = (&String, &CellValue)> {
        self.cell_values.iter()
    }

    /// Look up a stored bulk range payload
    pub fn range_value(&self, key: &str) -> Option<&RangeValue> {
        self.range_values.get(key)
    }

    /// Write a computed result without clearing formulas or growing the grid
    ///
    /// This is the evaluation pass's write path; going through
    /// [`Table::set_cells`] instead would delete the formula definition that
    /// produced the value.
    pub fn store_result(&mut self, key: &str, value: CellValue) {
        self.cell_values.insert(key.to_string(), value);
    }

    /// Remove every stored cell value addressing the body region
    pub fn clear_body_values(&mut self) {
        self.cell_values
            .retain(|key, _| !matches!(GridRange::parse(key), Ok(range) if range.is_body()));
    }

    fn write_cell_key(&mut self, key: String, value: CellValue) {
        if let Ok(range) = GridRange::parse(&key) {
            let range = range.normalized();
            if range.is_body() {
                self.grow_to(range.end_row, range.end_col);
            }
            self.remove_formulas_overlapping(&range);
        }
        self.cell_values.insert(key, value);
    }

    // === Label bands and column types ===

    /// Store label text for one line of a band
    pub fn set_label_band(&mut self, band: &str, index: u32, values: Vec<String>) -> Result<()> {
        let band = LabelBand::parse(band)?;
        self.label_band_values.band_mut(band).insert(index, values);
        Ok(())
    }

    /// Read label text for one line of a band
    pub fn label_band(&self, band: LabelBand, index: u32) -> Option<&[String]> {
        self.label_band_values
            .band(band)
            .get(&index)
            .map(Vec::as_slice)
    }

    /// Tag a body column with a type, growing the body to include it
    pub fn set_column_type(&mut self, index: u32, column_type: &str) {
        if index >= self.grid_spec.body_cols {
            self.grid_spec.body_cols = index + 1;
            self.sync_column_types();
            self.update_rect();
        }
        self.body_column_types[index as usize] = column_type.to_string();
    }

    // === Formulas ===

    /// Define a spreadsheet-mode formula over a target range
    pub fn set_formula(&mut self, target_range: &str, formula: &str) -> Result<()> {
        self.set_formula_with_mode(target_range, formula, "spreadsheet")
    }

    /// Define a formula, validating the mode string
    ///
    /// Empty or whitespace-only formula text clears any existing definition
    /// at the key. A non-empty definition parses the *target range* (a hard
    /// failure on bad syntax), grows the body grid to cover it, and receives
    /// a fresh definition-order value.
    pub fn set_formula_with_mode(
        &mut self,
        target_range: &str,
        formula: &str,
        mode: &str,
    ) -> Result<()> {
        let key = target_range.trim().to_string();

        if formula.trim().is_empty() {
            self.formulas.remove(&key);
            return Ok(());
        }

        let mode = FormulaMode::parse(mode)?;
        let range = GridRange::parse(&key)?.normalized();
        if range.is_body() {
            self.grow_to(range.end_row, range.end_col);
        }

        let order = self.order_counter.fetch_add(1, Ordering::Relaxed);
        self.formulas.insert(
            key,
            FormulaDef {
                text: formula.to_string(),
                mode,
                order,
            },
        );
        Ok(())
    }

    /// Look up a formula definition by its target-range key
    pub fn formula(&self, target_range: &str) -> Option<&FormulaDef> {
        self.formulas.get(target_range)
    }

    /// Iterate all formula definitions
    pub fn formula_entries(&self) -> impl Iterator<Item = (&String, &FormulaDef)> {
        self.formulas.iter()
    }

    fn remove_formulas_overlapping(&mut self, written: &GridRange) {
        self.formulas.retain(|key, _| {
            match GridRange::parse(key) {
                Ok(target) => {
                    let target = target.normalized();
                    !(target.region == written.region
                        && target.start_row <= written.end_row
                        && target.end_row >= written.start_row
                        && target.start_col <= written.end_col
                        && target.end_col >= written.start_col)
                }
                // Formula keys are validated on definition; keep anything odd.
                Err(_) => true,
            }
        });
    }

    // === Summary ===

    pub fn summary(&self) -> Option<&SummarySpec> {
        self.summary.as_ref()
    }

    pub(crate) fn set_summary_spec(&mut self, spec: SummarySpec) {
        self.summary = Some(spec);
    }

    pub(crate) fn next_order(&self) -> u64 {
        self.order_counter.fetch_add(1, Ordering::Relaxed)
    }

    // === Geometry maintenance ===

    /// Shrink the body to the bounding box of non-empty values and formula
    /// targets, never below 1×1
    pub fn minimize(&mut self) {
        let mut max_row: u32 = 0;
        let mut max_col: u32 = 0;
        let mut seen = false;

        for (key, value) in &self.cell_values {
            if value.is_empty() {
                continue;
            }
            if let Ok(range) = GridRange::parse(key) {
                let range = range.normalized();
                if range.is_body() {
                    max_row = max_row.max(range.end_row);
                    max_col = max_col.max(range.end_col);
                    seen = true;
                }
            }
        }

        for key in self.formulas.keys() {
            if let Ok(range) = GridRange::parse(key) {
                let range = range.normalized();
                if range.is_body() {
                    max_row = max_row.max(range.end_row);
                    max_col = max_col.max(range.end_col);
                    seen = true;
                }
            }
        }

        let (rows, cols) = if seen {
            (max_row + 1, max_col + 1)
        } else {
            (1, 1)
        };

        self.grid_spec.body_rows = rows;
        self.grid_spec.body_cols = cols;
        self.sync_column_types();
        self.update_rect();
    }

    fn grow_to(&mut self, row: u32, col: u32) {
        let mut changed = false;
        if row + 1 > self.grid_spec.body_rows {
            self.grid_spec.body_rows = row + 1;
            changed = true;
        }
        if col + 1 > self.grid_spec.body_cols {
            self.grid_spec.body_cols = col + 1;
            changed = true;
        }
        if changed {
            self.sync_column_types();
            self.update_rect();
        }
    }

    fn sync_column_types(&mut self) {
        self.body_column_types
            .resize(self.grid_spec.body_cols as usize, DEFAULT_COLUMN_TYPE.to_string());
    }

    fn update_rect(&mut self) {
        self.rect.width = self.grid_spec.total_cols() as f64 * CELL_WIDTH;
        self.rect.height = self.grid_spec.total_rows() as f64 * CELL_HEIGHT;
    }

    // === Serialization ===

    /// Document payload consumed by the external JSON layer
    pub fn to_json(&self) -> JsonValue {
        let cell_values: Map<String, JsonValue> = self
            .cell_values
            .iter()
            .map(|(key, value)| (key.clone(), json!(value)))
            .collect();

        let range_values: Map<String, JsonValue> = self
            .range_values
            .iter()
            .map(|(key, payload)| {
                (
                    key.clone(),
                    json!({
                        "values": payload.values,
                        "dtype": payload.dtype,
                    }),
                )
            })
            .collect();

        let formulas: Map<String, JsonValue> = self
            .formulas
            .iter()
            .map(|(key, def)| {
                (
                    key.clone(),
                    json!({
                        "formula": def.text,
                        "mode": def.mode.as_str(),
                    }),
                )
            })
            .collect();

        let label_bands: Map<String, JsonValue> = LabelBand::ALL
            .iter()
            .map(|band| {
                let lines: Map<String, JsonValue> = self
                    .label_band_values
                    .band(*band)
                    .iter()
                    .map(|(index, values)| (index.to_string(), json!(values)))
                    .collect();
                (band.as_str().to_string(), JsonValue::Object(lines))
            })
            .collect();

        let mut payload = json!({
            "id": self.id,
            "name": self.name,
            "rect": self.rect,
            "gridSpec": self.grid_spec,
            "cellValues": cell_values,
            "rangeValues": range_values,
            "formulas": formulas,
            "labelBandValues": label_bands,
            "bodyColumnTypes": self.body_column_types,
        });

        if let Some(summary) = &self.summary {
            let values: Vec<JsonValue> = summary
                .values
                .iter()
                .map(|v| json!({"col": v.column, "agg": v.agg.as_str()}))
                .collect();
            payload["summary"] = json!({
                "sourceTableId": summary.source_table_id,
                "sourceRange": summary.source_range.as_ref().map(|r| r.to_string()),
                "groupBy": summary.group_by,
                "values": values,
            });
        }

        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table(rows: u32, cols: u32) -> Table {
        Table::new(
            "table_1",
            "table_1",
            0.0,
            0.0,
            rows,
            cols,
            LabelBands::zero(),
            Arc::new(AtomicU64::new(0)),
        )
    }

    #[test]
    fn test_rect_derived_from_grid() {
        let mut t = table(2, 3);
        assert_eq!(t.rect().width, 3.0 * CELL_WIDTH);
        assert_eq!(t.rect().height, 2.0 * CELL_HEIGHT);

        t.set_labels(Some(1), Some(1), Some(1), Some(1));
        assert_eq!(t.rect().width, 5.0 * CELL_WIDTH);
        assert_eq!(t.rect().height, 4.0 * CELL_HEIGHT);

        t.insert_rows(0, 2);
        assert_eq!(t.rect().height, 6.0 * CELL_HEIGHT);

        t.insert_cols(0, 1);
        assert_eq!(t.rect().width, 6.0 * CELL_WIDTH);
    }

    #[test]
    fn test_set_position_keeps_derived_size() {
        let mut t = table(1, 1);
        t.set_position(42.0, 84.0);
        assert_eq!(t.rect().x, 42.0);
        assert_eq!(t.rect().y, 84.0);
        assert_eq!(t.rect().width, CELL_WIDTH);
    }

    #[test]
    fn test_set_cells_grows_body() {
        let mut t = table(2, 2);
        t.set_cells([("body[E3]", 1.0)]);
        assert_eq!(t.grid_spec().body_rows, 4);
        assert_eq!(t.grid_spec().body_cols, 5);
        assert_eq!(t.get(3, 4), CellValue::Number(1.0));
    }

    #[test]
    fn test_indexed_set_grows_body() {
        let mut t = table(2, 2);
        t.set(3, 4, 1.0);
        assert_eq!(t.grid_spec().body_rows, 4);
        assert_eq!(t.grid_spec().body_cols, 5);
        assert_eq!(t.rect().width, 5.0 * CELL_WIDTH);
        assert_eq!(t.rect().height, 4.0 * CELL_HEIGHT);
    }

    #[test]
    fn test_non_body_keys_do_not_grow() {
        let mut t = table(2, 2);
        t.set_cells([("top_labels[D9]", "header")]);
        assert_eq!(t.grid_spec().body_rows, 2);
        assert_eq!(t.grid_spec().body_cols, 2);
        assert_eq!(t.value_at("top_labels", 9, 3), CellValue::from("header"));
    }

    #[test]
    fn test_unparseable_keys_stored_verbatim() {
        let mut t = table(1, 1);
        t.set_cells([("not an address", 7.0)]);
        assert_eq!(t.cell_value("not an address"), Some(&CellValue::Number(7.0)));
        assert_eq!(t.grid_spec().body_rows, 1);
    }

    #[test]
    fn test_set_range_stores_payload_and_expands() {
        let mut t = table(1, 1);
        t.set_range("body[B1:C2]", vec![vec![1.0, 2.0], vec![3.0, 4.0]], Some("number"));

        let payload = t.range_value("body[B1:C2]").unwrap();
        assert_eq!(payload.values.len(), 2);
        assert_eq!(payload.dtype.as_deref(), Some("number"));

        assert_eq!(t.get(1, 1), CellValue::Number(1.0));
        assert_eq!(t.get(2, 2), CellValue::Number(4.0));
        assert_eq!(t.grid_spec().body_rows, 3);
        assert_eq!(t.grid_spec().body_cols, 3);
    }

    #[test]
    fn test_set_range_ragged_rows() {
        let mut t = table(1, 1);
        t.set_range("body[A0:B1]", vec![vec![1.0, 2.0], vec![3.0]], None);
        assert_eq!(t.get(0, 1), CellValue::Number(2.0));
        assert_eq!(t.get(1, 1), CellValue::Empty);
    }

    #[test]
    fn test_set_range_bad_key_keeps_payload_only() {
        let mut t = table(1, 1);
        t.set_range("nonsense", vec![vec![5.0]], None);
        assert!(t.range_value("nonsense").is_some());
        assert_eq!(t.get(0, 0), CellValue::Empty);
    }

    #[test]
    fn test_write_clears_overlapping_formula() {
        let mut t = table(3, 3);
        t.set_formula("body[A0]", "=1+1").unwrap();
        assert!(t.formula("body[A0]").is_some());

        t.set_range("body[A0:A0]", vec![vec![5.0]], None);
        assert!(t.formula("body[A0]").is_none());
        assert_eq!(t.get(0, 0), CellValue::Number(5.0));
    }

    #[test]
    fn test_write_outside_formula_target_keeps_it() {
        let mut t = table(3, 3);
        t.set_formula("body[C0:C2]", "=A0").unwrap();
        t.set_cells([("body[A0]", 1.0)]);
        assert!(t.formula("body[C0:C2]").is_some());
    }

    #[test]
    fn test_set_formula_grows_to_target() {
        let mut t = table(1, 1);
        t.set_formula("body[C0:C4]", "=A0").unwrap();
        assert_eq!(t.grid_spec().body_rows, 5);
        assert_eq!(t.grid_spec().body_cols, 3);
    }

    #[test]
    fn test_set_formula_rejects_bad_mode() {
        let mut t = table(1, 1);
        let err = t.set_formula_with_mode("body[A0]", "=1", "python");
        assert!(matches!(err, Err(Error::UnsupportedFormulaMode(_))));
        assert!(t.formula("body[A0]").is_none());
    }

    #[test]
    fn test_set_formula_rejects_bad_range() {
        let mut t = table(1, 1);
        assert!(t.set_formula("bogus", "=1").is_err());
    }

    #[test]
    fn test_empty_formula_clears_definition() {
        let mut t = table(1, 1);
        t.set_formula("body[A0]", "=1+1").unwrap();
        t.set_formula("body[A0]", "  ").unwrap();
        assert!(t.formula("body[A0]").is_none());
    }

    #[test]
    fn test_redefinition_gets_fresh_order() {
        let mut t = table(1, 1);
        t.set_formula("body[A0]", "=1").unwrap();
        let first = t.formula("body[A0]").unwrap().order;
        t.set_formula("body[A0]", "=2").unwrap();
        let second = t.formula("body[A0]").unwrap().order;
        assert!(second > first);
    }

    #[test]
    fn test_set_column_type_grows_and_pads() {
        let mut t = table(2, 2);
        t.set_column_type(1, "currency");
        t.set_column_type(3, "date");
        assert_eq!(t.grid_spec().body_cols, 4);
        assert_eq!(
            t.body_column_types(),
            &["number", "currency", "number", "date"]
        );
    }

    #[test]
    fn test_resize_truncates_column_types() {
        let mut t = table(2, 4);
        t.set_column_type(3, "date");
        t.resize(None, Some(2));
        assert_eq!(t.body_column_types(), &["number", "number"]);
    }

    #[test]
    fn test_minimize_shrinks_to_content() {
        let mut t = table(6, 6);
        t.set(2, 3, 1.0);
        t.minimize();
        assert_eq!(t.grid_spec().body_rows, 3);
        assert_eq!(t.grid_spec().body_cols, 4);
        assert_eq!(t.rect().width, 4.0 * CELL_WIDTH);
    }

    #[test]
    fn test_minimize_respects_formula_targets() {
        let mut t = table(6, 6);
        t.set_formula("body[B4]", "=1").unwrap();
        t.minimize();
        assert_eq!(t.grid_spec().body_rows, 5);
        assert_eq!(t.grid_spec().body_cols, 2);
    }

    #[test]
    fn test_minimize_floors_at_one_by_one() {
        let mut t = table(6, 6);
        t.minimize();
        assert_eq!(t.grid_spec().body_rows, 1);
        assert_eq!(t.grid_spec().body_cols, 1);
    }

    #[test]
    fn test_label_bands() {
        let mut t = table(2, 2);
        t.set_label_band("top", 0, vec!["Q1".into(), "Q2".into()]).unwrap();
        assert_eq!(
            t.label_band(LabelBand::Top, 0),
            Some(&["Q1".to_string(), "Q2".to_string()][..])
        );
        assert!(t.set_label_band("middle", 0, vec![]).is_err());
    }

    #[test]
    fn test_store_result_leaves_formula() {
        let mut t = table(1, 1);
        t.set_formula("body[A0]", "=1+1").unwrap();
        t.store_result("body[A0]", CellValue::Number(2.0));
        assert!(t.formula("body[A0]").is_some());
        assert_eq!(t.get(0, 0), CellValue::Number(2.0));
    }

    #[test]
    fn test_clear_body_values() {
        let mut t = table(2, 2);
        t.set_cells([("body[A0]", 1.0), ("body[B1]", 2.0)]);
        t.set_cells([("top_labels[A0]", 9.0)]);
        t.clear_body_values();
        assert_eq!(t.get(0, 0), CellValue::Empty);
        assert_eq!(t.value_at("top_labels", 0, 0), CellValue::Number(9.0));
    }
}
