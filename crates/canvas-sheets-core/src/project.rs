//! Project type - the document root

use crate::address::GridRange;
use crate::error::{Error, Result};
use crate::grid::LabelBands;
use crate::sheet::Sheet;
use crate::summary::{SummarySpec, ValueColumn};
use crate::table::Table;
use serde_json::{json, Value as JsonValue};
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

/// A project: an ordered list of sheets and the cross-table lookup root
///
/// The project owns the definition-order counter shared by all of its
/// tables; every formula or summary (re)definition draws the next value from
/// it, which fixes the sequence the evaluation pass runs in.
#[derive(Debug)]
pub struct Project {
    sheets: Vec<Sheet>,
    order_counter: Arc<AtomicU64>,
}

impl Project {
    pub fn new() -> Self {
        Self {
            sheets: Vec::new(),
            order_counter: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheets_mut(&mut self) -> &mut [Sheet] {
        &mut self.sheets
    }

    /// Append a new sheet
    pub fn add_sheet(&mut self, name: &str, sheet_id: &str) -> &mut Sheet {
        self.sheets.push(Sheet::new(sheet_id, name));
        self.sheets.last_mut().unwrap()
    }

    /// Rename a sheet by id
    pub fn rename_sheet(&mut self, sheet_id: &str, name: &str) -> Result<()> {
        let sheet = self.find_sheet_mut(sheet_id)?;
        sheet.set_name(name);
        Ok(())
    }

    /// Create a table on a sheet
    ///
    /// The rectangle's origin is `(x, y)`; width and height are derived from
    /// the grid dimensions.
    #[allow(clippy::too_many_arguments)]
    pub fn add_table(
        &mut self,
        sheet_id: &str,
        table_id: &str,
        name: &str,
        x: f64,
        y: f64,
        rows: u32,
        cols: u32,
        labels: Option<LabelBands>,
    ) -> Result<&mut Table> {
        let counter = Arc::clone(&self.order_counter);
        let sheet = self.find_sheet_mut(sheet_id)?;
        let table = Table::new(
            table_id,
            name,
            x,
            y,
            rows,
            cols,
            labels.unwrap_or_default(),
            counter,
        );
        Ok(sheet.push_table(table))
    }

    /// Create a derived summary table on a sheet
    ///
    /// `group_by` and `values` are zero-based body column indices of the
    /// source table. The summary spec captures a definition-order value at
    /// creation, which slots the recompute into the evaluation sequence. The
    /// source table must already exist and `values` must be non-empty;
    /// violations are hard failures and nothing is written.
    #[allow(clippy::too_many_arguments)]
    pub fn add_summary_table(
        &mut self,
        sheet_id: &str,
        table_id: &str,
        name: &str,
        source_table_id: &str,
        source_range: Option<&str>,
        group_by: Vec<u32>,
        values: Vec<ValueColumn>,
    ) -> Result<&mut Table> {
        if values.is_empty() {
            return Err(Error::EmptySummaryValues);
        }
        // Validate the source exists up front rather than at every pass.
        self.table(source_table_id)?;

        let source_range = match source_range {
            Some(text) => Some(GridRange::parse(text)?),
            None => None,
        };

        let cols = (group_by.len() + values.len()).max(1) as u32;
        let counter = Arc::clone(&self.order_counter);
        let sheet = self.find_sheet_mut(sheet_id)?;
        let mut table = Table::new(
            table_id,
            name,
            0.0,
            0.0,
            1,
            cols,
            LabelBands::zero(),
            counter,
        );
        let order = table.next_order();
        table.set_summary_spec(SummarySpec {
            source_table_id: source_table_id.to_string(),
            source_range,
            group_by,
            values,
            order,
        });
        Ok(sheet.push_table(table))
    }

    /// Cross-table lookup by id
    pub fn table(&self, table_id: &str) -> Result<&Table> {
        self.sheets
            .iter()
            .flat_map(|sheet| sheet.tables().iter())
            .find(|table| table.id() == table_id)
            .ok_or_else(|| Error::TableNotFound(table_id.to_string()))
    }

    /// Mutable cross-table lookup by id
    pub fn table_mut(&mut self, table_id: &str) -> Result<&mut Table> {
        self.sheets
            .iter_mut()
            .flat_map(|sheet| sheet.tables_mut().iter_mut())
            .find(|table| table.id() == table_id)
            .ok_or_else(|| Error::TableNotFound(table_id.to_string()))
    }

    /// Document payload consumed by the external JSON layer
    pub fn to_json(&self) -> JsonValue {
        json!({
            "sheets": self.sheets.iter().map(Sheet::to_json).collect::<Vec<_>>(),
        })
    }

    fn find_sheet_mut(&mut self, sheet_id: &str) -> Result<&mut Sheet> {
        self.sheets
            .iter_mut()
            .find(|sheet| sheet.id() == sheet_id)
            .ok_or_else(|| Error::SheetNotFound(sheet_id.to_string()))
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new()
    }
}
