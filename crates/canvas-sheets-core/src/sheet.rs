//! Sheet type

use crate::table::Table;
use serde_json::{json, Value as JsonValue};

/// A sheet: an ordered list of tables on one canvas
#[derive(Debug)]
pub struct Sheet {
    id: String,
    name: String,
    tables: Vec<Table>,
}

impl Sheet {
    pub(crate) fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tables: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn tables_mut(&mut self) -> &mut [Table] {
        &mut self.tables
    }

    pub(crate) fn push_table(&mut self, table: Table) -> &mut Table {
        self.tables.push(table);
        self.tables.last_mut().unwrap()
    }

    /// Document payload consumed by the external JSON layer
    pub fn to_json(&self) -> JsonValue {
        json!({
            "id": self.id,
            "name": self.name,
            "tables": self.tables.iter().map(Table::to_json).collect::<Vec<_>>(),
        })
    }
}
