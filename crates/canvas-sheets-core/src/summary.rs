//! Summary table specification

use crate::address::GridRange;
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Aggregation applied to one value column of a summary table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aggregation {
    Sum,
    Avg,
    Min,
    Max,
    Count,
}

impl Aggregation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Aggregation::Sum => "sum",
            Aggregation::Avg => "avg",
            Aggregation::Min => "min",
            Aggregation::Max => "max",
            Aggregation::Count => "count",
        }
    }
}

impl FromStr for Aggregation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sum" => Ok(Aggregation::Sum),
            "avg" => Ok(Aggregation::Avg),
            "min" => Ok(Aggregation::Min),
            "max" => Ok(Aggregation::Max),
            "count" => Ok(Aggregation::Count),
            _ => Err(Error::UnsupportedAggregation(s.to_string())),
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A value column and its aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueColumn {
    /// Zero-based body column index in the source table
    pub column: u32,
    pub agg: Aggregation,
}

/// Group-by aggregation spec attached to a derived summary table
///
/// The summary table's body is fully recomputed from the source table on
/// every evaluation pass. `order` is the definition-order value captured when
/// the summary table was created.
#[derive(Debug, Clone, PartialEq)]
pub struct SummarySpec {
    /// Id of the table whose body rows are scanned
    pub source_table_id: String,
    /// Optional range restricting the scanned row span of the source body
    pub source_range: Option<GridRange>,
    /// Zero-based group-by body column indices, in output order
    pub group_by: Vec<u32>,
    /// Aggregated value columns, in output order after the group columns
    pub values: Vec<ValueColumn>,
    /// Definition-order value assigned at creation
    pub order: u64,
}
