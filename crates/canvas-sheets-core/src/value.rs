//! Cell value types

use crate::error::{Error, Result};
use chrono::{NaiveDate, NaiveTime};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Sentinel string a failed formula cell renders as
pub const ERROR_SENTINEL: &str = "#ERROR";

/// Represents the value stored in a cell
///
/// Raw numbers, strings and booleans convert in via `From`; dates and times
/// come from [`date_value`] / [`time_value`]. The `Error` variant is written
/// by the evaluation pass when a formula cell fails and renders as
/// [`ERROR_SENTINEL`].
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Empty cell (no value)
    Empty,

    /// Numeric value (all numbers stored as f64)
    Number(f64),

    /// String value
    Text(String),

    /// Boolean value
    Bool(bool),

    /// Calendar date
    Date(NaiveDate),

    /// Time of day
    Time(NaiveTime),

    /// Failed formula evaluation
    Error,
}

impl CellValue {
    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Check if the cell holds the evaluation-failure sentinel
    pub fn is_error(&self) -> bool {
        matches!(self, CellValue::Error)
    }

    /// Empty-like for grouping purposes: empty variant, empty string, or error
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty | CellValue::Error => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Numeric coercion: numbers as-is, booleans as 0/1, numeric strings parsed
    ///
    /// Dates, times, empty cells, errors and non-numeric strings yield `None`.
    pub fn numeric_value(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Bool(true) => Some(1.0),
            CellValue::Bool(false) => Some(0.0),
            CellValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// The type tag used at the serialization boundary
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Empty => "empty",
            CellValue::Number(_) => "number",
            CellValue::Text(_) => "string",
            CellValue::Bool(_) => "bool",
            CellValue::Date(_) => "date",
            CellValue::Time(_) => "time",
            // The boundary taxonomy has no error type; errors travel as the
            // sentinel string.
            CellValue::Error => "string",
        }
    }
}

/// Parse an ISO-8601 date string (`YYYY-MM-DD`) into a date cell value
pub fn date_value(text: &str) -> Result<CellValue> {
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| Error::InvalidTemporal {
        kind: "date",
        text: text.to_string(),
    })?;
    Ok(CellValue::Date(date))
}

/// Parse an ISO-8601 time string (`HH:MM:SS`) into a time cell value
pub fn time_value(text: &str) -> Result<CellValue> {
    let time = NaiveTime::parse_from_str(text, "%H:%M:%S").map_err(|_| Error::InvalidTemporal {
        kind: "time",
        text: text.to_string(),
    })?;
    Ok(CellValue::Time(time))
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => write!(f, ""),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::Time(t) => write!(f, "{}", t.format("%H:%M:%S")),
            CellValue::Error => write!(f, "{}", ERROR_SENTINEL),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Date(d)
    }
}

impl From<NaiveTime> for CellValue {
    fn from(t: NaiveTime) -> Self {
        CellValue::Time(t)
    }
}

impl Serialize for CellValue {
    /// Serialize to the boundary form `{"type": ..., "value": ...}`
    ///
    /// Numbers are IEEE-754 doubles, dates/times ISO-8601 strings, and the
    /// error variant travels as the string sentinel.
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            CellValue::Empty => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("type", "empty")?;
                map.end()
            }
            CellValue::Number(n) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "number")?;
                map.serialize_entry("value", n)?;
                map.end()
            }
            CellValue::Text(s) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "string")?;
                map.serialize_entry("value", s)?;
                map.end()
            }
            CellValue::Bool(b) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "bool")?;
                map.serialize_entry("value", b)?;
                map.end()
            }
            CellValue::Date(d) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "date")?;
                map.serialize_entry("value", &d.format("%Y-%m-%d").to_string())?;
                map.end()
            }
            CellValue::Time(t) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "time")?;
                map.serialize_entry("value", &t.format("%H:%M:%S").to_string())?;
                map.end()
            }
            CellValue::Error => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "string")?;
                map.serialize_entry("value", ERROR_SENTINEL)?;
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_conversions() {
        assert_eq!(CellValue::from(42), CellValue::Number(42.0));
        assert_eq!(CellValue::from(2.5), CellValue::Number(2.5));
        assert_eq!(CellValue::from(true), CellValue::Bool(true));
        assert_eq!(CellValue::from("hi"), CellValue::Text("hi".into()));
    }

    #[test]
    fn test_numeric_value() {
        assert_eq!(CellValue::Number(3.0).numeric_value(), Some(3.0));
        assert_eq!(CellValue::Bool(true).numeric_value(), Some(1.0));
        assert_eq!(CellValue::Bool(false).numeric_value(), Some(0.0));
        assert_eq!(CellValue::Text("2.5".into()).numeric_value(), Some(2.5));
        assert_eq!(CellValue::Text("abc".into()).numeric_value(), None);
        assert_eq!(CellValue::Empty.numeric_value(), None);
        assert_eq!(CellValue::Error.numeric_value(), None);
    }

    #[test]
    fn test_is_blank() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::Error.is_blank());
        assert!(CellValue::Text(String::new()).is_blank());
        assert!(!CellValue::Text("x".into()).is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Number(1.5).to_string(), "1.5");
        assert_eq!(CellValue::Bool(true).to_string(), "TRUE");
        assert_eq!(CellValue::Error.to_string(), "#ERROR");
        assert_eq!(CellValue::Empty.to_string(), "");
    }

    #[test]
    fn test_date_time_values() {
        let date = date_value("2024-01-15").unwrap();
        assert_eq!(date.to_string(), "2024-01-15");

        let time = time_value("13:45:30").unwrap();
        assert_eq!(time.to_string(), "13:45:30");

        assert!(date_value("01/15/2024").is_err());
        assert!(time_value("13:45").is_err());
    }

    #[test]
    fn test_serialize_tagged_form() {
        assert_eq!(
            serde_json::to_value(CellValue::Empty).unwrap(),
            json!({"type": "empty"})
        );
        assert_eq!(
            serde_json::to_value(CellValue::Number(2.0)).unwrap(),
            json!({"type": "number", "value": 2.0})
        );
        assert_eq!(
            serde_json::to_value(CellValue::Bool(false)).unwrap(),
            json!({"type": "bool", "value": false})
        );
        assert_eq!(
            serde_json::to_value(date_value("2024-01-15").unwrap()).unwrap(),
            json!({"type": "date", "value": "2024-01-15"})
        );
        assert_eq!(
            serde_json::to_value(time_value("13:45:30").unwrap()).unwrap(),
            json!({"type": "time", "value": "13:45:30"})
        );
        assert_eq!(
            serde_json::to_value(CellValue::Error).unwrap(),
            json!({"type": "string", "value": "#ERROR"})
        );
    }
}
