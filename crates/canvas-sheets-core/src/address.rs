//! Address and range codec
//!
//! Converts between column letters and zero-based indices, and between
//! `region[A0]` / `region[A0:B2]` address strings and their parsed form.
//!
//! Two numbering conventions coexist on purpose: machine address keys and the
//! formula reference grammar are zero-based (`body[A0]` is row 0), while
//! [`display_label`] renders the 1-based labels shown to people (`A1` for
//! row 0). [`address`] always emits the zero-based key form.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Decode column letters to a zero-based index ("A" = 0, "Z" = 25, "AA" = 26)
pub fn column_index(label: &str) -> Result<u32> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidColumnLabel(label.to_string()));
    }

    let mut value: u32 = 0;
    for c in trimmed.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::InvalidColumnLabel(label.to_string()));
        }
        let digit = (c.to_ascii_uppercase() as u32) - ('A' as u32) + 1;
        value = value * 26 + digit;
    }

    Ok(value - 1)
}

/// Encode a zero-based column index as letters (0 = "A", 25 = "Z", 26 = "AA")
pub fn column_label(index: u32) -> String {
    let mut result = String::new();
    let mut n = index + 1;

    while n > 0 {
        n -= 1;
        let c = ((n % 26) as u8 + b'A') as char;
        result.insert(0, c);
        n /= 26;
    }

    result
}

/// Parse a bare cell token like "A0" or "BC12" to zero-based (row, col)
///
/// Splits leading letters from trailing digits; both parts must be present
/// and the digits must parse as a non-negative row number.
pub fn parse_cell(cell: &str) -> Result<(u32, u32)> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidCellReference(cell.to_string()));
    }

    let mut letters = String::new();
    let mut digits = String::new();
    for c in trimmed.chars() {
        if c.is_ascii_alphabetic() && digits.is_empty() {
            letters.push(c);
        } else {
            digits.push(c);
        }
    }

    if letters.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidCellReference(cell.to_string()));
    }

    let row: u32 = digits
        .parse()
        .map_err(|_| Error::InvalidCellReference(cell.to_string()))?;
    let col = column_index(&letters)?;

    Ok((row, col))
}

/// Zero-based cell token ("A0" for row 0, col 0)
pub fn cell_key(row: u32, col: u32) -> String {
    format!("{}{}", column_label(col), row)
}

/// Human-facing 1-based cell label ("A1" for row 0, col 0)
pub fn display_label(row: u32, col: u32) -> String {
    format!("{}{}", column_label(col), row + 1)
}

/// Canonical single-cell address key, always zero-based ("body[A0]")
pub fn address(region: &str, row: u32, col: u32) -> String {
    format!("{}[{}]", region, cell_key(row, col))
}

/// A parsed `region[...]` range
///
/// A single-cell address parses with start == end. Endpoints are kept in the
/// order they were written; [`GridRange::normalized`] orders them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GridRange {
    pub region: String,
    pub start_row: u32,
    pub start_col: u32,
    pub end_row: u32,
    pub end_col: u32,
}

impl GridRange {
    /// Create a single-cell range
    pub fn single(region: impl Into<String>, row: u32, col: u32) -> Self {
        Self {
            region: region.into(),
            start_row: row,
            start_col: col,
            end_row: row,
            end_col: col,
        }
    }

    /// Parse a `region[cell]` or `region[start:end]` string
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let open = trimmed
            .find('[')
            .ok_or_else(|| Error::InvalidRangeFormat(text.to_string()))?;
        if !trimmed.ends_with(']') {
            return Err(Error::InvalidRangeFormat(text.to_string()));
        }

        let region = trimmed[..open].trim();
        if region.is_empty() {
            return Err(Error::InvalidRangeFormat(text.to_string()));
        }

        let inner = &trimmed[open + 1..trimmed.len() - 1];
        let mut parts = inner.split(':');
        let first = parts.next().unwrap_or("");
        let (start_row, start_col) = parse_cell(first)?;

        let (end_row, end_col) = match parts.next() {
            Some(second) => {
                if parts.next().is_some() {
                    return Err(Error::InvalidRangeFormat(text.to_string()));
                }
                parse_cell(second)?
            }
            None => (start_row, start_col),
        };

        Ok(Self {
            region: region.to_string(),
            start_row,
            start_col,
            end_row,
            end_col,
        })
    }

    /// Copy with endpoints ordered so start <= end on both axes
    pub fn normalized(&self) -> Self {
        Self {
            region: self.region.clone(),
            start_row: self.start_row.min(self.end_row),
            start_col: self.start_col.min(self.end_col),
            end_row: self.start_row.max(self.end_row),
            end_col: self.start_col.max(self.end_col),
        }
    }

    /// Whether this range addresses the body grid
    pub fn is_body(&self) -> bool {
        self.region == "body"
    }

    /// Number of rows spanned (after normalization)
    pub fn row_count(&self) -> u32 {
        let n = self.normalized();
        n.end_row - n.start_row + 1
    }

    /// Number of columns spanned (after normalization)
    pub fn col_count(&self) -> u32 {
        let n = self.normalized();
        n.end_col - n.start_col + 1
    }

    /// Whether a cell in the same region falls inside this range
    pub fn contains(&self, region: &str, row: u32, col: u32) -> bool {
        let n = self.normalized();
        n.region == region
            && row >= n.start_row
            && row <= n.end_row
            && col >= n.start_col
            && col <= n.end_col
    }

    /// Iterate the cells of the (normalized) range row by row
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> {
        let n = self.normalized();
        (n.start_row..=n.end_row)
            .flat_map(move |row| (n.start_col..=n.end_col).map(move |col| (row, col)))
    }
}

impl fmt::Display for GridRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start_row == self.end_row && self.start_col == self.end_col {
            write!(f, "{}[{}]", self.region, cell_key(self.start_row, self.start_col))
        } else {
            write!(
                f,
                "{}[{}:{}]",
                self.region,
                cell_key(self.start_row, self.start_col),
                cell_key(self.end_row, self.end_col)
            )
        }
    }
}

impl FromStr for GridRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
