//! Grid geometry: table rectangle, label bands and grid spec

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;

/// Pixel size of one grid cell, used to derive table rectangles
pub const CELL_WIDTH: f64 = 120.0;

/// Pixel height of one grid cell
pub const CELL_HEIGHT: f64 = 32.0;

/// A table's on-canvas rectangle
///
/// Width and height are derived from the grid spec and the fixed cell size;
/// only the origin is independently authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Header band counts around the body grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelBands {
    pub top_rows: u32,
    pub bottom_rows: u32,
    pub left_cols: u32,
    pub right_cols: u32,
}

impl LabelBands {
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Body grid dimensions plus the surrounding label bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSpec {
    pub body_rows: u32,
    pub body_cols: u32,
    pub label_bands: LabelBands,
}

impl GridSpec {
    pub fn new(body_rows: u32, body_cols: u32, label_bands: LabelBands) -> Self {
        Self {
            body_rows,
            body_cols,
            label_bands,
        }
    }

    /// Total grid width in cells, bands included
    pub fn total_cols(&self) -> u32 {
        self.label_bands.left_cols + self.body_cols + self.label_bands.right_cols
    }

    /// Total grid height in cells, bands included
    pub fn total_rows(&self) -> u32 {
        self.label_bands.top_rows + self.body_rows + self.label_bands.bottom_rows
    }
}

/// One of the four label bands around the body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelBand {
    Top,
    Bottom,
    Left,
    Right,
}

impl LabelBand {
    pub const ALL: [LabelBand; 4] = [
        LabelBand::Top,
        LabelBand::Bottom,
        LabelBand::Left,
        LabelBand::Right,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LabelBand::Top => "top",
            LabelBand::Bottom => "bottom",
            LabelBand::Left => "left",
            LabelBand::Right => "right",
        }
    }

    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "top" => Ok(LabelBand::Top),
            "bottom" => Ok(LabelBand::Bottom),
            "left" => Ok(LabelBand::Left),
            "right" => Ok(LabelBand::Right),
            _ => Err(Error::UnknownLabelBand(name.to_string())),
        }
    }
}

impl fmt::Display for LabelBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
