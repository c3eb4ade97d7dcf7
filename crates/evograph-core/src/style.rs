//! Per-series line styling

use crate::color::Color;
use crate::error::{Error, Result};

/// Line style for a plotted series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    DashDot,
}

/// Rotating default palette, indexed by series position.
pub const SERIES_PALETTE: [Color; 5] = [
    Color::rgb(0x1F, 0x77, 0xB4),
    Color::rgb(0xFF, 0x7F, 0x0E),
    Color::rgb(0x2C, 0xA0, 0x2C),
    Color::rgb(0xD6, 0x27, 0x28),
    Color::rgb(0x94, 0x67, 0xBD),
];

/// Default line width in points
pub const DEFAULT_LINE_WIDTH: u8 = 3;

/// Allowed line width range
pub const MIN_LINE_WIDTH: u8 = 1;
pub const MAX_LINE_WIDTH: u8 = 5;

/// Resolved visual style for one series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeriesStyle {
    pub color: Color,
    pub line_style: LineStyle,
    pub line_width: u8,
}

impl SeriesStyle {
    /// Default style for the series at `index` in the table header.
    pub fn palette_default(index: usize) -> Self {
        Self {
            color: SERIES_PALETTE[index % SERIES_PALETTE.len()],
            line_style: LineStyle::Solid,
            line_width: DEFAULT_LINE_WIDTH,
        }
    }

    /// Replace the line width, rejecting values outside 1..=5.
    pub fn with_line_width(mut self, width: u8) -> Result<Self> {
        if !(MIN_LINE_WIDTH..=MAX_LINE_WIDTH).contains(&width) {
            return Err(Error::InvalidLineWidth(width));
        }
        self.line_width = width;
        Ok(self)
    }
}

/// Font sizes for every labeled chart element, in points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontSizes {
    pub title: u8,
    pub x_axis: u8,
    pub y_axis: u8,
    pub x_ticks: u8,
    pub y_ticks: u8,
    pub legend: u8,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            title: 18,
            x_axis: 14,
            y_axis: 14,
            x_ticks: 10,
            y_ticks: 12,
            legend: 12,
        }
    }
}
