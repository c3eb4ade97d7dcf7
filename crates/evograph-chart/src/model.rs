//! The renderer-agnostic chart model
//!
//! [`ChartModel`] is a fully-specified value object: everything a renderer
//! needs to draw the chart, nothing it has to compute. It is built fresh on
//! every render and never mutated afterwards; identical inputs produce an
//! identical model, which is what makes repeated renders byte-identical.

use evograph_core::{Color, FontSizes, SeriesStyle};

/// The four supported chart types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ChartKind {
    Line,
    Bar,
    Scatter,
    Area,
}

/// One (x, y) sample
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// One bar of a grouped-bar series
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bar {
    /// Left edge of the bar
    pub x: f64,
    pub height: f64,
}

/// Series geometry, by chart kind.
///
/// A `None` sample is a gap: the row had no score there. Lines break, scatter
/// points vanish, bars are absent; nothing is ever plotted at zero.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SeriesGeometry {
    /// Row-indexed samples (line, scatter, area)
    Points(Vec<Option<Point>>),
    /// Grouped bars with a fixed per-series width
    Bars { width: f64, bars: Vec<Option<Bar>> },
}

/// One plotted series
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartSeries {
    pub name: String,
    pub style: SeriesStyle,
    pub geometry: SeriesGeometry,
    /// Fill opacity for area series; `None` for unfilled kinds
    pub fill_alpha: Option<f64>,
}

/// A translucent horizontal background band
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Band {
    pub y0: f64,
    pub y1: f64,
    pub color: Color,
    pub alpha: f64,
}

/// Legend layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegendSpec {
    /// One column per plotted series, laid out under the chart
    pub columns: usize,
    pub font_size: u8,
}

/// Axis titles
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisTitles {
    pub x: String,
    pub y: String,
}

/// The complete chart description handed to a renderer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartModel {
    pub kind: ChartKind,
    pub title: String,
    pub series: Vec<ChartSeries>,
    /// X position of each row's tick (group centers in bar mode)
    pub x_tick_positions: Vec<f64>,
    /// Wrapped tick labels, parallel to the positions
    pub x_tick_labels: Vec<String>,
    /// Per-tick label colors, parallel to the labels
    pub x_tick_colors: Vec<Color>,
    pub y_range: (f64, f64),
    /// Y tick values; always the integer score domain
    pub y_ticks: Vec<i64>,
    /// Drawn beneath all series, ordered by lower bound
    pub background_bands: Vec<Band>,
    pub legend: LegendSpec,
    pub axis_titles: AxisTitles,
    pub font_sizes: FontSizes,
}
