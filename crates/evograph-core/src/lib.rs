//! # evograph-core
//!
//! Core data structures for the evograph evolution-chart generator:
//! - [`Table`] and [`Row`] - the normalized score table parsed from a workbook
//! - [`Color`] - validated `#RRGGBB` hex colors
//! - [`SeriesStyle`] and [`LineStyle`] - per-series visual styling
//! - [`ValueColorTable`], [`RangeColorTable`], [`ColorPolicy`] - the layered
//!   color policy (defaults < workbook-embedded < saved preferences)
//!
//! ## Example
//!
//! ```rust
//! use evograph_core::{ColorPolicy, PolicyOverrides, Row, Table};
//!
//! let table = Table::new(
//!     vec!["Basal".into(), "Clinica".into()],
//!     vec![
//!         Row::new("Marcha", vec![Some(2.0), Some(3.0)]),
//!         Row::new("Lenguaje", vec![Some(4.0), None]),
//!     ],
//! )
//! .unwrap();
//!
//! let policy = ColorPolicy::resolve(table.series(), None, &PolicyOverrides::default());
//! assert!(policy.series_style("Basal").is_some());
//! ```

pub mod color;
pub mod error;
pub mod policy;
pub mod style;
pub mod table;

// Re-exports for convenience
pub use color::Color;
pub use error::{Error, Result};
pub use policy::{
    encode_range_key, parse_range_key, ColorPolicy, EmbeddedTables, PolicyOverrides,
    RangeColorTable, ValueColorTable, DEFAULT_VALUE_COLORS, SCORE_MAX, SCORE_MIN,
};
pub use style::{
    FontSizes, LineStyle, SeriesStyle, DEFAULT_LINE_WIDTH, MAX_LINE_WIDTH, MIN_LINE_WIDTH,
    SERIES_PALETTE,
};
pub use table::{Row, Table};
