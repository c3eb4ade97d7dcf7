//! # evograph
//!
//! Generates customizable evolution charts from function-score workbooks.
//!
//! A workbook is parsed into a normalized [`Table`], layered color policy is
//! resolved from defaults, workbook-embedded tables, and saved preferences,
//! and a [`ChartModelBuilder`] turns table + policy + selection into a
//! renderer-agnostic [`ChartModel`]. Rendering itself happens behind the
//! [`Renderer`] trait.
//!
//! ## Example
//!
//! ```rust
//! use evograph::prelude::*;
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
//! let session = Session::default();
//! let policy = session.policy_for(&table, None);
//! let selection = session.selection_for(&table);
//!
//! let model = ChartModelBuilder::new(ChartOptions::classic().with_title("Evolución"))
//!     .build(&table, &policy, &selection, ChartKind::Line)
//!     .unwrap();
//! assert_eq!(model.series.len(), 2);
//! ```

pub mod prelude;
pub mod render;
pub mod session;

pub use render::{ImageFormat, RenderError, Renderer};
pub use session::Session;

// Re-export core types
pub use evograph_core::{
    Color, ColorPolicy, EmbeddedTables, Error, FontSizes, LineStyle, PolicyOverrides,
    RangeColorTable, Result, Row, SeriesStyle, Table, ValueColorTable,
};

// Re-export chart types
pub use evograph_chart::{
    Band, ChartError, ChartKind, ChartModel, ChartModelBuilder, ChartOptions, ChartSeries,
    SeriesGeometry, TickColorSource, TickWrapPolicy,
};

// Re-export workbook reading
pub use evograph_xlsx::{
    detect, ParsedTable, SpreadsheetSchema, TableLayout, Workbook, XlsxError,
    DEFAULT_DETECTION_ORDER,
};

// Re-export preference handling
pub use evograph_prefs::{
    JsonFileStore, MemoryStore, PreferenceStore, Preferences, StoreError,
};
