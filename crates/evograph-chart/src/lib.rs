//! # evograph-chart
//!
//! The spreadsheet-to-chart-model transformation: turns a parsed score table,
//! a resolved color policy, and the user's selection into a fully-specified,
//! renderer-agnostic [`ChartModel`].

mod builder;
mod error;
mod model;
mod options;
mod ticks;

pub use builder::ChartModelBuilder;
pub use error::{ChartError, ChartResult};
pub use model::{
    AxisTitles, Band, Bar, ChartKind, ChartModel, ChartSeries, LegendSpec, Point, SeriesGeometry,
};
pub use options::{
    ChartOptions, TickColorSource, TickWrapPolicy, AREA_FILL_ALPHA, BAND_ALPHA, BAR_GROUP_WIDTH,
};
pub use ticks::{tick_colors, wrap_label};
