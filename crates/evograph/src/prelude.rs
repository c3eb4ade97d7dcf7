//! Prelude module - common imports for evograph users
//!
//! ```rust
//! use evograph::prelude::*;
//! ```

pub use crate::{
    // Chart building
    ChartKind,
    ChartModel,
    ChartModelBuilder,
    ChartOptions,

    Color,
    ColorPolicy,
    EmbeddedTables,

    // Error types
    Error,
    FontSizes,

    // Preference handling
    JsonFileStore,
    LineStyle,
    MemoryStore,
    PreferenceStore,
    Preferences,

    Result,
    Row,
    SeriesStyle,

    // Session and rendering boundary
    Session,
    ImageFormat,
    Renderer,

    SpreadsheetSchema,
    // Main types
    Table,
    TableLayout,
    TickColorSource,
    TickWrapPolicy,

    // Workbook reading
    Workbook,
};
