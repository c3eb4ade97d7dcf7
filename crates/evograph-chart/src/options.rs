//! Chart build configuration

use evograph_core::FontSizes;

/// Fraction of each row slot occupied by a bar group
pub const BAR_GROUP_WIDTH: f64 = 0.8;

/// Opacity of background range bands
pub const BAND_ALPHA: f64 = 0.3;

/// Fill opacity of area series
pub const AREA_FILL_ALPHA: f64 = 0.5;

/// Tick-label line-wrapping rule.
///
/// Two rules exist in deployed workbooks; both are selectable.
/// [`TickWrapPolicy::FirstSpace`] is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TickWrapPolicy {
    /// Insert a single line break at the first space of every label
    #[default]
    FirstSpace,
    /// Always wrap the first three labels, then alternate one-line/two-line
    Alternating,
}

/// Where per-row tick label colors come from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TickColorSource {
    /// The first series of the current selection
    #[default]
    FirstSelected,
    /// A fixed baseline series, independent of the selection
    /// (fixed-layout workbooks color ticks from their "Basal" column)
    Series(String),
}

/// Everything configurable about a build that is not data or policy.
///
/// Y bounds are configuration, not a constant: callers pick the classic 0..5
/// window or the padded one that leaves the outer bands visible.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub title: String,
    pub y_bounds: (f64, f64),
    pub wrap: TickWrapPolicy,
    pub tick_color_source: TickColorSource,
    pub font_sizes: FontSizes,
}

impl ChartOptions {
    /// The classic 0..5 Y window.
    pub fn classic() -> Self {
        Self {
            title: String::new(),
            y_bounds: (0.0, 5.0),
            wrap: TickWrapPolicy::default(),
            tick_color_source: TickColorSource::default(),
            font_sizes: FontSizes::default(),
        }
    }

    /// The padded -0.5..5.5 window, leaving room for the extreme bands.
    pub fn padded() -> Self {
        Self {
            y_bounds: (-0.5, 5.5),
            ..Self::classic()
        }
    }

    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_wrap(mut self, wrap: TickWrapPolicy) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn with_tick_color_source(mut self, source: TickColorSource) -> Self {
        self.tick_color_source = source;
        self
    }
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self::classic()
    }
}
