//! The interactive session
//!
//! One [`Session`] per user, owning the single in-memory preference document.
//! It is initialized from [`PreferenceStore::load`], mutated only through the
//! setters here, and persisted wholesale by [`Session::save`]. Nothing else
//! holds mutable preference state.

use evograph_core::{
    parse_range_key, Color, ColorPolicy, EmbeddedTables, Error, FontSizes, LineStyle, Result,
    Table, MAX_LINE_WIDTH, MIN_LINE_WIDTH,
};
use evograph_prefs::{PreferenceStore, Preferences, StoreResult};

#[derive(Debug, Clone, Default)]
pub struct Session {
    prefs: Preferences,
}

impl Session {
    /// Start a session from whatever the store has; an unreachable store
    /// degrades to defaults inside `load`.
    pub fn load(store: &dyn PreferenceStore) -> Self {
        Self {
            prefs: store.load(),
        }
    }

    pub fn new(prefs: Preferences) -> Self {
        Self { prefs }
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    pub fn set_series_color(&mut self, series: &str, color: Color) {
        self.prefs.series_colors.insert(series.to_string(), color);
    }

    pub fn set_line_style(&mut self, series: &str, style: LineStyle) {
        self.prefs.line_styles.insert(series.to_string(), style);
    }

    pub fn set_line_width(&mut self, series: &str, width: u8) -> Result<()> {
        if !(MIN_LINE_WIDTH..=MAX_LINE_WIDTH).contains(&width) {
            return Err(Error::InvalidLineWidth(width));
        }
        self.prefs.line_widths.insert(series.to_string(), width);
        Ok(())
    }

    pub fn set_selected_series(&mut self, selection: Vec<String>) {
        self.prefs.selected_series = selection;
    }

    pub fn set_value_color(&mut self, score: i64, color: Color) {
        self.prefs.set_value_color(score, color);
    }

    /// Record a background color for a range key; the key must parse.
    pub fn set_range_color(&mut self, key: &str, color: Color) -> Result<()> {
        if parse_range_key(key).is_none() {
            return Err(Error::other(format!(
                "invalid range key '{key}': expected '{{low}}-{{high}}'"
            )));
        }
        self.prefs.range_colors.insert(key.to_string(), color);
        Ok(())
    }

    pub fn set_font_sizes(&mut self, sizes: FontSizes) {
        self.prefs.font_sizes = sizes;
    }

    /// The selection to plot for `table`: the saved one filtered to live
    /// series, all series when nothing survives.
    pub fn selection_for(&self, table: &Table) -> Vec<String> {
        self.prefs.selection_for(table)
    }

    /// Resolve the effective color policy for `table`.
    pub fn policy_for(&self, table: &Table, embedded: Option<&EmbeddedTables>) -> ColorPolicy {
        self.prefs.policy_for(table, embedded)
    }

    /// Fold a resolved policy back into the document, so a save reflects
    /// exactly what the user saw. Re-resolving afterwards changes nothing.
    pub fn remember_policy(&mut self, policy: &ColorPolicy) {
        evograph_prefs::remember_policy(&mut self.prefs, policy);
    }

    /// Persist the whole document. Failures surface; the previous document
    /// stays intact.
    pub fn save(&self, store: &dyn PreferenceStore) -> StoreResult<()> {
        store.save(&self.prefs)
    }
}
