//! The persisted preference document

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use evograph_core::{Color, ColorPolicy, FontSizes, LineStyle, PolicyOverrides, Table};

/// Everything a user can persist between sessions.
///
/// Field names are the language-neutral document keys; the Spanish keys the
/// earliest documents used are accepted as aliases on load. Color-table keys
/// are stored in string form; score keys normalize on conversion so `"0"`,
/// `0`, and `0.0` land on the same entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    #[serde(alias = "colores_series")]
    pub series_colors: BTreeMap<String, Color>,
    #[serde(alias = "estilos_linea")]
    pub line_styles: BTreeMap<String, LineStyle>,
    #[serde(alias = "grosor_linea")]
    pub line_widths: BTreeMap<String, u8>,
    #[serde(alias = "series_seleccionadas")]
    pub selected_series: Vec<String>,
    #[serde(alias = "colores_rangos")]
    pub range_colors: BTreeMap<String, Color>,
    #[serde(alias = "colores_valores")]
    pub value_colors: BTreeMap<String, Color>,
    #[serde(alias = "tamaños_fuente")]
    pub font_sizes: FontSizes,
}

impl Preferences {
    /// View this document as the saved layer of the color policy.
    ///
    /// Value-color keys that do not normalize are warned about and dropped;
    /// range keys pass through verbatim (the resolver applies its own domain
    /// rule and band building skips malformed keys).
    pub fn overrides(&self) -> PolicyOverrides {
        let mut overrides = PolicyOverrides {
            series_colors: self.series_colors.clone(),
            line_styles: self.line_styles.clone(),
            line_widths: self.line_widths.clone(),
            ..Default::default()
        };
        for (raw, color) in &self.value_colors {
            if !overrides.value_colors.insert_raw(raw, *color) {
                log::warn!("ignoring saved value color with unparseable key '{raw}'");
            }
        }
        for (key, color) in &self.range_colors {
            overrides.range_colors.insert(key.clone(), *color);
        }
        overrides
    }

    /// Resolve the effective color policy for `table`.
    pub fn policy_for(
        &self,
        table: &Table,
        embedded: Option<&evograph_core::EmbeddedTables>,
    ) -> ColorPolicy {
        ColorPolicy::resolve(table.series(), embedded, &self.overrides())
    }

    /// The saved series selection, restricted to the series `table` actually
    /// has. Falls back to all series when nothing saved survives the filter.
    pub fn selection_for(&self, table: &Table) -> Vec<String> {
        let kept: Vec<String> = self
            .selected_series
            .iter()
            .filter(|name| table.series_index(name).is_some())
            .cloned()
            .collect();
        if kept.is_empty() {
            table.series().to_vec()
        } else {
            kept
        }
    }

    /// Record an effective value color under its normalized key.
    pub fn set_value_color(&mut self, score: i64, color: Color) {
        self.value_colors.insert(score.to_string(), color);
    }
}

/// Re-import the effective tables of a resolved policy into document form.
///
/// Used on save so the persisted document reflects what the user actually
/// saw; round-tripping it through [`Preferences::overrides`] and the resolver
/// is a no-op.
pub fn remember_policy(prefs: &mut Preferences, policy: &ColorPolicy) {
    for (name, style) in policy.series_styles() {
        prefs.series_colors.insert(name.to_string(), style.color);
        prefs.line_styles.insert(name.to_string(), style.line_style);
        prefs.line_widths.insert(name.to_string(), style.line_width);
    }
    for (score, color) in policy.values.iter() {
        prefs.value_colors.insert(score.to_string(), color);
    }
    for (key, color) in policy.ranges.iter() {
        prefs.range_colors.insert(key.to_string(), color);
    }
}
