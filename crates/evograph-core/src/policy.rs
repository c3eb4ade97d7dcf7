//! Color policy tables and the layered resolver
//!
//! Three sources of truth feed every chart render, in increasing priority:
//! built-in defaults, values embedded in the workbook itself, and previously
//! saved user preferences. [`ColorPolicy::resolve`] merges them into one
//! effective mapping per concern (series styles, per-score label colors,
//! per-range background colors). The merge is pure and idempotent: feeding a
//! resolved policy back in as the saved layer changes nothing.

use std::collections::BTreeMap;

use lazy_regex::regex;
use once_cell::sync::Lazy as OnceLazy;

use crate::color::Color;
use crate::style::{LineStyle, SeriesStyle, MAX_LINE_WIDTH, MIN_LINE_WIDTH};

/// Score domain covered by the built-in value-color defaults.
pub const SCORE_MIN: i64 = 0;
pub const SCORE_MAX: i64 = 5;

/// Built-in per-score label colors, index = score 0..=5.
pub const DEFAULT_VALUE_COLORS: [Color; 6] = [
    Color::rgb(0xFF, 0x00, 0x00), // red
    Color::rgb(0xFF, 0xA5, 0x00), // orange
    Color::rgb(0xFF, 0xFF, 0x00), // yellow
    Color::rgb(0x00, 0x80, 0x00), // green
    Color::rgb(0x00, 0x00, 0xFF), // blue
    Color::rgb(0x4B, 0x00, 0x82), // indigo
];

static DEFAULT_RANGE_COLORS: OnceLazy<BTreeMap<String, Color>> = OnceLazy::new(|| {
    [
        ("-0_5-0_5", Color::rgb(0xFF, 0xC0, 0xC0)),
        ("0_5-1_5", Color::rgb(0xFF, 0xE0, 0xB2)),
        ("1_5-2_5", Color::rgb(0xFF, 0xFF, 0xE0)),
        ("2_5-3_5", Color::rgb(0xC8, 0xE6, 0xC9)),
        ("3_5-4_5", Color::rgb(0xBB, 0xDE, 0xFB)),
        ("4_5-5_5", Color::rgb(0xD3, 0xE0, 0xF0)),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
});

/// Parse a range key such as `"0-1"` or `"-0_5-0_5"` into `(low, high)`.
///
/// The grammar is optional sign + digits + optional decimal, a dash, then the
/// same again, after the `_` decimal substitute has been restored to `.`.
/// Returns `None` for keys that do not match or whose bounds are not strictly
/// increasing; callers warn and skip those.
pub fn parse_range_key(key: &str) -> Option<(f64, f64)> {
    let restored = key.replace('_', ".");
    let caps = regex!(r"^(-?\d+\.?\d*)-(-?\d+\.?\d*)$").captures(&restored)?;
    let low: f64 = caps.get(1)?.as_str().parse().ok()?;
    let high: f64 = caps.get(2)?.as_str().parse().ok()?;
    if low < high {
        Some((low, high))
    } else {
        None
    }
}

/// Encode bounds back into the key grammar, substituting `_` for `.`.
pub fn encode_range_key(low: f64, high: f64) -> String {
    fn bound(v: f64) -> String {
        if v.fract() == 0.0 {
            format!("{}", v as i64)
        } else {
            format!("{}", v).replace('.', "_")
        }
    }
    format!("{}-{}", bound(low), bound(high))
}

/// Per-integer-score label colors.
///
/// Keys are normalized integers: `0`, `"0"` and `0.0` all land on the same
/// entry, mirroring the `str(int(value))` convention the persisted documents
/// use.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValueColorTable {
    entries: BTreeMap<i64, Color>,
}

impl ValueColorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in default table covering scores 0..=5.
    pub fn defaults() -> Self {
        let entries = DEFAULT_VALUE_COLORS
            .iter()
            .enumerate()
            .map(|(i, c)| (i as i64, *c))
            .collect();
        Self { entries }
    }

    /// Normalize a raw key (int, float, or their string forms) to the
    /// canonical integer. Truncates toward zero, as `int()` does.
    pub fn normalize_key(raw: &str) -> Option<i64> {
        let raw = raw.trim();
        if let Ok(n) = raw.parse::<i64>() {
            return Some(n);
        }
        raw.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64)
    }

    pub fn insert(&mut self, score: i64, color: Color) {
        self.entries.insert(score, color);
    }

    /// Insert under a raw key, returning false (and leaving the table
    /// untouched) when the key does not normalize.
    pub fn insert_raw(&mut self, raw: &str, color: Color) -> bool {
        match Self::normalize_key(raw) {
            Some(score) => {
                self.entries.insert(score, color);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, score: i64) -> Option<Color> {
        self.entries.get(&score).copied()
    }

    pub fn contains(&self, score: i64) -> bool {
        self.entries.contains_key(&score)
    }

    /// Label color for a (possibly missing) numeric value: truncated to the
    /// nearest lower integer and looked up, neutral on any miss.
    pub fn color_for(&self, value: Option<f64>) -> Color {
        match value {
            Some(v) if v.is_finite() => self
                .get(v.trunc() as i64)
                .unwrap_or(Color::NEUTRAL),
            _ => Color::NEUTRAL,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, Color)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Background ranges derived from this table: each score `v` maps to the
    /// band `v..v+1`, keeping its color. Fixed-layout workbooks carry only a
    /// score table; their band colors come from this derivation.
    pub fn derived_ranges(&self) -> RangeColorTable {
        let mut ranges = RangeColorTable::new();
        for (score, color) in self.iter() {
            ranges.insert(encode_range_key(score as f64, (score + 1) as f64), color);
        }
        ranges
    }

    /// Three-way layered merge for value colors.
    ///
    /// Domain is `defaults` plus `embedded`; `saved` keys outside that domain
    /// are dropped silently.
    pub fn resolve(defaults: &Self, embedded: &Self, saved: &Self) -> Self {
        let mut out = defaults.clone();
        for (k, v) in embedded.iter() {
            out.insert(k, v);
        }
        for (k, v) in saved.iter() {
            if out.contains(k) {
                out.insert(k, v);
            } else {
                log::debug!("dropping saved value color for out-of-domain score {k}");
            }
        }
        out
    }
}

/// Per-numeric-range background colors, keyed by the `"{low}-{high}"` grammar.
///
/// Keys are kept verbatim; they are parsed (and malformed ones warned about
/// and skipped) only when background bands are laid out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RangeColorTable {
    entries: BTreeMap<String, Color>,
}

impl RangeColorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in six half-unit bands spanning -0.5..5.5.
    pub fn defaults() -> Self {
        Self {
            entries: DEFAULT_RANGE_COLORS.clone(),
        }
    }

    pub fn insert<S: Into<String>>(&mut self, key: S, color: Color) {
        self.entries.insert(key.into(), color);
    }

    pub fn get(&self, key: &str) -> Option<Color> {
        self.entries.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Color)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse every key, warn about and drop the malformed ones, and return
    /// the valid bands ordered by lower bound.
    pub fn parsed(&self) -> Vec<(f64, f64, Color)> {
        let mut bands: Vec<(f64, f64, Color)> = Vec::with_capacity(self.entries.len());
        for (key, color) in self.iter() {
            match parse_range_key(key) {
                Some((low, high)) => bands.push((low, high, color)),
                None => {
                    log::warn!("ignoring malformed range key '{key}': expected '{{low}}-{{high}}'");
                }
            }
        }
        bands.sort_by(|a, b| a.0.total_cmp(&b.0));
        bands
    }

    /// Three-way layered merge for range colors; same domain rule as
    /// [`ValueColorTable::resolve`].
    pub fn resolve(defaults: &Self, embedded: &Self, saved: &Self) -> Self {
        let mut out = defaults.clone();
        for (k, v) in embedded.iter() {
            out.insert(k, v);
        }
        for (k, v) in saved.iter() {
            if out.contains(k) {
                out.insert(k, v);
            } else {
                log::debug!("dropping saved range color for out-of-domain key '{k}'");
            }
        }
        out
    }
}

/// Color tables read out of the workbook itself.
///
/// Values come from the fixed-layout score/color block; ranges are derived
/// from it. Empty cells never make it in here: the reader produces
/// `Option<Color>` and only inserts actual colors, so an unset embedded cell
/// can never shadow a default.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmbeddedTables {
    pub values: ValueColorTable,
    pub ranges: RangeColorTable,
}

impl EmbeddedTables {
    /// Build from an embedded score table, deriving the band table from it.
    pub fn from_values(values: ValueColorTable) -> Self {
        let ranges = values.derived_ranges();
        Self { values, ranges }
    }
}

/// The saved-preference layer, as plain maps keyed by series name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolicyOverrides {
    pub series_colors: BTreeMap<String, Color>,
    pub line_styles: BTreeMap<String, LineStyle>,
    pub line_widths: BTreeMap<String, u8>,
    pub value_colors: ValueColorTable,
    pub range_colors: RangeColorTable,
}

/// The effective, fully-resolved color policy for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorPolicy {
    series: BTreeMap<String, SeriesStyle>,
    pub values: ValueColorTable,
    pub ranges: RangeColorTable,
}

impl ColorPolicy {
    /// Merge defaults, workbook-embedded tables, and saved preferences.
    ///
    /// `series` is the current table's header; saved entries for series that
    /// no longer exist are dropped, so no orphan survives into the effective
    /// policy.
    pub fn resolve(
        series: &[String],
        embedded: Option<&EmbeddedTables>,
        saved: &PolicyOverrides,
    ) -> Self {
        let mut styles = BTreeMap::new();
        for (idx, name) in series.iter().enumerate() {
            let mut style = SeriesStyle::palette_default(idx);
            if let Some(color) = saved.series_colors.get(name) {
                style.color = *color;
            }
            if let Some(line_style) = saved.line_styles.get(name) {
                style.line_style = *line_style;
            }
            if let Some(width) = saved.line_widths.get(name) {
                if (MIN_LINE_WIDTH..=MAX_LINE_WIDTH).contains(width) {
                    style.line_width = *width;
                } else {
                    log::warn!("ignoring saved line width {width} for series '{name}'");
                }
            }
            styles.insert(name.clone(), style);
        }

        let empty = EmbeddedTables::default();
        let embedded = embedded.unwrap_or(&empty);
        Self {
            series: styles,
            values: ValueColorTable::resolve(
                &ValueColorTable::defaults(),
                &embedded.values,
                &saved.value_colors,
            ),
            ranges: RangeColorTable::resolve(
                &RangeColorTable::defaults(),
                &embedded.ranges,
                &saved.range_colors,
            ),
        }
    }

    /// Effective style for a series; `None` for series outside the table.
    pub fn series_style(&self, name: &str) -> Option<SeriesStyle> {
        self.series.get(name).copied()
    }

    pub fn series_styles(&self) -> impl Iterator<Item = (&str, SeriesStyle)> + '_ {
        self.series.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl From<&ColorPolicy> for PolicyOverrides {
    /// View a resolved policy as a saved layer. Re-resolving with this as
    /// `saved` is a no-op, which is what makes preference round-trips safe.
    fn from(policy: &ColorPolicy) -> Self {
        let mut overrides = PolicyOverrides::default();
        for (name, style) in policy.series_styles() {
            overrides.series_colors.insert(name.to_string(), style.color);
            overrides.line_styles.insert(name.to_string(), style.line_style);
            overrides.line_widths.insert(name.to_string(), style.line_width);
        }
        overrides.value_colors = policy.values.clone();
        overrides.range_colors = policy.ranges.clone();
        overrides
    }
}
