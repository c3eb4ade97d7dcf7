//! Property tests for the color policy resolver

use proptest::prelude::*;

use evograph_core::{
    Color, ColorPolicy, EmbeddedTables, LineStyle, PolicyOverrides, RangeColorTable,
    ValueColorTable,
};

fn arb_color() -> impl Strategy<Value = Color> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Color::rgb(r, g, b))
}

fn arb_line_style() -> impl Strategy<Value = LineStyle> {
    prop_oneof![
        Just(LineStyle::Solid),
        Just(LineStyle::Dashed),
        Just(LineStyle::DashDot),
    ]
}

fn arb_series_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Basal".to_string()),
        Just("Clinica".to_string()),
        Just("Funcionalidad".to_string()),
        Just("Removed".to_string()),
    ]
}

fn arb_range_key() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("-0_5-0_5".to_string()),
        Just("0_5-1_5".to_string()),
        Just("1_5-2_5".to_string()),
        Just("7-8".to_string()),
        Just("bogus".to_string()),
    ]
}

fn arb_overrides() -> impl Strategy<Value = PolicyOverrides> {
    let series_colors = prop::collection::btree_map(arb_series_name(), arb_color(), 0..4);
    let line_styles = prop::collection::btree_map(arb_series_name(), arb_line_style(), 0..4);
    let line_widths = prop::collection::btree_map(arb_series_name(), 0u8..8, 0..4);
    let value_colors = prop::collection::btree_map(-2i64..8, arb_color(), 0..6);
    let range_colors = prop::collection::btree_map(arb_range_key(), arb_color(), 0..4);

    (
        series_colors,
        line_styles,
        line_widths,
        value_colors,
        range_colors,
    )
        .prop_map(|(series_colors, line_styles, line_widths, values, ranges)| {
            let mut overrides = PolicyOverrides {
                series_colors,
                line_styles,
                line_widths,
                ..Default::default()
            };
            for (k, v) in values {
                overrides.value_colors.insert(k, v);
            }
            for (k, v) in ranges {
                overrides.range_colors.insert(k, v);
            }
            overrides
        })
}

fn arb_embedded() -> impl Strategy<Value = Option<EmbeddedTables>> {
    prop::option::of(prop::collection::btree_map(0i64..6, arb_color(), 0..6).prop_map(|m| {
        let mut values = ValueColorTable::new();
        for (k, v) in m {
            values.insert(k, v);
        }
        EmbeddedTables::from_values(values)
    }))
}

proptest! {
    // Re-merging an already-merged saved layer changes nothing.
    #[test]
    fn resolve_is_idempotent(saved in arb_overrides(), embedded in arb_embedded()) {
        let series = vec!["Basal".to_string(), "Clinica".to_string(), "Funcionalidad".to_string()];
        let once = ColorPolicy::resolve(&series, embedded.as_ref(), &saved);
        let again = ColorPolicy::resolve(&series, embedded.as_ref(), &PolicyOverrides::from(&once));
        prop_assert_eq!(once, again);
    }

    // Integer, float, and string spellings of a score land on the same entry.
    #[test]
    fn score_keys_normalize_consistently(score in -50i64..50) {
        let as_int = ValueColorTable::normalize_key(&score.to_string());
        let as_float = ValueColorTable::normalize_key(&format!("{score}.0"));
        prop_assert_eq!(as_int, Some(score));
        prop_assert_eq!(as_float, Some(score));
    }

    // Every default key still resolves to some color no matter what the
    // saved layer contains.
    #[test]
    fn defaults_always_resolve(saved in arb_overrides()) {
        let policy = ColorPolicy::resolve(&["Basal".to_string()], None, &saved);
        for score in evograph_core::SCORE_MIN..=evograph_core::SCORE_MAX {
            prop_assert!(policy.values.get(score).is_some());
        }
        prop_assert_eq!(policy.ranges.parsed().len(), RangeColorTable::defaults().len());
    }
}
