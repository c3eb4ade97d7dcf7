//! Chart model builder tests

use pretty_assertions::assert_eq;

use evograph_chart::{
    ChartError, ChartKind, ChartModelBuilder, ChartOptions, SeriesGeometry, TickWrapPolicy,
    BAND_ALPHA, BAR_GROUP_WIDTH,
};
use evograph_core::{
    Color, ColorPolicy, PolicyOverrides, Row, Table, DEFAULT_VALUE_COLORS,
};

fn sample_table() -> Table {
    Table::new(
        vec!["A".to_string(), "B".to_string()],
        vec![
            Row::new("Walk fast", vec![Some(2.0), Some(3.0)]),
            Row::new("Talk", vec![Some(4.0), None]),
        ],
    )
    .unwrap()
}

fn sample_policy(table: &Table) -> ColorPolicy {
    ColorPolicy::resolve(table.series(), None, &PolicyOverrides::default())
}

fn selection(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn line_build_has_one_entry_per_series_and_point_per_row() {
    let table = sample_table();
    let policy = sample_policy(&table);
    let builder = ChartModelBuilder::new(ChartOptions::classic());

    for subset in [selection(&["A"]), selection(&["B"]), selection(&["A", "B"])] {
        let model = builder
            .build(&table, &policy, &subset, ChartKind::Line)
            .unwrap();
        assert_eq!(model.series.len(), subset.len());
        for series in &model.series {
            match &series.geometry {
                SeriesGeometry::Points(points) => assert_eq!(points.len(), table.row_count()),
                other => panic!("expected points, got {other:?}"),
            }
        }
    }
}

#[test]
fn null_scores_become_gaps_not_zeros() {
    let table = sample_table();
    let policy = sample_policy(&table);
    let model = ChartModelBuilder::new(ChartOptions::classic())
        .build(&table, &policy, &selection(&["B"]), ChartKind::Line)
        .unwrap();

    let SeriesGeometry::Points(points) = &model.series[0].geometry else {
        panic!("expected points");
    };
    assert_eq!(points[0].map(|p| p.y), Some(3.0));
    assert_eq!(points[1], None);
}

#[test]
fn grouped_bars_never_overflow_their_slot() {
    let table = Table::new(
        vec!["A".into(), "B".into(), "C".into()],
        vec![Row::new("F", vec![Some(1.0), Some(2.0), Some(3.0)])],
    )
    .unwrap();
    let policy = sample_policy(&table);
    let builder = ChartModelBuilder::new(ChartOptions::classic());

    for subset in [
        selection(&["A"]),
        selection(&["A", "B"]),
        selection(&["A", "B", "C"]),
    ] {
        let model = builder
            .build(&table, &policy, &subset, ChartKind::Bar)
            .unwrap();
        for series in &model.series {
            let SeriesGeometry::Bars { width, .. } = &series.geometry else {
                panic!("expected bars");
            };
            assert!(width * subset.len() as f64 <= BAR_GROUP_WIDTH + 1e-12);
        }
    }
}

#[test]
fn bar_ticks_sit_at_the_group_center() {
    let table = sample_table();
    let policy = sample_policy(&table);
    let model = ChartModelBuilder::new(ChartOptions::classic())
        .build(&table, &policy, &selection(&["A", "B"]), ChartKind::Bar)
        .unwrap();

    let width = BAR_GROUP_WIDTH / 2.0;
    // two series: the tick sits half a bar width into the group
    assert_eq!(model.x_tick_positions[0], width / 2.0);
    assert_eq!(model.x_tick_positions[1], 1.0 + width / 2.0);

    // second series' bars are offset by one bar width
    let SeriesGeometry::Bars { bars, .. } = &model.series[1].geometry else {
        panic!("expected bars");
    };
    assert_eq!(bars[0].unwrap().x, width);
}

#[test]
fn scatter_selection_scenario() {
    // rows [("Walk",[2,3]), ("Talk",[4,None])], series [A,B], selecting only
    // A in scatter mode
    let table = Table::new(
        vec!["A".to_string(), "B".to_string()],
        vec![
            Row::new("Walk", vec![Some(2.0), Some(3.0)]),
            Row::new("Talk", vec![Some(4.0), None]),
        ],
    )
    .unwrap();
    let policy = sample_policy(&table);
    let model = ChartModelBuilder::new(ChartOptions::classic())
        .build(&table, &policy, &selection(&["A"]), ChartKind::Scatter)
        .unwrap();

    assert_eq!(model.series.len(), 1);
    let SeriesGeometry::Points(points) = &model.series[0].geometry else {
        panic!("expected points");
    };
    assert_eq!(points.len(), 2);
    assert_eq!(points[1].unwrap().y, 4.0);

    // tick colors follow the first selected series' values (2 and 4)
    assert_eq!(model.x_tick_colors[0], DEFAULT_VALUE_COLORS[2]);
    assert_eq!(model.x_tick_colors[1], DEFAULT_VALUE_COLORS[4]);
}

#[test]
fn tick_colors_can_come_from_a_baseline_series() {
    let table = sample_table();
    let policy = sample_policy(&table);
    let options = ChartOptions::classic()
        .with_tick_color_source(evograph_chart::TickColorSource::Series("B".to_string()));
    let model = ChartModelBuilder::new(options)
        .build(&table, &policy, &selection(&["A"]), ChartKind::Line)
        .unwrap();

    // colored from B (3, gap) although only A is plotted
    assert_eq!(model.x_tick_colors[0], DEFAULT_VALUE_COLORS[3]);
    assert_eq!(model.x_tick_colors[1], Color::NEUTRAL);
}

#[test]
fn empty_selection_and_empty_table_are_distinct_errors() {
    let table = sample_table();
    let policy = sample_policy(&table);
    let builder = ChartModelBuilder::new(ChartOptions::classic());

    assert!(matches!(
        builder.build(&table, &policy, &[], ChartKind::Line),
        Err(ChartError::EmptySelection)
    ));

    let empty = Table::new(vec!["A".to_string()], vec![]).unwrap();
    let empty_policy = sample_policy(&empty);
    assert!(matches!(
        builder.build(&empty, &empty_policy, &selection(&["A"]), ChartKind::Line),
        Err(ChartError::EmptyTable)
    ));

    assert!(matches!(
        builder.build(&table, &policy, &selection(&["Nope"]), ChartKind::Line),
        Err(ChartError::UnknownSeries(_))
    ));
}

#[test]
fn malformed_range_key_drops_exactly_one_band() {
    let table = sample_table();
    let mut saved = PolicyOverrides::default();
    let clean = ColorPolicy::resolve(table.series(), None, &saved);

    // inject a bogus key through the embedded layer, which extends the domain
    let mut embedded_values = evograph_core::ValueColorTable::new();
    embedded_values.insert(0, Color::WHITE);
    let mut embedded = evograph_core::EmbeddedTables::from_values(embedded_values);
    embedded.ranges.insert("bogus", Color::WHITE);
    saved.range_colors.insert("bogus", Color::BLACK);
    let dirty = ColorPolicy::resolve(table.series(), Some(&embedded), &saved);

    let builder = ChartModelBuilder::new(ChartOptions::classic());
    let clean_model = builder
        .build(&table, &clean, &selection(&["A"]), ChartKind::Line)
        .unwrap();
    let dirty_model = builder
        .build(&table, &dirty, &selection(&["A"]), ChartKind::Line)
        .unwrap();

    // bogus key excluded; only the embedded 0..1 band is new
    assert_eq!(
        dirty_model.background_bands.len(),
        clean_model.background_bands.len() + 1
    );
    assert!(dirty_model.background_bands.iter().all(|b| b.alpha == BAND_ALPHA));
}

#[test]
fn bands_are_ordered_by_lower_bound() {
    let table = sample_table();
    let policy = sample_policy(&table);
    let model = ChartModelBuilder::new(ChartOptions::padded())
        .build(&table, &policy, &selection(&["A"]), ChartKind::Area)
        .unwrap();

    assert_eq!(model.y_range, (-0.5, 5.5));
    assert_eq!(model.y_ticks, vec![0, 1, 2, 3, 4, 5]);
    let lows: Vec<f64> = model.background_bands.iter().map(|b| b.y0).collect();
    let mut sorted = lows.clone();
    sorted.sort_by(|a, b| a.total_cmp(b));
    assert_eq!(lows, sorted);
    // area series carry a fill opacity
    assert_eq!(model.series[0].fill_alpha, Some(evograph_chart::AREA_FILL_ALPHA));
}

#[test]
fn wrap_policy_flows_into_labels() {
    let table = sample_table();
    let policy = sample_policy(&table);

    let first_space = ChartModelBuilder::new(ChartOptions::classic())
        .build(&table, &policy, &selection(&["A"]), ChartKind::Line)
        .unwrap();
    assert_eq!(first_space.x_tick_labels[0], "Walk\nfast");
    assert_eq!(first_space.x_tick_labels[1], "Talk");

    let alternating = ChartModelBuilder::new(
        ChartOptions::classic().with_wrap(TickWrapPolicy::Alternating),
    )
    .build(&table, &policy, &selection(&["A"]), ChartKind::Line)
    .unwrap();
    // both indices < 3: always wrapped under the alternating rule too
    assert_eq!(alternating.x_tick_labels[0], "Walk\nfast");
}

#[test]
fn builds_are_deterministic() {
    let table = sample_table();
    let policy = sample_policy(&table);
    let builder = ChartModelBuilder::new(ChartOptions::padded().with_title("Evolución"));

    let a = builder
        .build(&table, &policy, &selection(&["A", "B"]), ChartKind::Bar)
        .unwrap();
    let b = builder
        .build(&table, &policy, &selection(&["A", "B"]), ChartKind::Bar)
        .unwrap();
    assert_eq!(a, b);
    assert_eq!(a.title, "Evolución");
    assert_eq!(a.legend.columns, 2);
    assert_eq!(a.axis_titles.x, "Funciones");
}
