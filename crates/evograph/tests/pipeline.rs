//! Session-to-model pipeline tests

use pretty_assertions::assert_eq;

use evograph::prelude::*;

fn sample_table() -> Table {
    Table::new(
        vec!["Basal".to_string(), "Clinica".to_string()],
        vec![
            Row::new("Subir escaleras", vec![Some(2.0), Some(3.0)]),
            Row::new("Marcha", vec![Some(4.0), None]),
            Row::new("Lenguaje", vec![Some(0.0), Some(1.0)]),
        ],
    )
    .unwrap()
}

#[test]
fn session_preferences_survive_a_store_round_trip() {
    let store = MemoryStore::new();
    let table = sample_table();

    let mut session = Session::load(&store);
    session.set_series_color("Basal", Color::rgb(0x10, 0x20, 0x30));
    session.set_line_style("Basal", LineStyle::Dashed);
    session.set_line_width("Basal", 5).unwrap();
    session.set_selected_series(vec!["Basal".to_string()]);
    session.set_value_color(0, Color::rgb(0xAA, 0, 0));
    session.set_range_color("0_5-1_5", Color::rgb(0, 0xBB, 0)).unwrap();
    session.save(&store).unwrap();

    let reloaded = Session::load(&store);
    assert_eq!(reloaded.preferences(), session.preferences());

    let policy = reloaded.policy_for(&table, None);
    let style = policy.series_style("Basal").unwrap();
    assert_eq!(style.color, Color::rgb(0x10, 0x20, 0x30));
    assert_eq!(style.line_style, LineStyle::Dashed);
    assert_eq!(style.line_width, 5);
    assert_eq!(policy.values.get(0), Some(Color::rgb(0xAA, 0, 0)));
    assert_eq!(policy.ranges.get("0_5-1_5"), Some(Color::rgb(0, 0xBB, 0)));

    let selection = reloaded.selection_for(&table);
    assert_eq!(selection, vec!["Basal".to_string()]);

    let model = ChartModelBuilder::new(ChartOptions::classic())
        .build(&table, &policy, &selection, ChartKind::Line)
        .unwrap();
    assert_eq!(model.series.len(), 1);
    assert_eq!(model.series[0].style.color, Color::rgb(0x10, 0x20, 0x30));
}

#[test]
fn session_setters_validate_their_inputs() {
    let mut session = Session::default();
    assert!(session.set_line_width("Basal", 0).is_err());
    assert!(session.set_line_width("Basal", 6).is_err());
    assert!(session.set_range_color("bogus", Color::BLACK).is_err());
    assert!(session.set_range_color("-0_5-0_5", Color::BLACK).is_ok());
}

#[test]
fn saved_selection_adjusts_to_the_loaded_table() {
    let table = sample_table();
    let mut session = Session::default();

    session.set_selected_series(vec!["Clinica".to_string(), "Retirada".to_string()]);
    assert_eq!(session.selection_for(&table), vec!["Clinica".to_string()]);

    session.set_selected_series(vec!["Retirada".to_string()]);
    assert_eq!(session.selection_for(&table), table.series().to_vec());
}

#[test]
fn remembered_policy_round_trips_unchanged() {
    let table = sample_table();
    let mut session = Session::default();
    session.set_series_color("Basal", Color::rgb(1, 2, 3));
    let policy = session.policy_for(&table, None);

    session.remember_policy(&policy);
    let again = session.policy_for(&table, None);
    assert_eq!(policy, again);
    // the document now pins the palette default it displayed for Clinica
    assert!(session.preferences().series_colors.contains_key("Clinica"));
}

#[test]
fn chart_model_serializes_for_the_renderer() {
    let table = sample_table();
    let session = Session::default();
    let policy = session.policy_for(&table, None);
    let model = ChartModelBuilder::new(ChartOptions::padded().with_title("Evolución"))
        .build(&table, &policy, &session.selection_for(&table), ChartKind::Bar)
        .unwrap();

    let json = serde_json::to_string_pretty(&model).unwrap();
    assert!(json.contains("\"kind\": \"bar\""));
    assert!(json.contains("Evolución"));

    // identical inputs serialize identically (drives byte-identical renders)
    let again = ChartModelBuilder::new(ChartOptions::padded().with_title("Evolución"))
        .build(&table, &policy, &session.selection_for(&table), ChartKind::Bar)
        .unwrap();
    assert_eq!(json, serde_json::to_string_pretty(&again).unwrap());
}

#[test]
fn fixed_layout_baseline_coloring_is_independent_of_selection() {
    let table = sample_table();
    let session = Session::default();
    let policy = session.policy_for(&table, None);

    // a fixed-layout caller pins tick colors to the baseline series
    let options = ChartOptions::classic()
        .with_tick_color_source(TickColorSource::Series("Basal".to_string()));
    let model = ChartModelBuilder::new(options)
        .build(&table, &policy, &["Clinica".to_string()], ChartKind::Scatter)
        .unwrap();

    // colored by Basal's scores 2, 4, 0
    assert_eq!(model.x_tick_colors[0], evograph_core::DEFAULT_VALUE_COLORS[2]);
    assert_eq!(model.x_tick_colors[1], evograph_core::DEFAULT_VALUE_COLORS[4]);
    assert_eq!(model.x_tick_colors[2], evograph_core::DEFAULT_VALUE_COLORS[0]);
}
