//! The spreadsheet-to-chart-model transformation

use evograph_core::{ColorPolicy, Table, SCORE_MAX, SCORE_MIN};

use crate::error::{ChartError, ChartResult};
use crate::model::{
    AxisTitles, Band, Bar, ChartKind, ChartModel, ChartSeries, LegendSpec, Point, SeriesGeometry,
};
use crate::options::{ChartOptions, TickColorSource, AREA_FILL_ALPHA, BAND_ALPHA, BAR_GROUP_WIDTH};
use crate::ticks;

/// Builds [`ChartModel`]s from a table, a resolved color policy, and the
/// user's selection.
///
/// The builder holds only configuration; every call to [`build`] is pure and
/// the output is a fresh value object.
///
/// [`build`]: ChartModelBuilder::build
#[derive(Debug, Clone, Default)]
pub struct ChartModelBuilder {
    options: ChartOptions,
}

impl ChartModelBuilder {
    pub fn new(options: ChartOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    /// Build the chart model for `selection` over `table`.
    ///
    /// `selection` is an ordered subset of the table's series and must be
    /// non-empty; defaulting an empty selection is the caller's decision,
    /// never the builder's.
    pub fn build(
        &self,
        table: &Table,
        policy: &ColorPolicy,
        selection: &[String],
        kind: ChartKind,
    ) -> ChartResult<ChartModel> {
        if selection.is_empty() {
            return Err(ChartError::EmptySelection);
        }
        if table.is_empty() {
            return Err(ChartError::EmptyTable);
        }

        // Resolve every selected column before any geometry is laid out.
        let mut columns = Vec::with_capacity(selection.len());
        for name in selection {
            let column = table
                .column(name)
                .map_err(|_| ChartError::UnknownSeries(name.clone()))?;
            let style = policy
                .series_style(name)
                .ok_or_else(|| ChartError::UnknownSeries(name.clone()))?;
            columns.push((name.clone(), style, column));
        }

        let row_count = table.row_count();
        let series = match kind {
            ChartKind::Bar => bar_series(&columns, row_count),
            _ => point_series(&columns, kind),
        };

        let x_tick_positions = match kind {
            ChartKind::Bar => {
                let width = BAR_GROUP_WIDTH / selection.len() as f64;
                let center = width * (selection.len() - 1) as f64 / 2.0;
                (0..row_count).map(|pos| pos as f64 + center).collect()
            }
            _ => (0..row_count).map(|pos| pos as f64).collect(),
        };

        let x_tick_labels = table
            .function_names()
            .enumerate()
            .map(|(idx, name)| ticks::wrap_label(name, idx, self.options.wrap))
            .collect();

        let color_source = match &self.options.tick_color_source {
            TickColorSource::FirstSelected => &selection[0],
            TickColorSource::Series(name) => name,
        };
        let source_values = table
            .column(color_source)
            .map_err(|_| ChartError::UnknownSeries(color_source.clone()))?;
        let x_tick_colors = ticks::tick_colors(&source_values, &policy.values);

        let background_bands = policy
            .ranges
            .parsed()
            .into_iter()
            .map(|(y0, y1, color)| Band {
                y0,
                y1,
                color,
                alpha: BAND_ALPHA,
            })
            .collect();

        Ok(ChartModel {
            kind,
            title: self.options.title.clone(),
            series,
            x_tick_positions,
            x_tick_labels,
            x_tick_colors,
            y_range: self.options.y_bounds,
            y_ticks: (SCORE_MIN..=SCORE_MAX).collect(),
            background_bands,
            legend: LegendSpec {
                columns: selection.len(),
                font_size: self.options.font_sizes.legend,
            },
            axis_titles: AxisTitles {
                x: "Funciones".to_string(),
                y: "Valores".to_string(),
            },
            font_sizes: self.options.font_sizes,
        })
    }
}

type Column = (String, evograph_core::SeriesStyle, Vec<Option<f64>>);

fn point_series(columns: &[Column], kind: ChartKind) -> Vec<ChartSeries> {
    let fill_alpha = match kind {
        ChartKind::Area => Some(AREA_FILL_ALPHA),
        _ => None,
    };
    columns
        .iter()
        .map(|(name, style, values)| ChartSeries {
            name: name.clone(),
            style: *style,
            geometry: SeriesGeometry::Points(
                values
                    .iter()
                    .enumerate()
                    .map(|(pos, v)| v.map(|y| Point { x: pos as f64, y }))
                    .collect(),
            ),
            fill_alpha,
        })
        .collect()
}

fn bar_series(columns: &[Column], row_count: usize) -> Vec<ChartSeries> {
    // The whole group occupies a fixed 0.8 of the slot no matter how many
    // series are plotted.
    let width = BAR_GROUP_WIDTH / columns.len() as f64;
    columns
        .iter()
        .enumerate()
        .map(|(idx, (name, style, values))| {
            let bars = (0..row_count)
                .map(|pos| {
                    values[pos].map(|height| Bar {
                        x: pos as f64 + idx as f64 * width,
                        height,
                    })
                })
                .collect();
            ChartSeries {
                name: name.clone(),
                style: *style,
                geometry: SeriesGeometry::Bars { width, bars },
                fill_alpha: None,
            }
        })
        .collect()
}
