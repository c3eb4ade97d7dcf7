//! Table layouts and layout detection
//!
//! Two workbook schemas are accepted. *Header-row* sheets carry the table at
//! the top: the first row is the header and the first column must be named
//! "Funciones". *Fixed-layout* sheets follow the downloadable template, whose
//! cell offsets are a documented contract captured in [`SpreadsheetSchema`]
//! rather than buried literals. Detection tries an explicit, ordered list of
//! layouts and reports every failure when none matches.

use std::fmt;

use evograph_core::{Color, EmbeddedTables, Row, Table, ValueColorTable};

use crate::error::{XlsxError, XlsxResult};
use crate::reader::Sheet;

/// The two accepted sheet layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableLayout {
    /// First row is the header; first column is "Funciones".
    HeaderRow,
    /// The fixed template layout described by [`SpreadsheetSchema`].
    FixedLayout,
}

impl fmt::Display for TableLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableLayout::HeaderRow => write!(f, "header-row"),
            TableLayout::FixedLayout => write!(f, "fixed-layout"),
        }
    }
}

/// Layouts tried, in order, when none is forced.
pub const DEFAULT_DETECTION_ORDER: [TableLayout; 2] =
    [TableLayout::HeaderRow, TableLayout::FixedLayout];

/// Cell offsets of the fixed template, 0-based.
///
/// The `Default` values document the shipped template: series headers in
/// B5:F5, function names in A6:A31, scores in B6:F31, and the embedded
/// score/color table in B34:D39 (value in column B, hex color in column D).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetSchema {
    pub header_row: u32,
    pub function_col: u16,
    pub first_data_row: u32,
    pub last_data_row: u32,
    pub first_series_col: u16,
    pub last_series_col: u16,
    pub first_color_row: u32,
    pub last_color_row: u32,
    pub color_value_col: u16,
    pub color_hex_col: u16,
}

impl Default for SpreadsheetSchema {
    fn default() -> Self {
        Self {
            header_row: 4,
            function_col: 0,
            first_data_row: 5,
            last_data_row: 30,
            first_series_col: 1,
            last_series_col: 5,
            first_color_row: 33,
            last_color_row: 38,
            color_value_col: 1,
            color_hex_col: 3,
        }
    }
}

/// A sheet parsed into the normalized table plus whatever the workbook itself
/// embedded.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTable {
    pub table: Table,
    /// Workbook-embedded color tables; only fixed-layout sheets carry them.
    pub embedded: Option<EmbeddedTables>,
    /// Which layout matched.
    pub layout: TableLayout,
}

/// Parse a header-row sheet.
pub fn read_header_row(sheet: &Sheet) -> XlsxResult<ParsedTable> {
    let first_header = sheet.text(0, 0).unwrap_or_default();
    if !first_header.trim().eq_ignore_ascii_case("funciones") {
        return Err(XlsxError::MissingFunctionsHeader {
            found: first_header,
        });
    }

    let mut series = Vec::new();
    for col in 1..=sheet.max_col() {
        match sheet.text(0, col) {
            Some(name) if !name.trim().is_empty() => series.push(name.trim().to_string()),
            _ => break,
        }
    }
    if series.is_empty() {
        return Err(XlsxError::Schema(
            "header row declares no data series".into(),
        ));
    }

    let score_cols: Vec<u16> = (1..=series.len() as u16).collect();
    let mut rows = Vec::new();
    for r in 1..=sheet.max_row() {
        let name = sheet.text(r, 0).unwrap_or_default();
        let scores: Vec<Option<f64>> = score_cols.iter().map(|&c| sheet.number(r, c)).collect();
        rows.push(Row::new(name, scores));
    }
    trim_trailing_blank_rows(&mut rows);

    Ok(ParsedTable {
        table: Table::new(series, rows)?,
        embedded: None,
        layout: TableLayout::HeaderRow,
    })
}

/// Parse a fixed-layout sheet against `schema`.
pub fn read_fixed_layout(sheet: &Sheet, schema: &SpreadsheetSchema) -> XlsxResult<ParsedTable> {
    let mut series = Vec::new();
    for col in schema.first_series_col..=schema.last_series_col {
        match sheet.text(schema.header_row, col) {
            Some(name) if !name.trim().is_empty() => series.push(name.trim().to_string()),
            _ => break,
        }
    }
    if series.is_empty() {
        return Err(XlsxError::Schema(format!(
            "no series headers found in row {}",
            schema.header_row + 1
        )));
    }

    let score_cols: Vec<u16> =
        (schema.first_series_col..schema.first_series_col + series.len() as u16).collect();
    let mut rows = Vec::new();
    for r in schema.first_data_row..=schema.last_data_row {
        let name = sheet.text(r, schema.function_col).unwrap_or_default();
        let scores: Vec<Option<f64>> = score_cols.iter().map(|&c| sheet.number(r, c)).collect();
        rows.push(Row::new(name, scores));
    }
    trim_trailing_blank_rows(&mut rows);

    let embedded = read_embedded_colors(sheet, schema);

    Ok(ParsedTable {
        table: Table::new(series, rows)?,
        embedded,
        layout: TableLayout::FixedLayout,
    })
}

/// Read the embedded score/color block, if the sheet carries one.
///
/// Cells are `Option`-typed reads all the way down: a missing score skips the
/// row, an empty color cell means "not specified" and never produces an
/// entry, and an unparseable color is warned about and skipped.
fn read_embedded_colors(sheet: &Sheet, schema: &SpreadsheetSchema) -> Option<EmbeddedTables> {
    let mut values = ValueColorTable::new();
    for r in schema.first_color_row..=schema.last_color_row {
        let score = match sheet.number(r, schema.color_value_col) {
            Some(v) if v.is_finite() => v.trunc() as i64,
            _ => match sheet
                .text(r, schema.color_value_col)
                .as_deref()
                .and_then(ValueColorTable::normalize_key)
            {
                Some(s) => s,
                None => continue,
            },
        };
        let Some(hex) = sheet.text(r, schema.color_hex_col) else {
            continue;
        };
        if hex.trim().is_empty() {
            continue;
        }
        match Color::from_hex(&hex) {
            Some(color) => values.insert(score, color),
            None => {
                log::warn!(
                    "ignoring embedded color '{}' for score {}: not a #RRGGBB value",
                    hex,
                    score
                );
            }
        }
    }

    if values.is_empty() {
        None
    } else {
        Some(EmbeddedTables::from_values(values))
    }
}

/// Try each layout in `order`; the first success wins.
///
/// The order is configuration, not guessing: every failure is kept and, when
/// no layout matches, all of them are reported together.
pub fn detect(
    sheet: &Sheet,
    order: &[TableLayout],
    schema: &SpreadsheetSchema,
) -> XlsxResult<ParsedTable> {
    let mut failures = Vec::new();
    for layout in order {
        let attempt = match layout {
            TableLayout::HeaderRow => read_header_row(sheet),
            TableLayout::FixedLayout => read_fixed_layout(sheet, schema),
        };
        match attempt {
            Ok(parsed) => return Ok(parsed),
            Err(e) => {
                log::debug!("layout {layout} rejected: {e}");
                failures.push(format!("{layout}: {e}"));
            }
        }
    }
    Err(XlsxError::LayoutNotRecognized(failures.join("; ")))
}

fn trim_trailing_blank_rows(rows: &mut Vec<Row>) {
    while let Some(last) = rows.last() {
        let blank = last.function_name().trim().is_empty()
            && last.scores().iter().all(|s| s.is_none());
        if blank {
            rows.pop();
        } else {
            break;
        }
    }
}
