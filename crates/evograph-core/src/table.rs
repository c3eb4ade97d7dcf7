//! Parsed score table

use crate::error::{Error, Result};

/// One spreadsheet row: a function name plus one score per series.
///
/// A missing or blank cell is `None`, never zero; downstream geometry treats
/// it as a gap.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    function_name: String,
    scores: Vec<Option<f64>>,
}

impl Row {
    pub fn new<S: Into<String>>(function_name: S, scores: Vec<Option<f64>>) -> Self {
        Self {
            function_name: function_name.into(),
            scores,
        }
    }

    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    pub fn scores(&self) -> &[Option<f64>] {
        &self.scores
    }
}

/// A normalized score table: an ordered series header and the rows beneath it.
///
/// Row order is spreadsheet order and is never re-sorted. Function names need
/// not be unique. Every row carries exactly one score slot per series; the
/// constructor rejects anything else so downstream code can index freely.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    series: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Build a table, validating the shape invariants.
    pub fn new(series: Vec<String>, rows: Vec<Row>) -> Result<Self> {
        if series.is_empty() {
            return Err(Error::NoSeries);
        }
        for row in &rows {
            if row.scores.len() != series.len() {
                return Err(Error::RowShape {
                    function: row.function_name.clone(),
                    expected: series.len(),
                    actual: row.scores.len(),
                });
            }
        }
        Ok(Self { series, rows })
    }

    /// Series names, in spreadsheet column order.
    pub fn series(&self) -> &[String] {
        &self.series
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a series in the header, if present.
    pub fn series_index(&self, name: &str) -> Option<usize> {
        self.series.iter().position(|s| s == name)
    }

    /// All scores of one series, in row order.
    pub fn column(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let idx = self
            .series_index(name)
            .ok_or_else(|| Error::UnknownSeries(name.to_string()))?;
        Ok(self.rows.iter().map(|r| r.scores[idx]).collect())
    }

    /// Function names, in row order.
    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.function_name.as_str())
    }
}
