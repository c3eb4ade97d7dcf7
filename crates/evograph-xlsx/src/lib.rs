//! # evograph-xlsx
//!
//! XLSX score-workbook reading for evograph.
//!
//! A values-only reader (styles, comments, and formulas are out of scope for
//! score workbooks) plus the two accepted table layouts and their
//! tried-in-order detection.
//!
//! ## Example
//!
//! ```rust,no_run
//! use evograph_xlsx::{detect, SpreadsheetSchema, Workbook, DEFAULT_DETECTION_ORDER};
//!
//! let workbook = Workbook::read_file("scores.xlsx").unwrap();
//! let parsed = detect(
//!     workbook.sheet(0).unwrap(),
//!     &DEFAULT_DETECTION_ORDER,
//!     &SpreadsheetSchema::default(),
//! )
//! .unwrap();
//! println!("series: {:?}", parsed.table.series());
//! ```

mod cell;
mod error;
mod layout;
mod reader;

pub use cell::{CellRef, CellValue};
pub use error::{XlsxError, XlsxResult};
pub use layout::{
    detect, read_fixed_layout, read_header_row, ParsedTable, SpreadsheetSchema, TableLayout,
    DEFAULT_DETECTION_ORDER,
};
pub use reader::{Sheet, Workbook};
