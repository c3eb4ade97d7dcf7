//! Values-only XLSX reader
//!
//! Reads the parts of an XLSX archive a score workbook needs: the shared
//! strings table, the sheet list, and per-sheet cell values. Styles, comments,
//! and formulas are not modeled; a formula cell surfaces its cached result.

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::cell::{CellRef, CellValue};
use crate::error::{XlsxError, XlsxResult};

/// Decode Excel's `_xHHHH_` escape sequences in strings.
///
/// Excel encodes control characters in XML text as `_x000d_` (CR),
/// `_x000a_` (LF), `_x005f_` (escaped underscore), and so on.
fn decode_excel_escapes(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(start) = rest.find("_x") {
        let candidate = &rest[start..];
        let decoded = candidate
            .get(2..6)
            .filter(|hex| hex.chars().all(|c| c.is_ascii_hexdigit()))
            .filter(|_| candidate.as_bytes().get(6) == Some(&b'_'))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .and_then(char::from_u32);

        result.push_str(&rest[..start]);
        match decoded {
            Some(c) => {
                result.push(c);
                rest = &candidate[7..];
            }
            None => {
                result.push_str("_x");
                rest = &candidate[2..];
            }
        }
    }
    result.push_str(rest);
    result
}

/// One worksheet's cell grid.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    name: String,
    cells: BTreeMap<(u32, u16), CellValue>,
    max_row: u32,
    max_col: u16,
}

static EMPTY_CELL: CellValue = CellValue::Empty;

impl Sheet {
    fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    fn set(&mut self, row: u32, col: u16, value: CellValue) {
        if value.is_empty() {
            return;
        }
        self.max_row = self.max_row.max(row);
        self.max_col = self.max_col.max(col);
        self.cells.insert((row, col), value);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cell value at (row, col); empty cells read as [`CellValue::Empty`].
    pub fn get(&self, row: u32, col: u16) -> &CellValue {
        self.cells.get(&(row, col)).unwrap_or(&EMPTY_CELL)
    }

    pub fn number(&self, row: u32, col: u16) -> Option<f64> {
        self.get(row, col).as_number()
    }

    pub fn text(&self, row: u32, col: u16) -> Option<String> {
        self.get(row, col).to_text()
    }

    /// Highest populated row index, if any cell is populated.
    pub fn max_row(&self) -> u32 {
        self.max_row
    }

    pub fn max_col(&self) -> u16 {
        self.max_col
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A read workbook: an ordered list of sheets.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    /// Read a workbook from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Self> {
        let file = File::open(path)?;
        Self::read(file)
    }

    /// Read a workbook from any seekable reader
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<Self> {
        let mut archive = zip::ZipArchive::new(reader)?;

        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        let shared_strings = read_shared_strings(&mut archive)?;
        let sheet_info = read_workbook_xml(&mut archive)?;
        let sheet_paths = read_workbook_rels(&mut archive)?;

        let mut sheets = Vec::new();
        for (name, r_id) in &sheet_info {
            if let Some(path) = sheet_paths.get(r_id) {
                let mut sheet = Sheet::new(name);
                read_worksheet(&mut archive, path, &mut sheet, &shared_strings)?;
                sheets.push(sheet);
            }
        }

        if sheets.is_empty() {
            return Err(XlsxError::InvalidFormat("workbook has no sheets".into()));
        }

        Ok(Self { sheets })
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    pub fn sheet(&self, index: usize) -> XlsxResult<&Sheet> {
        self.sheets
            .get(index)
            .ok_or_else(|| XlsxError::SheetOutOfBounds {
                index,
                count: self.sheets.len(),
            })
    }

    pub fn sheet_by_name(&self, name: &str) -> XlsxResult<&Sheet> {
        self.sheets
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| XlsxError::SheetNotFound(name.to_string()))
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }
}

/// Read the shared strings table
fn read_shared_strings<R: Read + Seek>(archive: &mut zip::ZipArchive<R>) -> XlsxResult<Vec<String>> {
    let mut strings = Vec::new();

    let file = match archive.by_name("xl/sharedStrings.xml") {
        Ok(f) => f,
        Err(_) => return Ok(strings), // No shared strings is valid
    };

    let reader = BufReader::new(file);
    let mut xml_reader = Reader::from_reader(reader);
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut current_string = String::new();
    let mut in_si = false;
    let mut in_t = false;

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"si" => {
                    in_si = true;
                    current_string.clear();
                }
                b"t" if in_si => {
                    in_t = true;
                }
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"si" => {
                    strings.push(decode_excel_escapes(&current_string));
                    current_string.clear();
                    in_si = false;
                }
                b"t" => {
                    in_t = false;
                }
                _ => {}
            },
            Ok(Event::Text(e)) if in_t => {
                if let Ok(text) = e.unescape() {
                    current_string.push_str(&text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(strings)
}

/// Read workbook.xml to get sheet names and rIds
fn read_workbook_xml<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
) -> XlsxResult<Vec<(String, String)>> {
    let file = archive
        .by_name("xl/workbook.xml")
        .map_err(|_| XlsxError::MissingPart("xl/workbook.xml".into()))?;

    let reader = BufReader::new(file);
    let mut xml_reader = Reader::from_reader(reader);
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut sheets = Vec::new();

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.name().as_ref() == b"sheet" => {
                let mut name = None;
                let mut r_id = None;

                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"name" => {
                            name = attr.unescape_value().ok().map(|s| s.to_string());
                        }
                        b"r:id" => {
                            r_id = attr.unescape_value().ok().map(|s| s.to_string());
                        }
                        _ => {}
                    }
                }

                if let (Some(name), Some(r_id)) = (name, r_id) {
                    sheets.push((name, r_id));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(sheets)
}

/// Read workbook.xml.rels to get sheet file paths
fn read_workbook_rels<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
) -> XlsxResult<HashMap<String, String>> {
    let file = archive
        .by_name("xl/_rels/workbook.xml.rels")
        .map_err(|_| XlsxError::MissingPart("xl/_rels/workbook.xml.rels".into()))?;

    let reader = BufReader::new(file);
    let mut xml_reader = Reader::from_reader(reader);
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut rels = HashMap::new();

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.name().as_ref() == b"Relationship" => {
                let mut id = None;
                let mut target = None;
                let mut rel_type = None;

                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"Id" => {
                            id = attr.unescape_value().ok().map(|s| s.to_string());
                        }
                        b"Target" => {
                            target = attr.unescape_value().ok().map(|s| s.to_string());
                        }
                        b"Type" => {
                            rel_type = attr.unescape_value().ok().map(|s| s.to_string());
                        }
                        _ => {}
                    }
                }

                if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                    if rel_type.ends_with("/worksheet") {
                        // Target is relative to xl/ folder
                        let full_path = if let Some(stripped) = target.strip_prefix('/') {
                            stripped.to_string()
                        } else {
                            format!("xl/{}", target)
                        };
                        rels.insert(id, full_path);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(rels)
}

/// Read one worksheet's cell values from the archive
fn read_worksheet<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
    path: &str,
    sheet: &mut Sheet,
    shared_strings: &[String],
) -> XlsxResult<()> {
    let file = archive
        .by_name(path)
        .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

    let reader = BufReader::new(file);
    let mut xml_reader = Reader::from_reader(reader);
    xml_reader.trim_text(true);

    let mut buf = Vec::new();

    let mut current_ref: Option<CellRef> = None;
    let mut current_type: Option<String> = None;
    let mut current_text = String::new();
    let mut in_value = false;
    let mut in_inline_text = false;

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"c" => {
                    let (cell_ref, cell_type) = parse_cell_attrs(&e)?;
                    current_ref = cell_ref;
                    current_type = cell_type;
                    current_text.clear();
                }
                b"v" => in_value = true,
                b"t" => in_inline_text = true,
                _ => {}
            },
            Ok(Event::Empty(e)) if e.name().as_ref() == b"c" => {
                // A cell with no children carries no value
            }
            Ok(Event::Text(e)) if in_value || in_inline_text => {
                if let Ok(text) = e.unescape() {
                    current_text.push_str(&text);
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"v" => in_value = false,
                b"t" => in_inline_text = false,
                b"c" => {
                    if let Some(cell_ref) = current_ref.take() {
                        let value = finish_cell(
                            current_type.as_deref(),
                            &current_text,
                            shared_strings,
                        );
                        sheet.set(cell_ref.row, cell_ref.col, value);
                    }
                    current_type = None;
                    current_text.clear();
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

fn parse_cell_attrs(
    e: &quick_xml::events::BytesStart<'_>,
) -> XlsxResult<(Option<CellRef>, Option<String>)> {
    let mut cell_ref = None;
    let mut cell_type = None;

    for attr in e.attributes().flatten() {
        match attr.key.as_ref() {
            b"r" => {
                if let Ok(r) = attr.unescape_value() {
                    cell_ref = Some(CellRef::parse(&r)?);
                }
            }
            b"t" => {
                cell_type = attr.unescape_value().ok().map(|s| s.to_string());
            }
            _ => {}
        }
    }

    Ok((cell_ref, cell_type))
}

/// Turn a cell's type attribute and accumulated text into a value.
fn finish_cell(cell_type: Option<&str>, text: &str, shared_strings: &[String]) -> CellValue {
    match cell_type {
        Some("s") => match text.trim().parse::<usize>().ok().and_then(|i| shared_strings.get(i)) {
            Some(s) => CellValue::Str(s.clone()),
            None => {
                log::warn!("shared string index '{text}' out of range");
                CellValue::Empty
            }
        },
        Some("str") | Some("inlineStr") => {
            CellValue::Str(decode_excel_escapes(text))
        }
        Some("b") => CellValue::Boolean(text.trim() == "1"),
        Some("e") => CellValue::Empty,
        // "n" or untyped: numeric
        _ => match text.trim().parse::<f64>() {
            Ok(n) => CellValue::Number(n),
            Err(_) if text.trim().is_empty() => CellValue::Empty,
            Err(_) => {
                log::warn!("unparseable numeric cell value '{text}'");
                CellValue::Empty
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_escapes() {
        assert_eq!(decode_excel_escapes("a_x000a_b"), "a\nb");
        assert_eq!(decode_excel_escapes("under_x005f_score"), "under_score");
        assert_eq!(decode_excel_escapes("plain"), "plain");
        assert_eq!(decode_excel_escapes("_xZZZZ_"), "_xZZZZ_");
        assert_eq!(decode_excel_escapes("trailing_x"), "trailing_x");
    }

    #[test]
    fn test_finish_cell() {
        let strings = vec!["Funciones".to_string()];
        assert_eq!(
            finish_cell(Some("s"), "0", &strings),
            CellValue::Str("Funciones".into())
        );
        assert_eq!(finish_cell(Some("s"), "7", &strings), CellValue::Empty);
        assert_eq!(finish_cell(None, "2.5", &strings), CellValue::Number(2.5));
        assert_eq!(finish_cell(None, "", &strings), CellValue::Empty);
        assert_eq!(finish_cell(Some("b"), "1", &strings), CellValue::Boolean(true));
        assert_eq!(
            finish_cell(Some("inlineStr"), "Walk", &strings),
            CellValue::Str("Walk".into())
        );
    }
}
