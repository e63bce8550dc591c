//! XLSX reader

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use tender_sheets_core::{CellAddress, CellValue, RawSheet, RawWorkbook};

/// Upper bound on rows plus cells the dense grid of one sheet may hold.
/// Sparse references such as `XFD900000` would otherwise allocate the
/// whole rectangle up to them.
const MAX_GRID_CELLS: usize = 4_000_000;

/// Decode Excel's `_xHHHH_` escape sequences in strings.
///
/// Excel uses this format to encode characters XML cannot carry verbatim:
/// `_x000d_` is CR, `_x000a_` is LF, `_x005f_` is a literal underscore.
fn decode_excel_escapes(s: &str) -> String {
    if !s.contains("_x") {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find("_x") {
        result.push_str(&rest[..pos]);
        let candidate = &rest[pos..];
        let decoded = candidate
            .get(2..6)
            .filter(|hex| hex.chars().all(|c| c.is_ascii_hexdigit()))
            .filter(|_| candidate.as_bytes().get(6) == Some(&b'_'))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .and_then(char::from_u32);

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

/// Read an attribute value by key
fn attr_value(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .and_then(|a| a.unescape_value().ok().map(|v| v.to_string()))
}

/// Per-cell state collected between `<c>` and `</c>`
#[derive(Default)]
struct PendingCell {
    reference: Option<String>,
    cell_type: Option<String>,
    value: String,
    has_value: bool,
}

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Read a workbook from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<RawWorkbook> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }

    /// Read a workbook from a reader
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<RawWorkbook> {
        let mut archive = zip::ZipArchive::new(reader)?;

        // Verify this is an XLSX file
        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        let shared_strings = Self::read_shared_strings(&mut archive)?;
        let sheet_info = Self::read_workbook_xml(&mut archive)?;
        let sheet_paths = Self::read_workbook_rels(&mut archive)?;

        let mut workbook = RawWorkbook::new();
        for (name, r_id) in &sheet_info {
            match sheet_paths.get(r_id) {
                Some(path) => {
                    let sheet = Self::read_worksheet(&mut archive, name, path, &shared_strings, MAX_GRID_CELLS)?;
                    workbook.push(sheet);
                }
                None => log::warn!("sheet '{name}' has no worksheet relationship ({r_id})"),
            }
        }

        Ok(workbook)
    }

    /// Read the shared strings table
    fn read_shared_strings<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<String>> {
        let mut strings = Vec::new();

        let file = match archive.by_name("xl/sharedStrings.xml") {
            Ok(f) => f,
            Err(_) => return Ok(strings), // No shared strings is valid
        };

        let mut xml_reader = Reader::from_reader(BufReader::new(file));

        let mut buf = Vec::new();
        let mut current = String::new();
        let mut in_si = false;
        let mut in_t = false;
        // Phonetic runs (<rPh>) repeat the text in kana; skip them
        let mut in_phonetic = false;

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current.clear();
                    }
                    b"rPh" => in_phonetic = true,
                    b"t" if in_si && !in_phonetic => in_t = true,
                    _ => {}
                },
                Event::End(e) => match e.name().as_ref() {
                    b"si" => {
                        strings.push(decode_excel_escapes(&current));
                        in_si = false;
                    }
                    b"rPh" => in_phonetic = false,
                    b"t" => in_t = false,
                    _ => {}
                },
                Event::Empty(e) if e.name().as_ref() == b"si" => strings.push(String::new()),
                Event::Text(e) if in_t => {
                    if let Ok(text) = e.unescape() {
                        current.push_str(&text);
                    }
                }
                Event::Eof => break,
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

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut sheets = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Empty(e) | Event::Start(e) if e.name().as_ref() == b"sheet" => {
                    let name = attr_value(&e, b"name");
                    let r_id = attr_value(&e, b"r:id");
                    if let (Some(name), Some(r_id)) = (name, r_id) {
                        sheets.push((name, r_id));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(sheets)
    }

    /// Read workbook.xml.rels to get worksheet part paths
    fn read_workbook_rels<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<HashMap<String, String>> {
        let file = archive
            .by_name("xl/_rels/workbook.xml.rels")
            .map_err(|_| XlsxError::MissingPart("xl/_rels/workbook.xml.rels".into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut rels = HashMap::new();

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Empty(e) | Event::Start(e) if e.name().as_ref() == b"Relationship" => {
                    let id = attr_value(&e, b"Id");
                    let target = attr_value(&e, b"Target");
                    let rel_type = attr_value(&e, b"Type");

                    if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                        if rel_type.ends_with("/worksheet") {
                            // Target is relative to xl/ unless absolute
                            let full_path = match target.strip_prefix('/') {
                                Some(absolute) => absolute.to_string(),
                                None => format!("xl/{}", target),
                            };
                            rels.insert(id, full_path);
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Read one worksheet part into a grid
    fn read_worksheet<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        name: &str,
        path: &str,
        shared_strings: &[String],
        grid_limit: usize,
    ) -> XlsxResult<RawSheet> {
        let file = archive
            .by_name(path)
            .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));

        let mut buf = Vec::new();
        let mut sheet = RawSheet::new(name, Vec::new());
        let mut grid_cells: usize = 0;

        // Position tracking for cells that omit the `r` attribute
        let mut row_idx: u32 = 0;
        let mut next_col: u16 = 0;
        let mut seen_row = false;

        let mut cell: Option<PendingCell> = None;
        let mut in_value = false;
        let mut in_inline_text = false;

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().as_ref() {
                    b"row" => {
                        row_idx = Self::row_index(attr_value(&e, b"r"), row_idx, seen_row);
                        seen_row = true;
                        next_col = 0;
                    }
                    b"c" => {
                        cell = Some(PendingCell {
                            reference: attr_value(&e, b"r"),
                            cell_type: attr_value(&e, b"t"),
                            ..Default::default()
                        });
                    }
                    b"v" if cell.is_some() => in_value = true,
                    b"t" if cell.is_some() => in_inline_text = true,
                    _ => {}
                },
                // A row with no cells still takes its place in the grid
                Event::Empty(e) if e.name().as_ref() == b"row" => {
                    row_idx = Self::row_index(attr_value(&e, b"r"), row_idx, seen_row);
                    seen_row = true;
                    next_col = 0;
                }
                Event::Empty(e) if e.name().as_ref() == b"c" => {
                    // Styled but valueless cell; still advances the column
                    let (_, col) = Self::cell_position(attr_value(&e, b"r"), row_idx, next_col)?;
                    next_col = col.saturating_add(1);
                }
                Event::Text(e) if in_value || in_inline_text => {
                    if let (Some(c), Ok(text)) = (cell.as_mut(), e.unescape()) {
                        c.value.push_str(&text);
                        c.has_value = true;
                    }
                }
                Event::End(e) => match e.name().as_ref() {
                    b"v" => in_value = false,
                    b"t" => in_inline_text = false,
                    b"c" => {
                        if let Some(c) = cell.take() {
                            let (row, col) =
                                Self::cell_position(c.reference.clone(), row_idx, next_col)?;
                            next_col = col.saturating_add(1);
                            if c.has_value {
                                let (row, col) = (row as usize, col as usize);
                                grid_cells += sheet.growth(row, col);
                                if grid_cells > grid_limit {
                                    log::warn!(
                                        "sheet '{name}': cell at row {} column {} exceeds the grid budget",
                                        row + 1,
                                        col + 1
                                    );
                                    return Err(XlsxError::GridTooLarge {
                                        sheet: name.to_string(),
                                        limit: grid_limit,
                                    });
                                }
                                let value = Self::convert_cell(
                                    c.cell_type.as_deref(),
                                    &c.value,
                                    shared_strings,
                                );
                                sheet.set_cell(row, col, value);
                            }
                        }
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        sheet.trim();
        Ok(sheet)
    }

    /// 0-based index of a `<row>`, from its `r` attribute or the previous row
    fn row_index(reference: Option<String>, previous: u32, seen_row: bool) -> u32 {
        match reference.and_then(|r| r.parse::<u32>().ok()) {
            Some(r) => r.saturating_sub(1),
            None if seen_row => previous.saturating_add(1),
            None => 0,
        }
    }

    /// Resolve a cell's position from its `r` attribute or its place in the row
    fn cell_position(
        reference: Option<String>,
        row_idx: u32,
        next_col: u16,
    ) -> XlsxResult<(u32, u16)> {
        match reference {
            Some(r) => {
                let addr = CellAddress::parse(&r).map_err(|e| {
                    XlsxError::Parse(format!("Invalid cell reference '{}': {}", r, e))
                })?;
                Ok((addr.row, addr.col))
            }
            None => Ok((row_idx, next_col)),
        }
    }

    /// Convert a raw `<v>` payload into a cell value
    fn convert_cell(cell_type: Option<&str>, value: &str, shared_strings: &[String]) -> CellValue {
        match cell_type {
            // Shared string
            Some("s") => match value.trim().parse::<usize>() {
                Ok(idx) => match shared_strings.get(idx) {
                    Some(s) => CellValue::text(s.clone()),
                    None => {
                        log::warn!("shared string index {idx} out of bounds");
                        CellValue::Empty
                    }
                },
                Err(_) => CellValue::Empty,
            },

            // Boolean
            Some("b") => CellValue::from(value == "1" || value.eq_ignore_ascii_case("true")),

            // Error values carry nothing the importer can use
            Some("e") => CellValue::Empty,

            // Inline and formula strings
            Some("inlineStr") | Some("str") => CellValue::text(decode_excel_escapes(value)),

            // Number (default type or explicit "n")
            None | Some("n") => match value.trim().parse::<f64>() {
                Ok(n) => CellValue::Number(n),
                Err(_) => CellValue::text(value),
            },

            // ISO dates and unknown types stay textual
            Some(_) => CellValue::text(value),
        }
    }
}
