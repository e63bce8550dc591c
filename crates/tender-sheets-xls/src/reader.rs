//! XLS (BIFF8) reader.
//!
//! Opens the Compound File Binary container, reads the `Workbook` stream and
//! turns the cell records of each worksheet substream into a grid.

use std::io::{Read, Seek};
use std::path::Path;

use tender_sheets_core::{CellValue, RawSheet, RawWorkbook};

use crate::biff::strings::{parse_sst, read_short_string, read_unicode_string};
use crate::biff::{self, records, BiffRecord, ByteCursor};
use crate::error::{XlsError, XlsResult};

/// XLS file reader
pub struct XlsReader;

/// Sheet metadata from a BOUNDSHEET record
#[derive(Debug)]
struct SheetInfo {
    /// Absolute stream offset of the sheet's BOF record
    offset: u32,
    /// 0 = worksheet, 2 = chart, 6 = VBA module
    sheet_type: u8,
    name: String,
}

impl XlsReader {
    /// Read an XLS file from a filesystem path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsResult<RawWorkbook> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::read(file)
    }

    /// Read an XLS file from any `Read + Seek` source
    pub fn read<R: Read + Seek>(reader: R) -> XlsResult<RawWorkbook> {
        let mut cfb = cfb::CompoundFile::open(reader)?;

        // BIFF5 files name the stream "Book"; the version check rejects them below
        let stream_path = if cfb.exists("/Workbook") {
            "/Workbook"
        } else if cfb.exists("/Book") {
            "/Book"
        } else {
            return Err(XlsError::InvalidFormat(
                "no Workbook or Book stream found in CFB".into(),
            ));
        };

        let mut stream_data = Vec::new();
        {
            let mut stream = cfb.open_stream(stream_path)?;
            stream.read_to_end(&mut stream_data)?;
        }

        let all_records = biff::read_records(&stream_data)?;
        Self::read_records(&all_records)
    }

    fn read_records(all_records: &[BiffRecord]) -> XlsResult<RawWorkbook> {
        let first = all_records
            .first()
            .ok_or_else(|| XlsError::InvalidFormat("empty workbook stream".into()))?;
        if first.record_type != records::BOF {
            return Err(XlsError::InvalidFormat(
                "workbook stream does not start with BOF".into(),
            ));
        }
        let (version, dt) = biff::parse_bof(&first.data)?;
        if dt != records::BOF_WORKBOOK_GLOBALS {
            return Err(XlsError::InvalidFormat(format!(
                "expected workbook globals BOF, got substream type 0x{dt:04X}"
            )));
        }
        if version != records::BIFF8_VERSION {
            return Err(XlsError::UnsupportedVersion(format!(
                "expected BIFF8 (0x0600), got 0x{version:04X}"
            )));
        }

        // Workbook globals run up to the first EOF
        let mut sst: Vec<String> = Vec::new();
        let mut sheets: Vec<SheetInfo> = Vec::new();

        for rec in all_records.iter().skip(1) {
            match rec.record_type {
                records::EOF => break,
                records::SST => sst = parse_sst(&rec.data, &rec.continue_offsets)?,
                records::BOUNDSHEET => sheets.push(Self::parse_boundsheet(&rec.data)?),
                records::DATEMODE => {
                    if rec.data.first() == Some(&1) {
                        log::warn!("workbook uses the 1904 date system; date serials are read as stored");
                    }
                }
                _ => {}
            }
        }

        let mut workbook = RawWorkbook::new();
        for info in sheets
            .iter()
            .filter(|s| s.sheet_type == records::SHEET_TYPE_WORKSHEET)
        {
            let start = all_records
                .iter()
                .position(|r| r.stream_offset == info.offset as u64 && r.record_type == records::BOF);

            let sheet = match start {
                Some(idx) => Self::parse_sheet(&info.name, &all_records[idx..], &sst)?,
                None => {
                    log::warn!(
                        "sheet '{}' points at offset {} with no BOF record; reading it as empty",
                        info.name,
                        info.offset
                    );
                    RawSheet::new(info.name.as_str(), Vec::new())
                }
            };
            workbook.push(sheet);
        }

        Ok(workbook)
    }

    /// BOUNDSHEET: offset(4) + visibility(1) + type(1) + short string name
    fn parse_boundsheet(data: &[u8]) -> XlsResult<SheetInfo> {
        let mut c = ByteCursor::new(data);
        let offset = c.u32()?;
        let _visibility = c.u8()?;
        let sheet_type = c.u8()?;
        let name = read_short_string(&mut c)?;

        Ok(SheetInfo {
            offset,
            sheet_type,
            name,
        })
    }

    /// Read one worksheet substream, starting at its BOF
    fn parse_sheet(name: &str, substream: &[BiffRecord], sst: &[String]) -> XlsResult<RawSheet> {
        let mut sheet = RawSheet::new(name, Vec::new());
        // FORMULA with a string result: the text arrives in the next STRING record
        let mut pending_string: Option<(usize, usize)> = None;
        let mut depth = 0usize;

        for rec in substream {
            let data = rec.data.as_slice();
            match rec.record_type {
                records::BOF => {
                    if depth == 0 {
                        let (_, dt) = biff::parse_bof(data)?;
                        if dt != records::BOF_WORKSHEET {
                            log::debug!("substream for '{name}' has type 0x{dt:04X}");
                        }
                    }
                    depth += 1;
                }
                records::EOF => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        break;
                    }
                }
                // Embedded substreams (charts on the sheet) carry no cells for us
                _ if depth > 1 => {}
                records::LABELSST => {
                    let mut c = ByteCursor::new(data);
                    let (row, col) = Self::cell_ref(&mut c)?;
                    let idx = c.u32()? as usize;
                    match sst.get(idx) {
                        Some(s) => sheet.set_cell(row, col, CellValue::text(s.as_str())),
                        None => log::warn!("SST index {idx} out of bounds in '{name}'"),
                    }
                }
                records::LABEL => {
                    let mut c = ByteCursor::new(data);
                    let (row, col) = Self::cell_ref(&mut c)?;
                    let text = read_unicode_string(&mut c)?;
                    sheet.set_cell(row, col, CellValue::text(text));
                }
                records::NUMBER => {
                    let mut c = ByteCursor::new(data);
                    let (row, col) = Self::cell_ref(&mut c)?;
                    sheet.set_cell(row, col, CellValue::Number(c.f64()?));
                }
                records::RK => {
                    let mut c = ByteCursor::new(data);
                    let (row, col) = Self::cell_ref(&mut c)?;
                    sheet.set_cell(row, col, CellValue::Number(c.rk()?));
                }
                records::MULRK => Self::parse_mulrk(data, &mut sheet)?,
                records::BOOLERR => {
                    let mut c = ByteCursor::new(data);
                    let (row, col) = Self::cell_ref(&mut c)?;
                    let value = c.u8()?;
                    let is_error = c.u8()? != 0;
                    if !is_error {
                        sheet.set_cell(row, col, CellValue::from(value != 0));
                    }
                }
                records::FORMULA => pending_string = Self::parse_formula(data, &mut sheet)?,
                records::STRING => {
                    if let Some((row, col)) = pending_string.take() {
                        let mut c = ByteCursor::new(data);
                        let text = read_unicode_string(&mut c)?;
                        sheet.set_cell(row, col, CellValue::text(text));
                    }
                }
                _ => {}
            }
        }

        sheet.trim();
        Ok(sheet)
    }

    /// Common row(2) + col(2) + xf(2) cell prefix
    fn cell_ref(c: &mut ByteCursor<'_>) -> XlsResult<(usize, usize)> {
        let row = c.u16()? as usize;
        let col = c.u16()? as usize;
        let _xf = c.u16()?;
        Ok((row, col))
    }

    /// MULRK: row(2) + first_col(2) + [xf(2) + rk(4)]* + last_col(2)
    fn parse_mulrk(data: &[u8], sheet: &mut RawSheet) -> XlsResult<()> {
        if data.len() < 6 {
            return Err(XlsError::Parse("MULRK record too short".into()));
        }
        let mut c = ByteCursor::new(data);
        let row = c.u16()? as usize;
        let first_col = c.u16()? as usize;
        let count = (data.len() - 6) / 6;

        for i in 0..count {
            let _xf = c.u16()?;
            let value = c.rk()?;
            sheet.set_cell(row, first_col + i, CellValue::Number(value));
        }
        Ok(())
    }

    /// FORMULA: row(2) + col(2) + xf(2) + result(8) + options(2) + reserved(4) + tokens
    ///
    /// Only the cached result is kept. Returns the cell position when the
    /// result is a string, which a following STRING record supplies.
    fn parse_formula(data: &[u8], sheet: &mut RawSheet) -> XlsResult<Option<(usize, usize)>> {
        let mut c = ByteCursor::new(data);
        let (row, col) = Self::cell_ref(&mut c)?;
        let result = c.bytes(8)?;

        // Bytes 6-7 == 0xFFFF mark a non-numeric result
        if result[6] == 0xFF && result[7] == 0xFF {
            match result[0] {
                0x00 => return Ok(Some((row, col))),
                0x01 => sheet.set_cell(row, col, CellValue::from(result[2] != 0)),
                // Errors and empty strings
                _ => {}
            }
        } else {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(result);
            sheet.set_cell(row, col, CellValue::Number(f64::from_le_bytes(raw)));
        }

        Ok(None)
    }
}
