//! Decoder dispatch

use std::fs;
use std::path::Path;

use tender_sheets_core::{RawSheet, RawWorkbook};
use tender_sheets_import::SheetSelector;

use crate::error::{Error, ReadError, Result};
use crate::format::SpreadsheetFormat;

/// Reject files larger than `limit` bytes
pub fn check_size(size: u64, limit: u64) -> Result<()> {
    if size > limit {
        return Err(Error::FileTooLarge { size, limit });
    }
    Ok(())
}

/// Decode a spreadsheet file
///
/// The format comes from the extension and the size is checked against
/// `max_file_size` on the file metadata, before any byte is read.
pub fn read_workbook<P: AsRef<Path>>(path: P, max_file_size: u64) -> Result<RawWorkbook> {
    let path = path.as_ref();
    let format = SpreadsheetFormat::from_path(path)?;
    if !format.is_enabled() {
        return Err(Error::FormatDisabled(format));
    }
    let size = fs::metadata(path)?.len();
    check_size(size, max_file_size)?;

    log::debug!("reading {} as {format} ({size} bytes)", path.display());
    let bytes = fs::read(path)?;
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    decode(&bytes, format, &stem)
}

/// Decode an in-memory spreadsheet
///
/// `name` names the sheet of a CSV file, which has none of its own.
pub fn read_workbook_bytes(
    bytes: &[u8],
    format: SpreadsheetFormat,
    name: &str,
    max_file_size: u64,
) -> Result<RawWorkbook> {
    if !format.is_enabled() {
        return Err(Error::FormatDisabled(format));
    }
    check_size(bytes.len() as u64, max_file_size)?;
    decode(bytes, format, name)
}

#[allow(unused_variables)]
fn decode(bytes: &[u8], format: SpreadsheetFormat, name: &str) -> Result<RawWorkbook> {
    let workbook = match format {
        #[cfg(feature = "xlsx")]
        SpreadsheetFormat::Xlsx => {
            tender_sheets_xlsx::XlsxReader::read(std::io::Cursor::new(bytes)).map_err(ReadError::from)?
        }
        #[cfg(feature = "xls")]
        SpreadsheetFormat::Xls => {
            tender_sheets_xls::XlsReader::read(std::io::Cursor::new(bytes)).map_err(ReadError::from)?
        }
        #[cfg(feature = "csv")]
        SpreadsheetFormat::Csv => {
            let options = tender_sheets_csv::CsvReadOptions::default();
            let name = if name.is_empty() { "Sheet1" } else { name };
            let sheet = tender_sheets_csv::CsvReader::read_bytes(bytes, name, &options)
                .map_err(ReadError::from)?;
            RawWorkbook::from(sheet)
        }
        #[allow(unreachable_patterns)]
        other => return Err(Error::FormatDisabled(other)),
    };
    Ok(workbook)
}

/// Pick one sheet out of a workbook
pub fn select_sheet<'a>(workbook: &'a RawWorkbook, selector: &SheetSelector) -> Result<&'a RawSheet> {
    let found = match selector {
        SheetSelector::First => workbook.sheet(0),
        SheetSelector::Index(index) => workbook.sheet(*index),
        SheetSelector::Name(name) => workbook.sheet_by_name(name),
    };
    found.ok_or_else(|| {
        Error::SheetNotFound(match selector {
            SheetSelector::First => "workbook has no sheets".to_string(),
            SheetSelector::Index(index) => format!("index {index}"),
            SheetSelector::Name(name) => name.clone(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tender_sheets_core::CellValue;

    fn workbook() -> RawWorkbook {
        let mut wb = RawWorkbook::new();
        wb.push(RawSheet::new("Титул", vec![vec![CellValue::text("x")]]));
        wb.push(RawSheet::new("Смета", vec![vec![CellValue::text("y")]]));
        wb
    }

    #[test]
    fn test_check_size() {
        assert!(check_size(10, 10).is_ok());
        assert!(matches!(
            check_size(11, 10),
            Err(Error::FileTooLarge { size: 11, limit: 10 })
        ));
    }

    #[test]
    fn test_select_sheet() {
        let wb = workbook();
        assert_eq!(select_sheet(&wb, &SheetSelector::First).unwrap().name(), "Титул");
        assert_eq!(select_sheet(&wb, &SheetSelector::Index(1)).unwrap().name(), "Смета");
        assert_eq!(
            select_sheet(&wb, &SheetSelector::Name("смета".into())).unwrap().name(),
            "Смета"
        );
    }

    #[test]
    fn test_select_missing_sheet() {
        let wb = workbook();
        assert!(matches!(
            select_sheet(&wb, &SheetSelector::Index(5)),
            Err(Error::SheetNotFound(_))
        ));
        assert!(matches!(
            select_sheet(&RawWorkbook::new(), &SheetSelector::First),
            Err(Error::SheetNotFound(_))
        ));
    }

    #[cfg(feature = "csv")]
    #[test]
    fn test_read_csv_bytes() {
        let wb = read_workbook_bytes(
            "a;b\n1;2\n".as_bytes(),
            SpreadsheetFormat::Csv,
            "export",
            1024,
        )
        .unwrap();
        assert_eq!(wb.sheet_count(), 1);
        assert_eq!(wb.sheet(0).unwrap().name(), "export");
        assert_eq!(wb.sheet(0).unwrap().column_count(), 2);
    }

    #[test]
    fn test_bytes_over_limit() {
        let result = read_workbook_bytes(&[0u8; 32], SpreadsheetFormat::Csv, "x", 16);
        assert!(matches!(
            result,
            Err(Error::FileTooLarge { .. }) | Err(Error::FormatDisabled(_))
        ));
    }
}
