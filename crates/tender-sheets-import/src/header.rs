//! Header/data boundary and header-area metadata

use once_cell::sync::Lazy;
use regex::Regex;
use tender_sheets_core::CellValue;

use crate::fold_case;
use crate::normalize::{normalize_date, normalize_text};

/// A data row's first cell starts with a two-digit outline number (`01.`)
static DATA_ROW: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\d{2}\.").expect("valid regex"));

/// Where the header ends and data begins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DataStart {
    /// Number of rows treated as header rows
    pub header_rows: usize,
    /// 0-based index of the first data row
    pub data_start_row: usize,
}

/// Find the first data row within the first `scan_limit` rows
///
/// With no match, the data starts at row 0 and every scanned row counts as
/// a header row.
pub fn locate_data_start(rows: &[Vec<CellValue>], scan_limit: usize) -> DataStart {
    let scanned = rows.len().min(scan_limit);

    let found = rows[..scanned].iter().position(|row| {
        row.first()
            .map(|cell| DATA_ROW.is_match(&normalize_text(cell)))
            .unwrap_or(false)
    });

    match found {
        Some(k) => {
            log::debug!("first data row at index {k}");
            DataStart {
                header_rows: k,
                data_start_row: k,
            }
        }
        None => {
            log::debug!("no numbered row in the first {scanned} rows; treating them as headers");
            DataStart {
                header_rows: scanned,
                data_start_row: 0,
            }
        }
    }
}

/// Find a date stated in the header area
///
/// Looks for a label cell mentioning `дата`/`date` and normalizes the first
/// non-empty cell to its right.
pub fn detect_sheet_date(header_rows: &[Vec<CellValue>]) -> Option<String> {
    header_rows.iter().find_map(|row| {
        row.iter().enumerate().find_map(|(col, cell)| {
            let label = fold_case(&normalize_text(cell));
            if !(label.contains("дата") || label.contains("date")) {
                return None;
            }
            row[col + 1..]
                .iter()
                .find(|c| !c.is_empty())
                .and_then(normalize_date)
        })
    })
}
