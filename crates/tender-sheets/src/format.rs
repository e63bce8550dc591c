//! Accepted spreadsheet formats

use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};

/// Spreadsheet container formats the importer accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpreadsheetFormat {
    /// Office Open XML workbook (`.xlsx`, `.xlsm`)
    Xlsx,
    /// Legacy BIFF8 workbook (`.xls`)
    Xls,
    /// Comma- or semicolon-separated text (`.csv`)
    Csv,
}

impl SpreadsheetFormat {
    /// Extensions accepted on input, lowercase
    pub const EXTENSIONS: &'static [&'static str] = &["xlsx", "xlsm", "xls", "csv"];

    /// Match an extension, case-insensitively
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "xlsx" | "xlsm" => Some(SpreadsheetFormat::Xlsx),
            "xls" => Some(SpreadsheetFormat::Xls),
            "csv" => Some(SpreadsheetFormat::Csv),
            _ => None,
        }
    }

    /// Detect the format from a file name
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| Error::UnsupportedFileType(path.display().to_string()))
    }

    /// Whether the decoder for this format is compiled in
    pub fn is_enabled(self) -> bool {
        match self {
            SpreadsheetFormat::Xlsx => cfg!(feature = "xlsx"),
            SpreadsheetFormat::Xls => cfg!(feature = "xls"),
            SpreadsheetFormat::Csv => cfg!(feature = "csv"),
        }
    }
}

impl fmt::Display for SpreadsheetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpreadsheetFormat::Xlsx => "XLSX",
            SpreadsheetFormat::Xls => "XLS",
            SpreadsheetFormat::Csv => "CSV",
        };
        f.write_str(name)
    }
}
