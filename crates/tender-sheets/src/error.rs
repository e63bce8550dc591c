//! Error types for tender-sheets

use thiserror::Error;

use crate::format::SpreadsheetFormat;
use tender_sheets_import::ImportError;

/// Result type alias for tender-sheets operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while importing a tender file
#[derive(Error, Debug)]
pub enum Error {
    /// File extension is not one of the accepted spreadsheet types
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// File exceeds the configured size limit
    #[error("File too large: {size} bytes (limit {limit})")]
    FileTooLarge { size: u64, limit: u64 },

    /// The decoder for this format was compiled out
    #[error("Support for {0} files is not enabled in this build")]
    FormatDisabled(SpreadsheetFormat),

    /// File could not be read or decoded
    #[error("Failed to read file: {0}")]
    Read(#[from] ReadError),

    /// Requested worksheet does not exist
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// No input files were given
    #[error("No files to import")]
    NoFiles,

    /// The sheet was decoded but could not be imported
    #[error(transparent)]
    Import(#[from] ImportError),
}

/// I/O and decoder failures
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "xlsx")]
    #[error(transparent)]
    Xlsx(#[from] tender_sheets_xlsx::XlsxError),

    #[cfg(feature = "xls")]
    #[error(transparent)]
    Xls(#[from] tender_sheets_xls::XlsError),

    #[cfg(feature = "csv")]
    #[error(transparent)]
    Csv(#[from] tender_sheets_csv::CsvError),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Read(ReadError::Io(err))
    }
}
