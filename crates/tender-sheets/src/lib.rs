//! # tender-sheets
//!
//! Import loosely structured construction-tender spreadsheets into a
//! hierarchical Bill of Quantities.
//!
//! A tender sheet has a few header rows (often merged across two lines),
//! numbered section rows such as `01. Земляные работы`, and sub-item rows
//! such as `01.01. Разработка грунта` carrying volume, unit and direct /
//! commercial costs. Column positions vary from one contractor to the
//! next; the importer finds them by header keywords and falls back to
//! positions when the headers are unreadable.
//!
//! ## Features
//!
//! - `xlsx` (default): Office Open XML workbooks (`.xlsx`, `.xlsm`)
//! - `csv` (default): comma- or semicolon-separated exports
//! - `xls`: legacy BIFF8 workbooks
//! - `serde`: `Serialize` on the cost model and import reports
//! - `full`: all of the above
//!
//! ## Example
//!
//! ```rust
//! use chrono::{NaiveDate, Utc};
//! use tender_sheets::prelude::*;
//!
//! let csv = "Затрата тендера;Объем;Ед. изм.\n\
//!            01. Кровля;;\n\
//!            01.01. Мембрана кровли;120;м2\n";
//!
//! let request = ImportRequest::new(
//!     "ЖК Северный парк",
//!     NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
//!     "smeta.csv",
//!     Utc::now(),
//! );
//! let outcome = TenderImporter::default()
//!     .import_bytes(csv.as_bytes(), &request)
//!     .unwrap();
//!
//! assert_eq!(outcome.file.sections[0].name, "01. Кровля");
//! assert_eq!(outcome.work_items[0].quantity, 120.0);
//! assert_eq!(outcome.work_items[0].unit, "м2");
//! ```

pub mod error;
pub mod format;
pub mod importer;
pub mod prelude;
pub mod read;

pub use error::{Error, ReadError, Result};
pub use format::SpreadsheetFormat;
pub use importer::{ImportedFile, ProjectImport, TenderImporter};
pub use read::{read_workbook, read_workbook_bytes, select_sheet};

// Re-export core types
pub use tender_sheets_core::{
    CellValue, Category, ColumnMap, ColumnRole, ColumnSlot, CostBreakdown, RawSheet, RawWorkbook,
    Resolution, SectionTotals, TenderFile, TenderProject, TenderRow, TenderSection, WorkItem,
};

// Re-export the import engine
pub use tender_sheets_import::{
    import_sheet, ImportError, ImportOptions, ImportOutcome, ImportReport, ImportRequest,
    OrphanRowPolicy, SheetSelector,
};

/// Stage-level access to the import engine
pub use tender_sheets_import as engine;

// Re-export readers
#[cfg(feature = "csv")]
pub use tender_sheets_csv::{CsvError, CsvReadOptions, CsvReader};
#[cfg(feature = "xls")]
pub use tender_sheets_xls::{XlsError, XlsReader};
#[cfg(feature = "xlsx")]
pub use tender_sheets_xlsx::{XlsxError, XlsxReader};

use std::path::Path;

/// Extension trait for RawWorkbook to add file I/O
pub trait WorkbookExt {
    /// Open a workbook, dispatching on the file extension
    ///
    /// Applies the default size limit.
    fn open<P: AsRef<Path>>(path: P) -> Result<RawWorkbook>;
}

impl WorkbookExt for RawWorkbook {
    fn open<P: AsRef<Path>>(path: P) -> Result<RawWorkbook> {
        read_workbook(path, ImportOptions::default().max_file_size)
    }
}
