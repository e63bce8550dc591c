//! Prelude module - common imports for tender-sheets users
//!
//! ```rust
//! use tender_sheets::prelude::*;
//! ```

pub use crate::{
    // Cost model
    Category,
    CellValue,
    ColumnMap,
    ColumnRole,
    // Error types
    Error,
    ImportError,
    // Import
    ImportOptions,
    ImportOutcome,
    ImportReport,
    ImportRequest,
    OrphanRowPolicy,
    ProjectImport,
    RawSheet,
    RawWorkbook,
    Result,
    SheetSelector,
    SpreadsheetFormat,
    TenderFile,
    TenderImporter,
    TenderProject,
    TenderRow,
    TenderSection,
    WorkItem,
    // Extension traits
    WorkbookExt,
};
