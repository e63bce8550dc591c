//! # tender-sheets-xls
//!
//! XLS (BIFF8) reader for tender-sheets.
//!
//! Handles the legacy Excel binary format (.xls): a Compound File Binary
//! container holding a `Workbook` stream of BIFF8 records. Only cell values
//! are decoded; each worksheet becomes a
//! [`RawSheet`](tender_sheets_core::RawSheet).

pub mod biff;
pub mod error;
pub mod reader;

pub use error::{XlsError, XlsResult};
pub use reader::XlsReader;
