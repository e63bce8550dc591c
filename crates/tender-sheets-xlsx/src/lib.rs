//! # tender-sheets-xlsx
//!
//! XLSX (Office Open XML) reader for tender-sheets.
//!
//! Only cell values are read: every worksheet becomes a
//! [`RawSheet`](tender_sheets_core::RawSheet) grid. Styles, formulas and
//! drawing parts are skipped.

pub mod error;
pub mod reader;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
