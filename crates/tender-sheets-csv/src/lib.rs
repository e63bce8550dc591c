//! # tender-sheets-csv
//!
//! CSV reader for tender-sheets.
//!
//! Tender exports from Russian-locale spreadsheets use `;` as the field
//! separator and `,` as the decimal mark, so the delimiter is sniffed from
//! the first line unless it is set explicitly. Every field stays text; the
//! importer's normalizer decides what is numeric.

mod error;
mod options;
mod reader;

pub use error::{CsvError, CsvResult};
pub use options::CsvReadOptions;
pub use reader::CsvReader;
