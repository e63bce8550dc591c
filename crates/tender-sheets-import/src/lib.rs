//! # tender-sheets-import
//!
//! Turns a decoded tender sheet into a hierarchical Bill of Quantities.
//!
//! The engine runs in stages, each a plain function over in-memory data:
//!
//! 1. [`locate_data_start`] splits header rows from data rows
//! 2. [`build_column_map`] assigns semantic roles to columns
//! 3. [`assemble`] groups data rows into sections, classifying each
//!    sub-item with [`classify`]
//! 4. [`flatten`] derives the flat work-item list
//!
//! [`import_sheet`] runs the whole pipeline and reports what it could not
//! resolve.
//!
//! ## Example
//!
//! ```rust
//! use chrono::{NaiveDate, Utc};
//! use tender_sheets_core::{CellValue, RawSheet};
//! use tender_sheets_import::{import_sheet, ImportOptions, ImportRequest};
//!
//! let sheet = RawSheet::new(
//!     "Смета",
//!     vec![
//!         vec!["Затрата тендера".into(), "Ед. изм.".into(), "Объем".into()],
//!         vec!["01. Кровля".into(), CellValue::Empty, CellValue::Empty],
//!         vec!["01.01. Мембрана".into(), "м2".into(), CellValue::Number(120.0)],
//!     ],
//! );
//! let request = ImportRequest::new(
//!     "ЖК Северный",
//!     NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
//!     "smeta.xlsx",
//!     Utc::now(),
//! );
//!
//! let outcome = import_sheet(&sheet, &request, &ImportOptions::default()).unwrap();
//! assert_eq!(outcome.file.sections.len(), 1);
//! assert_eq!(outcome.work_items[0].quantity, 120.0);
//! ```

pub mod assemble;
pub mod classify;
pub mod columns;
pub mod error;
pub mod flat;
pub mod header;
pub mod normalize;
pub mod options;
pub mod pipeline;

pub use assemble::{assemble, Assembly};
pub use classify::classify;
pub use columns::build_column_map;
pub use error::{ImportError, ImportResult};
pub use flat::flatten;
pub use header::{detect_sheet_date, locate_data_start, DataStart};
pub use normalize::{normalize_date, normalize_number, normalize_text};
pub use options::{AssembleOptions, ImportOptions, OrphanRowPolicy, SheetSelector};
pub use pipeline::{import_sheet, ImportOutcome, ImportReport, ImportRequest};

/// Lowercase and fold `ё` into `е`, the form every keyword table uses
pub(crate) fn fold_case(s: &str) -> String {
    s.to_lowercase().replace('ё', "е")
}
