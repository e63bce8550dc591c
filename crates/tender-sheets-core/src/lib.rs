//! # tender-sheets-core
//!
//! Core data structures for the tender-sheets BOQ importer.
//!
//! This crate provides the fundamental types used throughout tender-sheets:
//! - [`CellValue`] - The closed set of values a decoded spreadsheet cell can hold
//! - [`RawSheet`] and [`RawWorkbook`] - Decoded grids, as handed over by the readers
//! - [`ColumnRole`] and [`ColumnMap`] - Semantic column assignments for a sheet
//! - [`Category`] - The fixed list of construction-work categories
//! - [`TenderProject`], [`TenderFile`], [`TenderSection`], [`TenderRow`] - The BOQ cost model
//! - [`WorkItem`] - The flat, non-hierarchical view of the same rows
//!
//! ## Example
//!
//! ```rust
//! use tender_sheets_core::{CellValue, RawSheet};
//!
//! let sheet = RawSheet::new(
//!     "Sheet1",
//!     vec![
//!         vec![CellValue::from("Затрата тендера"), CellValue::from("Объем")],
//!         vec![CellValue::from("01. Земляные работы"), CellValue::from(1500.0)],
//!     ],
//! );
//!
//! assert_eq!(sheet.row_count(), 2);
//! assert_eq!(sheet.cell(1, 1).as_number(), Some(1500.0));
//! assert!(sheet.cell(7, 7).is_empty());
//! ```

pub mod boq;
pub mod category;
pub mod cell;
pub mod column;
pub mod error;
pub mod sheet;
pub mod work_item;

// Re-exports for convenience
pub use boq::{CostBreakdown, SectionTotals, TenderFile, TenderProject, TenderRow, TenderSection};
pub use category::Category;
pub use cell::{CellAddress, CellValue};
pub use column::{ColumnMap, ColumnRole, ColumnSlot, Resolution};
pub use error::{Error, Result};
pub use sheet::{RawSheet, RawWorkbook};
pub use work_item::WorkItem;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;
