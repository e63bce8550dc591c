//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellValue`] - The value stored in a decoded cell
//! - [`CellAddress`] - A cell's location (e.g., "A1")

mod address;
mod value;

pub use address::CellAddress;
pub use value::CellValue;
