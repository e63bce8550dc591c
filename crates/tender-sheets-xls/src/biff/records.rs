//! BIFF8 record type constants.
//!
//! Only the records the grid reader acts on are listed.

// Stream structure
pub const BOF: u16 = 0x0809;
pub const EOF: u16 = 0x000A;
pub const CONTINUE: u16 = 0x003C;

// Workbook globals
pub const BOUNDSHEET: u16 = 0x0085; // Sheet name, type, stream offset
pub const SST: u16 = 0x00FC; // Shared String Table
pub const DATEMODE: u16 = 0x0022; // 1900 vs 1904 date system

// Cell records
pub const LABELSST: u16 = 0x00FD; // SST string index
pub const LABEL: u16 = 0x0204; // Inline string
pub const NUMBER: u16 = 0x0203; // IEEE 754 double
pub const RK: u16 = 0x027E; // Compressed number
pub const MULRK: u16 = 0x00BD; // Run of RK values in one row
pub const BOOLERR: u16 = 0x0205; // Boolean or error
pub const FORMULA: u16 = 0x0006; // Formula with cached result
pub const STRING: u16 = 0x0207; // Cached string result of the preceding FORMULA

// BOF substream types
pub const BOF_WORKBOOK_GLOBALS: u16 = 0x0005;
pub const BOF_WORKSHEET: u16 = 0x0010;

/// BIFF version we support
pub const BIFF8_VERSION: u16 = 0x0600;

/// BOUNDSHEET sheet type for ordinary worksheets
pub const SHEET_TYPE_WORKSHEET: u8 = 0;
