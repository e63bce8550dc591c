//! Import options

/// Maximum accepted file size (10 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Number of leading rows searched for the first data row
pub const DEFAULT_HEADER_SCAN_ROWS: usize = 10;

/// Name of the section synthesized for rows that precede every section header
pub const IMPLICIT_SECTION_NAME: &str = "00. Без раздела";

/// What to do with a sub-item that appears before any section header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrphanRowPolicy {
    /// Drop the row and count it in the report
    #[default]
    Drop,
    /// Collect such rows under a zero-total section named
    /// [`IMPLICIT_SECTION_NAME`]
    ImplicitSection,
}

/// Which worksheet of a workbook to import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SheetSelector {
    /// The first sheet in tab order
    #[default]
    First,
    /// 0-based sheet index
    Index(usize),
    /// Sheet name, compared case-insensitively
    Name(String),
}

impl std::str::FromStr for SheetSelector {
    type Err = std::convert::Infallible;

    /// Digits select by index, anything else by name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().parse::<usize>() {
            Ok(index) => SheetSelector::Index(index),
            Err(_) => SheetSelector::Name(s.trim().to_string()),
        })
    }
}

/// Options for the row assembler
#[derive(Debug, Clone, Default)]
pub struct AssembleOptions {
    /// Handling of sub-items seen before the first section header
    pub orphan_rows: OrphanRowPolicy,
}

/// Options for importing a tender sheet
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Files larger than this are rejected before decoding
    pub max_file_size: u64,
    /// Leading rows searched for the first data row
    pub header_scan_rows: usize,
    /// Clear sub-item categories after import so they are annotated by hand
    pub clear_sub_item_categories: bool,
    /// Handling of sub-items seen before the first section header
    pub orphan_rows: OrphanRowPolicy,
    /// Worksheet to import
    pub sheet: SheetSelector,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            header_scan_rows: DEFAULT_HEADER_SCAN_ROWS,
            clear_sub_item_categories: true,
            orphan_rows: OrphanRowPolicy::Drop,
            sheet: SheetSelector::First,
        }
    }
}

impl ImportOptions {
    /// The subset of options the assembler needs
    pub fn assemble_options(&self) -> AssembleOptions {
        AssembleOptions {
            orphan_rows: self.orphan_rows,
        }
    }
}
