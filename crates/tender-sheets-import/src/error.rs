//! Import error types

use tender_sheets_core::ColumnRole;
use thiserror::Error;

/// Result type for import operations
pub type ImportResult<T> = std::result::Result<T, ImportError>;

/// Terminal import failures
///
/// Anything recoverable (an unresolved column, an unparsable number, an
/// unknown category) degrades to a default instead of landing here.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Project name was empty
    #[error("Project name is required")]
    MissingProjectName,

    /// Fewer than two rows in the sheet
    #[error("Sheet is empty or too short: {rows} row(s), need at least 2")]
    SheetTooShort { rows: usize },

    /// Headers were processed but no sub-item survived extraction
    #[error("No rows could be extracted; unresolved columns: {}", format_roles(.unresolved))]
    NoRowsExtracted { unresolved: Vec<ColumnRole> },
}

fn format_roles(roles: &[ColumnRole]) -> String {
    if roles.is_empty() {
        return "none".to_string();
    }
    roles.iter().map(|r| r.key()).collect::<Vec<_>>().join(", ")
}
