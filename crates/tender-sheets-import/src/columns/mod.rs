//! Column role matcher
//!
//! Resolution runs in priority order, each stage a pure function that only
//! fills what earlier stages left open:
//!
//! 1. [`combine_header_labels`] folds multi-row headers into one label per column
//! 2. [`match_keywords`] assigns roles from header wording
//! 3. [`apply_group_totals`] picks each cost group's total
//! 4. [`apply_totals_split`] splits every total column between the two groups
//! 5. [`apply_positional`] puts volume and unit at their customary columns
//! 6. [`apply_name_default`] pins `name` to column 0
//!
//! The matcher never fails; whatever stays unresolved is listed by
//! [`ColumnMap::unresolved`].

mod fallback;
mod keywords;

pub use fallback::{
    apply_group_totals, apply_name_default, apply_positional, apply_totals_split,
    POSITIONAL_UNIT, POSITIONAL_VOLUME,
};
pub use keywords::{
    is_gba_label, is_name_label, is_total_label, is_unit_label, is_volume_label, match_keywords,
    CostGroup, KeywordMatch,
};

use tender_sheets_core::{CellValue, ColumnMap};

use crate::fold_case;
use crate::normalize::normalize_text;

/// One lowercase label per column, header rows joined with spaces
///
/// Handles headers split over several physical rows (a merged group caption
/// above, a sub-label below). Runs of whitespace, including line breaks
/// inside a cell, collapse to one space.
pub fn combine_header_labels(header_rows: &[Vec<CellValue>], column_count: usize) -> Vec<String> {
    let width = header_rows
        .iter()
        .map(Vec::len)
        .max()
        .unwrap_or(0)
        .max(column_count);

    (0..width)
        .map(|col| {
            let joined = header_rows
                .iter()
                .filter_map(|row| row.get(col))
                .map(normalize_text)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            fold_case(&joined)
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Build the column map for a sheet from its header rows
///
/// `column_count` is the width of the whole sheet, which can exceed the
/// header's and decides whether the positional fallback applies.
pub fn build_column_map(header_rows: &[Vec<CellValue>], column_count: usize) -> ColumnMap {
    let labels = combine_header_labels(header_rows, column_count);
    log::debug!("combined header labels: {labels:?}");

    let keywords = match_keywords(&labels);
    let mut map = keywords.map.clone();
    apply_group_totals(&keywords, &mut map);
    apply_totals_split(&labels, &mut map);
    apply_positional(&mut map, labels.len());
    apply_name_default(&mut map);

    map
}
