//! Fallback stages of the column matcher
//!
//! Each stage only fills roles the earlier stages left unresolved, so they
//! can run unconditionally and in order.

use tender_sheets_core::{ColumnMap, ColumnRole, Resolution};

use super::keywords::{is_gba_label, is_total_label, CostGroup, KeywordMatch};

/// Column used for volume when no header names it
pub const POSITIONAL_VOLUME: usize = 2;
/// Column used for the unit when no header names it
pub const POSITIONAL_UNIT: usize = 3;

/// Give each group's unresolved Total the group's last total candidate
pub fn apply_group_totals(keywords: &KeywordMatch, map: &mut ColumnMap) {
    for group in [CostGroup::Direct, CostGroup::Commercial] {
        let (_, _, total) = group.roles();
        if let Some(&col) = keywords.candidates(group).last() {
            if map.assign(total, col, Resolution::GroupTotals) {
                log::debug!("{total} <- column {col} (last total of its group)");
            }
        }
    }
}

/// Split every total-bearing column at the midpoint into a direct half and
/// a commercial half
///
/// Runs only while some cost role is unresolved. The last three columns of
/// each half become labor, material and total, right-aligned when a half is
/// shorter. When the commercial half ends in a gross-area column, that
/// column becomes `totalPerGBA` and the three before it are used instead.
/// The direct-before-commercial ordering is assumed, not checked.
///
/// Returns `true` if any role was filled.
pub fn apply_totals_split(labels: &[String], map: &mut ColumnMap) -> bool {
    if ColumnRole::COSTS.iter().all(|r| map.is_resolved(*r)) {
        return false;
    }

    let totals: Vec<usize> = labels
        .iter()
        .enumerate()
        .filter(|(_, l)| is_total_label(l))
        .map(|(i, _)| i)
        .collect();
    if totals.is_empty() {
        return false;
    }

    let (direct, mut commercial) = totals.split_at(totals.len() / 2);
    let mut filled = assign_triplet(direct, CostGroup::Direct, map);

    if let Some((&last, rest)) = commercial.split_last() {
        if is_gba_label(&labels[last]) {
            filled |= map.assign(ColumnRole::TotalPerGba, last, Resolution::TotalsSplit);
            commercial = rest;
        }
    }
    filled |= assign_triplet(commercial, CostGroup::Commercial, map);

    if filled {
        log::debug!(
            "cost columns split at the midpoint of {} total columns: direct {direct:?}, commercial {commercial:?}",
            totals.len()
        );
    }
    filled
}

fn assign_triplet(columns: &[usize], group: CostGroup, map: &mut ColumnMap) -> bool {
    let (labor, material, total) = group.roles();
    let mut filled = false;
    for (role, &col) in [total, material, labor].into_iter().zip(columns.iter().rev()) {
        filled |= map.assign(role, col, Resolution::TotalsSplit);
    }
    filled
}

/// Fixed positions for volume and unit, when the sheet is wide enough
pub fn apply_positional(map: &mut ColumnMap, column_count: usize) {
    for (role, col) in [
        (ColumnRole::Volume, POSITIONAL_VOLUME),
        (ColumnRole::Unit, POSITIONAL_UNIT),
    ] {
        if col < column_count && map.assign(role, col, Resolution::Positional) {
            log::debug!("{role} <- column {col} (positional)");
        }
    }
}

/// `name` falls back to the first column
pub fn apply_name_default(map: &mut ColumnMap) {
    if map.assign(ColumnRole::Name, 0, Resolution::Default) {
        log::debug!("name <- column 0 (default)");
    }
}
