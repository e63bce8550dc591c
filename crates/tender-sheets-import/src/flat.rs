//! Flat work-item view of assembled sections

use once_cell::sync::Lazy;
use regex::Regex;
use tender_sheets_core::{TenderRow, TenderSection, WorkItem};

use crate::classify::classify;

/// Outline number (`01.`, `01.02.`, `01.02.03.`) and the text after it
static OUTLINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2}\.(?:\d{2}\.)*)\s*(.*)$").expect("valid regex"));

/// Split `"01.01. Разработка грунта"` into `("01.01.", "Разработка грунта")`
///
/// Names without an outline number come back with an empty code.
pub fn split_code(name: &str) -> (String, String) {
    match OUTLINE.captures(name) {
        Some(caps) => (caps[1].to_string(), caps[2].trim().to_string()),
        None => (String::new(), name.to_string()),
    }
}

/// One work item per sub-item, in section order
///
/// Rows that already carry a category keep it as the suggestion; the rest
/// are classified here.
pub fn flatten(sections: &[TenderSection]) -> Vec<WorkItem> {
    sections
        .iter()
        .flat_map(|section| {
            section
                .sub_items()
                .iter()
                .map(move |row| work_item(row, &section.name))
        })
        .collect()
}

fn work_item(row: &TenderRow, section: &str) -> WorkItem {
    let (code, name) = split_code(&row.name);
    WorkItem {
        id: row.id.clone(),
        code,
        name,
        section: section.to_string(),
        suggested_category: row.category.unwrap_or_else(|| classify(&row.name)),
        unit: row.unit.clone(),
        quantity: row.volume,
        direct_total: row.costs.pz_total,
        commercial_total: row.costs.kz_total,
        total_per_gba: row.costs.total_per_gba,
    }
}
