//! Hierarchical row assembler
//!
//! Walks data rows in sheet order and groups them under numbered section
//! headers. A section's totals are whatever its header row states; they are
//! never summed from the sub-items.

use once_cell::sync::Lazy;
use regex::Regex;
use tender_sheets_core::{CellValue, ColumnMap, ColumnRole, CostBreakdown, TenderRow, TenderSection};

use crate::classify::classify;
use crate::fold_case;
use crate::normalize::{normalize_number, normalize_text};
use crate::options::{AssembleOptions, OrphanRowPolicy, IMPLICIT_SECTION_NAME};

/// `01. Земляные работы`: two digits, a dot, space, then a capital letter
static SECTION_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}\.\s+\p{Lu}").expect("valid regex"));

/// `01.01.`: a sub-item number, never a section
static SUB_ITEM_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}\.\d{2}\.").expect("valid regex"));

/// Header captions that leak into the data area
const HEADER_PHRASES: &[&str] = &[
    "затрата тендера",
    "прямые затраты",
    "коммерческие затраты",
    "tender cost item",
    "direct costs",
    "commercial costs",
];

/// Result of assembling a sheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assembly {
    pub sections: Vec<TenderSection>,
    /// Rows skipped as blank, too short or leaked header text
    pub skipped_rows: usize,
    /// Sub-items seen before the first section header
    pub orphan_rows: usize,
}

impl Assembly {
    /// Number of sub-items across all sections
    pub fn sub_item_count(&self) -> usize {
        self.sections.iter().map(|s| s.sub_items().len()).sum()
    }
}

/// Check whether a row name opens a section
pub fn is_section_header(name: &str) -> bool {
    SECTION_HEADER.is_match(name) && !SUB_ITEM_NUMBER.is_match(name)
}

fn is_skippable(name: &str) -> bool {
    if name.chars().count() < 2 {
        return true;
    }
    let folded = fold_case(name);
    HEADER_PHRASES.contains(&folded.trim_end_matches(|c| c == '.' || c == ':'))
}

/// Group data rows into sections
///
/// `rows` is the whole sheet; assembly starts at `data_start_row`. Row ids
/// are `r{n}` and section ids `s{n}`, `n` being the 1-based sheet row.
pub fn assemble(
    rows: &[Vec<CellValue>],
    data_start_row: usize,
    columns: &ColumnMap,
    options: &AssembleOptions,
) -> Assembly {
    let mut out = Assembly::default();
    let mut current: Option<TenderSection> = None;

    for (idx, cells) in rows.iter().enumerate().skip(data_start_row) {
        let line = idx + 1;
        let row = extract_row(cells, line, columns);

        if is_skippable(&row.name) {
            out.skipped_rows += 1;
            continue;
        }

        if is_section_header(&row.name) {
            if let Some(section) = current.take() {
                out.sections.push(section);
            }
            current = Some(TenderSection::open(format!("s{line}"), row));
            continue;
        }

        let mut row = row;
        row.category = Some(classify(&row.name));

        if let Some(section) = current.as_mut() {
            section.push_row(row);
            continue;
        }
        match options.orphan_rows {
            OrphanRowPolicy::ImplicitSection => {
                let mut section = implicit_section();
                section.push_row(row);
                current = Some(section);
            }
            OrphanRowPolicy::Drop => {
                log::warn!("row {line} '{}' precedes every section header; dropped", row.name);
                out.orphan_rows += 1;
            }
        }
    }

    if let Some(section) = current {
        out.sections.push(section);
    }

    out
}

/// Read one sheet row through the column map
fn extract_row(cells: &[CellValue], line: usize, columns: &ColumnMap) -> TenderRow {
    let cell = |role: ColumnRole| cell_for(cells, columns, role);
    let number = |role: ColumnRole| normalize_number(cell_for(cells, columns, role));

    TenderRow {
        id: format!("r{line}"),
        name: normalize_text(cell(ColumnRole::Name)),
        category: None,
        volume: number(ColumnRole::Volume).max(0.0),
        unit: normalize_text(cell(ColumnRole::Unit)),
        costs: CostBreakdown {
            pz_labor: number(ColumnRole::PzLabor),
            pz_material: number(ColumnRole::PzMaterial),
            pz_total: number(ColumnRole::PzTotal),
            kz_labor: number(ColumnRole::KzLabor),
            kz_material: number(ColumnRole::KzMaterial),
            kz_total: number(ColumnRole::KzTotal),
            total_per_gba: number(ColumnRole::TotalPerGba),
        },
        is_section: false,
        section_id: None,
    }
}

fn cell_for<'a>(cells: &'a [CellValue], columns: &ColumnMap, role: ColumnRole) -> &'a CellValue {
    static EMPTY: CellValue = CellValue::Empty;
    columns
        .get(role)
        .and_then(|col| cells.get(col))
        .unwrap_or(&EMPTY)
}

fn implicit_section() -> TenderSection {
    let header = TenderRow {
        id: "r0".to_string(),
        name: IMPLICIT_SECTION_NAME.to_string(),
        category: None,
        volume: 0.0,
        unit: String::new(),
        costs: CostBreakdown::default(),
        is_section: true,
        section_id: None,
    };
    TenderSection::open("s0".to_string(), header)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tender_sheets_core::{Category, Resolution};

    fn columns() -> ColumnMap {
        let mut map = ColumnMap::new();
        map.assign(ColumnRole::Name, 0, Resolution::Keyword);
        map.assign(ColumnRole::Volume, 1, Resolution::Keyword);
        map.assign(ColumnRole::Unit, 2, Resolution::Keyword);
        map.assign(ColumnRole::PzTotal, 3, Resolution::Keyword);
        map
    }

    fn row(name: &str, volume: f64, unit: &str, pz_total: f64) -> Vec<CellValue> {
        vec![
            CellValue::text(name),
            CellValue::Number(volume),
            CellValue::text(unit),
            CellValue::Number(pz_total),
        ]
    }

    #[test]
    fn test_section_header_pattern() {
        assert!(is_section_header("01. Земляные работы"));
        assert!(is_section_header("12. Roofing"));
        assert!(!is_section_header("01.01. Разработка грунта"));
        assert!(!is_section_header("01. земляные работы"));
        assert!(!is_section_header("1. Кровля"));
        assert!(!is_section_header("Итого"));
    }

    #[test]
    fn test_sections_own_their_rows() {
        let rows = vec![
            row("Затрата тендера", 0.0, "", 0.0),
            row("01. Земляные работы", 0.0, "", 2_000_000.0),
            row("01.01. Разработка грунта", 1500.0, "м³", 1_200_000.0),
            row("01.02. Обратная засыпка", 800.0, "м³", 500.0),
            row("02. Кровля", 0.0, "", 10.0),
            row("02.01. Мембрана кровли", 120.0, "м2", 10.0),
        ];
        let out = assemble(&rows, 1, &columns(), &AssembleOptions::default());

        assert_eq!(out.sections.len(), 2);
        let first = &out.sections[0];
        assert_eq!(first.id, "s2");
        assert_eq!(first.name, "01. Земляные работы");
        assert!(first.rows[0].is_section);
        assert_eq!(first.rows[0].id, "r2");
        // Header totals, not the sum of the sub-items
        assert_eq!(first.totals().costs.pz_total, 2_000_000.0);
        let names: Vec<&str> = first.sub_items().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["01.01. Разработка грунта", "01.02. Обратная засыпка"]);
        assert!(first
            .sub_items()
            .iter()
            .all(|r| !r.is_section && r.section_id.as_deref() == Some("s2")));
        assert_eq!(first.sub_items()[0].category, Some(Category::Earthworks));
        assert_eq!(out.sections[1].sub_items()[0].category, Some(Category::Roofing));
        assert_eq!(out.sub_item_count(), 3);
    }

    #[test]
    fn test_skips_blank_short_and_leaked_headers() {
        let rows = vec![
            row("01. Кровля", 0.0, "", 0.0),
            vec![],
            row("x", 1.0, "", 0.0),
            row("Прямые затраты", 0.0, "", 0.0),
            row("КОММЕРЧЕСКИЕ ЗАТРАТЫ:", 0.0, "", 0.0),
            row("01.01. Мембрана", 1.0, "м2", 0.0),
        ];
        let out = assemble(&rows, 0, &columns(), &AssembleOptions::default());

        assert_eq!(out.skipped_rows, 4);
        assert_eq!(out.sub_item_count(), 1);
    }

    #[test]
    fn test_orphan_rows_dropped_by_default() {
        let rows = vec![
            row("Устройство лесов", 1.0, "", 5.0),
            row("01. Фасад", 0.0, "", 0.0),
            row("01.01. Облицовка", 1.0, "м2", 1.0),
        ];
        let out = assemble(&rows, 0, &columns(), &AssembleOptions::default());

        assert_eq!(out.orphan_rows, 1);
        assert_eq!(out.sections.len(), 1);
        assert_eq!(out.sub_item_count(), 1);
    }

    #[test]
    fn test_orphan_rows_into_implicit_section() {
        let rows = vec![
            row("Устройство лесов", 1.0, "", 5.0),
            row("01. Фасад", 0.0, "", 0.0),
            row("01.01. Облицовка", 1.0, "м2", 1.0),
        ];
        let options = AssembleOptions {
            orphan_rows: OrphanRowPolicy::ImplicitSection,
        };
        let out = assemble(&rows, 0, &columns(), &options);

        assert_eq!(out.orphan_rows, 0);
        assert_eq!(out.sections.len(), 2);
        let implicit = &out.sections[0];
        assert_eq!(implicit.name, IMPLICIT_SECTION_NAME);
        assert!(implicit.rows[0].is_section);
        assert!(implicit.totals().costs.is_zero());
        assert_eq!(implicit.sub_items()[0].section_id.as_deref(), Some("s0"));
    }

    #[test]
    fn test_negative_volume_clamped_and_missing_columns_zero() {
        let mut map = ColumnMap::new();
        map.assign(ColumnRole::Name, 0, Resolution::Default);
        map.assign(ColumnRole::Volume, 1, Resolution::Positional);
        map.assign(ColumnRole::KzTotal, 9, Resolution::Keyword);

        let rows = vec![
            vec![CellValue::text("01. Кровля")],
            vec![CellValue::text("01.01. Мембрана"), CellValue::text("-5")],
        ];
        let out = assemble(&rows, 0, &map, &AssembleOptions::default());
        let item = &out.sections[0].sub_items()[0];

        assert_eq!(item.volume, 0.0);
        assert_eq!(item.unit, "");
        assert!(item.costs.is_zero());
    }
}
