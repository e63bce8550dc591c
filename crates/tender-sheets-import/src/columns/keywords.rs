//! Header keyword tables and the keyword pass
//!
//! Labels reach this module already lowercased with `ё` folded to `е`, so
//! every token below is written in that form. Russian stems are used where
//! the word inflects (`затрат` matches `затрата`, `затраты`, `затрат`).

use tender_sheets_core::{ColumnMap, ColumnRole, Resolution};

const COST_ITEM: &[&str] = &["затрат", "cost item"];
const TENDER: &[&str] = &["тендер", "tender"];
const ITEM_NAME: &[&str] = &["наименование", "description"];
const VOLUME: &[&str] = &["объем", "volume", "quantity", "кол-во", "количество"];
const TOTAL: &[&str] = &["итого", "всего", "total"];
const UNIT: &[&str] = &["ед", "unit"];
const MEASURE: &[&str] = &["изм", "measure"];
const DIRECT: &[&str] = &["прям", "direct"];
const COMMERCIAL: &[&str] = &["коммерч", "commercial"];
const COSTS: &[&str] = &["затрат", "cost"];
const OVERALL: &[&str] = &["общ", "overall", "gross"];
const AREA: &[&str] = &["площад", "area"];
const LABOR: &[&str] = &["труд", "работ", "labor", "labour"];
const MATERIAL: &[&str] = &["матер", "material"];
const PER_UNIT: &[&str] = &["за ед", "на ед", "per unit", "/ед"];

fn has_any(label: &str, tokens: &[&str]) -> bool {
    tokens.iter().any(|t| label.contains(t))
}

/// The item-name header ("Затрата тендера", "Наименование")
pub fn is_name_label(label: &str) -> bool {
    (has_any(label, COST_ITEM) && has_any(label, TENDER)) || has_any(label, ITEM_NAME)
}

/// A bare quantity header, not a "total volume" column
pub fn is_volume_label(label: &str) -> bool {
    has_any(label, VOLUME) && !is_total_label(label)
}

/// The unit-of-measure header ("Ед. изм.")
pub fn is_unit_label(label: &str) -> bool {
    has_any(label, UNIT) && has_any(label, MEASURE)
}

/// Any header carrying a total word
pub fn is_total_label(label: &str) -> bool {
    has_any(label, TOTAL)
}

/// The "total per gross building area" header
pub fn is_gba_label(label: &str) -> bool {
    is_total_label(label) && has_any(label, OVERALL) && has_any(label, AREA)
}

fn is_labor_label(label: &str) -> bool {
    has_any(label, LABOR) && has_any(label, PER_UNIT)
}

fn is_material_label(label: &str) -> bool {
    has_any(label, MATERIAL) && has_any(label, PER_UNIT)
}

/// Cost group a header run belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostGroup {
    Direct,
    Commercial,
}

impl CostGroup {
    fn entered_by(label: &str) -> Option<CostGroup> {
        if !has_any(label, COSTS) {
            return None;
        }
        if has_any(label, DIRECT) {
            Some(CostGroup::Direct)
        } else if has_any(label, COMMERCIAL) {
            Some(CostGroup::Commercial)
        } else {
            None
        }
    }

    /// `(labor, material, total)` roles of the group
    pub fn roles(self) -> (ColumnRole, ColumnRole, ColumnRole) {
        match self {
            CostGroup::Direct => (ColumnRole::PzLabor, ColumnRole::PzMaterial, ColumnRole::PzTotal),
            CostGroup::Commercial => (ColumnRole::KzLabor, ColumnRole::KzMaterial, ColumnRole::KzTotal),
        }
    }
}

/// Output of the keyword pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordMatch {
    /// Roles resolved by keyword
    pub map: ColumnMap,
    /// Generic total columns seen inside the direct-cost group
    pub direct_totals: Vec<usize>,
    /// Generic total columns seen inside the commercial-cost group
    pub commercial_totals: Vec<usize>,
}

impl KeywordMatch {
    /// Total candidates of one group, left to right
    pub fn candidates(&self, group: CostGroup) -> &[usize] {
        match group {
            CostGroup::Direct => &self.direct_totals,
            CostGroup::Commercial => &self.commercial_totals,
        }
    }

    fn candidates_mut(&mut self, group: CostGroup) -> &mut Vec<usize> {
        match group {
            CostGroup::Direct => &mut self.direct_totals,
            CostGroup::Commercial => &mut self.commercial_totals,
        }
    }
}

/// Single left-to-right pass over combined header labels
///
/// Each column gets at most one role and the first column to claim a role
/// keeps it. A column entering a cost group may itself be one of the
/// group's sub-columns, since merged group captions share a column with
/// their first sub-label.
pub fn match_keywords(labels: &[String]) -> KeywordMatch {
    let mut out = KeywordMatch::default();
    let mut group: Option<CostGroup> = None;

    for (col, label) in labels.iter().enumerate() {
        let label = label.as_str();
        if label.is_empty() {
            continue;
        }

        if is_gba_label(label) {
            out.map.assign(ColumnRole::TotalPerGba, col, Resolution::Keyword);
            group = None;
            continue;
        }

        if let Some(entered) = CostGroup::entered_by(label) {
            group = Some(entered);
        }

        if is_name_label(label) {
            out.map.assign(ColumnRole::Name, col, Resolution::Keyword);
        } else if is_unit_label(label) {
            out.map.assign(ColumnRole::Unit, col, Resolution::Keyword);
        } else if is_volume_label(label) {
            out.map.assign(ColumnRole::Volume, col, Resolution::Keyword);
        } else if let (Some(g), true) = (group, is_total_label(label)) {
            let (labor, material, _) = g.roles();
            if is_labor_label(label) {
                out.map.assign(labor, col, Resolution::Keyword);
            } else if is_material_label(label) {
                out.map.assign(material, col, Resolution::Keyword);
            } else {
                out.candidates_mut(g).push(col);
            }
        }
    }

    out
}
