//! Semantic column roles and the per-sheet column map

use std::fmt;

/// The semantic role a spreadsheet column can play in a tender sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum ColumnRole {
    /// Item description ("Затрата тендера")
    Name,
    /// Quantity
    Volume,
    /// Unit of measure
    Unit,
    /// Direct cost, labor per unit
    PzLabor,
    /// Direct cost, material per unit
    PzMaterial,
    /// Direct cost, total
    PzTotal,
    /// Commercial cost, labor per unit
    KzLabor,
    /// Commercial cost, material per unit
    KzMaterial,
    /// Commercial cost, total
    KzTotal,
    /// Total per unit of gross building area
    #[cfg_attr(feature = "serde", serde(rename = "totalPerGBA"))]
    TotalPerGba,
}

impl ColumnRole {
    /// Number of roles
    pub const COUNT: usize = 10;

    /// Every role, in declaration order
    pub const ALL: [ColumnRole; ColumnRole::COUNT] = [
        ColumnRole::Name,
        ColumnRole::Volume,
        ColumnRole::Unit,
        ColumnRole::PzLabor,
        ColumnRole::PzMaterial,
        ColumnRole::PzTotal,
        ColumnRole::KzLabor,
        ColumnRole::KzMaterial,
        ColumnRole::KzTotal,
        ColumnRole::TotalPerGba,
    ];

    /// The numeric cost roles (everything except name, volume and unit)
    pub const COSTS: [ColumnRole; 7] = [
        ColumnRole::PzLabor,
        ColumnRole::PzMaterial,
        ColumnRole::PzTotal,
        ColumnRole::KzLabor,
        ColumnRole::KzMaterial,
        ColumnRole::KzTotal,
        ColumnRole::TotalPerGba,
    ];

    /// Stable short key (`name`, `pzTotal`, `totalPerGBA`, ...)
    pub fn key(self) -> &'static str {
        match self {
            ColumnRole::Name => "name",
            ColumnRole::Volume => "volume",
            ColumnRole::Unit => "unit",
            ColumnRole::PzLabor => "pzLabor",
            ColumnRole::PzMaterial => "pzMaterial",
            ColumnRole::PzTotal => "pzTotal",
            ColumnRole::KzLabor => "kzLabor",
            ColumnRole::KzMaterial => "kzMaterial",
            ColumnRole::KzTotal => "kzTotal",
            ColumnRole::TotalPerGba => "totalPerGBA",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// How a role got its column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Resolution {
    /// Matched by header keywords
    Keyword,
    /// Last "total" candidate of its cost group
    GroupTotals,
    /// Midpoint split over every "total" column in the sheet
    TotalsSplit,
    /// Fixed column index
    Positional,
    /// Built-in default (only `name`, column 0)
    Default,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Resolution::Keyword => "keyword",
            Resolution::GroupTotals => "group totals",
            Resolution::TotalsSplit => "totals split",
            Resolution::Positional => "positional",
            Resolution::Default => "default",
        };
        f.write_str(s)
    }
}

/// A resolved column for one role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnSlot {
    /// 0-based column index
    pub column: usize,
    /// Which matcher stage assigned it
    pub resolution: Resolution,
}

/// Mapping from semantic role to column index, built once per sheet
///
/// Roles are assigned at most once; later stages only fill what earlier
/// stages left unresolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnMap {
    slots: [Option<ColumnSlot>; ColumnRole::COUNT],
}

impl ColumnMap {
    /// Create a map with every role unresolved
    pub fn new() -> Self {
        Self::default()
    }

    /// Column index for a role
    pub fn get(&self, role: ColumnRole) -> Option<usize> {
        self.slots[role.index()].map(|s| s.column)
    }

    /// How a role was resolved
    pub fn resolution(&self, role: ColumnRole) -> Option<Resolution> {
        self.slots[role.index()].map(|s| s.resolution)
    }

    /// Check whether a role has a column
    pub fn is_resolved(&self, role: ColumnRole) -> bool {
        self.slots[role.index()].is_some()
    }

    /// Assign a column to a role unless it already has one
    ///
    /// Returns `true` if the assignment took place.
    pub fn assign(&mut self, role: ColumnRole, column: usize, resolution: Resolution) -> bool {
        let slot = &mut self.slots[role.index()];
        if slot.is_some() {
            return false;
        }
        *slot = Some(ColumnSlot { column, resolution });
        true
    }

    /// Roles without a column, in declaration order
    pub fn unresolved(&self) -> Vec<ColumnRole> {
        ColumnRole::ALL
            .iter()
            .copied()
            .filter(|r| !self.is_resolved(*r))
            .collect()
    }

    /// Resolved roles with their slots, in declaration order
    pub fn entries(&self) -> impl Iterator<Item = (ColumnRole, ColumnSlot)> + '_ {
        ColumnRole::ALL
            .iter()
            .filter_map(move |r| self.slots[r.index()].map(|s| (*r, s)))
    }

    /// Roles mapped to a given column
    pub fn roles_at(&self, column: usize) -> Vec<ColumnRole> {
        self.entries()
            .filter(|(_, s)| s.column == column)
            .map(|(r, _)| r)
            .collect()
    }
}
