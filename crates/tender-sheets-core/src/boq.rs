//! BOQ cost model: project → file → section → row
//!
//! Sections exclusively own their rows. A row's `section_id` is a
//! back-reference for display and lookup, never an ownership edge.

use chrono::{DateTime, NaiveDate, Utc};

use crate::category::Category;
use crate::error::{Error, Result};

/// Direct (ПЗ) and commercial (КЗ) cost breakdown of one row
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CostBreakdown {
    pub pz_labor: f64,
    pub pz_material: f64,
    pub pz_total: f64,
    pub kz_labor: f64,
    pub kz_material: f64,
    pub kz_total: f64,
    #[cfg_attr(feature = "serde", serde(rename = "totalPerGBA"))]
    pub total_per_gba: f64,
}

impl CostBreakdown {
    /// Field-wise sum
    pub fn add(&self, other: &CostBreakdown) -> CostBreakdown {
        CostBreakdown {
            pz_labor: self.pz_labor + other.pz_labor,
            pz_material: self.pz_material + other.pz_material,
            pz_total: self.pz_total + other.pz_total,
            kz_labor: self.kz_labor + other.kz_labor,
            kz_material: self.kz_material + other.kz_material,
            kz_total: self.kz_total + other.kz_total,
            total_per_gba: self.total_per_gba + other.total_per_gba,
        }
    }

    /// Check if every field is zero
    pub fn is_zero(&self) -> bool {
        *self == CostBreakdown::default()
    }
}

/// One spreadsheet data row after classification
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TenderRow {
    /// Derived from the 1-based sheet row number (`r12`)
    pub id: String,
    /// Trimmed description text, numbering prefix included
    pub name: String,
    /// Work category; `None` until classified or annotated
    pub category: Option<Category>,
    /// Quantity (never negative)
    pub volume: f64,
    /// Unit of measure, free text
    pub unit: String,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub costs: CostBreakdown,
    /// Section header row discriminator
    pub is_section: bool,
    /// Id of the owning section
    pub section_id: Option<String>,
}

/// Section subtotal exactly as the sheet states it on the header row
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionTotals {
    pub volume: f64,
    pub unit: String,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub costs: CostBreakdown,
}

impl SectionTotals {
    /// Copy the totals off a section header row
    pub fn from_header_row(row: &TenderRow) -> Self {
        Self {
            volume: row.volume,
            unit: row.unit.clone(),
            costs: row.costs,
        }
    }
}

/// A contiguous run of rows headed by one section row
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TenderSection {
    pub id: String,
    pub name: String,
    /// `rows[0]` is the header row itself, then sub-items in sheet order
    pub rows: Vec<TenderRow>,
    pub expanded: bool,
    totals: SectionTotals,
}

impl TenderSection {
    /// Open a section from its header row
    ///
    /// The header row becomes `rows[0]` and its numeric fields become the
    /// section totals. Totals are never re-derived from sub-items.
    pub fn open(id: String, mut header: TenderRow) -> Self {
        header.is_section = true;
        header.section_id = Some(id.clone());
        Self {
            id,
            name: header.name.clone(),
            totals: SectionTotals::from_header_row(&header),
            rows: vec![header],
            expanded: false,
        }
    }

    /// Totals as stated by the sheet
    pub fn totals(&self) -> &SectionTotals {
        &self.totals
    }

    /// Append a sub-item, pointing its back-reference at this section
    pub fn push_row(&mut self, mut row: TenderRow) {
        row.is_section = false;
        row.section_id = Some(self.id.clone());
        self.rows.push(row);
    }

    /// The section's own header row
    pub fn header(&self) -> Option<&TenderRow> {
        self.rows.first()
    }

    /// Rows after the header
    pub fn sub_items(&self) -> &[TenderRow] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Mutable rows after the header
    pub fn sub_items_mut(&mut self) -> &mut [TenderRow] {
        self.rows.get_mut(1..).unwrap_or(&mut [])
    }
}

/// One imported spreadsheet
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TenderFile {
    pub id: String,
    /// Uploaded file name without extension
    pub name: String,
    pub uploaded_at: DateTime<Utc>,
    pub calculation_date: NaiveDate,
    /// Worksheet the rows came from
    pub sheet_name: String,
    /// Date found in the sheet's header area, if any
    pub sheet_date: Option<String>,
    pub sections: Vec<TenderSection>,
    pub expanded: bool,
}

impl TenderFile {
    /// Find a row (header or sub-item) by id
    pub fn row(&self, id: &str) -> Option<&TenderRow> {
        self.sections
            .iter()
            .flat_map(|s| s.rows.iter())
            .find(|r| r.id == id)
    }

    /// Find a row (header or sub-item) by id, mutably
    pub fn row_mut(&mut self, id: &str) -> Option<&mut TenderRow> {
        self.sections
            .iter_mut()
            .flat_map(|s| s.rows.iter_mut())
            .find(|r| r.id == id)
    }

    /// Annotate a row with a category
    pub fn assign_category(&mut self, row_id: &str, category: Category) -> Result<()> {
        let row = self
            .row_mut(row_id)
            .ok_or_else(|| Error::RowNotFound(row_id.to_string()))?;
        row.category = Some(category);
        Ok(())
    }

    /// Sub-items still waiting for a category
    pub fn uncategorized_rows(&self) -> Vec<&TenderRow> {
        self.sections
            .iter()
            .flat_map(|s| s.sub_items())
            .filter(|r| r.category.is_none())
            .collect()
    }

    /// Number of sub-items across all sections
    pub fn sub_item_count(&self) -> usize {
        self.sections.iter().map(|s| s.sub_items().len()).sum()
    }

    /// Sum of the section totals (the sheet's own subtotals)
    pub fn grand_totals(&self) -> CostBreakdown {
        self.sections
            .iter()
            .fold(CostBreakdown::default(), |acc, s| acc.add(&s.totals().costs))
    }
}

/// A named tender grouping one or more imported files
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TenderProject {
    pub id: String,
    pub name: String,
    pub code: String,
    pub files: Vec<TenderFile>,
    pub expanded: bool,
}

impl TenderProject {
    /// Create an empty project
    pub fn new<N: Into<String>, C: Into<String>>(id: String, name: N, code: C) -> Self {
        Self {
            id,
            name: name.into(),
            code: code.into(),
            files: Vec::new(),
            expanded: true,
        }
    }

    /// Add a file, assigning it the next `fN` id
    pub fn push_file(&mut self, mut file: TenderFile) -> &TenderFile {
        file.id = format!("f{}", self.files.len() + 1);
        self.files.push(file);
        &self.files[self.files.len() - 1]
    }

    /// Find a file by id
    pub fn find_file(&self, id: &str) -> Option<&TenderFile> {
        self.files.iter().find(|f| f.id == id)
    }

    /// Find a file by id, mutably
    pub fn find_file_mut(&mut self, id: &str) -> Option<&mut TenderFile> {
        self.files.iter_mut().find(|f| f.id == id)
    }

    /// Rows (headers included) across every file
    pub fn total_rows(&self) -> usize {
        self.files
            .iter()
            .flat_map(|f| f.sections.iter())
            .map(|s| s.rows.len())
            .sum()
    }
}
