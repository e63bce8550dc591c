//! Flat work-item view
//!
//! The same sub-items as the section tree, one record each, for tables that
//! do not render hierarchy.

use crate::category::Category;

/// One priced line item, detached from its section
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct WorkItem {
    /// Same id as the source [`TenderRow`](crate::TenderRow)
    pub id: String,
    /// Numbering prefix (`01.01.`), empty when the row has none
    pub code: String,
    /// Description without the numbering prefix
    pub name: String,
    /// Name of the owning section
    pub section: String,
    /// Classifier output, kept even when the tree's categories are cleared
    pub suggested_category: Category,
    pub unit: String,
    pub quantity: f64,
    pub direct_total: f64,
    pub commercial_total: f64,
    #[cfg_attr(feature = "serde", serde(rename = "totalPerGBA"))]
    pub total_per_gba: f64,
}
