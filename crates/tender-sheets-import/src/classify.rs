//! Category classifier

use tender_sheets_core::Category;

use crate::fold_case;

/// Classify a work description by keyword
///
/// The first category in [`Category::ALL`] with a keyword contained in the
/// description wins; with no match the result is
/// [`Category::GeneralConstruction`].
pub fn classify(description: &str) -> Category {
    let text = fold_case(description);
    Category::ALL
        .iter()
        .copied()
        .find(|c| c.keywords().iter().any(|k| text.contains(k)))
        .unwrap_or(Category::GeneralConstruction)
}
