//! Decoded sheet grids

use crate::cell::CellValue;

static EMPTY: CellValue = CellValue::Empty;

/// A decoded worksheet: ordered rows of ordered cells
///
/// Rows may be ragged; reads outside the stored cells yield
/// [`CellValue::Empty`]. No row is ever promoted to field names.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawSheet {
    name: String,
    rows: Vec<Vec<CellValue>>,
}

impl RawSheet {
    /// Create a sheet from already decoded rows
    pub fn new<S: Into<String>>(name: S, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Sheet name as stored in the workbook
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All rows, top to bottom
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Number of rows (including blank ones between data)
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Get a cell value, `Empty` when outside the grid
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    /// Set a cell value, growing the grid as needed
    pub fn set_cell(&mut self, row: usize, col: usize, value: CellValue) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize(col + 1, CellValue::Empty);
        }
        cells[col] = value;
    }

    /// Number of new grid slots (rows plus cells) that `set_cell(row, col, _)`
    /// would allocate
    pub fn growth(&self, row: usize, col: usize) -> usize {
        let new_rows = (row + 1).saturating_sub(self.rows.len());
        let width = self.rows.get(row).map_or(0, Vec::len);
        new_rows + (col + 1).saturating_sub(width)
    }

    /// Drop trailing empty cells and trailing empty rows
    pub fn trim(&mut self) {
        for row in &mut self.rows {
            while row.last().map_or(false, CellValue::is_empty) {
                row.pop();
            }
        }
        while self.rows.last().map_or(false, Vec::is_empty) {
            self.rows.pop();
        }
    }
}

/// A decoded workbook: its worksheets in tab order
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawWorkbook {
    sheets: Vec<RawSheet>,
}

impl RawWorkbook {
    /// Create an empty workbook
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sheet
    pub fn push(&mut self, sheet: RawSheet) {
        self.sheets.push(sheet);
    }

    /// All sheets in tab order
    pub fn sheets(&self) -> &[RawSheet] {
        &self.sheets
    }

    /// Number of sheets
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Check if the workbook has no sheets
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Get a sheet by index
    pub fn sheet(&self, index: usize) -> Option<&RawSheet> {
        self.sheets.get(index)
    }

    /// Get a sheet by name (case-insensitive)
    pub fn sheet_by_name(&self, name: &str) -> Option<&RawSheet> {
        let wanted = name.to_lowercase();
        self.sheets
            .iter()
            .find(|s| s.name().to_lowercase() == wanted)
    }

    /// Consume the workbook, yielding its sheets
    pub fn into_sheets(self) -> Vec<RawSheet> {
        self.sheets
    }
}

impl From<RawSheet> for RawWorkbook {
    fn from(sheet: RawSheet) -> Self {
        Self {
            sheets: vec![sheet],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_growth_counts_new_rows_and_cells() {
        let mut sheet = RawSheet::new("S", Vec::new());
        assert_eq!(sheet.growth(0, 0), 2);
        assert_eq!(sheet.growth(2, 1), 5);

        sheet.set_cell(2, 1, CellValue::from(1.0));
        assert_eq!(sheet.growth(2, 1), 0);
        assert_eq!(sheet.growth(2, 4), 3);
        assert_eq!(sheet.growth(0, 0), 1);
    }

    #[test]
    fn test_set_cell_grows_grid() {
        let mut sheet = RawSheet::new("S", Vec::new());
        sheet.set_cell(2, 3, CellValue::from(5.0));

        assert_eq!(sheet.row_count(), 3);
        assert_eq!(sheet.column_count(), 4);
        assert_eq!(sheet.cell(2, 3), &CellValue::Number(5.0));
        assert!(sheet.cell(0, 0).is_empty());
    }

    #[test]
    fn test_trim_removes_trailing_blanks() {
        let mut sheet = RawSheet::new(
            "S",
            vec![
                vec![CellValue::from("a"), CellValue::Empty],
                vec![CellValue::Empty, CellValue::from(" ")],
            ],
        );
        sheet.trim();

        assert_eq!(sheet.rows(), &[vec![CellValue::from("a")]]);
    }

    #[test]
    fn test_sheet_by_name_is_case_insensitive() {
        let mut wb = RawWorkbook::new();
        wb.push(RawSheet::new("Смета", Vec::new()));
        wb.push(RawSheet::new("Summary", Vec::new()));

        assert_eq!(wb.sheet_by_name("СМЕТА").map(RawSheet::name), Some("Смета"));
        assert_eq!(wb.sheet_by_name("summary").map(RawSheet::name), Some("Summary"));
        assert!(wb.sheet_by_name("missing").is_none());
    }
}
