//! The import pipeline: one sheet in, one [`TenderFile`] out

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use tender_sheets_core::{ColumnMap, ColumnRole, RawSheet, Resolution, TenderFile, TenderProject, WorkItem};

use crate::assemble::assemble;
use crate::columns::build_column_map;
use crate::error::{ImportError, ImportResult};
use crate::flat::flatten;
use crate::header::{detect_sheet_date, locate_data_start};
use crate::options::ImportOptions;

/// Caller-supplied metadata for one import
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRequest {
    /// Project (tender) name; required
    pub project_name: String,
    /// Project code; derived from the name when absent
    pub project_code: Option<String>,
    /// Date the tender prices refer to; required
    pub calculation_date: NaiveDate,
    /// Uploaded file name, extension included
    pub file_name: String,
    pub uploaded_at: DateTime<Utc>,
}

impl ImportRequest {
    pub fn new<N: Into<String>, F: Into<String>>(
        project_name: N,
        calculation_date: NaiveDate,
        file_name: F,
        uploaded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            project_code: None,
            calculation_date,
            file_name: file_name.into(),
            uploaded_at,
        }
    }

    /// Set an explicit project code
    pub fn with_code<S: Into<String>>(mut self, code: S) -> Self {
        self.project_code = Some(code.into());
        self
    }

    /// Project id: the name lowercased, non-alphanumerics collapsed to `-`
    pub fn project_id(&self) -> String {
        slugify(&self.project_name)
    }

    /// The explicit code, or initials of up to four name words plus the
    /// calculation year (`ЖК Северный парк` → `ЖСП-2025`)
    pub fn project_code(&self) -> String {
        match self.project_code.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => code.to_string(),
            _ => {
                let initials: String = self
                    .project_name
                    .split_whitespace()
                    .take(4)
                    .filter_map(|w| w.chars().next())
                    .flat_map(char::to_uppercase)
                    .collect();
                format!("{}-{}", initials, self.calculation_date.year())
            }
        }
    }

    /// File name without directory or extension
    pub fn file_stem(&self) -> String {
        std::path::Path::new(&self.file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file_name.clone())
    }
}

fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.trim().chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// What the pipeline decided and what it could not resolve
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ImportReport {
    pub column_map: ColumnMap,
    /// 0-based index of the first data row
    pub data_start_row: usize,
    pub header_rows: usize,
    pub skipped_rows: usize,
    /// Sub-items dropped for lack of a section
    pub orphan_rows: usize,
    /// Roles without a column; their fields read as zero or empty
    pub unresolved: Vec<ColumnRole>,
}

/// A successful import
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ImportOutcome {
    pub file: TenderFile,
    /// Flat view of the same sub-items
    pub work_items: Vec<WorkItem>,
    pub report: ImportReport,
}

impl ImportOutcome {
    /// Wrap the imported file into a new single-file project
    pub fn into_project(self, request: &ImportRequest) -> TenderProject {
        let mut project = TenderProject::new(
            request.project_id(),
            request.project_name.trim(),
            request.project_code(),
        );
        project.push_file(self.file);
        project
    }
}

/// Import one sheet
///
/// Fails only on the terminal conditions of [`ImportError`]; unresolved
/// columns and unparsable cells degrade to zeros and are listed in the
/// report.
pub fn import_sheet(
    sheet: &RawSheet,
    request: &ImportRequest,
    options: &ImportOptions,
) -> ImportResult<ImportOutcome> {
    if request.project_name.trim().is_empty() {
        return Err(ImportError::MissingProjectName);
    }
    if sheet.row_count() < 2 {
        return Err(ImportError::SheetTooShort {
            rows: sheet.row_count(),
        });
    }

    let rows = sheet.rows();
    let start = locate_data_start(rows, options.header_scan_rows);
    let header = &rows[..start.header_rows];

    let column_map = build_column_map(header, sheet.column_count());
    let sheet_date = detect_sheet_date(header);
    let assembly = assemble(
        rows,
        start.data_start_row,
        &column_map,
        &options.assemble_options(),
    );

    if assembly.sub_item_count() == 0 {
        let mut unresolved = Vec::new();
        if column_map.resolution(ColumnRole::Name) == Some(Resolution::Default) {
            unresolved.push(ColumnRole::Name);
        }
        if !column_map.is_resolved(ColumnRole::PzTotal) {
            unresolved.push(ColumnRole::PzTotal);
        }
        return Err(ImportError::NoRowsExtracted { unresolved });
    }

    let work_items = flatten(&assembly.sections);

    let mut sections = assembly.sections;
    if options.clear_sub_item_categories {
        for row in sections.iter_mut().flat_map(|s| s.sub_items_mut().iter_mut()) {
            row.category = None;
        }
    }

    log::debug!(
        "imported '{}': {} sections, {} sub-items, {} skipped, {} orphaned",
        sheet.name(),
        sections.len(),
        work_items.len(),
        assembly.skipped_rows,
        assembly.orphan_rows
    );

    let unresolved = column_map.unresolved();
    let file = TenderFile {
        id: String::new(),
        name: request.file_stem(),
        uploaded_at: request.uploaded_at,
        calculation_date: request.calculation_date,
        sheet_name: sheet.name().to_string(),
        sheet_date,
        sections,
        expanded: false,
    };

    Ok(ImportOutcome {
        file,
        work_items,
        report: ImportReport {
            column_map,
            data_start_row: start.data_start_row,
            header_rows: start.header_rows,
            skipped_rows: assembly.skipped_rows,
            orphan_rows: assembly.orphan_rows,
            unresolved,
        },
    })
}
