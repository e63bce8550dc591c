//! File-level import entry points

use std::path::Path;

use tender_sheets_core::{TenderProject, WorkItem};
use tender_sheets_import::{import_sheet, ImportOptions, ImportOutcome, ImportReport, ImportRequest};

use crate::error::{Error, Result};
use crate::format::SpreadsheetFormat;
use crate::read::{read_workbook, read_workbook_bytes, select_sheet};

/// One file of a multi-file project
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ImportedFile {
    /// Id the file received inside the project
    pub file_id: String,
    pub work_items: Vec<WorkItem>,
    pub report: ImportReport,
}

/// A tender assembled from several files
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ProjectImport {
    pub project: TenderProject,
    /// Per-file results, in the order the files were given
    pub files: Vec<ImportedFile>,
}

/// Imports tender spreadsheets from disk or memory
///
/// # Example
///
/// ```rust,no_run
/// use chrono::{NaiveDate, Utc};
/// use tender_sheets::prelude::*;
///
/// let importer = TenderImporter::default();
/// let request = ImportRequest::new(
///     "ЖК Северный парк",
///     NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
///     "",
///     Utc::now(),
/// );
/// let outcome = importer.import_file("smeta.xlsx", &request)?;
/// println!("{} sections", outcome.file.sections.len());
/// # Ok::<(), tender_sheets::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TenderImporter {
    options: ImportOptions,
}

impl TenderImporter {
    /// Create an importer with the given options
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    /// Options in effect
    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    /// Import one file
    ///
    /// The request's file name is replaced with the path's file name.
    pub fn import_file<P: AsRef<Path>>(&self, path: P, request: &ImportRequest) -> Result<ImportOutcome> {
        let path = path.as_ref();
        let workbook = read_workbook(path, self.options.max_file_size)?;
        let sheet = select_sheet(&workbook, &self.options.sheet)?;

        let mut request = request.clone();
        if let Some(name) = path.file_name() {
            request.file_name = name.to_string_lossy().into_owned();
        }
        Ok(import_sheet(sheet, &request, &self.options)?)
    }

    /// Import an in-memory upload
    ///
    /// The format is taken from the request's file name.
    pub fn import_bytes(&self, bytes: &[u8], request: &ImportRequest) -> Result<ImportOutcome> {
        let format = SpreadsheetFormat::from_path(&request.file_name)?;
        self.import_bytes_as(bytes, format, request)
    }

    /// Import an in-memory upload of a known format
    pub fn import_bytes_as(
        &self,
        bytes: &[u8],
        format: SpreadsheetFormat,
        request: &ImportRequest,
    ) -> Result<ImportOutcome> {
        let workbook = read_workbook_bytes(bytes, format, &request.file_stem(), self.options.max_file_size)?;
        let sheet = select_sheet(&workbook, &self.options.sheet)?;
        Ok(import_sheet(sheet, request, &self.options)?)
    }

    /// Import several files into one project
    ///
    /// Files keep the order of `paths` and get ids `f1`, `f2`, and so on.
    /// The first failing file aborts the whole import.
    pub fn import_project<I, P>(&self, paths: I, request: &ImportRequest) -> Result<ProjectImport>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut project: Option<TenderProject> = None;
        let mut files = Vec::new();

        for path in paths {
            let outcome = self.import_file(path.as_ref(), request)?;
            let project = project.get_or_insert_with(|| {
                TenderProject::new(request.project_id(), request.project_name.trim(), request.project_code())
            });
            let file_id = project.push_file(outcome.file).id.clone();
            log::debug!("added {} to project '{}' as {file_id}", path.as_ref().display(), project.name);
            files.push(ImportedFile {
                file_id,
                work_items: outcome.work_items,
                report: outcome.report,
            });
        }

        let project = project.ok_or(Error::NoFiles)?;
        Ok(ProjectImport { project, files })
    }
}
