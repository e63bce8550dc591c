//! Tender Sheets CLI - tender spreadsheet import tool

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tender_sheets::engine::columns::combine_header_labels;
use tender_sheets::engine::{build_column_map, locate_data_start};
use tender_sheets::prelude::*;
use tender_sheets::{select_sheet, ImportedFile};

#[derive(Parser)]
#[command(name = "tender")]
#[command(
    author,
    version,
    about = "Import construction-tender spreadsheets into a Bill of Quantities"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import one or more tender files into a project
    Import {
        /// Input spreadsheet files (xlsx, xlsm, xls, csv), one per project file
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Project name
        #[arg(short, long)]
        project: String,

        /// Project code (default: initials of the name and the year)
        #[arg(long)]
        code: Option<String>,

        /// Date the prices refer to (YYYY-MM-DD)
        #[arg(short = 'd', long)]
        calculation_date: NaiveDate,

        /// Sheet to import: 0-based index or name (default: first sheet)
        #[arg(short, long)]
        sheet: Option<SheetSelector>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep the classifier's categories on sub-items
        #[arg(long)]
        keep_categories: bool,

        /// Collect rows found before the first section into a section of their own
        #[arg(long)]
        implicit_sections: bool,
    },

    /// Show how the columns of a sheet were recognized
    Columns {
        /// Input spreadsheet file
        input: PathBuf,

        /// Sheet to inspect: 0-based index or name (default: first sheet)
        #[arg(short, long)]
        sheet: Option<SheetSelector>,
    },

    /// List all sheets in a workbook
    Sheets {
        /// Input spreadsheet file
        input: PathBuf,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Import {
            files,
            project,
            code,
            calculation_date,
            sheet,
            format,
            output,
            keep_categories,
            implicit_sections,
        } => {
            let options = ImportOptions {
                sheet: sheet.unwrap_or_default(),
                clear_sub_item_categories: !keep_categories,
                orphan_rows: if implicit_sections {
                    OrphanRowPolicy::ImplicitSection
                } else {
                    OrphanRowPolicy::Drop
                },
                ..Default::default()
            };
            let mut request = ImportRequest::new(project, calculation_date, "", Utc::now());
            request.project_code = code;
            import(&files, &request, options, format, output.as_deref())
        }
        Commands::Columns { input, sheet } => show_columns(&input, &sheet.unwrap_or_default()),
        Commands::Sheets { input } => list_sheets(&input),
    }
}

fn import(
    files: &[PathBuf],
    request: &ImportRequest,
    options: ImportOptions,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let importer = TenderImporter::new(options);
    for path in files {
        eprintln!("Importing '{}'", path.display());
    }
    let imported = importer
        .import_project(files, request)
        .context("Import failed")?;

    for (file, result) in imported.project.files.iter().zip(&imported.files) {
        let report = &result.report;
        if !report.unresolved.is_empty() {
            let roles: Vec<&str> = report.unresolved.iter().map(|r| r.key()).collect();
            eprintln!("{}: no column for {}", file.name, roles.join(", "));
        }
        if report.orphan_rows > 0 {
            eprintln!(
                "{}: {} rows before the first section were dropped",
                file.name, report.orphan_rows
            );
        }
    }

    let rendered = match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&imported).context("Failed to serialize the project")? + "\n"
        }
        OutputFormat::Text => render_text(&imported),
    };

    if let Some(output_path) = output {
        std::fs::write(output_path, &rendered)
            .with_context(|| format!("Failed to write '{}'", output_path.display()))?;
        eprintln!(
            "Wrote {} files ({} rows) to '{}'",
            imported.project.files.len(),
            imported.project.total_rows(),
            output_path.display()
        );
    } else {
        io::stdout()
            .write_all(rendered.as_bytes())
            .context("Failed to write to stdout")?;
    }

    Ok(())
}

/// Human-readable outline of an imported project
fn render_text(imported: &ProjectImport) -> String {
    let project = &imported.project;
    let mut out = String::new();

    let _ = writeln!(out, "Project: {} [{}] ({})", project.name, project.code, project.id);
    for (file, result) in project.files.iter().zip(&imported.files) {
        let _ = writeln!(out);
        let _ = write!(out, "{} {} (sheet \"{}\"", file.id, file.name, file.sheet_name);
        if let Some(date) = &file.sheet_date {
            let _ = write!(out, ", dated {date}");
        }
        let _ = writeln!(out, ", prices as of {})", file.calculation_date);

        for section in &file.sections {
            let totals = section.totals();
            let _ = writeln!(
                out,
                "  {}  PZ {}  KZ {}",
                section.name,
                money(totals.costs.pz_total),
                money(totals.costs.kz_total)
            );
            for row in section.sub_items() {
                let _ = writeln!(
                    out,
                    "    {}  {} {}  PZ {}  KZ {}",
                    row.name,
                    row.volume,
                    row.unit,
                    money(row.costs.pz_total),
                    money(row.costs.kz_total)
                );
            }
        }

        summarize(&mut out, file, result);
    }
    out
}

fn summarize(out: &mut String, file: &TenderFile, result: &ImportedFile) {
    let grand = file.grand_totals();
    let _ = writeln!(
        out,
        "  Total: {} sections, {} items, PZ {}, KZ {}",
        file.sections.len(),
        result.work_items.len(),
        money(grand.pz_total),
        money(grand.kz_total)
    );
    if result.report.skipped_rows > 0 {
        let _ = writeln!(out, "  Skipped rows: {}", result.report.skipped_rows);
    }
}

/// Two decimals with space-separated thousands
fn money(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{frac}")
}

fn show_columns(input: &Path, selector: &SheetSelector) -> Result<()> {
    let workbook =
        RawWorkbook::open(input).with_context(|| format!("Failed to open '{}'", input.display()))?;
    let sheet = select_sheet(&workbook, selector)?;

    let options = ImportOptions::default();
    let rows = sheet.rows();
    let start = locate_data_start(rows, options.header_scan_rows);
    let header = &rows[..start.header_rows];
    let labels = combine_header_labels(header, sheet.column_count());
    let map = build_column_map(header, sheet.column_count());

    println!("Sheet: \"{}\"", sheet.name());
    println!(
        "Header rows: {}, data starts at row {}",
        start.header_rows,
        start.data_start_row + 1
    );

    println!();
    println!("Columns:");
    for (col, label) in labels.iter().enumerate() {
        let roles: Vec<String> = map
            .entries()
            .filter(|(_, slot)| slot.column == col)
            .map(|(role, slot)| format!("{role} ({})", slot.resolution))
            .collect();
        let roles = if roles.is_empty() {
            "-".to_string()
        } else {
            roles.join(", ")
        };
        println!("  {col}\t{roles}\t{label}");
    }

    let unresolved = map.unresolved();
    if !unresolved.is_empty() {
        let keys: Vec<&str> = unresolved.iter().map(|r| r.key()).collect();
        println!();
        println!("Unresolved: {}", keys.join(", "));
    }

    Ok(())
}

fn list_sheets(input: &Path) -> Result<()> {
    let workbook =
        RawWorkbook::open(input).with_context(|| format!("Failed to open '{}'", input.display()))?;

    for (i, sheet) in workbook.sheets().iter().enumerate() {
        println!("{}\t{}\t{} rows", i, sheet.name(), sheet.row_count());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money() {
        assert_eq!(money(0.0), "0.00");
        assert_eq!(money(999.5), "999.50");
        assert_eq!(money(2_000_000.0), "2 000 000.00");
        assert_eq!(money(-1234.567), "-1 234.57");
    }

    #[test]
    fn test_cli_parses_import() {
        let cli = Cli::try_parse_from([
            "tender",
            "import",
            "a.xlsx",
            "b.csv",
            "--project",
            "ЖК Северный парк",
            "--calculation-date",
            "2025-03-01",
            "--sheet",
            "Смета",
            "--format",
            "json",
            "--keep-categories",
        ])
        .unwrap();

        match cli.command {
            Commands::Import {
                files,
                calculation_date,
                sheet,
                format,
                keep_categories,
                implicit_sections,
                ..
            } => {
                assert_eq!(files.len(), 2);
                assert_eq!(calculation_date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
                assert_eq!(sheet, Some(SheetSelector::Name("Смета".into())));
                assert!(format == OutputFormat::Json);
                assert!(keep_categories);
                assert!(!implicit_sections);
            }
            _ => panic!("expected the import command"),
        }
    }

    #[test]
    fn test_cli_rejects_bad_date() {
        let result = Cli::try_parse_from([
            "tender",
            "import",
            "a.xlsx",
            "--project",
            "X",
            "--calculation-date",
            "01.03.2025",
        ]);
        assert!(result.is_err());
    }
}
