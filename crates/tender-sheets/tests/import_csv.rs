//! End-to-end tests importing CSV exports

mod common;

use common::request;
use pretty_assertions::assert_eq;
use tender_sheets::prelude::*;

/// Russian-locale export: `;` separators, decimal commas, spaced thousands
const SEMICOLON_EXPORT: &str = "\u{feff}Затрата тендера;Объем;Ед. изм.;Прямые затраты итого за ед.;Коммерческие затраты итого за ед.\n\
Затрата тендера;;;;\n\
01. Отделочные работы;;;\"1 250 000,00\";\"1 400 000,00\"\n\
01.01. Штукатурка стен;\"2 400,5\";м2;520,75;610\n\
01.02. Окраска стен;2400;м2;-;\n";

/// Test importing a semicolon-separated file from disk
#[test]
fn test_import_semicolon_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Отделка.csv");
    std::fs::write(&path, SEMICOLON_EXPORT).unwrap();

    let outcome = TenderImporter::default()
        .import_file(&path, &request("ignored.csv"))
        .unwrap();
    let file = &outcome.file;

    assert_eq!(file.name, "Отделка");
    assert_eq!(file.sheet_name, "Отделка");
    assert_eq!(outcome.report.data_start_row, 2);
    // The repeated caption line belongs to the header
    assert_eq!(outcome.report.skipped_rows, 0);

    let section = &file.sections[0];
    assert_eq!(section.totals().costs.pz_total, 1_250_000.0);
    assert_eq!(section.totals().costs.kz_total, 1_400_000.0);

    let items = section.sub_items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].volume, 2400.5);
    assert_eq!(items[0].unit, "м2");
    assert_eq!(items[0].costs.pz_total, 520.75);
    assert_eq!(items[0].costs.kz_total, 610.0);
    // A dash and an empty cell both read as zero
    assert_eq!(items[1].costs.pz_total, 0.0);
    assert_eq!(items[1].costs.kz_total, 0.0);
}

/// Test a semicolon export whose title line contains a comma
#[test]
fn test_titled_semicolon_export() {
    let csv = "Смета, ЖК Северный парк\n\
               Затрата тендера;Объем;Ед. изм.\n\
               01. Кровля;;\n\
               01.01. Мембрана кровли;120;м2\n";
    let outcome = TenderImporter::default()
        .import_bytes(csv.as_bytes(), &request("roof.csv"))
        .unwrap();
    let map = &outcome.report.column_map;

    assert_eq!(map.get(ColumnRole::Volume), Some(1));
    assert_eq!(map.get(ColumnRole::Unit), Some(2));
    let item = &outcome.file.sections[0].sub_items()[0];
    assert_eq!(item.name, "01.01. Мембрана кровли");
    assert_eq!(item.volume, 120.0);
    assert_eq!(item.unit, "м2");
}

/// Test that rows before the first section are dropped or kept by policy
#[test]
fn test_orphan_rows_policy() {
    let csv = "Затрата тендера,Объем,Ед. изм.\n\
               01.01. Леса,100,м2\n\
               02. Фасад,,\n\
               02.01. Облицовка керамогранитом,300,м2\n";

    let dropped = TenderImporter::default()
        .import_bytes(csv.as_bytes(), &request("facade.csv"))
        .unwrap();
    assert_eq!(dropped.report.orphan_rows, 1);
    assert_eq!(dropped.file.sections.len(), 1);
    assert_eq!(dropped.work_items.len(), 1);

    let kept = TenderImporter::new(ImportOptions {
        orphan_rows: OrphanRowPolicy::ImplicitSection,
        ..Default::default()
    })
    .import_bytes(csv.as_bytes(), &request("facade.csv"))
    .unwrap();
    assert_eq!(kept.report.orphan_rows, 0);
    assert_eq!(kept.file.sections.len(), 2);
    assert_eq!(kept.file.sections[0].name, "00. Без раздела");
    assert_eq!(kept.work_items[0].name, "Леса");
}

/// Test a sheet whose rows never form a sub-item
#[test]
fn test_no_rows_extracted() {
    let csv = "qwe;rty\n01. Кровля;1\nПрямые затраты;\n";
    let err = TenderImporter::default()
        .import_bytes(csv.as_bytes(), &request("roof.csv"))
        .unwrap_err();

    match err {
        Error::Import(ImportError::NoRowsExtracted { unresolved }) => {
            assert_eq!(unresolved, vec![ColumnRole::Name, ColumnRole::PzTotal]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

/// Test that a missing project name is rejected
#[test]
fn test_missing_project_name() {
    let mut req = request("facade.csv");
    req.project_name = String::new();
    let err = TenderImporter::default()
        .import_bytes(SEMICOLON_EXPORT.as_bytes(), &req)
        .unwrap_err();
    assert!(matches!(err, Error::Import(ImportError::MissingProjectName)));
}
