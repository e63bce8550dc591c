//! Shared fixtures for the end-to-end tests

#![allow(dead_code)]

use std::io::{Cursor, Write};

use chrono::{DateTime, NaiveDate, Utc};
use tender_sheets::{CellValue, ImportRequest};

pub fn request(file_name: &str) -> ImportRequest {
    ImportRequest::new(
        "ЖК Северный парк",
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        file_name,
        DateTime::<Utc>::default(),
    )
}

pub fn t(s: &str) -> CellValue {
    CellValue::text(s)
}

pub fn n(x: f64) -> CellValue {
    CellValue::Number(x)
}

/// A data row: name, volume, unit, then direct and commercial
/// labor/material/total and the gross-area total
pub fn priced(name: &str, volume: f64, unit: &str, pz: [f64; 3], kz: [f64; 3], gba: f64) -> Vec<CellValue> {
    let mut row = vec![t(name), n(volume), t(unit)];
    row.extend(pz.into_iter().chain(kz).chain([gba]).map(n));
    row
}

/// Tender layout with a date line and a header split over two rows
pub fn tender_rows() -> Vec<Vec<CellValue>> {
    vec![
        vec![t("Дата расчета:"), n(45717.0)],
        vec![
            t("Затрата тендера"),
            t("Объем"),
            t("Ед. изм."),
            t("Прямые затраты"),
            CellValue::Empty,
            CellValue::Empty,
            t("Коммерческие затраты"),
            CellValue::Empty,
            CellValue::Empty,
            t("Итого за единицу общей площади"),
        ],
        vec![
            CellValue::Empty,
            CellValue::Empty,
            CellValue::Empty,
            t("Итого труд за ед."),
            t("Итого материал за ед."),
            t("Итого за ед."),
            t("Итого труд за ед."),
            t("Итого материал за ед."),
            t("Итого за ед."),
            CellValue::Empty,
        ],
        priced(
            "01. Земляные работы",
            0.0,
            "",
            [0.0, 0.0, 2_000_000.0],
            [0.0, 0.0, 2_200_000.0],
            150.0,
        ),
        priced(
            "01.01. Разработка грунта",
            1500.0,
            "м³",
            [300.0, 200.0, 500.0],
            [330.0, 220.0, 550.0],
            40.0,
        ),
        priced(
            "01.02. Обратная засыпка",
            800.0,
            "м³",
            [100.0, 50.0, 150.0],
            [110.0, 55.0, 165.0],
            10.0,
        ),
        vec![],
        priced("02. Кровля", 0.0, "", [0.0, 0.0, 90_000.0], [0.0, 0.0, 99_000.0], 7.0),
        priced(
            "02.01. Устройство мембранной кровли",
            120.0,
            "м2",
            [250.0, 500.0, 750.0],
            [275.0, 550.0, 825.0],
            7.0,
        ),
    ]
}

fn column_letter(mut col: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (col % 26) as u8) as char);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    letters.iter().rev().collect()
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn sheet_xml(rows: &[Vec<CellValue>]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );
    for (r, row) in rows.iter().enumerate() {
        xml.push_str(&format!(r#"<row r="{}">"#, r + 1));
        for (c, cell) in row.iter().enumerate() {
            let reference = format!("{}{}", column_letter(c), r + 1);
            match cell {
                CellValue::Empty => {}
                CellValue::Number(x) => {
                    xml.push_str(&format!(r#"<c r="{reference}"><v>{x}</v></c>"#));
                }
                CellValue::Text(s) => xml.push_str(&format!(
                    r#"<c r="{reference}" t="inlineStr"><is><t>{}</t></is></c>"#,
                    escape(s)
                )),
            }
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}

/// Build an XLSX package in memory, one worksheet per `(name, rows)`
pub fn build_xlsx(sheets: &[(&str, Vec<Vec<CellValue>>)]) -> Vec<u8> {
    let mut workbook = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>"#,
    );
    let mut rels = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for (i, (name, _)) in sheets.iter().enumerate() {
        let id = i + 1;
        workbook.push_str(&format!(
            r#"<sheet name="{}" sheetId="{id}" r:id="rId{id}"/>"#,
            escape(name)
        ));
        rels.push_str(&format!(
            r#"<Relationship Id="rId{id}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{id}.xml"/>"#
        ));
    }
    workbook.push_str("</sheets></workbook>");
    rels.push_str("</Relationships>");

    let mut buf = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
        let options = zip::write::SimpleFileOptions::default();

        zip.start_file("[Content_Types].xml", options).unwrap();
        zip.write_all(br#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/></Types>"#).unwrap();

        zip.start_file("xl/workbook.xml", options).unwrap();
        zip.write_all(workbook.as_bytes()).unwrap();

        zip.start_file("xl/_rels/workbook.xml.rels", options).unwrap();
        zip.write_all(rels.as_bytes()).unwrap();

        for (i, (_, rows)) in sheets.iter().enumerate() {
            zip.start_file(format!("xl/worksheets/sheet{}.xml", i + 1), options)
                .unwrap();
            zip.write_all(sheet_xml(rows).as_bytes()).unwrap();
        }

        zip.finish().unwrap();
    }
    buf
}

/// Write an XLSX package to `dir/name`
pub fn write_xlsx(
    dir: &std::path::Path,
    name: &str,
    sheets: &[(&str, Vec<Vec<CellValue>>)],
) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, build_xlsx(sheets)).unwrap();
    path
}
