//! End-to-end test importing a legacy .xls workbook

#![cfg(feature = "xls")]

mod common;

use std::io::Write;

use common::request;
use pretty_assertions::assert_eq;
use tender_sheets::prelude::*;
use Value::{Num, Str};

fn record(record_type: u16, body: &[u8]) -> Vec<u8> {
    let mut out = record_type.to_le_bytes().to_vec();
    out.extend_from_slice(&(body.len() as u16).to_le_bytes());
    out.extend_from_slice(body);
    out
}

fn bof(substream: u16) -> Vec<u8> {
    let mut body = 0x0600u16.to_le_bytes().to_vec();
    body.extend_from_slice(&substream.to_le_bytes());
    body.extend_from_slice(&[0; 12]);
    record(0x0809, &body)
}

fn cell_header(row: u16, col: u16) -> Vec<u8> {
    let mut body = row.to_le_bytes().to_vec();
    body.extend_from_slice(&col.to_le_bytes());
    body.extend_from_slice(&0u16.to_le_bytes());
    body
}

#[derive(Clone, Copy)]
enum Value {
    /// Index into the shared string table
    Str(u32),
    Num(f64),
}

/// BIFF8 stream for a one-sheet tender named `Смета`
fn tender_stream(strings: &[&str], cells: &[(u16, u16, Value)]) -> Vec<u8> {
    let mut sst = (strings.len() as u32).to_le_bytes().to_vec();
    sst.extend_from_slice(&(strings.len() as u32).to_le_bytes());
    for s in strings {
        let units: Vec<u16> = s.encode_utf16().collect();
        sst.extend_from_slice(&(units.len() as u16).to_le_bytes());
        sst.push(0x01);
        sst.extend(units.iter().flat_map(|u| u.to_le_bytes()));
    }

    let globals = |offset: u32| {
        let name: Vec<u16> = "Смета".encode_utf16().collect();
        let mut sheet = offset.to_le_bytes().to_vec();
        sheet.extend_from_slice(&[0, 0, name.len() as u8, 0x01]);
        sheet.extend(name.iter().flat_map(|u| u.to_le_bytes()));

        let mut out = bof(0x0005);
        out.extend(record(0x00FC, &sst));
        out.extend(record(0x0085, &sheet));
        out.extend(record(0x000A, &[]));
        out
    };

    let offset = globals(0).len() as u32;
    let mut stream = globals(offset);
    stream.extend(bof(0x0010));
    for &(row, col, value) in cells {
        let mut body = cell_header(row, col);
        match value {
            Value::Str(index) => {
                body.extend_from_slice(&index.to_le_bytes());
                stream.extend(record(0x00FD, &body));
            }
            Value::Num(number) => {
                body.extend_from_slice(&number.to_le_bytes());
                stream.extend(record(0x0203, &body));
            }
        }
    }
    stream.extend(record(0x000A, &[]));
    stream
}

/// Test importing a BIFF8 workbook from disk
#[test]
fn test_import_xls() {
    let strings = [
        "Затрата тендера",
        "Объем",
        "Ед. изм.",
        "Прямые затраты итого за ед.",
        "01. Земляные работы",
        "01.01. Разработка грунта",
        "м³",
    ];
    let cells = [
        (0, 0, Str(0)),
        (0, 1, Str(1)),
        (0, 2, Str(2)),
        (0, 3, Str(3)),
        (1, 0, Str(4)),
        (1, 3, Num(2_000_000.0)),
        (2, 0, Str(5)),
        (2, 1, Num(1500.0)),
        (2, 2, Str(6)),
        (2, 3, Num(800.5)),
    ];

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Смета.xls");
    {
        let file = std::fs::File::create(&path).unwrap();
        let mut comp = cfb::CompoundFile::create(file).unwrap();
        let mut stream = comp.create_stream("/Workbook").unwrap();
        stream.write_all(&tender_stream(&strings, &cells)).unwrap();
        drop(stream);
        comp.flush().unwrap();
    }

    let outcome = TenderImporter::default()
        .import_file(&path, &request("ignored.xls"))
        .unwrap();

    assert_eq!(outcome.file.sheet_name, "Смета");
    let section = &outcome.file.sections[0];
    assert_eq!(section.name, "01. Земляные работы");
    assert_eq!(section.totals().costs.pz_total, 2_000_000.0);

    let item = &section.sub_items()[0];
    assert_eq!(item.volume, 1500.0);
    assert_eq!(item.unit, "м³");
    assert_eq!(item.costs.pz_total, 800.5);
    assert_eq!(outcome.work_items[0].suggested_category, Category::Earthworks);
}

/// Test that a file without a workbook stream is a read error
#[test]
fn test_xls_without_workbook_stream() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.xls");
    {
        let file = std::fs::File::create(&path).unwrap();
        let mut comp = cfb::CompoundFile::create(file).unwrap();
        comp.flush().unwrap();
    }

    let err = TenderImporter::default()
        .import_file(&path, &request("empty.xls"))
        .unwrap_err();
    assert!(matches!(err, Error::Read(_)));
}
