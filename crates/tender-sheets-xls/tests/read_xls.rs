//! Integration tests reading .xls files built on the fly.

use std::io::Write;

use pretty_assertions::assert_eq;
use tender_sheets_core::CellValue;
use tender_sheets_xls::{XlsError, XlsReader};

const BOF: u16 = 0x0809;
const EOF: u16 = 0x000A;
const BOUNDSHEET: u16 = 0x0085;
const SST: u16 = 0x00FC;
const LABELSST: u16 = 0x00FD;
const NUMBER: u16 = 0x0203;
const RK: u16 = 0x027E;

fn record(record_type: u16, body: &[u8]) -> Vec<u8> {
    let mut out = record_type.to_le_bytes().to_vec();
    out.extend_from_slice(&(body.len() as u16).to_le_bytes());
    out.extend_from_slice(body);
    out
}

fn bof(dt: u16) -> Vec<u8> {
    let mut body = 0x0600u16.to_le_bytes().to_vec();
    body.extend_from_slice(&dt.to_le_bytes());
    body.extend_from_slice(&[0; 12]);
    record(BOF, &body)
}

fn wide_string(s: &str) -> Vec<u8> {
    let units: Vec<u16> = s.encode_utf16().collect();
    let mut out = (units.len() as u16).to_le_bytes().to_vec();
    out.push(0x01);
    out.extend(units.iter().flat_map(|u| u.to_le_bytes()));
    out
}

fn cell(row: u16, col: u16) -> Vec<u8> {
    let mut body = row.to_le_bytes().to_vec();
    body.extend_from_slice(&col.to_le_bytes());
    body.extend_from_slice(&0u16.to_le_bytes());
    body
}

/// One-sheet BIFF8 stream: a header row and one numbered section row
fn workbook_stream(sheet_name: &str) -> Vec<u8> {
    let strings = ["Затрата тендера", "Объем", "01. Земляные работы"];
    let mut sst = (strings.len() as u32).to_le_bytes().to_vec();
    sst.extend_from_slice(&(strings.len() as u32).to_le_bytes());
    for s in strings {
        sst.extend(wide_string(s));
    }

    let boundsheet = |offset: u32| {
        let units: Vec<u16> = sheet_name.encode_utf16().collect();
        let mut body = offset.to_le_bytes().to_vec();
        body.extend_from_slice(&[0, 0, units.len() as u8, 0x01]);
        body.extend(units.iter().flat_map(|u| u.to_le_bytes()));
        record(BOUNDSHEET, &body)
    };

    let globals = |offset: u32| {
        let mut out = bof(0x0005);
        out.extend(record(SST, &sst));
        out.extend(boundsheet(offset));
        out.extend(record(EOF, &[]));
        out
    };

    let sheet_offset = globals(0).len() as u32;
    let mut stream = globals(sheet_offset);

    stream.extend(bof(0x0010));
    for (col, idx) in [(0u16, 0u32), (1, 1)] {
        let mut body = cell(0, col);
        body.extend_from_slice(&idx.to_le_bytes());
        stream.extend(record(LABELSST, &body));
    }
    let mut body = cell(1, 0);
    body.extend_from_slice(&2u32.to_le_bytes());
    stream.extend(record(LABELSST, &body));

    let mut number = cell(1, 1);
    number.extend_from_slice(&1500.25f64.to_le_bytes());
    stream.extend(record(NUMBER, &number));

    let mut rk = cell(1, 3);
    rk.extend_from_slice(&((7u32 << 2) | 0x02).to_le_bytes());
    stream.extend(record(RK, &rk));

    stream.extend(record(EOF, &[]));
    stream
}

fn write_xls(path: &std::path::Path, stream_name: &str, stream: &[u8]) {
    let file = std::fs::File::create(path).unwrap();
    let mut comp = cfb::CompoundFile::create(file).unwrap();
    {
        let mut s = comp.create_stream(stream_name).unwrap();
        s.write_all(stream).unwrap();
    }
    comp.flush().unwrap();
}

/// Test reading a generated workbook from disk
#[test]
fn test_read_generated_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tender.xls");
    write_xls(&path, "/Workbook", &workbook_stream("Смета"));

    let wb = XlsReader::read_file(&path).unwrap();
    assert_eq!(wb.sheet_count(), 1);

    let sheet = wb.sheet(0).unwrap();
    assert_eq!(sheet.name(), "Смета");
    assert_eq!(sheet.cell(0, 0), &CellValue::text("Затрата тендера"));
    assert_eq!(sheet.cell(0, 1), &CellValue::text("Объем"));
    assert_eq!(sheet.cell(1, 0), &CellValue::text("01. Земляные работы"));
    assert_eq!(sheet.cell(1, 1), &CellValue::Number(1500.25));
    assert!(sheet.cell(1, 2).is_empty());
    assert_eq!(sheet.cell(1, 3), &CellValue::Number(7.0));
}

/// Test that a container without a workbook stream is rejected
#[test]
fn test_missing_workbook_stream() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("other.xls");
    write_xls(&path, "/Something", b"not biff");

    let err = XlsReader::read_file(&path).unwrap_err();
    assert!(matches!(err, XlsError::InvalidFormat(_)));
}

/// Test that a plain text file is not mistaken for a workbook
#[test]
fn test_not_a_compound_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fake.xls");
    std::fs::write(&path, "01. Земляные работы;1500").unwrap();

    let err = XlsReader::read_file(&path).unwrap_err();
    assert!(matches!(err, XlsError::Io(_)));
}
