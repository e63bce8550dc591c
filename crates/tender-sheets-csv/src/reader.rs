//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::CsvReadOptions;
use tender_sheets_core::{CellValue, RawSheet};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Sniffed delimiters, in tie-break order
const CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Non-blank lines inspected when sniffing
const SNIFF_LINES: usize = 10;

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read a CSV file into a sheet named after the file stem
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<RawSheet> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Sheet1".to_string());

        let mut bytes = Vec::new();
        File::open(path)?.read_to_end(&mut bytes)?;
        Self::read_bytes(&bytes, name, options)
    }

    /// Read CSV from a reader into a sheet named `Sheet1`
    pub fn read<R: Read>(mut reader: R, options: &CsvReadOptions) -> CsvResult<RawSheet> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::read_bytes(&bytes, "Sheet1", options)
    }

    /// Read CSV from an in-memory buffer
    ///
    /// No row is treated as a header; rows may have different lengths.
    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn read_bytes<S: Into<String>>(
        bytes: &[u8],
        name: S,
        options: &CsvReadOptions,
    ) -> CsvResult<RawSheet> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let delimiter = options
            .delimiter
            .unwrap_or_else(|| Self::sniff_delimiter(bytes, options.quote));

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes);

        let mut rows = Vec::new();
        for result in csv_reader.byte_records() {
            let record = result?;
            let row: Vec<CellValue> = record
                .iter()
                .map(|field| {
                    let text = String::from_utf8_lossy(field);
                    if text.trim().is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::text(text.into_owned())
                    }
                })
                .collect();
            rows.push(row);
        }

        let mut sheet = RawSheet::new(name, rows);
        sheet.trim();
        Ok(sheet)
    }

    /// Pick the delimiter that occurs unquoted on the most of the first
    /// [`SNIFF_LINES`] non-blank lines, then by total count. A full tie
    /// goes to the earlier entry of [`CANDIDATES`]; no hits at all means `,`.
    fn sniff_delimiter(bytes: &[u8], quote: u8) -> u8 {
        let mut lines_with = [0usize; CANDIDATES.len()];
        let mut totals = [0usize; CANDIDATES.len()];

        let lines = bytes
            .split(|&b| b == b'\n')
            .filter(|l| l.iter().any(|b| !b.is_ascii_whitespace()))
            .take(SNIFF_LINES);
        for line in lines {
            let mut in_quotes = false;
            let mut counts = [0usize; CANDIDATES.len()];
            for &b in line {
                if b == quote {
                    in_quotes = !in_quotes;
                } else if !in_quotes {
                    if let Some(i) = CANDIDATES.iter().position(|&c| c == b) {
                        counts[i] += 1;
                    }
                }
            }
            for (i, &count) in counts.iter().enumerate() {
                if count > 0 {
                    lines_with[i] += 1;
                    totals[i] += count;
                }
            }
        }

        let mut best = 0;
        for i in 1..CANDIDATES.len() {
            if (lines_with[i], totals[i]) > (lines_with[best], totals[best]) {
                best = i;
            }
        }

        let delimiter = CANDIDATES[best];
        log::debug!(
            "sniffed CSV delimiter {:?} (on {} lines, {} times)",
            delimiter as char,
            lines_with[best],
            totals[best]
        );
        delimiter
    }
}
