//! Cell value normalization
//!
//! Every function here is total: garbage in, a safe default out.

use chrono::{Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use tender_sheets_core::CellValue;

/// Longest leading decimal number, optional exponent
static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid regex")
});

/// Largest serial accepted as a date (9999-12-31)
const MAX_DATE_SERIAL: f64 = 2_958_465.0;

/// Coerce a cell to a finite number
///
/// Text is trimmed, thousands separators (any whitespace, including
/// non-breaking spaces) are removed and a decimal comma becomes a point.
/// The longest numeric prefix is used, so `"1500м³"` gives `1500`. Empty
/// cells, dashes and unparsable text give `0`.
pub fn normalize_number(value: &CellValue) -> f64 {
    match value {
        CellValue::Empty => 0.0,
        CellValue::Number(n) if n.is_finite() => *n,
        CellValue::Number(_) => 0.0,
        CellValue::Text(s) => parse_number_text(s),
    }
}

fn parse_number_text(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() || matches!(trimmed, "-" | "–" | "—") {
        return 0.0;
    }

    let compact: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    LEADING_NUMBER
        .find(&compact)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Display text of a cell, trimmed
pub fn normalize_text(value: &CellValue) -> String {
    value.to_string().trim().to_string()
}

/// Read a cell as a calendar date
///
/// Numbers are spreadsheet serials in the 1900 date system and come back
/// as `YYYY-MM-DD`, with the time of day dropped. Text passes through
/// trimmed; empty cells and out-of-range serials give `None`.
pub fn normalize_date(value: &CellValue) -> Option<String> {
    match value {
        CellValue::Empty => None,
        CellValue::Number(n) => serial_to_date(*n).map(|d| d.format("%Y-%m-%d").to_string()),
        CellValue::Text(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
    }
}

/// Convert a 1900-system serial to a date
///
/// The epoch is 1899-12-30, which absorbs the phantom 1900-02-29 for every
/// serial from March 1900 on.
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || !(0.0..=MAX_DATE_SERIAL).contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.floor() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_number_text_forms() {
        let cases = [
            ("1500", 1500.0),
            ("  1 500,50 ", 1500.5),
            ("1\u{a0}200\u{a0}000", 1_200_000.0),
            ("2\u{202f}000,5", 2000.5),
            ("1500м³", 1500.0),
            ("-12,5", -12.5),
            (".5", 0.5),
            ("1e3", 1000.0),
            ("-", 0.0),
            ("–", 0.0),
            ("—", 0.0),
            ("", 0.0),
            ("   ", 0.0),
            ("abc", 0.0),
            ("м3 1500", 0.0),
        ];
        for (input, expected) in cases {
            assert_eq!(normalize_number(&CellValue::text(input)), expected, "{input:?}");
        }
    }

    #[test]
    fn test_normalize_number_non_text() {
        assert_eq!(normalize_number(&CellValue::Empty), 0.0);
        assert_eq!(normalize_number(&CellValue::Number(42.25)), 42.25);
        assert_eq!(normalize_number(&CellValue::Number(f64::NAN)), 0.0);
        assert_eq!(normalize_number(&CellValue::Number(f64::INFINITY)), 0.0);
        assert_eq!(normalize_number(&CellValue::text("1e999")), 0.0);
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text(&CellValue::text("  01. Кровля ")), "01. Кровля");
        assert_eq!(normalize_text(&CellValue::Number(1500.0)), "1500");
        assert_eq!(normalize_text(&CellValue::Number(2.5)), "2.5");
        assert_eq!(normalize_text(&CellValue::Empty), "");
    }

    #[test]
    fn test_normalize_date() {
        assert_eq!(
            normalize_date(&CellValue::Number(45717.0)).as_deref(),
            Some("2025-03-01")
        );
        // Time of day is dropped
        assert_eq!(
            normalize_date(&CellValue::Number(45717.75)).as_deref(),
            Some("2025-03-01")
        );
        assert_eq!(
            normalize_date(&CellValue::text(" 01.03.2025 ")).as_deref(),
            Some("01.03.2025")
        );
        assert_eq!(normalize_date(&CellValue::Empty), None);
        assert_eq!(normalize_date(&CellValue::Number(-1.0)), None);
    }

    proptest! {
        #[test]
        fn test_number_normalization_is_total(s in ".*") {
            let n = normalize_number(&CellValue::text(s));
            prop_assert!(n.is_finite());
        }

        #[test]
        fn test_number_normalization_is_idempotent(x in any::<f64>()) {
            let once = normalize_number(&CellValue::Number(x));
            let twice = normalize_number(&CellValue::Number(once));
            prop_assert!(once.is_finite());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn test_formatted_numbers_round_trip(x in -1.0e9f64..1.0e9) {
            let text = format!("{x}").replace('.', ",");
            let n = normalize_number(&CellValue::text(text));
            prop_assert_eq!(n, x);
        }
    }
}
