//! A1-style cell references

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};

/// Zero-based position of a cell reference such as `C12` or `$B$2`
///
/// `$` anchors carry no meaning for a grid reader and are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellAddress {
    pub row: u32,
    pub col: u16,
}

impl CellAddress {
    /// Parse an A1-style reference
    ///
    /// # Examples
    /// ```
    /// use tender_sheets_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("C12").unwrap();
    /// assert_eq!((addr.row, addr.col), (11, 2));
    ///
    /// let addr = CellAddress::parse("$B$2").unwrap();
    /// assert_eq!((addr.row, addr.col), (1, 1));
    /// ```
    pub fn parse(reference: &str) -> Result<Self> {
        let bare: String = reference.trim().chars().filter(|c| *c != '$').collect();
        let digits_at = bare
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(bare.len());
        let (letters, digits) = bare.split_at(digits_at);

        if letters.is_empty() || digits.is_empty() {
            return Err(Error::InvalidAddress(reference.to_string()));
        }

        let col = Self::letters_to_column(letters)?;
        let line: u32 = digits
            .parse()
            .map_err(|_| Error::InvalidAddress(reference.to_string()))?;
        match line {
            0 => Err(Error::InvalidAddress(reference.to_string())),
            n if n > MAX_ROWS => Err(Error::RowOutOfBounds(n - 1, MAX_ROWS - 1)),
            n => Ok(Self { row: n - 1, col }),
        }
    }

    /// Column letters to a 0-based index (`A` = 0, `XFD` = 16383)
    pub fn letters_to_column(letters: &str) -> Result<u16> {
        let mut number: u32 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(Error::InvalidAddress(letters.to_string()));
            }
            number = number * 26 + u32::from(c.to_ascii_uppercase() as u8 - b'A') + 1;
            if number > u32::from(MAX_COLS) {
                return Err(Error::ColumnOutOfBounds(MAX_COLS, MAX_COLS - 1));
            }
        }
        Ok((number - 1) as u16)
    }
}
