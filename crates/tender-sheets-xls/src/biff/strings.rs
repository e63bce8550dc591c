//! BIFF8 Unicode string decoding.
//!
//! A string starts with a character count and a flags byte:
//! - bit 0: 0 = compressed (one byte per char, Latin-1), 1 = UTF-16LE
//! - bit 2: extended (phonetic) data follows, size in a u32 after the flags
//! - bit 3: rich text runs follow, count in a u16 after the flags
//!
//! Inside the SST a string may be split across a CONTINUE boundary. The
//! continuation then starts with a fresh flags byte that can switch between
//! compressed and UTF-16 mid-string.

use super::cursor::ByteCursor;
use crate::error::{XlsError, XlsResult};

/// Read a string with a 1-byte length prefix (BOUNDSHEET names)
pub fn read_short_string(cursor: &mut ByteCursor<'_>) -> XlsResult<String> {
    let char_count = cursor.u8()? as usize;
    let flags = cursor.u8()?;
    read_chars(cursor, char_count, flags & 0x01 != 0)
}

/// Read a string with a 2-byte length prefix (LABEL, STRING)
pub fn read_unicode_string(cursor: &mut ByteCursor<'_>) -> XlsResult<String> {
    read_split_string(cursor, &[])
}

/// Decode the Shared String Table
///
/// `continue_offsets` are the offsets where CONTINUE bodies start in the
/// merged SST body. Decoding stops at the first malformed entry; the strings
/// decoded so far are kept.
pub fn parse_sst(data: &[u8], continue_offsets: &[usize]) -> XlsResult<Vec<String>> {
    let mut cursor = ByteCursor::new(data);
    let _total_refs = cursor.u32()?;
    let unique_count = cursor.u32()? as usize;

    let mut strings = Vec::with_capacity(unique_count.min(data.len()));
    for i in 0..unique_count {
        match read_split_string(&mut cursor, continue_offsets) {
            Ok(s) => strings.push(s),
            Err(e) => {
                log::warn!("SST parse error at string {i}/{unique_count}: {e}");
                break;
            }
        }
    }

    Ok(strings)
}

fn read_split_string(cursor: &mut ByteCursor<'_>, continue_offsets: &[usize]) -> XlsResult<String> {
    let char_count = cursor.u16()? as usize;
    let flags = cursor.u8()?;

    let run_count = if flags & 0x08 != 0 { cursor.u16()? as usize } else { 0 };
    let ext_size = if flags & 0x04 != 0 { cursor.u32()? as usize } else { 0 };

    let mut text = String::with_capacity(char_count);
    let mut wide = flags & 0x01 != 0;
    let mut left = char_count;

    loop {
        let limit = continue_offsets
            .iter()
            .copied()
            .find(|&b| b > cursor.position())
            .unwrap_or(usize::MAX);
        let width = if wide { 2 } else { 1 };
        let fits = limit.saturating_sub(cursor.position()) / width;
        let take = left.min(fits);

        text.push_str(&read_chars(cursor, take, wide)?);
        left -= take;
        if left == 0 {
            break;
        }

        if cursor.position() != limit {
            return Err(XlsError::Parse(format!(
                "string character data misaligned with CONTINUE boundary at {limit}"
            )));
        }
        wide = cursor.u8()? & 0x01 != 0;
    }

    // Formatting runs are 4 bytes each
    cursor.skip(run_count * 4 + ext_size);

    Ok(text)
}

fn read_chars(cursor: &mut ByteCursor<'_>, count: usize, wide: bool) -> XlsResult<String> {
    if wide {
        let bytes = cursor.bytes(count * 2)?;
        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
            .collect();
        String::from_utf16(&units).map_err(|e| XlsError::Parse(format!("invalid UTF-16 string: {e}")))
    } else {
        let bytes = cursor.bytes(count)?;
        Ok(bytes.iter().map(|&b| b as char).collect())
    }
}
