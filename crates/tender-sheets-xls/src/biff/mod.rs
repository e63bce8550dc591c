//! BIFF8 (Binary Interchange File Format) record layer.
//!
//! A BIFF8 stream is a sequence of records, each with a 4-byte header
//! (record type + body length, both little-endian u16) followed by the body.
//! CONTINUE records extend the body of the preceding record beyond the
//! 8224-byte limit; they are merged here, and the offsets where each
//! continuation starts are kept because SST strings restate their encoding
//! flags at those points.

pub mod cursor;
pub mod records;
pub mod strings;

pub use cursor::ByteCursor;

use crate::error::{XlsError, XlsResult};

/// A single BIFF8 record with CONTINUE bodies already merged
#[derive(Debug, Clone)]
pub struct BiffRecord {
    /// Record type id (e.g. [`records::SST`])
    pub record_type: u16,
    /// Record body, continuations included
    pub data: Vec<u8>,
    /// Offsets within `data` where a CONTINUE body begins
    pub continue_offsets: Vec<usize>,
    /// Byte offset of this record's header in the stream
    pub stream_offset: u64,
}

/// Split a workbook stream into records
///
/// A truncated trailing record is dropped with a warning; everything before
/// it is still returned.
pub fn read_records(stream: &[u8]) -> XlsResult<Vec<BiffRecord>> {
    let mut records: Vec<BiffRecord> = Vec::new();
    let mut cursor = ByteCursor::new(stream);

    while cursor.remaining() >= 4 {
        let stream_offset = cursor.position() as u64;
        let record_type = cursor.u16()?;
        let body_len = cursor.u16()? as usize;

        if cursor.remaining() < body_len {
            log::warn!(
                "truncated BIFF record 0x{record_type:04X} at offset {stream_offset}: \
                 need {body_len} bytes, have {}",
                cursor.remaining()
            );
            break;
        }
        let body = cursor.bytes(body_len)?;

        if record_type == records::CONTINUE {
            match records.last_mut() {
                Some(prev) => {
                    prev.continue_offsets.push(prev.data.len());
                    prev.data.extend_from_slice(body);
                }
                None => log::debug!("orphaned CONTINUE record at offset {stream_offset}"),
            }
        } else {
            records.push(BiffRecord {
                record_type,
                data: body.to_vec(),
                continue_offsets: Vec::new(),
                stream_offset,
            });
        }
    }

    Ok(records)
}

/// Extract `(version, substream_type)` from a BOF record body
///
/// `version` is `0x0600` for BIFF8; the substream type tells workbook
/// globals (`0x0005`) from worksheets (`0x0010`), charts and macros.
pub fn parse_bof(data: &[u8]) -> XlsResult<(u16, u16)> {
    if data.len() < 4 {
        return Err(XlsError::InvalidFormat("BOF record too short".into()));
    }
    let mut cursor = ByteCursor::new(data);
    let version = cursor.u16()?;
    let dt = cursor.u16()?;
    Ok((version, dt))
}
