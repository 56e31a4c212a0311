//! Palm Database (PDB) container header and record table, shared by the
//! PalmDOC, MOBI, eReader, Plucker and zTXT formats.
//!
//! Grounded on `biblio/parsers/pdb.py`'s `_parse_pdb_header` (field
//! layout, the record-info loop, the name-sanitizing regex) and the
//! teacher's `src/headers/header.rs` for the Rust idiom (a generic
//! `Reader<R: io::Read>` walking the fixed layout field by field).

pub(crate) mod ereader;
pub(crate) mod exth;
pub(crate) mod mobi;
pub(crate) mod palmdoc;
pub(crate) mod plucker;
pub(crate) mod ztxt;

pub use ereader::{EReaderHeader, EReaderHeader132, EReaderHeaderShort};
pub use exth::ExthHeader;
pub use mobi::{MobiHeader, TextEncoding};
pub use palmdoc::{Compression, Encryption, PalmDocHeader, PalmDocRecord0};
pub use plucker::PluckerHeader;
pub use ztxt::ZTxtHeader;

use crate::error::ParserError;
use crate::reader::Reader;
use chrono::{DateTime, TimeZone, Utc};
use regex::Regex;
use std::io;
use std::sync::OnceLock;

/// Seconds between the Mac/Palm epoch (1904-01-01) and the Unix epoch
/// (1970-01-01).
const MAC_EPOCH_OFFSET_SECS: i64 = 2_082_844_800;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PdbHeader {
    pub name: String,
    pub attributes: u16,
    pub version: u16,
    pub creation_timestamp: u32,
    pub modification_timestamp: u32,
    pub last_backup_timestamp: u32,
    pub modification_number: u32,
    pub appinfo_offset: u32,
    pub sortinfo_offset: u32,
    pub typ: String,
    pub creator: String,
    pub unique_id_seed: u32,
    pub next_record_list_id: u32,
    pub num_records: u16,
    /// `(offset, length)` pairs, one per record, offsets strictly
    /// increasing (Open Question i, spec §9: asserted here, not merely
    /// assumed).
    pub records: Vec<(u32, u32)>,
}

impl PdbHeader {
    /// Parses the 78-byte header and the record-info table that follows
    /// it. `reader` must be positioned at the start of the stream;
    /// `total_len` is the whole file's length, needed to compute the last
    /// record's length (which runs to EOF).
    pub(crate) fn parse<R: io::Read>(
        reader: &mut Reader<R>,
        total_len: u64,
    ) -> Result<PdbHeader, ParserError> {
        let name = sanitize_name(&reader.read_string_header(32)?);
        let attributes = reader.read_u16_be()?;
        let version = reader.read_u16_be()?;
        let creation_timestamp = reader.read_u32_be()?;
        let modification_timestamp = reader.read_u32_be()?;
        let last_backup_timestamp = reader.read_u32_be()?;
        let modification_number = reader.read_u32_be()?;
        let appinfo_offset = reader.read_u32_be()?;
        let sortinfo_offset = reader.read_u32_be()?;
        let typ = reader.read_string_header(4)?;
        let creator = reader.read_string_header(4)?;
        let unique_id_seed = reader.read_u32_be()?;
        let next_record_list_id = reader.read_u32_be()?;
        let num_records = reader.read_u16_be()?;
        reader.set_num_records(num_records);

        let mut records = Vec::with_capacity(num_records as usize);
        if num_records > 0 {
            let mut start = reader.read_u32_be()?;
            reader.read_bytes(4)?; // attribute byte + 3-byte unique id

            for _ in 1..num_records {
                let next_start = reader.read_u32_be()?;
                reader.read_bytes(4)?;
                if next_start <= start {
                    return Err(ParserError::UnorderedPdbRecords);
                }
                records.push((start, next_start - start));
                start = next_start;
            }
            records.push((start, (total_len.saturating_sub(start as u64)) as u32));
        }

        Ok(PdbHeader {
            name,
            attributes,
            version,
            creation_timestamp,
            modification_timestamp,
            last_backup_timestamp,
            modification_number,
            appinfo_offset,
            sortinfo_offset,
            typ,
            creator,
            unique_id_seed,
            next_record_list_id,
            num_records,
            records,
        })
    }
}

fn name_sanitizer() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"[^-A-Za-z0-9'";:,. ]+"#).unwrap())
}

fn sanitize_name(raw: &str) -> String {
    name_sanitizer().replace_all(raw, "_").into_owned()
}

/// Decodes a raw PDB timestamp per spec §6: if the high bit is set, the
/// value is unsigned seconds since 1904-01-01; otherwise it's signed
/// seconds since 1970-01-01. Exposed as a helper rather than silently
/// coerced, since the two encodings disagree by over 65 years.
pub(crate) fn pdb_timestamp_to_utc(raw: u32) -> DateTime<Utc> {
    let secs = if raw & 0x8000_0000 != 0 {
        raw as i64 - MAC_EPOCH_OFFSET_SECS
    } else {
        raw as i32 as i64
    };
    Utc.timestamp_opt(secs, 0)
        .single()
        .unwrap_or_else(|| Utc.timestamp_opt(0, 0).single().unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample_header_bytes(num_records: u16, record_offsets: &[u32]) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"Sample Book\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0"); // 32 bytes
        buf.truncate(32);
        buf.extend_from_slice(&0u16.to_be_bytes()); // attributes
        buf.extend_from_slice(&0u16.to_be_bytes()); // version
        buf.extend_from_slice(&0u32.to_be_bytes()); // creation
        buf.extend_from_slice(&0u32.to_be_bytes()); // modification
        buf.extend_from_slice(&0u32.to_be_bytes()); // backup
        buf.extend_from_slice(&0u32.to_be_bytes()); // modnum
        buf.extend_from_slice(&0u32.to_be_bytes()); // appinfo
        buf.extend_from_slice(&0u32.to_be_bytes()); // sortinfo
        buf.extend_from_slice(b"BOOK");
        buf.extend_from_slice(b"MOBI");
        buf.extend_from_slice(&0u32.to_be_bytes()); // unique id seed
        buf.extend_from_slice(&0u32.to_be_bytes()); // next record list id
        buf.extend_from_slice(&num_records.to_be_bytes());
        for &offset in record_offsets {
            buf.extend_from_slice(&offset.to_be_bytes());
            buf.extend_from_slice(&[0u8; 4]);
        }
        buf
    }

    #[test]
    fn name_is_sanitized_and_nul_trimmed() {
        let mut data = b"Weird!@#Name\0".to_vec();
        data.resize(32, 0);
        let mut reader = Reader::new(Cursor::new(data));
        let name = sanitize_name(&reader.read_string_header(32).unwrap());
        assert_eq!(name, "Weird___Name");
    }

    #[test]
    fn parses_header_and_records_to_eof() {
        let mut data = sample_header_bytes(2, &[78 + 2 * 8, 78 + 2 * 8 + 100]);
        data.resize(data.len() + 150, 0xAB);
        let total_len = data.len() as u64;
        let mut reader = Reader::new(Cursor::new(data));
        let header = PdbHeader::parse(&mut reader, total_len).unwrap();
        assert_eq!(header.num_records, 2);
        assert_eq!(header.records.len(), 2);
        assert_eq!(header.records[0].0, 94);
        assert_eq!(header.records[1].0, 194);
        assert_eq!(header.records[1].1, total_len as u32 - 194);
    }

    #[test]
    fn rejects_non_increasing_record_offsets() {
        let data = sample_header_bytes(2, &[200, 100]);
        let total_len = data.len() as u64 + 500;
        let mut reader = Reader::new(Cursor::new(data));
        assert!(matches!(
            PdbHeader::parse(&mut reader, total_len),
            Err(ParserError::UnorderedPdbRecords)
        ));
    }

    #[test]
    fn timestamp_high_bit_selects_mac_epoch() {
        // High bit set forces the mac-epoch branch: seconds since
        // 1904-01-01, converted to Unix time by subtracting the offset.
        let raw = 0x8000_0000u32;
        let dt = pdb_timestamp_to_utc(raw);
        assert_eq!(dt.timestamp(), raw as i64 - MAC_EPOCH_OFFSET_SECS);
    }

    #[test]
    fn timestamp_without_high_bit_is_unix_epoch_signed() {
        let dt = pdb_timestamp_to_utc(100);
        assert_eq!(dt.timestamp(), 100);
    }
}
