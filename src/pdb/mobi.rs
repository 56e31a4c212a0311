//! The MOBI-specific header fields that follow the 16-byte PalmDOC-style
//! prefix in record 0.
//!
//! Grounded on `biblio/parsers/mobi.py`'s `_parse_mobi_header` for the
//! field layout (`'>4sLLLLLLLLLLLLLLLLLLLLLLLLLLLL'` at offset 0x10,
//! the DRM block at 0xa4, the conditional `extra_flags` at 0xf2,
//! the bounds-checked `fullname` slice) and the teacher's
//! `src/headers/mobih.rs` for the Rust struct/field-name shape and the
//! `mobi_type` table.
//!
//! Field order here follows the reader's forward-only cursor rather than
//! the original's independent slicing: the EXTH header (seek to
//! `16 + header_length`) is parsed before `fullname` (seek to
//! `fullname_offset`), since `fullname_offset` can legitimately sit
//! before the EXTH header ends and the reader cannot seek backward.

use super::exth::ExthHeader;
use crate::error::ParserError;
use crate::reader::Reader;
use std::io;

const DRM_NONE: u32 = 0xFFFF_FFFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Cp1252,
    Utf8,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MobiHeader {
    pub identifier: u32,
    pub header_length: u32,
    pub mobi_type: u32,
    pub text_encoding_raw: u32,
    pub unique_id: u32,
    pub file_version: u32,
    pub ortographic_index_record: u32,
    pub inflection_index_record: u32,
    pub index_names_record: u32,
    pub index_keys_record: u32,
    pub extra_index_records: [u32; 6],
    pub first_nonbook_record: u32,
    pub fullname_offset: u32,
    pub fullname_length: u32,
    pub locale: u32,
    pub dictionary_input_language: u32,
    pub dictionary_output_language: u32,
    pub min_version: u32,
    pub first_image_record: u32,
    pub huffman_record: u32,
    pub huffman_record_count: u32,
    pub huffman_table_record: u32,
    pub huffman_table_length: u32,
    pub exth_flags: u32,
    pub drm_offset: u32,
    pub drm_count: u32,
    pub drm_size: u32,
    pub drm_flags: u32,
    pub extra_flags: u16,
    pub fullname: Option<String>,
    pub exth: Option<ExthHeader>,
}

impl MobiHeader {
    /// Parses the MOBI-specific fields. `reader` must be positioned
    /// immediately after the 16-byte PalmDOC-style prefix (i.e. at
    /// `record0_start + 16`); `record0_start` is the absolute offset of
    /// record 0 and `raw_len` the total length of record 0, both needed
    /// to resolve the header's internal offsets and bounds-check
    /// `fullname`.
    pub(crate) fn parse<R: io::Read>(
        reader: &mut Reader<R>,
        record0_start: u64,
        raw_len: usize,
    ) -> Result<MobiHeader, ParserError> {
        let identifier = reader.read_u32_be()?;
        let header_length = reader.read_u32_be()?;
        let mobi_type = reader.read_u32_be()?;
        let text_encoding_raw = reader.read_u32_be()?;
        let unique_id = reader.read_u32_be()?;
        let file_version = reader.read_u32_be()?;
        let ortographic_index_record = reader.read_u32_be()?;
        let inflection_index_record = reader.read_u32_be()?;
        let index_names_record = reader.read_u32_be()?;
        let index_keys_record = reader.read_u32_be()?;
        let mut extra_index_records = [0u32; 6];
        for slot in extra_index_records.iter_mut() {
            *slot = reader.read_u32_be()?;
        }
        let first_nonbook_record = reader.read_u32_be()?;
        let fullname_offset = reader.read_u32_be()?;
        let fullname_length = reader.read_u32_be()?;
        let locale = reader.read_u32_be()?;
        let dictionary_input_language = reader.read_u32_be()?;
        let dictionary_output_language = reader.read_u32_be()?;
        let min_version = reader.read_u32_be()?;
        let first_image_record = reader.read_u32_be()?;
        let huffman_record = reader.read_u32_be()?;
        let huffman_record_count = reader.read_u32_be()?;
        let huffman_table_record = reader.read_u32_be()?;
        let huffman_table_length = reader.read_u32_be()?;
        let exth_flags = reader.read_u32_be()?;

        let mut header = MobiHeader {
            identifier,
            header_length,
            mobi_type,
            text_encoding_raw,
            unique_id,
            file_version,
            ortographic_index_record,
            inflection_index_record,
            index_names_record,
            index_keys_record,
            extra_index_records,
            first_nonbook_record,
            fullname_offset,
            fullname_length,
            locale,
            dictionary_input_language,
            dictionary_output_language,
            min_version,
            first_image_record,
            huffman_record,
            huffman_record_count,
            huffman_table_record,
            huffman_table_length,
            exth_flags,
            drm_offset: DRM_NONE,
            drm_count: 0,
            drm_size: 0,
            drm_flags: 0,
            extra_flags: 0,
            fullname: None,
            exth: None,
        };

        if raw_len as u64 >= 0xb4 {
            reader.set_position(record0_start + 0xa4)?;
            header.drm_offset = reader.read_u32_be()?;
            header.drm_count = reader.read_u32_be()?;
            header.drm_size = reader.read_u32_be()?;
            header.drm_flags = reader.read_u32_be()?;
        }

        if (0xe4..=0xf8).contains(&header_length) {
            reader.set_position(record0_start + 0xf2)?;
            header.extra_flags = reader.read_u16_be()?;
        }

        if header.has_exth_header() {
            reader.set_position(record0_start + 16 + header_length as u64)?;
            header.exth = Some(ExthHeader::parse(reader)?);
        }

        let fullname_end = fullname_offset as u64 + fullname_length as u64;
        if fullname_end < raw_len as u64 {
            reader.set_position(record0_start + fullname_offset as u64)?;
            header.fullname = Some(reader.read_string_header(fullname_length as usize)?);
        }

        Ok(header)
    }

    pub fn has_exth_header(&self) -> bool {
        self.exth_flags & 0x40 != 0
    }

    pub fn has_drm(&self) -> bool {
        self.drm_offset != DRM_NONE
    }

    pub fn mobi_type(&self) -> Option<&'static str> {
        match self.mobi_type {
            2 => Some("Mobipocket Book"),
            3 => Some("PalmDoc Book"),
            4 => Some("Audio"),
            257 => Some("News"),
            258 => Some("News Feed"),
            259 => Some("News Magazine"),
            513 => Some("PICS"),
            514 => Some("WORD"),
            515 => Some("XLS"),
            516 => Some("PPT"),
            517 => Some("TEXT"),
            518 => Some("HTML"),
            _ => None,
        }
    }

    /// MOBI only ever declares these two codepages. An unrecognized value
    /// is logged and treated as CP1252 rather than panicking, since a
    /// malformed codepage byte shouldn't take down metadata extraction
    /// for the rest of the file.
    pub fn text_encoding(&self) -> TextEncoding {
        match self.text_encoding_raw {
            65001 => TextEncoding::Utf8,
            1252 => TextEncoding::Cp1252,
            other => {
                log::warn!("unrecognized MOBI text encoding {}, assuming cp1252", other);
                TextEncoding::Cp1252
            }
        }
    }

    /// IETF language tag for the `locale` field, via the Mobipocket
    /// packed-locale codec.
    pub fn language(&self) -> String {
        crate::lang::mobi_to_iana(self.locale as u16)
    }
}
