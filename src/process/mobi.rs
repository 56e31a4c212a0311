//! MOBI → [`EbookMetadata`] processor.
//!
//! Grounded on `biblio/parsers/mobi.py::MOBIEbook`'s EXTH-type-to-field
//! mapping (spec §3/§4.5): author=100, publisher=101, description=103,
//! isbn=104, subject=105, publishing date=106, rights=109, updated
//! title=503. Codec selection (cp1252/utf-8, defaulting to cp1252 with a
//! `warn!` on anything else) follows `MobiHeader::text_encoding`'s
//! contract in `crate::pdb::mobi`, which itself departs from the
//! teacher's panicking `text_encoding()` by design. CP1252 decoding
//! reuses the teacher's `encoding` crate dependency (`src/record.rs`'s
//! `WINDOWS_1252.decode(..., DecoderTrap::Replace)` idiom).

use crate::error::ParserError;
use crate::metadata::{self, EbookMetadata};
use crate::pdb::exth::ExthRecordType;
use crate::pdb::mobi::{MobiHeader, TextEncoding};
use crate::pdb::{palmdoc, PdbHeader};
use crate::reader::Reader;
use encoding::{all::WINDOWS_1252, DecoderTrap, Encoding};
use std::io::Cursor;

pub(crate) fn parse_and_process(data: &[u8]) -> Result<EbookMetadata, ParserError> {
    let total_len = data.len() as u64;
    let mut reader = Reader::new(Cursor::new(data.to_vec()));
    let pdb = PdbHeader::parse(&mut reader, total_len)?;

    let (record0_start, record0_len) = pdb
        .records
        .first()
        .copied()
        .ok_or(ParserError::UnknownFileType)?;
    reader.set_position(record0_start as u64)?;

    if (record0_len as u64) <= 16 {
        return Ok(base_metadata(&pdb, None));
    }

    palmdoc::PalmDocHeader::parse(&mut reader)?;
    let mobi = MobiHeader::parse(&mut reader, record0_start as u64, record0_len as usize)?;

    Ok(build_metadata(&pdb, &mobi))
}

fn base_metadata(pdb: &PdbHeader, title: Option<String>) -> EbookMetadata {
    EbookMetadata {
        filetype: Some(crate::identify::FileType::Mobi),
        title: title.or_else(|| Some(pdb.name.clone())),
        ..Default::default()
    }
}

fn build_metadata(pdb: &PdbHeader, mobi: &MobiHeader) -> EbookMetadata {
    let encoding = mobi.text_encoding();
    let decode = |bytes: &[u8]| decode_bytes(bytes, encoding);

    let mut meta = base_metadata(pdb, None);
    meta.title = mobi
        .fullname
        .clone()
        .or_else(|| Some(pdb.name.clone()))
        .map(|t| decode_entities(&t));
    meta.languages.push(mobi.language());

    if let Some(exth) = &mobi.exth {
        for raw in exth.get_all(ExthRecordType::Author) {
            meta.authors
                .extend(metadata::parse_ebook_authors(&decode(raw)));
        }
        meta.publisher = exth
            .get_all(ExthRecordType::Publisher)
            .first()
            .map(|b| decode(b));
        meta.description = exth
            .get_all(ExthRecordType::Description)
            .first()
            .map(|b| decode(b));
        if let Some(raw) = exth.get_all(ExthRecordType::Isbn).first() {
            meta.identifiers
                .insert("isbn".to_string(), decode(raw).replace('-', ""));
        }
        for raw in exth.get_all(ExthRecordType::Subject) {
            meta.tags.insert(decode(raw));
        }
        if let Some(raw) = exth.get_all(ExthRecordType::PublishingDate).first() {
            meta.date_published = Some(metadata::parse_ebook_date(&decode(raw)));
        }
        meta.rights = exth
            .get_all(ExthRecordType::Rights)
            .first()
            .map(|b| decode(b));
        if let Some(raw) = exth.get_all(ExthRecordType::UpdatedTitle).first() {
            meta.title = Some(decode_entities(&decode(raw)));
        }
    }

    meta
}

fn decode_bytes(bytes: &[u8], encoding: TextEncoding) -> String {
    match encoding {
        TextEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        TextEncoding::Cp1252 => WINDOWS_1252
            .decode(bytes, DecoderTrap::Replace)
            .unwrap_or_default(),
    }
}

/// Replaces the XML-predefined entities and numeric character references,
/// decimal and hex (`&amp; &lt; &gt; &quot; &apos; &#NN; &#xNN;`). General
/// HTML entity decoding is out of scope (spec §1 Non-goals).
fn decode_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'&' {
            if let Some(end) = s[i..].find(';').map(|p| p + i) {
                let entity = &s[i + 1..end];
                let replacement = match entity {
                    "amp" => Some('&'.to_string()),
                    "lt" => Some('<'.to_string()),
                    "gt" => Some('>'.to_string()),
                    "quot" => Some('"'.to_string()),
                    "apos" => Some('\''.to_string()),
                    _ if entity.starts_with("#x") || entity.starts_with("#X") => {
                        u32::from_str_radix(&entity[2..], 16)
                            .ok()
                            .and_then(char::from_u32)
                            .map(|c| c.to_string())
                    }
                    _ if entity.starts_with('#') => entity[1..]
                        .parse::<u32>()
                        .ok()
                        .and_then(char::from_u32)
                        .map(|c| c.to_string()),
                    _ => None,
                };
                if let Some(replacement) = replacement {
                    out.push_str(&replacement);
                    i = end + 1;
                    continue;
                }
            }
        }
        let ch = s[i..].chars().next().unwrap();
        out.push(ch);
        i += ch.len_utf8();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_decoding_handles_predefined_and_numeric_refs() {
        assert_eq!(decode_entities("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(decode_entities("&lt;i&gt;Emphasis&lt;/i&gt;"), "<i>Emphasis</i>");
        assert_eq!(decode_entities("caf&#233;"), "café");
        assert_eq!(decode_entities("caf&#xE9;"), "café");
    }

    #[test]
    fn cp1252_high_bytes_map_to_curly_quotes() {
        let decoded = decode_bytes(&[0x93, b'h', b'i', 0x94], TextEncoding::Cp1252);
        assert_eq!(decoded, "\u{201C}hi\u{201D}");
    }
}
