//! EXTH header: a sequence of typed, repeatable (type, length, data)
//! records embedded after the MOBI header when `exth_flags & 0x40` is
//! set.
//!
//! Grounded on `biblio/parsers/mobi.py`'s `_parse_exth_header` for the
//! record layout (`'>4sLL'` prefix, then a loop of `'>LL'` + raw data)
//! and the teacher's `src/headers/exth.rs` for the named-variant style of
//! `ExthRecordType`, trimmed to the subset spec'd metadata processing
//! actually consumes. Unlike the original, a record whose declared
//! `length` is less than the 8-byte (type, length) prefix it must itself
//! include is treated as a fatal parse error rather than silently
//! underflowing the data slice (Open Question ii, spec §9).

use crate::error::ParserError;
use crate::reader::Reader;
use indexmap::IndexMap;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExthRecordType {
    Author,
    Publisher,
    Description,
    Isbn,
    Subject,
    PublishingDate,
    Rights,
    UpdatedTitle,
    Other(u32),
}

impl From<u32> for ExthRecordType {
    fn from(n: u32) -> ExthRecordType {
        match n {
            100 => ExthRecordType::Author,
            101 => ExthRecordType::Publisher,
            103 => ExthRecordType::Description,
            104 => ExthRecordType::Isbn,
            105 => ExthRecordType::Subject,
            106 => ExthRecordType::PublishingDate,
            109 => ExthRecordType::Rights,
            503 => ExthRecordType::UpdatedTitle,
            other => ExthRecordType::Other(other),
        }
    }
}

impl From<ExthRecordType> for u32 {
    fn from(t: ExthRecordType) -> u32 {
        match t {
            ExthRecordType::Author => 100,
            ExthRecordType::Publisher => 101,
            ExthRecordType::Description => 103,
            ExthRecordType::Isbn => 104,
            ExthRecordType::Subject => 105,
            ExthRecordType::PublishingDate => 106,
            ExthRecordType::Rights => 109,
            ExthRecordType::UpdatedTitle => 503,
            ExthRecordType::Other(n) => n,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExthHeader {
    pub identifier: u32,
    pub header_length: u32,
    pub record_count: u32,
    /// Raw record bytes keyed by type id, preserving declaration order
    /// and repeats: several spec'd fields (authors, subjects) are
    /// multi-valued and extend a list rather than overwrite a scalar.
    pub records: IndexMap<u32, Vec<Vec<u8>>>,
}

impl ExthHeader {
    pub(crate) fn parse<R: io::Read>(reader: &mut Reader<R>) -> Result<ExthHeader, ParserError> {
        let identifier = reader.read_u32_be()?;
        let header_length = reader.read_u32_be()?;
        let record_count = reader.read_u32_be()?;

        let mut records: IndexMap<u32, Vec<Vec<u8>>> = IndexMap::new();
        let mut consumed = 12u32;
        for _ in 0..record_count {
            let rec_type = reader.read_u32_be()?;
            let length = reader.read_u32_be()?;
            if length < 8 {
                return Err(ParserError::MalformedExthRecord(length));
            }
            let data = reader.read_bytes((length - 8) as usize)?;
            records.entry(rec_type).or_default().push(data);
            consumed += length;
        }
        let _ = consumed;

        Ok(ExthHeader {
            identifier,
            header_length,
            record_count,
            records,
        })
    }

    /// All raw values registered for `rec_type`, in declaration order.
    pub fn get_all(&self, rec_type: ExthRecordType) -> &[Vec<u8>] {
        self.records
            .get(&u32::from(rec_type))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The first value registered for `rec_type`, lossily decoded as
    /// UTF-8, if any.
    pub fn get_string(&self, rec_type: ExthRecordType) -> Option<String> {
        self.get_all(rec_type)
            .first()
            .map(|v| String::from_utf8_lossy(v).into_owned())
    }

    /// Every value registered for `rec_type`, lossily decoded as UTF-8.
    pub fn get_all_strings(&self, rec_type: ExthRecordType) -> Vec<String> {
        self.get_all(rec_type)
            .iter()
            .map(|v| String::from_utf8_lossy(v).into_owned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn record(rec_type: u32, data: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&rec_type.to_be_bytes());
        buf.extend_from_slice(&((data.len() + 8) as u32).to_be_bytes());
        buf.extend_from_slice(data);
        buf
    }

    fn sample_bytes(records: &[Vec<u8>]) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"EXTH");
        let total: usize = 12 + records.iter().map(Vec::len).sum::<usize>();
        buf.extend_from_slice(&(total as u32).to_be_bytes());
        buf.extend_from_slice(&(records.len() as u32).to_be_bytes());
        for r in records {
            buf.extend_from_slice(r);
        }
        buf
    }

    #[test]
    fn parses_multivalued_author_records_in_order() {
        let data = sample_bytes(&[
            record(100, b"Tolkien, J.R.R."),
            record(100, b"Christopher Tolkien"),
            record(101, b"Allen & Unwin"),
        ]);
        let mut reader = Reader::new(Cursor::new(data));
        let exth = ExthHeader::parse(&mut reader).unwrap();
        assert_eq!(
            exth.get_all_strings(ExthRecordType::Author),
            vec!["Tolkien, J.R.R.".to_string(), "Christopher Tolkien".to_string()]
        );
        assert_eq!(
            exth.get_string(ExthRecordType::Publisher),
            Some("Allen & Unwin".to_string())
        );
    }

    #[test]
    fn record_length_under_eight_is_a_fatal_error() {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"EXTH");
        buf.extend_from_slice(&20u32.to_be_bytes());
        buf.extend_from_slice(&1u32.to_be_bytes());
        buf.extend_from_slice(&100u32.to_be_bytes());
        buf.extend_from_slice(&4u32.to_be_bytes()); // length < 8
        let mut reader = Reader::new(Cursor::new(buf));
        assert!(matches!(
            ExthHeader::parse(&mut reader),
            Err(ParserError::MalformedExthRecord(4))
        ));
    }

    #[test]
    fn unknown_type_ids_round_trip_through_other() {
        let t = ExthRecordType::from(777);
        assert_eq!(t, ExthRecordType::Other(777));
        assert_eq!(u32::from(t), 777);
    }
}
