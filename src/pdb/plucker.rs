//! Plucker (Palm `DataPlkr`) record 0.
//!
//! Grounded on `biblio/parsers/pdb.py`'s `_parse_plucker_header`: a
//! 6-byte prefix (uid, compression, record count) followed by that many
//! 4-byte `(name, id)` pairs. The id whose name is `0` is the home HTML
//! record.

use crate::error::ParserError;
use crate::reader::Reader;
use indexmap::IndexMap;
use std::io;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PluckerHeader {
    pub uid: u16,
    pub compression: u16,
    pub records: u16,
    pub home_html: Option<u16>,
    /// id → name, in declaration order.
    pub reserved: IndexMap<u16, u16>,
}

impl PluckerHeader {
    pub(crate) fn parse<R: io::Read>(reader: &mut Reader<R>) -> Result<PluckerHeader, ParserError> {
        let uid = reader.read_u16_be()?;
        let compression = reader.read_u16_be()?;
        let records = reader.read_u16_be()?;

        let mut reserved = IndexMap::new();
        let mut home_html = None;
        for _ in 0..records {
            let name = reader.read_u16_be()?;
            let id = reader.read_u16_be()?;
            reserved.insert(id, name);
            if name == 0 {
                home_html = Some(id);
            }
        }

        Ok(PluckerHeader {
            uid,
            compression,
            records,
            home_html,
            reserved,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn home_html_is_the_id_whose_name_is_zero() {
        let mut data = Vec::new();
        data.extend_from_slice(&1u16.to_be_bytes()); // uid
        data.extend_from_slice(&0u16.to_be_bytes()); // compression
        data.extend_from_slice(&2u16.to_be_bytes()); // records
        data.extend_from_slice(&7u16.to_be_bytes()); // name
        data.extend_from_slice(&42u16.to_be_bytes()); // id
        data.extend_from_slice(&0u16.to_be_bytes()); // name == 0
        data.extend_from_slice(&43u16.to_be_bytes()); // id

        let mut reader = Reader::new(Cursor::new(data));
        let header = PluckerHeader::parse(&mut reader).unwrap();
        assert_eq!(header.home_html, Some(43));
        assert_eq!(header.reserved.len(), 2);
    }

    #[test]
    fn no_zero_named_record_means_no_home_html() {
        let mut data = Vec::new();
        data.extend_from_slice(&1u16.to_be_bytes());
        data.extend_from_slice(&0u16.to_be_bytes());
        data.extend_from_slice(&1u16.to_be_bytes());
        data.extend_from_slice(&9u16.to_be_bytes());
        data.extend_from_slice(&1u16.to_be_bytes());

        let mut reader = Reader::new(Cursor::new(data));
        let header = PluckerHeader::parse(&mut reader).unwrap();
        assert_eq!(header.home_html, None);
    }
}
