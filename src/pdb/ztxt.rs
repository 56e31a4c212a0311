//! zTXT / Gutenpalm (Palm `zTXT`) record 0.
//!
//! Grounded on `biblio/parsers/pdb.py`'s `_parse_ztxt_header`:
//! `'>HHLHHHHHBBL'` over the first 24 bytes (version, record_count,
//! data_size, record_size, bookmark count/record, annotation
//! count/record, flags, a reserved byte, then the text's CRC-32).

use crate::reader::Reader;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ZTxtHeader {
    pub version: u16,
    pub record_count: u16,
    pub data_size: u32,
    pub record_size: u16,
    pub number_bookmarks: u16,
    pub bookmark_record: u16,
    pub number_annotations: u16,
    pub annotation_record: u16,
    pub flags: u8,
    pub crc32: u32,
}

impl ZTxtHeader {
    pub(crate) fn parse<R: io::Read>(reader: &mut Reader<R>) -> io::Result<ZTxtHeader> {
        let version = reader.read_u16_be()?;
        let record_count = reader.read_u16_be()?;
        let data_size = reader.read_u32_be()?;
        let record_size = reader.read_u16_be()?;
        let number_bookmarks = reader.read_u16_be()?;
        let bookmark_record = reader.read_u16_be()?;
        let number_annotations = reader.read_u16_be()?;
        let annotation_record = reader.read_u16_be()?;
        let flags = reader.read_u8()?;
        reader.read_u8()?; // reserved
        let crc32 = reader.read_u32_be()?;

        Ok(ZTxtHeader {
            version,
            record_count,
            data_size,
            record_size,
            number_bookmarks,
            bookmark_record,
            number_annotations,
            annotation_record,
            flags,
            crc32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_24_byte_header() {
        let mut data = Vec::new();
        data.extend_from_slice(&1u16.to_be_bytes());
        data.extend_from_slice(&10u16.to_be_bytes());
        data.extend_from_slice(&50_000u32.to_be_bytes());
        data.extend_from_slice(&4096u16.to_be_bytes());
        data.extend_from_slice(&0u16.to_be_bytes());
        data.extend_from_slice(&0u16.to_be_bytes());
        data.extend_from_slice(&0u16.to_be_bytes());
        data.extend_from_slice(&0u16.to_be_bytes());
        data.push(0);
        data.push(0);
        data.extend_from_slice(&0xDEAD_BEEFu32.to_be_bytes());

        let mut reader = Reader::new(Cursor::new(data));
        let header = ZTxtHeader::parse(&mut reader).unwrap();
        assert_eq!(header.record_count, 10);
        assert_eq!(header.data_size, 50_000);
        assert_eq!(header.crc32, 0xDEAD_BEEF);
    }
}
