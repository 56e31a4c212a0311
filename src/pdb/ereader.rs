//! eReader (Palm `PNRdPPrs`) record 0, which comes in two incompatible
//! shapes depending on its own size.
//!
//! Grounded on `biblio/parsers/pdb.py`'s `_parse_ereader_header132` /
//! `_parse_ereader_header202`: a 132-byte record uses the richer
//! `'>HLHHHHHHHHHHHHHHHHHHHHHHH'` layout; a 116- or 202-byte record only
//! exposes a version, an unknown 6-byte field and a trailing record
//! count, because (per the original's own comment) that header format is
//! mostly undocumented.

use crate::error::ParserError;
use crate::reader::Reader;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EReaderHeader132 {
    pub compression: u16,
    pub encoding: u16,
    pub number_small_pages: u16,
    pub number_large_pages: u16,
    pub non_text_records: u16,
    pub number_chapters: u16,
    pub number_small_index: u16,
    pub number_large_index: u16,
    pub number_images: u16,
    pub number_links: u16,
    pub metadata_available: u16,
    pub number_footnotes: u16,
    pub number_sidebars: u16,
    pub chapter_index_records: u16,
    pub magic_2560: u16,
    pub small_page_index_record: u16,
    pub large_page_index_record: u16,
    pub image_data_record: u16,
    pub links_record: u16,
    pub metadata_record: u16,
    pub footnote_record: u16,
    pub sidebar_record: u16,
    pub last_data_record: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EReaderHeaderShort {
    pub version: u16,
    pub non_text_records: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EReaderHeader {
    Long(EReaderHeader132),
    Short(EReaderHeaderShort),
}

impl EReaderHeader {
    /// Dispatches on `record0_len`, the byte length of record 0, per the
    /// original's three supported sizes.
    pub(crate) fn parse<R: io::Read>(
        reader: &mut Reader<R>,
        record0_len: usize,
    ) -> Result<EReaderHeader, ParserError> {
        match record0_len {
            132 => Ok(EReaderHeader::Long(parse_long(reader)?)),
            116 | 202 => Ok(EReaderHeader::Short(parse_short(reader)?)),
            other => Err(ParserError::UnsupportedHeaderSize(other)),
        }
    }
}

fn parse_long<R: io::Read>(reader: &mut Reader<R>) -> io::Result<EReaderHeader132> {
    let compression = reader.read_u16_be()?;
    reader.read_u32_be()?; // unknown1
    let encoding = reader.read_u16_be()?;
    let number_small_pages = reader.read_u16_be()?;
    let number_large_pages = reader.read_u16_be()?;
    let non_text_records = reader.read_u16_be()?;
    let number_chapters = reader.read_u16_be()?;
    let number_small_index = reader.read_u16_be()?;
    let number_large_index = reader.read_u16_be()?;
    let number_images = reader.read_u16_be()?;
    let number_links = reader.read_u16_be()?;
    let metadata_available = reader.read_u16_be()?;
    reader.read_u16_be()?; // unknown2
    let number_footnotes = reader.read_u16_be()?;
    let number_sidebars = reader.read_u16_be()?;
    let chapter_index_records = reader.read_u16_be()?;
    let magic_2560 = reader.read_u16_be()?;
    let small_page_index_record = reader.read_u16_be()?;
    let large_page_index_record = reader.read_u16_be()?;
    let image_data_record = reader.read_u16_be()?;
    let links_record = reader.read_u16_be()?;
    let metadata_record = reader.read_u16_be()?;
    reader.read_u16_be()?; // unknown3
    let footnote_record = reader.read_u16_be()?;
    let sidebar_record = reader.read_u16_be()?;
    let last_data_record = reader.read_u16_be()?;

    Ok(EReaderHeader132 {
        compression,
        encoding,
        number_small_pages,
        number_large_pages,
        non_text_records,
        number_chapters,
        number_small_index,
        number_large_index,
        number_images,
        number_links,
        metadata_available,
        number_footnotes,
        number_sidebars,
        chapter_index_records,
        magic_2560,
        small_page_index_record,
        large_page_index_record,
        image_data_record,
        links_record,
        metadata_record,
        footnote_record,
        sidebar_record,
        last_data_record,
    })
}

fn parse_short<R: io::Read>(reader: &mut Reader<R>) -> io::Result<EReaderHeaderShort> {
    let version = reader.read_u16_be()?;
    reader.read_bytes(6)?; // unknown
    let non_text_records = reader.read_u16_be()?;
    Ok(EReaderHeaderShort {
        version,
        non_text_records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn long_header_parses_at_132_bytes() {
        let mut data = vec![0u8; 132];
        data[0..2].copy_from_slice(&2u16.to_be_bytes()); // compression
        data[6..8].copy_from_slice(&1u16.to_be_bytes()); // encoding
        let mut reader = Reader::new(Cursor::new(data));
        let header = EReaderHeader::parse(&mut reader, 132).unwrap();
        match header {
            EReaderHeader::Long(h) => {
                assert_eq!(h.compression, 2);
                assert_eq!(h.encoding, 1);
            }
            EReaderHeader::Short(_) => panic!("expected long header"),
        }
    }

    #[test]
    fn short_header_parses_at_116_and_202_bytes() {
        for size in [116usize, 202] {
            let mut data = vec![0u8; size];
            data[0..2].copy_from_slice(&3u16.to_be_bytes());
            let mut reader = Reader::new(Cursor::new(data));
            let header = EReaderHeader::parse(&mut reader, size).unwrap();
            assert!(matches!(header, EReaderHeader::Short(h) if h.version == 3));
        }
    }

    #[test]
    fn unsupported_size_is_an_error() {
        let data = vec![0u8; 40];
        let mut reader = Reader::new(Cursor::new(data));
        assert!(matches!(
            EReaderHeader::parse(&mut reader, 40),
            Err(ParserError::UnsupportedHeaderSize(40))
        ));
    }
}
