//! Processors for the PDB-family formats that carry no typed metadata
//! section of their own (PalmDOC, eReader, Plucker, zTXT): the only
//! bibliographic fact available in any of these containers is the PDB
//! database name itself, so each processor does no more than MOBI's own
//! fallback path does when its record 0 is too short to hold a MOBI
//! header (`crate::process::mobi::base_metadata`).

use crate::error::ParserError;
use crate::identify::FileType;
use crate::metadata::EbookMetadata;
use crate::pdb::PdbHeader;
use crate::reader::Reader;
use std::io::Cursor;

fn base_metadata(filetype: FileType, pdb: &PdbHeader) -> EbookMetadata {
    EbookMetadata {
        filetype: Some(filetype),
        title: Some(pdb.name.clone()),
        ..Default::default()
    }
}

fn parse_pdb_header(data: &[u8]) -> Result<PdbHeader, ParserError> {
    let total_len = data.len() as u64;
    let mut reader = Reader::new(Cursor::new(data.to_vec()));
    PdbHeader::parse(&mut reader, total_len)
}

pub(crate) fn parse_and_process_palmdoc(data: &[u8]) -> Result<EbookMetadata, ParserError> {
    let pdb = parse_pdb_header(data)?;
    Ok(base_metadata(FileType::PdbPalmdoc, &pdb))
}

pub(crate) fn parse_and_process_ereader(data: &[u8]) -> Result<EbookMetadata, ParserError> {
    let pdb = parse_pdb_header(data)?;
    Ok(base_metadata(FileType::PdbEreader, &pdb))
}

pub(crate) fn parse_and_process_plucker(data: &[u8]) -> Result<EbookMetadata, ParserError> {
    let pdb = parse_pdb_header(data)?;
    Ok(base_metadata(FileType::PdbPlucker, &pdb))
}

pub(crate) fn parse_and_process_ztxt(data: &[u8]) -> Result<EbookMetadata, ParserError> {
    let pdb = parse_pdb_header(data)?;
    Ok(base_metadata(FileType::PdbGutenpalm, &pdb))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pdb_bytes(name: &str) -> Vec<u8> {
        let mut buf = Vec::new();
        let mut name_bytes = name.as_bytes().to_vec();
        name_bytes.resize(32, 0);
        buf.extend_from_slice(&name_bytes);
        buf.extend_from_slice(&0u16.to_be_bytes()); // attributes
        buf.extend_from_slice(&0u16.to_be_bytes()); // version
        buf.extend_from_slice(&0u32.to_be_bytes()); // creation
        buf.extend_from_slice(&0u32.to_be_bytes()); // modification
        buf.extend_from_slice(&0u32.to_be_bytes()); // backup
        buf.extend_from_slice(&0u32.to_be_bytes()); // modnum
        buf.extend_from_slice(&0u32.to_be_bytes()); // appinfo
        buf.extend_from_slice(&0u32.to_be_bytes()); // sortinfo
        buf.extend_from_slice(b"TEXt");
        buf.extend_from_slice(b"REAd");
        buf.extend_from_slice(&0u32.to_be_bytes()); // unique id seed
        buf.extend_from_slice(&0u32.to_be_bytes()); // next record list id
        buf.extend_from_slice(&0u16.to_be_bytes()); // num records
        buf
    }

    #[test]
    fn palmdoc_processor_falls_back_to_pdb_name() {
        let data = sample_pdb_bytes("Moby Dick");
        let meta = parse_and_process_palmdoc(&data).unwrap();
        assert_eq!(meta.filetype, Some(FileType::PdbPalmdoc));
        assert_eq!(meta.title.as_deref(), Some("Moby Dick"));
    }

    #[test]
    fn ereader_processor_falls_back_to_pdb_name() {
        let data = sample_pdb_bytes("Dracula");
        let meta = parse_and_process_ereader(&data).unwrap();
        assert_eq!(meta.filetype, Some(FileType::PdbEreader));
        assert_eq!(meta.title.as_deref(), Some("Dracula"));
    }
}
