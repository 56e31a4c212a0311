//! Identifies ebook and related media files by inspecting magic bytes,
//! parses the format-specific binary/XML structures, and normalizes the
//! result into a common bibliographic metadata record.
//!
//! The crate is organized around a [`Registry`] built once via
//! [`Registry::bootstrap`], which owns both the builtin magic-byte
//! identifier table and the builtin parser dispatch table. Four
//! top-level entry points sit on top of it:
//!
//! - [`identify_file`] — classify a path into a [`FileType`].
//! - [`read_metadata`] — parse a path's raw format-specific structures,
//!   without normalizing them into an [`EbookMetadata`] record.
//! - [`read_processed_metadata`] — parse and normalize in one step.
//! - [`write_metadata`] — always fails; no writer is registered for any
//!   format (see [`ParserError::UnsupportedOperation`]).
//!
//! ## Example
//! ```no_run
//! use biblio::Registry;
//!
//! let registry = Registry::bootstrap();
//! if let Some(metadata) = biblio::read_processed_metadata("book.mobi", &registry, None)? {
//!     println!("{:?}", metadata.title);
//! }
//! # Ok::<(), biblio::error::ParserError>(())
//! ```

pub mod error;
pub(crate) mod epub;
pub mod identify;
pub(crate) mod lang;
pub(crate) mod metadata;
pub(crate) mod pdb;
pub(crate) mod process;
pub(crate) mod reader;
pub(crate) mod registry;
pub(crate) mod text;
pub(crate) mod writer;

pub use epub::{OpfElement, OpfPackage};
pub use identify::FileType;
pub use metadata::EbookMetadata;
pub use pdb::{
    Compression, EReaderHeader, EReaderHeader132, EReaderHeaderShort, Encryption, ExthHeader,
    MobiHeader, PalmDocHeader, PalmDocRecord0, PdbHeader, PluckerHeader, TextEncoding, ZTxtHeader,
};
pub use pdb::exth::ExthRecordType;
pub use registry::Registry;

use crate::error::{IdentificationError, ParserError};
use std::io::Cursor;
use std::path::Path;

/// Classifies the file at `path` into one of the builtin/extra
/// [`FileType`]s registered with `registry`, or `None` if no program
/// matches.
pub fn identify_file<P: AsRef<Path>>(
    path: P,
    registry: &Registry,
) -> Result<Option<FileType>, IdentificationError> {
    let programs: Vec<(FileType, identify::rule::Program)> = registry
        .iterate_identifiers()
        .map(|(ft, program)| (ft, program.clone()))
        .collect();
    identify::identify_file(path, &programs, registry.max_data_buffer_size())
}

/// The raw, format-specific structures parsed from a file, before
/// normalization into an [`EbookMetadata`] record.
///
/// This path bypasses the registry's parser tier entirely — it is a
/// direct dispatch on [`FileType`], since a raw parse tree has a
/// different shape per format and isn't a stand-in for any one
/// `EbookMetadata` processor. The registry's parser tier (see
/// [`read_processed_metadata`]) instead wires together a combined
/// parse-then-normalize pipeline per format.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum RawMetadata {
    Mobi {
        pdb: PdbHeader,
        palmdoc: PalmDocHeader,
        mobi: MobiHeader,
    },
    PalmDoc {
        pdb: PdbHeader,
        palmdoc: PalmDocRecord0,
    },
    EReader {
        pdb: PdbHeader,
        ereader: EReaderHeader,
    },
    Plucker {
        pdb: PdbHeader,
        plucker: PluckerHeader,
    },
    ZTxt {
        pdb: PdbHeader,
        ztxt: ZTxtHeader,
    },
    Epub {
        opf: OpfPackage,
    },
}

/// Identifies the file at `path`, then parses its raw format-specific
/// structures. Returns `Ok(None)` when the file isn't recognized, or is
/// recognized as a [`FileType`] this crate has no raw parser for (e.g.
/// an image or audio type from the builtin identifier table).
pub fn read_metadata<P: AsRef<Path>>(
    path: P,
    registry: &Registry,
) -> Result<Option<RawMetadata>, ParserError> {
    let path = path.as_ref();
    let filetype = match identify_file(path, registry)? {
        Some(ft) => ft,
        None => return Ok(None),
    };
    let data = std::fs::read(path)?;
    parse_raw(filetype, &data)
}

fn parse_raw(filetype: FileType, data: &[u8]) -> Result<Option<RawMetadata>, ParserError> {
    use crate::reader::Reader;

    match filetype {
        FileType::Mobi => {
            let total_len = data.len() as u64;
            let mut reader = Reader::new(Cursor::new(data.to_vec()));
            let pdb = PdbHeader::parse(&mut reader, total_len)?;
            let (record0_start, record0_len) =
                pdb.records.first().copied().ok_or(ParserError::UnknownFileType)?;
            reader.set_position(record0_start as u64)?;
            let palmdoc = pdb::palmdoc::PalmDocHeader::parse(&mut reader)?;
            let mobi = MobiHeader::parse(&mut reader, record0_start as u64, record0_len as usize)?;
            Ok(Some(RawMetadata::Mobi { pdb, palmdoc, mobi }))
        }
        FileType::PdbPalmdoc => {
            let total_len = data.len() as u64;
            let mut reader = Reader::new(Cursor::new(data.to_vec()));
            let pdb = PdbHeader::parse(&mut reader, total_len)?;
            let (record0_start, _) = pdb.records.first().copied().ok_or(ParserError::UnknownFileType)?;
            reader.set_position(record0_start as u64)?;
            let palmdoc = pdb::palmdoc::PalmDocRecord0::parse(&mut reader)?;
            Ok(Some(RawMetadata::PalmDoc { pdb, palmdoc }))
        }
        FileType::PdbEreader => {
            let total_len = data.len() as u64;
            let mut reader = Reader::new(Cursor::new(data.to_vec()));
            let pdb = PdbHeader::parse(&mut reader, total_len)?;
            let (record0_start, record0_len) =
                pdb.records.first().copied().ok_or(ParserError::UnknownFileType)?;
            reader.set_position(record0_start as u64)?;
            let ereader = EReaderHeader::parse(&mut reader, record0_len as usize)?;
            Ok(Some(RawMetadata::EReader { pdb, ereader }))
        }
        FileType::PdbPlucker => {
            let total_len = data.len() as u64;
            let mut reader = Reader::new(Cursor::new(data.to_vec()));
            let pdb = PdbHeader::parse(&mut reader, total_len)?;
            let (record0_start, _) = pdb.records.first().copied().ok_or(ParserError::UnknownFileType)?;
            reader.set_position(record0_start as u64)?;
            let plucker = PluckerHeader::parse(&mut reader)?;
            Ok(Some(RawMetadata::Plucker { pdb, plucker }))
        }
        FileType::PdbGutenpalm => {
            let total_len = data.len() as u64;
            let mut reader = Reader::new(Cursor::new(data.to_vec()));
            let pdb = PdbHeader::parse(&mut reader, total_len)?;
            let (record0_start, _) = pdb.records.first().copied().ok_or(ParserError::UnknownFileType)?;
            reader.set_position(record0_start as u64)?;
            let ztxt = ZTxtHeader::parse(&mut reader)?;
            Ok(Some(RawMetadata::ZTxt { pdb, ztxt }))
        }
        FileType::Epub2 => {
            let mut archive = zip::read::ZipArchive::new(Cursor::new(data))?;
            let opf = epub::read_opf(&mut archive)?;
            Ok(Some(RawMetadata::Epub { opf }))
        }
        _ => Ok(None),
    }
}

/// Identifies the file at `path` (unless `filetype` is given explicitly),
/// looks up its registered parser, and runs the combined
/// parse-then-normalize pipeline. Returns `Ok(None)` when the file isn't
/// recognized, or when no parser is registered for its type.
pub fn read_processed_metadata<P: AsRef<Path>>(
    path: P,
    registry: &Registry,
    filetype: Option<FileType>,
) -> Result<Option<EbookMetadata>, ParserError> {
    let path = path.as_ref();
    let filetype = match filetype {
        Some(ft) => ft,
        None => match identify_file(path, registry)? {
            Some(ft) => ft,
            None => return Ok(None),
        },
    };
    let parser = match registry.find_parser(filetype) {
        Some(parser) => parser,
        None => return Ok(None),
    };
    let data = std::fs::read(path)?;
    parser(&data).map(Some)
}

/// Writes `metadata` back to the file at `path`. This crate registers no
/// writers for any format, so every call fails with
/// [`ParserError::UnsupportedOperation`] — a deliberate, testable
/// property rather than an unimplemented stub.
pub fn write_metadata<P: AsRef<Path>>(
    _path: P,
    _registry: &Registry,
    _metadata: &EbookMetadata,
) -> Result<(), ParserError> {
    Err(ParserError::UnsupportedOperation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_mobi_bytes() -> Vec<u8> {
        let mut buf = vec![0u8; 32];
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
        buf.extend_from_slice(&0u32.to_be_bytes());
        buf.extend_from_slice(&0u32.to_be_bytes());
        buf.extend_from_slice(&1u16.to_be_bytes()); // num_records = 1
        let record0_start = buf.len() as u32 + 8;
        buf.extend_from_slice(&record0_start.to_be_bytes());
        buf.extend_from_slice(&[0u8; 4]);

        // record 0: 16-byte PalmDOC prefix + minimal MOBI header
        buf.extend_from_slice(&1u16.to_be_bytes()); // compression: none
        buf.extend_from_slice(&0u16.to_be_bytes());
        buf.extend_from_slice(&0u32.to_be_bytes());
        buf.extend_from_slice(&1u16.to_be_bytes());
        buf.extend_from_slice(&0u16.to_be_bytes());
        buf.extend_from_slice(&0u16.to_be_bytes());
        buf.extend_from_slice(&0u16.to_be_bytes());
        buf.extend_from_slice(b"MOBI");
        buf.extend_from_slice(&0xC8u32.to_be_bytes()); // header_length
        buf.extend_from_slice(&2u32.to_be_bytes()); // mobi_type
        buf.extend_from_slice(&65001u32.to_be_bytes()); // text encoding utf-8
        buf.extend_from_slice(&0u32.to_be_bytes()); // unique id
        buf.extend_from_slice(&8u32.to_be_bytes()); // file version
        for _ in 0..4 {
            buf.extend_from_slice(&0xFFFF_FFFFu32.to_be_bytes());
        }
        for _ in 0..6 {
            buf.extend_from_slice(&0xFFFF_FFFFu32.to_be_bytes());
        }
        buf.extend_from_slice(&0xFFFF_FFFFu32.to_be_bytes()); // first_nonbook_record
        buf.extend_from_slice(&0u32.to_be_bytes()); // fullname_offset
        buf.extend_from_slice(&0u32.to_be_bytes()); // fullname_length
        buf.extend_from_slice(&0u32.to_be_bytes()); // locale
        buf.extend_from_slice(&0u32.to_be_bytes());
        buf.extend_from_slice(&0u32.to_be_bytes());
        buf.extend_from_slice(&0u32.to_be_bytes());
        buf.extend_from_slice(&0xFFFF_FFFFu32.to_be_bytes());
        buf.extend_from_slice(&0xFFFF_FFFFu32.to_be_bytes());
        buf.extend_from_slice(&0u32.to_be_bytes());
        buf.extend_from_slice(&0xFFFF_FFFFu32.to_be_bytes());
        buf.extend_from_slice(&0u32.to_be_bytes());
        buf.extend_from_slice(&0u32.to_be_bytes()); // exth_flags (no EXTH)
        buf.resize(buf.len() + 32, 0);
        buf
    }

    #[test]
    fn identify_file_finds_mobi_from_path() {
        let data = sample_mobi_bytes();
        let dir = std::env::temp_dir();
        let path = dir.join("biblio_lib_test_identify.mobi");
        std::fs::File::create(&path).unwrap().write_all(&data).unwrap();

        let registry = Registry::bootstrap();
        let filetype = identify_file(&path, &registry).unwrap();
        assert_eq!(filetype, Some(FileType::Mobi));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn read_metadata_returns_raw_mobi_structures() {
        let data = sample_mobi_bytes();
        let dir = std::env::temp_dir();
        let path = dir.join("biblio_lib_test_raw.mobi");
        std::fs::File::create(&path).unwrap().write_all(&data).unwrap();

        let registry = Registry::bootstrap();
        let raw = read_metadata(&path, &registry).unwrap();
        assert!(matches!(raw, Some(RawMetadata::Mobi { .. })));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn read_processed_metadata_normalizes_mobi() {
        let data = sample_mobi_bytes();
        let dir = std::env::temp_dir();
        let path = dir.join("biblio_lib_test_processed.mobi");
        std::fs::File::create(&path).unwrap().write_all(&data).unwrap();

        let registry = Registry::bootstrap();
        let metadata = read_processed_metadata(&path, &registry, None).unwrap().unwrap();
        assert_eq!(metadata.filetype, Some(FileType::Mobi));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn write_metadata_is_unsupported() {
        let registry = Registry::bootstrap();
        let metadata = EbookMetadata::default();
        let result = write_metadata("/nonexistent", &registry, &metadata);
        assert!(matches!(result, Err(ParserError::UnsupportedOperation)));
    }
}
