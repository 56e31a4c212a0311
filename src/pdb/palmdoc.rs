//! The 16-byte PalmDOC-style header shared by the PalmDOC, MOBI, eReader,
//! Plucker and zTXT record 0 layouts.
//!
//! Grounded almost verbatim on the teacher's `src/headers/palmdoch.rs`;
//! field order cross-checked against `biblio/parsers/mobi.py`'s
//! `'>HHLHHHH'` prefix struct (compression, unused, text_length,
//! record_count, record_size, encryption, unknown).

use crate::reader::Reader;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    No,
    PalmDoc,
    Huff,
}

impl From<u16> for Compression {
    fn from(n: u16) -> Compression {
        match n {
            2 => Compression::PalmDoc,
            17480 => Compression::Huff,
            _ => Compression::No,
        }
    }
}

impl ToString for Compression {
    fn to_string(&self) -> String {
        match self {
            Compression::No => String::from("No Compression"),
            Compression::PalmDoc => String::from("PalmDOC Compression"),
            Compression::Huff => String::from("HUFF/CFIC Compression"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encryption {
    No,
    OldMobipocket,
    Mobipocket,
}

impl From<u16> for Encryption {
    fn from(n: u16) -> Encryption {
        match n {
            2 => Encryption::Mobipocket,
            1 => Encryption::OldMobipocket,
            _ => Encryption::No,
        }
    }
}

impl ToString for Encryption {
    fn to_string(&self) -> String {
        match self {
            Encryption::No => String::from("No Encryption"),
            Encryption::OldMobipocket => String::from("Old Mobipocket Encryption"),
            Encryption::Mobipocket => String::from("Mobipocket Encryption"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PalmDocHeader {
    pub compression: u16,
    pub text_length: u32,
    pub record_count: u16,
    pub record_size: u16,
    pub encryption_type: u16,
}

impl PalmDocHeader {
    /// Parses the header from `reader`, which must already be positioned
    /// at the start of record 0 (immediately after the PDB record-info
    /// table).
    pub(crate) fn parse<R: io::Read>(reader: &mut Reader<R>) -> io::Result<PalmDocHeader> {
        let compression = reader.read_u16_be()?;
        reader.read_u16_be()?; // unused
        let text_length = reader.read_u32_be()?;
        let record_count = reader.read_u16_be()?;
        let record_size = reader.read_u16_be()?;
        let encryption_type = reader.read_u16_be()?;
        reader.read_u16_be()?; // unknown

        Ok(PalmDocHeader {
            compression,
            text_length,
            record_count,
            record_size,
            encryption_type,
        })
    }

    pub fn compression(&self) -> Compression {
        Compression::from(self.compression)
    }

    pub fn encryption(&self) -> Encryption {
        Encryption::from(self.encryption_type)
    }
}

/// Record 0 of a standalone PalmDOC file — distinct from
/// [`PalmDocHeader`], which models the same 16 bytes as embedded in a
/// MOBI file's record 0. A standalone PalmDOC's final 4-byte field is
/// `current_position` (the reading cursor into the uncompressed text),
/// not an encryption tag, per `biblio/parsers/pdb.py`'s
/// `_parse_palmdoc_header`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PalmDocRecord0 {
    pub compression: u16,
    pub text_length: u32,
    pub record_count: u16,
    pub record_size: u16,
    pub current_position: u32,
}

impl PalmDocRecord0 {
    pub(crate) fn parse<R: io::Read>(reader: &mut Reader<R>) -> io::Result<PalmDocRecord0> {
        let compression = reader.read_u16_be()?;
        reader.read_u16_be()?; // unused
        let text_length = reader.read_u32_be()?;
        let record_count = reader.read_u16_be()?;
        let record_size = reader.read_u16_be()?;
        let current_position = reader.read_u32_be()?;

        Ok(PalmDocRecord0 {
            compression,
            text_length,
            record_count,
            record_size,
            current_position,
        })
    }

    pub fn compression(&self) -> Compression {
        Compression::from(self.compression)
    }
}
