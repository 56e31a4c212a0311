//! Metadata processors: turn raw parser output into a normalized
//! [`crate::metadata::EbookMetadata`] record, and wire the combined
//! parse-then-process pipelines into the registry's builtin parser
//! table.
//!
//! Grounded on `biblio/parsers/__init__.py`'s `read_processed_metadata`
//! (parse, then hand off to the matching processor) for the pipeline
//! shape; the MOBI and OPF processors themselves are grounded per-module
//! (see `process::mobi`, `process::opf`).

pub(crate) mod mobi;
pub(crate) mod opf;
pub(crate) mod pdb;

use crate::identify::FileType;
use crate::metadata::EbookMetadata;
use crate::registry::ParserFn;
use std::sync::Arc;

/// The builtin (FileType, parser) pairs wired into `Registry::bootstrap`.
/// Each parser re-parses the raw bytes from scratch and feeds the result
/// through the matching processor — `read_metadata`'s raw-only path is
/// separate (see `crate::lib`), since processors are not themselves part
/// of the pluggable identifier/parser split described in spec §4.6. The
/// PalmDOC/eReader/Plucker/zTXT processors only ever have a PDB database
/// name to work with (see `process::pdb`); MOBI and EPUB carry their own
/// richer metadata sections.
pub(crate) fn builtin_parsers() -> Vec<(FileType, ParserFn)> {
    vec![
        (FileType::Mobi, Arc::new(mobi::parse_and_process) as ParserFn),
        (FileType::Epub2, Arc::new(opf::parse_and_process) as ParserFn),
        (
            FileType::PdbPalmdoc,
            Arc::new(pdb::parse_and_process_palmdoc) as ParserFn,
        ),
        (
            FileType::PdbEreader,
            Arc::new(pdb::parse_and_process_ereader) as ParserFn,
        ),
        (
            FileType::PdbPlucker,
            Arc::new(pdb::parse_and_process_plucker) as ParserFn,
        ),
        (
            FileType::PdbGutenpalm,
            Arc::new(pdb::parse_and_process_ztxt) as ParserFn,
        ),
    ]
}
