//! Error taxonomy for identification, parsing and the pluggable registry.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentificationError {
    #[error("rule offset resolved to a negative position")]
    InvalidOffset,
    #[error("invalid rule program: {0}")]
    InvalidRuleProgram(String),
    #[error("unknown subsystem: {0:?}")]
    UnknownSubsystem(crate::registry::Subsystem),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("could not identify file type")]
    UnknownFileType,
    #[error("metadata filetype does not match the detected file type")]
    MismatchedMetadata,
    #[error("no writer registered for this format")]
    UnsupportedOperation,
    #[error("not a ZIP OCF container")]
    NotAnOcfContainer,
    #[error("missing META-INF/container.xml")]
    MissingContainer,
    #[error("<rootfile/> element malformed")]
    MalformedRootfile,
    #[error("missing OPF package file")]
    MissingOpf,
    #[error("unsupported eReader header size: {0}")]
    UnsupportedHeaderSize(usize),
    #[error("malformed EXTH record: declared length {0} is less than 8")]
    MalformedExthRecord(u32),
    #[error("malformed PDB record table: offsets are not strictly increasing")]
    UnorderedPdbRecords,
    #[error(transparent)]
    Identification(#[from] IdentificationError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),
    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("duplicate registration for this file type")]
    DuplicateRegistration,
    #[error("unknown subsystem: {0:?}")]
    UnknownSubsystem(crate::registry::Subsystem),
}
