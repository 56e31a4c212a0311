//! EPUB/OCF container handling: opening the ZIP archive, reading
//! `META-INF/container.xml`, and dispatching to the OPF package file it
//! points at.
//!
//! Grounded on `biblio/parsers/epub.py`'s `EPubParser.read_metadata` for
//! the control flow (open ZIP, read container.xml under the OCF
//! namespace, build a media-type → path map, look up the OPF mimetype)
//! and on `convert-input-epub/src/parser.rs`'s `read_container_xml` /
//! `read_archive_entry` for the `zip` + `quick-xml` idiom.

pub(crate) mod opf;

pub use opf::{OpfElement, OpfPackage};

use crate::error::ParserError;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::Read;
use zip::read::ZipArchive;

const CONTAINER_PATH: &str = "META-INF/container.xml";
const OPF_MIMETYPE: &str = "application/oebps-package+xml";

/// Reads the container and OPF package from an open EPUB ZIP archive.
pub(crate) fn read_opf<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
) -> Result<OpfPackage, ParserError> {
    let container_xml = read_archive_entry(archive, CONTAINER_PATH)
        .map_err(|_| ParserError::MissingContainer)?;
    let rootfiles = parse_container_xml(&container_xml)?;

    let opf_path = rootfiles
        .get(OPF_MIMETYPE)
        .ok_or(ParserError::MissingOpf)?;
    let opf_bytes = read_archive_entry(archive, opf_path).map_err(|_| ParserError::MissingOpf)?;

    opf::parse_opf_xml(&opf_bytes)
}

fn read_archive_entry<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Vec<u8>, ParserError> {
    let mut entry = archive.by_name(name)?;
    let mut buf = Vec::new();
    entry.read_to_end(&mut buf)?;
    Ok(buf)
}

/// Parses `META-INF/container.xml` under the OCF namespace, returning a
/// media-type → full-path map built from every `<rootfile>` element. A
/// `<rootfile>` missing its `full-path` or `media-type` attribute is a
/// fatal `MalformedRootfile`.
fn parse_container_xml(xml: &[u8]) -> Result<std::collections::HashMap<String, String>, ParserError> {
    let text = String::from_utf8_lossy(xml);
    let mut reader = Reader::from_str(&text);
    let mut rootfiles = std::collections::HashMap::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let local = local_name(e.name().as_ref());
                if local == "rootfile" {
                    let mut full_path = None;
                    let mut media_type = None;
                    for attr in e.attributes().flatten() {
                        match local_name(attr.key.as_ref()).as_str() {
                            "full-path" => {
                                full_path = Some(String::from_utf8_lossy(&attr.value).into_owned())
                            }
                            "media-type" => {
                                media_type =
                                    Some(String::from_utf8_lossy(&attr.value).into_owned())
                            }
                            _ => {}
                        }
                    }
                    match (full_path, media_type) {
                        (Some(path), Some(media_type)) => {
                            rootfiles.insert(media_type, path);
                        }
                        _ => return Err(ParserError::MalformedRootfile),
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParserError::Xml(e)),
            _ => {}
        }
    }

    Ok(rootfiles)
}

fn local_name(qualified: &[u8]) -> String {
    let s = String::from_utf8_lossy(qualified);
    match s.rfind(':') {
        Some(idx) => s[idx + 1..].to_string(),
        None => s.into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTAINER_XML: &str = r#"<?xml version="1.0"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#;

    #[test]
    fn rootfile_map_keys_by_media_type() {
        let map = parse_container_xml(CONTAINER_XML.as_bytes()).unwrap();
        assert_eq!(
            map.get(OPF_MIMETYPE).map(String::as_str),
            Some("OEBPS/content.opf")
        );
    }

    #[test]
    fn missing_full_path_is_malformed() {
        let xml = r#"<container xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
            <rootfiles><rootfile media-type="application/oebps-package+xml"/></rootfiles>
        </container>"#;
        assert!(matches!(
            parse_container_xml(xml.as_bytes()),
            Err(ParserError::MalformedRootfile)
        ));
    }
}
