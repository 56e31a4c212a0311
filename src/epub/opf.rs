//! OPF package XML: flattens `metadata`, `manifest`, `spine` and `guide`
//! into sequences of (qualified name, attributes, text) triples, the
//! shape the metadata processor (`crate::process::opf`) consumes.
//!
//! Grounded on `biblio/parsers/opf.py`'s `parse_opf_xml` for which
//! sections get flattened, and on
//! `convert-input-epub/src/parser.rs`'s `parse_opf_metadata` /
//! `parse_opf_manifest` / `parse_opf_spine` / `parse_opf_guide` for the
//! `quick_xml::Reader` event-loop idiom (including its inline XML
//! `#[cfg(test)]` fixtures, which this module's tests follow).
//!
//! Namespace handling here is local-name-only: `dc:title`, `opf:title`
//! and bare `title` are all recorded under the qualified name as it
//! appears in the source (attribute/element prefixes are preserved
//! verbatim rather than resolved against a URI), matching the processor
//! contract in spec §4.5, which matches on Dublin Core prefixes by name.

use crate::error::ParserError;
use indexmap::IndexMap;
use quick_xml::events::Event;
use quick_xml::Reader;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OpfElement {
    pub name: String,
    pub attrs: IndexMap<String, String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OpfPackage {
    pub metadata: Vec<OpfElement>,
    pub manifest: Vec<OpfElement>,
    pub spine: Vec<OpfElement>,
    pub guide: Vec<OpfElement>,
}

const SECTIONS: [&str; 4] = ["metadata", "manifest", "spine", "guide"];

pub(crate) fn parse_opf_xml(bytes: &[u8]) -> Result<OpfPackage, ParserError> {
    let text = String::from_utf8_lossy(bytes);
    let xml = match text.find('<') {
        Some(idx) => &text[idx..],
        None => return Ok(OpfPackage::default()),
    };

    let mut reader = Reader::from_str(xml);
    let mut package = OpfPackage::default();
    let mut current_section: Option<&'static str> = None;
    let mut pending: Option<OpfElement> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let qname = qualified_name(e.name().as_ref());
                if let Some(section) = SECTIONS.iter().find(|&&s| s == qname) {
                    current_section = Some(section);
                    continue;
                }
                if current_section.is_none() {
                    continue;
                }
                flush(&mut package, current_section, pending.take());
                let mut attrs = IndexMap::new();
                for attr in e.attributes().flatten() {
                    let key = qualified_name(attr.key.as_ref());
                    let value = String::from_utf8_lossy(&attr.value).into_owned();
                    attrs.insert(key, value);
                }
                pending = Some(OpfElement {
                    name: qname,
                    attrs,
                    text: None,
                });
            }
            Ok(Event::Text(ref t)) => {
                if let Some(element) = pending.as_mut() {
                    if let Ok(unescaped) = t.unescape() {
                        let trimmed = unescaped.trim();
                        if !trimmed.is_empty() {
                            element.text = Some(trimmed.to_string());
                        }
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                let qname = qualified_name(e.name().as_ref());
                if SECTIONS.contains(&qname.as_str()) {
                    flush(&mut package, current_section, pending.take());
                    current_section = None;
                } else if current_section.is_some() {
                    flush(&mut package, current_section, pending.take());
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParserError::Xml(e)),
            _ => {}
        }
    }

    Ok(package)
}

fn flush(package: &mut OpfPackage, section: Option<&'static str>, element: Option<OpfElement>) {
    let Some(element) = element else { return };
    match section {
        Some("metadata") => package.metadata.push(element),
        Some("manifest") => package.manifest.push(element),
        Some("spine") => package.spine.push(element),
        Some("guide") => package.guide.push(element),
        _ => {}
    }
}

fn qualified_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_OPF: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="2.0">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:opf="http://www.idpf.org/2007/opf">
    <dc:title>The Hobbit</dc:title>
    <dc:creator opf:role="aut">J.R.R. Tolkien</dc:creator>
    <dc:language>en</dc:language>
    <dc:identifier id="bookid" opf:scheme="ISBN">9780547928227</dc:identifier>
    <meta name="calibre:series" content="Middle-earth"/>
    <meta name="calibre:series_index" content="0"/>
  </metadata>
  <manifest>
    <item id="chap1" href="chapter1.xhtml" media-type="application/xhtml+xml"/>
  </manifest>
  <spine>
    <itemref idref="chap1"/>
  </spine>
  <guide>
    <reference type="cover" title="Cover" href="cover.xhtml"/>
  </guide>
</package>"#;

    #[test]
    fn metadata_elements_carry_text_and_attrs() {
        let package = parse_opf_xml(SAMPLE_OPF.as_bytes()).unwrap();
        let title = package
            .metadata
            .iter()
            .find(|e| e.name == "dc:title")
            .unwrap();
        assert_eq!(title.text.as_deref(), Some("The Hobbit"));

        let creator = package
            .metadata
            .iter()
            .find(|e| e.name == "dc:creator")
            .unwrap();
        assert_eq!(creator.attrs.get("opf:role").map(String::as_str), Some("aut"));

        let identifier = package
            .metadata
            .iter()
            .find(|e| e.name == "dc:identifier")
            .unwrap();
        assert_eq!(identifier.attrs.get("opf:scheme").map(String::as_str), Some("ISBN"));
    }

    #[test]
    fn manifest_spine_and_guide_flatten_to_self_closing_elements() {
        let package = parse_opf_xml(SAMPLE_OPF.as_bytes()).unwrap();
        assert_eq!(package.manifest.len(), 1);
        assert_eq!(package.manifest[0].attrs.get("href").map(String::as_str), Some("chapter1.xhtml"));
        assert_eq!(package.spine.len(), 1);
        assert_eq!(package.spine[0].attrs.get("idref").map(String::as_str), Some("chap1"));
        assert_eq!(package.guide.len(), 1);
        assert_eq!(package.guide[0].attrs.get("type").map(String::as_str), Some("cover"));
    }

    #[test]
    fn calibre_series_meta_elements_are_present_as_plain_meta() {
        let package = parse_opf_xml(SAMPLE_OPF.as_bytes()).unwrap();
        let metas: Vec<_> = package.metadata.iter().filter(|e| e.name == "meta").collect();
        assert_eq!(metas.len(), 2);
        assert!(metas.iter().any(|m| m.attrs.get("name").map(String::as_str) == Some("calibre:series")));
    }
}
