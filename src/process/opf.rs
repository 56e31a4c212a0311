//! EPUB (OPF) → [`EbookMetadata`] processor.
//!
//! Grounded on spec §4.5's Dublin Core mapping table, cross-checked
//! against the OPF metadata shape `convert-input-epub`'s parser builds:
//! `dc:title`/`title` → title, `dc:creator`/`creator` → authors (only
//! when its `opf:role` attribute is `aut` or absent), `dc:language` →
//! languages, `dc:identifier` → `identifiers[scheme]` keyed by the
//! attribute whose local name ends in `scheme`, `dc:subject` → comma-split
//! tags, plus the calibre `<meta name="calibre:series">` /
//! `calibre:series_index` convention.

use crate::epub::{OpfElement, OpfPackage};
use crate::error::ParserError;
use crate::metadata::{self, EbookMetadata};
use std::io::Cursor;
use zip::read::ZipArchive;

pub(crate) fn parse_and_process(data: &[u8]) -> Result<EbookMetadata, ParserError> {
    let mut archive = ZipArchive::new(Cursor::new(data))?;
    let package = crate::epub::read_opf(&mut archive)?;
    Ok(build_metadata(&package))
}

fn build_metadata(package: &OpfPackage) -> EbookMetadata {
    let mut meta = EbookMetadata {
        filetype: Some(crate::identify::FileType::Epub2),
        ..Default::default()
    };

    for element in &package.metadata {
        let local = local_name(&element.name);
        let text = element.text.as_deref();
        match local {
            "title" => {
                if let Some(t) = text {
                    meta.title = Some(t.to_string());
                }
            }
            "creator" => {
                let role = element
                    .attrs
                    .iter()
                    .find(|(k, _)| local_name(k) == "role")
                    .map(|(_, v)| v.as_str());
                if matches!(role, Some("aut") | None) {
                    if let Some(t) = text {
                        meta.authors.push(t.to_string());
                    }
                }
            }
            "publisher" => {
                if let Some(t) = text {
                    meta.publisher = Some(t.to_string());
                }
            }
            "date" => {
                if let Some(t) = text {
                    meta.date_published = Some(metadata::parse_ebook_date(t));
                }
            }
            "description" => {
                if let Some(t) = text {
                    meta.description = Some(t.to_string());
                }
            }
            "rights" => {
                if let Some(t) = text {
                    meta.rights = Some(t.to_string());
                }
            }
            "language" => {
                if let Some(t) = text {
                    meta.languages.push(t.to_string());
                }
            }
            "subject" => {
                if let Some(t) = text {
                    for tag in t.split(',') {
                        let tag = tag.trim();
                        if !tag.is_empty() {
                            meta.tags.insert(tag.to_string());
                        }
                    }
                }
            }
            "identifier" => {
                if let Some(t) = text {
                    let scheme = element
                        .attrs
                        .iter()
                        .find(|(k, _)| local_name(k).ends_with("scheme"))
                        .map(|(_, v)| v.to_lowercase())
                        .unwrap_or_else(|| "identifier".to_string());
                    meta.identifiers.insert(scheme, t.to_string());
                }
            }
            "meta" => apply_calibre_meta(&mut meta, element),
            _ => {}
        }
    }

    meta
}

fn apply_calibre_meta(meta: &mut EbookMetadata, element: &OpfElement) {
    let name = element.attrs.get("name").map(String::as_str);
    let content = element.attrs.get("content").map(String::as_str);
    match (name, content) {
        (Some("calibre:series"), Some(series)) => meta.series = Some(series.to_string()),
        (Some("calibre:series_index"), Some(index)) => {
            meta.series_index = index.parse::<f64>().ok();
        }
        _ => {}
    }
}

fn local_name(qualified: &str) -> &str {
    match qualified.rfind(':') {
        Some(idx) => &qualified[idx + 1..],
        None => qualified,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn element(name: &str, text: Option<&str>, attrs: &[(&str, &str)]) -> OpfElement {
        let mut map = IndexMap::new();
        for (k, v) in attrs {
            map.insert(k.to_string(), v.to_string());
        }
        OpfElement {
            name: name.to_string(),
            attrs: map,
            text: text.map(str::to_string),
        }
    }

    #[test]
    fn dublin_core_elements_map_onto_fields() {
        let package = OpfPackage {
            metadata: vec![
                element("dc:title", Some("The Hobbit"), &[]),
                element("dc:creator", Some("J.R.R. Tolkien"), &[("opf:role", "aut")]),
                element("dc:language", Some("en"), &[]),
                element("dc:identifier", Some("9780547928227"), &[("opf:scheme", "ISBN")]),
                element("dc:subject", Some("Fantasy, Adventure"), &[]),
                element("meta", None, &[("name", "calibre:series"), ("content", "Middle-earth")]),
                element("meta", None, &[("name", "calibre:series_index"), ("content", "1")]),
            ],
            ..Default::default()
        };

        let meta = build_metadata(&package);
        assert_eq!(meta.title.as_deref(), Some("The Hobbit"));
        assert_eq!(meta.authors, vec!["J.R.R. Tolkien".to_string()]);
        assert_eq!(meta.languages, vec!["en".to_string()]);
        assert_eq!(meta.identifiers.get("isbn").map(String::as_str), Some("9780547928227"));
        assert!(meta.tags.contains("Fantasy"));
        assert!(meta.tags.contains("Adventure"));
        assert_eq!(meta.series.as_deref(), Some("Middle-earth"));
        assert_eq!(meta.series_index, Some(1.0));
    }

    #[test]
    fn creator_with_non_author_role_is_skipped() {
        let package = OpfPackage {
            metadata: vec![element(
                "dc:creator",
                Some("Cover Illustrator"),
                &[("opf:role", "ill")],
            )],
            ..Default::default()
        };
        let meta = build_metadata(&package);
        assert!(meta.authors.is_empty());
    }
}
