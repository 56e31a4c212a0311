//! The builtin identifier table.
//!
//! Order is significant: rules are tried in the sequence below and the
//! first program that matches wins. This mirrors
//! `biblio/identify/builtins.py` exactly (audio, images, Palm/MOBI family,
//! PDF/LIT, zipped EPUB, video, generic ZIP, then the SGML/XML/HTML
//! family) confirmed against `biblio/identifiers/__init__.py`'s
//! `initialize_builtin_pluggables`, which registers the same rules in the
//! same order under the newer pluggable-registry API.
//!
//! Office-suite formats present in the reference table (OpenOffice 1.x
//! writer/calc/draw/impress/math/database) are out of scope for this
//! crate's file-type catalogue and are not carried over.

use super::filetype::FileType;
use super::offset::Offset;
use super::rule::{Program, ProgramBuilder, StructField};

pub(crate) fn builtin_programs() -> Vec<(FileType, Program)> {
    vec![
        // AUDIO
        (
            FileType::Flac,
            ProgramBuilder::binary_only()
                .string(Offset::Absolute(0), b"fLaC\0")
                .build(),
        ),
        (
            FileType::M4a,
            ProgramBuilder::binary_only()
                .string(Offset::Absolute(4), b"ftypM4A ")
                .build(),
        ),
        (
            FileType::Mp3_1,
            ProgramBuilder::binary_only()
                .struct_(Offset::Absolute(0), vec![StructField::U16(0xfffb)])
                .build(),
        ),
        (
            FileType::Id3v22,
            ProgramBuilder::binary_only()
                .string(Offset::Absolute(0), b"ID3")
                .struct_(
                    Offset::Absolute(3),
                    vec![StructField::U8(2), StructField::U8(0)],
                )
                .build(),
        ),
        (
            FileType::Id3v23,
            ProgramBuilder::binary_only()
                .string(Offset::Absolute(0), b"ID3")
                .struct_(
                    Offset::Absolute(3),
                    vec![StructField::U8(3), StructField::U8(0)],
                )
                .build(),
        ),
        (
            FileType::Id3v24,
            ProgramBuilder::binary_only()
                .string(Offset::Absolute(0), b"ID3")
                .struct_(
                    Offset::Absolute(3),
                    vec![StructField::U8(4), StructField::U8(0)],
                )
                .build(),
        ),
        // IMAGES
        (
            FileType::Gif87a,
            ProgramBuilder::binary_only()
                .string(Offset::Absolute(0), b"GIF87a")
                .build(),
        ),
        (
            FileType::Gif89a,
            ProgramBuilder::binary_only()
                .string(Offset::Absolute(0), b"GIF89a")
                .build(),
        ),
        (
            FileType::JpegJfif,
            ProgramBuilder::binary_only()
                .struct_(Offset::Absolute(0), vec![StructField::U16(0xffd8)])
                .string(Offset::Absolute(6), b"JFIF")
                .build(),
        ),
        (
            FileType::JpegExif,
            ProgramBuilder::binary_only()
                .struct_(Offset::Absolute(0), vec![StructField::U16(0xffd8)])
                .string(Offset::Absolute(6), b"Exif")
                .build(),
        ),
        (
            FileType::Png,
            ProgramBuilder::binary_only()
                .string(Offset::Absolute(0), b"\x89PNG\x0d\x0a\x1a\x0a")
                .build(),
        ),
        // PALM / MOBI FAMILY
        (
            FileType::Mobi,
            ProgramBuilder::binary_only()
                .string(Offset::Absolute(60), b"BOOKMOBI")
                .build(),
        ),
        (
            FileType::PdbEreader,
            ProgramBuilder::binary_only()
                .string(Offset::Absolute(60), b"PNRdPPrs")
                .build(),
        ),
        (
            FileType::PdbGutenpalm,
            ProgramBuilder::binary_only()
                .string(Offset::Absolute(60), b"zTXT")
                .build(),
        ),
        (
            FileType::PdbPalmdoc,
            ProgramBuilder::binary_only()
                .string(Offset::Absolute(60), b"TEXtREAd")
                .build(),
        ),
        (
            FileType::PdbPlucker,
            ProgramBuilder::binary_only()
                .string(Offset::Absolute(60), b"DataPlkr")
                .build(),
        ),
        (
            FileType::Pdf,
            ProgramBuilder::binary_only()
                .string(Offset::Absolute(0), b"%PDF-")
                .build(),
        ),
        (
            FileType::Lit,
            ProgramBuilder::binary_only()
                .string(Offset::Absolute(0), b"ITOLITLS")
                .build(),
        ),
        // Zipped EPUB container
        (
            FileType::Epub2,
            ProgramBuilder::binary_only()
                .string(Offset::Absolute(0), b"PK\x03\x04")
                .string(Offset::Absolute(26), b"\x08\0\0\0mimetypeapplication/")
                .string(Offset::Absolute(50), b"epub+zip")
                .build(),
        ),
        // VIDEO
        (
            FileType::M4v1,
            ProgramBuilder::binary_only()
                .string(Offset::Absolute(4), b"ftypisom")
                .build(),
        ),
        (
            FileType::M4v1,
            ProgramBuilder::binary_only()
                .string(Offset::Absolute(4), b"ftypmp41")
                .build(),
        ),
        (
            FileType::M4v2,
            ProgramBuilder::binary_only()
                .string(Offset::Absolute(4), b"ftypmp42")
                .build(),
        ),
        (
            FileType::M4v,
            ProgramBuilder::binary_only()
                .string(Offset::Absolute(4), b"ftypM4V ")
                .build(),
        ),
        (
            FileType::Mkv,
            ProgramBuilder::binary_only()
                .struct_(Offset::Absolute(0), vec![StructField::U32(0x1a45_dfa3)])
                .search(Offset::Absolute(5), 4096, &[0x42, 0x82])
                .string(Offset::Forward(1), b"matroska")
                .build(),
        ),
        (
            FileType::WebM,
            ProgramBuilder::binary_only()
                .struct_(Offset::Absolute(0), vec![StructField::U32(0x1a45_dfa3)])
                .search(Offset::Absolute(5), 4096, &[0x42, 0x82])
                .string(Offset::Forward(1), b"webm")
                .build(),
        ),
        (
            FileType::Avi,
            ProgramBuilder::binary_only()
                .string(Offset::Absolute(0), b"RIFF")
                .string(Offset::Absolute(8), b"AVI\x20")
                .build(),
        ),
        // Generic ZIP archives, by version byte
        (
            FileType::Zip09,
            ProgramBuilder::binary_only()
                .string(Offset::Absolute(0), b"PK\x03\x04")
                .struct_(Offset::Absolute(4), vec![StructField::U8(0x09)])
                .build(),
        ),
        (
            FileType::Zip10,
            ProgramBuilder::binary_only()
                .string(Offset::Absolute(0), b"PK\x03\x04")
                .struct_(Offset::Absolute(4), vec![StructField::U8(0x0a)])
                .build(),
        ),
        (
            FileType::Zip11,
            ProgramBuilder::binary_only()
                .string(Offset::Absolute(0), b"PK\x03\x04")
                .struct_(Offset::Absolute(4), vec![StructField::U8(0x0b)])
                .build(),
        ),
        (
            FileType::Zip20,
            ProgramBuilder::binary_only()
                .string(Offset::Absolute(0), b"PK\x03\x04")
                .struct_(Offset::Absolute(4), vec![StructField::U8(0x14)])
                .build(),
        ),
        (
            FileType::Zip30,
            ProgramBuilder::binary_only()
                .string(Offset::Absolute(0), b"PK\x03\x04")
                .struct_(Offset::Absolute(4), vec![StructField::U8(0x2d)])
                .build(),
        ),
        // SGML / XML / HTML family (text-only rules)
        (
            FileType::Opf2,
            ProgramBuilder::text_only()
                .string(Offset::Absolute(0), b"<?xml")
                .regex(
                    Offset::Absolute(20),
                    400,
                    r#"<package[^>]+xmlns=['"]http://www.idpf.org/2007/opf['"]"#,
                )
                .build(),
        ),
        (
            FileType::Svg,
            ProgramBuilder::text_only()
                .string(Offset::Absolute(0), b"<?xml")
                .regex(
                    Offset::Absolute(20),
                    400,
                    r#"<svg[^>]+xmlns=['"]http://www.w3.org/2000/svg['"]"#,
                )
                .build(),
        ),
        (
            FileType::Xhtml,
            ProgramBuilder::text_only()
                .string(Offset::Absolute(0), b"<?xml version=\"")
                .search(Offset::Absolute(19), 4096, b"<!doctype html")
                .build(),
        ),
        (
            FileType::Xhtml,
            ProgramBuilder::text_only()
                .string(Offset::Absolute(0), b"<?xml version='")
                .search(Offset::Absolute(19), 4096, b"<!doctype html")
                .build(),
        ),
        (
            FileType::Html,
            ProgramBuilder::text_only()
                .search(Offset::Absolute(0), 4096, b"<!doctype html")
                .build(),
        ),
        (
            FileType::Html,
            ProgramBuilder::text_only()
                .search(Offset::Absolute(0), 4096, b"<html")
                .build(),
        ),
        (
            FileType::Html,
            ProgramBuilder::text_only()
                .search(Offset::Absolute(0), 4096, b"<head")
                .build(),
        ),
        (
            FileType::Html,
            ProgramBuilder::text_only()
                .search(Offset::Absolute(0), 4096, b"<title")
                .build(),
        ),
        (
            FileType::Xml,
            ProgramBuilder::text_only()
                .string(Offset::Absolute(0), b"<?xml")
                .build(),
        ),
    ]
}
