//! Every file type the builtin identifier table can name, with its
//! dotted category path, canonical MIME type, and short description.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[allow(non_camel_case_types)]
pub enum FileType {
    Epub2,
    Mobi,
    PdbEreader,
    PdbGutenpalm,
    PdbPalmdoc,
    PdbPlucker,
    Lit,
    Gif87a,
    Gif89a,
    JpegJfif,
    JpegExif,
    Png,
    Flac,
    M4a,
    Mp3_1,
    Id3v22,
    Id3v23,
    Id3v24,
    M4v1,
    M4v2,
    M4v,
    Mkv,
    WebM,
    Avi,
    Pdf,
    Zip09,
    Zip10,
    Zip11,
    Zip20,
    Zip30,
    Opf2,
    Svg,
    Xhtml,
    Html,
    Xml,
}

impl FileType {
    /// Dotted category path, coarsest component first, e.g. `"ebook.mobi"`.
    pub fn category_path(self) -> &'static str {
        use FileType::*;
        match self {
            Epub2 => "ebook.epub",
            Mobi => "ebook.mobi",
            PdbEreader => "ebook.pdb.ereader",
            PdbGutenpalm => "ebook.pdb.gutenpalm",
            PdbPalmdoc => "ebook.pdb.palmdoc",
            PdbPlucker => "ebook.pdb.plucker",
            Lit => "ebook.lit",
            Gif87a => "image.gif",
            Gif89a => "image.gif",
            JpegJfif => "image.jpeg",
            JpegExif => "image.jpeg",
            Png => "image.png",
            Flac => "audio.flac",
            M4a => "audio.m4a",
            Mp3_1 => "audio.mp3",
            Id3v22 => "audio.mp3",
            Id3v23 => "audio.mp3",
            Id3v24 => "audio.mp3",
            M4v1 => "video.m4v",
            M4v2 => "video.m4v",
            M4v => "video.m4v",
            Mkv => "video.mkv",
            WebM => "video.webm",
            Avi => "video.avi",
            Pdf => "document.pdf",
            Zip09 | Zip10 | Zip11 | Zip20 | Zip30 => "archive.zip",
            Opf2 => "ebook.opf",
            Svg => "image.svg",
            Xhtml => "text.xhtml",
            Html => "text.html",
            Xml => "text.xml",
        }
    }

    pub fn mimetype(self) -> &'static str {
        use FileType::*;
        match self {
            Epub2 => "application/epub+zip",
            Mobi => "application/x-mobipocket-ebook",
            PdbEreader => "application/vnd.ereader",
            // The reference implementation has a typo here
            // (`applicatino/vnd.palm`); the correct IANA-adjacent spelling
            // is used in this table.
            PdbGutenpalm => "application/vnd.palm",
            PdbPalmdoc => "application/x-palmdoc",
            PdbPlucker => "application/vnd.plucker",
            Lit => "application/x-ms-reader",
            Gif87a => "image/gif",
            Gif89a => "image/gif",
            JpegJfif => "image/jpeg",
            JpegExif => "image/jpeg",
            Png => "image/png",
            Flac => "audio/flac",
            M4a => "audio/mp4",
            Mp3_1 => "audio/mpeg",
            Id3v22 => "audio/mpeg",
            Id3v23 => "audio/mpeg",
            Id3v24 => "audio/mpeg",
            M4v1 => "video/mp4",
            M4v2 => "video/mp4",
            M4v => "video/x-m4v",
            Mkv => "video/x-matroska",
            WebM => "video/webm",
            Avi => "video/x-msvideo",
            Pdf => "application/pdf",
            Zip09 | Zip10 | Zip11 | Zip20 | Zip30 => "application/zip",
            Opf2 => "application/oebps-package+xml",
            Svg => "image/svg+xml",
            Xhtml => "application/xhtml+xml",
            Html => "text/html",
            Xml => "application/xml",
        }
    }

    pub fn description(self) -> &'static str {
        use FileType::*;
        match self {
            Epub2 => "EPUB 2 e-book",
            Mobi => "Mobipocket/MOBI e-book",
            PdbEreader => "eReader PDB document",
            PdbGutenpalm => "GutenPalm PDB document",
            PdbPalmdoc => "PalmDOC PDB document",
            PdbPlucker => "Plucker PDB document",
            Lit => "Microsoft Reader LIT e-book",
            Gif87a => "GIF image, version 87a",
            Gif89a => "GIF image, version 89a",
            JpegJfif => "JPEG image (JFIF)",
            JpegExif => "JPEG image (Exif)",
            Png => "PNG image",
            Flac => "FLAC audio",
            M4a => "MPEG-4 audio",
            Mp3_1 => "MPEG audio, version 1",
            Id3v22 => "MP3 audio with ID3v2.2 tag",
            Id3v23 => "MP3 audio with ID3v2.3 tag",
            Id3v24 => "MP3 audio with ID3v2.4 tag",
            M4v1 => "MPEG-4 video, ISO base media v1",
            M4v2 => "MPEG-4 video, ISO base media v2",
            M4v => "M4V video",
            Mkv => "Matroska video",
            WebM => "WebM video",
            Avi => "AVI video",
            Pdf => "PDF document",
            Zip09 => "ZIP archive, version 0.9",
            Zip10 => "ZIP archive, version 1.0",
            Zip11 => "ZIP archive, version 1.1",
            Zip20 => "ZIP archive, version 2.0",
            Zip30 => "ZIP archive, version 3.0",
            Opf2 => "OPF 2.0 package document",
            Svg => "SVG image",
            Xhtml => "XHTML document",
            Html => "HTML document",
            Xml => "XML document",
        }
    }

    pub fn is_ebook(self) -> bool {
        self.category_path().starts_with("ebook.")
    }

    pub fn is_audio(self) -> bool {
        self.category_path().starts_with("audio.")
    }

    pub fn is_image(self) -> bool {
        self.category_path().starts_with("image.")
    }

    pub fn is_video(self) -> bool {
        self.category_path().starts_with("video.")
    }
}
