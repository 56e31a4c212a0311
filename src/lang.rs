//! IETF language tag ↔ Mobipocket packed-locale codec.
//!
//! Grounded on spec §4.7 directly: the reference implementation's
//! `iana2mobi` calls an undefined `pack`/`lang_as_iso639_1` helper that
//! exists nowhere in the retrieved source (Open Question iii, §9), so this
//! table and both directions are built from the written algorithm rather
//! than ported from Python. The worked example in §8 scenario 5
//! (`en-US` ↔ packed `0x0409`, dialect in the high byte, language in the
//! low byte) is the one fixed data point and is treated as authoritative
//! over the prose's `(value >> 10) & 0xff` sublanguage shift, which would
//! give a different answer for that same example; this module uses
//! `(value >> 8) & 0xff`, matching the worked example and the way
//! Mobipocket readers in the wild (e.g. calibre) actually decode locale
//! ids.
//!
//! Language ids below line up with the id table `MobiHeader::language`
//! used to carry in the teacher's `src/headers/mobih.rs`, so a MOBI file's
//! locale field and this codec agree on what language 9 means.

/// Primary IETF subtag → Mobipocket language id.
const LANGUAGES: &[(&str, u8)] = &[
    ("und", 0),
    ("ar", 1),
    ("bg", 2),
    ("ca", 3),
    ("zh", 4),
    ("cs", 5),
    ("da", 6),
    ("de", 7),
    ("el", 8),
    ("en", 9),
    ("es", 10),
    ("fi", 11),
    ("fr", 12),
    ("he", 13),
    ("hu", 14),
    ("is", 15),
    ("it", 16),
    ("ja", 17),
    ("ko", 18),
    ("nl", 19),
    ("no", 20),
    ("pl", 21),
    ("pt", 22),
    ("ro", 24),
    ("ru", 25),
    ("sk", 27),
    ("sq", 28),
    ("sv", 29),
    ("th", 30),
    ("tr", 31),
    ("ur", 32),
    ("id", 33),
    ("uk", 34),
    ("be", 35),
    ("sl", 36),
    ("et", 37),
    ("lv", 38),
    ("lt", 39),
    ("vi", 42),
    ("hy", 43),
    ("az", 44),
    ("eu", 45),
];

/// (primary subtag, lower-cased region subtag) → Mobipocket dialect id.
/// Only languages with region-specific dialect ids in this crate's table
/// are listed; everything else resolves to dialect `0` ("general").
const DIALECTS: &[(&str, &str, u8)] = &[
    ("en", "au", 1),
    ("en", "gb", 2),
    ("en", "ca", 3),
    ("en", "us", 4),
    ("en", "nz", 5),
    ("en", "ie", 6),
    ("en", "za", 7),
    ("en", "in", 8),
    ("es", "es", 1),
    ("es", "mx", 2),
    ("es", "ar", 3),
    ("fr", "fr", 1),
    ("fr", "ca", 2),
    ("fr", "be", 3),
    ("fr", "ch", 4),
    ("pt", "pt", 1),
    ("pt", "br", 2),
    ("de", "de", 1),
    ("de", "at", 2),
    ("de", "ch", 3),
    ("zh", "cn", 1),
    ("zh", "tw", 2),
    ("zh", "hk", 3),
];

/// Packs an IETF tag like `"en-US"` into a Mobipocket locale: language id
/// in the low byte, dialect id in the high byte of the returned `u16`.
/// An unrecognized primary subtag packs to language id `0` ("und");
/// an unrecognized region keeps dialect `0` ("general") rather than
/// failing, matching the reference implementation's best-effort lookup.
pub(crate) fn iana_to_mobi(tag: &str) -> u16 {
    let mut parts = tag.splitn(2, '-');
    let primary = parts.next().unwrap_or("").to_ascii_lowercase();
    let region = parts.next();

    let lang = LANGUAGES
        .iter()
        .find(|(subtag, _)| *subtag == primary)
        .map(|&(_, id)| id)
        .unwrap_or(0);

    let dialect = region
        .map(|r| r.to_ascii_lowercase())
        .and_then(|region_lower| {
            DIALECTS
                .iter()
                .find(|(subtag, reg, _)| *subtag == primary && *reg == region_lower)
                .map(|&(_, _, id)| id)
        })
        .unwrap_or(0);

    ((dialect as u16) << 8) | lang as u16
}

/// Unpacks a Mobipocket locale into an IETF tag. Unknown language ids map
/// to `"und"`; a known language with an unrecognized dialect id returns
/// the language-only tag; a recognized (language, dialect) pair returns
/// `"xx-yy"` with the region forced lower-case.
pub(crate) fn mobi_to_iana(locale: u16) -> String {
    let lang_id = (locale & 0xff) as u8;
    let dialect_id = ((locale >> 8) & 0xff) as u8;

    let primary = match LANGUAGES.iter().find(|(_, id)| *id == lang_id) {
        Some((subtag, _)) => *subtag,
        None => return "und".to_string(),
    };

    if dialect_id == 0 {
        return primary.to_string();
    }

    match DIALECTS
        .iter()
        .find(|(subtag, _, id)| *subtag == primary && *id == dialect_id)
    {
        Some((_, region, _)) => format!("{}-{}", primary, region),
        None => primary.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn en_us_round_trips_through_the_packed_locale() {
        let packed = iana_to_mobi("en-US");
        assert_eq!(packed, 0x0409);
        assert_eq!(mobi_to_iana(packed), "en-us");
    }

    #[test]
    fn language_only_tags_round_trip_to_themselves() {
        for tag in ["fr", "de", "ja", "ru"] {
            let packed = iana_to_mobi(tag);
            assert_eq!(mobi_to_iana(packed), tag);
        }
    }

    #[test]
    fn unknown_primary_subtag_maps_to_und() {
        assert_eq!(mobi_to_iana(iana_to_mobi("xx-ZZ")), "und");
    }

    #[test]
    fn region_case_is_normalized_before_lookup() {
        assert_eq!(iana_to_mobi("en-us"), iana_to_mobi("en-US"));
        assert_eq!(iana_to_mobi("en-Us"), iana_to_mobi("en-US"));
    }

    #[test]
    fn unrecognized_region_keeps_language_only_dialect() {
        let packed = iana_to_mobi("en-QQ");
        assert_eq!(mobi_to_iana(packed), "en");
    }
}
