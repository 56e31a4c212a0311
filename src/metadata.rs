//! The normalized, fixed-shape ebook metadata record and the small
//! parsing helpers metadata processors share.
//!
//! Grounded on `biblio/ebook.py` (`AUTHORS_PATTERN`, `parse_ebook_authors`,
//! `UNDEFINED_DATE`, `parse_ebook_date`) for the normalization rules, and
//! on spec §3's restricted attribute set for the struct shape — a fixed
//! struct rather than the original's open `Storage` bag, per Design
//! Notes §9.

use chrono::{DateTime, TimeZone, Utc};
use indexmap::{IndexMap, IndexSet};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// A normalized bibliographic record. Every field but `filetype` is
/// optional or an empty collection — there is no dynamic "unknown field"
/// path, since this is a concrete struct rather than an open map.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct EbookMetadata {
    pub filetype: Option<crate::identify::FileType>,
    pub title: Option<String>,
    pub title_sort: Option<String>,
    pub authors: Vec<String>,
    pub series: Option<String>,
    pub series_index: Option<f64>,
    pub publisher: Option<String>,
    pub date_published: Option<DateTime<Utc>>,
    pub date_original: Option<DateTime<Utc>>,
    pub identifiers: IndexMap<String, String>,
    pub description: Option<String>,
    pub rights: Option<String>,
    pub languages: Vec<String>,
    pub tags: IndexSet<String>,
    pub contributors: Vec<String>,
}

impl std::fmt::Display for EbookMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Filetype:        {:?}
Title:           {}
Title sort:      {}
Authors:         {}
Series:          {}
Series index:    {}
Publisher:       {}
Date published:  {}
Date original:   {}
Identifiers:     {:?}
Description:     {}
Rights:          {}
Languages:       {:?}
Tags:            {:?}
Contributors:    {:?}",
            self.filetype,
            self.title.as_deref().unwrap_or("-"),
            self.title_sort.as_deref().unwrap_or("-"),
            self.authors.join("; "),
            self.series.as_deref().unwrap_or("-"),
            self.series_index
                .map(|i| i.to_string())
                .unwrap_or_else(|| "-".to_string()),
            self.publisher.as_deref().unwrap_or("-"),
            self.date_published
                .map(|d| d.to_rfc3339())
                .unwrap_or_else(|| "-".to_string()),
            self.date_original
                .map(|d| d.to_rfc3339())
                .unwrap_or_else(|| "-".to_string()),
            self.identifiers,
            self.description.as_deref().unwrap_or("-"),
            self.rights.as_deref().unwrap_or("-"),
            self.languages,
            self.tags,
            self.contributors,
        )
    }
}

fn authors_separator() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i),?\s+(and|with|&)\s+").unwrap())
}

/// Splits a free-form authors string into individual names. Separators
/// recognized: `;`, and the case-insensitive connectives `and`/`with`/`&`
/// (optionally preceded by a comma), matching `AUTHORS_PATTERN` in the
/// reference implementation.
pub fn parse_ebook_authors(authors_string: &str) -> Vec<String> {
    if authors_string.trim().is_empty() {
        return Vec::new();
    }
    let normalized = authors_separator().replace_all(authors_string, ";");
    normalized
        .split(';')
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .collect()
}

/// The sentinel returned by [`parse_ebook_date`] for an empty input,
/// matching the reference implementation's `UNDEFINED_DATE` (year 101,
/// UTC) rather than `None` — callers that need to detect "no date" check
/// against this constant.
pub fn undefined_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(101, 1, 1, 0, 0, 0).unwrap()
}

/// Tolerantly parses a handful of common date formats found in EXTH/OPF
/// metadata (`YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SSZ`, `YYYY`), returning
/// [`undefined_date`] for an empty string rather than `None` or an error,
/// matching `parse_ebook_date`'s behavior in the reference
/// implementation. A string that matches none of the recognized formats
/// also returns the sentinel — callers that need to distinguish "no
/// date" from "unparsable date" should check the input themselves before
/// calling this.
pub fn parse_ebook_date(date_string: &str) -> DateTime<Utc> {
    let trimmed = date_string.trim();
    if trimmed.is_empty() {
        return undefined_date();
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap());
    }
    if let Ok(year) = trimmed.parse::<i32>() {
        if let Some(dt) = Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).single() {
            return dt;
        }
    }

    undefined_date()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_semicolon_and_connectives() {
        assert_eq!(
            parse_ebook_authors("Tolkien, J.R.R. and Christopher Tolkien"),
            vec!["Tolkien, J.R.R.".to_string(), "Christopher Tolkien".to_string()]
        );
        assert_eq!(
            parse_ebook_authors("Adams, Douglas; Carwardine, Mark"),
            vec!["Adams, Douglas".to_string(), "Carwardine, Mark".to_string()]
        );
        assert_eq!(
            parse_ebook_authors("A & B with C"),
            vec!["A".to_string(), "B".to_string(), "C".to_string()]
        );
    }

    #[test]
    fn empty_authors_string_yields_no_authors() {
        assert!(parse_ebook_authors("").is_empty());
        assert!(parse_ebook_authors("   ").is_empty());
    }

    #[test]
    fn empty_date_string_is_the_undefined_sentinel() {
        assert_eq!(parse_ebook_date(""), undefined_date());
    }

    #[test]
    fn full_date_and_bare_year_both_parse() {
        let full = parse_ebook_date("2011-05-17");
        assert_eq!(full.format("%Y-%m-%d").to_string(), "2011-05-17");

        let year_only = parse_ebook_date("1954");
        assert_eq!(year_only.format("%Y").to_string(), "1954");
    }

    #[test]
    fn rfc3339_timestamps_normalize_to_utc() {
        let dt = parse_ebook_date("2011-05-17T08:00:00+02:00");
        assert_eq!(dt.format("%Y-%m-%dT%H:%M:%S").to_string(), "2011-05-17T06:00:00");
    }
}
