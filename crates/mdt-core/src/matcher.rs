//! Locating sections from a user query.
//!
//! A plain query matches every section whose normalized heading contains the
//! normalized query. A hierarchical query (`Description / Problem Statement`)
//! is split into segments up front and compared segment by segment against
//! the outline's index paths, so it matches at most one section.

use crate::error::{MdtError, Result};
use crate::section::{Outline, Section, PATH_SEPARATOR};
use regex::Regex;
use std::sync::OnceLock;

static ORDINAL_RE: OnceLock<Regex> = OnceLock::new();

fn ordinal_re() -> &'static Regex {
    // "1. ", "2.3. " and "2.3 " but not a bare leading number like "2024 Roadmap".
    ORDINAL_RE.get_or_init(|| Regex::new(r"^(?:\d+(?:\.\d+)+\s+|\d+(?:\.\d+)*\.\s*)").unwrap())
}

/// Strip `#` markers and a leading ordinal, trim and lowercase.
pub fn normalize_heading(text: &str) -> String {
    let bare = text.trim().trim_start_matches('#').trim();
    ordinal_re().replace(bare, "").trim().to_lowercase()
}

// ---------------------------------------------------------------------------
// SectionQuery
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionQuery {
    Plain(String),
    Path(Vec<String>),
}

impl SectionQuery {
    pub fn parse(query: &str) -> Self {
        if query.contains(PATH_SEPARATOR) {
            let segments: Vec<String> = query
                .split(PATH_SEPARATOR)
                .map(normalize_heading)
                .filter(|s| !s.is_empty())
                .collect();
            if segments.len() > 1 {
                return SectionQuery::Path(segments);
            }
        }
        SectionQuery::Plain(normalize_heading(query))
    }

    /// Sections of `outline` matching this query. Path queries yield at most
    /// one section; a blank plain query yields none.
    pub fn find_in<'a>(&self, outline: &'a Outline) -> Vec<&'a Section> {
        match self {
            SectionQuery::Plain(q) => {
                if q.is_empty() {
                    return Vec::new();
                }
                outline
                    .sections()
                    .iter()
                    .filter(|s| normalize_heading(&s.header_text).contains(q.as_str()))
                    .collect()
            }
            SectionQuery::Path(segments) => outline
                .sections()
                .iter()
                .find(|s| path_matches(outline, s, segments))
                .into_iter()
                .collect(),
        }
    }
}

fn path_matches(outline: &Outline, section: &Section, segments: &[String]) -> bool {
    if section.path.len() != segments.len() {
        return false;
    }
    outline
        .path_sections(section)
        .iter()
        .zip(segments)
        .all(|(ancestor, seg)| normalize_heading(&ancestor.header_text).contains(seg.as_str()))
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Matches for `query` within an already parsed outline.
///
/// A hierarchical query with no match is retried as a plain query over the
/// whole string, which keeps headings that contain the separator reachable.
pub fn find_in_outline<'a>(outline: &'a Outline, query: &str) -> Vec<&'a Section> {
    let parsed = SectionQuery::parse(query);
    let found = parsed.find_in(outline);
    if found.is_empty() && matches!(parsed, SectionQuery::Path(_)) {
        return SectionQuery::Plain(normalize_heading(query)).find_in(outline);
    }
    found
}

/// Raw match set for `query`. Zero matches means not found; several
/// matches are left for the caller to disambiguate.
pub fn find_sections(text: &str, query: &str) -> Vec<Section> {
    let outline = Outline::parse(text);
    find_in_outline(&outline, query)
        .into_iter()
        .cloned()
        .collect()
}

/// Resolve `query` to exactly one section, reporting the known headings on
/// a miss and the candidate paths when the query is ambiguous.
pub fn resolve_section(text: &str, query: &str) -> Result<Section> {
    let outline = Outline::parse(text);
    let found = find_in_outline(&outline, query);
    match found.as_slice() {
        [only] => Ok((*only).clone()),
        [] => Err(MdtError::SectionNotFound {
            query: query.to_string(),
            available: outline
                .sections()
                .iter()
                .map(|s| s.header_text.clone())
                .collect(),
        }),
        many => Err(MdtError::AmbiguousSection {
            query: query.to_string(),
            candidates: many.iter().map(|s| outline.path_display(s)).collect(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
