//! Heading outline of a ticket body.
//!
//! A single pass over the lines keeps a stack of open headings. A new
//! heading closes every open heading of equal or deeper level, so skipped
//! levels (`#` directly followed by `####`) nest correctly without any
//! assumption about contiguous depth.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Separator used when rendering a hierarchical path and when splitting a
/// hierarchical query.
pub const PATH_SEPARATOR: &str = " / ";

// ---------------------------------------------------------------------------
// Section
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Heading line as written, including its `#` markers.
    pub header_text: String,
    /// Number of leading `#` characters (1-6).
    pub header_level: u8,
    /// Line index of the heading itself.
    pub start_line: usize,
    /// Exclusive end: first line of the next heading of equal or shallower
    /// level, or the line count of the document.
    pub end_line: usize,
    /// Trimmed text between the heading and `end_line`. Nested subsections
    /// are part of this text.
    pub content: String,
    /// Index of the enclosing section in the outline.
    pub parent: Option<usize>,
    /// Outline indices from the outermost ancestor down to this section.
    pub path: Vec<usize>,
}

impl Section {
    /// Heading text without the `#` markers.
    pub fn name(&self) -> &str {
        self.header_text.trim_start_matches('#').trim()
    }
}

// ---------------------------------------------------------------------------
// Heading recognition
// ---------------------------------------------------------------------------

static HEADING_RE: OnceLock<Regex> = OnceLock::new();

fn heading_re() -> &'static Regex {
    HEADING_RE.get_or_init(|| Regex::new(r"^(#{1,6})\s+(\S.*)$").unwrap())
}

/// Recognize a heading line, returning its level and text.
pub fn parse_heading(line: &str) -> Option<(u8, &str)> {
    let caps = heading_re().captures(line.trim_end())?;
    let level = caps.get(1)?.as_str().len() as u8;
    let text = caps.get(2)?.as_str().trim_end();
    Some((level, text))
}

// ---------------------------------------------------------------------------
// Outline
// ---------------------------------------------------------------------------

/// Every section of a document, in order of appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Outline {
    sections: Vec<Section>,
}

impl Outline {
    pub fn parse(text: &str) -> Self {
        let lines: Vec<&str> = text.split('\n').collect();
        let mut sections: Vec<Section> = Vec::new();
        let mut open: Vec<usize> = Vec::new();

        for (i, line) in lines.iter().enumerate() {
            let Some((level, _)) = parse_heading(line) else {
                continue;
            };

            while let Some(&top) = open.last() {
                if sections[top].header_level < level {
                    break;
                }
                open.pop();
                close(&mut sections[top], &lines, i);
            }

            let idx = sections.len();
            let mut path = open.clone();
            path.push(idx);
            sections.push(Section {
                header_text: line.trim_end().to_string(),
                header_level: level,
                start_line: i,
                end_line: lines.len(),
                content: String::new(),
                parent: open.last().copied(),
                path,
            });
            open.push(idx);
        }

        // EOF closes whatever is still open.
        for idx in open {
            close(&mut sections[idx], &lines, lines.len());
        }

        Self { sections }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn into_sections(self) -> Vec<Section> {
        self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn roots(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| s.parent.is_none())
    }

    pub fn children(&self, idx: usize) -> impl Iterator<Item = &Section> {
        self.sections
            .iter()
            .filter(move |s| s.parent == Some(idx))
    }

    /// Ancestor chain of `section` (outermost first), ending with the
    /// section itself.
    pub fn path_sections<'a>(&'a self, section: &'a Section) -> Vec<&'a Section> {
        section
            .path
            .iter()
            .filter_map(|&i| self.sections.get(i))
            .collect()
    }

    /// Hierarchical path as header texts, e.g.
    /// `## Description / ### Problem Statement`.
    pub fn path_display(&self, section: &Section) -> String {
        self.path_sections(section)
            .iter()
            .map(|s| s.header_text.as_str())
            .collect::<Vec<_>>()
            .join(PATH_SEPARATOR)
    }

    /// Heading names along the path, without `#` markers.
    pub fn path_names(&self, section: &Section) -> Vec<String> {
        self.path_sections(section)
            .iter()
            .map(|s| s.name().to_string())
            .collect()
    }
}

fn close(section: &mut Section, lines: &[&str], end: usize) {
    section.end_line = end;
    section.content = lines[section.start_line + 1..end]
        .join("\n")
        .trim()
        .to_string();
}

/// Every section of `text`, all heading levels, in document order.
pub fn list_sections(text: &str) -> Vec<Section> {
    Outline::parse(text).into_sections()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
