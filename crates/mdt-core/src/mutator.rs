//! Rewriting one section of a document.
//!
//! The heading line is never touched; only the lines between it and
//! `end_line` are rebuilt. Replacing the body of a level-1 section with
//! nothing (or with a lone heading) keeps the existing subsection blocks
//! instead of erasing them.

use crate::error::{MdtError, Result};
use crate::section::{parse_heading, Section};
use crate::types::SectionOperation;
use std::str::FromStr;
use tracing::warn;

/// Apply `op` with `new_text` to `section` and return the full updated text.
///
/// `section` must come from parsing `text`; a descriptor whose heading is no
/// longer at `start_line` is rejected with `StaleSection`.
pub fn mutate_section(
    text: &str,
    section: &Section,
    op: SectionOperation,
    new_text: &str,
) -> Result<String> {
    let lines: Vec<&str> = text.split('\n').collect();
    check_current(&lines, section)?;

    let current = lines[section.start_line + 1..section.end_line].join("\n");
    let current = current.trim();
    let addition = new_text.trim();

    let body = match op {
        SectionOperation::Replace => replacement_body(section, current, addition),
        SectionOperation::Append => join_blocks([current, addition]),
        SectionOperation::Prepend => join_blocks([addition, current]),
    };

    Ok(splice(&lines, section, &body, text.ends_with('\n')))
}

/// String-typed operation kind, as received from a request. Anything other
/// than `replace`, `append` or `prepend` fails with `UnknownOperation`.
pub fn mutate_section_by_name(
    text: &str,
    section: &Section,
    op: &str,
    new_text: &str,
) -> Result<String> {
    let op = SectionOperation::from_str(op)?;
    mutate_section(text, section, op, new_text)
}

fn check_current(lines: &[&str], section: &Section) -> Result<()> {
    let header_matches = lines
        .get(section.start_line)
        .is_some_and(|l| l.trim_end() == section.header_text);
    if !header_matches || section.end_line > lines.len() || section.end_line <= section.start_line
    {
        return Err(MdtError::StaleSection {
            header: section.header_text.clone(),
            line: section.start_line,
        });
    }
    Ok(())
}

fn replacement_body(section: &Section, current: &str, addition: &str) -> String {
    let discards_children = addition.is_empty() || is_lone_heading(addition);
    if section.header_level != 1 || current.is_empty() || !discards_children {
        return addition.to_string();
    }

    let blocks = child_blocks(current);
    warn!(
        header = %section.header_text,
        preserved = blocks.len(),
        "replace would empty a top-level section; keeping its existing blocks"
    );
    let mut parts: Vec<&str> = Vec::with_capacity(blocks.len() + 1);
    parts.push(addition);
    parts.extend(blocks.iter().map(String::as_str));
    join_blocks(parts)
}

fn is_lone_heading(text: &str) -> bool {
    !text.contains('\n') && parse_heading(text).is_some()
}

/// Split `content` at its shallowest headings. Text before the first such
/// heading forms one leading block; deeper headings stay inside their block.
fn child_blocks(content: &str) -> Vec<String> {
    let lines: Vec<&str> = content.split('\n').collect();
    let Some(top) = lines
        .iter()
        .filter_map(|l| parse_heading(l).map(|(level, _)| level))
        .min()
    else {
        return vec![content.trim().to_string()];
    };

    let mut blocks: Vec<Vec<&str>> = vec![Vec::new()];
    for line in lines {
        let starts_block = parse_heading(line).is_some_and(|(level, _)| level == top);
        if starts_block {
            blocks.push(Vec::new());
        }
        if let Some(block) = blocks.last_mut() {
            block.push(line);
        }
    }

    blocks
        .into_iter()
        .map(|b| b.join("\n").trim().to_string())
        .filter(|b| !b.is_empty())
        .collect()
}

fn join_blocks<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn splice(lines: &[&str], section: &Section, body: &str, trailing_newline: bool) -> String {
    let rest = &lines[section.end_line..];
    let mut out: Vec<&str> = Vec::with_capacity(lines.len() + 1);
    out.extend_from_slice(&lines[..=section.start_line]);
    if !body.is_empty() {
        out.extend(body.split('\n'));
    }
    if !rest.is_empty() {
        out.push("");
        out.extend_from_slice(rest);
    } else if trailing_newline {
        out.push("");
    }
    out.join("\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::resolve_section;
    use crate::section::Outline;

    const DOC: &str = "\
## Description
Old description.

## Rationale
Because.
";

    fn apply(doc: &str, query: &str, op: SectionOperation, text: &str) -> String {
        let section = resolve_section(doc, query).unwrap();
        mutate_section(doc, &section, op, text).unwrap()
    }

    #[test]
    fn replace_keeps_header_and_neighbours() {
        let out = apply(DOC, "Description", SectionOperation::Replace, "  New text.\n");
        assert_eq!(out, "## Description\nNew text.\n\n## Rationale\nBecause.\n");
    }

    #[test]
    fn replace_then_read_back_is_idempotent() {
        let once = apply(DOC, "Rationale", SectionOperation::Replace, "\nFresh.\n\n");
        let twice = apply(&once, "Rationale", SectionOperation::Replace, "\nFresh.\n\n");
        assert_eq!(once, twice);
        assert_eq!(resolve_section(&once, "Rationale").unwrap().content, "Fresh.");
        assert!(once.ends_with("Fresh.\n"));
    }

    #[test]
    fn replace_with_empty_clears_non_title_section() {
        let out = apply(DOC, "Description", SectionOperation::Replace, "   ");
        assert_eq!(out, "## Description\n\n## Rationale\nBecause.\n");
        assert_eq!(resolve_section(&out, "Description").unwrap().content, "");
    }

    #[test]
    fn append_joins_with_blank_line() {
        let out = apply(DOC, "Description", SectionOperation::Append, " More. ");
        let section = resolve_section(&out, "Description").unwrap();
        assert_eq!(section.content, "Old description.\n\nMore.");
    }

    #[test]
    fn append_to_empty_section() {
        let doc = "## Notes\n## Next";
        let out = apply(doc, "Notes", SectionOperation::Append, "first");
        assert_eq!(out, "## Notes\nfirst\n\n## Next");
    }

    #[test]
    fn prepend_places_text_first() {
        let out = apply(DOC, "Rationale", SectionOperation::Prepend, "Summary.");
        let section = resolve_section(&out, "Rationale").unwrap();
        assert_eq!(section.content, "Summary.\n\nBecause.");
    }

    #[test]
    fn replace_drops_nested_subsections_below_top_level() {
        let doc = "## Description\n### Detail\nx\n## Rationale\ny";
        let out = apply(doc, "## Description", SectionOperation::Replace, "");
        assert_eq!(out, "## Description\n\n## Rationale\ny");
    }

    #[test]
    fn empty_replace_of_title_section_preserves_blocks() {
        let doc = "# Title\n## A\nfoo\n## B\nbar";
        let out = apply(doc, "# Title", SectionOperation::Replace, "");
        assert!(out.contains("## A\nfoo"), "{out}");
        assert!(out.contains("## B\nbar"), "{out}");
        assert!(out.starts_with("# Title\n"));
        assert_eq!(Outline::parse(&out).len(), 3);
    }

    #[test]
    fn heading_only_replace_of_title_section_prepends_heading() {
        let doc = "# Title\nIntro line.\n## A\nfoo\n### A.1\ndeep\n## B\nbar\n";
        let out = apply(doc, "# Title", SectionOperation::Replace, "## Summary");
        assert_eq!(
            out,
            "# Title\n## Summary\n\nIntro line.\n\n## A\nfoo\n### A.1\ndeep\n\n## B\nbar\n"
        );
    }

    #[test]
    fn real_content_replace_of_title_section_is_honoured() {
        let doc = "# Title\n## A\nfoo";
        let out = apply(doc, "# Title", SectionOperation::Replace, "Just this.");
        assert_eq!(out, "# Title\nJust this.");
    }

    #[test]
    fn stale_section_is_rejected() {
        let section = resolve_section(DOC, "Rationale").unwrap();
        let edited = format!("Preamble\n{DOC}");
        let err = mutate_section(&edited, &section, SectionOperation::Replace, "x").unwrap_err();
        assert!(matches!(err, MdtError::StaleSection { line: 3, .. }));
    }

    #[test]
    fn unknown_operation_fails_fast() {
        let section = resolve_section(DOC, "Rationale").unwrap();
        let err = mutate_section_by_name(DOC, &section, "delete", "x").unwrap_err();
        assert!(matches!(err, MdtError::UnknownOperation(op) if op == "delete"));
        let out = mutate_section_by_name(DOC, &section, "append", "x").unwrap();
        assert!(out.ends_with("Because.\n\nx\n"));
    }
}
