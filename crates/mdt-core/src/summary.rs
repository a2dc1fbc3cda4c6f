//! Short extractive summaries of a ticket's Description and Rationale.
//!
//! Lines are picked, never generated: headings, list items, bold labels and
//! template boilerplate are skipped, and up to three long prose lines are
//! kept. When none qualify the first plain sentence is used instead. The
//! result is cut at a word boundary to stay short enough for one line.

use crate::matcher::resolve_section;
use crate::section::parse_heading;
use tracing::debug;

pub const NO_CONTENT: &str = "No content available for summary";
pub const NO_SUMMARY: &str = "Unable to generate summary from content";

const SOURCE_SECTIONS: &[&str] = &["Description", "Rationale"];
const MAX_LINES: usize = 3;
const MIN_PROSE_CHARS: usize = 20;
const MIN_KEPT_CHARS: usize = 30;

/// Template headings; once one is seen the rest of the text is skipped.
const TEMPLATE_HEADINGS: &[&str] = &[
    "problem statement",
    "current state",
    "desired state",
    "solution analysis",
    "implementation",
    "acceptance criteria",
];

const BOILERPLATE: &[&str] = &[
    "efficiency:",
    "oversight:",
    "consistency:",
    "scalability:",
    "each project has its own",
    "users must manually navigate",
];

const GENERIC_PHRASES: &[&str] = &["managing multiple projects", "each project has", "users must"];

/// Description and Rationale contents joined by a blank line, or the title
/// when the body has neither.
pub fn summary_source(body: &str, title: Option<&str>) -> Option<String> {
    let parts: Vec<String> = SOURCE_SECTIONS
        .iter()
        .filter_map(|name| match resolve_section(body, name) {
            Ok(section) => Some(section.content),
            Err(e) => {
                debug!(section = %name, error = %e, "summary source section unavailable");
                None
            }
        })
        .filter(|content| !content.is_empty())
        .collect();

    if !parts.is_empty() {
        return Some(parts.join("\n\n"));
    }
    title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

pub fn ticket_summary(body: &str, title: Option<&str>) -> String {
    match summary_source(body, title) {
        Some(content) => summarize(&content),
        None => NO_CONTENT.to_string(),
    }
}

pub fn summarize(content: &str) -> String {
    let lines = prose_lines(content);
    if !lines.is_empty() {
        return format_summary(&lines);
    }
    let sentences = first_sentence(content);
    if !sentences.is_empty() {
        return format_summary(&sentences);
    }
    NO_SUMMARY.to_string()
}

fn prose_lines(content: &str) -> Vec<String> {
    let mut kept = Vec::new();
    let mut in_template_section = false;

    for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if is_skipped(line) {
            if is_template_heading(line) {
                in_template_section = true;
            }
            continue;
        }
        if in_template_section {
            continue;
        }
        if line.chars().count() > MIN_PROSE_CHARS && !line.starts_with('-') {
            let clean = line.replace('*', "");
            let clean = clean.trim();
            if clean.chars().count() > MIN_KEPT_CHARS {
                kept.push(clean.to_string());
            }
        }
        if kept.len() >= MAX_LINES {
            break;
        }
    }
    kept
}

fn is_skipped(line: &str) -> bool {
    if line.starts_with('#') || (line.starts_with("**") && line.ends_with("**")) {
        return true;
    }
    let lower = line.to_lowercase();
    if is_template_heading(line) || lower.contains("rationale") {
        return true;
    }
    if line.starts_with(['-', '*', '•']) {
        return true;
    }
    BOILERPLATE.iter().any(|k| lower.contains(k))
}

fn is_template_heading(line: &str) -> bool {
    let lower = line.to_lowercase();
    TEMPLATE_HEADINGS.iter().any(|h| lower.contains(h))
}

/// The first sentence over the prose threshold, preferring one without
/// generic phrasing. Heading lines are dropped before splitting.
fn first_sentence(content: &str) -> Vec<String> {
    let text = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && parse_heading(l).is_none())
        .collect::<Vec<_>>()
        .join(" ");
    let sentences: Vec<&str> = text
        .split(". ")
        .map(str::trim)
        .filter(|s| s.chars().count() > MIN_PROSE_CHARS)
        .collect();

    let specific = sentences.iter().take(MAX_LINES).find(|s| {
        let lower = s.to_lowercase();
        !GENERIC_PHRASES.iter().any(|p| lower.contains(p))
    });
    specific
        .or(sentences.first())
        .map(|s| vec![s.to_string()])
        .unwrap_or_default()
}

/// The first two entries joined by a space. Over 150 characters the text is
/// cut back to the last word within 150, over 120 to the last word within
/// 120, and `...` is appended.
pub fn format_summary(sentences: &[String]) -> String {
    if sentences.is_empty() {
        return NO_SUMMARY.to_string();
    }
    let text = sentences[..sentences.len().min(2)].join(" ");
    let len = text.chars().count();
    if len > 150 {
        truncate_at_word(&text, 150)
    } else if len > 120 {
        truncate_at_word(&text, 120)
    } else {
        text
    }
}

fn truncate_at_word(text: &str, limit: usize) -> String {
    let cut: String = text.chars().take(limit).collect();
    let head = cut.rsplit_once(' ').map_or(cut.as_str(), |(head, _)| head);
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_long_prose_lines_and_skips_noise() {
        let content = "\
**Context**
- a bullet that is certainly long enough to be kept otherwise
Short line here.
Ticket titles are re-read from disk on every board refresh.
Efficiency: measured across many projects and many tickets
";
        assert_eq!(
            summarize(content),
            "Ticket titles are re-read from disk on every board refresh."
        );
    }

    #[test]
    fn at_most_two_lines_are_joined() {
        let content = "\
The first sentence is comfortably long enough.
The second sentence is also long enough here.
A third long line that never makes the summary.
";
        assert_eq!(
            summarize(content),
            "The first sentence is comfortably long enough. \
             The second sentence is also long enough here."
        );
    }

    #[test]
    fn template_heading_stops_line_extraction() {
        let content = "\
### Problem Statement
Docs are stale and nobody knows which page is current.
";
        // Falls through to the sentence pass, which ignores headings.
        assert_eq!(
            summarize(content),
            "Docs are stale and nobody knows which page is current."
        );
    }

    #[test]
    fn sentence_pass_prefers_specific_sentences() {
        let content = "### Current State\n\
                       Users must click through every project by hand. \
                       The board should group tickets by owner instead";
        assert_eq!(
            summarize(content),
            "The board should group tickets by owner instead"
        );
    }

    #[test]
    fn nothing_usable() {
        assert_eq!(summarize("Too short.\n- list"), NO_SUMMARY);
        assert_eq!(format_summary(&[]), NO_SUMMARY);
    }

    #[test]
    fn truncation_limits() {
        let words = |n: usize| vec!["abcd ".repeat(n).trim_end().to_string()];

        // 25 words of 4 chars: 124 chars, cut back within 120.
        let medium = format_summary(&words(25));
        assert_eq!(medium, format!("{}...", "abcd ".repeat(24).trim_end()));

        // 40 words: 199 chars, cut back within 150.
        let long = format_summary(&words(40));
        assert_eq!(long, format!("{}...", "abcd ".repeat(30).trim_end()));

        // 24 words: 119 chars, untouched.
        assert_eq!(format_summary(&words(24)), words(24)[0]);
    }

    const BODY: &str = "\
# Cache titles

## 1. Description
The board reads every ticket file whenever a title is displayed.

## 2. Rationale
Caching titles keeps large projects responsive.

## 3. Acceptance
Nothing.
";

    #[test]
    fn source_is_description_then_rationale() {
        assert_eq!(
            summary_source(BODY, Some("Cache titles")).unwrap(),
            "The board reads every ticket file whenever a title is displayed.\n\n\
             Caching titles keeps large projects responsive."
        );
        assert_eq!(
            ticket_summary(BODY, None),
            "The board reads every ticket file whenever a title is displayed. \
             Caching titles keeps large projects responsive."
        );
    }

    #[test]
    fn source_falls_back_to_title() {
        let body = "# Cache titles\n\n## Notes\nnone\n";
        assert_eq!(summary_source(body, Some(" Cache titles ")).unwrap(), "Cache titles");
        assert!(summary_source(body, Some("  ")).is_none());
        assert_eq!(ticket_summary(body, None), NO_CONTENT);
    }
}
