use crate::error::{MdtError, Result};
use crate::status::validate_transition;
use crate::types::Status;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// TicketKey
// ---------------------------------------------------------------------------

/// `PROJECT-NUMBER` identifier, displayed with the number padded to three
/// digits (`MDT-066`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TicketKey {
    pub project: String,
    pub number: u32,
}

static KEY_RE: OnceLock<Regex> = OnceLock::new();

fn key_re() -> &'static Regex {
    KEY_RE.get_or_init(|| Regex::new(r"^([A-Z]+)-(\d+)$").unwrap())
}

static KEY_PREFIX_RE: OnceLock<Regex> = OnceLock::new();

fn key_prefix_re() -> &'static Regex {
    KEY_PREFIX_RE.get_or_init(|| Regex::new(r"^([A-Za-z]+)-(\d+)(?:[-.]|$)").unwrap())
}

impl TicketKey {
    /// Accepts `MDT-66`, `mdt-066`, ` AAA-1 `.
    pub fn parse(input: &str) -> Result<Self> {
        let upper = input.trim().to_uppercase();
        let invalid = || MdtError::InvalidTicketKey(input.to_string());
        let caps = key_re().captures(&upper).ok_or_else(invalid)?;
        let number = caps[2].parse::<u32>().map_err(|_| invalid())?;
        Ok(Self {
            project: caps[1].to_string(),
            number,
        })
    }

    /// Key at the start of a ticket filename such as `MDT-012-improve-docs.md`.
    pub fn from_filename(name: &str) -> Option<Self> {
        let caps = key_prefix_re().captures(name)?;
        Some(Self {
            project: caps[1].to_uppercase(),
            number: caps[2].parse().ok()?,
        })
    }
}

impl fmt::Display for TicketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:03}", self.project, self.number)
    }
}

impl FromStr for TicketKey {
    type Err = MdtError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// ---------------------------------------------------------------------------
// Front matter
// ---------------------------------------------------------------------------

/// Split a leading `---` delimited metadata block from the body. Text without
/// a complete block is returned unchanged as the body.
pub fn split_frontmatter(text: &str) -> (Option<&str>, &str) {
    let Some(rest) = text
        .strip_prefix("---\n")
        .or_else(|| text.strip_prefix("---\r\n"))
    else {
        return (None, text);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return (Some(&rest[..offset]), &rest[offset + line.len()..]);
        }
        offset += line.len();
    }
    (None, text)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketMeta {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Kept as written so tickets with an unrecognized status still load.
    pub status: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub ticket_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

// ---------------------------------------------------------------------------
// Ticket
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub meta: TicketMeta,
    pub body: String,
    /// The metadata block exactly as read, delimiters included. Written back
    /// verbatim apart from targeted status edits.
    frontmatter: String,
}

static STATUS_LINE_RE: OnceLock<Regex> = OnceLock::new();

fn status_line_re() -> &'static Regex {
    STATUS_LINE_RE.get_or_init(|| Regex::new(r"(?m)^status:[^\r\n]*").unwrap())
}

impl Ticket {
    pub fn parse(text: &str) -> Result<Self> {
        let (yaml, body) = split_frontmatter(text);
        let yaml = yaml.ok_or(MdtError::MissingFrontmatter)?;
        let meta: TicketMeta = serde_yaml::from_str(yaml)?;
        Ok(Self {
            meta,
            body: body.to_string(),
            frontmatter: text[..text.len() - body.len()].to_string(),
        })
    }

    pub fn frontmatter(&self) -> &str {
        &self.frontmatter
    }

    pub fn render(&self) -> String {
        format!("{}{}", self.frontmatter, self.body)
    }

    pub fn status(&self) -> Result<Status> {
        Status::from_str(&self.meta.status)
    }

    /// Move to `requested` if the lifecycle allows it. Returns whether the
    /// stored status changed. Only the top-level `status:` line of the
    /// metadata block is rewritten.
    pub fn set_status(&mut self, requested: Status) -> Result<bool> {
        let current = self.status()?;
        validate_transition(current, requested)?;
        if current == requested {
            return Ok(false);
        }

        let line = format!("status: {requested}");
        self.frontmatter = match status_line_re().find(&self.frontmatter) {
            Some(m) => format!(
                "{}{}{}",
                &self.frontmatter[..m.start()],
                line,
                &self.frontmatter[m.end()..]
            ),
            None => insert_before_closing(&self.frontmatter, &line),
        };
        self.meta.status = requested.to_string();
        Ok(true)
    }
}

/// Add `line` as the last entry of a `---` delimited block.
fn insert_before_closing(block: &str, line: &str) -> String {
    let trimmed = block.trim_end_matches(['\r', '\n']);
    let closing = trimmed.rfind('\n').map_or(0, |i| i + 1);
    format!("{}{}\n{}", &block[..closing], line, &block[closing..])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
