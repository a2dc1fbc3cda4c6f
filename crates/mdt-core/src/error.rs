use thiserror::Error;

#[derive(Debug, Error)]
pub enum MdtError {
    #[error("section not found: '{query}' (available: {})", .available.join(", "))]
    SectionNotFound {
        query: String,
        available: Vec<String>,
    },

    #[error("section query '{query}' is ambiguous; use a hierarchical path: {}", .candidates.join("; "))]
    AmbiguousSection {
        query: String,
        candidates: Vec<String>,
    },

    #[error("section '{header}' no longer starts at line {line}; re-read the document")]
    StaleSection { header: String, line: usize },

    #[error("unknown section operation '{0}': expected replace, append or prepend")]
    UnknownOperation(String),

    #[error("invalid status transition from '{from}' to '{to}' (valid next states: {})", .valid.join(", "))]
    InvalidTransition {
        from: String,
        to: String,
        valid: Vec<String>,
    },

    #[error("unknown status: '{0}'")]
    InvalidStatus(String),

    #[error("invalid ticket format: '{0}'. Expected format: PROJECT-NUMBER (e.g., MDT-066)")]
    InvalidTicketKey(String),

    #[error("ticket not found: {0}")]
    TicketNotFound(String),

    #[error("ticket has no front matter block")]
    MissingFrontmatter,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, MdtError>;
