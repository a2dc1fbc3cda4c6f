use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Proposed,
    Approved,
    #[serde(rename = "In Progress")]
    InProgress,
    Implemented,
    Rejected,
    #[serde(rename = "On Hold")]
    OnHold,
    #[serde(rename = "Partially Implemented")]
    PartiallyImplemented,
}

impl Status {
    pub fn all() -> &'static [Status] {
        &[
            Status::Proposed,
            Status::Approved,
            Status::InProgress,
            Status::Implemented,
            Status::Rejected,
            Status::OnHold,
            Status::PartiallyImplemented,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Proposed => "Proposed",
            Status::Approved => "Approved",
            Status::InProgress => "In Progress",
            Status::Implemented => "Implemented",
            Status::Rejected => "Rejected",
            Status::OnHold => "On Hold",
            Status::PartiallyImplemented => "Partially Implemented",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Status {
    type Err = crate::error::MdtError;

    /// Accepts the display names case-insensitively, plus `_`/`-` spellings
    /// such as `in_progress` or `on-hold`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .map(|c| if c == '_' || c == '-' { ' ' } else { c })
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        Status::all()
            .iter()
            .copied()
            .find(|st| st.as_str().to_lowercase() == key)
            .ok_or_else(|| crate::error::MdtError::InvalidStatus(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// SectionOperation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionOperation {
    Replace,
    Append,
    Prepend,
}

impl SectionOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            SectionOperation::Replace => "replace",
            SectionOperation::Append => "append",
            SectionOperation::Prepend => "prepend",
        }
    }
}

impl fmt::Display for SectionOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SectionOperation {
    type Err = crate::error::MdtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "replace" => Ok(SectionOperation::Replace),
            "append" => Ok(SectionOperation::Append),
            "prepend" => Ok(SectionOperation::Prepend),
            _ => Err(crate::error::MdtError::UnknownOperation(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MdtError;
    use std::str::FromStr;

    #[test]
    fn status_roundtrip() {
        for status in Status::all() {
            assert_eq!(Status::from_str(status.as_str()).unwrap(), *status);
        }
    }

    #[test]
    fn status_alternate_spellings() {
        assert_eq!(Status::from_str("in_progress").unwrap(), Status::InProgress);
        assert_eq!(Status::from_str("on-hold").unwrap(), Status::OnHold);
        assert_eq!(
            Status::from_str("  partially   implemented ").unwrap(),
            Status::PartiallyImplemented
        );
    }

    #[test]
    fn status_unknown_token() {
        let err = Status::from_str("Done").unwrap_err();
        assert!(matches!(err, MdtError::InvalidStatus(s) if s == "Done"));
    }

    #[test]
    fn status_yaml_uses_display_names() {
        let yaml = serde_yaml::to_string(&Status::InProgress).unwrap();
        assert_eq!(yaml.trim(), "In Progress");
        let parsed: Status = serde_yaml::from_str("On Hold").unwrap();
        assert_eq!(parsed, Status::OnHold);
    }

    #[test]
    fn operation_rejects_unknown_kind() {
        assert_eq!(
            SectionOperation::from_str("append").unwrap(),
            SectionOperation::Append
        );
        let err = SectionOperation::from_str("delete").unwrap_err();
        assert!(matches!(err, MdtError::UnknownOperation(s) if s == "delete"));
    }
}
