//! Ticket status lifecycle.
//!
//! Every state lists its successors explicitly. The graph is complete:
//! reopening an implemented ticket or reverting a rejected one back to
//! proposed are both legal, and in practice only unknown status tokens fail.

use crate::error::{MdtError, Result};
use crate::types::Status;
use std::str::FromStr;

use Status::{Approved, Implemented, InProgress, OnHold, PartiallyImplemented, Proposed, Rejected};

/// States directly reachable from `from`. Self-transitions are not listed;
/// they are always accepted as a no-op by [`validate_transition`].
pub fn allowed_next(from: Status) -> &'static [Status] {
    match from {
        Proposed => &[Approved, InProgress, Implemented, Rejected, OnHold, PartiallyImplemented],
        Approved => &[Proposed, InProgress, Implemented, Rejected, OnHold, PartiallyImplemented],
        InProgress => &[Proposed, Approved, Implemented, Rejected, OnHold, PartiallyImplemented],
        Implemented => &[Proposed, Approved, InProgress, Rejected, OnHold, PartiallyImplemented],
        Rejected => &[Proposed, Approved, InProgress, Implemented, OnHold, PartiallyImplemented],
        OnHold => &[Proposed, Approved, InProgress, Implemented, Rejected, PartiallyImplemented],
        PartiallyImplemented => &[Proposed, Approved, InProgress, Implemented, Rejected, OnHold],
    }
}

pub fn can_transition(from: Status, to: Status) -> bool {
    from == to || allowed_next(from).contains(&to)
}

pub fn validate_transition(from: Status, to: Status) -> Result<()> {
    if can_transition(from, to) {
        return Ok(());
    }
    Err(MdtError::InvalidTransition {
        from: from.to_string(),
        to: to.to_string(),
        valid: allowed_next(from).iter().map(|s| s.to_string()).collect(),
    })
}

/// String-level entry point for callers holding raw front matter values.
/// Unrecognized tokens on either side fail with `InvalidStatus`.
pub fn validate_status_transition(current: &str, requested: &str) -> Result<()> {
    let from = Status::from_str(current)?;
    let to = Status::from_str(requested)?;
    validate_transition(from, to)
}
