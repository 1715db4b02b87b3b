//! Timesheet lifecycle state machine.
//!
//! One timesheet covers one employee's one week and moves through
//! `DRAFT -> SUBMITTED -> {APPROVED, REJECTED}`. Entries are mutable only
//! while the sheet is in DRAFT. Neither APPROVED nor REJECTED has an
//! outgoing edge in this engine; reopening a rejected week is a product
//! decision that has deliberately not been taken.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Approval status of a weekly timesheet.
///
/// Stored in PostgreSQL as the `timesheet_status` enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "timesheet_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum TimesheetStatus {
    /// Initial status; the only status in which entries may change.
    Draft,
    /// Waiting for the owner's manager to approve or reject.
    Submitted,
    Approved,
    Rejected,
}

/// The three actions that drive the timesheet lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimesheetAction {
    Submit,
    Approve,
    Reject,
}

impl TimesheetStatus {
    /// Apply a lifecycle action, returning the next status.
    ///
    /// Fails with [`CoreError::InvalidTransition`] when no edge exists for
    /// the (status, action) pair. Authorization is checked separately in
    /// [`crate::authz`] before this is consulted.
    pub fn apply(self, action: TimesheetAction) -> Result<TimesheetStatus, CoreError> {
        match (self, action) {
            (TimesheetStatus::Draft, TimesheetAction::Submit) => Ok(TimesheetStatus::Submitted),
            (TimesheetStatus::Submitted, TimesheetAction::Approve) => Ok(TimesheetStatus::Approved),
            (TimesheetStatus::Submitted, TimesheetAction::Reject) => Ok(TimesheetStatus::Rejected),
            (status, action) => Err(CoreError::InvalidTransition(format!(
                "Cannot {} a {} timesheet",
                action.verb(),
                status.as_str()
            ))),
        }
    }

    /// Whether time entries belonging to this sheet may be created,
    /// updated, or deleted.
    pub fn allows_entry_mutation(self) -> bool {
        self == TimesheetStatus::Draft
    }

    /// Stable uppercase name, matching both the database enum and the
    /// JSON representation.
    pub fn as_str(self) -> &'static str {
        match self {
            TimesheetStatus::Draft => "DRAFT",
            TimesheetStatus::Submitted => "SUBMITTED",
            TimesheetStatus::Approved => "APPROVED",
            TimesheetStatus::Rejected => "REJECTED",
        }
    }
}

impl std::fmt::Display for TimesheetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TimesheetAction {
    fn verb(self) -> &'static str {
        match self {
            TimesheetAction::Submit => "submit",
            TimesheetAction::Approve => "approve",
            TimesheetAction::Reject => "reject",
        }
    }
}

/// Validate the comment supplied with a rejection.
///
/// A rejection must tell the employee what to fix, so an empty or
/// whitespace-only comment fails with [`CoreError::Validation`] before
/// any state change happens.
pub fn validate_rejection_comment(comment: Option<&str>) -> Result<(), CoreError> {
    match comment {
        Some(c) if !c.trim().is_empty() => Ok(()),
        _ => Err(CoreError::Validation(
            "A rejection requires a non-empty comment".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::TimesheetAction::*;
    use super::TimesheetStatus::*;
    use super::*;

    #[test]
    fn test_defined_edges() {
        assert_eq!(Draft.apply(Submit).unwrap(), Submitted);
        assert_eq!(Submitted.apply(Approve).unwrap(), Approved);
        assert_eq!(Submitted.apply(Reject).unwrap(), Rejected);
    }

    #[test]
    fn test_every_undefined_edge_is_invalid_transition() {
        let defined = [(Draft, Submit), (Submitted, Approve), (Submitted, Reject)];
        for status in [Draft, Submitted, Approved, Rejected] {
            for action in [Submit, Approve, Reject] {
                if defined.contains(&(status, action)) {
                    continue;
                }
                let err = status.apply(action).unwrap_err();
                assert!(
                    matches!(err, CoreError::InvalidTransition(_)),
                    "{status:?} + {action:?} must be InvalidTransition"
                );
            }
        }
    }

    #[test]
    fn test_approved_and_rejected_are_terminal() {
        for status in [Approved, Rejected] {
            for action in [Submit, Approve, Reject] {
                assert!(status.apply(action).is_err());
            }
        }
    }

    #[test]
    fn test_only_draft_allows_entry_mutation() {
        assert!(Draft.allows_entry_mutation());
        assert!(!Submitted.allows_entry_mutation());
        assert!(!Approved.allows_entry_mutation());
        assert!(!Rejected.allows_entry_mutation());
    }

    #[test]
    fn test_rejection_comment_must_be_non_empty() {
        assert!(validate_rejection_comment(Some("incomplete")).is_ok());
        assert!(matches!(
            validate_rejection_comment(Some("")),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            validate_rejection_comment(Some("   ")),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            validate_rejection_comment(None),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_status_json_representation_is_uppercase() {
        assert_eq!(serde_json::to_value(Draft).unwrap(), "DRAFT");
        assert_eq!(serde_json::to_value(Submitted).unwrap(), "SUBMITTED");
        assert_eq!(serde_json::to_value(Approved).unwrap(), "APPROVED");
        assert_eq!(serde_json::to_value(Rejected).unwrap(), "REJECTED");
    }
}
