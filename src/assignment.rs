//! Assignment ledger rules
//!
//! The ledger is append-and-close: taking a booking opens a row, losing it
//! stamps `cancel_at`, finishing it stamps `completed_at`. Rows are never
//! deleted, so the full custody history of a booking stays queryable.
//!
//! This module holds the pure reconciliation decision; the row writes live
//! in the store layer.

use crate::booking::{Assignment, AuditEntry};
use crate::core_types::UserId;

/// What the reconciliation pass decided to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileDecision {
    /// A custody change actually happened this cycle.
    pub changed: bool,
    /// Close this existing row (stamp `cancel_at`) before opening the new one.
    pub close_previous: Option<i64>,
    /// Open a fresh row for this translator.
    pub open_for: Option<UserId>,
    /// Audit trail entry describing the hand-over, when one happened.
    pub audit: Option<AuditEntry>,
}

impl ReconcileDecision {
    fn unchanged() -> Self {
        ReconcileDecision {
            changed: false,
            close_previous: None,
            open_for: None,
            audit: None,
        }
    }
}

/// Decide whether an edit's requested translator differs from the current
/// active holder. Requesting nobody never unassigns; requesting the current
/// holder again is idempotent.
pub fn reconcile(current: Option<&Assignment>, requested: Option<UserId>) -> ReconcileDecision {
    let Some(new_holder) = requested else {
        return ReconcileDecision::unchanged();
    };

    match current {
        Some(active) if active.translator_user_id == new_holder => {
            ReconcileDecision::unchanged()
        }
        Some(active) => ReconcileDecision {
            changed: true,
            close_previous: Some(active.id),
            open_for: Some(new_holder),
            audit: Some(AuditEntry::new(
                "translator",
                Some(active.translator_user_id.to_string()),
                Some(new_holder.to_string()),
            )),
        },
        None => ReconcileDecision {
            changed: true,
            close_previous: None,
            open_for: Some(new_holder),
            audit: Some(AuditEntry::new(
                "translator",
                None,
                Some(new_holder.to_string()),
            )),
        },
    }
}

/// An assignment row counts as active until it is cancelled or completed.
pub fn active_of(rows: &[Assignment]) -> Option<&Assignment> {
    rows.iter().find(|a| a.is_active())
}
