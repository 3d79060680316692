//! Admin edit patch and audit trail
//!
//! The patch is an immutable value object; diffing against the stored
//! booking is pure and produces the audit entries, so persistence and
//! notification side effects stay decoupled from the comparison logic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::models::Booking;
use super::status::BookingStatus;
use crate::core_types::{LanguageId, UserId};

/// Requested translator on an admin edit
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TranslatorRef {
    /// Field left empty - keep whoever is assigned.
    #[default]
    None,
    Id(UserId),
    Email(String),
}

impl TranslatorRef {
    /// Build from the two form fields; a non-empty email wins, a zero id
    /// means "unset".
    pub fn from_fields(id: Option<UserId>, email: Option<&str>) -> Self {
        match email {
            Some(e) if !e.is_empty() => TranslatorRef::Email(e.to_string()),
            _ => match id {
                Some(id) if id != 0 => TranslatorRef::Id(id),
                _ => TranslatorRef::None,
            },
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, TranslatorRef::None)
    }
}

/// Desired state submitted by an admin edit of a booking
#[derive(Debug, Clone, Default)]
pub struct BookingPatch {
    pub due: Option<DateTime<Utc>>,
    pub from_language_id: Option<LanguageId>,
    pub status: Option<BookingStatus>,
    pub translator: TranslatorRef,
    pub admin_comments: Option<String>,
    pub reference: Option<String>,
    /// Session length as submitted (`"HH:MM:SS"` or `"HH:MM"`), required
    /// when closing a started booking as completed.
    pub session_time: Option<String>,
}

impl BookingPatch {
    /// Non-empty admin comment, if one was submitted.
    pub fn comment(&self) -> Option<&str> {
        self.admin_comments.as_deref().filter(|c| !c.is_empty())
    }
}

/// One audited field change within an orchestrated update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub field: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

impl AuditEntry {
    pub fn new(
        field: impl Into<String>,
        old_value: Option<String>,
        new_value: Option<String>,
    ) -> Self {
        Self {
            field: field.into(),
            old_value,
            new_value,
        }
    }
}

/// Due-date diff: `Some(entry)` when the patch moves the date.
pub fn diff_due(booking: &Booking, patch: &BookingPatch) -> Option<AuditEntry> {
    let new_due = patch.due?;
    if new_due == booking.due {
        return None;
    }
    Some(AuditEntry::new(
        "due",
        Some(booking.due.to_rfc3339()),
        Some(new_due.to_rfc3339()),
    ))
}

/// Language diff: resolved names are filled in by the caller, the entry
/// carries the raw ids.
pub fn diff_language(booking: &Booking, patch: &BookingPatch) -> Option<AuditEntry> {
    let new_lang = patch.from_language_id?;
    if new_lang == booking.from_language_id {
        return None;
    }
    Some(AuditEntry::new(
        "from_language_id",
        Some(booking.from_language_id.to_string()),
        Some(new_lang.to_string()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::fixtures;
    use chrono::Duration;

    #[test]
    fn test_translator_ref_from_fields() {
        assert_eq!(TranslatorRef::from_fields(None, None), TranslatorRef::None);
        assert_eq!(TranslatorRef::from_fields(Some(0), None), TranslatorRef::None);
        assert_eq!(
            TranslatorRef::from_fields(Some(0), Some("")),
            TranslatorRef::None
        );
        assert_eq!(
            TranslatorRef::from_fields(Some(42), None),
            TranslatorRef::Id(42)
        );
        // Email wins over id
        assert_eq!(
            TranslatorRef::from_fields(Some(42), Some("t@example.com")),
            TranslatorRef::Email("t@example.com".into())
        );
    }

    #[test]
    fn test_diff_due_unchanged_is_none() {
        let booking = fixtures::booking();
        let patch = BookingPatch {
            due: Some(booking.due),
            ..Default::default()
        };
        assert!(diff_due(&booking, &patch).is_none());
        assert!(diff_due(&booking, &BookingPatch::default()).is_none());
    }

    #[test]
    fn test_diff_due_changed() {
        let booking = fixtures::booking();
        let new_due = booking.due + Duration::hours(2);
        let patch = BookingPatch {
            due: Some(new_due),
            ..Default::default()
        };
        let entry = diff_due(&booking, &patch).unwrap();
        assert_eq!(entry.field, "due");
        assert_eq!(entry.new_value, Some(new_due.to_rfc3339()));
    }

    #[test]
    fn test_diff_language() {
        let booking = fixtures::booking();
        let same = BookingPatch {
            from_language_id: Some(booking.from_language_id),
            ..Default::default()
        };
        assert!(diff_language(&booking, &same).is_none());

        let patch = BookingPatch {
            from_language_id: Some(booking.from_language_id + 1),
            ..Default::default()
        };
        let entry = diff_language(&booking, &patch).unwrap();
        assert_eq!(entry.field, "from_language_id");
    }

    #[test]
    fn test_comment_filters_empty() {
        let mut patch = BookingPatch::default();
        assert!(patch.comment().is_none());
        patch.admin_comments = Some(String::new());
        assert!(patch.comment().is_none());
        patch.admin_comments = Some("late arrival".into());
        assert_eq!(patch.comment(), Some("late arrival"));
    }
}
