//! Booking lifecycle states
//!
//! Persisted status strings are canonical and must survive round-trips:
//! `pending, assigned, started, completed, withdrawbefore24, withdrawafter24,
//! timedout`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Booking lifecycle state
///
/// `Completed` and `WithdrawBefore24` are terminal in normal flow.
/// `TimedOut` and `WithdrawAfter24` can still be moved by admin action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Assigned,
    Started,
    Completed,
    #[serde(rename = "withdrawbefore24")]
    WithdrawBefore24,
    #[serde(rename = "withdrawafter24")]
    WithdrawAfter24,
    #[serde(rename = "timedout")]
    TimedOut,
}

impl BookingStatus {
    /// Canonical on-disk token
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Assigned => "assigned",
            BookingStatus::Started => "started",
            BookingStatus::Completed => "completed",
            BookingStatus::WithdrawBefore24 => "withdrawbefore24",
            BookingStatus::WithdrawAfter24 => "withdrawafter24",
            BookingStatus::TimedOut => "timedout",
        }
    }

    /// Parse a canonical token back into a status
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BookingStatus::Pending),
            "assigned" => Some(BookingStatus::Assigned),
            "started" => Some(BookingStatus::Started),
            "completed" => Some(BookingStatus::Completed),
            "withdrawbefore24" => Some(BookingStatus::WithdrawBefore24),
            "withdrawafter24" => Some(BookingStatus::WithdrawAfter24),
            "timedout" => Some(BookingStatus::TimedOut),
            _ => None,
        }
    }

    /// No outgoing transition is defined for these in normal flow.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BookingStatus::Completed | BookingStatus::WithdrawBefore24
        )
    }

    /// States a booking can sit in while still awaiting or running a session.
    #[inline]
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            BookingStatus::Pending | BookingStatus::Assigned | BookingStatus::Started
        )
    }

    /// Statuses shown on the active-bookings listing.
    pub const OPEN: [BookingStatus; 3] = [
        BookingStatus::Pending,
        BookingStatus::Assigned,
        BookingStatus::Started,
    ];

    /// Statuses shown on the history listing.
    pub const HISTORIC: [BookingStatus; 4] = [
        BookingStatus::Completed,
        BookingStatus::WithdrawBefore24,
        BookingStatus::WithdrawAfter24,
        BookingStatus::TimedOut,
    ];
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookingStatus::parse(s).ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_tokens_roundtrip() {
        let all = [
            BookingStatus::Pending,
            BookingStatus::Assigned,
            BookingStatus::Started,
            BookingStatus::Completed,
            BookingStatus::WithdrawBefore24,
            BookingStatus::WithdrawAfter24,
            BookingStatus::TimedOut,
        ];

        for status in all {
            let token = status.as_str();
            let recovered = BookingStatus::parse(token).unwrap();
            assert_eq!(status, recovered);
        }
    }

    #[test]
    fn test_withdraw_tokens_have_no_separator() {
        // Compat: persisted literals never used snake_case.
        assert_eq!(BookingStatus::WithdrawBefore24.as_str(), "withdrawbefore24");
        assert_eq!(BookingStatus::WithdrawAfter24.as_str(), "withdrawafter24");
        assert_eq!(BookingStatus::TimedOut.as_str(), "timedout");
    }

    #[test]
    fn test_terminal_states() {
        assert!(BookingStatus::Completed.is_terminal());
        assert!(BookingStatus::WithdrawBefore24.is_terminal());

        assert!(!BookingStatus::Pending.is_terminal());
        assert!(!BookingStatus::Assigned.is_terminal());
        assert!(!BookingStatus::Started.is_terminal());
        assert!(!BookingStatus::WithdrawAfter24.is_terminal());
        assert!(!BookingStatus::TimedOut.is_terminal());
    }

    #[test]
    fn test_open_states() {
        assert!(BookingStatus::Pending.is_open());
        assert!(BookingStatus::Assigned.is_open());
        assert!(BookingStatus::Started.is_open());
        assert!(!BookingStatus::TimedOut.is_open());
    }

    #[test]
    fn test_invalid_token() {
        assert!(BookingStatus::parse("withdraw_before_24").is_none());
        assert!(BookingStatus::parse("").is_none());
        assert!(BookingStatus::parse("PENDING").is_none());
    }

    #[test]
    fn test_serde_uses_canonical_tokens() {
        let json = serde_json::to_string(&BookingStatus::WithdrawAfter24).unwrap();
        assert_eq!(json, "\"withdrawafter24\"");
        let back: BookingStatus = serde_json::from_str("\"timedout\"").unwrap();
        assert_eq!(back, BookingStatus::TimedOut);
    }
}
