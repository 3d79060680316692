//! Booking error types
//!
//! Validation and business-rule failures are surfaced as structured values
//! by the operations themselves; these error types cover the cases that do
//! propagate - missing records, collaborator failures, corrupted data.

use thiserror::Error;

/// Booking engine error
#[derive(Error, Debug, Clone)]
pub enum BookingError {
    // === Lookup errors ===
    #[error("Booking not found: {0}")]
    BookingNotFound(i64),

    #[error("User not found: {0}")]
    UserNotFound(i64),

    #[error("No user with email: {0}")]
    EmailNotFound(String),

    #[error("No translator profile for user {0}")]
    ProfileNotFound(i64),

    #[error("Language not found: {0}")]
    LanguageNotFound(i32),

    // === Business-rule errors ===
    #[error("Only customers can create bookings")]
    NotACustomer,

    #[error("Booking {0} has no active assignment")]
    NoActiveAssignment(i64),

    #[error("Unknown booking status token: {0}")]
    InvalidStatus(String),

    // === Collaborator errors ===
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal system error: {0}")]
    SystemError(String),
}

impl BookingError {
    /// Error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            BookingError::BookingNotFound(_) => "BOOKING_NOT_FOUND",
            BookingError::UserNotFound(_) => "USER_NOT_FOUND",
            BookingError::EmailNotFound(_) => "EMAIL_NOT_FOUND",
            BookingError::ProfileNotFound(_) => "PROFILE_NOT_FOUND",
            BookingError::LanguageNotFound(_) => "LANGUAGE_NOT_FOUND",
            BookingError::NotACustomer => "NOT_A_CUSTOMER",
            BookingError::NoActiveAssignment(_) => "NO_ACTIVE_ASSIGNMENT",
            BookingError::InvalidStatus(_) => "INVALID_STATUS",
            BookingError::DatabaseError(_) => "DATABASE_ERROR",
            BookingError::SystemError(_) => "SYSTEM_ERROR",
        }
    }

    /// HTTP status code suggestion
    pub fn http_status(&self) -> u16 {
        match self {
            BookingError::BookingNotFound(_)
            | BookingError::UserNotFound(_)
            | BookingError::EmailNotFound(_)
            | BookingError::ProfileNotFound(_)
            | BookingError::LanguageNotFound(_) => 404,
            BookingError::NotACustomer | BookingError::NoActiveAssignment(_) => 422,
            BookingError::InvalidStatus(_) => 400,
            BookingError::DatabaseError(_) | BookingError::SystemError(_) => 500,
        }
    }
}

impl From<sqlx::Error> for BookingError {
    fn from(e: sqlx::Error) -> Self {
        BookingError::DatabaseError(e.to_string())
    }
}

impl From<anyhow::Error> for BookingError {
    fn from(e: anyhow::Error) -> Self {
        BookingError::SystemError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(BookingError::BookingNotFound(9).code(), "BOOKING_NOT_FOUND");
        assert_eq!(BookingError::NotACustomer.code(), "NOT_A_CUSTOMER");
        assert_eq!(
            BookingError::DatabaseError("boom".into()).code(),
            "DATABASE_ERROR"
        );
    }

    #[test]
    fn test_http_status() {
        assert_eq!(BookingError::BookingNotFound(9).http_status(), 404);
        assert_eq!(BookingError::NoActiveAssignment(9).http_status(), 422);
        assert_eq!(BookingError::InvalidStatus("x".into()).http_status(), 400);
        assert_eq!(BookingError::SystemError("x".into()).http_status(), 500);
    }

    #[test]
    fn test_display() {
        let err = BookingError::BookingNotFound(17);
        assert_eq!(err.to_string(), "Booking not found: 17");
    }
}
