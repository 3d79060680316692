//! Core types used throughout the system
//!
//! Fundamental id aliases shared by all modules. They match the BIGINT /
//! INT columns in Postgres, so repositories can bind them directly.

/// User ID - customers and translators share one id space.
pub type UserId = i64;

/// Booking ID - primary key of `bookings_tb`.
pub type BookingId = i64;

/// Assignment ID - primary key of `assignments_tb`.
pub type AssignmentId = i64;

/// Language ID - small, sequential, assigned by the languages table.
pub type LanguageId = i32;
