//! Booking domain: lifecycle states, records, edit patches and the
//! temporal business rules around them.

pub mod error;
pub mod models;
pub mod patch;
pub mod status;
pub mod time_rules;

pub use error::BookingError;
pub use models::{
    Assignment, Booking, CertificationLevel, CertificationRequirement, ConsumerType, Customer,
    Gender, JobType, TranslatorProfile, TranslatorType,
};
pub use patch::{AuditEntry, BookingPatch, TranslatorRef};
pub use status::BookingStatus;
