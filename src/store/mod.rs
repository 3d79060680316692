//! Persistence layer: connection pool, schema bootstrap and repositories.

pub mod assignments;
pub mod bookings;
pub mod db;
pub mod schema;
pub mod translators;

pub use assignments::AssignmentRepository;
pub use bookings::{BookingRepository, HISTORY_PAGE_SIZE};
pub use db::Database;
pub use translators::{BlacklistRepository, LanguageRepository, UserRepository};

/// Decode failure for a token column holding an unknown value.
pub(crate) fn decode_err(column: &str, value: &str) -> sqlx::Error {
    sqlx::Error::Decode(format!("unknown {column} token: {value}").into())
}
