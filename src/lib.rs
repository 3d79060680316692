//! Tolkflow - interpreter booking lifecycle engine
//!
//! Matches interpretation bookings to qualified translators, walks them
//! through their lifecycle, and fans out notifications over push, SMS and
//! email.
//!
//! # Modules
//!
//! - [`core_types`] - Core type definitions (UserId, BookingId, etc.)
//! - [`booking`] - Domain models, statuses, edit patches and time rules
//! - [`matching`] - Translator eligibility engine
//! - [`transitions`] - Status transition engine with its effect queue
//! - [`assignment`] - Assignment ledger reconciliation rules
//! - [`notify`] - Push/SMS/mail transports, copy and fan-out
//! - [`store`] - PostgreSQL repositories
//! - [`service`] - Lifecycle orchestrator
//! - [`gateway`] - HTTP API surface

// Core types - must be first!
pub mod core_types;

pub mod assignment;
pub mod booking;
pub mod config;
pub mod gateway;
pub mod logging;
pub mod matching;
pub mod notify;
pub mod service;
pub mod store;
pub mod transitions;

// Convenient re-exports at crate root
pub use booking::{
    Assignment, AuditEntry, Booking, BookingError, BookingPatch, BookingStatus, Customer,
    TranslatorProfile, TranslatorRef,
};
pub use core_types::{AssignmentId, BookingId, LanguageId, UserId};
pub use matching::MatchContext;
pub use service::{
    AcceptOutcome, BookingService, CancelActor, CancelOutcome, CreateBookingRequest,
    CreateOutcome, EndOutcome, UpdateOutcome,
};
pub use store::Database;
pub use transitions::{Effect, TransitionContext, TransitionOutcome};
