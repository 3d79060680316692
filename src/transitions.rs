//! Booking status transition engine
//!
//! A finite-state map keyed on the booking's *current* status. Each handler
//! validates its preconditions and, when they hold, returns the field
//! mutation to persist plus an ordered queue of notification effects. The
//! engine performs no I/O; the orchestrator executes the effects after the
//! transactional write commits.
//!
//! A failed precondition is reported as `NotChanged` - it is an expected
//! outcome, never an error.

use chrono::{DateTime, Utc};

use crate::booking::time_rules;
use crate::booking::{Booking, BookingStatus};

/// Input facts for one transition attempt
#[derive(Debug, Clone, Default)]
pub struct TransitionContext {
    /// A translator reassignment happened earlier in the same update cycle.
    pub translator_changed: bool,
    /// Admin comment from the patch, already filtered to non-empty.
    pub admin_comment: Option<String>,
    /// Submitted session interval ("HH:MM:SS" / "HH:MM"), if any.
    pub session_time: Option<String>,
    pub now: DateTime<Utc>,
}

/// Field changes to persist alongside the status
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusMutation {
    pub admin_comments: Option<String>,
    /// Reset for reopened bookings.
    pub created_at: Option<DateTime<Utc>>,
    pub will_expire_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub session_time_secs: Option<i64>,
}

/// Customer-facing email copy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerEmail {
    /// Booking reopened after timing out.
    Reopened,
    /// A translator accepted the booking.
    Accepted,
    /// Session ended - invoice wording.
    SessionEnded,
    /// Booking cancelled / withdrawn.
    Cancelled,
}

/// Translator-facing email copy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslatorEmail {
    /// You are the newly assigned translator.
    Assigned,
    /// Session ended - salary wording.
    SessionEnded,
    /// The job you held was cancelled.
    JobCancelled,
}

/// Deferred notification work produced by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    EmailCustomer(CustomerEmail),
    /// Addressed to the booking's active assignment holder.
    EmailActiveTranslator(TranslatorEmail),
    /// Session-start reminder pushes to customer and active translator.
    SessionStartReminders,
    /// Offer the booking to matching translators again, as if new.
    FanoutNewOpportunity,
}

/// Result of one transition attempt
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionOutcome {
    Applied {
        new_status: BookingStatus,
        mutation: StatusMutation,
        effects: Vec<Effect>,
    },
    /// Precondition failed, no transition is defined for this pair, or the
    /// requested status equals the current one.
    NotChanged,
}

impl TransitionOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, TransitionOutcome::Applied { .. })
    }
}

/// Attempt a status change, dispatched on the current status.
pub fn apply_status_change(
    booking: &Booking,
    requested: BookingStatus,
    ctx: &TransitionContext,
) -> TransitionOutcome {
    if booking.status == requested {
        return TransitionOutcome::NotChanged;
    }

    match booking.status {
        BookingStatus::TimedOut => from_timed_out(booking, requested, ctx),
        BookingStatus::Completed => from_completed(requested, ctx),
        BookingStatus::Started => from_started(requested, ctx),
        BookingStatus::Pending => from_pending(requested, ctx),
        BookingStatus::WithdrawAfter24 => from_withdraw_after_24(requested, ctx),
        BookingStatus::Assigned => from_assigned(requested, ctx),
        BookingStatus::WithdrawBefore24 => TransitionOutcome::NotChanged,
    }
}

fn from_timed_out(
    booking: &Booking,
    requested: BookingStatus,
    ctx: &TransitionContext,
) -> TransitionOutcome {
    if requested == BookingStatus::Pending {
        // Reopen: fresh creation clock, fresh expiry, offered again.
        let mutation = StatusMutation {
            created_at: Some(ctx.now),
            will_expire_at: Some(time_rules::will_expire_at(booking.due, ctx.now)),
            ..Default::default()
        };
        return TransitionOutcome::Applied {
            new_status: requested,
            mutation,
            effects: vec![
                Effect::EmailCustomer(CustomerEmail::Reopened),
                Effect::FanoutNewOpportunity,
            ],
        };
    }

    if ctx.translator_changed {
        return TransitionOutcome::Applied {
            new_status: requested,
            mutation: StatusMutation::default(),
            effects: vec![Effect::EmailCustomer(CustomerEmail::Accepted)],
        };
    }

    TransitionOutcome::NotChanged
}

fn from_completed(requested: BookingStatus, ctx: &TransitionContext) -> TransitionOutcome {
    if requested != BookingStatus::TimedOut {
        return TransitionOutcome::NotChanged;
    }
    let Some(comment) = ctx.admin_comment.clone() else {
        return TransitionOutcome::NotChanged;
    };
    TransitionOutcome::Applied {
        new_status: requested,
        mutation: StatusMutation {
            admin_comments: Some(comment),
            ..Default::default()
        },
        effects: vec![],
    }
}

fn from_started(requested: BookingStatus, ctx: &TransitionContext) -> TransitionOutcome {
    if requested != BookingStatus::Completed {
        return TransitionOutcome::NotChanged;
    }
    let Some(comment) = ctx.admin_comment.clone() else {
        return TransitionOutcome::NotChanged;
    };
    let Some(secs) = ctx
        .session_time
        .as_deref()
        .and_then(time_rules::parse_session_interval)
    else {
        return TransitionOutcome::NotChanged;
    };

    TransitionOutcome::Applied {
        new_status: requested,
        mutation: StatusMutation {
            admin_comments: Some(comment),
            end_at: Some(ctx.now),
            session_time_secs: Some(secs),
            ..Default::default()
        },
        effects: vec![
            Effect::EmailCustomer(CustomerEmail::SessionEnded),
            Effect::EmailActiveTranslator(TranslatorEmail::SessionEnded),
        ],
    }
}

fn from_pending(requested: BookingStatus, ctx: &TransitionContext) -> TransitionOutcome {
    match requested {
        BookingStatus::Assigned => {
            if !ctx.translator_changed {
                return TransitionOutcome::NotChanged;
            }
            TransitionOutcome::Applied {
                new_status: requested,
                mutation: StatusMutation {
                    admin_comments: ctx.admin_comment.clone(),
                    ..Default::default()
                },
                effects: vec![
                    Effect::EmailCustomer(CustomerEmail::Accepted),
                    Effect::EmailActiveTranslator(TranslatorEmail::Assigned),
                    Effect::SessionStartReminders,
                ],
            }
        }
        BookingStatus::TimedOut => {
            let Some(comment) = ctx.admin_comment.clone() else {
                return TransitionOutcome::NotChanged;
            };
            TransitionOutcome::Applied {
                new_status: requested,
                mutation: StatusMutation {
                    admin_comments: Some(comment),
                    ..Default::default()
                },
                effects: vec![],
            }
        }
        _ => TransitionOutcome::Applied {
            new_status: requested,
            mutation: StatusMutation {
                admin_comments: ctx.admin_comment.clone(),
                ..Default::default()
            },
            effects: vec![Effect::EmailCustomer(CustomerEmail::Cancelled)],
        },
    }
}

fn from_withdraw_after_24(
    requested: BookingStatus,
    ctx: &TransitionContext,
) -> TransitionOutcome {
    if requested != BookingStatus::TimedOut {
        return TransitionOutcome::NotChanged;
    }
    let Some(comment) = ctx.admin_comment.clone() else {
        return TransitionOutcome::NotChanged;
    };
    TransitionOutcome::Applied {
        new_status: requested,
        mutation: StatusMutation {
            admin_comments: Some(comment),
            ..Default::default()
        },
        effects: vec![],
    }
}

fn from_assigned(requested: BookingStatus, ctx: &TransitionContext) -> TransitionOutcome {
    let withdraw = matches!(
        requested,
        BookingStatus::WithdrawBefore24 | BookingStatus::WithdrawAfter24
    );
    if !withdraw && requested != BookingStatus::TimedOut {
        return TransitionOutcome::NotChanged;
    }
    if requested == BookingStatus::TimedOut && ctx.admin_comment.is_none() {
        return TransitionOutcome::NotChanged;
    }

    let effects = if withdraw {
        vec![
            Effect::EmailCustomer(CustomerEmail::Cancelled),
            Effect::EmailActiveTranslator(TranslatorEmail::JobCancelled),
        ]
    } else {
        vec![]
    };

    TransitionOutcome::Applied {
        new_status: requested,
        mutation: StatusMutation {
            admin_comments: ctx.admin_comment.clone(),
            ..Default::default()
        },
        effects,
    }
}
