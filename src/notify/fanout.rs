//! Fan-out of new booking opportunities
//!
//! Planning (who gets pushed, now or at the next business morning) is pure;
//! dispatch hands the plan to the transports. Transport failures are logged
//! and swallowed - a booking operation never fails because a push did.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::booking::{time_rules, Booking, TranslatorProfile};
use crate::core_types::UserId;
use crate::notify::templates;
use crate::notify::transport::{PushMessage, PushSound, PushTransport, SmsTransport};

pub const NOTIFICATION_SUITABLE_JOB: &str = "suitable_job";
pub const NOTIFICATION_SESSION_START: &str = "session_start_remind";
pub const NOTIFICATION_BOOKING_ACCEPTED: &str = "booking_accepted";

/// Who receives the opportunity push, and when
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FanoutPlan {
    pub immediate: Vec<UserId>,
    pub delayed: Vec<UserId>,
    /// Delivery instant for the delayed group.
    pub deliver_after: Option<DateTime<Utc>>,
}

/// Partition eligible translators by push preferences and the night window.
pub fn plan_push_fanout(
    booking: &Booking,
    recipients: &[&TranslatorProfile],
    now: DateTime<Utc>,
) -> FanoutPlan {
    let night = time_rules::is_night_time(now);
    let mut plan = FanoutPlan::default();

    for profile in recipients {
        if profile.opt_out_push {
            continue;
        }
        if booking.immediate && profile.opt_out_emergency {
            continue;
        }
        if night && profile.opt_out_night_push {
            plan.delayed.push(profile.user_id);
        } else {
            plan.immediate.push(profile.user_id);
        }
    }

    if !plan.delayed.is_empty() {
        plan.deliver_after = Some(time_rules::next_business_time(now));
    }
    plan
}

fn opportunity_message(
    booking: &Booking,
    language: &str,
    deliver_after: Option<DateTime<Utc>>,
) -> PushMessage {
    PushMessage {
        booking_id: booking.id,
        notification_type: NOTIFICATION_SUITABLE_JOB.to_string(),
        body: templates::new_booking_push_body(booking, language),
        sound: if booking.immediate {
            PushSound::EmergencyBooking
        } else {
            PushSound::NormalBooking
        },
        deliver_after,
    }
}

/// Push the booking opportunity to every planned recipient.
pub async fn dispatch_push_fanout(
    push: &dyn PushTransport,
    booking: &Booking,
    language: &str,
    plan: &FanoutPlan,
) {
    info!(
        booking_id = booking.id,
        immediate = plan.immediate.len(),
        delayed = plan.delayed.len(),
        "pushing booking opportunity"
    );

    if !plan.immediate.is_empty() {
        let msg = opportunity_message(booking, language, None);
        if let Err(e) = push.send(&plan.immediate, &msg).await {
            warn!(booking_id = booking.id, error = %e, "immediate push failed");
        }
    }
    if !plan.delayed.is_empty() {
        let msg = opportunity_message(booking, language, plan.deliver_after);
        if let Err(e) = push.send(&plan.delayed, &msg).await {
            warn!(booking_id = booking.id, error = %e, "delayed push failed");
        }
    }
}

/// Text the booking opportunity to every recipient with a mobile number.
/// Returns how many messages went out.
pub async fn dispatch_sms_fanout(
    sms: &dyn SmsTransport,
    booking: &Booking,
    language: &str,
    recipients: &[&TranslatorProfile],
) -> usize {
    let Some(body) = templates::sms_for_booking(booking, language) else {
        return 0;
    };

    let mut sent = 0;
    for profile in recipients {
        let Some(mobile) = profile.mobile.as_deref() else {
            continue;
        };
        match sms.send(mobile, &body).await {
            Ok(()) => sent += 1,
            Err(e) => {
                warn!(booking_id = booking.id, to = %mobile, error = %e, "sms failed");
            }
        }
    }
    info!(booking_id = booking.id, sent, "sms fan-out done");
    sent
}

/// Opt-out and night-delay gate for a push to one known recipient.
///
/// `None` means the push is suppressed entirely; `Some(deliver_after)` is
/// the delivery instant to hand the transport. Recipients without stored
/// preferences (customers) always pass, immediately.
fn single_delivery(
    prefs: Option<&TranslatorProfile>,
    now: DateTime<Utc>,
) -> Option<Option<DateTime<Utc>>> {
    match prefs {
        Some(p) if p.opt_out_push => None,
        Some(p) if time_rules::is_night_time(now) && p.opt_out_night_push => {
            Some(Some(time_rules::next_business_time(now)))
        }
        _ => Some(None),
    }
}

/// Confirmation push to the customer after an interpreter takes the job.
pub async fn send_booking_accepted_push(
    push: &dyn PushTransport,
    customer_id: UserId,
    prefs: Option<&TranslatorProfile>,
    booking: &Booking,
    language: &str,
    now: DateTime<Utc>,
) {
    let Some(deliver_after) = single_delivery(prefs, now) else {
        return;
    };
    let msg = PushMessage {
        booking_id: booking.id,
        notification_type: NOTIFICATION_BOOKING_ACCEPTED.to_string(),
        body: templates::booking_accepted_push_body(booking, language),
        sound: PushSound::NormalBooking,
        deliver_after,
    };
    if let Err(e) = push.send(&[customer_id], &msg).await {
        warn!(booking_id = booking.id, customer_id, error = %e, "accept push failed");
    }
}

/// Session-start reminder push to one participant.
pub async fn send_session_start_reminder(
    push: &dyn PushTransport,
    user_id: UserId,
    prefs: Option<&TranslatorProfile>,
    booking: &Booking,
    language: &str,
    now: DateTime<Utc>,
) {
    let Some(deliver_after) = single_delivery(prefs, now) else {
        return;
    };
    let msg = PushMessage {
        booking_id: booking.id,
        notification_type: NOTIFICATION_SESSION_START.to_string(),
        body: templates::session_start_reminder_body(booking, language),
        sound: PushSound::NormalBooking,
        deliver_after,
    };
    if let Err(e) = push.send(&[user_id], &msg).await {
        warn!(booking_id = booking.id, user_id, error = %e, "reminder push failed");
    }
}
