//! Notification copy
//!
//! Every outbound message body is assembled here so the wording lives in
//! one place. Copy is English-locale only.

use crate::booking::{time_rules, Booking};
use crate::transitions::{CustomerEmail, TranslatorEmail};

fn due_stamp(booking: &Booking) -> String {
    booking.due.format("%Y-%m-%d %H:%M").to_string()
}

fn duration_label(booking: &Booking) -> String {
    time_rules::format_duration_minutes(booking.duration_minutes)
}

/// Push body offering a booking to matching translators.
pub fn new_booking_push_body(booking: &Booking, language: &str) -> String {
    if booking.immediate {
        format!(
            "You have a new emergency booking for {language} {}",
            duration_label(booking)
        )
    } else {
        format!(
            "You have a new booking for {language} {} at {}",
            duration_label(booking),
            due_stamp(booking)
        )
    }
}

/// Push body confirming to the customer that an interpreter took the job.
pub fn booking_accepted_push_body(booking: &Booking, language: &str) -> String {
    format!(
        "Your {language} booking {} at {} has been accepted by an interpreter",
        duration_label(booking),
        due_stamp(booking)
    )
}

/// Push body reminding a participant that a session starts soon.
pub fn session_start_reminder_body(booking: &Booking, language: &str) -> String {
    let place = if booking.is_physical_only() {
        match booking.town.as_deref() {
            Some(t) if !t.is_empty() => format!("on site in {t}"),
            _ => "on site".to_string(),
        }
    } else {
        "by phone".to_string()
    };
    format!(
        "Reminder: your {language} interpretation ({}) starts {} at {}. Be ready.",
        duration_label(booking),
        place,
        due_stamp(booking)
    )
}

/// SMS offering a physical booking.
fn physical_booking_sms(booking: &Booking, language: &str) -> String {
    let town = booking.town.clone().unwrap_or_default();
    format!(
        "You have a new physical interpretation booking: {language}, {} at {} in {town}. \
         Open the app to accept. Booking #{}",
        duration_label(booking),
        due_stamp(booking),
        booking.id
    )
}

/// SMS offering a phone booking.
fn phone_booking_sms(booking: &Booking, language: &str) -> String {
    format!(
        "You have a new phone interpretation booking: {language}, {} at {}. \
         Open the app to accept. Booking #{}",
        duration_label(booking),
        due_stamp(booking),
        booking.id
    )
}

/// Pick the SMS template for a booking's modality. Phone wording wins when
/// both modalities are flagged; a booking with neither gets no SMS.
pub fn sms_for_booking(booking: &Booking, language: &str) -> Option<String> {
    match (booking.physical_type, booking.phone_type) {
        (true, false) => Some(physical_booking_sms(booking, language)),
        (_, true) => Some(phone_booking_sms(booking, language)),
        (false, false) => None,
    }
}

/// Email telling a participant the booking's details moved under them.
pub fn details_changed_email(
    booking: &Booking,
    recipient_name: &str,
    changes: &[crate::booking::AuditEntry],
) -> (String, String) {
    let lines: Vec<String> = changes
        .iter()
        .map(|c| {
            format!(
                "- {}: {} -> {}",
                c.field,
                c.old_value.as_deref().unwrap_or("(none)"),
                c.new_value.as_deref().unwrap_or("(none)")
            )
        })
        .collect();
    (
        format!("Booking #{} has been updated", booking.id),
        format!(
            "Hi {recipient_name},\n\nBooking #{} was updated:\n{}\n\nNew session time: {} ({}).",
            booking.id,
            lines.join("\n"),
            due_stamp(booking),
            duration_label(booking)
        ),
    )
}

/// Customer email subject and body for a lifecycle event.
pub fn customer_email(
    kind: CustomerEmail,
    booking: &Booking,
    recipient_name: &str,
    language: &str,
) -> (String, String) {
    let id = booking.id;
    match kind {
        CustomerEmail::Reopened => (
            format!("Booking #{id} has been reopened"),
            format!(
                "Hi {recipient_name},\n\nYour {language} booking #{id} timed out and has \
                 been reopened. We are looking for an interpreter for {} again.",
                due_stamp(booking)
            ),
        ),
        CustomerEmail::Accepted => (
            format!("Confirmation - interpreter accepted your booking (booking #{id})"),
            format!(
                "Hi {recipient_name},\n\nAn interpreter has accepted your {language} \
                 booking #{id}, {} at {}.",
                duration_label(booking),
                due_stamp(booking)
            ),
        ),
        CustomerEmail::SessionEnded => (
            format!("Invoice details for booking #{id}"),
            format!(
                "Hi {recipient_name},\n\nYour {language} session for booking #{id} has \
                 ended. Invoiced interpretation time: {}.",
                booking
                    .session_time_secs
                    .map(time_rules::format_session_secs)
                    .unwrap_or_else(|| duration_label(booking))
            ),
        ),
        CustomerEmail::Cancelled => (
            format!("Booking #{id} has been cancelled"),
            format!(
                "Hi {recipient_name},\n\nYour {language} booking #{id} scheduled for {} \
                 has been cancelled.",
                due_stamp(booking)
            ),
        ),
    }
}

/// Translator email subject and body for a lifecycle event.
pub fn translator_email(
    kind: TranslatorEmail,
    booking: &Booking,
    recipient_name: &str,
    language: &str,
) -> (String, String) {
    let id = booking.id;
    match kind {
        TranslatorEmail::Assigned => (
            format!("You have been assigned booking #{id}"),
            format!(
                "Hi {recipient_name},\n\nYou are now the interpreter for {language} \
                 booking #{id}, {} at {}.",
                duration_label(booking),
                due_stamp(booking)
            ),
        ),
        TranslatorEmail::SessionEnded => (
            format!("Salary details for booking #{id}"),
            format!(
                "Hi {recipient_name},\n\nThe {language} session for booking #{id} has \
                 ended. Payable interpretation time: {}.",
                booking
                    .session_time_secs
                    .map(time_rules::format_session_secs)
                    .unwrap_or_else(|| duration_label(booking))
            ),
        ),
        TranslatorEmail::JobCancelled => (
            format!("Booking #{id} was cancelled"),
            format!(
                "Hi {recipient_name},\n\nThe {language} booking #{id} you held for {} \
                 has been cancelled. Check the app for other open bookings.",
                due_stamp(booking)
            ),
        ),
    }
}
