//! Translator matching engine
//!
//! Pure eligibility computation: the store fetches candidate profiles and
//! the surrounding facts (blacklist, busy intervals, towns), this module
//! decides who qualifies. No I/O, no ordering guarantees - callers that
//! need determinism sort explicitly.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};

use crate::booking::{
    Booking, CertificationLevel, CertificationRequirement, TranslatorProfile,
};
use crate::core_types::UserId;

/// Facts about the candidate pool that live outside the profiles
#[derive(Debug, Clone, Default)]
pub struct MatchContext {
    /// Translators blacklisted by the booking's customer.
    pub blacklisted: HashSet<UserId>,
    /// Active-assignment intervals per translator: (due, duration minutes)
    /// of every other booking they currently hold.
    pub busy: HashMap<UserId, Vec<(DateTime<Utc>, i32)>>,
    /// Town the session takes place in, for physical bookings.
    pub customer_town: Option<String>,
}

/// Accepted certification levels for a requirement tag.
///
/// Branch order preserved from the production rules: `both` is claimed by
/// the certified group before the layman group is considered.
pub fn accepted_levels(
    requirement: Option<CertificationRequirement>,
) -> &'static [CertificationLevel] {
    use CertificationLevel as L;
    use CertificationRequirement as C;

    const ALL: &[L] = &[
        L::Certified,
        L::CertifiedLaw,
        L::CertifiedHealth,
        L::Layman,
        L::CourseTrained,
    ];
    const CERTIFIED: &[L] = &[L::Certified, L::CertifiedLaw, L::CertifiedHealth];
    const LAW: &[L] = &[L::CertifiedLaw];
    const HEALTH: &[L] = &[L::CertifiedHealth];
    const LAYMAN: &[L] = &[L::Layman, L::CourseTrained];

    match requirement {
        None => ALL,
        Some(C::Yes) | Some(C::Both) => CERTIFIED,
        Some(C::Law) | Some(C::NLaw) => LAW,
        Some(C::Health) | Some(C::NHealth) => HEALTH,
        Some(C::Normal) => LAYMAN,
    }
}

/// Two bookings overlap when their [due, due+duration) intervals intersect.
pub fn overlaps(
    due_a: DateTime<Utc>,
    minutes_a: i32,
    due_b: DateTime<Utc>,
    minutes_b: i32,
) -> bool {
    let end_a = due_a + Duration::minutes(minutes_a as i64);
    let end_b = due_b + Duration::minutes(minutes_b as i64);
    due_a < end_b && due_b < end_a
}

/// Is this single candidate eligible for the booking?
pub fn is_eligible(
    booking: &Booking,
    candidate: &TranslatorProfile,
    ctx: &MatchContext,
) -> bool {
    // 1. Translator kind must map to the booking's job type
    if candidate.translator_type.job_type() != booking.job_type {
        return false;
    }

    // 2. Certification level
    if !accepted_levels(booking.certified).contains(&candidate.certification_level) {
        return false;
    }

    // 3. Language and gender
    if !candidate.languages.contains(&booking.from_language_id) {
        return false;
    }
    if let Some(required) = booking.gender {
        if candidate.gender != Some(required) {
            return false;
        }
    }

    // 4. Customer blacklist
    if ctx.blacklisted.contains(&candidate.user_id) {
        return false;
    }

    // 5. Double-booking guard
    if let Some(intervals) = ctx.busy.get(&candidate.user_id) {
        for &(due, minutes) in intervals {
            if overlaps(booking.due, booking.duration_minutes, due, minutes) {
                return false;
            }
        }
    }

    // 6. Service area, only for physical-only bookings
    if booking.is_physical_only() && !towns_match(candidate, ctx) {
        return false;
    }

    true
}

fn towns_match(candidate: &TranslatorProfile, ctx: &MatchContext) -> bool {
    match (&candidate.town, &ctx.customer_town) {
        (Some(t), Some(c)) => t.eq_ignore_ascii_case(c),
        _ => false,
    }
}

/// All eligible translators for a booking. An empty result is a valid,
/// inert outcome - never an error.
pub fn eligible_translators<'a>(
    booking: &Booking,
    candidates: &'a [TranslatorProfile],
    ctx: &MatchContext,
) -> Vec<&'a TranslatorProfile> {
    candidates
        .iter()
        .filter(|c| is_eligible(booking, c, ctx))
        .collect()
}
