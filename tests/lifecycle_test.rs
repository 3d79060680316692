//! End-to-end exercises of the pure engines: matching, reconciliation,
//! transitions and fan-out planning, chained the way the orchestrator
//! chains them.

use chrono::{DateTime, Duration, TimeZone, Utc};

use tolkflow::booking::models::{
    CertificationLevel, ConsumerType, Customer, JobType, TranslatorType,
};
use tolkflow::booking::time_rules;
use tolkflow::matching::{self, MatchContext};
use tolkflow::notify::fanout::plan_push_fanout;
use tolkflow::transitions::{
    apply_status_change, CustomerEmail, Effect, TransitionContext, TransitionOutcome,
    TranslatorEmail,
};
use tolkflow::{assignment, Assignment, Booking, BookingStatus, TranslatorProfile};

fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 1, 10, 0, 0).unwrap()
}

fn booking(id: i64) -> Booking {
    Booking {
        id,
        customer_id: 7,
        from_language_id: 5,
        due: created_at() + Duration::hours(48),
        duration_minutes: 60,
        status: BookingStatus::Pending,
        immediate: false,
        gender: None,
        certified: None,
        job_type: JobType::Paid,
        physical_type: false,
        phone_type: true,
        customer_email: None,
        town: None,
        admin_comments: None,
        reference: None,
        withdraw_at: None,
        end_at: None,
        session_time_secs: None,
        created_at: created_at(),
        will_expire_at: Some(time_rules::will_expire_at(
            created_at() + Duration::hours(48),
            created_at(),
        )),
    }
}

fn translator(user_id: i64) -> TranslatorProfile {
    TranslatorProfile {
        user_id,
        name: format!("Translator {user_id}"),
        email: format!("translator{user_id}@example.com"),
        mobile: Some("+46700000000".to_string()),
        translator_type: TranslatorType::Professional,
        gender: None,
        certification_level: CertificationLevel::Certified,
        languages: vec![5],
        town: Some("Stockholm".to_string()),
        opt_out_push: false,
        opt_out_night_push: false,
        opt_out_emergency: false,
    }
}

fn active_assignment(booking_id: i64, translator_id: i64) -> Assignment {
    Assignment {
        id: 1000 + translator_id,
        booking_id,
        translator_user_id: translator_id,
        created_at: created_at(),
        cancel_at: None,
        completed_at: None,
        completed_by: None,
    }
}

#[test]
fn assign_then_complete_walks_the_full_lifecycle() {
    let mut b = booking(1);
    let now = created_at() + Duration::hours(1);

    // Admin assigns translator 3 to the pending booking.
    let decision = assignment::reconcile(None, Some(3));
    assert!(decision.changed);
    assert_eq!(decision.open_for, Some(3));

    let ctx = TransitionContext {
        translator_changed: decision.changed,
        admin_comment: None,
        session_time: None,
        now,
    };
    let outcome = apply_status_change(&b, BookingStatus::Assigned, &ctx);
    let TransitionOutcome::Applied {
        new_status,
        effects,
        ..
    } = outcome
    else {
        panic!("assignment should apply");
    };
    assert_eq!(new_status, BookingStatus::Assigned);
    assert_eq!(
        effects,
        vec![
            Effect::EmailCustomer(CustomerEmail::Accepted),
            Effect::EmailActiveTranslator(TranslatorEmail::Assigned),
            Effect::SessionStartReminders,
        ]
    );
    b.status = new_status;

    // Session runs; admin closes it with a comment and the measured time.
    b.status = BookingStatus::Started;
    let close_ctx = TransitionContext {
        translator_changed: false,
        admin_comment: Some("session done".into()),
        session_time: Some("01:15:00".into()),
        now: b.due + Duration::minutes(75),
    };
    let TransitionOutcome::Applied {
        new_status,
        mutation,
        effects,
    } = apply_status_change(&b, BookingStatus::Completed, &close_ctx)
    else {
        panic!("completion should apply");
    };
    assert_eq!(new_status, BookingStatus::Completed);
    assert_eq!(mutation.session_time_secs, Some(4500));
    assert_eq!(
        effects,
        vec![
            Effect::EmailCustomer(CustomerEmail::SessionEnded),
            Effect::EmailActiveTranslator(TranslatorEmail::SessionEnded),
        ]
    );
}

#[test]
fn timeout_reopen_reoffers_through_matching_and_fanout() {
    let mut b = booking(2);
    b.status = BookingStatus::TimedOut;

    // 23:30 the evening before: reopening must queue a fresh fan-out.
    let night = Utc.with_ymd_and_hms(2026, 8, 2, 23, 30, 0).unwrap();
    let ctx = TransitionContext {
        translator_changed: false,
        admin_comment: None,
        session_time: None,
        now: night,
    };
    let TransitionOutcome::Applied {
        new_status,
        mutation,
        effects,
    } = apply_status_change(&b, BookingStatus::Pending, &ctx)
    else {
        panic!("reopen should apply");
    };
    assert_eq!(new_status, BookingStatus::Pending);
    assert_eq!(mutation.created_at, Some(night));
    assert!(effects.contains(&Effect::FanoutNewOpportunity));
    b.status = new_status;

    // Matching: one opted-out sleeper, one night owl, one wrong language.
    let mut sleeper = translator(1);
    sleeper.opt_out_night_push = true;
    let owl = translator(2);
    let mut other_lang = translator(3);
    other_lang.languages = vec![9];

    let pool = vec![sleeper, owl, other_lang];
    let eligible = matching::eligible_translators(&b, &pool, &MatchContext::default());
    let ids: Vec<i64> = eligible.iter().map(|p| p.user_id).collect();
    assert_eq!(ids, vec![1, 2]);

    // Fan-out planning at night: the sleeper's push is held until 09:00.
    let plan = plan_push_fanout(&b, &eligible, night);
    assert_eq!(plan.immediate, vec![2]);
    assert_eq!(plan.delayed, vec![1]);
    assert_eq!(
        plan.deliver_after,
        Some(Utc.with_ymd_and_hms(2026, 8, 3, 9, 0, 0).unwrap())
    );
}

#[test]
fn translator_handover_closes_old_claim_and_is_idempotent() {
    let current = active_assignment(3, 3);

    // Re-requesting the same holder changes nothing.
    assert!(!assignment::reconcile(Some(&current), Some(3)).changed);

    // A different holder closes the old row and opens a new one.
    let decision = assignment::reconcile(Some(&current), Some(9));
    assert!(decision.changed);
    assert_eq!(decision.close_previous, Some(current.id));
    assert_eq!(decision.open_for, Some(9));

    // Applying the same request against the new state is a no-op again.
    let new_active = active_assignment(3, 9);
    assert!(!assignment::reconcile(Some(&new_active), Some(9)).changed);
}

#[test]
fn started_booking_cannot_complete_without_evidence() {
    let mut b = booking(4);
    b.status = BookingStatus::Started;
    let now = b.due + Duration::hours(1);

    let missing_both = TransitionContext {
        translator_changed: false,
        admin_comment: None,
        session_time: None,
        now,
    };
    assert!(!apply_status_change(&b, BookingStatus::Completed, &missing_both).changed());

    let missing_time = TransitionContext {
        admin_comment: Some("done".into()),
        ..missing_both.clone()
    };
    assert!(!apply_status_change(&b, BookingStatus::Completed, &missing_time).changed());

    let missing_comment = TransitionContext {
        admin_comment: None,
        session_time: Some("01:00:00".into()),
        translator_changed: false,
        now,
    };
    assert!(!apply_status_change(&b, BookingStatus::Completed, &missing_comment).changed());
}

#[test]
fn expiry_windows_follow_lead_time() {
    let created = created_at();

    // Within 24h: 90 minutes after creation.
    let due = created + Duration::hours(20);
    assert_eq!(
        time_rules::will_expire_at(due, created),
        created + Duration::minutes(90)
    );

    // Within 72h: 16 hours after creation.
    let due = created + Duration::hours(50);
    assert_eq!(
        time_rules::will_expire_at(due, created),
        created + Duration::hours(16)
    );

    // Within 90h: at the due time.
    let due = created + Duration::hours(80);
    assert_eq!(time_rules::will_expire_at(due, created), due);

    // Beyond: 48 hours before the session.
    let due = created + Duration::hours(200);
    assert_eq!(
        time_rules::will_expire_at(due, created),
        due - Duration::hours(48)
    );
}

#[test]
fn withdrawal_cutoff_splits_at_24_hours() {
    let b = booking(5);

    let early = b.due - Duration::hours(30);
    assert!(time_rules::is_before_24h_cutoff(b.due, early));

    let late = b.due - Duration::hours(3);
    assert!(!time_rules::is_before_24h_cutoff(b.due, late));
}

#[test]
fn physical_only_booking_restricts_by_town_and_blacklist() {
    let mut b = booking(6);
    b.physical_type = true;
    b.phone_type = false;
    b.town = Some("Stockholm".to_string());

    let local = translator(1);
    let mut remote = translator(2);
    remote.town = Some("Uppsala".to_string());
    let blocked = translator(3);

    let mut ctx = MatchContext {
        customer_town: b.town.clone(),
        ..Default::default()
    };
    ctx.blacklisted.insert(3);

    let pool = vec![local, remote, blocked];
    let eligible = matching::eligible_translators(&b, &pool, &ctx);
    let ids: Vec<i64> = eligible.iter().map(|p| p.user_id).collect();
    assert_eq!(ids, vec![1]);
}

#[test]
fn contact_email_prefers_booking_override() {
    let mut b = booking(7);
    let customer = Customer {
        user_id: 7,
        name: "Asha".to_string(),
        email: "asha@example.com".to_string(),
        town: None,
        consumer_type: ConsumerType::Paid,
    };
    assert_eq!(b.contact_email(&customer), "asha@example.com");

    b.customer_email = Some("billing@example.com".to_string());
    assert_eq!(b.contact_email(&customer), "billing@example.com");
}
