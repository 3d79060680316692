//! HTTP handlers
//!
//! Thin translation layer: deserialize the request, call the service with
//! the current time, wrap the outcome.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::booking::{BookingError, BookingPatch, BookingStatus, TranslatorRef};
use crate::core_types::{BookingId, UserId};
use crate::service::{
    AcceptOutcome, BookingHistory, BookingService, CancelActor, CancelOutcome,
    CreateBookingRequest, CreateOutcome, EndOutcome, UpdateOutcome, UserBookings,
};

use super::response::{ok, ApiResult};

pub type SharedService = Arc<BookingService>;

#[derive(Deserialize)]
pub struct CreatePayload {
    pub customer_id: UserId,
    #[serde(flatten)]
    pub request: CreateBookingRequest,
}

/// POST /api/v1/bookings
pub async fn create_booking(
    State(service): State<SharedService>,
    Json(payload): Json<CreatePayload>,
) -> ApiResult<CreateOutcome> {
    let outcome = service
        .create_booking(payload.customer_id, &payload.request, Utc::now())
        .await?;
    ok(outcome)
}

#[derive(Deserialize, Default)]
pub struct UpdatePayload {
    /// Admin performing the edit, for the audit log.
    #[serde(default)]
    pub admin_id: UserId,
    pub due: Option<DateTime<Utc>>,
    pub from_language_id: Option<i32>,
    pub status: Option<String>,
    pub translator_id: Option<UserId>,
    pub translator_email: Option<String>,
    pub admin_comments: Option<String>,
    pub reference: Option<String>,
    pub session_time: Option<String>,
}

impl UpdatePayload {
    fn into_patch(self) -> Result<BookingPatch, BookingError> {
        let status = match self.status {
            Some(token) => Some(
                BookingStatus::parse(&token).ok_or(BookingError::InvalidStatus(token))?,
            ),
            None => None,
        };
        Ok(BookingPatch {
            due: self.due,
            from_language_id: self.from_language_id,
            status,
            translator: TranslatorRef::from_fields(
                self.translator_id,
                self.translator_email.as_deref(),
            ),
            admin_comments: self.admin_comments,
            reference: self.reference,
            session_time: self.session_time,
        })
    }
}

/// POST /api/v1/bookings/{id}
pub async fn update_booking(
    State(service): State<SharedService>,
    Path(booking_id): Path<BookingId>,
    Json(payload): Json<UpdatePayload>,
) -> ApiResult<UpdateOutcome> {
    let admin_id = payload.admin_id;
    let patch = payload.into_patch()?;
    let outcome = service
        .update(booking_id, &patch, admin_id, Utc::now())
        .await?;
    ok(outcome)
}

#[derive(Deserialize)]
pub struct UserQuery {
    pub user_id: UserId,
}

/// GET /api/v1/bookings?user_id=7
pub async fn get_bookings(
    State(service): State<SharedService>,
    Query(query): Query<UserQuery>,
) -> ApiResult<UserBookings> {
    ok(service.bookings_for_user(query.user_id).await?)
}

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub user_id: UserId,
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

/// GET /api/v1/bookings/history?user_id=7&page=2
pub async fn get_history(
    State(service): State<SharedService>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<BookingHistory> {
    ok(service.booking_history(query.user_id, query.page).await?)
}

#[derive(Deserialize)]
pub struct TranslatorQuery {
    pub translator_id: UserId,
}

/// GET /api/v1/bookings/potential?translator_id=3
pub async fn get_potential_jobs(
    State(service): State<SharedService>,
    Query(query): Query<TranslatorQuery>,
) -> ApiResult<Vec<crate::booking::Booking>> {
    ok(service
        .potential_jobs(query.translator_id, Utc::now())
        .await?)
}

#[derive(Deserialize)]
pub struct AcceptPayload {
    pub translator_id: UserId,
}

/// POST /api/v1/bookings/{id}/accept
pub async fn accept_booking(
    State(service): State<SharedService>,
    Path(booking_id): Path<BookingId>,
    Json(payload): Json<AcceptPayload>,
) -> ApiResult<AcceptOutcome> {
    ok(service
        .accept_job(booking_id, payload.translator_id, Utc::now())
        .await?)
}

#[derive(Deserialize)]
#[serde(tag = "actor", rename_all = "lowercase")]
pub enum CancelPayload {
    Customer,
    Translator { translator_id: UserId },
}

/// POST /api/v1/bookings/{id}/cancel
pub async fn cancel_booking(
    State(service): State<SharedService>,
    Path(booking_id): Path<BookingId>,
    Json(payload): Json<CancelPayload>,
) -> ApiResult<CancelOutcome> {
    let actor = match payload {
        CancelPayload::Customer => CancelActor::Customer,
        CancelPayload::Translator { translator_id } => CancelActor::Translator(translator_id),
    };
    ok(service.cancel_job(booking_id, actor, Utc::now()).await?)
}

#[derive(Deserialize)]
pub struct EndPayload {
    pub completed_by: UserId,
}

/// POST /api/v1/bookings/{id}/end
pub async fn end_booking(
    State(service): State<SharedService>,
    Path(booking_id): Path<BookingId>,
    Json(payload): Json<EndPayload>,
) -> ApiResult<EndOutcome> {
    ok(service
        .end_job(booking_id, payload.completed_by, Utc::now())
        .await?)
}

/// POST /api/v1/bookings/{id}/not-call
pub async fn customer_not_call(
    State(service): State<SharedService>,
    Path(booking_id): Path<BookingId>,
) -> ApiResult<bool> {
    ok(service.customer_not_call(booking_id, Utc::now()).await?)
}

/// POST /api/v1/bookings/{id}/reopen
pub async fn reopen_booking(
    State(service): State<SharedService>,
    Path(booking_id): Path<BookingId>,
) -> ApiResult<bool> {
    ok(service.reopen(booking_id, Utc::now()).await?)
}

/// POST /api/v1/bookings/{id}/resend-push
pub async fn resend_push(
    State(service): State<SharedService>,
    Path(booking_id): Path<BookingId>,
) -> ApiResult<usize> {
    ok(service.resend_notifications(booking_id, Utc::now()).await?)
}

/// POST /api/v1/bookings/{id}/resend-sms
pub async fn resend_sms(
    State(service): State<SharedService>,
    Path(booking_id): Path<BookingId>,
) -> ApiResult<usize> {
    ok(service.resend_sms(booking_id).await?)
}

/// GET /health
pub async fn health() -> ApiResult<&'static str> {
    ok("ok")
}
