//! HTTP gateway
//!
//! Thin axum surface over the booking service.

pub mod handlers;
pub mod response;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;

use crate::service::BookingService;

pub use response::{ApiError, ApiResponse, ApiResult};

/// Build the API router.
pub fn build_router(service: Arc<BookingService>) -> Router {
    let api = Router::new()
        .route("/bookings", post(handlers::create_booking))
        .route("/bookings", get(handlers::get_bookings))
        .route("/bookings/history", get(handlers::get_history))
        .route("/bookings/potential", get(handlers::get_potential_jobs))
        .route("/bookings/{id}", post(handlers::update_booking))
        .route("/bookings/{id}/accept", post(handlers::accept_booking))
        .route("/bookings/{id}/cancel", post(handlers::cancel_booking))
        .route("/bookings/{id}/end", post(handlers::end_booking))
        .route("/bookings/{id}/not-call", post(handlers::customer_not_call))
        .route("/bookings/{id}/reopen", post(handlers::reopen_booking))
        .route("/bookings/{id}/resend-push", post(handlers::resend_push))
        .route("/bookings/{id}/resend-sms", post(handlers::resend_sms));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/v1", api)
        .with_state(service)
}

/// Bind and serve until the process is stopped.
pub async fn serve(service: Arc<BookingService>, host: &str, port: u16) -> anyhow::Result<()> {
    let addr = format!("{host}:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Gateway listening on {addr}");
    axum::serve(listener, build_router(service)).await?;
    Ok(())
}
