//! Route definitions for the Payments domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{mimos, service_payments, webhook};
use super::middleware::PaymentsState;

/// Mimo (tip) routes
fn mimo_routes() -> Router<PaymentsState> {
    Router::new()
        .route(
            "/v1/payments/mimos",
            get(mimos::list_mimos).post(mimos::create_mimo),
        )
        .route("/v1/payments/mimos/{id}", get(mimos::get_mimo))
}

/// Service payment routes
fn service_payment_routes() -> Router<PaymentsState> {
    Router::new()
        .route(
            "/v1/payments/services",
            get(service_payments::list_service_payments)
                .post(service_payments::create_service_payment),
        )
        .route(
            "/v1/payments/services/{id}",
            get(service_payments::get_service_payment),
        )
}

/// Gateway callback route (signature-authenticated, no session)
fn webhook_routes() -> Router<PaymentsState> {
    Router::new().route("/v1/payments/webhook", post(webhook::pix_webhook))
}

/// Create all Payments domain API routes
pub fn routes() -> Router<PaymentsState> {
    Router::new()
        .merge(mimo_routes())
        .merge(service_payment_routes())
        .merge(webhook_routes())
}
