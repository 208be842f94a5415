//! Route definitions for the Admin domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{creators, faq, payments, stats, users};
use super::middleware::AdminState;

/// Public content routes served by this domain
fn public_routes() -> Router<AdminState> {
    Router::new().route("/v1/faq", get(faq::list_public_faq))
}

/// Admin-only routes (every handler takes `AdminUser`)
fn admin_routes() -> Router<AdminState> {
    Router::new()
        .route("/v1/admin/stats", get(stats::get_stats))
        .route("/v1/admin/users", get(users::list_users))
        .route("/v1/admin/payments", get(payments::list_payments))
        .route(
            "/v1/admin/creators/{id}/suspend",
            post(creators::suspend_creator),
        )
        .route(
            "/v1/admin/creators/{id}/reactivate",
            post(creators::reactivate_creator),
        )
        .route("/v1/admin/faq", get(faq::list_faq).post(faq::create_faq))
        .route(
            "/v1/admin/faq/{id}",
            axum::routing::patch(faq::update_faq).delete(faq::delete_faq),
        )
}

/// Create all Admin domain API routes
pub fn routes() -> Router<AdminState> {
    Router::new().merge(public_routes()).merge(admin_routes())
}
