//! Route definitions for the Notifications domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::notifications;
use super::middleware::NotificationsState;

/// Create all Notifications domain API routes
pub fn routes() -> Router<NotificationsState> {
    Router::new()
        .route("/v1/notifications", get(notifications::list_notifications))
        .route(
            "/v1/notifications/unread-count",
            get(notifications::unread_count),
        )
        .route(
            "/v1/notifications/read-all",
            post(notifications::mark_all_read),
        )
        .route(
            "/v1/notifications/{id}/read",
            post(notifications::mark_read),
        )
}
