//! Route definitions for the Accounts domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{auth, profile};
use super::middleware::AccountsState;

/// Create auth routes
fn auth_routes() -> Router<AccountsState> {
    Router::new()
        .route("/v1/auth/signup", post(auth::signup))
        .route("/v1/auth/signin", post(auth::signin))
        .route("/v1/auth/signout", post(auth::signout))
        .route("/v1/auth/reset-password", post(auth::reset_password))
        .route("/v1/auth/whoami", get(auth::whoami))
}

/// Create profile routes
fn profile_routes() -> Router<AccountsState> {
    Router::new().route(
        "/v1/profile",
        get(profile::get_profile).patch(profile::update_profile),
    )
}

/// Create all Accounts domain API routes
pub fn routes() -> Router<AccountsState> {
    Router::new().merge(auth_routes()).merge(profile_routes())
}
