//! Route definitions for the Creators domain API

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{creators, gallery, posts, services};
use super::middleware::CreatorsState;

/// Public catalog and profile routes
fn public_routes() -> Router<CreatorsState> {
    Router::new()
        .route(
            "/v1/creators",
            get(creators::explore).post(creators::create_creator),
        )
        .route("/v1/creators/{handle}", get(creators::get_creator))
        .route(
            "/v1/creators/{handle}/services",
            get(services::list_services),
        )
        .route("/v1/creators/{handle}/gallery", get(gallery::list_gallery))
        .route("/v1/creators/{handle}/posts", get(posts::list_posts))
}

/// Creator self-management routes
fn me_routes() -> Router<CreatorsState> {
    Router::new()
        .route(
            "/v1/creators/me",
            get(creators::get_my_creator).patch(creators::update_my_creator),
        )
        .route("/v1/creators/me/status", put(creators::set_my_status))
        .route(
            "/v1/creators/me/services",
            get(services::list_my_services).post(services::create_service),
        )
        .route(
            "/v1/creators/me/services/{id}",
            axum::routing::patch(services::update_service).delete(services::delete_service),
        )
        .route(
            "/v1/creators/me/gallery",
            post(gallery::create_gallery_item),
        )
        .route(
            "/v1/creators/me/gallery/{id}",
            axum::routing::delete(gallery::delete_gallery_item),
        )
        .route("/v1/creators/me/gallery/order", put(gallery::reorder_gallery))
        .route(
            "/v1/creators/me/posts",
            get(posts::list_my_posts).post(posts::create_post),
        )
        .route(
            "/v1/creators/me/posts/{id}",
            axum::routing::delete(posts::delete_post),
        )
}

/// Create all Creators domain API routes
pub fn routes() -> Router<CreatorsState> {
    Router::new().merge(public_routes()).merge(me_routes())
}
