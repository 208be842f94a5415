//! Route definitions for the Conversations domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{conversations, messages};
use super::middleware::ConversationsState;
use super::ws;

/// Create conversation routes
fn conversation_routes() -> Router<ConversationsState> {
    Router::new()
        .route(
            "/v1/conversations",
            get(conversations::list_conversations).post(conversations::open_conversation),
        )
        .route(
            "/v1/conversations/{id}",
            get(conversations::get_conversation),
        )
        .route("/v1/conversations/{id}/read", post(conversations::mark_read))
}

/// Create message routes
fn message_routes() -> Router<ConversationsState> {
    Router::new().route(
        "/v1/conversations/{conversation_id}/messages",
        get(messages::list_messages).post(messages::send_message),
    )
}

/// Create the realtime WebSocket route
fn realtime_routes() -> Router<ConversationsState> {
    Router::new().route("/v1/realtime", get(ws::realtime))
}

/// Create all Conversations domain API routes
pub fn routes() -> Router<ConversationsState> {
    Router::new()
        .merge(conversation_routes())
        .merge(message_routes())
        .merge(realtime_routes())
}
