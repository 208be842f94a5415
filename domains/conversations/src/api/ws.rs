//! WebSocket endpoint streaming realtime chat events
//!
//! Browsers cannot set headers on WebSocket requests, so the session JWT
//! is accepted either as a bearer `Authorization` header or a `?token=`
//! query parameter.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    http::{header::AUTHORIZATION, HeaderMap},
    response::IntoResponse,
};
use futures::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::broadcast;
use uuid::Uuid;

use mimo_auth::AuthError;
use mimo_common::Result;

use crate::api::middleware::ConversationsState;
use crate::realtime::RealtimeEvent;

/// Query params for the realtime endpoint
#[derive(Debug, Deserialize)]
pub struct RealtimeQuery {
    pub token: Option<String>,
}

/// Upgrade to a WebSocket and stream the caller's events
pub async fn realtime(
    ws: WebSocketUpgrade,
    State(state): State<ConversationsState>,
    headers: HeaderMap,
    Query(query): Query<RealtimeQuery>,
) -> Result<impl IntoResponse> {
    let token = bearer_or_query_token(&headers, query.token)
        .ok_or_else(|| mimo_common::Error::Authentication("Missing token".to_string()))?;

    let ctx = state
        .auth
        .authenticate_jwt(&token)
        .await
        .map_err(|_: AuthError| {
            mimo_common::Error::Authentication("Invalid or expired token".to_string())
        })?;

    let user_id = ctx.user.id;
    let rx = state.realtime.subscribe();

    tracing::debug!(user_id = %user_id, "Realtime subscriber connected");

    Ok(ws.on_upgrade(move |socket| stream_events(socket, user_id, rx)))
}

/// Pick the JWT from the Authorization header or the query string
fn bearer_or_query_token(headers: &HeaderMap, query_token: Option<String>) -> Option<String> {
    if let Some(header) = headers.get(AUTHORIZATION) {
        if let Ok(value) = header.to_str() {
            if let Some(token) = value.strip_prefix("Bearer ") {
                return Some(token.to_string());
            }
        }
    }
    query_token.filter(|t| !t.is_empty())
}

/// Forward addressed events to the socket until either side hangs up
async fn stream_events(
    socket: WebSocket,
    user_id: Uuid,
    mut rx: broadcast::Receiver<RealtimeEvent>,
) {
    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            event = rx.recv() => {
                match event {
                    Ok(event) => {
                        if !event.recipients.contains(&user_id) {
                            continue;
                        }
                        let Ok(payload) = serde_json::to_string(&event) else {
                            continue;
                        };
                        if sender.send(Message::Text(payload.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(user_id = %user_id, skipped, "Realtime subscriber lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            incoming = receiver.next() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(_)) => break,
                }
            }
        }
    }

    tracing::debug!(user_id = %user_id, "Realtime subscriber disconnected");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_token_from_bearer_header() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc123"));

        assert_eq!(
            bearer_or_query_token(&headers, None),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_token_from_query_param() {
        let headers = HeaderMap::new();
        assert_eq!(
            bearer_or_query_token(&headers, Some("xyz".to_string())),
            Some("xyz".to_string())
        );
    }

    #[test]
    fn test_header_wins_over_query() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc123"));

        assert_eq!(
            bearer_or_query_token(&headers, Some("xyz".to_string())),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_empty_query_token_rejected() {
        let headers = HeaderMap::new();
        assert_eq!(bearer_or_query_token(&headers, Some(String::new())), None);
    }

    #[test]
    fn test_missing_token_rejected() {
        let headers = HeaderMap::new();
        assert_eq!(bearer_or_query_token(&headers, None), None);
    }
}
