//! Realtime fan-out for chat events
//!
//! A process-wide broadcast hub carries conversation events addressed to
//! recipient user ids. API handlers publish after their own writes; a
//! Postgres LISTEN task bridges rows written outside this API (the hosted
//! platform's client SDK) into the same hub.
//!
//! Delivery is at-least-once: a row written through the API can arrive via
//! both paths. Events carry row ids so consumers dedupe.

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgListener;
use sqlx::PgPool;
use tokio::sync::broadcast;
use uuid::Uuid;

/// NOTIFY channel the database publishes row-change events on
pub const CHANGES_CHANNEL: &str = "mimo_changes";

/// Default hub capacity; slow consumers past this lag drop events
const DEFAULT_CAPACITY: usize = 256;

/// Kind of realtime event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RealtimeEventKind {
    MessageCreated,
    ConversationUpdated,
}

/// An event addressed to a set of users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeEvent {
    pub kind: RealtimeEventKind,
    pub conversation_id: Uuid,
    pub recipients: Vec<Uuid>,
    pub payload: serde_json::Value,
}

/// Process-wide broadcast hub
#[derive(Clone)]
pub struct RealtimeHub {
    tx: broadcast::Sender<RealtimeEvent>,
}

impl RealtimeHub {
    /// Create a hub with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a hub with an explicit capacity
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish an event to all connected subscribers.
    ///
    /// A send error only means nobody is listening right now.
    pub fn publish(&self, event: RealtimeEvent) {
        let receivers = self.tx.receiver_count();
        if let Err(e) = self.tx.send(event) {
            tracing::trace!(error = %e, "Realtime event dropped (no subscribers)");
        } else {
            tracing::debug!(receivers, "Realtime event published");
        }
    }

    /// Subscribe to the event stream
    pub fn subscribe(&self) -> broadcast::Receiver<RealtimeEvent> {
        self.tx.subscribe()
    }
}

impl Default for RealtimeHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Bridge database row-change notifications into the hub.
///
/// Reconnects with backoff on listener errors; malformed payloads are
/// logged and skipped.
pub async fn run_change_listener(pool: PgPool, hub: RealtimeHub) {
    loop {
        let mut listener = match PgListener::connect_with(&pool).await {
            Ok(listener) => listener,
            Err(e) => {
                tracing::error!(error = %e, "Failed to connect change listener; retrying");
                tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                continue;
            }
        };

        if let Err(e) = listener.listen(CHANGES_CHANNEL).await {
            tracing::error!(error = %e, channel = CHANGES_CHANNEL, "LISTEN failed; retrying");
            tokio::time::sleep(std::time::Duration::from_secs(5)).await;
            continue;
        }

        tracing::info!(channel = CHANGES_CHANNEL, "Change listener connected");

        loop {
            match listener.recv().await {
                Ok(notification) => {
                    match serde_json::from_str::<RealtimeEvent>(notification.payload()) {
                        Ok(event) => hub.publish(event),
                        Err(e) => {
                            tracing::warn!(error = %e, "Malformed change notification skipped");
                        }
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "Change listener lost connection; reconnecting");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_event(recipients: Vec<Uuid>) -> RealtimeEvent {
        RealtimeEvent {
            kind: RealtimeEventKind::MessageCreated,
            conversation_id: Uuid::new_v4(),
            recipients,
            payload: json!({"content": "oi"}),
        }
    }

    #[tokio::test]
    async fn test_hub_delivers_to_subscriber() {
        let hub = RealtimeHub::new();
        let mut rx = hub.subscribe();

        let recipient = Uuid::new_v4();
        hub.publish(test_event(vec![recipient]));

        let received = rx.recv().await.unwrap();
        assert_eq!(received.kind, RealtimeEventKind::MessageCreated);
        assert_eq!(received.recipients, vec![recipient]);
    }

    #[tokio::test]
    async fn test_hub_publish_without_subscribers_is_noop() {
        let hub = RealtimeHub::new();
        // Must not panic or error
        hub.publish(test_event(vec![Uuid::new_v4()]));
    }

    #[tokio::test]
    async fn test_hub_fans_out_to_multiple_subscribers() {
        let hub = RealtimeHub::new();
        let mut rx1 = hub.subscribe();
        let mut rx2 = hub.subscribe();

        hub.publish(test_event(vec![Uuid::new_v4()]));

        assert!(rx1.recv().await.is_ok());
        assert!(rx2.recv().await.is_ok());
    }

    #[test]
    fn test_event_serialization_roundtrip() {
        let event = test_event(vec![Uuid::new_v4(), Uuid::new_v4()]);
        let json = serde_json::to_string(&event).unwrap();
        let parsed: RealtimeEvent = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.kind, event.kind);
        assert_eq!(parsed.conversation_id, event.conversation_id);
        assert_eq!(parsed.recipients, event.recipients);
    }

    #[test]
    fn test_event_kind_serialization_snake_case() {
        assert_eq!(
            serde_json::to_string(&RealtimeEventKind::MessageCreated).unwrap(),
            "\"message_created\""
        );
        assert_eq!(
            serde_json::to_string(&RealtimeEventKind::ConversationUpdated).unwrap(),
            "\"conversation_updated\""
        );
    }
}
