//! Domain entities for the Notifications domain
//!
//! Rows are written by the payments and conversations domains; this
//! domain owns reading and read-marking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

/// Notification kind — matches the `notification_kind` DB enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    MimoReceived,
    ServicePurchased,
    PaymentCompleted,
    PaymentFailed,
    NewMessage,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::MimoReceived => write!(f, "mimo_received"),
            NotificationKind::ServicePurchased => write!(f, "service_purchased"),
            NotificationKind::PaymentCompleted => write!(f, "payment_completed"),
            NotificationKind::PaymentFailed => write!(f, "payment_failed"),
            NotificationKind::NewMessage => write!(f, "new_message"),
        }
    }
}

/// Notification entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub data: Json<serde_json::Value>,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Check if the notification has been read
    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serialization_snake_case() {
        assert_eq!(
            serde_json::to_string(&NotificationKind::MimoReceived).unwrap(),
            "\"mimo_received\""
        );
        assert_eq!(
            serde_json::to_string(&NotificationKind::NewMessage).unwrap(),
            "\"new_message\""
        );
    }

    #[test]
    fn test_kind_display_matches_wire_form() {
        assert_eq!(NotificationKind::ServicePurchased.to_string(), "service_purchased");
        assert_eq!(NotificationKind::PaymentFailed.to_string(), "payment_failed");
    }

    #[test]
    fn test_is_read() {
        let mut notification = Notification {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            kind: NotificationKind::MimoReceived,
            title: "You received a mimo".to_string(),
            body: "Bruno sent you R$ 25,00".to_string(),
            data: Json(serde_json::json!({})),
            read_at: None,
            created_at: Utc::now(),
        };
        assert!(!notification.is_read());

        notification.read_at = Some(Utc::now());
        assert!(notification.is_read());
    }
}
