//! Transactional write paths for the Conversations domain
//!
//! Sending a message touches three tables (messages, conversations,
//! notifications); these writes commit or roll back together.

use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{ChatMessage, Conversation};
use crate::repository::messages::MESSAGE_COLUMNS;
use mimo_common::Result;

/// Insert a message, bump the conversation's stats and the counterparty's
/// unread side, and drop a `new_message` notification — one transaction.
pub async fn record_message(
    pool: &PgPool,
    message: &ChatMessage,
    conversation: &Conversation,
    sender_name: &str,
) -> Result<(ChatMessage, Conversation)> {
    let sender_is_client = message.sender_id == conversation.client_id;
    let recipient_id = if sender_is_client {
        conversation.creator_id
    } else {
        conversation.client_id
    };

    let mut tx = pool.begin().await?;

    let created = sqlx::query_as::<_, ChatMessage>(&format!(
        r#"
        INSERT INTO messages (id, conversation_id, sender_id, content, read_at, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {}
        "#,
        MESSAGE_COLUMNS
    ))
    .bind(message.id)
    .bind(message.conversation_id)
    .bind(message.sender_id)
    .bind(&message.content)
    .bind(message.read_at)
    .bind(message.created_at)
    .fetch_one(&mut *tx)
    .await?;

    let updated = sqlx::query_as::<_, Conversation>(
        r#"
        UPDATE conversations SET
            last_message_at = NOW(),
            client_unread_count = client_unread_count + CASE WHEN $2 THEN 0 ELSE 1 END,
            creator_unread_count = creator_unread_count + CASE WHEN $2 THEN 1 ELSE 0 END,
            updated_at = NOW()
        WHERE id = $1
        RETURNING id, client_id, creator_id, unlocked_by_payment_id,
                  last_message_at, client_unread_count, creator_unread_count,
                  created_at, updated_at
        "#,
    )
    .bind(conversation.id)
    .bind(sender_is_client)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO notifications (id, user_id, kind, title, body, data, read_at, created_at)
        VALUES ($1, $2, 'new_message', $3, $4, $5, NULL, NOW())
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(recipient_id)
    .bind(format!("New message from {}", sender_name))
    .bind(preview(&message.content))
    .bind(sqlx::types::Json(serde_json::json!({
        "conversation_id": conversation.id,
        "message_id": created.id,
    })))
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok((created, updated))
}

/// Notification body preview, truncated on a char boundary
fn preview(content: &str) -> String {
    const MAX_PREVIEW: usize = 140;
    if content.chars().count() <= MAX_PREVIEW {
        content.to_string()
    } else {
        let truncated: String = content.chars().take(MAX_PREVIEW).collect();
        format!("{}…", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_content_unchanged() {
        assert_eq!(preview("oi"), "oi");
    }

    #[test]
    fn test_preview_truncates_long_content() {
        let long = "a".repeat(200);
        let p = preview(&long);
        assert!(p.chars().count() <= 141);
        assert!(p.ends_with('…'));
    }

    #[test]
    fn test_preview_multibyte_boundary_safe() {
        let long = "ç".repeat(200);
        let p = preview(&long);
        assert!(p.ends_with('…'));
        assert_eq!(p.chars().count(), 141);
    }
}
