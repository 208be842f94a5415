//! Message repository

use crate::domain::entities::ChatMessage;
use mimo_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

pub(crate) const MESSAGE_COLUMNS: &str =
    "id, conversation_id, sender_id, content, read_at, created_at";

#[derive(Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List a conversation's messages, oldest first
    pub async fn list_by_conversation(
        &self,
        conversation_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ChatMessage>> {
        let messages = sqlx::query_as::<_, ChatMessage>(&format!(
            r#"
            SELECT {}
            FROM messages
            WHERE conversation_id = $1
            ORDER BY created_at ASC
            LIMIT $2 OFFSET $3
            "#,
            MESSAGE_COLUMNS
        ))
        .bind(conversation_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }
}
