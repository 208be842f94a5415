//! Conversation repository

use crate::domain::entities::Conversation;
use chrono::{DateTime, Utc};
use mimo_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

const CONVERSATION_COLUMNS: &str = r#"
    id, client_id, creator_id, unlocked_by_payment_id,
    last_message_at, client_unread_count, creator_unread_count,
    created_at, updated_at
"#;

/// Cross-domain read model for resolving a creator's user account
#[derive(Debug, sqlx::FromRow)]
pub struct CreatorContact {
    pub user_id: Uuid,
    pub display_name: String,
    pub suspended_at: Option<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct ConversationRepository {
    pool: PgPool,
}

impl ConversationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find conversation by ID
    pub async fn find(&self, id: Uuid) -> Result<Option<Conversation>> {
        let conv = sqlx::query_as::<_, Conversation>(&format!(
            "SELECT {} FROM conversations WHERE id = $1",
            CONVERSATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(conv)
    }

    /// Find the unique conversation for a client/creator pair
    pub async fn find_by_pair(
        &self,
        client_id: Uuid,
        creator_id: Uuid,
    ) -> Result<Option<Conversation>> {
        let conv = sqlx::query_as::<_, Conversation>(&format!(
            "SELECT {} FROM conversations WHERE client_id = $1 AND creator_id = $2",
            CONVERSATION_COLUMNS
        ))
        .bind(client_id)
        .bind(creator_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(conv)
    }

    /// List conversations where the user participates on either side
    pub async fn list_by_user(
        &self,
        user_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Conversation>> {
        let convs = sqlx::query_as::<_, Conversation>(&format!(
            r#"
            SELECT {}
            FROM conversations
            WHERE client_id = $1 OR creator_id = $1
            ORDER BY last_message_at DESC NULLS LAST, created_at DESC
            LIMIT $2 OFFSET $3
            "#,
            CONVERSATION_COLUMNS
        ))
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(convs)
    }

    /// Create a conversation; the unique pair constraint makes concurrent
    /// opens converge on one row.
    pub async fn create(&self, conv: &Conversation) -> Result<Conversation> {
        sqlx::query(
            r#"
            INSERT INTO conversations (
                id, client_id, creator_id, unlocked_by_payment_id,
                last_message_at, client_unread_count, creator_unread_count,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (client_id, creator_id) DO NOTHING
            "#,
        )
        .bind(conv.id)
        .bind(conv.client_id)
        .bind(conv.creator_id)
        .bind(conv.unlocked_by_payment_id)
        .bind(conv.last_message_at)
        .bind(conv.client_unread_count)
        .bind(conv.creator_unread_count)
        .bind(conv.created_at)
        .bind(conv.updated_at)
        .execute(&self.pool)
        .await?;

        let stored = self
            .find_by_pair(conv.client_id, conv.creator_id)
            .await?
            .ok_or_else(|| {
                mimo_common::Error::Internal("Conversation not found after insert".to_string())
            })?;

        Ok(stored)
    }

    /// Clear the reader's unread side and stamp counterparty messages read
    pub async fn mark_read(
        &self,
        conversation_id: Uuid,
        reader_id: Uuid,
        reader_is_client: bool,
    ) -> Result<Option<Conversation>> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE messages SET read_at = NOW()
            WHERE conversation_id = $1 AND sender_id <> $2 AND read_at IS NULL
            "#,
        )
        .bind(conversation_id)
        .bind(reader_id)
        .execute(&mut *tx)
        .await?;

        let updated = sqlx::query_as::<_, Conversation>(&format!(
            r#"
            UPDATE conversations SET
                client_unread_count = CASE WHEN $2 THEN 0 ELSE client_unread_count END,
                creator_unread_count = CASE WHEN $2 THEN creator_unread_count ELSE 0 END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            CONVERSATION_COLUMNS
        ))
        .bind(conversation_id)
        .bind(reader_is_client)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(updated)
    }

    /// Resolve a creator profile into its owning user (cross-domain read)
    pub async fn find_creator_contact(&self, creator_id: Uuid) -> Result<Option<CreatorContact>> {
        let contact = sqlx::query_as::<_, CreatorContact>(
            "SELECT user_id, display_name, suspended_at FROM creators WHERE id = $1",
        )
        .bind(creator_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(contact)
    }
}
