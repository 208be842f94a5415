//! Domain entities for the Conversations domain
//!
//! A conversation links one client with one creator (by user id, unique
//! pair). Messages carry read receipts; unread counts are tracked per
//! side on the conversation row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mimo_common::{Error, Result};

/// Maximum message content length (CHECK length <= 4000)
const MAX_MESSAGE_LENGTH: usize = 4000;

/// Conversation entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Conversation {
    pub id: Uuid,
    pub client_id: Uuid,
    pub creator_id: Uuid,
    /// Service payment that unlocked this conversation, if any
    pub unlocked_by_payment_id: Option<Uuid>,
    pub last_message_at: Option<DateTime<Utc>>,
    pub client_unread_count: i32,
    pub creator_unread_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Create a new conversation between a client and a creator
    pub fn new(client_id: Uuid, creator_id: Uuid) -> Result<Self> {
        if client_id == creator_id {
            return Err(Error::Validation(
                "Cannot open a conversation with yourself".to_string(),
            ));
        }

        let now = Utc::now();
        Ok(Conversation {
            id: Uuid::new_v4(),
            client_id,
            creator_id,
            unlocked_by_payment_id: None,
            last_message_at: None,
            client_unread_count: 0,
            creator_unread_count: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Check whether a user participates in this conversation
    pub fn is_participant(&self, user_id: Uuid) -> bool {
        self.client_id == user_id || self.creator_id == user_id
    }

    /// The other side of the conversation for a given participant
    pub fn counterparty(&self, user_id: Uuid) -> Option<Uuid> {
        if user_id == self.client_id {
            Some(self.creator_id)
        } else if user_id == self.creator_id {
            Some(self.client_id)
        } else {
            None
        }
    }

    /// Unread count as seen by a given participant
    pub fn unread_count_for(&self, user_id: Uuid) -> i32 {
        if user_id == self.client_id {
            self.client_unread_count
        } else if user_id == self.creator_id {
            self.creator_unread_count
        } else {
            0
        }
    }
}

/// Chat message entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ChatMessage {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a new chat message
    pub fn new(conversation_id: Uuid, sender_id: Uuid, content: String) -> Result<Self> {
        Self::validate_content(&content)?;

        Ok(ChatMessage {
            id: Uuid::new_v4(),
            conversation_id,
            sender_id,
            content,
            read_at: None,
            created_at: Utc::now(),
        })
    }

    /// Validate message content (CHECK (length(trim(content)) > 0))
    fn validate_content(content: &str) -> Result<()> {
        if content.trim().is_empty() {
            return Err(Error::Validation(
                "Message content cannot be empty or whitespace-only".to_string(),
            ));
        }
        if content.len() > MAX_MESSAGE_LENGTH {
            return Err(Error::Validation(format!(
                "Message content must be at most {} characters",
                MAX_MESSAGE_LENGTH
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_creation() {
        let client = Uuid::new_v4();
        let creator = Uuid::new_v4();
        let conv = Conversation::new(client, creator).unwrap();

        assert_eq!(conv.client_id, client);
        assert_eq!(conv.creator_id, creator);
        assert_eq!(conv.client_unread_count, 0);
        assert_eq!(conv.creator_unread_count, 0);
        assert!(conv.last_message_at.is_none());
        assert!(conv.unlocked_by_payment_id.is_none());
    }

    #[test]
    fn test_conversation_with_self_rejected() {
        let user = Uuid::new_v4();
        let result = Conversation::new(user, user);
        assert!(result.is_err());
    }

    #[test]
    fn test_conversation_participants() {
        let client = Uuid::new_v4();
        let creator = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let conv = Conversation::new(client, creator).unwrap();

        assert!(conv.is_participant(client));
        assert!(conv.is_participant(creator));
        assert!(!conv.is_participant(stranger));
    }

    #[test]
    fn test_conversation_counterparty() {
        let client = Uuid::new_v4();
        let creator = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let conv = Conversation::new(client, creator).unwrap();

        assert_eq!(conv.counterparty(client), Some(creator));
        assert_eq!(conv.counterparty(creator), Some(client));
        assert_eq!(conv.counterparty(stranger), None);
    }

    #[test]
    fn test_conversation_unread_count_per_side() {
        let client = Uuid::new_v4();
        let creator = Uuid::new_v4();
        let mut conv = Conversation::new(client, creator).unwrap();
        conv.client_unread_count = 3;
        conv.creator_unread_count = 1;

        assert_eq!(conv.unread_count_for(client), 3);
        assert_eq!(conv.unread_count_for(creator), 1);
        assert_eq!(conv.unread_count_for(Uuid::new_v4()), 0);
    }

    #[test]
    fn test_message_creation() {
        let conv_id = Uuid::new_v4();
        let sender = Uuid::new_v4();
        let msg = ChatMessage::new(conv_id, sender, "Oi!".to_string()).unwrap();

        assert_eq!(msg.conversation_id, conv_id);
        assert_eq!(msg.sender_id, sender);
        assert_eq!(msg.content, "Oi!");
        assert!(msg.read_at.is_none());
    }

    #[test]
    fn test_message_empty_content_rejected() {
        let result = ChatMessage::new(Uuid::new_v4(), Uuid::new_v4(), "".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_message_whitespace_only_rejected() {
        let result = ChatMessage::new(Uuid::new_v4(), Uuid::new_v4(), " \t\n ".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_message_4000_chars_valid() {
        let result = ChatMessage::new(Uuid::new_v4(), Uuid::new_v4(), "a".repeat(4000));
        assert!(result.is_ok());
    }

    #[test]
    fn test_message_4001_chars_rejected() {
        let result = ChatMessage::new(Uuid::new_v4(), Uuid::new_v4(), "a".repeat(4001));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("at most 4000"));
    }

    #[test]
    fn test_message_serialization_roundtrip() {
        let msg = ChatMessage::new(Uuid::new_v4(), Uuid::new_v4(), "hello".to_string()).unwrap();

        let json = serde_json::to_string(&msg).unwrap();
        let deserialized: ChatMessage = serde_json::from_str(&json).unwrap();

        assert_eq!(msg.id, deserialized.id);
        assert_eq!(msg.content, deserialized.content);
        assert_eq!(msg.sender_id, deserialized.sender_id);
    }
}
