//! Domain entities for the Admin domain

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mimo_common::{Error, Result};

/// Maximum FAQ question length (varchar(300))
const MAX_QUESTION_LENGTH: usize = 300;

/// Maximum FAQ answer length (CHECK length <= 5000)
const MAX_ANSWER_LENGTH: usize = 5000;

/// An FAQ entry shown on the public help pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct FaqEntry {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub position: i32,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FaqEntry {
    /// Create a new FAQ entry; position is assigned on insert
    pub fn new(question: String, answer: String, published: bool) -> Result<Self> {
        Self::validate_question(&question)?;
        Self::validate_answer(&answer)?;

        let now = Utc::now();
        Ok(FaqEntry {
            id: Uuid::new_v4(),
            question,
            answer,
            position: 0,
            published,
            created_at: now,
            updated_at: now,
        })
    }

    /// Validate a question (non-blank, varchar(300))
    pub fn validate_question(question: &str) -> Result<()> {
        if question.trim().is_empty() {
            return Err(Error::Validation("Question cannot be blank".to_string()));
        }
        if question.len() > MAX_QUESTION_LENGTH {
            return Err(Error::Validation(format!(
                "Question must be at most {} characters",
                MAX_QUESTION_LENGTH
            )));
        }
        Ok(())
    }

    /// Validate an answer (non-blank, CHECK length <= 5000)
    pub fn validate_answer(answer: &str) -> Result<()> {
        if answer.trim().is_empty() {
            return Err(Error::Validation("Answer cannot be blank".to_string()));
        }
        if answer.len() > MAX_ANSWER_LENGTH {
            return Err(Error::Validation(format!(
                "Answer must be at most {} characters",
                MAX_ANSWER_LENGTH
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faq_entry_creation() {
        let entry = FaqEntry::new(
            "How do mimos work?".to_string(),
            "A mimo is a tip paid via PIX.".to_string(),
            true,
        )
        .unwrap();

        assert!(entry.published);
        assert_eq!(entry.position, 0);
    }

    #[test]
    fn test_faq_blank_question_rejected() {
        let result = FaqEntry::new("  ".to_string(), "Answer.".to_string(), true);
        assert!(result.is_err());
    }

    #[test]
    fn test_faq_question_length_limit() {
        assert!(FaqEntry::validate_question(&"a".repeat(300)).is_ok());
        assert!(FaqEntry::validate_question(&"a".repeat(301)).is_err());
    }

    #[test]
    fn test_faq_answer_length_limit() {
        assert!(FaqEntry::validate_answer(&"a".repeat(5000)).is_ok());
        assert!(FaqEntry::validate_answer(&"a".repeat(5001)).is_err());
    }

    #[test]
    fn test_faq_serialization_roundtrip() {
        let entry = FaqEntry::new("Q?".to_string(), "A.".to_string(), false).unwrap();
        let json = serde_json::to_string(&entry).unwrap();
        let deserialized: FaqEntry = serde_json::from_str(&json).unwrap();

        assert_eq!(entry.id, deserialized.id);
        assert_eq!(entry.question, deserialized.question);
        assert!(!deserialized.published);
    }
}
