//! Mock Email Service Implementation
//!
//! In-memory email capture for testing without external dependencies.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{EmailError, EmailMessage, EmailReceipt, EmailService};

/// Email captured by the mock service
#[derive(Debug, Clone)]
pub struct CapturedEmail {
    pub message: EmailMessage,
    pub receipt: EmailReceipt,
    pub captured_at: DateTime<Utc>,
}

impl CapturedEmail {
    /// Extract the payment ID this email refers to, from metadata or body links.
    pub fn extract_payment_id(&self) -> Option<Uuid> {
        if let Some(payment_id_str) = self.message.metadata.get("payment_id") {
            if let Ok(uuid) = Uuid::parse_str(payment_id_str) {
                return Some(uuid);
            }
        }

        let text = format!(
            "{} {}",
            self.message.body_text,
            self.message.body_html.as_deref().unwrap_or("")
        );

        let pattern = r"/payments/([0-9a-f-]{36})";
        if let Ok(re) = regex::Regex::new(pattern) {
            if let Some(captures) = re.captures(&text) {
                if let Some(uuid_str) = captures.get(1) {
                    if let Ok(uuid) = Uuid::parse_str(uuid_str.as_str()) {
                        return Some(uuid);
                    }
                }
            }
        }

        None
    }
}

/// Mock email service that captures messages for test assertions.
#[derive(Debug, Clone)]
pub struct MockEmailService {
    captured: Arc<Mutex<Vec<CapturedEmail>>>,
    default_from: String,
    app_base_url: String,
}

impl MockEmailService {
    /// Create a new mock email service.
    pub fn new() -> Self {
        Self {
            captured: Arc::new(Mutex::new(Vec::new())),
            default_from: "no-reply@mimo.app".to_string(),
            app_base_url: "https://mimo.app".to_string(),
        }
    }

    /// Return all captured emails.
    pub fn captured_emails(&self) -> Vec<CapturedEmail> {
        self.captured
            .lock()
            .expect("captured lock poisoned — prior test panicked")
            .clone()
    }

    /// Clear all captured emails.
    pub fn reset(&self) {
        self.captured
            .lock()
            .expect("captured lock poisoned — prior test panicked")
            .clear();
    }
}

impl Default for MockEmailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl EmailService for MockEmailService {
    async fn send_email(&self, message: EmailMessage) -> Result<EmailReceipt, EmailError> {
        tracing::debug!(to = %message.to, subject = %message.subject, "Mock email: capturing message");

        let receipt = EmailReceipt {
            message_id: format!("mock-{}", Uuid::new_v4()),
            sent_at: Utc::now(),
            provider: "mock".to_string(),
            metadata: message.metadata.clone(),
        };

        self.captured
            .lock()
            .map_err(|e| EmailError::Configuration(format!("captured lock poisoned: {e}")))?
            .push(CapturedEmail {
                message,
                receipt: receipt.clone(),
                captured_at: Utc::now(),
            });

        Ok(receipt)
    }

    fn default_from(&self) -> String {
        self.default_from.clone()
    }

    fn app_base_url(&self) -> &str {
        &self.app_base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_mock_captures_sent_email() {
        let service = MockEmailService::new();

        let message = EmailMessage::new(
            "ana@example.com".to_string(),
            "no-reply@mimo.app".to_string(),
            "Hello".to_string(),
            "Body".to_string(),
        );

        let receipt = service.send_email(message).await.unwrap();
        assert_eq!(receipt.provider, "mock");

        let captured = service.captured_emails();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].message.to, "ana@example.com");
    }

    #[tokio::test]
    async fn test_mimo_received_helper_builds_email() {
        let service = MockEmailService::new();
        let payment_id = Uuid::new_v4();

        service
            .send_mimo_received(
                "ana@example.com",
                "Ana",
                "Bruno",
                Decimal::new(2500, 2),
                payment_id,
            )
            .await
            .unwrap();

        let captured = service.captured_emails();
        assert_eq!(captured.len(), 1);
        assert!(captured[0].message.subject.contains("Bruno"));
        assert!(captured[0].message.body_text.contains("R$ 25,00"));
        assert_eq!(captured[0].extract_payment_id(), Some(payment_id));
    }

    #[tokio::test]
    async fn test_service_purchased_helper_builds_email() {
        let service = MockEmailService::new();
        let payment_id = Uuid::new_v4();

        service
            .send_service_purchased(
                "ana@example.com",
                "Ana",
                "Bruno",
                "Custom video",
                Decimal::new(15000, 2),
                payment_id,
            )
            .await
            .unwrap();

        let captured = service.captured_emails();
        assert_eq!(captured.len(), 1);
        assert!(captured[0].message.subject.contains("Custom video"));
        assert_eq!(
            captured[0].message.metadata.get("email_type"),
            Some(&"service_purchased".to_string())
        );
    }

    #[tokio::test]
    async fn test_extract_payment_id_from_body_link() {
        let service = MockEmailService::new();
        let payment_id = Uuid::new_v4();

        let message = EmailMessage::new(
            "ana@example.com".to_string(),
            "no-reply@mimo.app".to_string(),
            "Hello".to_string(),
            format!("See https://mimo.app/payments/{}", payment_id),
        );

        service.send_email(message).await.unwrap();

        let captured = service.captured_emails();
        assert_eq!(captured[0].extract_payment_id(), Some(payment_id));
    }

    #[tokio::test]
    async fn test_reset_clears_captured() {
        let service = MockEmailService::new();
        let message = EmailMessage::new(
            "a@b.com".to_string(),
            "c@d.com".to_string(),
            "s".to_string(),
            "b".to_string(),
        );
        service.send_email(message).await.unwrap();
        assert_eq!(service.captured_emails().len(), 1);

        service.reset();
        assert!(service.captured_emails().is_empty());
    }
}
