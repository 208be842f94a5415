//! Mock auth provider
//!
//! In-memory account store for tests and local development.
//! Thread-safe via `Arc<Mutex<>>`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::provider::{
    AuthProvider, AuthSession, ProviderError, SignUpOutcome,
};

#[derive(Debug, Clone)]
struct MockAccount {
    user_id: Uuid,
    password: String,
}

/// Mock auth provider that keeps accounts in memory.
#[derive(Debug, Clone, Default)]
pub struct MockAuthProvider {
    accounts: Arc<Mutex<HashMap<String, MockAccount>>>,
    reset_emails: Arc<Mutex<Vec<String>>>,
}

impl MockAuthProvider {
    /// Create a new mock auth provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emails that password resets were requested for.
    pub fn recorded_reset_emails(&self) -> Vec<String> {
        self.reset_emails
            .lock()
            .expect("reset_emails lock poisoned — prior test panicked")
            .clone()
    }

    fn session_for(account: &MockAccount, email: &str) -> AuthSession {
        AuthSession {
            access_token: format!("mock-access-{}", account.user_id),
            refresh_token: format!("mock-refresh-{}", account.user_id),
            expires_in: 3600,
            user_id: account.user_id,
            email: email.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl AuthProvider for MockAuthProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, ProviderError> {
        let mut accounts = self
            .accounts
            .lock()
            .map_err(|e| ProviderError::Request(format!("accounts lock poisoned: {e}")))?;

        if accounts.contains_key(email) {
            return Err(ProviderError::EmailAlreadyRegistered);
        }

        let account = MockAccount {
            user_id: Uuid::new_v4(),
            password: password.to_string(),
        };
        let outcome = SignUpOutcome {
            user_id: account.user_id,
            email: email.to_string(),
            session: Some(Self::session_for(&account, email)),
        };
        accounts.insert(email.to_string(), account);

        tracing::debug!(email = %email, "Mock auth: account registered");
        Ok(outcome)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, ProviderError> {
        let accounts = self
            .accounts
            .lock()
            .map_err(|e| ProviderError::Request(format!("accounts lock poisoned: {e}")))?;

        let account = accounts
            .get(email)
            .ok_or(ProviderError::InvalidCredentials)?;
        if account.password != password {
            return Err(ProviderError::InvalidCredentials);
        }

        Ok(Self::session_for(account, email))
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), ProviderError> {
        Ok(())
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), ProviderError> {
        self.reset_emails
            .lock()
            .map_err(|e| ProviderError::Request(format!("reset_emails lock poisoned: {e}")))?
            .push(email.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_sign_up_then_sign_in() {
        let provider = MockAuthProvider::new();

        let outcome = provider.sign_up("ana@example.com", "s3cret").await.unwrap();
        assert!(outcome.session.is_some());

        let session = provider.sign_in("ana@example.com", "s3cret").await.unwrap();
        assert_eq!(session.user_id, outcome.user_id);
        assert_eq!(session.email, "ana@example.com");
    }

    #[tokio::test]
    async fn test_mock_sign_up_duplicate_email_rejected() {
        let provider = MockAuthProvider::new();

        provider.sign_up("ana@example.com", "s3cret").await.unwrap();
        let result = provider.sign_up("ana@example.com", "other").await;
        assert!(matches!(
            result,
            Err(ProviderError::EmailAlreadyRegistered)
        ));
    }

    #[tokio::test]
    async fn test_mock_sign_in_wrong_password_rejected() {
        let provider = MockAuthProvider::new();

        provider.sign_up("ana@example.com", "s3cret").await.unwrap();
        let result = provider.sign_in("ana@example.com", "wrong").await;
        assert!(matches!(result, Err(ProviderError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_mock_sign_in_unknown_email_rejected() {
        let provider = MockAuthProvider::new();
        let result = provider.sign_in("ghost@example.com", "pw").await;
        assert!(matches!(result, Err(ProviderError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_mock_password_reset_recorded() {
        let provider = MockAuthProvider::new();
        provider
            .send_password_reset("ana@example.com")
            .await
            .unwrap();

        let recorded = provider.recorded_reset_emails();
        assert_eq!(recorded, vec!["ana@example.com".to_string()]);
    }
}
