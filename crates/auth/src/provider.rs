//! Hosted auth provider abstraction
//!
//! The account endpoints (sign-up, sign-in, sign-out, password recovery)
//! delegate credential handling to the hosted platform's auth API. This
//! module defines the provider trait, its configuration, and the factory
//! that selects between the real GoTrue client and the test mock.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Auth provider configuration error: {0}")]
    Configuration(String),

    #[error("Auth provider request error: {0}")]
    Request(String),

    #[error("Auth provider response error: {0}")]
    Response(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email is already registered")]
    EmailAlreadyRegistered,
}

/// An authenticated session issued by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub user_id: Uuid,
    pub email: String,
}

/// Result of a sign-up call.
///
/// When the provider requires email confirmation it creates the account
/// but withholds the session until the address is verified.
#[derive(Debug, Clone)]
pub struct SignUpOutcome {
    pub user_id: Uuid,
    pub email: String,
    pub session: Option<AuthSession>,
}

/// Auth provider configuration.
#[derive(Clone)]
pub struct AuthProviderConfig {
    /// Auth provider (gotrue, mock)
    pub provider: String,
    /// Base URL of the hosted platform (GoTrue lives under /auth/v1)
    pub base_url: String,
    /// Public (anon) API key sent with every request
    pub anon_key: String,
}

impl std::fmt::Debug for AuthProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthProviderConfig")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("anon_key", &"[REDACTED]")
            .finish()
    }
}

impl AuthProviderConfig {
    /// Create auth provider config from environment variables.
    pub fn from_env() -> Result<Self, ProviderError> {
        let provider = std::env::var("AUTH_PROVIDER").unwrap_or_else(|_| "mock".to_string());

        let base_url = std::env::var("SUPABASE_URL").unwrap_or_default();
        let anon_key = std::env::var("SUPABASE_ANON_KEY").unwrap_or_default();

        if provider != "mock" && (base_url.is_empty() || anon_key.is_empty()) {
            return Err(ProviderError::Configuration(
                "SUPABASE_URL and SUPABASE_ANON_KEY are required for the gotrue provider"
                    .to_string(),
            ));
        }

        Ok(Self {
            provider,
            base_url,
            anon_key,
        })
    }
}

/// Auth provider trait for different implementations.
#[async_trait::async_trait]
pub trait AuthProvider: Send + Sync {
    /// Register a new account with email + password.
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, ProviderError>;

    /// Exchange email + password for a session.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, ProviderError>;

    /// Revoke the session behind an access token.
    async fn sign_out(&self, access_token: &str) -> Result<(), ProviderError>;

    /// Send a password recovery email.
    async fn send_password_reset(&self, email: &str) -> Result<(), ProviderError>;
}

/// Factory for creating AuthProvider implementations.
pub struct AuthProviderFactory;

impl AuthProviderFactory {
    /// Create an AuthProvider based on configuration.
    pub fn create(config: AuthProviderConfig) -> Result<Box<dyn AuthProvider>, ProviderError> {
        match config.provider.as_str() {
            "gotrue" | "supabase" => {
                tracing::info!("Creating GoTrue auth provider");
                if config.base_url.is_empty() || config.anon_key.is_empty() {
                    return Err(ProviderError::Configuration(
                        "SUPABASE_URL and SUPABASE_ANON_KEY are required for the gotrue provider"
                            .to_string(),
                    ));
                }
                Ok(Box::new(crate::gotrue::GoTrueClient::new(config)))
            }
            "mock" => {
                tracing::info!("Creating mock auth provider");
                Ok(Box::new(crate::mock::MockAuthProvider::new()))
            }
            provider => Err(ProviderError::Configuration(format!(
                "Unknown auth provider: {}. Supported providers: gotrue, mock",
                provider
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_mock_succeeds() {
        let config = AuthProviderConfig {
            provider: "mock".to_string(),
            base_url: String::new(),
            anon_key: String::new(),
        };
        assert!(AuthProviderFactory::create(config).is_ok());
    }

    #[test]
    fn test_factory_gotrue_requires_url_and_key() {
        let config = AuthProviderConfig {
            provider: "gotrue".to_string(),
            base_url: String::new(),
            anon_key: String::new(),
        };
        assert!(AuthProviderFactory::create(config).is_err());

        let config = AuthProviderConfig {
            provider: "gotrue".to_string(),
            base_url: "https://project.supabase.co".to_string(),
            anon_key: "anon-key".to_string(),
        };
        assert!(AuthProviderFactory::create(config).is_ok());
    }

    #[test]
    fn test_factory_unknown_provider() {
        let config = AuthProviderConfig {
            provider: "invalid".to_string(),
            base_url: String::new(),
            anon_key: String::new(),
        };
        let err = match AuthProviderFactory::create(config) {
            Err(e) => e,
            Ok(_) => panic!("Expected error for unknown provider"),
        };
        assert!(err.to_string().contains("Unknown auth provider: invalid"));
    }

    #[test]
    fn test_config_debug_redacts_anon_key() {
        let config = AuthProviderConfig {
            provider: "gotrue".to_string(),
            base_url: "https://project.supabase.co".to_string(),
            anon_key: "super-secret-anon-key".to_string(),
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-anon-key"));
        assert!(debug.contains("[REDACTED]"));
    }
}
