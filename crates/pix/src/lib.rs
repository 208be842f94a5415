//! Mimo PIX gateway service
//!
//! Provides PIX charge creation and lookup against the payment gateway:
//! - HTTP client for the gateway's charge API
//! - Mock gateway for testing and development
//! - HMAC-SHA256 webhook signature verification

pub mod client;
pub mod mock;
pub mod signature;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub use signature::verify_webhook_signature;

#[derive(Error, Debug)]
pub enum PixError {
    #[error("PIX configuration error: {0}")]
    Configuration(String),

    #[error("PIX request error: {0}")]
    Request(String),

    #[error("PIX response error: {0}")]
    Response(String),
}

/// Gateway-side charge status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChargeStatus {
    Active,
    Processing,
    Completed,
    Expired,
    Cancelled,
}

impl std::fmt::Display for ChargeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChargeStatus::Active => write!(f, "ACTIVE"),
            ChargeStatus::Processing => write!(f, "PROCESSING"),
            ChargeStatus::Completed => write!(f, "COMPLETED"),
            ChargeStatus::Expired => write!(f, "EXPIRED"),
            ChargeStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Request to create a charge.
///
/// `correlation_id` is the local payment record id; the gateway echoes it
/// back so callbacks can be matched even if the txid is lost.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChargeRequest {
    pub correlation_id: Uuid,
    /// BRL amount with two decimal places
    pub amount: Decimal,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in_seconds: Option<i64>,
}

/// A charge as known by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Charge {
    /// Gateway transaction id (the reconciliation key)
    pub txid: String,
    /// PIX copy-and-paste code
    pub brcode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code_image_url: Option<String>,
    pub amount: Decimal,
    pub status: ChargeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// PIX gateway configuration.
#[derive(Clone)]
pub struct PixConfig {
    /// Gateway provider (pix, mock)
    pub provider: String,
    /// Base URL of the gateway API
    pub base_url: String,
    /// API key for authenticating with the gateway
    pub api_key: String,
    /// Shared secret for webhook signature verification
    pub webhook_secret: String,
}

impl std::fmt::Debug for PixConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixConfig")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("webhook_secret", &"[REDACTED]")
            .finish()
    }
}

impl PixConfig {
    /// Create PIX config from environment variables.
    pub fn from_env() -> Result<Self, PixError> {
        let provider = std::env::var("PIX_PROVIDER").unwrap_or_else(|_| "mock".to_string());

        let base_url = std::env::var("PIX_BASE_URL").unwrap_or_default();
        let api_key = std::env::var("PIX_API_KEY").unwrap_or_default();
        let webhook_secret = std::env::var("PIX_WEBHOOK_SECRET").unwrap_or_else(|_| {
            if provider == "mock" {
                "mock-webhook-secret".to_string()
            } else {
                String::new()
            }
        });

        if provider != "mock" {
            if base_url.is_empty() || api_key.is_empty() {
                return Err(PixError::Configuration(
                    "PIX_BASE_URL and PIX_API_KEY are required for the pix provider".to_string(),
                ));
            }
            if webhook_secret.is_empty() {
                return Err(PixError::Configuration(
                    "PIX_WEBHOOK_SECRET is required for the pix provider".to_string(),
                ));
            }
        }

        Ok(Self {
            provider,
            base_url,
            api_key,
            webhook_secret,
        })
    }
}

/// PIX gateway service trait for different implementations.
#[async_trait::async_trait]
pub trait PixService: Send + Sync {
    /// Create a charge and return the gateway's view of it.
    async fn create_charge(&self, request: CreateChargeRequest) -> Result<Charge, PixError>;

    /// Look up a charge by gateway transaction id.
    async fn get_charge(&self, txid: &str) -> Result<Charge, PixError>;
}

/// Factory for creating PixService implementations.
pub struct PixServiceFactory;

impl PixServiceFactory {
    /// Create a PixService based on configuration.
    pub fn create(config: PixConfig) -> Result<Box<dyn PixService>, PixError> {
        match config.provider.as_str() {
            "pix" => {
                tracing::info!("Creating PIX gateway client");
                if config.base_url.is_empty() || config.api_key.is_empty() {
                    return Err(PixError::Configuration(
                        "PIX_BASE_URL and PIX_API_KEY are required for the pix provider"
                            .to_string(),
                    ));
                }
                Ok(Box::new(client::PixClient::new(config)))
            }
            "mock" => {
                tracing::info!("Creating mock PIX gateway");
                Ok(Box::new(mock::MockPixService::new()))
            }
            provider => Err(PixError::Configuration(format!(
                "Unknown PIX provider: {}. Supported providers: pix, mock",
                provider
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_charge_status_serialization() {
        assert_eq!(
            serde_json::to_string(&ChargeStatus::Active).unwrap(),
            "\"ACTIVE\""
        );
        assert_eq!(
            serde_json::to_string(&ChargeStatus::Completed).unwrap(),
            "\"COMPLETED\""
        );
        assert_eq!(
            serde_json::to_string(&ChargeStatus::Cancelled).unwrap(),
            "\"CANCELLED\""
        );
    }

    #[test]
    fn test_charge_status_display_matches_wire_form() {
        let status: ChargeStatus = serde_json::from_str("\"EXPIRED\"").unwrap();
        assert_eq!(status, ChargeStatus::Expired);
        assert_eq!(status.to_string(), "EXPIRED");
    }

    #[test]
    fn test_create_charge_request_serialization_camel_case() {
        let request = CreateChargeRequest {
            correlation_id: Uuid::new_v4(),
            amount: Decimal::new(1050, 2),
            description: "Mimo for @ana".to_string(),
            expires_in_seconds: Some(3600),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("correlationId").is_some());
        assert_eq!(json["amount"], serde_json::json!("10.50"));
        assert_eq!(json["expiresInSeconds"], 3600);
    }

    #[test]
    fn test_create_charge_request_omits_missing_expiry() {
        let request = CreateChargeRequest {
            correlation_id: Uuid::new_v4(),
            amount: Decimal::new(100, 2),
            description: "tip".to_string(),
            expires_in_seconds: None,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("expiresInSeconds"));
    }

    #[test]
    fn test_factory_mock_succeeds() {
        let config = PixConfig {
            provider: "mock".to_string(),
            base_url: String::new(),
            api_key: String::new(),
            webhook_secret: "mock-webhook-secret".to_string(),
        };
        assert!(PixServiceFactory::create(config).is_ok());
    }

    #[test]
    fn test_factory_pix_requires_url_and_key() {
        let config = PixConfig {
            provider: "pix".to_string(),
            base_url: String::new(),
            api_key: String::new(),
            webhook_secret: "secret".to_string(),
        };
        assert!(PixServiceFactory::create(config).is_err());
    }

    #[test]
    fn test_factory_unknown_provider() {
        let config = PixConfig {
            provider: "stripe".to_string(),
            base_url: String::new(),
            api_key: String::new(),
            webhook_secret: String::new(),
        };
        let err = match PixServiceFactory::create(config) {
            Err(e) => e,
            Ok(_) => panic!("Expected error for unknown provider"),
        };
        assert!(err.to_string().contains("Unknown PIX provider: stripe"));
    }

    #[test]
    fn test_config_debug_redacts_secrets() {
        let config = PixConfig {
            provider: "pix".to_string(),
            base_url: "https://gateway.example.com".to_string(),
            api_key: "pix-live-key".to_string(),
            webhook_secret: "whsec-value".to_string(),
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("pix-live-key"));
        assert!(!debug.contains("whsec-value"));
        assert!(debug.contains("[REDACTED]"));
    }
}
