//! Mock PIX gateway implementation
//!
//! Stores charges in memory for test assertions.
//! Thread-safe via `Arc<Mutex<>>`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};

use crate::{Charge, ChargeStatus, CreateChargeRequest, PixError, PixService};

/// Mock PIX gateway that records charges for test assertions.
#[derive(Debug, Clone, Default)]
pub struct MockPixService {
    charges: Arc<Mutex<HashMap<String, Charge>>>,
}

impl MockPixService {
    /// Create a new mock PIX gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return all recorded charges.
    pub fn recorded_charges(&self) -> Vec<Charge> {
        self.charges
            .lock()
            .expect("charges lock poisoned — prior test panicked")
            .values()
            .cloned()
            .collect()
    }

    /// Force a charge into a given status (simulates gateway-side progress).
    pub fn set_charge_status(&self, txid: &str, status: ChargeStatus) {
        let mut charges = self
            .charges
            .lock()
            .expect("charges lock poisoned — prior test panicked");
        if let Some(charge) = charges.get_mut(txid) {
            charge.status = status;
        }
    }
}

#[async_trait::async_trait]
impl PixService for MockPixService {
    async fn create_charge(&self, request: CreateChargeRequest) -> Result<Charge, PixError> {
        let txid = format!("mock-{}", request.correlation_id.simple());
        let charge = Charge {
            txid: txid.clone(),
            brcode: format!("00020126mockpix{}6304ABCD", request.correlation_id.simple()),
            qr_code_image_url: None,
            amount: request.amount,
            status: ChargeStatus::Active,
            expires_at: Some(
                Utc::now()
                    + Duration::seconds(request.expires_in_seconds.unwrap_or(3600)),
            ),
        };

        tracing::debug!(txid = %txid, "Mock PIX: recording charge");
        self.charges
            .lock()
            .map_err(|e| PixError::Request(format!("charges lock poisoned: {e}")))?
            .insert(txid, charge.clone());

        Ok(charge)
    }

    async fn get_charge(&self, txid: &str) -> Result<Charge, PixError> {
        self.charges
            .lock()
            .map_err(|e| PixError::Request(format!("charges lock poisoned: {e}")))?
            .get(txid)
            .cloned()
            .ok_or_else(|| PixError::Response(format!("Unknown charge: {}", txid)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn charge_request(amount: Decimal) -> CreateChargeRequest {
        CreateChargeRequest {
            correlation_id: Uuid::new_v4(),
            amount,
            description: "Mimo".to_string(),
            expires_in_seconds: None,
        }
    }

    #[tokio::test]
    async fn test_mock_create_charge_records() {
        let service = MockPixService::new();

        let charge = service
            .create_charge(charge_request(Decimal::new(2500, 2)))
            .await
            .unwrap();

        assert_eq!(charge.status, ChargeStatus::Active);
        assert_eq!(charge.amount, Decimal::new(2500, 2));
        assert!(charge.txid.starts_with("mock-"));
        assert!(charge.expires_at.is_some());

        let recorded = service.recorded_charges();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].txid, charge.txid);
    }

    #[tokio::test]
    async fn test_mock_get_charge_roundtrip() {
        let service = MockPixService::new();
        let created = service
            .create_charge(charge_request(Decimal::new(100, 2)))
            .await
            .unwrap();

        let fetched = service.get_charge(&created.txid).await.unwrap();
        assert_eq!(fetched.txid, created.txid);
        assert_eq!(fetched.brcode, created.brcode);
    }

    #[tokio::test]
    async fn test_mock_get_unknown_charge_errors() {
        let service = MockPixService::new();
        let result = service.get_charge("missing").await;
        assert!(matches!(result, Err(PixError::Response(_))));
    }

    #[tokio::test]
    async fn test_mock_set_charge_status() {
        let service = MockPixService::new();
        let created = service
            .create_charge(charge_request(Decimal::new(100, 2)))
            .await
            .unwrap();

        service.set_charge_status(&created.txid, ChargeStatus::Completed);

        let fetched = service.get_charge(&created.txid).await.unwrap();
        assert_eq!(fetched.status, ChargeStatus::Completed);
    }
}
