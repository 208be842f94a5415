//! PIX gateway HTTP client
//!
//! Real client that talks to the gateway's charge API at
//! `{base_url}/api/v1/charges`.

use crate::{Charge, CreateChargeRequest, PixConfig, PixError, PixService};

/// Real PIX gateway HTTP client.
pub struct PixClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PixClient {
    /// Create a new PIX client from configuration.
    pub fn new(config: PixConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        }
    }

    async fn read_charge(response: reqwest::Response) -> Result<Charge, PixError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read response body".to_string());
            return Err(PixError::Response(format!(
                "PIX gateway returned {}: {}",
                status, body
            )));
        }

        response
            .json::<Charge>()
            .await
            .map_err(|e| PixError::Response(e.to_string()))
    }
}

#[async_trait::async_trait]
impl PixService for PixClient {
    async fn create_charge(&self, request: CreateChargeRequest) -> Result<Charge, PixError> {
        let response = self
            .http
            .post(format!("{}/api/v1/charges", self.base_url))
            .header("Authorization", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| PixError::Request(e.to_string()))?;

        let charge = Self::read_charge(response).await?;
        tracing::debug!(txid = %charge.txid, "PIX charge created");
        Ok(charge)
    }

    async fn get_charge(&self, txid: &str) -> Result<Charge, PixError> {
        let response = self
            .http
            .get(format!("{}/api/v1/charges/{}", self.base_url, txid))
            .header("Authorization", &self.api_key)
            .send()
            .await
            .map_err(|e| PixError::Request(e.to_string()))?;

        Self::read_charge(response).await
    }
}
