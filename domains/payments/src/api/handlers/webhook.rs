//! Gateway webhook handler (internal, signature-authenticated)

use axum::{body::Bytes, extract::State, http::HeaderMap, Json};
use serde_json::json;

use mimo_common::{Error, Result};
use mimo_pix::verify_webhook_signature;

use crate::api::middleware::PaymentsState;
use crate::reconcile::{apply_callback, PixCallbackPayload};

/// Header the gateway sends the HMAC-SHA256 body signature in
pub const SIGNATURE_HEADER: &str = "x-pix-signature";

/// Receive a gateway status callback and reconcile it
pub async fn pix_webhook(
    State(state): State<PaymentsState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<serde_json::Value>> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| Error::Authentication("Missing webhook signature".to_string()))?;

    if !verify_webhook_signature(&body, signature, &state.webhook_secret) {
        tracing::warn!("Webhook rejected: invalid signature");
        return Err(Error::Authentication(
            "Invalid webhook signature".to_string(),
        ));
    }

    let payload: PixCallbackPayload = serde_json::from_slice(&body)
        .map_err(|e| Error::Validation(format!("Malformed webhook payload: {}", e)))?;

    tracing::info!(txid = %payload.txid, status = %payload.status, "Webhook received");

    let outcome = apply_callback(&state, payload).await?;

    Ok(Json(json!({
        "received": true,
        "result": outcome,
    })))
}
