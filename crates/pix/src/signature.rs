//! Webhook signature verification
//!
//! The gateway signs every callback body with HMAC-SHA256 over the raw
//! bytes and sends the hex digest in the `x-pix-signature` header.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Verify a webhook signature against the shared secret.
///
/// Comparison is constant-time via `Mac::verify_slice`.
pub fn verify_webhook_signature(payload: &[u8], signature_hex: &str, secret: &str) -> bool {
    let Ok(expected) = hex::decode(signature_hex.trim()) else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(payload);
    mac.verify_slice(&expected).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(payload: &[u8], secret: &str) -> String {
        let mut mac =
            HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key size");
        mac.update(payload);
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn test_valid_signature_accepted() {
        let payload = br#"{"txid":"abc","status":"COMPLETED"}"#;
        let signature = sign(payload, "whsec_test123");

        assert!(verify_webhook_signature(payload, &signature, "whsec_test123"));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let payload = br#"{"txid":"abc","status":"COMPLETED"}"#;
        let signature = sign(payload, "wrong_secret");

        assert!(!verify_webhook_signature(
            payload,
            &signature,
            "whsec_test123"
        ));
    }

    #[test]
    fn test_modified_payload_rejected() {
        let payload = br#"{"txid":"abc","status":"COMPLETED"}"#;
        let tampered = br#"{"txid":"abc","status":"COMPLETED","extra":true}"#;
        let signature = sign(payload, "whsec_test123");

        assert!(!verify_webhook_signature(
            tampered,
            &signature,
            "whsec_test123"
        ));
    }

    #[test]
    fn test_non_hex_signature_rejected() {
        let payload = br#"{"txid":"abc"}"#;
        assert!(!verify_webhook_signature(
            payload,
            "not-a-hex-string",
            "whsec_test123"
        ));
    }

    #[test]
    fn test_signature_with_surrounding_whitespace_accepted() {
        let payload = br#"{"txid":"abc"}"#;
        let signature = format!("  {}  ", sign(payload, "whsec_test123"));

        assert!(verify_webhook_signature(payload, &signature, "whsec_test123"));
    }
}
