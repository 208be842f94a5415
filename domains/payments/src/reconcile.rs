//! Webhook reconciliation
//!
//! Maps the gateway's asynchronous status callback back onto the local
//! payment record found by `provider_tx_id`, applies the lifecycle
//! transition, and fans out the side effects (notifications, conversation
//! unlock, creator email). Duplicate deliveries are no-ops: a record
//! already in a terminal state acknowledges without changing anything.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mimo_common::{Error, Result};
use mimo_email::content::format_brl;

use crate::api::middleware::PaymentsState;
use crate::domain::entities::PaymentStatus;
use crate::repository::transactions::{
    fetch_party_profiles, persist_mimo, persist_service_payment, NotificationInsert,
};

/// Callback payload posted by the gateway
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixCallbackPayload {
    pub txid: String,
    pub status: String,
    pub end_to_end_id: Option<String>,
    pub paid_amount: Option<Decimal>,
}

/// What a gateway status means for the local lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    /// Acknowledge without touching the record
    Ignore(&'static str),
    StartProcessing,
    Complete,
    Fail,
    Cancel,
}

/// Map a gateway charge status onto a lifecycle action.
///
/// Returns `None` for statuses this service does not know.
pub fn map_gateway_status(status: &str) -> Option<CallbackAction> {
    match status.to_ascii_uppercase().as_str() {
        "ACTIVE" => Some(CallbackAction::Ignore("charge still awaiting payment")),
        "PROCESSING" => Some(CallbackAction::StartProcessing),
        "COMPLETED" | "PAID" => Some(CallbackAction::Complete),
        "EXPIRED" | "CANCELLED" => Some(CallbackAction::Cancel),
        "FAILED" | "PAYMENT_FAILED" => Some(CallbackAction::Fail),
        // The lifecycle has no refunded state; refunds are acknowledged only
        "REFUNDED" => Some(CallbackAction::Ignore("refund events do not change state")),
        _ => None,
    }
}

/// Result of reconciling one callback
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum WebhookOutcome {
    Updated {
        kind: &'static str,
        id: Uuid,
        status: PaymentStatus,
    },
    AlreadyFinal {
        kind: &'static str,
        id: Uuid,
        status: PaymentStatus,
    },
    Ignored {
        reason: &'static str,
    },
    UnknownTxid,
}

/// Reconcile one gateway callback against the local records
pub async fn apply_callback(
    state: &PaymentsState,
    payload: PixCallbackPayload,
) -> Result<WebhookOutcome> {
    if let Some(mimo) = state.repos.mimos.find_by_txid(&payload.txid).await? {
        return reconcile_mimo(state, mimo, payload).await;
    }

    if let Some(payment) = state
        .repos
        .service_payments
        .find_by_txid(&payload.txid)
        .await?
    {
        return reconcile_service_payment(state, payment, payload).await;
    }

    // Unknown txids are acknowledged: the gateway retries on non-2xx and
    // this callback will never match a record.
    tracing::warn!(txid = %payload.txid, "Callback for unknown txid acknowledged");
    Ok(WebhookOutcome::UnknownTxid)
}

fn resolve_action(payload: &PixCallbackPayload) -> Result<CallbackAction> {
    map_gateway_status(&payload.status).ok_or_else(|| {
        Error::Validation(format!("Unknown gateway status: '{}'", payload.status))
    })
}

fn check_amount(expected: Decimal, payload: &PixCallbackPayload) {
    if let Some(paid) = payload.paid_amount {
        if paid != expected {
            tracing::warn!(
                txid = %payload.txid,
                %expected,
                %paid,
                "Callback amount differs from charge amount"
            );
        }
    }
}

async fn reconcile_mimo(
    state: &PaymentsState,
    mut mimo: crate::domain::entities::Mimo,
    payload: PixCallbackPayload,
) -> Result<WebhookOutcome> {
    if mimo.status.is_terminal() {
        tracing::info!(mimo_id = %mimo.id, status = %mimo.status, "Duplicate callback ignored");
        return Ok(WebhookOutcome::AlreadyFinal {
            kind: "mimo",
            id: mimo.id,
            status: mimo.status,
        });
    }

    let action = resolve_action(&payload)?;

    match action {
        CallbackAction::Ignore(reason) => Ok(WebhookOutcome::Ignored { reason }),

        CallbackAction::StartProcessing => {
            mimo.start_processing()?;
            let updated = persist_mimo(state.repos.pool(), &mimo, None).await?;
            Ok(WebhookOutcome::Updated {
                kind: "mimo",
                id: updated.id,
                status: updated.status,
            })
        }

        CallbackAction::Complete => {
            check_amount(mimo.amount, &payload);
            mimo.complete(payload.end_to_end_id.clone().unwrap_or_default())?;

            let (client, creator) =
                fetch_party_profiles(state.repos.pool(), mimo.client_id, mimo.creator_id).await?;

            let notification = NotificationInsert {
                user_id: mimo.creator_id,
                kind: "mimo_received",
                title: format!("You received a mimo from {}", client.name()),
                body: format!("{} sent you {}", client.name(), format_brl(mimo.amount)),
                data: serde_json::json!({ "mimo_id": mimo.id, "amount": mimo.amount }),
            };

            let updated = persist_mimo(state.repos.pool(), &mimo, Some(notification)).await?;

            // Email is best-effort: the payment is already reconciled
            if let Err(e) = state
                .email
                .send_mimo_received(
                    &creator.email,
                    creator.name(),
                    client.name(),
                    updated.amount,
                    updated.id,
                )
                .await
            {
                tracing::warn!(error = %e, mimo_id = %updated.id, "Mimo email failed");
            }

            tracing::info!(mimo_id = %updated.id, "Mimo completed");
            Ok(WebhookOutcome::Updated {
                kind: "mimo",
                id: updated.id,
                status: updated.status,
            })
        }

        CallbackAction::Fail | CallbackAction::Cancel => {
            if action == CallbackAction::Fail {
                mimo.fail()?;
            } else {
                mimo.cancel()?;
            }

            let notification = NotificationInsert {
                user_id: mimo.client_id,
                kind: "payment_failed",
                title: "Your mimo was not completed".to_string(),
                body: format!("The payment of {} did not go through", format_brl(mimo.amount)),
                data: serde_json::json!({ "mimo_id": mimo.id }),
            };

            let updated = persist_mimo(state.repos.pool(), &mimo, Some(notification)).await?;
            Ok(WebhookOutcome::Updated {
                kind: "mimo",
                id: updated.id,
                status: updated.status,
            })
        }
    }
}

async fn reconcile_service_payment(
    state: &PaymentsState,
    mut payment: crate::domain::entities::ServicePayment,
    payload: PixCallbackPayload,
) -> Result<WebhookOutcome> {
    if payment.status.is_terminal() {
        tracing::info!(
            payment_id = %payment.id,
            status = %payment.status,
            "Duplicate callback ignored"
        );
        return Ok(WebhookOutcome::AlreadyFinal {
            kind: "service_payment",
            id: payment.id,
            status: payment.status,
        });
    }

    let action = resolve_action(&payload)?;

    match action {
        CallbackAction::Ignore(reason) => Ok(WebhookOutcome::Ignored { reason }),

        CallbackAction::StartProcessing => {
            payment.start_processing()?;
            let updated = persist_service_payment(state.repos.pool(), &payment, None).await?;
            Ok(WebhookOutcome::Updated {
                kind: "service_payment",
                id: updated.id,
                status: updated.status,
            })
        }

        CallbackAction::Complete => {
            check_amount(payment.amount, &payload);
            payment.complete(payload.end_to_end_id.clone().unwrap_or_default())?;

            let (client, creator) =
                fetch_party_profiles(state.repos.pool(), payment.client_id, payment.creator_id)
                    .await?;

            let service_title = state
                .repos
                .service_payments
                .find_purchasable_service(payment.service_id)
                .await?
                .map(|s| s.title)
                .unwrap_or_else(|| "your service".to_string());

            let notification = NotificationInsert {
                user_id: payment.creator_id,
                kind: "service_purchased",
                title: format!("{} purchased '{}'", client.name(), service_title),
                body: format!(
                    "{} paid {} — a conversation is now open",
                    client.name(),
                    format_brl(payment.amount)
                ),
                data: serde_json::json!({
                    "service_payment_id": payment.id,
                    "service_id": payment.service_id,
                }),
            };

            let updated =
                persist_service_payment(state.repos.pool(), &payment, Some(notification)).await?;

            if let Err(e) = state
                .email
                .send_service_purchased(
                    &creator.email,
                    creator.name(),
                    client.name(),
                    &service_title,
                    updated.amount,
                    updated.id,
                )
                .await
            {
                tracing::warn!(error = %e, payment_id = %updated.id, "Service email failed");
            }

            tracing::info!(
                payment_id = %updated.id,
                conversation_id = ?updated.conversation_id,
                "Service payment completed, conversation unlocked"
            );
            Ok(WebhookOutcome::Updated {
                kind: "service_payment",
                id: updated.id,
                status: updated.status,
            })
        }

        CallbackAction::Fail | CallbackAction::Cancel => {
            if action == CallbackAction::Fail {
                payment.fail()?;
            } else {
                payment.cancel()?;
            }

            let notification = NotificationInsert {
                user_id: payment.client_id,
                kind: "payment_failed",
                title: "Your purchase was not completed".to_string(),
                body: format!(
                    "The payment of {} did not go through",
                    format_brl(payment.amount)
                ),
                data: serde_json::json!({ "service_payment_id": payment.id }),
            };

            let updated =
                persist_service_payment(state.repos.pool(), &payment, Some(notification)).await?;
            Ok(WebhookOutcome::Updated {
                kind: "service_payment",
                id: updated.id,
                status: updated.status,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping_completed() {
        assert_eq!(
            map_gateway_status("COMPLETED"),
            Some(CallbackAction::Complete)
        );
        assert_eq!(map_gateway_status("PAID"), Some(CallbackAction::Complete));
    }

    #[test]
    fn test_status_mapping_is_case_insensitive() {
        assert_eq!(
            map_gateway_status("completed"),
            Some(CallbackAction::Complete)
        );
        assert_eq!(
            map_gateway_status("Processing"),
            Some(CallbackAction::StartProcessing)
        );
    }

    #[test]
    fn test_status_mapping_cancellation_variants() {
        assert_eq!(map_gateway_status("EXPIRED"), Some(CallbackAction::Cancel));
        assert_eq!(
            map_gateway_status("CANCELLED"),
            Some(CallbackAction::Cancel)
        );
    }

    #[test]
    fn test_status_mapping_failures() {
        assert_eq!(map_gateway_status("FAILED"), Some(CallbackAction::Fail));
        assert_eq!(
            map_gateway_status("PAYMENT_FAILED"),
            Some(CallbackAction::Fail)
        );
    }

    #[test]
    fn test_status_mapping_ignores() {
        assert!(matches!(
            map_gateway_status("ACTIVE"),
            Some(CallbackAction::Ignore(_))
        ));
        assert!(matches!(
            map_gateway_status("REFUNDED"),
            Some(CallbackAction::Ignore(_))
        ));
    }

    #[test]
    fn test_status_mapping_unknown_is_none() {
        assert_eq!(map_gateway_status("SOMETHING_ELSE"), None);
        assert_eq!(map_gateway_status(""), None);
    }

    #[test]
    fn test_payload_deserialization_camel_case() {
        let json = r#"{
            "txid": "tx-1",
            "status": "COMPLETED",
            "endToEndId": "E123",
            "paidAmount": "25.00"
        }"#;

        let payload: PixCallbackPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.txid, "tx-1");
        assert_eq!(payload.status, "COMPLETED");
        assert_eq!(payload.end_to_end_id.as_deref(), Some("E123"));
        assert_eq!(payload.paid_amount, Some(Decimal::new(2500, 2)));
    }

    #[test]
    fn test_payload_optional_fields_absent() {
        let json = r#"{"txid": "tx-1", "status": "EXPIRED"}"#;
        let payload: PixCallbackPayload = serde_json::from_str(json).unwrap();
        assert!(payload.end_to_end_id.is_none());
        assert!(payload.paid_amount.is_none());
    }

    #[test]
    fn test_outcome_serialization_tags() {
        let outcome = WebhookOutcome::Updated {
            kind: "mimo",
            id: Uuid::new_v4(),
            status: PaymentStatus::Completed,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "updated");
        assert_eq!(json["kind"], "mimo");
        assert_eq!(json["status"], "completed");

        let json = serde_json::to_value(WebhookOutcome::UnknownTxid).unwrap();
        assert_eq!(json["outcome"], "unknown_txid");
    }
}
