//! Domain entities for the Payments domain
//!
//! Mimos (tips) and service payments share the same lifecycle; both are
//! reconciled against the gateway by `provider_tx_id`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mimo_common::{Error, Result};

use crate::domain::state::{
    PaymentEvent, PaymentGuardContext, PaymentState, PaymentStateMachine, StateError,
};

/// Payment lifecycle status — matches the `payment_status` DB enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Failed,
    Cancelled,
}

impl PaymentStatus {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        self.to_state().is_terminal()
    }

    /// Convert to state machine state
    pub fn to_state(&self) -> PaymentState {
        match self {
            PaymentStatus::Pending => PaymentState::Pending,
            PaymentStatus::Processing => PaymentState::Processing,
            PaymentStatus::Completed => PaymentState::Completed,
            PaymentStatus::Failed => PaymentState::Failed,
            PaymentStatus::Cancelled => PaymentState::Cancelled,
        }
    }

    /// Create from state machine state
    pub fn from_state(state: PaymentState) -> Self {
        match state {
            PaymentState::Pending => PaymentStatus::Pending,
            PaymentState::Processing => PaymentStatus::Processing,
            PaymentState::Completed => PaymentStatus::Completed,
            PaymentState::Failed => PaymentStatus::Failed,
            PaymentState::Cancelled => PaymentStatus::Cancelled,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_state())
    }
}

/// Minimum chargeable BRL amount
pub const MIN_AMOUNT_BRL: Decimal = Decimal::from_parts(100, 0, 0, false, 2);

/// Maximum chargeable BRL amount
pub const MAX_AMOUNT_BRL: Decimal = Decimal::from_parts(500_000, 0, 0, false, 2);

/// Maximum tip message length (varchar(280))
const MAX_MIMO_MESSAGE_LENGTH: usize = 280;

fn validate_amount(amount: Decimal) -> Result<()> {
    if amount < MIN_AMOUNT_BRL || amount > MAX_AMOUNT_BRL {
        return Err(Error::Validation(format!(
            "Amount must be between {} and {} BRL",
            MIN_AMOUNT_BRL, MAX_AMOUNT_BRL
        )));
    }
    Ok(())
}

fn map_state_error(err: StateError) -> Error {
    match err {
        StateError::InvalidTransition { from, event, .. } => Error::Validation(format!(
            "Invalid payment transition: cannot apply '{}' event from '{}' state",
            event, from
        )),
        StateError::TerminalState(state) => Error::Conflict(format!(
            "Payment is already in terminal state '{}'",
            state
        )),
        StateError::GuardFailed(msg) => Error::Validation(msg),
    }
}

/// Mimo entity — a monetary tip from a client to a creator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Mimo {
    pub id: Uuid,
    /// Sending user
    pub client_id: Uuid,
    /// Receiving creator's user id
    pub creator_id: Uuid,
    pub amount: Decimal,
    pub message: Option<String>,
    pub status: PaymentStatus,
    pub provider_tx_id: Option<String>,
    pub brcode: Option<String>,
    pub end_to_end_id: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Mimo {
    /// Create a new mimo in the pending state
    pub fn new(
        client_id: Uuid,
        creator_id: Uuid,
        amount: Decimal,
        message: Option<String>,
    ) -> Result<Self> {
        if client_id == creator_id {
            return Err(Error::Validation(
                "Cannot send a mimo to yourself".to_string(),
            ));
        }
        validate_amount(amount)?;
        if let Some(ref m) = message {
            if m.len() > MAX_MIMO_MESSAGE_LENGTH {
                return Err(Error::Validation(format!(
                    "Message must be at most {} characters",
                    MAX_MIMO_MESSAGE_LENGTH
                )));
            }
        }

        let now = Utc::now();
        Ok(Mimo {
            id: Uuid::new_v4(),
            client_id,
            creator_id,
            amount,
            message,
            status: PaymentStatus::default(),
            provider_tx_id: None,
            brcode: None,
            end_to_end_id: None,
            paid_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Attach the gateway charge created for this mimo
    pub fn attach_charge(&mut self, txid: String, brcode: String) {
        self.provider_tx_id = Some(txid);
        self.brcode = Some(brcode);
    }

    /// Gateway acknowledged the charge is being paid
    pub fn start_processing(&mut self) -> Result<()> {
        self.apply(PaymentEvent::StartProcessing, None)
    }

    /// Gateway confirmed settlement
    pub fn complete(&mut self, end_to_end_id: String) -> Result<()> {
        let context = PaymentGuardContext {
            has_end_to_end_id: !end_to_end_id.is_empty(),
        };
        self.apply(PaymentEvent::Complete, Some(&context))?;
        self.end_to_end_id = Some(end_to_end_id);
        self.paid_at = Some(Utc::now());
        Ok(())
    }

    /// Gateway reported a payment failure
    pub fn fail(&mut self) -> Result<()> {
        self.apply(PaymentEvent::Fail, None)
    }

    /// Charge was cancelled or expired without payment
    pub fn cancel(&mut self) -> Result<()> {
        self.apply(PaymentEvent::Cancel, None)
    }

    fn apply(&mut self, event: PaymentEvent, context: Option<&PaymentGuardContext>) -> Result<()> {
        let next = PaymentStateMachine::transition(self.status.to_state(), event, context)
            .map_err(map_state_error)?;
        self.status = PaymentStatus::from_state(next);
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Service payment entity — a purchase of a creator-defined service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ServicePayment {
    pub id: Uuid,
    /// Buying user
    pub client_id: Uuid,
    /// Selling creator's user id
    pub creator_id: Uuid,
    pub service_id: Uuid,
    /// Conversation unlocked by this purchase (set on completion)
    pub conversation_id: Option<Uuid>,
    pub amount: Decimal,
    pub status: PaymentStatus,
    pub provider_tx_id: Option<String>,
    pub brcode: Option<String>,
    pub end_to_end_id: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ServicePayment {
    /// Create a new service payment in the pending state
    pub fn new(
        client_id: Uuid,
        creator_id: Uuid,
        service_id: Uuid,
        amount: Decimal,
    ) -> Result<Self> {
        if client_id == creator_id {
            return Err(Error::Validation(
                "Cannot purchase your own service".to_string(),
            ));
        }
        validate_amount(amount)?;

        let now = Utc::now();
        Ok(ServicePayment {
            id: Uuid::new_v4(),
            client_id,
            creator_id,
            service_id,
            conversation_id: None,
            amount,
            status: PaymentStatus::default(),
            provider_tx_id: None,
            brcode: None,
            end_to_end_id: None,
            paid_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Attach the gateway charge created for this payment
    pub fn attach_charge(&mut self, txid: String, brcode: String) {
        self.provider_tx_id = Some(txid);
        self.brcode = Some(brcode);
    }

    /// Gateway acknowledged the charge is being paid
    pub fn start_processing(&mut self) -> Result<()> {
        self.apply(PaymentEvent::StartProcessing, None)
    }

    /// Gateway confirmed settlement
    pub fn complete(&mut self, end_to_end_id: String) -> Result<()> {
        let context = PaymentGuardContext {
            has_end_to_end_id: !end_to_end_id.is_empty(),
        };
        self.apply(PaymentEvent::Complete, Some(&context))?;
        self.end_to_end_id = Some(end_to_end_id);
        self.paid_at = Some(Utc::now());
        Ok(())
    }

    /// Gateway reported a payment failure
    pub fn fail(&mut self) -> Result<()> {
        self.apply(PaymentEvent::Fail, None)
    }

    /// Charge was cancelled or expired without payment
    pub fn cancel(&mut self) -> Result<()> {
        self.apply(PaymentEvent::Cancel, None)
    }

    fn apply(&mut self, event: PaymentEvent, context: Option<&PaymentGuardContext>) -> Result<()> {
        let next = PaymentStateMachine::transition(self.status.to_state(), event, context)
            .map_err(map_state_error)?;
        self.status = PaymentStatus::from_state(next);
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_mimo() -> Mimo {
        Mimo::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Decimal::new(2500, 2),
            Some("Adorei seu trabalho!".to_string()),
        )
        .unwrap()
    }

    // PaymentStatus

    #[test]
    fn test_payment_status_default_is_pending() {
        assert_eq!(PaymentStatus::default(), PaymentStatus::Pending);
    }

    #[test]
    fn test_payment_status_serialization_lowercase() {
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Completed).unwrap(),
            "\"completed\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
    }

    #[test]
    fn test_payment_status_terminal_mapping() {
        assert!(!PaymentStatus::Pending.is_terminal());
        assert!(!PaymentStatus::Processing.is_terminal());
        assert!(PaymentStatus::Completed.is_terminal());
        assert!(PaymentStatus::Failed.is_terminal());
        assert!(PaymentStatus::Cancelled.is_terminal());
    }

    // Mimo

    #[test]
    fn test_mimo_creation() {
        let mimo = valid_mimo();
        assert_eq!(mimo.status, PaymentStatus::Pending);
        assert_eq!(mimo.amount, Decimal::new(2500, 2));
        assert!(mimo.provider_tx_id.is_none());
        assert!(mimo.paid_at.is_none());
    }

    #[test]
    fn test_mimo_to_self_rejected() {
        let user = Uuid::new_v4();
        let result = Mimo::new(user, user, Decimal::new(2500, 2), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_mimo_amount_bounds() {
        let client = Uuid::new_v4();
        let creator = Uuid::new_v4();

        assert!(Mimo::new(client, creator, Decimal::new(100, 2), None).is_ok());
        assert!(Mimo::new(client, creator, Decimal::new(99, 2), None).is_err());
        assert!(Mimo::new(client, creator, Decimal::new(500_000, 2), None).is_ok());
        assert!(Mimo::new(client, creator, Decimal::new(500_001, 2), None).is_err());
    }

    #[test]
    fn test_mimo_message_length_limit() {
        let result = Mimo::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Decimal::new(2500, 2),
            Some("a".repeat(281)),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_mimo_attach_charge() {
        let mut mimo = valid_mimo();
        mimo.attach_charge("txid-123".to_string(), "00020126...".to_string());
        assert_eq!(mimo.provider_tx_id.as_deref(), Some("txid-123"));
        assert_eq!(mimo.brcode.as_deref(), Some("00020126..."));
    }

    #[test]
    fn test_mimo_lifecycle_happy_path() {
        let mut mimo = valid_mimo();

        mimo.start_processing().unwrap();
        assert_eq!(mimo.status, PaymentStatus::Processing);

        mimo.complete("E12345678202408051200abcdef".to_string())
            .unwrap();
        assert_eq!(mimo.status, PaymentStatus::Completed);
        assert!(mimo.paid_at.is_some());
        assert_eq!(
            mimo.end_to_end_id.as_deref(),
            Some("E12345678202408051200abcdef")
        );
    }

    #[test]
    fn test_mimo_complete_straight_from_pending() {
        let mut mimo = valid_mimo();
        mimo.complete("E1".to_string()).unwrap();
        assert_eq!(mimo.status, PaymentStatus::Completed);
    }

    #[test]
    fn test_mimo_complete_requires_end_to_end_id() {
        let mut mimo = valid_mimo();
        let result = mimo.complete(String::new());
        assert!(result.is_err());
        assert_eq!(mimo.status, PaymentStatus::Pending);
    }

    #[test]
    fn test_mimo_terminal_is_conflict() {
        let mut mimo = valid_mimo();
        mimo.complete("E1".to_string()).unwrap();

        let err = mimo.fail().unwrap_err();
        assert_eq!(
            err.status_code(),
            axum::http::StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_mimo_cancel_from_pending() {
        let mut mimo = valid_mimo();
        mimo.cancel().unwrap();
        assert_eq!(mimo.status, PaymentStatus::Cancelled);
    }

    // ServicePayment

    #[test]
    fn test_service_payment_creation() {
        let payment = ServicePayment::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            Decimal::new(15000, 2),
        )
        .unwrap();

        assert_eq!(payment.status, PaymentStatus::Pending);
        assert!(payment.conversation_id.is_none());
    }

    #[test]
    fn test_service_payment_own_service_rejected() {
        let user = Uuid::new_v4();
        let result = ServicePayment::new(user, user, Uuid::new_v4(), Decimal::new(15000, 2));
        assert!(result.is_err());
    }

    #[test]
    fn test_service_payment_lifecycle() {
        let mut payment = ServicePayment::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            Decimal::new(15000, 2),
        )
        .unwrap();

        payment.start_processing().unwrap();
        payment.complete("E9".to_string()).unwrap();
        assert_eq!(payment.status, PaymentStatus::Completed);
        assert!(payment.paid_at.is_some());
    }

    #[test]
    fn test_service_payment_fail_from_processing() {
        let mut payment = ServicePayment::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            Decimal::new(15000, 2),
        )
        .unwrap();

        payment.start_processing().unwrap();
        payment.fail().unwrap();
        assert_eq!(payment.status, PaymentStatus::Failed);
    }

    #[test]
    fn test_mimo_serialization_roundtrip() {
        let mimo = valid_mimo();
        let json = serde_json::to_string(&mimo).unwrap();
        let deserialized: Mimo = serde_json::from_str(&json).unwrap();

        assert_eq!(mimo.id, deserialized.id);
        assert_eq!(mimo.amount, deserialized.amount);
        assert_eq!(mimo.status, deserialized.status);
    }
}
