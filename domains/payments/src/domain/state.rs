//! Payment lifecycle state machine
//!
//! Both mimos and service payments move through the same lifecycle:
//! pending → processing → completed/failed/cancelled. Completed, failed
//! and cancelled are terminal. A gateway callback may complete a payment
//! straight from pending (the processing hop is optional).

pub use mimo_common::StateError;

/// Payment lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentState {
    Pending,
    Processing,
    Completed,
    Failed,
    Cancelled,
}

impl PaymentState {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }

    /// Get all valid next states from current state
    pub fn valid_transitions(&self) -> &'static [PaymentState] {
        match self {
            Self::Pending => &[
                Self::Processing,
                Self::Completed,
                Self::Failed,
                Self::Cancelled,
            ],
            Self::Processing => &[Self::Completed, Self::Failed, Self::Cancelled],
            Self::Completed | Self::Failed | Self::Cancelled => &[],
        }
    }
}

impl std::fmt::Display for PaymentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Processing => write!(f, "processing"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Events that trigger payment state transitions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaymentEvent {
    /// Gateway acknowledged the charge is being paid
    StartProcessing,
    /// Gateway confirmed settlement
    Complete,
    /// Gateway reported a payment failure
    Fail,
    /// Charge was cancelled or expired without payment
    Cancel,
}

impl std::fmt::Display for PaymentEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StartProcessing => write!(f, "start_processing"),
            Self::Complete => write!(f, "complete"),
            Self::Fail => write!(f, "fail"),
            Self::Cancel => write!(f, "cancel"),
        }
    }
}

/// Guard context for payment transitions
#[derive(Debug, Clone, Default)]
pub struct PaymentGuardContext {
    /// Settlement confirmation carries the gateway's end-to-end id
    pub has_end_to_end_id: bool,
}

/// Payment state machine
pub struct PaymentStateMachine;

impl PaymentStateMachine {
    /// Attempt a state transition with guard conditions
    pub fn transition(
        current: PaymentState,
        event: PaymentEvent,
        context: Option<&PaymentGuardContext>,
    ) -> Result<PaymentState, StateError> {
        if current.is_terminal() {
            return Err(StateError::TerminalState(current.to_string()));
        }

        let next = match (&current, &event) {
            (PaymentState::Pending, PaymentEvent::StartProcessing) => PaymentState::Processing,

            // The processing hop is optional; completion is legal from both
            (PaymentState::Pending | PaymentState::Processing, PaymentEvent::Complete) => {
                if let Some(ctx) = context {
                    if !ctx.has_end_to_end_id {
                        return Err(StateError::GuardFailed(
                            "Completion requires the gateway end-to-end id".to_string(),
                        ));
                    }
                }
                PaymentState::Completed
            }

            (PaymentState::Pending | PaymentState::Processing, PaymentEvent::Fail) => {
                PaymentState::Failed
            }

            (PaymentState::Pending | PaymentState::Processing, PaymentEvent::Cancel) => {
                PaymentState::Cancelled
            }

            _ => {
                return Err(StateError::InvalidTransition {
                    from: current.to_string(),
                    to: "unknown".to_string(),
                    event: event.to_string(),
                });
            }
        };

        Ok(next)
    }

    /// Check if a transition is valid without performing it
    pub fn can_transition(
        current: PaymentState,
        event: &PaymentEvent,
        context: Option<&PaymentGuardContext>,
    ) -> bool {
        Self::transition(current, *event, context).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settled() -> PaymentGuardContext {
        PaymentGuardContext {
            has_end_to_end_id: true,
        }
    }

    #[test]
    fn test_pending_to_processing() {
        let result = PaymentStateMachine::transition(
            PaymentState::Pending,
            PaymentEvent::StartProcessing,
            None,
        );
        assert_eq!(result, Ok(PaymentState::Processing));
    }

    #[test]
    fn test_processing_to_completed() {
        let result = PaymentStateMachine::transition(
            PaymentState::Processing,
            PaymentEvent::Complete,
            Some(&settled()),
        );
        assert_eq!(result, Ok(PaymentState::Completed));
    }

    #[test]
    fn test_pending_straight_to_completed() {
        // Callback can arrive before the processing hop
        let result = PaymentStateMachine::transition(
            PaymentState::Pending,
            PaymentEvent::Complete,
            Some(&settled()),
        );
        assert_eq!(result, Ok(PaymentState::Completed));
    }

    #[test]
    fn test_completion_guard_requires_end_to_end_id() {
        let ctx = PaymentGuardContext {
            has_end_to_end_id: false,
        };
        let result = PaymentStateMachine::transition(
            PaymentState::Processing,
            PaymentEvent::Complete,
            Some(&ctx),
        );
        assert!(matches!(result, Err(StateError::GuardFailed(_))));
    }

    #[test]
    fn test_pending_to_failed() {
        let result =
            PaymentStateMachine::transition(PaymentState::Pending, PaymentEvent::Fail, None);
        assert_eq!(result, Ok(PaymentState::Failed));
    }

    #[test]
    fn test_processing_to_cancelled() {
        let result =
            PaymentStateMachine::transition(PaymentState::Processing, PaymentEvent::Cancel, None);
        assert_eq!(result, Ok(PaymentState::Cancelled));
    }

    #[test]
    fn test_terminal_completed_cannot_transition() {
        let result =
            PaymentStateMachine::transition(PaymentState::Completed, PaymentEvent::Fail, None);
        assert!(matches!(result, Err(StateError::TerminalState(_))));
    }

    #[test]
    fn test_terminal_failed_cannot_transition() {
        let result = PaymentStateMachine::transition(
            PaymentState::Failed,
            PaymentEvent::Complete,
            Some(&settled()),
        );
        assert!(matches!(result, Err(StateError::TerminalState(_))));
    }

    #[test]
    fn test_terminal_cancelled_cannot_transition() {
        let result = PaymentStateMachine::transition(
            PaymentState::Cancelled,
            PaymentEvent::StartProcessing,
            None,
        );
        assert!(matches!(result, Err(StateError::TerminalState(_))));
    }

    #[test]
    fn test_processing_cannot_start_processing_again() {
        let result = PaymentStateMachine::transition(
            PaymentState::Processing,
            PaymentEvent::StartProcessing,
            None,
        );
        assert!(matches!(result, Err(StateError::InvalidTransition { .. })));
    }

    #[test]
    fn test_is_terminal() {
        assert!(!PaymentState::Pending.is_terminal());
        assert!(!PaymentState::Processing.is_terminal());
        assert!(PaymentState::Completed.is_terminal());
        assert!(PaymentState::Failed.is_terminal());
        assert!(PaymentState::Cancelled.is_terminal());
    }

    #[test]
    fn test_valid_transitions_listing() {
        assert_eq!(PaymentState::Pending.valid_transitions().len(), 4);
        assert_eq!(PaymentState::Processing.valid_transitions().len(), 3);
        assert!(PaymentState::Completed.valid_transitions().is_empty());
        assert!(PaymentState::Failed.valid_transitions().is_empty());
        assert!(PaymentState::Cancelled.valid_transitions().is_empty());
    }

    #[test]
    fn test_can_transition() {
        assert!(PaymentStateMachine::can_transition(
            PaymentState::Pending,
            &PaymentEvent::StartProcessing,
            None
        ));
        assert!(!PaymentStateMachine::can_transition(
            PaymentState::Completed,
            &PaymentEvent::Fail,
            None
        ));
    }
}
