/// Presentation state for one contribution attempt. One sum type instead of
/// separate loading/error/status flags, so an attempt cannot be both
/// awaiting confirmation and failed at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentFlowState {
    Idle,
    AwaitingConfirmation { checkout_request_id: String },
    Succeeded,
    Failed { reason: String },
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEvent {
    SubmitAccepted { checkout_request_id: String },
    SubmitRejected { reason: String },
    PollerCompleted,
    PollerFailed { reason: String },
    PollerTimedOut,
    PollerCancelled,
    Dismiss,
}

/// Pure transition function. Events that have no meaning in the current
/// state leave it unchanged; in particular there is no path from
/// `Succeeded` back to `AwaitingConfirmation` within one attempt.
pub fn apply_event(state: PaymentFlowState, event: FlowEvent) -> PaymentFlowState {
    use FlowEvent::*;
    use PaymentFlowState::*;

    match (state, event) {
        (Idle, SubmitAccepted { checkout_request_id }) => {
            AwaitingConfirmation { checkout_request_id }
        }
        (Idle, SubmitRejected { reason }) => Failed { reason },
        (AwaitingConfirmation { .. }, PollerCompleted) => Succeeded,
        (AwaitingConfirmation { .. }, PollerFailed { reason }) => Failed { reason },
        (AwaitingConfirmation { .. }, PollerTimedOut) => Cancelled,
        (AwaitingConfirmation { .. }, PollerCancelled) => Cancelled,
        (Succeeded, Dismiss) | (Failed { .. }, Dismiss) | (Cancelled, Dismiss) => Idle,
        (state, _) => state,
    }
}
