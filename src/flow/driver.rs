use crate::api::{ContributionApi, InitiateOutcome};
use crate::domain::payment::{PaymentRequest, PaymentTransaction, TransactionStatus};
use crate::domain::session::SessionContext;
use crate::error::FlowError;
use crate::flow::poller::{poll_status, PollConfig, PollOutcome};
use crate::flow::state::{apply_event, FlowEvent, PaymentFlowState};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Drives one contribution attempt at a time: validate, initiate, poll,
/// settle into a terminal presentation state. Owns the attempt's
/// cancellation token; cancelling it tears the polling session down.
pub struct ContributionFlow {
    api: Arc<dyn ContributionApi>,
    session: SessionContext,
    poll_config: PollConfig,
    cancel: CancellationToken,
    state: PaymentFlowState,
    message: Option<String>,
    transaction: Option<PaymentTransaction>,
}

impl ContributionFlow {
    pub fn new(api: Arc<dyn ContributionApi>, session: SessionContext, poll_config: PollConfig) -> Self {
        Self {
            api,
            session,
            poll_config,
            cancel: CancellationToken::new(),
            state: PaymentFlowState::Idle,
            message: None,
            transaction: None,
        }
    }

    pub fn state(&self) -> &PaymentFlowState {
        &self.state
    }

    /// The latest server-supplied banner message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Submit a contribution and run it to a terminal state. Validation
    /// failures block submission without touching the flow state; every
    /// other outcome lands in `Succeeded`, `Failed`, or `Cancelled`.
    pub async fn submit(&mut self, request: PaymentRequest) -> Result<PaymentFlowState, FlowError> {
        if self.state != PaymentFlowState::Idle {
            return Err(FlowError::NotIdle);
        }

        self.message = None;
        let body = request.to_wire()?;

        let attempt_id = Uuid::new_v4();
        tracing::info!(%attempt_id, campaign_id = %body.campaign_id, amount = body.amount, "initiating payment");

        match self.api.initiate_mpesa_payment(&self.session, body).await {
            Ok(InitiateOutcome::Accepted { checkout_request_id, message }) => {
                self.message = Some(message);
                self.transaction = Some(PaymentTransaction {
                    checkout_request_id: checkout_request_id.clone(),
                    status: TransactionStatus::Pending,
                    created_at: chrono::Utc::now(),
                });
                self.apply(FlowEvent::SubmitAccepted {
                    checkout_request_id: checkout_request_id.clone(),
                });

                let outcome = poll_status(
                    self.api.as_ref(),
                    &self.session,
                    &checkout_request_id,
                    &self.poll_config,
                    &self.cancel,
                )
                .await;
                self.transaction = None;

                self.apply(match outcome {
                    PollOutcome::Completed => FlowEvent::PollerCompleted,
                    PollOutcome::Failed { reason } => FlowEvent::PollerFailed { reason },
                    PollOutcome::TimedOut => FlowEvent::PollerTimedOut,
                    PollOutcome::Cancelled => FlowEvent::PollerCancelled,
                });
            }
            Ok(InitiateOutcome::Rejected { message }) => {
                self.apply(FlowEvent::SubmitRejected { reason: message });
            }
            Err(err) => {
                tracing::warn!(%attempt_id, error = %err, "payment initiation failed");
                self.apply(FlowEvent::SubmitRejected {
                    reason: err.to_string(),
                });
            }
        }

        Ok(self.state.clone())
    }

    /// Dismiss a terminal outcome, returning the form to idle for a fresh
    /// attempt.
    pub fn dismiss(&mut self) {
        self.message = None;
        self.apply(FlowEvent::Dismiss);
    }

    fn apply(&mut self, event: FlowEvent) {
        let next = apply_event(self.state.clone(), event);
        if next != self.state {
            tracing::info!(from = ?self.state, to = ?next, "flow state changed");
        }
        self.state = next;
    }
}
