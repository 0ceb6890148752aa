use crate::api::{ContributionApi, InitiateOutcome};
use crate::domain::payment::{InitiatePaymentBody, TransactionStatus};
use crate::domain::session::{Role, SessionContext, UserProfile};
use crate::error::ApiError;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::time::Instant;

/// Scripted API for driving the flow in tests. Initiation outcomes and
/// status-poll results are consumed front to back; an exhausted status
/// script keeps answering `pending`.
#[derive(Debug)]
pub enum StatusScript {
    Status(TransactionStatus),
    TransientError,
    NotFound,
}

#[derive(Debug)]
pub enum InitiateScript {
    Accept { checkout_request_id: String },
    Reject { message: String },
}

pub struct MockApi {
    initiate_script: Mutex<VecDeque<InitiateScript>>,
    status_script: Mutex<VecDeque<StatusScript>>,
    initiate_bodies: Mutex<Vec<InitiatePaymentBody>>,
    status_polls: Mutex<Vec<std::time::Duration>>,
    started: Instant,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            initiate_script: Mutex::new(VecDeque::new()),
            status_script: Mutex::new(VecDeque::new()),
            initiate_bodies: Mutex::new(Vec::new()),
            status_polls: Mutex::new(Vec::new()),
            started: Instant::now(),
        }
    }

    pub fn script_initiate(&self, step: InitiateScript) {
        self.initiate_script.lock().unwrap().push_back(step);
    }

    pub fn script_statuses(&self, steps: impl IntoIterator<Item = StatusScript>) {
        self.status_script.lock().unwrap().extend(steps);
    }

    pub fn initiate_calls(&self) -> Vec<InitiatePaymentBody> {
        self.initiate_bodies.lock().unwrap().clone()
    }

    /// Elapsed time of each status poll, measured from mock construction.
    pub fn status_poll_times(&self) -> Vec<std::time::Duration> {
        self.status_polls.lock().unwrap().clone()
    }

    pub fn status_poll_count(&self) -> usize {
        self.status_polls.lock().unwrap().len()
    }
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new()
    }
}

/// A throwaway member session for tests.
pub fn test_session() -> SessionContext {
    SessionContext {
        token: "test-token".to_string(),
        user: UserProfile {
            id: "u-test".to_string(),
            name: "Test Member".to_string(),
            role: Role::Member,
        },
    }
}

#[async_trait::async_trait]
impl ContributionApi for MockApi {
    async fn initiate_mpesa_payment(
        &self,
        _session: &SessionContext,
        body: InitiatePaymentBody,
    ) -> Result<InitiateOutcome, ApiError> {
        self.initiate_bodies.lock().unwrap().push(body);
        let step = self.initiate_script.lock().unwrap().pop_front();
        match step {
            Some(InitiateScript::Accept { checkout_request_id }) => Ok(InitiateOutcome::Accepted {
                checkout_request_id,
                message: "STK push sent, enter your PIN".to_string(),
            }),
            Some(InitiateScript::Reject { message }) => Ok(InitiateOutcome::Rejected { message }),
            None => Err(ApiError::Unavailable { status: 503 }),
        }
    }

    async fn transaction_status(
        &self,
        _session: &SessionContext,
        _checkout_request_id: &str,
    ) -> Result<TransactionStatus, ApiError> {
        self.status_polls.lock().unwrap().push(self.started.elapsed());
        let step = self.status_script.lock().unwrap().pop_front();
        match step {
            Some(StatusScript::Status(status)) => Ok(status),
            Some(StatusScript::TransientError) => Err(ApiError::Unavailable { status: 500 }),
            Some(StatusScript::NotFound) => Err(ApiError::UnknownTransaction),
            None => Ok(TransactionStatus::Pending),
        }
    }
}
