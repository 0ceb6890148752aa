use crate::domain::payment::{InitiatePaymentBody, TransactionStatus};
use crate::domain::session::SessionContext;
use crate::error::ApiError;

pub mod mock;
pub mod rest;

/// Outcome of a payment-initiation call that reached the server. Transport
/// failures do not get here; they surface as [`ApiError`].
#[derive(Debug, Clone)]
pub enum InitiateOutcome {
    Accepted {
        checkout_request_id: String,
        message: String,
    },
    Rejected {
        message: String,
    },
}

#[async_trait::async_trait]
pub trait ContributionApi: Send + Sync {
    /// Trigger an STK push for the given contribution. Returns immediately
    /// with the gateway's correlation identifier; the payment itself
    /// completes asynchronously.
    async fn initiate_mpesa_payment(
        &self,
        session: &SessionContext,
        body: InitiatePaymentBody,
    ) -> Result<InitiateOutcome, ApiError>;

    /// Read-only, idempotent status check by correlation identifier.
    async fn transaction_status(
        &self,
        session: &SessionContext,
        checkout_request_id: &str,
    ) -> Result<TransactionStatus, ApiError>;
}
