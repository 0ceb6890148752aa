use crate::api::ContributionApi;
use crate::domain::payment::TransactionStatus;
use crate::domain::session::SessionContext;
use crate::error::ApiError;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
pub struct PollConfig {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
            timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Completed,
    Failed { reason: String },
    /// No terminal status within the window. The payment may still complete
    /// server-side; callers surface this as cancelled, not failed.
    TimedOut,
    Cancelled,
}

/// Poll the transaction status until a terminal state, the timeout, or
/// cancellation. The returned future is the whole polling session: every
/// exit path runs through a single `return`, so no timer can outlive it.
///
/// Transient errors (transport failures, 5xx) are logged and swallowed;
/// an intermittent blip must not abort an otherwise succeeding payment.
/// A 404 is the one exception: the gateway does not know the transaction,
/// so the session ends as failed.
pub async fn poll_status(
    api: &dyn ContributionApi,
    session: &SessionContext,
    checkout_request_id: &str,
    config: &PollConfig,
    cancel: &CancellationToken,
) -> PollOutcome {
    let deadline = Instant::now() + config.timeout;

    loop {
        match api.transaction_status(session, checkout_request_id).await {
            Ok(TransactionStatus::Completed) => return PollOutcome::Completed,
            Ok(status @ (TransactionStatus::Failed | TransactionStatus::Refunded)) => {
                return PollOutcome::Failed {
                    reason: format!("{status:?}").to_lowercase(),
                }
            }
            Ok(TransactionStatus::Pending) => {}
            Err(ApiError::UnknownTransaction) => {
                tracing::warn!(checkout_request_id, "gateway does not know this transaction");
                return PollOutcome::Failed {
                    reason: "unknown transaction".to_string(),
                };
            }
            Err(err) => {
                tracing::warn!(checkout_request_id, error = %err, "status check failed, will retry");
            }
        }

        let now = Instant::now();
        if now >= deadline {
            return PollOutcome::TimedOut;
        }
        let sleep_until = std::cmp::min(now + config.interval, deadline);

        tokio::select! {
            _ = cancel.cancelled() => return PollOutcome::Cancelled,
            _ = tokio::time::sleep_until(sleep_until) => {}
        }
    }
}
