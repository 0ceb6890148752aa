use thiserror::Error;

/// Local form validation failure. Surfaced inline; nothing is sent to the
/// server when one of these fires.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("phone number must be 10 digits starting with 07 or 01")]
    InvalidPhone,

    #[error("amount must be at least 1")]
    AmountTooSmall,
}

/// Transport and remote failures from the REST API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned status {status}")]
    Unavailable { status: u16 },

    /// 404 on a status check. The gateway does not know the transaction,
    /// so further polling cannot converge; callers treat this as fatal
    /// rather than transient.
    #[error("unknown transaction")]
    UnknownTransaction,

    #[error("authentication rejected")]
    Auth,
}

/// What `ContributionFlow::submit` can return to the caller. Initiation
/// failures are not here: they land the flow in the `Failed` state instead,
/// where the user can dismiss and retry.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("flow is not idle; dismiss the previous outcome first")]
    NotIdle,
}
