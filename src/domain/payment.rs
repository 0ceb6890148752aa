use serde::{Deserialize, Serialize};

/// One contribution the member asked to make. Immutable once submitted;
/// the phone number stays in local format until `to_wire` normalizes it.
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub phone_number: String,
    pub amount: i64,
    pub campaign_id: String,
}

impl PaymentRequest {
    /// Validate the form fields and produce the wire body, with the phone
    /// number normalized to international format.
    pub fn to_wire(&self) -> Result<InitiatePaymentBody, crate::error::ValidationError> {
        crate::validate::validate_amount(self.amount)?;
        let phone = crate::validate::normalize_phone(&self.phone_number)?;
        Ok(InitiatePaymentBody {
            phone,
            amount: self.amount,
            campaign_id: self.campaign_id.clone(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl TransactionStatus {
    /// Statuses after which the gateway will never report a change.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TransactionStatus::Pending)
    }
}

/// Client-side record of one initiated payment. Status only ever moves
/// forward server-side; the client observes it through polling reads and
/// drops the record once a terminal state is reached.
#[derive(Debug, Clone)]
pub struct PaymentTransaction {
    pub checkout_request_id: String,
    pub status: TransactionStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiatePaymentBody {
    pub phone: String,
    pub amount: i64,
    pub campaign_id: String,
}

#[derive(Debug, Deserialize)]
pub struct InitiateResponse {
    pub message: String,
    pub data: InitiateData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiateData {
    pub checkout_request_id: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    pub status: TransactionStatus,
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub message: Option<String>,
}
