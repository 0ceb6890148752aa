use crate::api::{ContributionApi, InitiateOutcome};
use crate::domain::payment::{
    ErrorResponse, InitiatePaymentBody, InitiateResponse, StatusResponse, TransactionStatus,
};
use crate::domain::session::{attach_auth, SessionContext};
use crate::error::ApiError;
use reqwest::StatusCode;
use serde_json::json;

pub struct RestApi {
    pub base_url: String,
    pub client: reqwest::Client,
    pub request_timeout: std::time::Duration,
}

impl RestApi {
    pub fn new(base_url: String, request_timeout: std::time::Duration) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
            request_timeout,
        }
    }

    /// Exchange credentials for a session. Token issuance and validation
    /// are entirely server-side; the client only carries the result.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionContext, ApiError> {
        let url = format!("{}/auth/login", self.base_url);
        let resp = self
            .client
            .post(url)
            .json(&json!({ "email": email, "password": password }))
            .timeout(self.request_timeout)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ApiError::Auth);
        }
        Ok(resp.json::<SessionContext>().await?)
    }
}

#[async_trait::async_trait]
impl ContributionApi for RestApi {
    async fn initiate_mpesa_payment(
        &self,
        session: &SessionContext,
        body: InitiatePaymentBody,
    ) -> Result<InitiateOutcome, ApiError> {
        let url = format!("{}/member/mpesa-payment", self.base_url);
        let resp = attach_auth(self.client.post(url), session)
            .json(&body)
            .timeout(self.request_timeout)
            .send()
            .await?;

        if resp.status().is_success() {
            let parsed: InitiateResponse = resp.json().await?;
            return Ok(InitiateOutcome::Accepted {
                checkout_request_id: parsed.data.checkout_request_id,
                message: parsed.message,
            });
        }

        let status = resp.status();
        let message = resp
            .json::<ErrorResponse>()
            .await
            .ok()
            .and_then(|e| e.message)
            .unwrap_or_else(|| format!("payment could not be initiated (HTTP {})", status.as_u16()));
        Ok(InitiateOutcome::Rejected { message })
    }

    async fn transaction_status(
        &self,
        session: &SessionContext,
        checkout_request_id: &str,
    ) -> Result<TransactionStatus, ApiError> {
        let url = format!("{}/contributions/status/{}", self.base_url, checkout_request_id);
        let resp = attach_auth(self.client.get(url), session)
            .timeout(self.request_timeout)
            .send()
            .await?;

        match resp.status() {
            s if s.is_success() => {
                let parsed: StatusResponse = resp.json().await?;
                Ok(parsed.status)
            }
            StatusCode::NOT_FOUND => Err(ApiError::UnknownTransaction),
            s => Err(ApiError::Unavailable { status: s.as_u16() }),
        }
    }
}
