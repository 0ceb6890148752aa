use anyhow::{bail, Context};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use welfare_pay_client::api::rest::RestApi;
use welfare_pay_client::config::AppConfig;
use welfare_pay_client::domain::payment::PaymentRequest;
use welfare_pay_client::flow::driver::ContributionFlow;
use welfare_pay_client::flow::state::PaymentFlowState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let email = std::env::var("WELFARE_EMAIL").context("WELFARE_EMAIL is required")?;
    let password = std::env::var("WELFARE_PASSWORD").context("WELFARE_PASSWORD is required")?;
    let request = PaymentRequest {
        phone_number: std::env::var("CONTRIBUTION_PHONE").context("CONTRIBUTION_PHONE is required")?,
        amount: std::env::var("CONTRIBUTION_AMOUNT")
            .context("CONTRIBUTION_AMOUNT is required")?
            .parse()
            .context("CONTRIBUTION_AMOUNT must be a whole number of shillings")?,
        campaign_id: std::env::var("CAMPAIGN_ID").context("CAMPAIGN_ID is required")?,
    };

    let api = RestApi::new(cfg.api_base_url.clone(), cfg.request_timeout());
    let session = api.login(&email, &password).await.context("login failed")?;
    tracing::info!(user = %session.user.name, role = ?session.user.role, "logged in");

    let mut flow = ContributionFlow::new(Arc::new(api), session, cfg.poll_config());
    let final_state = flow.submit(request).await?;
    if let Some(message) = flow.message() {
        println!("{message}");
    }

    match final_state {
        PaymentFlowState::Succeeded => {
            println!("contribution confirmed");
            Ok(())
        }
        PaymentFlowState::Failed { reason } => bail!("payment failed: {reason}"),
        PaymentFlowState::Cancelled => {
            bail!("no confirmation received in time; check your contribution history later")
        }
        state => bail!("flow ended in unexpected state: {state:?}"),
    }
}
