use std::sync::Arc;
use std::time::Duration;
use welfare_pay_client::api::mock::{test_session, InitiateScript, MockApi, StatusScript};
use welfare_pay_client::domain::payment::{PaymentRequest, TransactionStatus};
use welfare_pay_client::error::{FlowError, ValidationError};
use welfare_pay_client::flow::driver::ContributionFlow;
use welfare_pay_client::flow::poller::PollConfig;
use welfare_pay_client::flow::state::PaymentFlowState;

fn poll_config() -> PollConfig {
    PollConfig {
        interval: Duration::from_secs(3),
        timeout: Duration::from_secs(60),
    }
}

fn request() -> PaymentRequest {
    PaymentRequest {
        phone_number: "0712345678".to_string(),
        amount: 200,
        campaign_id: "camp-welfare-1".to_string(),
    }
}

fn accepted(id: &str) -> InitiateScript {
    InitiateScript::Accept {
        checkout_request_id: id.to_string(),
    }
}

fn flow(api: &Arc<MockApi>) -> ContributionFlow {
    ContributionFlow::new(api.clone(), test_session(), poll_config())
}

#[tokio::test(start_paused = true)]
async fn accepted_initiation_starts_polling_within_one_interval() {
    let api = Arc::new(MockApi::new());
    api.script_initiate(accepted("abc123"));
    api.script_statuses([StatusScript::Status(TransactionStatus::Completed)]);

    let state = flow(&api).submit(request()).await.unwrap();

    assert_eq!(state, PaymentFlowState::Succeeded);
    let polls = api.status_poll_times();
    assert_eq!(polls.len(), 1);
    assert!(polls[0] <= Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn pending_pending_completed_ends_in_success_and_stops_polling() {
    let api = Arc::new(MockApi::new());
    api.script_initiate(accepted("abc123"));
    api.script_statuses([
        StatusScript::Status(TransactionStatus::Pending),
        StatusScript::Status(TransactionStatus::Pending),
        StatusScript::Status(TransactionStatus::Completed),
    ]);

    let state = flow(&api).submit(request()).await.unwrap();

    assert_eq!(state, PaymentFlowState::Succeeded);
    assert_eq!(
        api.status_poll_times(),
        vec![Duration::from_secs(0), Duration::from_secs(3), Duration::from_secs(6)]
    );
}

#[tokio::test(start_paused = true)]
async fn all_pending_for_the_full_window_is_cancelled_not_failed() {
    let api = Arc::new(MockApi::new());
    api.script_initiate(accepted("abc123"));
    // empty status script: the mock keeps answering pending

    let state = flow(&api).submit(request()).await.unwrap();

    assert_eq!(state, PaymentFlowState::Cancelled);
    // polls at 0s, 3s, ..., 60s, then the deadline check stops the session
    assert_eq!(api.status_poll_count(), 21);
}

#[tokio::test(start_paused = true)]
async fn transient_poll_error_is_absorbed_and_payment_still_succeeds() {
    let api = Arc::new(MockApi::new());
    api.script_initiate(accepted("abc123"));
    api.script_statuses([
        StatusScript::TransientError,
        StatusScript::Status(TransactionStatus::Completed),
    ]);

    let state = flow(&api).submit(request()).await.unwrap();

    assert_eq!(state, PaymentFlowState::Succeeded);
    assert_eq!(api.status_poll_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn refunded_status_ends_in_failed() {
    let api = Arc::new(MockApi::new());
    api.script_initiate(accepted("abc123"));
    api.script_statuses([StatusScript::Status(TransactionStatus::Refunded)]);

    let state = flow(&api).submit(request()).await.unwrap();

    assert_eq!(
        state,
        PaymentFlowState::Failed {
            reason: "refunded".to_string()
        }
    );
}

#[tokio::test(start_paused = true)]
async fn unknown_transaction_is_fatal_not_transient() {
    let api = Arc::new(MockApi::new());
    api.script_initiate(accepted("abc123"));
    api.script_statuses([StatusScript::NotFound]);

    let state = flow(&api).submit(request()).await.unwrap();

    assert_eq!(
        state,
        PaymentFlowState::Failed {
            reason: "unknown transaction".to_string()
        }
    );
    assert_eq!(api.status_poll_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn rejected_initiation_never_starts_a_poller() {
    let api = Arc::new(MockApi::new());
    api.script_initiate(InitiateScript::Reject {
        message: "insufficient campaign quota".to_string(),
    });

    let state = flow(&api).submit(request()).await.unwrap();

    assert_eq!(
        state,
        PaymentFlowState::Failed {
            reason: "insufficient campaign quota".to_string()
        }
    );
    assert_eq!(api.status_poll_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn validation_failure_sends_nothing_to_the_server() {
    let api = Arc::new(MockApi::new());

    let mut f = flow(&api);
    let err = f
        .submit(PaymentRequest {
            phone_number: "0712345678".to_string(),
            amount: 0,
            campaign_id: "camp-welfare-1".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        FlowError::Validation(ValidationError::AmountTooSmall)
    ));
    assert_eq!(*f.state(), PaymentFlowState::Idle);
    assert!(api.initiate_calls().is_empty());
    assert_eq!(api.status_poll_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn teardown_cancellation_ends_the_session_as_cancelled() {
    let api = Arc::new(MockApi::new());
    api.script_initiate(accepted("abc123"));
    // endless pending; the hosting view goes away after 10s

    let mut f = flow(&api);
    let cancel = f.cancel_token();
    let handle = tokio::spawn(async move { f.submit(request()).await.unwrap() });

    tokio::time::sleep(Duration::from_secs(10)).await;
    cancel.cancel();

    let state = handle.await.unwrap();
    assert_eq!(state, PaymentFlowState::Cancelled);
    // polls fired at 0s, 3s, 6s, 9s before the token stopped the loop
    assert_eq!(api.status_poll_count(), 4);
}

#[tokio::test(start_paused = true)]
async fn retry_requires_dismissing_the_previous_outcome() {
    let api = Arc::new(MockApi::new());
    api.script_initiate(InitiateScript::Reject {
        message: "gateway busy".to_string(),
    });
    api.script_initiate(accepted("retry-1"));
    api.script_statuses([StatusScript::Status(TransactionStatus::Completed)]);

    let mut f = flow(&api);
    let first = f.submit(request()).await.unwrap();
    assert!(matches!(first, PaymentFlowState::Failed { .. }));

    let blocked = f.submit(request()).await.unwrap_err();
    assert!(matches!(blocked, FlowError::NotIdle));

    f.dismiss();
    assert_eq!(*f.state(), PaymentFlowState::Idle);

    let second = f.submit(request()).await.unwrap();
    assert_eq!(second, PaymentFlowState::Succeeded);
    assert_eq!(api.initiate_calls().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn normalized_phone_reaches_the_wire() {
    let api = Arc::new(MockApi::new());
    api.script_initiate(accepted("abc123"));
    api.script_statuses([StatusScript::Status(TransactionStatus::Completed)]);

    flow(&api).submit(request()).await.unwrap();

    let bodies = api.initiate_calls();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0].phone, "254712345678");
    assert_eq!(bodies[0].amount, 200);
}
