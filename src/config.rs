use crate::flow::poller::PollConfig;
use std::time::Duration;

#[derive(Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub poll_interval_secs: u64,
    pub poll_timeout_secs: u64,
    pub request_timeout_ms: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            api_base_url: std::env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080/api".to_string()),
            poll_interval_secs: std::env::var("POLL_INTERVAL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3),
            poll_timeout_secs: std::env::var("POLL_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(60),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10_000),
        }
    }

    pub fn poll_config(&self) -> PollConfig {
        PollConfig {
            interval: Duration::from_secs(self.poll_interval_secs),
            timeout: Duration::from_secs(self.poll_timeout_secs),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
