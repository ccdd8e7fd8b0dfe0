//! Shared gateway state.

use std::sync::Arc;
use std::time::Duration;

use sentinel_core::errors::{ConfigError, GatewayError};
use sentinel_core::SentinelConfig;
use sentinel_engine::queue::{ScanJob, ScanQueueHandle};

use crate::middleware::rate_limit::{RateLimitPolicy, RateLimiter};
use crate::relay::{HttpRelay, Relay};

/// Where accepted scan requests go. Must not block.
pub trait JobSink: Send + Sync {
    fn submit(&self, job: ScanJob) -> Result<(), GatewayError>;
}

impl JobSink for ScanQueueHandle {
    fn submit(&self, job: ScanJob) -> Result<(), GatewayError> {
        self.try_enqueue(job)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub auth_token: Arc<str>,
    pub jobs: Arc<dyn JobSink>,
    /// `None` when no outbound endpoint is configured; `/regression` then fails.
    pub relay: Option<Arc<dyn Relay>>,
    pub limiter: Arc<RateLimiter>,
    pub rate_limit: RateLimitPolicy,
}

impl AppState {
    pub fn new(auth_token: impl Into<Arc<str>>, jobs: Arc<dyn JobSink>) -> Self {
        Self {
            auth_token: auth_token.into(),
            jobs,
            relay: None,
            limiter: Arc::new(RateLimiter::default()),
            rate_limit: RateLimitPolicy::default(),
        }
    }

    pub fn with_relay(mut self, relay: Arc<dyn Relay>) -> Self {
        self.relay = Some(relay);
        self
    }

    pub fn with_rate_limit(mut self, policy: RateLimitPolicy) -> Self {
        self.rate_limit = policy;
        self
    }

    /// Build from `[gateway]`. The auth token is mandatory.
    pub fn from_config(config: &SentinelConfig, jobs: Arc<dyn JobSink>) -> Result<Self, ConfigError> {
        let gw = &config.gateway;
        let token = gw
            .auth_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingValue {
                field: "gateway.auth_token".to_string(),
            })?;

        let mut state = Self::new(token, jobs).with_rate_limit(RateLimitPolicy {
            max_requests: gw.effective_rate_limit_max(),
            window: Duration::from_secs(gw.effective_rate_limit_window_secs()),
        });
        match gw.outbound_endpoint.as_deref().filter(|e| !e.trim().is_empty()) {
            Some(endpoint) => {
                let relay = HttpRelay::new(endpoint, Duration::from_secs(config.notify.effective_timeout_secs()))
                    .map_err(|reason| ConfigError::ValidationFailed {
                        field: "gateway.outbound_endpoint".to_string(),
                        message: reason,
                    })?;
                tracing::info!(endpoint = relay.endpoint(), "relaying regression reports");
                state.relay = Some(Arc::new(relay));
            }
            None => tracing::warn!("no outbound endpoint configured; /regression will fail"),
        }
        Ok(state)
    }
}
