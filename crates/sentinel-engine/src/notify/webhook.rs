//! Webhook delivery of regression reports.

use std::time::Duration;

use serde::Serialize;

use sentinel_core::constants::AUTH_HEADER;
use sentinel_core::errors::{CollaboratorError, ConfigError};
use sentinel_core::traits::Notifier;
use sentinel_core::SentinelConfig;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportPayload<'a> {
    html_content: &'a str,
}

/// POSTs `{ "htmlContent": ... }` to the gateway's `/regression` endpoint.
/// One attempt per report.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    endpoint: String,
    auth_token: String,
    timeout: Duration,
}

impl WebhookNotifier {
    pub fn new(endpoint: impl Into<String>, auth_token: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            auth_token: auth_token.into(),
            timeout,
        }
    }

    /// Build from `[notify]`. Fails when the webhook URL or token is unset.
    pub fn from_config(config: &SentinelConfig) -> Result<Self, ConfigError> {
        let (url, token) = config.notify.require()?;
        Ok(Self::new(
            url,
            token,
            Duration::from_secs(config.notify.effective_timeout_secs()),
        ))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn delivery_err(&self, reason: String) -> CollaboratorError {
        CollaboratorError::Delivery {
            endpoint: self.endpoint.clone(),
            reason,
        }
    }
}

impl Notifier for WebhookNotifier {
    fn name(&self) -> &'static str {
        "webhook"
    }

    fn deliver(&self, html_content: &str) -> Result<(), CollaboratorError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| self.delivery_err(e.to_string()))?;

        let resp = client
            .post(&self.endpoint)
            .header(AUTH_HEADER, &self.auth_token)
            .json(&ReportPayload { html_content })
            .send()
            .map_err(|e| self.delivery_err(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(self.delivery_err(format!("HTTP {status}: {body}")));
        }
        Ok(())
    }
}
