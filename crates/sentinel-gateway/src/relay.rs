//! Outbound relay of regression reports.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use sentinel_core::errors::GatewayError;

#[async_trait]
pub trait Relay: Send + Sync {
    async fn relay(&self, html_content: &str) -> Result<(), GatewayError>;
}

/// POSTs `{ "htmlContent": ... }` to the outbound endpoint, unauthenticated.
#[derive(Debug, Clone)]
pub struct HttpRelay {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpRelay {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| e.to_string())?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Relay for HttpRelay {
    async fn relay(&self, html_content: &str) -> Result<(), GatewayError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "htmlContent": html_content }))
            .send()
            .await
            .map_err(|e| GatewayError::RelayFailed { reason: e.to_string() })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GatewayError::RelayFailed {
                reason: format!("outbound endpoint answered HTTP {status}"),
            });
        }
        Ok(())
    }
}
