//! Outbound regression notification configuration.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NotifyConfig {
    /// Gateway endpoint receiving `{ htmlContent }`, e.g.
    /// `http://localhost:3000/regression`.
    pub webhook_url: Option<String>,
    /// Shared secret sent in the `x-auth-token` header.
    pub auth_token: Option<String>,
    /// HTTP timeout in seconds. Default: 30.
    pub timeout_secs: Option<u64>,
}

impl NotifyConfig {
    pub fn effective_timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(30)
    }

    /// Returns `(webhook_url, auth_token)` or the first missing field.
    pub fn require(&self) -> Result<(&str, &str), ConfigError> {
        let url = self
            .webhook_url
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingValue {
                field: "notify.webhook_url".to_string(),
            })?;
        let token = self
            .auth_token
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingValue {
                field: "notify.auth_token".to_string(),
            })?;
        Ok((url, token))
    }
}
