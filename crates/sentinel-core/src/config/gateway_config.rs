//! Inbound webhook gateway configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_GATEWAY_PORT, DEFAULT_RATE_LIMIT_MAX, DEFAULT_RATE_LIMIT_WINDOW_SECS,
};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listen address. Default: `0.0.0.0`.
    pub bind: Option<String>,
    /// Listen port. Default: 3000.
    pub port: Option<u16>,
    /// Shared secret every inbound request must carry.
    pub auth_token: Option<String>,
    /// Where `/regression` payloads are relayed.
    pub outbound_endpoint: Option<String>,
    /// Scan worker threads. Default: 2.
    pub workers: Option<usize>,
    /// Pending scan jobs before new requests are refused. Default: 64.
    pub queue_capacity: Option<usize>,
    /// Requests per client per window. Default: 100.
    pub rate_limit_max: Option<u32>,
    /// Rate limit window in seconds. Default: 900.
    pub rate_limit_window_secs: Option<u64>,
}

impl GatewayConfig {
    pub fn effective_bind(&self) -> &str {
        self.bind.as_deref().unwrap_or("0.0.0.0")
    }

    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_GATEWAY_PORT)
    }

    pub fn effective_workers(&self) -> usize {
        self.workers.unwrap_or(2)
    }

    pub fn effective_queue_capacity(&self) -> usize {
        self.queue_capacity.unwrap_or(64)
    }

    pub fn effective_rate_limit_max(&self) -> u32 {
        self.rate_limit_max.unwrap_or(DEFAULT_RATE_LIMIT_MAX)
    }

    pub fn effective_rate_limit_window_secs(&self) -> u64 {
        self.rate_limit_window_secs
            .unwrap_or(DEFAULT_RATE_LIMIT_WINDOW_SECS)
    }
}
