//! Per-client fixed-window rate limiting.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tokio::sync::Mutex;

use sentinel_core::constants::{DEFAULT_RATE_LIMIT_MAX, DEFAULT_RATE_LIMIT_WINDOW_SECS};
use sentinel_core::errors::GatewayError;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub max_requests: u32,
    pub window: Duration,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_RATE_LIMIT_MAX,
            window: Duration::from_secs(DEFAULT_RATE_LIMIT_WINDOW_SECS),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

#[derive(Default)]
pub struct RateLimiter {
    windows: Mutex<HashMap<String, Window>>,
}

impl RateLimiter {
    pub async fn allow(&self, key: &str, policy: &RateLimitPolicy) -> bool {
        self.allow_at(key, policy, Instant::now()).await
    }

    async fn allow_at(&self, key: &str, policy: &RateLimitPolicy, now: Instant) -> bool {
        let mut lock = self.windows.lock().await;
        // Drop stale windows so the map stays bounded by active clients.
        lock.retain(|_, w| now.duration_since(w.started) < policy.window);
        let window = lock.entry(key.to_string()).or_insert(Window { started: now, count: 0 });
        if window.count >= policy.max_requests {
            return false;
        }
        window.count += 1;
        true
    }
}

pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let client = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    if !state.limiter.allow(&client, &state.rate_limit).await {
        tracing::warn!(client = %client, "rate limit exceeded");
        return ApiError(GatewayError::RateLimited).into_response();
    }
    next.run(req).await
}
