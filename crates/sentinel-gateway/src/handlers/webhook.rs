//! `POST /webhook`: accept a scan request and enqueue it.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use sentinel_core::errors::GatewayError;
use sentinel_engine::queue::ScanJob;
use sentinel_engine::resolve_target;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    #[serde(default)]
    pub url: Option<String>,
    /// Boolean, or a string that counts as true when it reads `true`.
    #[serde(default)]
    pub is_baseline: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookAck {
    pub message: &'static str,
    pub website_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline: Option<Value>,
    pub timestamp: String,
}

/// `true` for `true` or any string that trims and lowercases to `"true"`.
pub fn baseline_flag(raw: Option<&Value>) -> bool {
    match raw {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

pub async fn webhook_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<WebhookAck>, ApiError> {
    let request: WebhookRequest = serde_json::from_slice(&body).unwrap_or_default();
    let Some(url) = request.url.filter(|u| !u.trim().is_empty()) else {
        tracing::error!("missing website URL in request body");
        return Err(GatewayError::BadRequest("Missing website URL".to_string()).into());
    };
    if let Err(e) = resolve_target(&url) {
        tracing::error!(url = %url, error = %e, "rejected scan target");
        return Err(GatewayError::BadRequest(format!("Invalid website URL: {url}")).into());
    }
    let is_baseline = baseline_flag(request.is_baseline.as_ref());
    tracing::info!(url = %url, is_baseline, "webhook received");

    state.jobs.submit(ScanJob::new(url.clone(), is_baseline))?;

    Ok(Json(WebhookAck {
        message: "Webhook received successfully",
        website_url: url,
        baseline: request.is_baseline,
        timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
    }))
}
