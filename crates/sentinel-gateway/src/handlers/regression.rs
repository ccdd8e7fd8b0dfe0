//! `POST /regression`: relay a rendered report downstream.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use sentinel_core::errors::GatewayError;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegressionRequest {
    #[serde(default)]
    html_content: Option<String>,
}

pub async fn regression_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let request: RegressionRequest = serde_json::from_slice(&body).unwrap_or_default();
    let Some(html) = request.html_content.filter(|h| !h.is_empty()) else {
        tracing::error!("missing HTML content in regression notification");
        return Err(GatewayError::BadRequest("Missing HTML content".to_string()).into());
    };
    tracing::info!(bytes = html.len(), "regression notification received");

    let relay = state.relay.as_ref().ok_or_else(|| GatewayError::RelayFailed {
        reason: "no outbound endpoint configured".to_string(),
    })?;
    relay.relay(&html).await?;

    tracing::info!("regression notification sent");
    Ok(Json(json!({ "message": "Regression notification sent" })))
}
