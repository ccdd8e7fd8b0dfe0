//! HTTP mapping for gateway errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use sentinel_core::errors::{GatewayError, SentinelErrorCode};

/// Response wrapper for [`GatewayError`].
#[derive(Debug)]
pub struct ApiError(pub GatewayError);

impl From<GatewayError> for ApiError {
    fn from(e: GatewayError) -> Self {
        Self(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            GatewayError::Unauthorized => StatusCode::FORBIDDEN,
            GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            GatewayError::QueueUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::RelayFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::error!(
            code = self.0.error_code(),
            status = status.as_u16(),
            error = ?self.0,
            "request rejected"
        );
        match self.0 {
            // Plain-text body, as rate limiters conventionally answer.
            GatewayError::RateLimited => (status, self.0.to_string()).into_response(),
            other => (status, Json(json!({ "error": other.to_string() }))).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_error_kinds() {
        assert_eq!(ApiError(GatewayError::Unauthorized).status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError(GatewayError::BadRequest("Missing website URL".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError(GatewayError::RateLimited).status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            ApiError(GatewayError::QueueUnavailable { reason: "queue full".into() }).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError(GatewayError::RelayFailed { reason: "refused".into() }).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
