//! Shared-secret check on the `x-auth-token` header.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use sentinel_core::constants::AUTH_HEADER;
use sentinel_core::errors::GatewayError;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn auth_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let presented = req
        .headers()
        .get(AUTH_HEADER)
        .and_then(|v| v.to_str().ok());
    if presented != Some(state.auth_token.as_ref()) {
        tracing::warn!(path = %req.uri().path(), "invalid or missing token");
        return ApiError(GatewayError::Unauthorized).into_response();
    }
    next.run(req).await
}
