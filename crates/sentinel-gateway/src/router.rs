//! Router assembly and the listen loop.

use std::net::SocketAddr;

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;

use crate::handlers::{health, regression, webhook};
use crate::middleware::{auth::auth_middleware, rate_limit::rate_limit_middleware};
use crate::state::AppState;

/// Authenticated routes plus an open `/healthz`, all behind the rate limiter.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/webhook", post(webhook::webhook_handler))
        .route("/regression", post(regression::regression_handler))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware))
        .route("/healthz", get(health::healthz_handler))
        .layer(from_fn_with_state(state.clone(), rate_limit_middleware))
        .with_state(state)
}

/// Serve until ctrl-c. Client addresses are exposed to the rate limiter.
pub async fn serve(state: AppState, listener: TcpListener) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "webhook gateway listening");
    let app = build_router(state);
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await
}
