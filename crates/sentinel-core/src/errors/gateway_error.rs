//! Errors surfaced at the inbound webhook boundary.

use super::error_code::{self, SentinelErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Forbidden: Invalid token")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),

    #[error("Too many requests, please try again later.")]
    RateLimited,

    #[error("scan queue unavailable: {reason}")]
    QueueUnavailable { reason: String },

    #[error("Failed to send regression notification")]
    RelayFailed { reason: String },
}

impl SentinelErrorCode for GatewayError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized => error_code::AUTH_FAILED,
            Self::BadRequest(_) => error_code::BAD_REQUEST,
            Self::RateLimited => error_code::RATE_LIMITED,
            Self::QueueUnavailable { .. } => error_code::QUEUE_UNAVAILABLE,
            Self::RelayFailed { .. } => error_code::RELAY_FAILED,
        }
    }
}
