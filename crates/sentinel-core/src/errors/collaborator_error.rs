//! Failures reported by external collaborators: the page renderer, the
//! accessibility scanner, and the webhook gateway.

use super::error_code::{self, SentinelErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError {
    #[error("renderer failed to load {target}: {reason}")]
    Renderer { target: String, reason: String },

    #[error("scanner failed on {target}: {reason}")]
    Scanner { target: String, reason: String },

    #[error("notification delivery to {endpoint} failed: {reason}")]
    Delivery { endpoint: String, reason: String },
}

impl SentinelErrorCode for CollaboratorError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Renderer { .. } => error_code::RENDERER_ERROR,
            Self::Scanner { .. } => error_code::SCANNER_ERROR,
            Self::Delivery { .. } => error_code::DELIVERY_ERROR,
        }
    }
}
