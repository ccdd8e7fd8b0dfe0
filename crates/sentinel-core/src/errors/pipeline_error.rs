//! Errors that end a scan or comparison run.

use super::error_code::{self, SentinelErrorCode};
use super::{CollaboratorError, ConfigError, StorageError};

/// Errors that can occur while running a scan or a baseline comparison.
/// Aggregates subsystem errors via `From` conversions.
///
/// A missing baseline or a missing comparison target is not an error; those
/// are reported through the run outcome types.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Collaborator error: {0}")]
    Collaborator(#[from] CollaboratorError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid scan target `{target}`: {reason}")]
    InvalidTarget { target: String, reason: String },
}

impl SentinelErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Storage(e) => e.error_code(),
            Self::Collaborator(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::InvalidTarget { .. } => error_code::INVALID_TARGET,
        }
    }
}
