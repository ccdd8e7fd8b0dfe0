//! Error handling for the sentinel.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod collaborator_error;
pub mod config_error;
pub mod error_code;
pub mod gateway_error;
pub mod pipeline_error;
pub mod storage_error;

pub use collaborator_error::CollaboratorError;
pub use config_error::ConfigError;
pub use error_code::SentinelErrorCode;
pub use gateway_error::GatewayError;
pub use pipeline_error::PipelineError;
pub use storage_error::StorageError;
