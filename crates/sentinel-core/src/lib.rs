//! # sentinel-core
//!
//! Foundation crate for the accessibility regression sentinel.
//! Defines the inspection/barrier model, the derivation rules applied to raw
//! scanner output, collaborator traits, errors, config, and tracing setup.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod traits;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::SentinelConfig;
pub use errors::{
    CollaboratorError, ConfigError, GatewayError, PipelineError, SentinelErrorCode, StorageError,
};
pub use traits::{AccessibilityScanner, Notifier};
pub use types::{
    Barrier, BarrierKey, Classification, Environment, Impact, Inspection, NewBarrier,
    RawNode, RawViolation, ScanTarget,
};
