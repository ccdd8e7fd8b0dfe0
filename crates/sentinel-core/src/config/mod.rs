//! Configuration system for the sentinel.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod gateway_config;
pub mod notify_config;
pub mod scanner_config;
pub mod sentinel_config;
pub mod storage_config;

pub use gateway_config::GatewayConfig;
pub use notify_config::NotifyConfig;
pub use scanner_config::ScannerConfig;
pub use sentinel_config::{CliOverrides, SentinelConfig};
pub use storage_config::StorageConfig;
