//! Top-level sentinel configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{GatewayConfig, NotifyConfig, ScannerConfig, StorageConfig};
use crate::errors::ConfigError;

/// Project config file name, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "sentinel.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`SENTINEL_*`, then the legacy unprefixed names)
/// 3. Project config (`sentinel.toml` in the working directory)
/// 4. User config (`~/.sentinel/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SentinelConfig {
    pub storage: StorageConfig,
    pub notify: NotifyConfig,
    pub gateway: GatewayConfig,
    pub scanner: ScannerConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub db_path: Option<String>,
    pub port: Option<u16>,
    pub webhook_url: Option<String>,
}

impl SentinelConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config. A broken user file is reported, an
        // unreadable one is skipped.
        if let Some(user_config_path) = user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_from(&mut config, |key| std::env::var(key).ok());

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &SentinelConfig) -> Result<(), ConfigError> {
        if config.gateway.port == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "gateway.port".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.gateway.workers == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "gateway.workers".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.gateway.queue_capacity == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "gateway.queue_capacity".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.gateway.rate_limit_window_secs == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "gateway.rate_limit_window_secs".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.storage.read_pool_size == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "storage.read_pool_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        for (field, value) in [
            ("gateway.auth_token", &config.gateway.auth_token),
            ("notify.auth_token", &config.notify.auth_token),
        ] {
            if value.as_deref().is_some_and(|t| t.trim().is_empty()) {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must not be empty when set".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut SentinelConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: SentinelConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a value.
    fn merge(base: &mut SentinelConfig, other: &SentinelConfig) {
        // Storage
        if other.storage.db_path.is_some() {
            base.storage.db_path = other.storage.db_path.clone();
        }
        if other.storage.read_pool_size.is_some() {
            base.storage.read_pool_size = other.storage.read_pool_size;
        }

        // Notify
        if other.notify.webhook_url.is_some() {
            base.notify.webhook_url = other.notify.webhook_url.clone();
        }
        if other.notify.auth_token.is_some() {
            base.notify.auth_token = other.notify.auth_token.clone();
        }
        if other.notify.timeout_secs.is_some() {
            base.notify.timeout_secs = other.notify.timeout_secs;
        }

        // Gateway
        if other.gateway.bind.is_some() {
            base.gateway.bind = other.gateway.bind.clone();
        }
        if other.gateway.port.is_some() {
            base.gateway.port = other.gateway.port;
        }
        if other.gateway.auth_token.is_some() {
            base.gateway.auth_token = other.gateway.auth_token.clone();
        }
        if other.gateway.outbound_endpoint.is_some() {
            base.gateway.outbound_endpoint = other.gateway.outbound_endpoint.clone();
        }
        if other.gateway.workers.is_some() {
            base.gateway.workers = other.gateway.workers;
        }
        if other.gateway.queue_capacity.is_some() {
            base.gateway.queue_capacity = other.gateway.queue_capacity;
        }
        if other.gateway.rate_limit_max.is_some() {
            base.gateway.rate_limit_max = other.gateway.rate_limit_max;
        }
        if other.gateway.rate_limit_window_secs.is_some() {
            base.gateway.rate_limit_window_secs = other.gateway.rate_limit_window_secs;
        }

        // Scanner
        if other.scanner.command.is_some() {
            base.scanner.command = other.scanner.command.clone();
        }
        if !other.scanner.args.is_empty() {
            base.scanner.args = other.scanner.args.clone();
        }
        if other.scanner.timeout_secs.is_some() {
            base.scanner.timeout_secs = other.scanner.timeout_secs;
        }
    }

    /// Apply environment overrides read through `lookup`.
    ///
    /// `SENTINEL_*` names win over the unprefixed names (`DB_PATH`,
    /// `WEBHOOK_URL`, `WEBHOOK_SERVER_AUTH_TOKEN`, `OUTBOUND_ENDPOINT`, `PORT`)
    /// kept for existing deployments. The shared token feeds both the gateway
    /// and the notifier unless they are set individually.
    pub fn apply_env_from<F>(config: &mut SentinelConfig, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |keys: &[&str]| keys.iter().find_map(|k| lookup(*k));

        if let Some(v) = first(&["SENTINEL_DB_PATH", "DB_PATH"]) {
            config.storage.db_path = Some(v);
        }
        if let Some(v) = first(&["SENTINEL_WEBHOOK_URL", "WEBHOOK_URL"]) {
            config.notify.webhook_url = Some(v);
        }
        if let Some(v) = first(&["SENTINEL_AUTH_TOKEN", "WEBHOOK_SERVER_AUTH_TOKEN"]) {
            config.notify.auth_token = Some(v.clone());
            config.gateway.auth_token = Some(v);
        }
        if let Some(v) = first(&["SENTINEL_OUTBOUND_ENDPOINT", "OUTBOUND_ENDPOINT"]) {
            config.gateway.outbound_endpoint = Some(v);
        }
        if let Some(v) = first(&["SENTINEL_PORT", "PORT"]) {
            if let Ok(port) = v.parse::<u16>() {
                config.gateway.port = Some(port);
            }
        }
        if let Some(v) = lookup("SENTINEL_WORKERS") {
            if let Ok(workers) = v.parse::<usize>() {
                config.gateway.workers = Some(workers);
            }
        }
        if let Some(v) = lookup("SENTINEL_SCANNER_COMMAND") {
            config.scanner.command = Some(v);
        }
        if let Some(v) = lookup("SENTINEL_SCANNER_TIMEOUT_SECS") {
            if let Ok(secs) = v.parse::<u64>() {
                config.scanner.timeout_secs = Some(secs);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut SentinelConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.db_path {
            config.storage.db_path = Some(v.clone());
        }
        if let Some(v) = cli.port {
            config.gateway.port = Some(v);
        }
        if let Some(ref v) = cli.webhook_url {
            config.notify.webhook_url = Some(v.clone());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Returns the user config path: `~/.sentinel/config.toml`.
fn user_config_path() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".sentinel").join("config.toml"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn prefixed_env_beats_legacy_name() {
        let vars = env(&[("SENTINEL_DB_PATH", "/a.db"), ("DB_PATH", "/b.db")]);
        let mut config = SentinelConfig::default();
        SentinelConfig::apply_env_from(&mut config, |k| vars.get(k).cloned());
        assert_eq!(config.storage.db_path.as_deref(), Some("/a.db"));
    }

    #[test]
    fn shared_token_feeds_gateway_and_notifier() {
        let vars = env(&[("WEBHOOK_SERVER_AUTH_TOKEN", "s3cret"), ("PORT", "8080")]);
        let mut config = SentinelConfig::default();
        SentinelConfig::apply_env_from(&mut config, |k| vars.get(k).cloned());
        assert_eq!(config.gateway.auth_token.as_deref(), Some("s3cret"));
        assert_eq!(config.notify.auth_token.as_deref(), Some("s3cret"));
        assert_eq!(config.gateway.effective_port(), 8080);
    }

    #[test]
    fn unparsable_port_is_ignored() {
        let vars = env(&[("PORT", "not-a-port")]);
        let mut config = SentinelConfig::default();
        SentinelConfig::apply_env_from(&mut config, |k| vars.get(k).cloned());
        assert_eq!(config.gateway.port, None);
    }

    #[test]
    fn merge_only_overrides_present_values() {
        let mut base = SentinelConfig::from_toml("[storage]\ndb_path = \"base.db\"\n").unwrap();
        let other = SentinelConfig::from_toml("[gateway]\nport = 4000\n").unwrap();
        SentinelConfig::merge(&mut base, &other);
        assert_eq!(base.storage.db_path.as_deref(), Some("base.db"));
        assert_eq!(base.gateway.port, Some(4000));
    }
}
