//! External scanner command configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScannerConfig {
    /// Executable that renders a page and prints axe-core JSON. Default: `axe`.
    pub command: Option<String>,
    /// Arguments; `{target}` is replaced by the target URL. Default:
    /// `["{target}", "--stdout"]`.
    pub args: Vec<String>,
    /// Kill the scanner after this many seconds. Default: 120.
    pub timeout_secs: Option<u64>,
}

impl ScannerConfig {
    pub fn effective_command(&self) -> &str {
        self.command.as_deref().unwrap_or("axe")
    }

    pub fn effective_args(&self) -> Vec<String> {
        if self.args.is_empty() {
            vec!["{target}".to_string(), "--stdout".to_string()]
        } else {
            self.args.clone()
        }
    }

    pub fn effective_timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(120)
    }
}
