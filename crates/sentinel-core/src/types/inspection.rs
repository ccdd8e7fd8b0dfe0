//! Inspection — one scan run of one target.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where the scanned page came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// A file on the local filesystem, addressed as `file://...`.
    Local,
    /// A remotely hosted page.
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!("unknown environment: {other}")),
        }
    }
}

/// A resolved scan target: the canonical URL under which results are stored
/// and compared, plus the environment it was resolved from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanTarget {
    pub url: String,
    pub environment: Environment,
}

impl ScanTarget {
    pub fn new(url: impl Into<String>, environment: Environment) -> Self {
        Self {
            url: url.into(),
            environment,
        }
    }

    pub fn production(url: impl Into<String>) -> Self {
        Self::new(url, Environment::Production)
    }
}

/// A persisted inspection row. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inspection {
    pub inspection_id: i64,
    pub url: String,
    pub environment: Environment,
    /// Creation time, unix seconds.
    pub inspected_on: i64,
    pub is_baseline: bool,
}
