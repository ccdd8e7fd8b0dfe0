//! Baseline gate for non-baseline scans.

use sentinel_core::errors::StorageError;
use sentinel_storage::queries::inspections;
use sentinel_storage::DatabaseManager;

/// Whether a non-baseline scan of a URL may proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Open,
    /// No baseline inspection exists for the URL.
    NoBaseline,
}

impl GateDecision {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

pub fn check_baseline(db: &DatabaseManager, url: &str) -> Result<GateDecision, StorageError> {
    let exists = db.with_reader(|conn| inspections::baseline_exists(conn, url))?;
    if exists {
        Ok(GateDecision::Open)
    } else {
        tracing::info!(url, "no baseline inspection; run a baseline scan first");
        Ok(GateDecision::NoBaseline)
    }
}
