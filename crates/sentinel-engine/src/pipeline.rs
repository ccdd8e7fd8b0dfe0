//! The two entry operations: `scan` and `compare_baseline`.
//!
//! A non-baseline scan chains straight into a baseline comparison of the same
//! URL. Both run synchronously on the calling thread.

use std::path::PathBuf;
use std::sync::Arc;

use sentinel_core::errors::{ConfigError, PipelineError};
use sentinel_core::traits::{AccessibilityScanner, Notifier};
use sentinel_core::types::ScanTarget;
use sentinel_core::SentinelConfig;
use sentinel_storage::DatabaseManager;

use crate::diff::{find_regressions, DiffOutcome, RegressionSet};
use crate::gatekeeper::check_baseline;
use crate::notify::{dispatch, DeliveryStatus, WebhookNotifier};
use crate::recorder::{record_inspection, RecordSummary};
use crate::scanner::CommandScanner;
use crate::target::resolve_target;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Non-baseline scan refused: the URL has no baseline. Nothing was
    /// scanned or written.
    NoBaseline,
    Recorded {
        summary: RecordSummary,
        /// Set for non-baseline scans only.
        comparison: Option<ComparisonOutcome>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComparisonOutcome {
    NoComparisonTarget,
    Compared {
        regressions: RegressionSet,
        delivery: DeliveryStatus,
    },
}

impl ComparisonOutcome {
    pub fn regression_count(&self) -> usize {
        match self {
            Self::NoComparisonTarget => 0,
            Self::Compared { regressions, .. } => regressions.regressions.len(),
        }
    }
}

/// Scan `target` and record the result. Non-baseline scans are gated on an
/// existing baseline and followed by a comparison.
pub fn scan(
    db: &DatabaseManager,
    scanner: &dyn AccessibilityScanner,
    notifier: &dyn Notifier,
    target: &ScanTarget,
    is_baseline: bool,
) -> Result<ScanOutcome, PipelineError> {
    if !is_baseline && !check_baseline(db, &target.url)?.is_open() {
        return Ok(ScanOutcome::NoBaseline);
    }

    let violations = scanner.scan(target).inspect_err(|e| {
        tracing::error!(
            url = %target.url,
            error = %e,
            timestamp = %chrono::Utc::now().to_rfc3339(),
            "scan failed"
        );
    })?;

    let summary = record_inspection(db, target, is_baseline, &violations)?;
    tracing::info!(
        url = %target.url,
        is_baseline,
        "{} completed",
        if is_baseline { "baseline scan" } else { "scan" }
    );

    let comparison = if is_baseline {
        None
    } else {
        Some(compare_baseline(db, notifier, &target.url)?)
    };
    Ok(ScanOutcome::Recorded { summary, comparison })
}

/// Diff the latest non-baseline inspection of `url` against its baseline and
/// notify when new guideline barriers appear.
pub fn compare_baseline(
    db: &DatabaseManager,
    notifier: &dyn Notifier,
    url: &str,
) -> Result<ComparisonOutcome, PipelineError> {
    tracing::info!(url, "starting baseline comparison");
    match find_regressions(db, url)? {
        DiffOutcome::NoComparisonTarget => Ok(ComparisonOutcome::NoComparisonTarget),
        DiffOutcome::Compared(regressions) => {
            let delivery = dispatch(notifier, url, &regressions.regressions);
            Ok(ComparisonOutcome::Compared { regressions, delivery })
        }
    }
}

/// Runs `scan` and `compare_baseline` against a store path, opening the store
/// for each run and releasing it when the run ends.
#[derive(Clone)]
pub struct SentinelRunner {
    db_path: PathBuf,
    read_pool_size: usize,
    scanner: Arc<dyn AccessibilityScanner>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl SentinelRunner {
    pub fn new(db_path: impl Into<PathBuf>, scanner: Arc<dyn AccessibilityScanner>) -> Self {
        Self {
            db_path: db_path.into(),
            read_pool_size: sentinel_storage::connection::DEFAULT_READ_POOL_SIZE,
            scanner,
            notifier: None,
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_read_pool_size(mut self, size: usize) -> Self {
        self.read_pool_size = size;
        self
    }

    /// Command scanner from `[scanner]`; webhook notifier from `[notify]`
    /// when both its URL and token are set.
    pub fn from_config(config: &SentinelConfig) -> Self {
        let scanner = Arc::new(CommandScanner::from_config(&config.scanner));
        let mut runner = Self::new(config.storage.effective_db_path(), scanner)
            .with_read_pool_size(config.storage.effective_read_pool_size());
        match WebhookNotifier::from_config(config) {
            Ok(n) => runner.notifier = Some(Arc::new(n)),
            Err(e) => tracing::debug!(reason = %e, "webhook notifier not configured"),
        }
        runner
    }

    pub fn db_path(&self) -> &std::path::Path {
        &self.db_path
    }

    /// `false` when only baseline scans can run.
    pub fn has_notifier(&self) -> bool {
        self.notifier.is_some()
    }

    fn open(&self) -> Result<DatabaseManager, PipelineError> {
        Ok(DatabaseManager::open_with_pool_size(&self.db_path, self.read_pool_size)?)
    }

    fn notifier(&self) -> Result<&dyn Notifier, ConfigError> {
        self.notifier
            .as_deref()
            .ok_or_else(|| ConfigError::MissingValue {
                field: "notify.webhook_url".to_string(),
            })
    }

    /// Resolve `raw_target` and scan it.
    pub fn scan(&self, raw_target: &str, is_baseline: bool) -> Result<ScanOutcome, PipelineError> {
        let target = resolve_target(raw_target)?;
        self.scan_target(&target, is_baseline)
    }

    pub fn scan_target(
        &self,
        target: &ScanTarget,
        is_baseline: bool,
    ) -> Result<ScanOutcome, PipelineError> {
        let notifier: &dyn Notifier = if is_baseline {
            self.notifier.as_deref().unwrap_or(&Unconfigured)
        } else {
            self.notifier()?
        };
        let db = self.open()?;
        scan(&db, self.scanner.as_ref(), notifier, target, is_baseline)
    }

    pub fn compare_baseline(&self, url: &str) -> Result<ComparisonOutcome, PipelineError> {
        let notifier = self.notifier()?;
        let db = self.open()?;
        compare_baseline(&db, notifier, url)
    }
}

/// Stand-in for baseline scans, which never notify.
struct Unconfigured;

impl Notifier for Unconfigured {
    fn name(&self) -> &'static str {
        "unconfigured"
    }

    fn deliver(&self, _html_content: &str) -> Result<(), sentinel_core::errors::CollaboratorError> {
        Ok(())
    }
}
