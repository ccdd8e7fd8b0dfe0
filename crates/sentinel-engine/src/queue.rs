//! Out-of-band scan queue.
//!
//! Jobs are pushed onto a bounded crossbeam channel and run by a fixed set
//! of named worker threads. Enqueueing never blocks: a full queue is
//! reported back to the caller. A panicking job is caught and logged; the
//! worker keeps running.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use sentinel_core::errors::GatewayError;

use crate::pipeline::{ComparisonOutcome, ScanOutcome, SentinelRunner};

/// One requested scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanJob {
    /// URL or local path, resolved when the job runs.
    pub target: String,
    pub is_baseline: bool,
    pub received_at: DateTime<Utc>,
}

impl ScanJob {
    pub fn new(target: impl Into<String>, is_baseline: bool) -> Self {
        Self {
            target: target.into(),
            is_baseline,
            received_at: Utc::now(),
        }
    }
}

/// Runs dequeued jobs. Errors are the executor's to log; nothing is retried.
pub trait ScanExecutor: Send + Sync {
    fn execute(&self, job: &ScanJob);
}

enum QueueCommand {
    Run(ScanJob),
    Shutdown,
}

/// Cheap, cloneable enqueue side of a [`ScanQueue`].
#[derive(Clone)]
pub struct ScanQueueHandle {
    tx: Sender<QueueCommand>,
}

impl ScanQueueHandle {
    pub fn try_enqueue(&self, job: ScanJob) -> Result<(), GatewayError> {
        let target = job.target.clone();
        match self.tx.try_send(QueueCommand::Run(job)) {
            Ok(()) => {
                tracing::debug!(scan_target = %target, pending = self.pending(), "scan job enqueued");
                Ok(())
            }
            Err(TrySendError::Full(_)) => Err(GatewayError::QueueUnavailable {
                reason: "queue full".to_string(),
            }),
            Err(TrySendError::Disconnected(_)) => Err(GatewayError::QueueUnavailable {
                reason: "queue closed".to_string(),
            }),
        }
    }

    /// Jobs waiting for a worker.
    pub fn pending(&self) -> usize {
        self.tx.len()
    }
}

pub struct ScanQueue {
    handle: ScanQueueHandle,
    workers: Vec<JoinHandle<()>>,
}

impl ScanQueue {
    /// Spawn `workers` threads draining a queue of `capacity` jobs.
    pub fn start(
        workers: usize,
        capacity: usize,
        executor: Arc<dyn ScanExecutor>,
    ) -> std::io::Result<Self> {
        let (tx, rx) = bounded(capacity.max(1));
        let mut handles = Vec::with_capacity(workers);
        for i in 0..workers.max(1) {
            let rx = rx.clone();
            let executor = Arc::clone(&executor);
            let handle = thread::Builder::new()
                .name(format!("sentinel-scan-worker-{i}"))
                .spawn(move || worker_loop(rx, executor))?;
            handles.push(handle);
        }
        tracing::info!(workers = handles.len(), capacity, "scan queue started");

        Ok(Self {
            handle: ScanQueueHandle { tx },
            workers: handles,
        })
    }

    pub fn handle(&self) -> ScanQueueHandle {
        self.handle.clone()
    }

    /// Let queued jobs finish, then stop every worker.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        for _ in 0..self.workers.len() {
            let _ = self.handle.tx.send(QueueCommand::Shutdown);
        }
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                tracing::warn!("scan worker exited abnormally");
            }
        }
    }
}

impl Drop for ScanQueue {
    fn drop(&mut self) {
        self.stop();
    }
}

fn worker_loop(rx: Receiver<QueueCommand>, executor: Arc<dyn ScanExecutor>) {
    while let Ok(cmd) = rx.recv() {
        let job = match cmd {
            QueueCommand::Run(job) => job,
            QueueCommand::Shutdown => break,
        };
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            executor.execute(&job);
        }));
        if result.is_err() {
            tracing::error!(scan_target = %job.target, "scan job panicked");
        }
    }
}

/// Executes jobs with a [`SentinelRunner`], logging the outcome.
pub struct PipelineExecutor {
    runner: SentinelRunner,
}

impl PipelineExecutor {
    pub fn new(runner: SentinelRunner) -> Self {
        Self { runner }
    }
}

impl ScanExecutor for PipelineExecutor {
    fn execute(&self, job: &ScanJob) {
        tracing::info!(
            scan_target = %job.target,
            is_baseline = job.is_baseline,
            received_at = %job.received_at.to_rfc3339(),
            "running scan job"
        );
        match self.runner.scan(&job.target, job.is_baseline) {
            Ok(ScanOutcome::NoBaseline) => {
                tracing::warn!(scan_target = %job.target, "no baseline exists; run a baseline scan first");
            }
            Ok(ScanOutcome::Recorded { summary, comparison }) => {
                let regressions = comparison.as_ref().map(ComparisonOutcome::regression_count);
                tracing::info!(
                    scan_target = %job.target,
                    inspection_id = summary.inspection_id,
                    inserted = summary.inserted_count(),
                    duplicates = summary.duplicates,
                    regressions,
                    "scan job finished"
                );
            }
            Err(e) => {
                tracing::error!(
                    scan_target = %job.target,
                    error = %e,
                    timestamp = %Utc::now().to_rfc3339(),
                    "scan job failed"
                );
            }
        }
    }
}
