//! # sentinel-engine
//!
//! The regression-detection core. Raw scanner output flows through the
//! [`recorder`] into the store; non-baseline runs are admitted by the
//! [`gatekeeper`], compared by [`diff`], and reported through [`notify`].
//! [`pipeline`] wires these into the `scan` and `compare_baseline`
//! operations, and [`queue`] runs scans out-of-band on worker threads.

pub mod diff;
pub mod gatekeeper;
pub mod notify;
pub mod pipeline;
pub mod queue;
pub mod recorder;
pub mod scanner;
pub mod target;

pub use diff::{find_regressions, DiffOutcome, RegressionSet};
pub use gatekeeper::{check_baseline, GateDecision};
pub use notify::{dispatch, render_report, DeliveryStatus, WebhookNotifier};
pub use pipeline::{compare_baseline, scan, ComparisonOutcome, ScanOutcome, SentinelRunner};
pub use queue::{PipelineExecutor, ScanExecutor, ScanJob, ScanQueue, ScanQueueHandle};
pub use recorder::{record_inspection, RecordSummary};
pub use scanner::{parse_axe_results, CommandScanner};
pub use target::resolve_target;
