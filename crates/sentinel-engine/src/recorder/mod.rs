//! Violation recorder: turns one scan's raw violations into one inspection
//! and its newly seen barriers.

pub mod normalize;

use sentinel_core::errors::StorageError;
use sentinel_core::types::{RawViolation, ScanTarget};
use sentinel_storage::queries::{barriers, inspections};
use sentinel_storage::DatabaseManager;

/// Result of recording one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSummary {
    pub inspection_id: i64,
    /// Barrier ids inserted under this inspection, in insertion order.
    pub inserted: Vec<i64>,
    /// Candidates skipped because their key already existed.
    pub duplicates: usize,
}

impl RecordSummary {
    pub fn inserted_count(&self) -> usize {
        self.inserted.len()
    }
}

/// Create the inspection for `target` and store every candidate barrier
/// whose `(rule, node_targets, url)` key has never been seen.
///
/// A storage error stops the loop. The inspection row and any barriers
/// already written stay in place.
pub fn record_inspection(
    db: &DatabaseManager,
    target: &ScanTarget,
    is_baseline: bool,
    violations: &[RawViolation],
) -> Result<RecordSummary, StorageError> {
    let inspection_id = db.with_writer(|conn| {
        inspections::insert_inspection(conn, &target.url, target.environment, is_baseline, None)
    })?;
    tracing::debug!(
        inspection_id,
        url = %target.url,
        environment = %target.environment,
        is_baseline,
        "inspection created"
    );

    let mut summary = RecordSummary {
        inspection_id,
        ..Default::default()
    };

    for violation in violations {
        for candidate in normalize::candidates(&target.url, violation) {
            let key = candidate.key();
            let inserted = db.with_writer(|conn| {
                if barriers::barrier_exists(conn, &key)? {
                    return Ok(None);
                }
                barriers::insert_barrier(conn, inspection_id, &candidate)
            })?;

            match inserted {
                Some(barrier_id) => summary.inserted.push(barrier_id),
                None => {
                    tracing::info!(
                        rule = %key.rule,
                        node_targets = %key.node_targets,
                        url = %key.url,
                        "duplicate barrier skipped"
                    );
                    summary.duplicates += 1;
                }
            }
        }
    }

    tracing::info!(
        inspection_id,
        url = %target.url,
        inserted = summary.inserted.len(),
        duplicates = summary.duplicates,
        "inspection recorded"
    );
    Ok(summary)
}
