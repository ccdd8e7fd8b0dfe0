//! Regression diff: guideline barriers in the latest inspection whose key is
//! absent from the latest baseline inspection.

use std::collections::HashSet;

use sentinel_core::errors::StorageError;
use sentinel_core::types::{Barrier, BarrierKey, Inspection};
use sentinel_storage::queries::{barriers, inspections};
use sentinel_storage::DatabaseManager;

/// Counts logged with every comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffCounts {
    pub baseline_barriers: usize,
    pub latest_barriers: usize,
    pub latest_guideline_barriers: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegressionSet {
    /// `None` when the URL has no baseline; every guideline barrier is new.
    pub baseline_inspection: Option<Inspection>,
    pub latest_inspection: Inspection,
    pub counts: DiffCounts,
    /// New guideline barriers, ordered by barrier id.
    pub regressions: Vec<Barrier>,
}

impl RegressionSet {
    pub fn is_empty(&self) -> bool {
        self.regressions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOutcome {
    /// No non-baseline inspection exists for the URL.
    NoComparisonTarget,
    Compared(RegressionSet),
}

/// Pure set difference on [`BarrierKey`], restricted to guideline barriers.
pub fn diff_barriers(baseline: &[Barrier], latest: &[Barrier]) -> Vec<Barrier> {
    let known: HashSet<BarrierKey> = baseline.iter().map(Barrier::key).collect();
    let mut regressions: Vec<Barrier> = latest
        .iter()
        .filter(|b| b.is_guideline())
        .filter(|b| !known.contains(&b.key()))
        .cloned()
        .collect();
    regressions.sort_by_key(|b| b.barrier_id);
    regressions
}

/// Compare the latest non-baseline inspection of `url` against its latest
/// baseline inspection.
pub fn find_regressions(db: &DatabaseManager, url: &str) -> Result<DiffOutcome, StorageError> {
    db.with_reader(|conn| {
        let Some(latest) = inspections::latest_inspection(conn, url, false)? else {
            tracing::info!(url, "no non-baseline inspection to compare");
            return Ok(DiffOutcome::NoComparisonTarget);
        };
        let baseline = inspections::latest_inspection(conn, url, true)?;

        let baseline_barriers = match &baseline {
            Some(b) => barriers::barriers_for_inspection(conn, b.inspection_id)?,
            None => Vec::new(),
        };
        let latest_barriers = barriers::barriers_for_inspection(conn, latest.inspection_id)?;

        let counts = DiffCounts {
            baseline_barriers: baseline_barriers.len(),
            latest_barriers: latest_barriers.len(),
            latest_guideline_barriers: latest_barriers.iter().filter(|b| b.is_guideline()).count(),
        };
        let regressions = diff_barriers(&baseline_barriers, &latest_barriers);

        tracing::info!(
            url,
            baseline_inspection = baseline.as_ref().map(|b| b.inspection_id),
            latest_inspection = latest.inspection_id,
            baseline_barriers = counts.baseline_barriers,
            latest_barriers = counts.latest_barriers,
            latest_guideline_barriers = counts.latest_guideline_barriers,
            regressions = regressions.len(),
            "baseline comparison complete"
        );

        Ok(DiffOutcome::Compared(RegressionSet {
            baseline_inspection: baseline,
            latest_inspection: latest,
            counts,
            regressions,
        }))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_core::types::{Classification, Impact};

    fn barrier(id: i64, rule: &str, sel: &str, class: Classification) -> Barrier {
        Barrier {
            barrier_id: id,
            inspection_id: 1,
            url: "http://example.test".into(),
            rule: rule.into(),
            impact: Impact::Serious,
            description: String::new(),
            wcag_tags: vec![],
            classification: class,
            affected_user_groups: vec![],
            help_url: String::new(),
            node_targets: sel.into(),
            html: String::new(),
        }
    }

    #[test]
    fn reports_only_unseen_keys() {
        let baseline = vec![barrier(1, "A", "sel1", Classification::WcagGuideline)];
        let latest = vec![
            barrier(5, "A", "sel1", Classification::WcagGuideline),
            barrier(6, "B", "sel2", Classification::WcagGuideline),
        ];
        let out = diff_barriers(&baseline, &latest);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].rule, "B");
    }

    #[test]
    fn best_practice_is_never_a_regression() {
        let latest = vec![barrier(2, "region", "body", Classification::BestPracticeOnly)];
        assert!(diff_barriers(&[], &latest).is_empty());
    }

    #[test]
    fn ordered_by_barrier_id() {
        let latest = vec![
            barrier(9, "Z", "z", Classification::WcagGuideline),
            barrier(3, "Y", "y", Classification::WcagGuideline),
        ];
        let ids: Vec<i64> = diff_barriers(&[], &latest).iter().map(|b| b.barrier_id).collect();
        assert_eq!(ids, vec![3, 9]);
    }
}
