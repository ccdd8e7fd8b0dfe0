//! V002: Global barrier identity and latest-inspection lookup.
//!
//! `(rule, node_targets, url)` is unique across the whole store, not per
//! inspection. Concurrent writers racing on the same key resolve at this
//! index: the loser's insert becomes a no-op.

pub const MIGRATION_SQL: &str = r#"
CREATE UNIQUE INDEX IF NOT EXISTS idx_barriers_identity
    ON barriers(rule, node_targets, url);

CREATE INDEX IF NOT EXISTS idx_inspections_latest
    ON inspections(url, is_baseline, inspected_on DESC, inspection_id DESC);
"#;
