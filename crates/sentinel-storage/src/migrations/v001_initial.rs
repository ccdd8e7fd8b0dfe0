//! V001: Initial schema — inspections and barriers.

pub const MIGRATION_SQL: &str = r#"
-- One row per scan run. Immutable once written.
CREATE TABLE IF NOT EXISTS inspections (
    inspection_id INTEGER PRIMARY KEY AUTOINCREMENT,
    url TEXT NOT NULL,
    environment TEXT NOT NULL CHECK (environment IN ('local', 'production')),
    inspected_on INTEGER NOT NULL DEFAULT (unixepoch()),
    is_baseline INTEGER NOT NULL CHECK (is_baseline IN (0, 1))
) STRICT;

-- One row per defect instance, owned by the inspection that first saw it.
CREATE TABLE IF NOT EXISTS barriers (
    barrier_id INTEGER PRIMARY KEY AUTOINCREMENT,
    inspection_id INTEGER NOT NULL
        REFERENCES inspections (inspection_id) ON DELETE CASCADE,
    url TEXT NOT NULL,
    rule TEXT NOT NULL,
    impact TEXT,
    description TEXT NOT NULL DEFAULT '',
    wcag_tags TEXT NOT NULL DEFAULT 'None',
    wcag_or_best_practice TEXT NOT NULL
        CHECK (wcag_or_best_practice IN ('WCAG Guideline', 'Best Practice Only')),
    affected_user_groups TEXT NOT NULL DEFAULT 'None',
    help_url TEXT NOT NULL DEFAULT '',
    node_targets TEXT NOT NULL,
    html TEXT NOT NULL DEFAULT ''
) STRICT;

CREATE INDEX IF NOT EXISTS idx_barriers_inspection
    ON barriers(inspection_id);
"#;
