//! Queries for the barriers table.
//!
//! Barrier identity is the global `(rule, node_targets, url)` key: a key that
//! was ever recorded for a URL is never inserted again, whichever inspection
//! sees it next.

use rusqlite::{params, Connection};
use sentinel_core::errors::StorageError;
use sentinel_core::types::{
    decode_list, encode_list, Barrier, BarrierKey, Classification, Impact, NewBarrier,
};

/// Whether a barrier with this key exists anywhere in the store.
pub fn barrier_exists(conn: &Connection, key: &BarrierKey) -> Result<bool, StorageError> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM barriers WHERE rule = ?1 AND node_targets = ?2 AND url = ?3)",
        params![key.rule, key.node_targets, key.url],
        |row| row.get(0),
    )
    .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}

/// Insert a barrier under `inspection_id`.
///
/// Returns the new barrier id, or `None` when the key already exists (a
/// concurrent writer got there first).
pub fn insert_barrier(
    conn: &Connection,
    inspection_id: i64,
    barrier: &NewBarrier,
) -> Result<Option<i64>, StorageError> {
    let changed = conn
        .execute(
            "INSERT INTO barriers (
                inspection_id, url, rule, impact, description,
                wcag_tags, wcag_or_best_practice, affected_user_groups,
                help_url, node_targets, html
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
             ON CONFLICT(rule, node_targets, url) DO NOTHING",
            params![
                inspection_id,
                barrier.url,
                barrier.rule,
                barrier.impact.as_stored(),
                barrier.description,
                encode_list(&barrier.wcag_tags),
                barrier.classification.as_str(),
                encode_list(&barrier.affected_user_groups),
                barrier.help_url,
                barrier.node_targets,
                barrier.html,
            ],
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    if changed == 0 {
        return Ok(None);
    }
    Ok(Some(conn.last_insert_rowid()))
}

/// All barriers owned by one inspection, in insertion order.
pub fn barriers_for_inspection(
    conn: &Connection,
    inspection_id: i64,
) -> Result<Vec<Barrier>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT barrier_id, inspection_id, url, rule, impact, description, wcag_tags,
                    wcag_or_best_practice, affected_user_groups, help_url, node_targets, html
             FROM barriers WHERE inspection_id = ?1 ORDER BY barrier_id",
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    let rows = stmt
        .query_map(params![inspection_id], |row| {
            Ok(RawBarrier {
                barrier_id: row.get(0)?,
                inspection_id: row.get(1)?,
                url: row.get(2)?,
                rule: row.get(3)?,
                impact: row.get(4)?,
                description: row.get(5)?,
                wcag_tags: row.get(6)?,
                classification: row.get(7)?,
                affected_user_groups: row.get(8)?,
                help_url: row.get(9)?,
                node_targets: row.get(10)?,
                html: row.get(11)?,
            })
        })
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    let raw = rows
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    raw.into_iter().map(RawBarrier::into_barrier).collect()
}

/// Count barriers recorded for `url` across all inspections.
pub fn count_for_url(conn: &Connection, url: &str) -> Result<i64, StorageError> {
    conn.query_row(
        "SELECT COUNT(*) FROM barriers WHERE url = ?1",
        params![url],
        |row| row.get(0),
    )
    .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}

/// Count total barriers.
pub fn count(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM barriers", [], |row| row.get(0))
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}

struct RawBarrier {
    barrier_id: i64,
    inspection_id: i64,
    url: String,
    rule: String,
    impact: Option<String>,
    description: String,
    wcag_tags: String,
    classification: String,
    affected_user_groups: String,
    help_url: String,
    node_targets: String,
    html: String,
}

impl RawBarrier {
    fn into_barrier(self) -> Result<Barrier, StorageError> {
        let classification = Classification::parse(&self.classification).ok_or_else(|| {
            StorageError::InvalidStoredValue {
                column: "barriers.wcag_or_best_practice".to_string(),
                value: self.classification.clone(),
            }
        })?;
        Ok(Barrier {
            barrier_id: self.barrier_id,
            inspection_id: self.inspection_id,
            url: self.url,
            rule: self.rule,
            impact: Impact::parse(self.impact.as_deref()),
            description: self.description,
            wcag_tags: decode_list(&self.wcag_tags),
            classification,
            affected_user_groups: decode_list(&self.affected_user_groups),
            help_url: self.help_url,
            node_targets: self.node_targets,
            html: self.html,
        })
    }
}
