//! Queries for the inspections table.

use rusqlite::{params, Connection, OptionalExtension};
use sentinel_core::errors::StorageError;
use sentinel_core::types::{Environment, Inspection};

const INSPECTION_COLUMNS: &str = "inspection_id, url, environment, inspected_on, is_baseline";

/// Insert a new inspection. Returns its identifier.
///
/// `inspected_on` defaults to the store's current time when `None`.
pub fn insert_inspection(
    conn: &Connection,
    url: &str,
    environment: Environment,
    is_baseline: bool,
    inspected_on: Option<i64>,
) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO inspections (url, environment, inspected_on, is_baseline)
         VALUES (?1, ?2, COALESCE(?3, unixepoch()), ?4)",
        params![url, environment.as_str(), inspected_on, is_baseline],
    )
    .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    Ok(conn.last_insert_rowid())
}

/// Whether any baseline inspection exists for `url`.
pub fn baseline_exists(conn: &Connection, url: &str) -> Result<bool, StorageError> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM inspections WHERE url = ?1 AND is_baseline = 1)",
        params![url],
        |row| row.get(0),
    )
    .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}

/// The most recent inspection of `url` with the given baseline flag.
///
/// Ordered by `inspected_on DESC, inspection_id DESC`: equal timestamps are
/// resolved in favour of the later identifier.
pub fn latest_inspection(
    conn: &Connection,
    url: &str,
    is_baseline: bool,
) -> Result<Option<Inspection>, StorageError> {
    let sql = format!(
        "SELECT {INSPECTION_COLUMNS} FROM inspections
         WHERE url = ?1 AND is_baseline = ?2
         ORDER BY inspected_on DESC, inspection_id DESC
         LIMIT 1"
    );
    let raw = conn
        .query_row(&sql, params![url, is_baseline], read_row)
        .optional()
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    raw.map(into_inspection).transpose()
}

/// Fetch one inspection by identifier.
pub fn get_inspection(
    conn: &Connection,
    inspection_id: i64,
) -> Result<Option<Inspection>, StorageError> {
    let sql = format!("SELECT {INSPECTION_COLUMNS} FROM inspections WHERE inspection_id = ?1");
    let raw = conn
        .query_row(&sql, params![inspection_id], read_row)
        .optional()
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    raw.map(into_inspection).transpose()
}

/// All inspections of `url`, most recent first.
pub fn list_for_url(conn: &Connection, url: &str) -> Result<Vec<Inspection>, StorageError> {
    let sql = format!(
        "SELECT {INSPECTION_COLUMNS} FROM inspections WHERE url = ?1
         ORDER BY inspected_on DESC, inspection_id DESC"
    );
    let mut stmt = conn
        .prepare_cached(&sql)
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    let rows = stmt
        .query_map(params![url], read_row)
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    let raw = rows
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    raw.into_iter().map(into_inspection).collect()
}

/// Count total inspections.
pub fn count(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM inspections", [], |row| row.get(0))
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}

type RawInspection = (i64, String, String, i64, bool);

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawInspection> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
}

fn into_inspection(raw: RawInspection) -> Result<Inspection, StorageError> {
    let (inspection_id, url, environment, inspected_on, is_baseline) = raw;
    let environment = environment
        .parse::<Environment>()
        .map_err(|_| StorageError::InvalidStoredValue {
            column: "inspections.environment".to_string(),
            value: environment.clone(),
        })?;
    Ok(Inspection {
        inspection_id,
        url,
        environment,
        inspected_on,
        is_baseline,
    })
}
