use super::error_code::{self, SentinelErrorCode};

/// Storage-layer errors for SQLite operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("inspection {inspection_id} not found")]
    InspectionNotFound { inspection_id: i64 },

    #[error("invalid stored value in {column}: {value}")]
    InvalidStoredValue { column: String, value: String },
}

impl SentinelErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            _ => error_code::STORAGE_ERROR,
        }
    }
}
