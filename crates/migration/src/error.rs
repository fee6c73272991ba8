use crate::version::Version;
use thiserror::Error;

/// Failure reported by a record store adapter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("record store {operation} failed: {message}")]
pub struct StoreError {
    pub operation: String,
    pub message: String,
}

impl StoreError {
    pub fn new(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MigrationError {
    #[error("illegal migration version {version}: versions must not be negative")]
    IllegalVersion { version: Version },

    #[error("duplicate migration version {version}")]
    DuplicateVersion { version: Version },

    #[error("migration {version} was applied but is missing from the migration set")]
    RemovedMigration { version: Version },

    #[error("checksum mismatch for version {version} (recorded={recorded}, current={current})")]
    InvalidChecksum {
        version: Version,
        recorded: String,
        current: String,
    },

    #[error("migration {version} failed: {source}")]
    ExecutionFailed { version: Version, source: StoreError },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl MigrationError {
    /// Validation failures need the migration set fixed; store failures may
    /// succeed on another `migrate` call.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            MigrationError::ExecutionFailed { .. } | MigrationError::Store(_)
        )
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MigrationDiscoveryError {
    #[error("migrations directory is empty: {dir}")]
    EmptyMigrationsDir { dir: String },

    #[error("invalid migration filename '{filename}': {reason}")]
    InvalidFilename { filename: String, reason: String },

    #[error("duplicate migration version {version}: '{first}' and '{second}'")]
    DuplicateVersion {
        version: Version,
        first: String,
        second: String,
    },

    #[error("I/O error while reading '{path}': {message}")]
    Io { path: String, message: String },
}
