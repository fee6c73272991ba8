use crate::checksum::script_checksum;
use crate::version::Version;
use chrono::{DateTime, Utc};
use core::fmt;
use core::time::Duration;

/// A schema change the caller wants applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    pub version: Version,
    pub description: String,
    pub script: String,
}

impl Migration {
    pub fn new(
        version: impl Into<Version>,
        description: impl Into<String>,
        script: impl Into<String>,
    ) -> Self {
        Self {
            version: version.into(),
            description: description.into(),
            script: script.into(),
        }
    }

    /// Hash of the script body. Recomputed on every call.
    pub fn checksum(&self) -> String {
        script_checksum(&self.script)
    }
}

/// One attempted migration as persisted by a record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationRecord {
    pub version: Version,
    pub description: String,
    pub checksum: String,
    pub applied_at: DateTime<Utc>,
    pub execution_time: Duration,
    pub success: bool,
}

impl MigrationRecord {
    pub fn for_attempt(migration: &Migration, execution_time: Duration, success: bool) -> Self {
        Self {
            version: migration.version,
            description: migration.description.clone(),
            checksum: migration.checksum(),
            applied_at: Utc::now(),
            execution_time,
            success,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Applied,
    Pending,
    Ignored,
    Error,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Applied => "APPLIED",
            Status::Pending => "PENDING",
            Status::Ignored => "IGNORED",
            Status::Error => "ERROR",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a single migration, with the record it was matched against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Info {
    pub migration: Migration,
    pub status: Status,
    pub record: Option<MigrationRecord>,
}

/// Published after each attempted migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub version: Version,
    pub description: String,
    pub success: bool,
    pub execution_time: Duration,
}
