use core::fmt;
use folio_migration::{MigrationDiscoveryError, MigrationError, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    UserError = 1,
    MigrationFailed = 2,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

#[derive(Debug, Clone)]
pub struct CliError {
    code: ExitCode,
    title: String,
    reason: Option<String>,
    meaning: Option<String>,
    action: Option<String>,
}

impl CliError {
    fn with_code(code: ExitCode, title: impl Into<String>) -> Self {
        Self {
            code,
            title: title.into(),
            reason: None,
            meaning: None,
            action: None,
        }
    }

    pub fn user_error(title: impl Into<String>) -> Self {
        Self::with_code(ExitCode::UserError, title)
    }

    pub fn migration_failed(title: impl Into<String>) -> Self {
        Self::with_code(ExitCode::MigrationFailed, title)
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_meaning(mut self, meaning: impl Into<String>) -> Self {
        self.meaning = Some(meaning.into());
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn meaning(&self) -> Option<&str> {
        self.meaning.as_deref()
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    pub fn code(&self) -> ExitCode {
        self.code
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

impl std::error::Error for CliError {}

impl From<MigrationDiscoveryError> for CliError {
    fn from(err: MigrationDiscoveryError) -> Self {
        CliError::user_error("Migration discovery failed")
            .with_reason(err.to_string())
            .with_action("Name migration files <version>_<description>.sql, one version per file")
    }
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        if is_missing_bookkeeping(&err) {
            return CliError::user_error("Migrations have never been applied to this database")
                .with_reason(err.to_string())
                .with_action("Run `folio migrate` first");
        }

        if err.operation == "connect" {
            return CliError::user_error("Database connection failed")
                .with_reason(err.to_string())
                .with_action("Check DATABASE_URL and that the database is reachable");
        }

        CliError::migration_failed("Record store operation failed").with_reason(err.to_string())
    }
}

impl From<MigrationError> for CliError {
    fn from(err: MigrationError) -> Self {
        let reason = err.to_string();
        match err {
            MigrationError::IllegalVersion { version } => {
                CliError::user_error(format!("Migration {version} has an illegal version"))
                    .with_reason(reason)
                    .with_action("Use non-negative version numbers")
            }
            MigrationError::DuplicateVersion { version } => {
                CliError::user_error(format!("Version {version} is used by more than one migration"))
                    .with_reason(reason)
                    .with_action("Give every migration its own version")
            }
            MigrationError::RemovedMigration { version } => {
                CliError::user_error(format!("Applied migration {version} is missing"))
                    .with_reason(reason)
                    .with_meaning("The database recorded this migration, but it is no longer in the migration set.")
                    .with_action("Restore the migration; applied migrations must never be deleted")
            }
            MigrationError::InvalidChecksum { version, .. } => {
                CliError::user_error(format!("Migration {version} was modified after it was applied"))
                    .with_reason(reason)
                    .with_meaning("The script no longer matches the checksum recorded when it ran.")
                    .with_action("Revert the edit and add the change as a new migration, or run `folio repair` if the edit was intended")
            }
            MigrationError::ExecutionFailed { version, .. } => {
                CliError::migration_failed(format!("Migration failed at version {version}"))
                    .with_reason(reason)
                    .with_meaning("Earlier migrations stay applied. The failure is recorded and this version will not be retried.")
                    .with_action("Fix the problem in a new migration with a higher version and run `folio migrate` again")
            }
            MigrationError::Store(store) => CliError::from(store),
        }
    }
}

pub(crate) fn is_missing_bookkeeping(err: &StoreError) -> bool {
    if err.operation != "all" {
        return false;
    }

    let msg = err.message.to_ascii_lowercase();
    msg.contains("folio_migrations")
        && (msg.contains("no such table")
            || msg.contains("does not exist")
            || msg.contains("doesn't exist"))
}
